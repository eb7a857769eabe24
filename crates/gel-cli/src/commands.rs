use colored::Colorize;
use rand::rngs::StdRng;
use rand::SeedableRng;

use gel_crypto::{PuzzleRule, TaggedHasher};
use gel_games::{play_duel, BlackjackTable, Hatchery, Race, RaceStatus, SlotMachine, SpinOutcome};
use gel_ledger::{ChainAuditor, Entry, Ledger};
use gel_service::{AdmissionHandle, AdmissionService};
use gel_types::{Payload, WallClock};

use crate::cli::{Cli, Command, DemoArgs, Game, PlayArgs, SessionArgs};

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Play(args) => cmd_play(args).await,
        Command::Demo(args) => cmd_demo(args).await,
    }
}

struct Session {
    handle: AdmissionHandle,
    rng: StdRng,
    difficulty: usize,
}

impl Session {
    fn open(args: &SessionArgs) -> Self {
        let ledger = Ledger::with_parts(
            TaggedHasher::ENTRY,
            PuzzleRule::new(args.difficulty),
            Box::new(WallClock::new()),
        );
        let rng = match args.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Session {
            handle: AdmissionService::spawn(ledger),
            rng,
            difficulty: args.difficulty,
        }
    }

    /// Admit a game record and print its receipt line.
    async fn admit(&self, record: &impl serde::Serialize) -> anyhow::Result<Entry> {
        let payload = Payload::from_record(record)?;
        let entry = self.handle.admit(payload).await?;
        println!(
            "    {} {}  solution={}",
            format!("r#{}", entry.sequence).yellow(),
            entry.digest.short_hex().dimmed(),
            entry.puzzle_solution
        );
        Ok(entry)
    }

    /// Render the chain and run the integrity check; errors exit non-zero.
    async fn close(self) -> anyhow::Result<()> {
        let chain = self.handle.snapshot().await?;

        println!("\n{}", "Chain history".bold());
        for entry in &chain {
            println!(
                "  {} {}  {}  {}",
                format!("r#{}", entry.sequence).yellow(),
                entry.digest.short_hex().dimmed(),
                entry.created_at,
                entry.payload.to_compact_string()
            );
        }

        let verdict = self.handle.verify().await;
        self.handle.shutdown().await;

        match verdict {
            Ok(()) => {
                println!(
                    "{} {} entries, integrity {}",
                    "✓".green().bold(),
                    chain.len(),
                    "verified".green()
                );
                Ok(())
            }
            Err(e) => {
                // Surface the failure verbatim, then the full audit report.
                eprintln!("{} {}", "✗".red().bold(), e.to_string().red());
                let auditor =
                    ChainAuditor::new(TaggedHasher::ENTRY, PuzzleRule::new(self.difficulty));
                for violation in auditor.audit_entries(&chain).violations {
                    eprintln!(
                        "    seq {}: {:?}: {}",
                        violation.seq, violation.kind, violation.description
                    );
                }
                Err(e.into())
            }
        }
    }
}

async fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    let mut session = Session::open(&args.session);
    play_game(&mut session, args.game, args.rounds).await?;
    session.close().await
}

async fn cmd_demo(args: DemoArgs) -> anyhow::Result<()> {
    let mut session = Session::open(&args.session);
    for game in [Game::Slot, Game::Chambers, Game::Blackjack, Game::Gacha] {
        play_game(&mut session, game, 2).await?;
    }
    play_game(&mut session, Game::Race, 0).await?;
    session.close().await
}

async fn play_game(session: &mut Session, game: Game, rounds: u32) -> anyhow::Result<()> {
    match game {
        Game::Slot => {
            println!("{}", "Slot machine".bold());
            let mut machine = SlotMachine::new(100);
            for _ in 0..rounds {
                if machine.is_broke() {
                    println!("  {}", "Balance exhausted; session over.".red());
                    break;
                }
                let record = machine.spin(&mut session.rng);
                let outcome = match record.outcome {
                    SpinOutcome::Win => "Win".green(),
                    SpinOutcome::Loss => "Loss".red(),
                };
                println!(
                    "  [{} | {} | {}]  {} {:+}  balance {}",
                    record.reels[0], record.reels[1], record.reels[2],
                    outcome, record.amount, record.balance
                );
                session.admit(&record).await?;
            }
        }
        Game::Chambers => {
            println!("{}", "Chamber duel".bold());
            for _ in 0..rounds {
                let record = play_duel(&mut session.rng);
                let fate = if record.survived {
                    "survived".green()
                } else {
                    "hit".red()
                };
                println!(
                    "  chambers {}/{}  {}",
                    record.gun_one.chamber, record.gun_two.chamber, fate
                );
                session.admit(&record).await?;
                if !record.survived {
                    break;
                }
            }
        }
        Game::Blackjack => {
            println!("{}", "Blackjack".bold());
            for _ in 0..rounds {
                let record = BlackjackTable::play_round(&mut session.rng);
                println!(
                    "  player {} vs dealer {}  {:?}",
                    record.player.total, record.dealer.total, record.result
                );
                session.admit(&record).await?;
            }
        }
        Game::Gacha => {
            println!("{}", "Egg gacha".bold());
            let mut hatchery = Hatchery::new();
            for _ in 0..rounds {
                let record = hatchery.break_egg(&mut session.rng);
                println!(
                    "  hatched {} (tier {})",
                    record.creature.cyan(),
                    record.tier
                );
                session.admit(&record).await?;
            }
        }
        Game::Race => {
            println!("{}", "Horse race".bold());
            let mut race = Race::start(&mut session.rng);
            while race.status() == RaceStatus::Running {
                let record = race.tick(&mut session.rng);
                println!("  positions {:?}", record.positions);
                session.admit(&record).await?;
            }
            if let RaceStatus::Won(winner) = race.status() {
                println!("  {} runner {} wins", "🏁".bold(), winner + 1);
            }
            let reveal = race.finish();
            let check = if reveal.matches {
                "commitment matches".green()
            } else {
                "commitment MISMATCH".red()
            };
            println!("  beacon reveal: {check}");
            session.admit(&reveal).await?;
        }
    }
    Ok(())
}
