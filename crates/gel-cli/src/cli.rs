use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "gel",
    about = "GEL — tamper-evident game event ledger",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log puzzle searches and admissions at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Play rounds of one game, admitting each outcome to the ledger
    Play(PlayArgs),
    /// Play a scripted session across every game, then show the chain
    Demo(DemoArgs),
}

#[derive(Args)]
pub struct PlayArgs {
    /// Which game to play
    #[arg(value_enum)]
    pub game: Game,

    /// Rounds to play (spins, duels, hands, eggs); a race always runs to
    /// the finish line instead
    #[arg(short, long, default_value_t = 5)]
    pub rounds: u32,

    #[command(flatten)]
    pub session: SessionArgs,
}

#[derive(Args)]
pub struct DemoArgs {
    #[command(flatten)]
    pub session: SessionArgs,
}

#[derive(Args)]
pub struct SessionArgs {
    /// RNG seed for a reproducible session
    #[arg(long)]
    pub seed: Option<u64>,

    /// Puzzle difficulty in leading zero hex digits
    #[arg(long, default_value_t = gel_crypto::DEFAULT_DIFFICULTY)]
    pub difficulty: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Game {
    Slot,
    Chambers,
    Blackjack,
    Gacha,
    Race,
}
