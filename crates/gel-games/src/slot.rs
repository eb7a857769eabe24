use rand::Rng;
use serde::Serialize;

/// The fourteen reel faces.
pub const REEL_SYMBOLS: [&str; 14] = [
    "Cherry", "Lemon", "Orange", "Plum", "Grape", "Coin", "Gold", "Heart", "Spade", "Diamond",
    "Club", "Bell", "Bar", "7",
];

/// Payout classification of a spin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum SpinOutcome {
    Win,
    Loss,
}

/// Ledger record for one completed spin.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SpinRecord {
    pub reels: [String; 3],
    pub outcome: SpinOutcome,
    pub amount: i64,
    pub balance: i64,
}

/// Three-reel slot machine session.
pub struct SlotMachine {
    balance: i64,
}

impl SlotMachine {
    pub fn new(balance: i64) -> Self {
        Self { balance }
    }

    pub fn balance(&self) -> i64 {
        self.balance
    }

    /// Session ends when the balance is exhausted.
    pub fn is_broke(&self) -> bool {
        self.balance <= 0
    }

    /// Spin the reels, settle the payout, and produce the round record.
    pub fn spin<R: Rng + ?Sized>(&mut self, rng: &mut R) -> SpinRecord {
        let reels: [&str; 3] = [
            REEL_SYMBOLS[rng.gen_range(0..REEL_SYMBOLS.len())],
            REEL_SYMBOLS[rng.gen_range(0..REEL_SYMBOLS.len())],
            REEL_SYMBOLS[rng.gen_range(0..REEL_SYMBOLS.len())],
        ];
        let (outcome, amount) = evaluate(&reels);
        self.balance += amount;

        SpinRecord {
            reels: reels.map(str::to_owned),
            outcome,
            amount,
            balance: self.balance,
        }
    }
}

/// Payout table: triple sevens 500, any other triple 100, an adjacent pair
/// 10, otherwise -5.
fn evaluate(reels: &[&str; 3]) -> (SpinOutcome, i64) {
    if reels[0] == reels[1] && reels[1] == reels[2] {
        if reels[0] == "7" {
            (SpinOutcome::Win, 500)
        } else {
            (SpinOutcome::Win, 100)
        }
    } else if reels[0] == reels[1] || reels[1] == reels[2] {
        (SpinOutcome::Win, 10)
    } else {
        (SpinOutcome::Loss, -5)
    }
}
