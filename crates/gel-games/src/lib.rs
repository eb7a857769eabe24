//! Mini-game outcome producers for the Game Event Ledger.
//!
//! Each game here is a UI-free collaborator: it rolls an outcome with an
//! injected RNG and yields a serializable record that the caller converts
//! into a ledger [`Payload`](gel_types::Payload) and submits for admission —
//! one record per completed game action (a spin, a duel, a hand, an egg
//! break, a race tick).
//!
//! The games hold only their own session state (balances, positions); the
//! ledger never depends on them.

pub mod beacon;
pub mod blackjack;
pub mod chambers;
pub mod gacha;
pub mod race;
pub mod slot;

pub use beacon::{RandomnessBeacon, RevealRecord};
pub use blackjack::{BlackjackTable, Card, HandRecord, RoundRecord, RoundResult};
pub use chambers::{play_duel, DuelRecord, ShotRecord};
pub use gacha::{Hatchery, HatchRecord};
pub use race::{Race, RaceStatus, TickRecord};
pub use slot::{SlotMachine, SpinOutcome, SpinRecord};
