//! Foundation types for the Game Event Ledger (GEL).
//!
//! This crate provides the core value types shared by the ledger, the puzzle
//! primitives, and the game collaborators. Every other GEL crate depends on
//! `gel-types`.
//!
//! # Key Types
//!
//! - [`Digest`] — Fixed-length content digest binding an entry's fields
//! - [`Payload`] — Opaque, caller-defined structured value recorded per entry
//! - [`Timestamp`] — Monotonic admission timestamp (display only)
//! - [`PuzzleSolution`] — Integer found by the admission search

pub mod digest;
pub mod error;
pub mod payload;
pub mod timestamp;
pub mod work;

pub use digest::Digest;
pub use error::TypeError;
pub use payload::Payload;
pub use timestamp::{Clock, ManualClock, Timestamp, WallClock};
pub use work::{PuzzleSolution, GENESIS_SOLUTION};
