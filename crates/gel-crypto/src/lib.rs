//! Hashing and puzzle primitives for the Game Event Ledger.
//!
//! Provides domain-separated BLAKE3 hashing, the proof-of-work admission
//! rule with its exhaustive solver, and hash chain verification.
//!
//! The puzzle here is a computational-cost gate, not a security mechanism;
//! all hashing wraps an established library — no custom cryptography.

pub mod chain;
pub mod hasher;
pub mod puzzle;

pub use chain::{ChainError, ChainLink, ChainVerifier};
pub use hasher::{HasherError, TaggedHasher};
pub use puzzle::{PuzzleError, PuzzleRule, SearchOutcome, DEFAULT_DIFFICULTY};
