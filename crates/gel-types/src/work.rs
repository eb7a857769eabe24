use std::fmt;

use serde::{Deserialize, Serialize};

/// Solution to the admission puzzle carried by the genesis entry.
///
/// The genesis puzzle is not searched, by convention; the chain is seeded
/// with this fixed constant and every later search links back to it.
pub const GENESIS_SOLUTION: PuzzleSolution = PuzzleSolution(100);

/// A non-negative integer found by the admission search.
///
/// The puzzle rule hashes the decimal concatenation of the predecessor's
/// solution and a candidate, so the `Display` form of this type is part of
/// the verification contract.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct PuzzleSolution(pub u64);

impl PuzzleSolution {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for PuzzleSolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for PuzzleSolution {
    fn from(value: u64) -> Self {
        Self(value)
    }
}
