use std::sync::atomic::{AtomicBool, Ordering};

use gel_types::PuzzleSolution;

use crate::hasher::TaggedHasher;

/// Default number of leading zero hex digits a guess digest must have.
///
/// Each additional digit multiplies the expected search cost by 16. This is
/// a process-wide design knob, not runtime-tunable state.
pub const DEFAULT_DIFFICULTY: usize = 4;

/// How many trials the cancellable search runs between cancellation checks.
const CANCEL_CHECK_INTERVAL: u64 = 1024;

/// Result of a successful puzzle search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchOutcome {
    /// The smallest accepted candidate.
    pub solution: PuzzleSolution,
    /// Number of candidates tried, including the accepted one.
    pub trials: u64,
}

/// Errors from the puzzle search.
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum PuzzleError {
    #[error("puzzle search cancelled after {trials} trials")]
    Cancelled { trials: u64 },
}

/// The admission gate: a one-step proof-of-work rule linking consecutive
/// puzzle solutions.
///
/// A candidate is valid when the digest of the decimal concatenation
/// `{previous}{candidate}` has at least `difficulty` leading zero hex
/// digits. The rule deliberately binds a candidate to the *previous*
/// entry's solution, not to the new entry's content; the chain digest
/// linkage is what binds content.
#[derive(Clone, Copy, Debug)]
pub struct PuzzleRule {
    hasher: TaggedHasher,
    difficulty: usize,
}

impl PuzzleRule {
    /// Rule with the given difficulty and the standard puzzle hash domain.
    pub fn new(difficulty: usize) -> Self {
        Self {
            hasher: TaggedHasher::PUZZLE,
            difficulty,
        }
    }

    /// Rule with a custom hasher domain, for embedders and tests.
    pub fn with_hasher(hasher: TaggedHasher, difficulty: usize) -> Self {
        Self { hasher, difficulty }
    }

    /// The configured difficulty.
    pub fn difficulty(&self) -> usize {
        self.difficulty
    }

    /// Check whether `candidate` is a valid successor of `previous`.
    pub fn is_valid(&self, previous: PuzzleSolution, candidate: PuzzleSolution) -> bool {
        let guess = format!("{previous}{candidate}");
        let digest = self.hasher.hash(guess.as_bytes());
        digest.leading_zero_hex_digits() >= self.difficulty
    }

    /// Exhaustive linear search for the smallest valid candidate.
    ///
    /// Always terminates in expectation (acceptance probability per trial is
    /// 16^-difficulty), but blocks the caller for the whole search.
    pub fn solve(&self, previous: PuzzleSolution) -> SearchOutcome {
        let mut candidate = 0u64;
        loop {
            if self.is_valid(previous, PuzzleSolution(candidate)) {
                return SearchOutcome {
                    solution: PuzzleSolution(candidate),
                    trials: candidate + 1,
                };
            }
            candidate += 1;
        }
    }

    /// Linear search with best-effort cancellation.
    ///
    /// The flag is checked every [`CANCEL_CHECK_INTERVAL`] trials, so
    /// cancellation latency is bounded by one interval of hashing.
    pub fn solve_cancellable(
        &self,
        previous: PuzzleSolution,
        cancel: &AtomicBool,
    ) -> Result<SearchOutcome, PuzzleError> {
        let mut candidate = 0u64;
        loop {
            if candidate % CANCEL_CHECK_INTERVAL == 0 && cancel.load(Ordering::Relaxed) {
                return Err(PuzzleError::Cancelled { trials: candidate });
            }
            if self.is_valid(previous, PuzzleSolution(candidate)) {
                return Ok(SearchOutcome {
                    solution: PuzzleSolution(candidate),
                    trials: candidate + 1,
                });
            }
            candidate += 1;
        }
    }
}

impl Default for PuzzleRule {
    fn default() -> Self {
        Self::new(DEFAULT_DIFFICULTY)
    }
}
