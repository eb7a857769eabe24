use gel_crypto::PuzzleError;

/// Errors produced by ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    /// The payload could not be canonically serialized. Recoverable: the
    /// caller fixes the payload and resubmits.
    #[error("invalid payload: {reason}")]
    InvalidPayload { reason: String },

    /// An integrity invariant failed. Fatal to trust in this ledger
    /// instance; surfaced verbatim and never silently repaired.
    #[error("ledger corrupted at seq {seq}: {reason}")]
    LedgerCorrupted { seq: u64, reason: String },

    /// The puzzle search was interrupted before finding a solution.
    #[error(transparent)]
    Puzzle(#[from] PuzzleError),
}
