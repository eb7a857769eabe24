use gel_types::Payload;

use crate::entry::Entry;
use crate::error::LedgerError;

/// Read boundary for chain consumers (history display, auditing).
///
/// Implementations must never expose a partially appended entry: a reader
/// sees the chain either before or after an admission, never mid-append.
pub trait ChainReader: Send + Sync {
    /// The most recently appended entry. Genesis guarantees non-empty, so
    /// this fails only if the instance is corrupted.
    fn last_entry(&self) -> Result<Entry, LedgerError>;

    /// Snapshot of the whole chain in sequence order.
    fn entries(&self) -> Result<Vec<Entry>, LedgerError>;

    /// Current chain length (genesis included).
    fn entry_count(&self) -> Result<u64, LedgerError>;
}

/// Write boundary for event producers.
pub trait ChainWriter: Send + Sync {
    /// Admit a payload: solve the puzzle against the predecessor, assemble
    /// the entry, append it, and return it.
    fn admit(&self, payload: Payload) -> Result<Entry, LedgerError>;
}
