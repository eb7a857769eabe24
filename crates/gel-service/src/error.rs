use gel_ledger::LedgerError;

/// Errors produced by the admission service boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    /// The admission worker has stopped; no further requests can complete.
    #[error("admission worker is no longer running")]
    WorkerGone,

    /// The ledger rejected the request.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
