//! Append-only event ledger for the Game Event Ledger (GEL).
//!
//! This crate is the heart of GEL. It provides:
//! - The [`Entry`] record with hash-linked integrity
//! - [`ChainReader`] / [`ChainWriter`] trait boundaries
//! - The in-memory [`Ledger`] owning puzzle-gated admission
//! - Fail-fast [`Ledger::verify`] plus the report-producing [`ChainAuditor`]
//!
//! Every entry is admitted only after a proof-of-work puzzle is solved
//! against the predecessor's solution, so retroactively altering an entry
//! requires redoing all subsequent puzzle work.

pub mod entry;
pub mod error;
pub mod memory;
pub mod traits;
pub mod validation;

pub use entry::{compute_digest, Entry};
pub use error::LedgerError;
pub use memory::Ledger;
pub use traits::{ChainReader, ChainWriter};
pub use validation::{AuditReport, ChainAuditor, Violation, ViolationKind};
