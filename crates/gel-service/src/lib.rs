//! Asynchronous admission service for the Game Event Ledger.
//!
//! The reference ledger blocks its caller for the whole puzzle search. This
//! crate runs that search off the interaction task: a single worker owns the
//! ledger and receives admission requests over a channel, so admissions are
//! processed strictly in arrival order (one writer, no forks), callers get
//! their entry back over a completion channel, and subscribers receive every
//! appended entry after it is fully constructed.

pub mod error;
pub mod service;

pub use error::ServiceError;
pub use service::{AdmissionConfig, AdmissionHandle, AdmissionService};
