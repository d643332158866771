//! In-memory adapters for the ledger domain ports
//!
//! The billing core defines its collaborator contracts as port traits
//! (`domain_ledger::ports`); this crate provides the adapter implementations
//! a host or test suite can run against without any external system:
//!
//! - [`InMemoryLedgerRepository`]: whole-account load/save behind an async
//!   read-write lock, keyed by `(StudentId, TermKey)`
//! - [`TracingAuditSink`]: emits the completed-payment audit line as a
//!   structured tracing event

pub mod audit;
pub mod repository;

pub use audit::TracingAuditSink;
pub use repository::InMemoryLedgerRepository;
