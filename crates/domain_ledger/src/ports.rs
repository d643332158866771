//! Ledger domain ports
//!
//! The ledger core performs no I/O. Persistence and reporting are external
//! collaborators reached through these traits; adapters live outside the
//! domain crate. The repository contract is load-by-key / save-whole-account
//! with read-modify-write serialization per account key: the core assumes it
//! is never invoked concurrently on the same `LedgerAccount` instance, so a
//! host with concurrent callers must serialize access behind the adapter
//! (per-account lock or single-writer queue).

use async_trait::async_trait;

use billing_kernel::{DomainPort, Money, PortError, StudentId, TermKey};

use crate::account::LedgerAccount;

/// Persists and loads whole ledger accounts
///
/// A failed `save` leaves the in-memory account mutated; the caller decides
/// whether to retry or discard.
#[async_trait]
pub trait LedgerRepository: DomainPort {
    /// Loads the account for one student-term, or `PortError::NotFound`
    async fn load(&self, student: &StudentId, term: &TermKey)
        -> Result<LedgerAccount, PortError>;

    /// Saves the whole account state
    async fn save(&self, account: &LedgerAccount) -> Result<(), PortError>;
}

/// Fire-and-forget audit line for completed payments
///
/// The signature is infallible on purpose: a reporting failure must never
/// roll back the ledger mutation it describes.
#[async_trait]
pub trait AuditSink: DomainPort {
    async fn append_audit_line(&self, channel_label: &str, amount: Money, student: &StudentId);
}
