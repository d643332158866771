//! In-memory ledger repository adapter

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use billing_kernel::{DomainPort, PortError, StudentId, TermKey};
use domain_ledger::{LedgerAccount, LedgerRepository};

/// Whole-account in-memory store keyed by `(StudentId, TermKey)`
///
/// Accounts are cloned in and out, so a caller mutates its own copy and
/// persists it with `save`, the load-mutate-save cycle the core expects.
/// The write lock serializes saves; per-key read-modify-write serialization
/// (one logical owner per account at a time) remains the host's contract.
#[derive(Debug, Default)]
pub struct InMemoryLedgerRepository {
    accounts: RwLock<HashMap<(StudentId, TermKey), LedgerAccount>>,
}

impl InMemoryLedgerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts
    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    /// True if no account has been saved yet
    pub async fn is_empty(&self) -> bool {
        self.accounts.read().await.is_empty()
    }
}

impl DomainPort for InMemoryLedgerRepository {}

#[async_trait]
impl LedgerRepository for InMemoryLedgerRepository {
    #[instrument(skip(self))]
    async fn load(
        &self,
        student: &StudentId,
        term: &TermKey,
    ) -> Result<LedgerAccount, PortError> {
        self.accounts
            .read()
            .await
            .get(&(student.clone(), *term))
            .cloned()
            .ok_or_else(|| PortError::not_found("ledger account", format!("{student} {term}")))
    }

    #[instrument(skip(self, account), fields(student = %account.student(), term = %account.term()))]
    async fn save(&self, account: &LedgerAccount) -> Result<(), PortError> {
        let key = (account.student().clone(), *account.term());
        self.accounts.write().await.insert(key, account.clone());
        debug!("ledger account saved");
        Ok(())
    }
}
