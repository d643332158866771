//! Audit sink adapter backed by tracing

use async_trait::async_trait;
use tracing::info;

use billing_kernel::{DomainPort, Money, StudentId};
use domain_ledger::AuditSink;

/// Emits completed-payment audit lines as structured tracing events
///
/// Fire-and-forget: emitting can't fail, and nothing here touches the
/// ledger, so a reporting problem can never roll back a payment.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAuditSink;

impl TracingAuditSink {
    pub fn new() -> Self {
        Self
    }
}

impl DomainPort for TracingAuditSink {}

#[async_trait]
impl AuditSink for TracingAuditSink {
    async fn append_audit_line(&self, channel_label: &str, amount: Money, student: &StudentId) {
        info!(
            target: "billing_audit",
            %student,
            %amount,
            channel = channel_label,
            "payment recorded"
        );
    }
}
