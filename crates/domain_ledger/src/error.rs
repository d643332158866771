//! Ledger domain errors and command results
//!
//! Expected failures travel by value: `record_payment` reports a rejected
//! payment through `PaymentResult` rather than an `Err`, and removing an
//! absent fee code is a documented no-op. Nothing in this module is used
//! for control flow by panic.

use rust_decimal::Decimal;
use thiserror::Error;

use billing_kernel::Money;

use crate::payment::PaymentRecord;

/// Errors that can occur in the ledger domain
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// Payment amount must be strictly positive
    #[error("Invalid payment amount: {0}")]
    InvalidAmount(Decimal),

    /// Fee code not present on the account
    ///
    /// Raised by lookups only; removing an absent code is a documented
    /// no-op, not an error.
    #[error("Fee not found: {0}")]
    FeeNotFound(String),
}

/// Outcome of a `record_payment` command
///
/// Carries everything the caller needs to render a receipt or an error
/// message: the success flag, human-readable message, the created record,
/// and the resulting balance and overpayment.
#[derive(Debug, Clone)]
pub struct PaymentResult {
    /// Whether the payment was recorded
    pub success: bool,
    /// Human-readable outcome message
    pub message: String,
    /// The created payment record, when successful
    pub payment: Option<PaymentRecord>,
    /// Account balance after the command
    pub balance: Money,
    /// Account overpayment after the command
    pub overpayment: Money,
    /// The rejection reason, when unsuccessful
    pub error: Option<LedgerError>,
}

impl PaymentResult {
    pub(crate) fn accepted(
        message: String,
        payment: PaymentRecord,
        balance: Money,
        overpayment: Money,
    ) -> Self {
        Self {
            success: true,
            message,
            payment: Some(payment),
            balance,
            overpayment,
            error: None,
        }
    }

    pub(crate) fn rejected(error: LedgerError, balance: Money, overpayment: Money) -> Self {
        Self {
            success: false,
            message: error.to_string(),
            payment: None,
            balance,
            overpayment,
            error: Some(error),
        }
    }
}
