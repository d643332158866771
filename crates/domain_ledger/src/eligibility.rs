//! Examination eligibility derived from cumulative payments
//!
//! Each exam period gates on a cumulative-payment threshold computed from
//! the account's fee total and the billing policy. All three periods are
//! measured against the single shared `amount_paid` value, not per-period
//! escrow, so one large payment can satisfy prelim and midterm at once.
//! This mirrors the registrar's existing business rule and should be raised
//! with stakeholders before changing it.

use serde::{Deserialize, Serialize};
use std::fmt;

use billing_kernel::Money;

use crate::account::LedgerAccount;
use crate::policy::BillingPolicy;

/// Examination period within a term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExamPeriod {
    Prelim,
    Midterm,
    Finals,
}

impl ExamPeriod {
    /// All periods in chronological order
    pub const ALL: [ExamPeriod; 3] = [ExamPeriod::Prelim, ExamPeriod::Midterm, ExamPeriod::Finals];
}

impl fmt::Display for ExamPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExamPeriod::Prelim => write!(f, "Prelim"),
            ExamPeriod::Midterm => write!(f, "Midterm"),
            ExamPeriod::Finals => write!(f, "Finals"),
        }
    }
}

/// Monotone per-period "requirement met" flags
///
/// Flags are recomputed on every account mutation but never regress: once a
/// period's threshold has been crossed, later fee increases do not claw the
/// flag back. While the account has no payment records at all, every flag
/// is forced false regardless of the arithmetic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamFlags {
    pub prelim: bool,
    pub midterm: bool,
    pub finals: bool,
}

impl ExamFlags {
    /// Returns the flag for one period
    pub fn is_paid(&self, period: ExamPeriod) -> bool {
        match period {
            ExamPeriod::Prelim => self.prelim,
            ExamPeriod::Midterm => self.midterm,
            ExamPeriod::Finals => self.finals,
        }
    }

    pub(crate) fn set_paid(&mut self, period: ExamPeriod) {
        match period {
            ExamPeriod::Prelim => self.prelim = true,
            ExamPeriod::Midterm => self.midterm = true,
            ExamPeriod::Finals => self.finals = true,
        }
    }
}

/// Cumulative-payment requirement for one exam period
///
/// Prelim is a fixed policy figure independent of the fee total; midterm is
/// a policy fraction of the total; finals requires the full total.
pub fn requirement(policy: &BillingPolicy, total_amount: Money, period: ExamPeriod) -> Money {
    match period {
        ExamPeriod::Prelim => policy.prelim_requirement,
        ExamPeriod::Midterm => total_amount * policy.midterm_multiplier,
        ExamPeriod::Finals => total_amount,
    }
}

/// Eligibility verdict for one exam period
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Eligibility {
    /// Nothing due and no payment still settling
    Eligible,
    /// Nothing due, but a payment is still in progress
    Processing,
    /// Payment required before the exam permit is released
    PaymentRequired(Money),
}

impl fmt::Display for Eligibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Eligibility::Eligible => write!(f, "eligible"),
            Eligibility::Processing => write!(f, "processing - pending"),
            Eligibility::PaymentRequired(due) => write!(f, "payment required: {due}"),
        }
    }
}

/// Derives per-exam-period eligibility from a ledger account
///
/// Constructed with the same policy figures as the accounts it evaluates.
#[derive(Debug, Clone)]
pub struct EligibilityEvaluator {
    policy: BillingPolicy,
}

impl EligibilityEvaluator {
    /// Creates an evaluator for the given policy figures
    pub fn new(policy: BillingPolicy) -> Self {
        Self { policy }
    }

    /// Creates an evaluator sharing the account's own policy
    pub fn for_account(account: &LedgerAccount) -> Self {
        Self::new(account.policy().clone())
    }

    /// The cumulative-payment requirement for a period
    pub fn requirement(&self, account: &LedgerAccount, period: ExamPeriod) -> Money {
        requirement(&self.policy, account.total_amount(), period)
    }

    /// Amount still due for a period, never negative
    ///
    /// A period whose flag is already set reports zero regardless of the
    /// arithmetic: paid flags never regress.
    pub fn amount_due(&self, account: &LedgerAccount, period: ExamPeriod) -> Money {
        if account.exam_flags().is_paid(period) {
            return Money::zero();
        }
        self.requirement(account, period)
            .saturating_sub(account.amount_paid())
    }

    /// Full eligibility verdict for a period
    pub fn assess(&self, account: &LedgerAccount, period: ExamPeriod) -> Eligibility {
        let due = self.amount_due(account, period);
        if due.is_positive() {
            Eligibility::PaymentRequired(due)
        } else if account.has_payment_in_progress() {
            Eligibility::Processing
        } else {
            Eligibility::Eligible
        }
    }
}
