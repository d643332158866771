//! Fee lines - individual assessed charges and credits
//!
//! A fee line carries its own paid/unpaid sub-ledger: how much of the
//! assessed amount has been covered by payment allocation, and the
//! in-flight status of whichever payment last funded it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use billing_kernel::{FeeLineId, Money};

use crate::payment::PaymentStatus;

/// Category of an assessed fee line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeeCategory {
    Tuition,
    Laboratory,
    Miscellaneous,
    Registration,
    Library,
    Athletic,
    Medical,
    Guidance,
    Publication,
    Internet,
    Energy,
    Insurance,
    Development,
    Cultural,
    /// Scholarship or discount credit (negative amount)
    Discount,
    /// Late or penalty charge
    Penalty,
    Other,
}

impl FeeCategory {
    /// Returns true if this category counts toward the tuition total
    pub fn is_tuition(&self) -> bool {
        matches!(self, FeeCategory::Tuition)
    }

    /// Returns true if this is a scholarship/discount credit line
    pub fn is_discount(&self) -> bool {
        matches!(self, FeeCategory::Discount)
    }
}

/// Paid state of a fee line, for assessment rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeeLineState {
    Paid,
    Partial,
    Unpaid,
}

/// An individual assessed charge or credit on a student's ledger
///
/// The amount is signed: discounts and scholarships are negative. Only
/// positive lines participate in payment allocation; `amount_applied` is
/// private so the clamp invariant (`0 <= applied <= amount`) cannot be
/// broken from outside.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeLine {
    /// Unique identifier
    pub id: FeeLineId,
    /// Fee code, unique within an account (e.g. "TUIT")
    pub code: String,
    /// Human-readable description
    pub description: String,
    /// Signed assessed amount
    pub amount: Money,
    /// Fee category
    pub category: FeeCategory,
    /// Date the fee was posted to the account
    pub posted_on: NaiveDate,
    /// How much payment has been allocated to this line
    amount_applied: Money,
    /// Status of the payment that last funded this line; cleared once that
    /// payment reaches a successful state
    in_flight_status: Option<PaymentStatus>,
}

impl FeeLine {
    /// Creates a new fee line
    ///
    /// # Arguments
    ///
    /// * `code` - Fee code, unique within the account
    /// * `description` - Human-readable description
    /// * `amount` - Signed assessed amount (negative for credits)
    /// * `category` - Fee category
    /// * `posted_on` - Posting date
    pub fn new(
        code: impl Into<String>,
        description: impl Into<String>,
        amount: Money,
        category: FeeCategory,
        posted_on: NaiveDate,
    ) -> Self {
        Self {
            id: FeeLineId::new_v7(),
            code: code.into(),
            description: description.into(),
            amount,
            category,
            posted_on,
            amount_applied: Money::zero(),
            in_flight_status: None,
        }
    }

    /// Amount of payment allocated to this line so far
    pub fn amount_applied(&self) -> Money {
        self.amount_applied
    }

    /// Status of the payment that last funded this line, if not yet settled
    pub fn in_flight_status(&self) -> Option<PaymentStatus> {
        self.in_flight_status
    }

    /// Outstanding amount on this line, clamped to `[0, amount]`
    ///
    /// Credit lines (zero or negative amount) always report zero.
    pub fn remaining_balance(&self) -> Money {
        if !self.amount.is_positive() {
            return Money::zero();
        }
        self.amount.saturating_sub(self.amount_applied)
    }

    /// True once nothing remains outstanding on this line
    pub fn is_fully_paid(&self) -> bool {
        self.remaining_balance().is_zero()
    }

    /// True while some, but not all, of the line has been covered
    pub fn is_partially_paid(&self) -> bool {
        self.amount_applied.is_positive() && self.amount_applied < self.amount
    }

    /// Paid state for assessment rows
    pub fn state(&self) -> FeeLineState {
        if self.is_fully_paid() {
            FeeLineState::Paid
        } else if self.is_partially_paid() {
            FeeLineState::Partial
        } else {
            FeeLineState::Unpaid
        }
    }

    /// True if this line can receive payment allocation
    ///
    /// Credits and discounts are never allocation targets.
    pub fn accepts_allocation(&self) -> bool {
        self.amount.is_positive() && !self.is_fully_paid()
    }

    /// Applies up to `amount` of a payment to this line, stamping the
    /// payment's status, and returns the portion actually applied
    pub(crate) fn apply(&mut self, amount: Money, status: PaymentStatus) -> Money {
        let portion = amount.min(self.remaining_balance());
        if portion.is_positive() {
            self.amount_applied += portion;
            self.in_flight_status = Some(status);
        }
        portion
    }

    /// Marks the whole line as covered and stamps the funding payment's
    /// status
    ///
    /// Used when a payment clears the account balance: every line still
    /// open is treated as fully covered even if its own per-line arithmetic
    /// carries rounding slack.
    pub(crate) fn settle(&mut self, status: PaymentStatus) {
        self.amount_applied = self.amount;
        self.in_flight_status = Some(status);
    }

    /// Mirrors the latest funding payment's status onto this line
    pub(crate) fn mirror_in_flight(&mut self, status: PaymentStatus) {
        self.in_flight_status = Some(status);
    }

    /// Clears the in-flight marker once the funding payment succeeded
    pub(crate) fn clear_in_flight(&mut self) {
        self.in_flight_status = None;
    }
}
