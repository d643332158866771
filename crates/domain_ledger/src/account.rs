//! Ledger account aggregate
//!
//! One `LedgerAccount` owns the ordered fee lines and payment records of a
//! single student in a single term. All mutation goes through this type so
//! the money invariants hold at every observable point:
//!
//! # Invariants
//!
//! - `balance >= 0` and `overpayment >= 0`, at most one of them non-zero.
//!   A violation aborts: it means the allocation algorithm is broken, and
//!   coercing it would silently corrupt the ledger.
//! - `amount_paid` is a monotone cumulative sum of recorded payments.
//! - While `amount_paid == 0` the balance reports the policy's opening
//!   balance (a prior obligation carried onto the account), independent of
//!   the assessed fee sum.
//! - Once `amount_paid > 0`, recomputation yields
//!   `balance = max(0, total_amount - amount_paid)` and
//!   `overpayment = max(0, amount_paid - total_amount)`.
//! - Payment allocation over fee lines is FIFO in insertion order.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use billing_kernel::{Money, Rate, StudentId, TermKey};

use crate::eligibility::{self, ExamFlags, ExamPeriod};
use crate::error::{LedgerError, PaymentResult};
use crate::fee::{FeeCategory, FeeLine, FeeLineState};
use crate::payment::{PaymentRecord, PaymentStatus};
use crate::policy::BillingPolicy;

/// Fee code used for the single scholarship/discount line
pub const SCHOLARSHIP_CODE: &str = "DISC";

/// The financial ledger of one student in one term
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerAccount {
    student: StudentId,
    term: TermKey,
    policy: BillingPolicy,
    /// Insertion order is the payment allocation order
    fee_lines: Vec<FeeLine>,
    /// Insertion order is chronological
    payments: Vec<PaymentRecord>,
    total_tuition: Money,
    total_fees: Money,
    total_amount: Money,
    amount_paid: Money,
    balance: Money,
    overpayment: Money,
    exam_flags: ExamFlags,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl LedgerAccount {
    /// Creates an empty account carrying the policy's opening balance
    pub fn new(student: StudentId, term: TermKey, policy: BillingPolicy) -> Self {
        let now = Utc::now();
        let opening = policy.opening_balance;
        Self {
            student,
            term,
            policy,
            fee_lines: Vec::new(),
            payments: Vec::new(),
            total_tuition: Money::zero(),
            total_fees: Money::zero(),
            total_amount: Money::zero(),
            amount_paid: Money::zero(),
            balance: opening,
            overpayment: Money::zero(),
            exam_flags: ExamFlags::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Creates an account with a starter set of fee lines
    pub fn with_fees(
        student: StudentId,
        term: TermKey,
        policy: BillingPolicy,
        fees: Vec<FeeLine>,
    ) -> Self {
        let mut account = Self::new(student, term, policy);
        account.fee_lines = fees;
        account.recalculate();
        account
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn student(&self) -> &StudentId {
        &self.student
    }

    pub fn term(&self) -> &TermKey {
        &self.term
    }

    pub fn policy(&self) -> &BillingPolicy {
        &self.policy
    }

    /// Fee lines in allocation order
    pub fn fee_lines(&self) -> &[FeeLine] {
        &self.fee_lines
    }

    /// Payment records in chronological order
    pub fn payments(&self) -> &[PaymentRecord] {
        &self.payments
    }

    /// Sum of tuition-category fee lines
    pub fn total_tuition(&self) -> Money {
        self.total_tuition
    }

    /// Sum of non-tuition fee lines (discounts included, so this can
    /// decrease when a scholarship is applied)
    pub fn total_fees(&self) -> Money {
        self.total_fees
    }

    /// Grand total of assessed fees
    pub fn total_amount(&self) -> Money {
        self.total_amount
    }

    /// Cumulative sum of recorded payment amounts, never decreasing
    pub fn amount_paid(&self) -> Money {
        self.amount_paid
    }

    /// Outstanding amount owed, always non-negative
    pub fn balance(&self) -> Money {
        self.balance
    }

    /// Credit beyond what was owed, always non-negative
    pub fn overpayment(&self) -> Money {
        self.overpayment
    }

    /// Monotone per-exam-period paid flags
    pub fn exam_flags(&self) -> ExamFlags {
        self.exam_flags
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// True while any recorded payment has not yet settled
    pub fn has_payment_in_progress(&self) -> bool {
        self.payments.iter().any(|p| p.status().is_in_progress())
    }

    /// Looks up a single fee line by code
    pub fn fee_line(&self, code: &str) -> Result<&FeeLine, LedgerError> {
        self.fee_lines
            .iter()
            .find(|line| line.code == code)
            .ok_or_else(|| LedgerError::FeeNotFound(code.to_string()))
    }

    /// Assessment rows for display
    pub fn fee_rows(&self) -> Vec<FeeLineView> {
        self.fee_lines.iter().map(FeeLineView::from).collect()
    }

    /// Payment history rows for display
    pub fn payment_rows(&self) -> Vec<PaymentView> {
        self.payments.iter().map(PaymentView::from).collect()
    }

    // ------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------

    /// Appends an assessed fee line and recomputes derived state
    ///
    /// The fee must already be validated by the caller; appending never
    /// fails.
    #[instrument(skip(self, fee), fields(student = %self.student, code = %fee.code))]
    pub fn add_fee(&mut self, fee: FeeLine) {
        self.fee_lines.push(fee);
        self.recalculate();
    }

    /// Removes every fee line with the given code
    ///
    /// An absent code is a documented no-op, not an error. Returns the
    /// number of lines removed. The cumulative `amount_paid` is untouched,
    /// so balance and overpayment recomputation stays consistent.
    #[instrument(skip(self), fields(student = %self.student))]
    pub fn remove_fee(&mut self, code: &str) -> usize {
        let before = self.fee_lines.len();
        self.fee_lines.retain(|line| line.code != code);
        let removed = before - self.fee_lines.len();
        if removed > 0 {
            self.recalculate();
        }
        removed
    }

    /// Records a payment against the account
    ///
    /// Validates the amount, allocates it FIFO over the fee lines, updates
    /// the balance/overpayment pair, appends the payment record, and
    /// re-derives exam eligibility. A non-positive amount is rejected with
    /// no mutation at all.
    #[instrument(skip(self), fields(student = %self.student, term = %self.term))]
    pub fn record_payment(
        &mut self,
        amount: Money,
        channel_label: &str,
        reference: &str,
    ) -> PaymentResult {
        if !amount.is_positive() {
            return PaymentResult::rejected(
                LedgerError::InvalidAmount(amount.amount()),
                self.balance,
                self.overpayment,
            );
        }

        let record = PaymentRecord::new(amount, channel_label, reference, Utc::now());
        let initial = record.status();

        // FIFO allocation: walk fee lines in insertion order, funding each
        // open positive line until the payment is exhausted.
        let mut remaining = amount;
        for line in self.fee_lines.iter_mut() {
            if remaining.is_zero() {
                break;
            }
            if !line.accepts_allocation() {
                continue;
            }
            let applied = line.apply(remaining, initial);
            remaining -= applied;
            debug!(code = %line.code, %applied, "allocated payment to fee line");
        }

        if self.balance.is_positive() {
            if amount >= self.balance {
                // The payment clears the balance; the excess becomes
                // overpayment and every line still open is treated as fully
                // covered, per-line rounding slack notwithstanding.
                let excess = amount - self.balance;
                self.balance = Money::zero();
                self.overpayment += excess;
                for line in self.fee_lines.iter_mut() {
                    if line.amount.is_positive() && !line.is_fully_paid() {
                        line.settle(initial);
                    }
                }
            } else {
                self.balance -= amount;
            }
        } else {
            self.overpayment += amount;
        }

        self.amount_paid += amount;

        let message = if initial.is_in_progress() {
            format!("Payment of {amount} via {channel_label} received and is being processed.")
        } else {
            format!("Payment of {amount} via {channel_label} posted successfully.")
        };

        self.payments.push(record.clone());
        self.refresh_exam_flags();
        self.updated_at = Utc::now();
        self.assert_consistent();

        PaymentResult::accepted(message, record, self.balance, self.overpayment)
    }

    /// Applies a scholarship as a negative discount line
    ///
    /// Any existing discount line is removed first, so at most one exists.
    /// The discount is a percentage of the tuition-only total, not the
    /// grand total. Returns the discount amount granted.
    #[instrument(skip(self), fields(student = %self.student))]
    pub fn apply_scholarship(&mut self, rate: Rate, name: &str) -> Money {
        self.fee_lines.retain(|line| !line.category.is_discount());
        self.recalculate();

        let discount = rate.apply(&self.total_tuition);
        let line = FeeLine::new(
            SCHOLARSHIP_CODE,
            name,
            -discount,
            FeeCategory::Discount,
            Utc::now().date_naive(),
        );
        debug!(%discount, name, "scholarship applied against tuition total");
        self.fee_lines.push(line);
        self.recalculate();
        discount
    }

    /// Refreshes every payment's settlement status against `now`
    ///
    /// Afterwards, fee lines with an in-flight marker mirror the status of
    /// the most recently added payment, clearing once it settles
    /// successfully. Idempotent: calling twice with the same `now` leaves
    /// identical observable state. Safe to call on every page load.
    #[instrument(skip(self), fields(student = %self.student))]
    pub fn refresh_payment_statuses(&mut self, now: DateTime<Utc>) {
        for payment in self.payments.iter_mut() {
            payment.refresh(now);
        }

        if let Some(latest) = self.payments.last() {
            let status = latest.status();
            for line in self.fee_lines.iter_mut() {
                if line.in_flight_status().is_some() {
                    if status.is_successful() {
                        line.clear_in_flight();
                    } else {
                        line.mirror_in_flight(status);
                    }
                }
            }
        }

        self.refresh_exam_flags();
        self.updated_at = now;
        self.assert_consistent();
    }

    // ------------------------------------------------------------------
    // Internal derivation
    // ------------------------------------------------------------------

    /// Recomputes totals, balance/overpayment, and exam flags
    ///
    /// While nothing has been paid the balance stays at the opening
    /// obligation; after the first payment it derives from the fee total.
    fn recalculate(&mut self) {
        self.total_tuition = self
            .fee_lines
            .iter()
            .filter(|line| line.category.is_tuition())
            .map(|line| line.amount)
            .sum();
        self.total_fees = self
            .fee_lines
            .iter()
            .filter(|line| !line.category.is_tuition())
            .map(|line| line.amount)
            .sum();
        self.total_amount = self.total_tuition + self.total_fees;

        if self.amount_paid.is_positive() {
            self.balance = self.total_amount.saturating_sub(self.amount_paid);
            self.overpayment = self.amount_paid.saturating_sub(self.total_amount);
        }

        self.refresh_exam_flags();
        self.updated_at = Utc::now();
        self.assert_consistent();
    }

    /// Re-derives the monotone exam flags from the shared cumulative paid
    /// amount
    fn refresh_exam_flags(&mut self) {
        if self.payments.is_empty() {
            self.exam_flags = ExamFlags::default();
            return;
        }
        for period in ExamPeriod::ALL {
            let required = eligibility::requirement(&self.policy, self.total_amount, period);
            if self.amount_paid >= required {
                self.exam_flags.set_paid(period);
            }
        }
    }

    /// Balance and overpayment must never be simultaneously non-zero
    fn assert_consistent(&self) {
        assert!(
            !self.balance.is_negative() && !self.overpayment.is_negative(),
            "ledger corrupted: negative balance {} or overpayment {}",
            self.balance,
            self.overpayment,
        );
        assert!(
            self.balance.is_zero() || self.overpayment.is_zero(),
            "ledger corrupted: balance {} and overpayment {} are both non-zero",
            self.balance,
            self.overpayment,
        );
    }
}

/// One row of the assessment table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeLineView {
    pub posted_on: NaiveDate,
    pub code: String,
    pub description: String,
    pub amount: Money,
    pub state: FeeLineState,
    /// Present while a not-yet-settled payment funds this line
    pub in_flight: Option<PaymentStatus>,
}

impl From<&FeeLine> for FeeLineView {
    fn from(line: &FeeLine) -> Self {
        Self {
            posted_on: line.posted_on,
            code: line.code.clone(),
            description: line.description.clone(),
            amount: line.amount,
            state: line.state(),
            in_flight: line.in_flight_status(),
        }
    }
}

/// One row of the payment history table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentView {
    pub paid_at: DateTime<Utc>,
    pub channel: String,
    pub reference: String,
    pub amount: Money,
    pub status: PaymentStatus,
}

impl From<&PaymentRecord> for PaymentView {
    fn from(payment: &PaymentRecord) -> Self {
        Self {
            paid_at: payment.created_at,
            channel: payment.channel_label.clone(),
            reference: payment.reference.clone(),
            amount: payment.amount,
            status: payment.status(),
        }
    }
}
