//! Test Data Builders
//!
//! Builder patterns for constructing test data with sensible defaults.
//! Tests specify only the relevant fields and rely on defaults for
//! everything else.

use chrono::NaiveDate;

use billing_kernel::{Money, StudentId, TermKey};
use domain_ledger::{BillingPolicy, FeeCategory, FeeLine, LedgerAccount};

use crate::fixtures::{FeeFixtures, PolicyFixtures, TermFixtures};

/// Builder for individual fee lines
pub struct FeeLineBuilder {
    code: String,
    description: String,
    amount: Money,
    category: FeeCategory,
    posted_on: NaiveDate,
}

impl Default for FeeLineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FeeLineBuilder {
    /// Creates a builder with default values (a miscellaneous 1,000.00 fee)
    pub fn new() -> Self {
        Self {
            code: "MISC".to_string(),
            description: "Miscellaneous".to_string(),
            amount: Money::from_major(1_000),
            category: FeeCategory::Miscellaneous,
            posted_on: TermFixtures::assessment_date(),
        }
    }

    /// Sets the fee code
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    /// Sets the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the signed amount
    pub fn with_amount(mut self, amount: Money) -> Self {
        self.amount = amount;
        self
    }

    /// Sets the category
    pub fn with_category(mut self, category: FeeCategory) -> Self {
        self.category = category;
        self
    }

    /// Sets the posting date
    pub fn with_posted_on(mut self, posted_on: NaiveDate) -> Self {
        self.posted_on = posted_on;
        self
    }

    /// Builds the fee line
    pub fn build(self) -> FeeLine {
        FeeLine::new(
            self.code,
            self.description,
            self.amount,
            self.category,
            self.posted_on,
        )
    }
}

/// Builder for ledger accounts
pub struct LedgerAccountBuilder {
    student: StudentId,
    term: TermKey,
    policy: BillingPolicy,
    fees: Vec<FeeLine>,
}

impl Default for LedgerAccountBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LedgerAccountBuilder {
    /// Creates a builder for the fixture student with no fees
    pub fn new() -> Self {
        Self {
            student: TermFixtures::student(),
            term: TermFixtures::first_semester(),
            policy: PolicyFixtures::default_policy(),
            fees: Vec::new(),
        }
    }

    /// Sets the student
    pub fn with_student(mut self, student: StudentId) -> Self {
        self.student = student;
        self
    }

    /// Sets the term
    pub fn with_term(mut self, term: TermKey) -> Self {
        self.term = term;
        self
    }

    /// Sets the billing policy
    pub fn with_policy(mut self, policy: BillingPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Appends one fee line
    pub fn with_fee(mut self, fee: FeeLine) -> Self {
        self.fees.push(fee);
        self
    }

    /// Uses the standard 30,000.00 starter schedule and the matched
    /// opening-balance policy
    pub fn with_standard_schedule(mut self) -> Self {
        self.fees = FeeFixtures::standard_schedule();
        self.policy = PolicyFixtures::matched_policy();
        self
    }

    /// Builds the account
    pub fn build(self) -> LedgerAccount {
        LedgerAccount::with_fees(self.student, self.term, self.policy, self.fees)
    }
}
