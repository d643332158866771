//! Pre-built Test Fixtures
//!
//! Ready-to-use test data for the billing system. Fixtures are consistent
//! and predictable: the standard fee schedule always totals 30,000.00 with
//! a 21,000.00 tuition share.

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use billing_kernel::{Money, SchoolYear, Semester, StudentId, TermKey};
use domain_ledger::{BillingPolicy, FeeCategory, FeeLine};

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// The default opening balance figure
    pub fn opening_balance() -> Money {
        Money::from_major(23_813)
    }

    /// The default prelim requirement figure
    pub fn prelim_requirement() -> Money {
        Money::from_major(6_830)
    }

    /// A typical partial payment
    pub fn partial_payment() -> Money {
        Money::new(dec!(5000.00))
    }
}

/// Fixture for term and student identity
pub struct TermFixtures;

impl TermFixtures {
    /// A known student number
    pub fn student() -> StudentId {
        StudentId::new("2021-00413").expect("fixture student id is valid")
    }

    /// First semester of school year 2024-2025
    pub fn first_semester() -> TermKey {
        TermKey::new(SchoolYear::new(2024), Semester::First)
    }

    /// The date fees are posted in fixtures
    pub fn assessment_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 10).expect("fixture date is valid")
    }
}

/// Fixture for billing policy figures
pub struct PolicyFixtures;

impl PolicyFixtures {
    /// The current term's policy figures
    pub fn default_policy() -> BillingPolicy {
        BillingPolicy::default()
    }

    /// A policy whose opening balance matches the standard fee schedule
    /// total, for scenarios that start from an assessed account
    pub fn matched_policy() -> BillingPolicy {
        BillingPolicy {
            opening_balance: Money::from_major(30_000),
            ..BillingPolicy::default()
        }
    }
}

/// Fixture for assessed fee schedules
pub struct FeeFixtures;

impl FeeFixtures {
    /// The standard starter assessment: 30,000.00 total, 21,000.00 tuition
    pub fn standard_schedule() -> Vec<FeeLine> {
        let posted = TermFixtures::assessment_date();
        vec![
            FeeLine::new(
                "TUIT",
                "Tuition",
                Money::from_major(21_000),
                FeeCategory::Tuition,
                posted,
            ),
            FeeLine::new(
                "LAB",
                "Laboratory",
                Money::from_major(3_000),
                FeeCategory::Laboratory,
                posted,
            ),
            FeeLine::new(
                "MISC",
                "Miscellaneous",
                Money::from_major(2_500),
                FeeCategory::Miscellaneous,
                posted,
            ),
            FeeLine::new(
                "REG",
                "Registration",
                Money::from_major(1_500),
                FeeCategory::Registration,
                posted,
            ),
            FeeLine::new(
                "LIB",
                "Library",
                Money::from_major(1_000),
                FeeCategory::Library,
                posted,
            ),
            FeeLine::new(
                "ATH",
                "Athletics",
                Money::from_major(1_000),
                FeeCategory::Athletic,
                posted,
            ),
        ]
    }
}
