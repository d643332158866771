//! Property-based Test Data Generators
//!
//! Proptest strategies for the domain types exercised by the invariant
//! suites.

use proptest::prelude::*;

use billing_kernel::Money;
use domain_ledger::{FeeCategory, FeeLine};

use crate::fixtures::TermFixtures;

/// Strategy for positive payment amounts up to `max_major` whole units
pub fn payment_amount(max_major: i64) -> impl Strategy<Value = Money> {
    (1..=max_major).prop_map(Money::from_major)
}

/// Strategy for positive assessed fee amounts
pub fn fee_amount() -> impl Strategy<Value = Money> {
    (1i64..=10_000).prop_map(Money::from_major)
}

/// Strategy for a schedule of 1..=`max_lines` positive fee lines with
/// unique codes
pub fn fee_schedule(max_lines: usize) -> impl Strategy<Value = Vec<FeeLine>> {
    prop::collection::vec(1i64..=10_000, 1..=max_lines).prop_map(|amounts| {
        amounts
            .into_iter()
            .enumerate()
            .map(|(i, amount)| {
                FeeLine::new(
                    format!("FEE{i}"),
                    format!("Assessed fee {i}"),
                    Money::from_major(amount),
                    FeeCategory::Miscellaneous,
                    TermFixtures::assessment_date(),
                )
            })
            .collect()
    })
}

/// Strategy for free-text channel labels covering both classifications
pub fn channel_label() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("BPI ONLINE".to_string()),
        Just("GCash".to_string()),
        Just("Cashier Onsite".to_string()),
        Just("CASHIER WINDOW 2".to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_ledger::PaymentChannel;

    proptest! {
        #[test]
        fn generated_payments_are_positive(amount in payment_amount(50_000)) {
            prop_assert!(amount.is_positive());
        }

        #[test]
        fn generated_channel_labels_classify_consistently(label in channel_label()) {
            let channel = PaymentChannel::classify(&label);
            let lower = label.to_lowercase();
            let expect_onsite = lower.contains("cashier") || lower.contains("onsite");
            prop_assert_eq!(channel == PaymentChannel::Onsite, expect_onsite);
        }

        #[test]
        fn generated_schedules_have_unique_codes(schedule in fee_schedule(8)) {
            let mut codes: Vec<_> = schedule.iter().map(|line| line.code.clone()).collect();
            codes.sort();
            codes.dedup();
            prop_assert_eq!(codes.len(), schedule.len());
        }
    }
}
