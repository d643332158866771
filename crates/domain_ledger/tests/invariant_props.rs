//! Property-based invariant tests for the ledger account
//!
//! Covers the core money invariants over arbitrary operation sequences:
//! balance and overpayment stay non-negative and mutually exclusive, the
//! cumulative paid amount never decreases, and exam flags never regress.

use chrono::NaiveDate;
use proptest::prelude::*;

use billing_kernel::{Money, SchoolYear, Semester, StudentId, TermKey};
use domain_ledger::{BillingPolicy, ExamFlags, FeeCategory, FeeLine, LedgerAccount};

#[derive(Debug, Clone)]
enum Op {
    AddFee(i64),
    Pay(i64),
    RemoveFirstFee,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (1i64..=10_000).prop_map(Op::AddFee),
        (1i64..=20_000).prop_map(Op::Pay),
        Just(Op::RemoveFirstFee),
    ]
}

fn new_account() -> LedgerAccount {
    LedgerAccount::new(
        StudentId::new("2021-00413").unwrap(),
        TermKey::new(SchoolYear::new(2024), Semester::First),
        BillingPolicy::default(),
    )
}

fn posted() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
}

fn flags_regressed(before: ExamFlags, after: ExamFlags) -> bool {
    (before.prelim && !after.prelim)
        || (before.midterm && !after.midterm)
        || (before.finals && !after.finals)
}

proptest! {
    #[test]
    fn balance_and_overpayment_stay_exclusive(
        ops in prop::collection::vec(op_strategy(), 1..40)
    ) {
        let mut account = new_account();
        let mut next_code = 0usize;
        let mut last_paid = Money::zero();
        let mut last_flags = ExamFlags::default();

        for op in ops {
            match op {
                Op::AddFee(amount) => {
                    account.add_fee(FeeLine::new(
                        format!("FEE{next_code}"),
                        "Assessed fee",
                        Money::from_major(amount),
                        FeeCategory::Miscellaneous,
                        posted(),
                    ));
                    next_code += 1;
                }
                Op::Pay(amount) => {
                    let result = account.record_payment(
                        Money::from_major(amount),
                        "BPI ONLINE",
                        "REF",
                    );
                    prop_assert!(result.success);
                }
                Op::RemoveFirstFee => {
                    let code = account.fee_lines().first().map(|line| line.code.clone());
                    if let Some(code) = code {
                        account.remove_fee(&code);
                    }
                }
            }

            // Invariant A: non-negative, mutually exclusive
            prop_assert!(!account.balance().is_negative());
            prop_assert!(!account.overpayment().is_negative());
            prop_assert!(
                account.balance().is_zero() || account.overpayment().is_zero(),
                "balance {} and overpayment {} both non-zero",
                account.balance(),
                account.overpayment()
            );

            // Monotonicity of the cumulative paid amount
            prop_assert!(account.amount_paid() >= last_paid);
            last_paid = account.amount_paid();

            // Exam flags never flip from true to false
            prop_assert!(!flags_regressed(last_flags, account.exam_flags()));
            last_flags = account.exam_flags();
        }
    }

    #[test]
    fn once_paid_balance_derives_from_fee_total(
        fee_amounts in prop::collection::vec(1i64..=10_000, 1..6),
        payment in 1i64..=60_000,
        extra_fee in 1i64..=10_000,
    ) {
        let mut account = new_account();
        for (i, amount) in fee_amounts.iter().enumerate() {
            account.add_fee(FeeLine::new(
                format!("FEE{i}"),
                "Assessed fee",
                Money::from_major(*amount),
                FeeCategory::Miscellaneous,
                posted(),
            ));
        }

        account.record_payment(Money::from_major(payment), "BPI ONLINE", "REF");

        // Any fee mutation after the first payment re-derives both figures
        // from the fee total.
        account.add_fee(FeeLine::new(
            "EXTRA",
            "Assessed fee",
            Money::from_major(extra_fee),
            FeeCategory::Miscellaneous,
            posted(),
        ));

        let total = account.total_amount();
        let paid = account.amount_paid();
        prop_assert_eq!(account.balance(), total.saturating_sub(paid));
        prop_assert_eq!(account.overpayment(), paid.saturating_sub(total));
    }

    #[test]
    fn rejected_payments_never_mutate(
        amount in -10_000i64..=0,
    ) {
        let mut account = new_account();
        let before_balance = account.balance();

        let result = account.record_payment(
            Money::from_major(amount),
            "BPI ONLINE",
            "REF",
        );

        prop_assert!(!result.success);
        prop_assert!(account.payments().is_empty());
        prop_assert_eq!(account.balance(), before_balance);
        prop_assert_eq!(account.amount_paid(), Money::zero());
    }
}
