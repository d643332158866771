//! Custom Test Assertions
//!
//! Specialized assertion helpers for domain types that give more meaningful
//! error messages than standard assertions.

use billing_kernel::Money;
use domain_ledger::LedgerAccount;

/// Asserts that two Money values are equal, printing formatted amounts
pub fn assert_money_eq(actual: Money, expected: Money) {
    assert_eq!(
        actual, expected,
        "money amounts differ: actual={actual}, expected={expected}"
    );
}

/// Asserts the balance/overpayment invariant on an account
///
/// Both must be non-negative and at most one may be non-zero.
pub fn assert_account_consistent(account: &LedgerAccount) {
    assert!(
        !account.balance().is_negative(),
        "balance is negative: {}",
        account.balance()
    );
    assert!(
        !account.overpayment().is_negative(),
        "overpayment is negative: {}",
        account.overpayment()
    );
    assert!(
        account.balance().is_zero() || account.overpayment().is_zero(),
        "balance {} and overpayment {} are both non-zero",
        account.balance(),
        account.overpayment()
    );
}

/// Asserts that the fee line with the given code is fully paid
pub fn assert_fee_fully_paid(account: &LedgerAccount, code: &str) {
    let line = account
        .fee_lines()
        .iter()
        .find(|line| line.code == code)
        .unwrap_or_else(|| panic!("no fee line with code {code}"));
    assert!(
        line.is_fully_paid(),
        "fee line {code} is not fully paid: remaining {}",
        line.remaining_balance()
    );
}

/// Asserts that the fee line with the given code has the expected
/// remaining balance
pub fn assert_fee_remaining(account: &LedgerAccount, code: &str, expected: Money) {
    let line = account
        .fee_lines()
        .iter()
        .find(|line| line.code == code)
        .unwrap_or_else(|| panic!("no fee line with code {code}"));
    assert_eq!(
        line.remaining_balance(),
        expected,
        "fee line {code} remaining balance differs"
    );
}
