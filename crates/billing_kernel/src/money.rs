//! Money types with precise decimal arithmetic
//!
//! This module provides a type-safe representation of monetary values
//! using rust_decimal for precise calculations without floating-point errors.
//! The billing system operates in a single implicit currency, so amounts
//! carry no currency tag; values are kept at centavo precision (2 decimal
//! places).

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur during money operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
}

/// A monetary amount in the ledger's implicit currency
///
/// Money uses rust_decimal for precise arithmetic without floating-point
/// errors. Amounts are rounded to 2 decimal places at construction, so any
/// value obtained through this type is already at centavo precision.
/// Amounts are signed: fee credits (scholarships, discounts) are negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Creates a new Money value, rounding to centavo precision
    pub fn new(amount: Decimal) -> Self {
        Self(amount.round_dp(2))
    }

    /// Creates Money from a whole number of currency units
    pub fn from_major(units: i64) -> Self {
        Self(Decimal::new(units, 0))
    }

    /// Creates a zero amount
    pub fn zero() -> Self {
        Self(dec!(0))
    }

    /// Returns the underlying decimal amount
    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns true if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if the amount is strictly positive
    pub fn is_positive(&self) -> bool {
        self.0.is_sign_positive() && !self.0.is_zero()
    }

    /// Returns true if the amount is negative
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Returns the absolute value
    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Subtracts `other`, clamping the result at zero
    ///
    /// This is the `max(0, a - b)` shape used throughout the balance and
    /// amount-due arithmetic, where negative intermediate results must
    /// surface as "nothing owed" rather than as a signed amount.
    pub fn saturating_sub(&self, other: Money) -> Self {
        if other >= *self {
            Self::zero()
        } else {
            Self(self.0 - other.0)
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    /// Formats as two decimals with thousands separators, e.g. `23,813.00`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let negative = self.is_negative();
        let text = format!("{:.2}", self.0.abs());
        let (int_digits, cents) = match text.split_once('.') {
            Some((i, c)) => (i, c),
            None => (text.as_str(), "00"),
        };
        let mut grouped = String::with_capacity(int_digits.len() + int_digits.len() / 3);
        for (i, digit) in int_digits.chars().enumerate() {
            if i > 0 && (int_digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(digit);
        }
        if negative {
            write!(f, "-{grouped}.{cents}")
        } else {
            write!(f, "{grouped}.{cents}")
        }
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    /// Parses a formatted amount, tolerating thousands separators
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cleaned: String = s.trim().chars().filter(|c| *c != ',').collect();
        let amount =
            Decimal::from_str(&cleaned).map_err(|_| MoneyError::InvalidAmount(s.to_string()))?;
        Ok(Self::new(amount))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Mul<Decimal> for Money {
    type Output = Self;

    fn mul(self, factor: Decimal) -> Self {
        Self::new(self.0 * factor)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

/// Represents a percentage rate (e.g., a scholarship percentage)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rate {
    /// The rate as a decimal (e.g., 0.05 for 5%)
    value: Decimal,
}

impl Rate {
    /// Creates a rate from a decimal value (e.g., 0.05 for 5%)
    pub fn new(value: Decimal) -> Self {
        Self { value }
    }

    /// Creates a rate from a percentage (e.g., 5.0 for 5%)
    pub fn from_percentage(percentage: Decimal) -> Self {
        Self {
            value: percentage / dec!(100),
        }
    }

    /// Returns the rate as a decimal
    pub fn as_decimal(&self) -> Decimal {
        self.value
    }

    /// Returns the rate as a percentage
    pub fn as_percentage(&self) -> Decimal {
        self.value * dec!(100)
    }

    /// Applies this rate to a money amount
    pub fn apply(&self, money: &Money) -> Money {
        *money * self.value
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.as_percentage().round_dp(4))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_creation_rounds_to_centavos() {
        let m = Money::new(dec!(100.505));
        assert_eq!(m.amount(), dec!(100.50));
    }

    #[test]
    fn test_money_from_major() {
        let m = Money::from_major(23_813);
        assert_eq!(m.amount(), dec!(23813));
    }

    #[test]
    fn test_money_arithmetic() {
        let a = Money::new(dec!(100.00));
        let b = Money::new(dec!(50.00));

        assert_eq!((a + b).amount(), dec!(150.00));
        assert_eq!((a - b).amount(), dec!(50.00));
        assert_eq!((-b).amount(), dec!(-50.00));
    }

    #[test]
    fn test_saturating_sub_clamps_at_zero() {
        let a = Money::new(dec!(100.00));
        let b = Money::new(dec!(150.00));

        assert_eq!(a.saturating_sub(b), Money::zero());
        assert_eq!(b.saturating_sub(a).amount(), dec!(50.00));
    }

    #[test]
    fn test_display_thousands_separators() {
        assert_eq!(Money::new(dec!(23813)).to_string(), "23,813.00");
        assert_eq!(Money::new(dec!(1234567.5)).to_string(), "1,234,567.50");
        assert_eq!(Money::new(dec!(830.25)).to_string(), "830.25");
        assert_eq!(Money::new(dec!(-1050)).to_string(), "-1,050.00");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn test_parse_formatted_amount() {
        let m: Money = "23,813.00".parse().unwrap();
        assert_eq!(m, Money::from_major(23_813));

        let err = "not money".parse::<Money>();
        assert!(matches!(err, Err(MoneyError::InvalidAmount(_))));
    }

    #[test]
    fn test_money_ordering() {
        let small = Money::from_major(100);
        let large = Money::from_major(500);

        assert!(small < large);
        assert_eq!(small.min(large), small);
    }

    #[test]
    fn test_rate_application() {
        let rate = Rate::from_percentage(dec!(5.0));
        let amount = Money::new(dec!(21000.00));

        let discount = rate.apply(&amount);
        assert_eq!(discount.amount(), dec!(1050.00));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn money_arithmetic_is_associative(
            a in -1_000_000i64..1_000_000i64,
            b in -1_000_000i64..1_000_000i64,
            c in -1_000_000i64..1_000_000i64
        ) {
            let ma = Money::from_major(a);
            let mb = Money::from_major(b);
            let mc = Money::from_major(c);

            prop_assert_eq!((ma + mb) + mc, ma + (mb + mc));
        }

        #[test]
        fn saturating_sub_never_goes_negative(
            a in -1_000_000i64..1_000_000i64,
            b in -1_000_000i64..1_000_000i64
        ) {
            let result = Money::from_major(a).saturating_sub(Money::from_major(b));
            prop_assert!(!result.is_negative());
        }

        #[test]
        fn display_round_trips_through_parse(amount in -1_000_000_00i64..1_000_000_00i64) {
            let money = Money::new(Decimal::new(amount, 2));
            let parsed: Money = money.to_string().parse().unwrap();
            prop_assert_eq!(money, parsed);
        }
    }
}
