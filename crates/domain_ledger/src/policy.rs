//! Billing policy configuration
//!
//! The opening balance, prelim requirement, and midterm multiplier are
//! domain policy, not mechanism: a different term's figures must be
//! substitutable without a code change, so they are injected into accounts
//! and evaluators at construction time instead of living as literals in the
//! ledger logic.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use billing_kernel::Money;

/// Policy figures for one billing term
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingPolicy {
    /// Obligation carried on a freshly created account before any payment
    /// is recorded
    pub opening_balance: Money,
    /// Fixed cumulative-payment requirement for the prelim exam,
    /// independent of the account's fee total
    pub prelim_requirement: Money,
    /// Fraction of the fee total required for the midterm exam
    pub midterm_multiplier: Decimal,
}

impl Default for BillingPolicy {
    fn default() -> Self {
        Self {
            opening_balance: Money::from_major(23_813),
            prelim_requirement: Money::from_major(6_830),
            midterm_multiplier: dec!(0.6666),
        }
    }
}

impl BillingPolicy {
    /// Loads policy figures from `BILLING_*` environment variables
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("BILLING"))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_figures() {
        let policy = BillingPolicy::default();
        assert_eq!(policy.opening_balance, Money::from_major(23_813));
        assert_eq!(policy.prelim_requirement, Money::from_major(6_830));
        assert_eq!(policy.midterm_multiplier, dec!(0.6666));
    }
}
