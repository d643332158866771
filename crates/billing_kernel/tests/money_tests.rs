//! Black-box tests for the kernel money types

use billing_kernel::{Money, Rate};
use rust_decimal_macros::dec;

#[test]
fn money_sum_over_iterator() {
    let amounts = vec![
        Money::from_major(21_000),
        Money::from_major(3_000),
        Money::new(dec!(-1050.00)),
    ];

    let total: Money = amounts.into_iter().sum();
    assert_eq!(total, Money::new(dec!(22950.00)));
}

#[test]
fn money_serde_round_trip() {
    let money = Money::new(dec!(6830.00));
    let json = serde_json::to_string(&money).unwrap();
    let back: Money = serde_json::from_str(&json).unwrap();
    assert_eq!(money, back);
}

#[test]
fn rate_from_percentage_round_trip() {
    let rate = Rate::from_percentage(dec!(5));
    assert_eq!(rate.as_decimal(), dec!(0.05));
    assert_eq!(rate.as_percentage(), dec!(5.00));
}

#[test]
fn negative_amounts_flow_through_arithmetic() {
    let fee = Money::from_major(2_500);
    let discount = Money::new(dec!(-1050.00));

    let net = fee + discount;
    assert_eq!(net, Money::new(dec!(1450.00)));
    assert!(net.is_positive());
    assert!(discount.is_negative());
    assert_eq!(discount.abs(), Money::new(dec!(1050.00)));
}
