//! Money

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{self, Currency},
};

/// The single currency the store operates in.
pub fn store_currency() -> &'static Currency {
    iso::ZAR
}

/// Build an amount in the store currency from minor units (cents).
pub fn zar(minor: i64) -> Money<'static, Currency> {
    Money::from_minor(minor, store_currency())
}

/// Build an amount in the store currency from major units, as the shipping provider reports
/// prices. Values are rounded to cents.
pub fn zar_from_major(amount: Decimal) -> Money<'static, Currency> {
    Money::from_decimal(amount.round_dp(2), store_currency())
}

/// Express minor units (cents) as a major-unit decimal, e.g. `30000` becomes `300.00`.
pub fn major_units(minor: u64) -> Decimal {
    Decimal::from(minor) / Decimal::ONE_HUNDRED
}

/// Express an amount in minor units (cents), saturating at the `i64` bounds.
pub fn minor_units(money: &Money<'_, Currency>) -> i64 {
    let cents = (*money.amount() * Decimal::ONE_HUNDRED).round();

    cents.to_i64().unwrap_or(if cents.is_sign_negative() {
        i64::MIN
    } else {
        i64::MAX
    })
}
