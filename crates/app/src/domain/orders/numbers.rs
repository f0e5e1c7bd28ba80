//! Order numbers

use jiff::Timestamp;
use rand::Rng;

/// Prefix of every order number.
pub const ORDER_NUMBER_PREFIX: &str = "UMI";

/// Generate a human-readable order number from the current time and a random suffix.
pub fn generate(now: Timestamp) -> String {
    format_order_number(now, rand::thread_rng().gen_range(0..10_000))
}

/// `UMI-<last 6 digits of the millisecond timestamp>-<suffix padded to 4 digits>`
pub(crate) fn format_order_number(now: Timestamp, suffix: u16) -> String {
    let millis = now.as_millisecond().rem_euclid(1_000_000);

    format!("{ORDER_NUMBER_PREFIX}-{millis:06}-{suffix:04}")
}
