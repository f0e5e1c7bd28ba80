//! Orders

use std::{
    fmt::{self, Display, Formatter},
    num::NonZeroU32,
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    catalog::{Catalog, ProductId},
    parcels::LineItem,
};

/// Lifecycle status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Paid, not yet picked up by the back office
    Pending,

    /// Being packed
    Processing,

    /// Handed to the courier
    Shipped,

    /// Received by the customer
    Delivered,

    /// Cancelled
    Cancelled,
}

impl OrderStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::Processing,
        Self::Shipped,
        Self::Delivered,
        Self::Cancelled,
    ];

    /// Storage representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing an unknown order status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown order status \"{0}\"")]
pub struct UnknownOrderStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownOrderStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| UnknownOrderStatus(value.to_string()))
    }
}

/// Which status changes the back office may make.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionPolicy {
    /// Any status may follow any other.
    #[default]
    Permissive,

    /// Orders only move forward through the lifecycle.
    Forward,
}

impl TransitionPolicy {
    /// Whether an order in `from` may be set to `to`. Re-applying the current status is always
    /// permitted.
    pub fn permits(self, from: OrderStatus, to: OrderStatus) -> bool {
        if from == to {
            return true;
        }

        match self {
            Self::Permissive => true,
            Self::Forward => forward_predecessors(to).contains(&from),
        }
    }
}

fn forward_predecessors(status: OrderStatus) -> &'static [OrderStatus] {
    match status {
        OrderStatus::Pending => &[],
        OrderStatus::Processing => &[OrderStatus::Pending],
        OrderStatus::Shipped => &[OrderStatus::Processing],
        OrderStatus::Delivered => &[OrderStatus::Shipped],
        OrderStatus::Cancelled => &[OrderStatus::Pending, OrderStatus::Processing],
    }
}

/// A purchased product as stored on an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Product identifier
    pub product_id: ProductId,

    /// Product name at the time of purchase
    pub name: String,

    /// Unit price in cents
    pub price: u64,

    /// Number of units
    pub quantity: NonZeroU32,
}

impl OrderItem {
    /// Line total in cents.
    pub fn total(&self) -> u64 {
        self.price.saturating_mul(u64::from(self.quantity.get()))
    }

    /// Line item with packaging from the catalog and the price paid.
    pub fn to_line_item(&self, catalog: &Catalog) -> LineItem {
        LineItem {
            unit_price: self.price,
            ..catalog.line_item(&self.product_id, self.quantity)
        }
    }
}

/// Optional event-planning service booked alongside an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventBooking {
    /// Event date
    pub date: String,

    /// Event location
    pub location: String,

    /// Kind of event
    pub event_type: String,

    /// Expected guests
    pub guest_count: u32,

    /// Free-form notes
    #[serde(default)]
    pub additional_info: String,

    /// Fixed service price in cents
    pub price: u64,
}

/// Errors raised when computing order totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OrderTotalsError {
    /// An order must contain at least one product or an event booking.
    #[error("order has no items")]
    Empty,

    /// A sum did not fit in the amount type.
    #[error("order total overflowed")]
    Overflow,
}

/// Amounts of an order in cents, fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTotals {
    /// Items plus event booking
    pub subtotal: u64,

    /// Shipping charged
    pub shipping_cost: u64,

    /// `subtotal + shipping_cost`
    pub total: u64,
}

impl OrderTotals {
    /// Compute totals for the given items, booking and shipping charge.
    ///
    /// # Errors
    ///
    /// - [`OrderTotalsError::Empty`]: there are no items and no event booking.
    /// - [`OrderTotalsError::Overflow`]: an amount does not fit in `u64`.
    pub fn compute(
        items: &[OrderItem],
        event_booking: Option<&EventBooking>,
        shipping_cost: u64,
    ) -> Result<Self, OrderTotalsError> {
        if items.is_empty() && event_booking.is_none() {
            return Err(OrderTotalsError::Empty);
        }

        let items_total = items.iter().try_fold(0_u64, |total, item| {
            item.price
                .checked_mul(u64::from(item.quantity.get()))
                .and_then(|line| total.checked_add(line))
                .ok_or(OrderTotalsError::Overflow)
        })?;

        let subtotal = items_total
            .checked_add(event_booking.map_or(0, |booking| booking.price))
            .ok_or(OrderTotalsError::Overflow)?;

        let total = subtotal
            .checked_add(shipping_cost)
            .ok_or(OrderTotalsError::Overflow)?;

        Ok(Self {
            subtotal,
            shipping_cost,
            total,
        })
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::parcels::BoxSpec;

    use super::*;

    fn item(id: &str, price: u64, quantity: u32) -> TestResult<OrderItem> {
        Ok(OrderItem {
            product_id: ProductId::from(id),
            name: format!("Candle {id}"),
            price,
            quantity: NonZeroU32::new(quantity).ok_or("zero quantity")?,
        })
    }

    fn booking(price: u64) -> EventBooking {
        EventBooking {
            date: "2026-06-01".to_string(),
            location: "Cape Town".to_string(),
            event_type: "Wedding".to_string(),
            guest_count: 80,
            additional_info: String::new(),
            price,
        }
    }

    #[test]
    fn status_round_trips_through_strings() -> TestResult {
        for status in OrderStatus::ALL {
            assert_eq!(status.to_string().parse::<OrderStatus>()?, status);
        }

        assert_eq!(" Shipped ".parse::<OrderStatus>()?, OrderStatus::Shipped);
        assert!("lost".parse::<OrderStatus>().is_err());

        Ok(())
    }

    #[test]
    fn permissive_policy_allows_backward_moves() {
        let policy = TransitionPolicy::Permissive;

        assert!(policy.permits(OrderStatus::Delivered, OrderStatus::Pending));
        assert!(policy.permits(OrderStatus::Cancelled, OrderStatus::Shipped));
    }

    #[test]
    fn forward_policy_follows_lifecycle() {
        let policy = TransitionPolicy::Forward;

        assert!(policy.permits(OrderStatus::Pending, OrderStatus::Processing));
        assert!(policy.permits(OrderStatus::Processing, OrderStatus::Shipped));
        assert!(policy.permits(OrderStatus::Shipped, OrderStatus::Delivered));
        assert!(policy.permits(OrderStatus::Pending, OrderStatus::Cancelled));
        assert!(policy.permits(OrderStatus::Processing, OrderStatus::Cancelled));

        assert!(!policy.permits(OrderStatus::Delivered, OrderStatus::Pending));
        assert!(!policy.permits(OrderStatus::Shipped, OrderStatus::Cancelled));
        assert!(!policy.permits(OrderStatus::Pending, OrderStatus::Shipped));
        assert!(!policy.permits(OrderStatus::Cancelled, OrderStatus::Processing));
    }

    #[test]
    fn reapplying_status_is_always_permitted() {
        for status in OrderStatus::ALL {
            assert!(TransitionPolicy::Forward.permits(status, status));
        }
    }

    #[test]
    fn totals_add_items_booking_and_shipping() -> TestResult {
        let items = [item("1", 15_000, 2)?, item("2", 8_000, 1)?];
        let booking = booking(120_000);

        let totals = OrderTotals::compute(&items, Some(&booking), 7_500)?;

        assert_eq!(totals.subtotal, 158_000);
        assert_eq!(totals.shipping_cost, 7_500);
        assert_eq!(totals.total, totals.subtotal + totals.shipping_cost);

        Ok(())
    }

    #[test]
    fn booking_only_orders_are_allowed() -> TestResult {
        let totals = OrderTotals::compute(&[], Some(&booking(50_000)), 0)?;

        assert_eq!(totals.total, 50_000);

        Ok(())
    }

    #[test]
    fn empty_orders_are_rejected() {
        assert_eq!(
            OrderTotals::compute(&[], None, 7_500),
            Err(OrderTotalsError::Empty)
        );
    }

    #[test]
    fn overflowing_totals_are_rejected() -> TestResult {
        let items = [item("1", u64::MAX, 2)?];

        assert_eq!(
            OrderTotals::compute(&items, None, 0),
            Err(OrderTotalsError::Overflow)
        );

        Ok(())
    }

    #[test]
    fn order_item_keeps_price_paid() -> TestResult {
        let catalog = Catalog::default();
        let line = item("unknown", 9_900, 3)?.to_line_item(&catalog);

        assert_eq!(line.unit_price, 9_900);
        assert_eq!(line.package, BoxSpec::DEFAULT);
        assert_eq!(line.total(), 29_700);

        Ok(())
    }
}
