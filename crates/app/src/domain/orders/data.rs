//! Orders Data

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use taper::{
    addresses::Destination,
    orders::{EventBooking, OrderItem, OrderTotals, OrderTotalsError},
};

use crate::domain::orders::{
    numbers,
    records::{Customer, OrderUuid},
};

/// Checkout details submitted by a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDetails {
    pub customer: Customer,
    pub shipping_address: Destination,
    pub items: Vec<OrderItem>,
    pub event_booking: Option<EventBooking>,

    /// Shipping charged in cents
    pub shipping_cost: u64,

    /// Opaque reference returned by the payment collaborator
    pub payment_reference: String,

    pub notes: String,
}

/// New Order Data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrder {
    pub uuid: OrderUuid,
    pub order_number: String,
    pub customer: Customer,
    pub shipping_address: Destination,
    pub items: Vec<OrderItem>,
    pub event_booking: Option<EventBooking>,
    pub totals: OrderTotals,
    pub payment_reference: String,
    pub notes: String,
}

impl NewOrder {
    /// Assign an identifier and order number and fix the totals of a checkout.
    ///
    /// # Errors
    ///
    /// Returns an error when the order is empty or its totals overflow.
    pub fn from_details(details: OrderDetails, now: Timestamp) -> Result<Self, OrderTotalsError> {
        let totals = OrderTotals::compute(
            &details.items,
            details.event_booking.as_ref(),
            details.shipping_cost,
        )?;

        Ok(Self {
            uuid: OrderUuid::new(),
            order_number: numbers::generate(now),
            customer: details.customer,
            shipping_address: details.shipping_address,
            items: details.items,
            event_booking: details.event_booking,
            totals,
            payment_reference: details.payment_reference,
            notes: details.notes,
        })
    }
}

/// A 1-based page of a back office listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    /// Rows per page when none is asked for
    pub const DEFAULT_LIMIT: u32 = 10;

    /// Largest page the back office may request
    pub const MAX_LIMIT: u32 = 100;

    /// Clamp a requested page into range. Page 0 is treated as page 1.
    #[must_use]
    pub fn new(page: Option<u32>, limit: Option<u32>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            limit: limit
                .unwrap_or(Self::DEFAULT_LIMIT)
                .clamp(1, Self::MAX_LIMIT),
        }
    }

    pub fn page(self) -> u32 {
        self.page
    }

    pub fn limit(self) -> u32 {
        self.limit
    }

    /// Rows to skip before this page.
    pub fn offset(self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}
