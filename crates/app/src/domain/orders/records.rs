//! Order Records

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use taper::{
    addresses::Destination,
    orders::{EventBooking, OrderItem, OrderStatus, OrderTotals},
};

use crate::uuids::TypedUuid;

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// Who placed an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Order Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRecord {
    pub uuid: OrderUuid,
    pub order_number: String,
    pub customer: Customer,
    pub shipping_address: Destination,
    pub items: Vec<OrderItem>,
    pub event_booking: Option<EventBooking>,
    pub totals: OrderTotals,
    pub payment_reference: String,
    pub status: OrderStatus,
    pub tracking_number: Option<String>,
    pub shipping_provider: Option<String>,
    pub shipping_status: Option<String>,
    pub estimated_delivery: Option<String>,
    pub notes: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl OrderRecord {
    /// Whether a shipment has already been booked for this order.
    pub fn has_shipment(&self) -> bool {
        self.tracking_number.is_some()
    }
}

/// A page of a listing, with the number of rows across all pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
}

/// Someone who has placed at least one order, keyed by case-insensitive email.
///
/// Name and phone come from their most recent order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerSummary {
    pub customer: Customer,
    pub order_count: u64,
    pub first_order_at: Timestamp,
    pub last_order_at: Timestamp,
}

/// A customer with their orders, newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerOrders {
    pub summary: CustomerSummary,
    pub orders: Vec<OrderRecord>,
}

impl CustomerOrders {
    /// Summarise orders already sorted newest first. `None` when there are none.
    pub fn from_orders(orders: Vec<OrderRecord>) -> Option<Self> {
        let newest = orders.first()?;
        let oldest = orders.last()?;

        let summary = CustomerSummary {
            customer: newest.customer.clone(),
            order_count: orders.len() as u64,
            first_order_at: oldest.created_at,
            last_order_at: newest.created_at,
        };

        Some(Self { summary, orders })
    }
}
