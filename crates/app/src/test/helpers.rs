//! Test Helpers

use std::num::NonZeroU32;

use jiff::Timestamp;
use taper::{
    addresses::Destination,
    catalog::ProductId,
    orders::{OrderItem, OrderStatus},
};

use crate::domain::orders::{
    data::{NewOrder, OrderDetails},
    records::{Customer, OrderRecord},
};

/// Two R150 candles to Cape Town with R75 shipping.
pub(crate) fn order_details() -> OrderDetails {
    OrderDetails {
        customer: Customer {
            name: "Thandi Nkosi".to_string(),
            email: "thandi@example.com".to_string(),
            phone: "0821234567".to_string(),
        },
        shipping_address: Destination {
            street_address: "1 Main Rd".to_string(),
            city: "Cape Town".to_string(),
            country: "South Africa".to_string(),
            postal_code: "8001".to_string(),
            ..Destination::default()
        },
        items: vec![OrderItem {
            product_id: ProductId::from("P1"),
            name: "Vanilla Pillar".to_string(),
            price: 15_000,
            quantity: NonZeroU32::MIN.saturating_add(1),
        }],
        event_booking: None,
        shipping_cost: 7_500,
        payment_reference: "pay_123".to_string(),
        notes: "Leave with the concierge".to_string(),
    }
}

/// The record the order store would return for a freshly created order.
pub(crate) fn order_record(order: &NewOrder) -> OrderRecord {
    let now = Timestamp::now();

    OrderRecord {
        uuid: order.uuid,
        order_number: order.order_number.clone(),
        customer: order.customer.clone(),
        shipping_address: order.shipping_address.clone(),
        items: order.items.clone(),
        event_booking: order.event_booking.clone(),
        totals: order.totals,
        payment_reference: order.payment_reference.clone(),
        status: OrderStatus::Pending,
        tracking_number: None,
        shipping_provider: None,
        shipping_status: None,
        estimated_delivery: None,
        notes: order.notes.clone(),
        created_at: now,
        updated_at: now,
    }
}
