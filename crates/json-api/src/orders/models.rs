//! Order request and response bodies.

use std::num::NonZeroU32;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use taper::{
    addresses::Destination,
    orders::{EventBooking, OrderItem},
};
use taper_app::domain::orders::{
    data::OrderDetails,
    records::{Customer, OrderRecord, Page},
};

/// Delivery address as entered at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct DestinationBody {
    pub street_address: String,

    #[serde(default)]
    pub local_area: String,

    pub city: String,

    /// Province
    #[serde(default)]
    pub zone: String,

    /// Country display name, e.g. "South Africa"
    #[serde(default)]
    pub country: String,

    pub postal_code: String,
}

impl From<DestinationBody> for Destination {
    fn from(body: DestinationBody) -> Self {
        Self {
            street_address: body.street_address,
            local_area: body.local_area,
            city: body.city,
            zone: body.zone,
            country: body.country,
            postal_code: body.postal_code,
        }
    }
}

impl From<Destination> for DestinationBody {
    fn from(destination: Destination) -> Self {
        Self {
            street_address: destination.street_address,
            local_area: destination.local_area,
            city: destination.city,
            zone: destination.zone,
            country: destination.country,
            postal_code: destination.postal_code,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct CustomerBody {
    pub name: String,
    pub email: String,

    #[serde(default)]
    pub phone: String,
}

impl From<CustomerBody> for Customer {
    fn from(body: CustomerBody) -> Self {
        Self {
            name: body.name,
            email: body.email,
            phone: body.phone,
        }
    }
}

impl From<Customer> for CustomerBody {
    fn from(customer: Customer) -> Self {
        Self {
            name: customer.name,
            email: customer.email,
            phone: customer.phone,
        }
    }
}

/// A purchased product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemBody {
    pub product_id: String,
    pub name: String,

    /// Unit price in cents
    pub price: u64,

    /// Number of units, at least 1
    pub quantity: u32,
}

impl TryFrom<OrderItemBody> for OrderItem {
    type Error = InvalidOrderBody;

    fn try_from(body: OrderItemBody) -> Result<Self, Self::Error> {
        let quantity = NonZeroU32::new(body.quantity).ok_or(InvalidOrderBody::ZeroQuantity)?;

        Ok(Self {
            product_id: body.product_id.into(),
            name: body.name,
            price: body.price,
            quantity,
        })
    }
}

impl From<OrderItem> for OrderItemBody {
    fn from(item: OrderItem) -> Self {
        Self {
            product_id: item.product_id.to_string(),
            name: item.name,
            price: item.price,
            quantity: item.quantity.get(),
        }
    }
}

/// A booked candle-making event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct EventBookingBody {
    pub date: String,
    pub location: String,
    pub event_type: String,
    pub guest_count: u32,

    #[serde(default)]
    pub additional_info: String,

    /// Price in cents
    pub price: u64,
}

impl From<EventBookingBody> for EventBooking {
    fn from(body: EventBookingBody) -> Self {
        Self {
            date: body.date,
            location: body.location,
            event_type: body.event_type,
            guest_count: body.guest_count,
            additional_info: body.additional_info,
            price: body.price,
        }
    }
}

impl From<EventBooking> for EventBookingBody {
    fn from(booking: EventBooking) -> Self {
        Self {
            date: booking.date,
            location: booking.location,
            event_type: booking.event_type,
            guest_count: booking.guest_count,
            additional_info: booking.additional_info,
            price: booking.price,
        }
    }
}

/// Checkout submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateOrderRequest {
    pub customer: CustomerBody,
    pub shipping_address: DestinationBody,

    #[serde(default)]
    pub items: Vec<OrderItemBody>,

    #[serde(default)]
    pub event_booking: Option<EventBookingBody>,

    /// Shipping charged in cents
    pub shipping_cost: u64,

    /// Reference returned by the payment provider
    pub payment_reference: String,

    #[serde(default)]
    pub notes: String,
}

/// A checkout body that cannot become an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub(crate) enum InvalidOrderBody {
    #[error("item quantities must be at least 1")]
    ZeroQuantity,
}

impl TryFrom<CreateOrderRequest> for OrderDetails {
    type Error = InvalidOrderBody;

    fn try_from(request: CreateOrderRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            customer: request.customer.into(),
            shipping_address: request.shipping_address.into(),
            items: request
                .items
                .into_iter()
                .map(OrderItem::try_from)
                .collect::<Result<_, _>>()?,
            event_booking: request.event_booking.map(EventBooking::from),
            shipping_cost: request.shipping_cost,
            payment_reference: request.payment_reference,
            notes: request.notes,
        })
    }
}

/// A stored order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    pub uuid: Uuid,
    pub order_number: String,
    pub customer: CustomerBody,
    pub shipping_address: DestinationBody,
    pub items: Vec<OrderItemBody>,
    pub event_booking: Option<EventBookingBody>,

    /// Items plus event booking, in cents
    pub subtotal: u64,

    /// Shipping charged, in cents
    pub shipping_cost: u64,

    /// Amount paid, in cents
    pub total: u64,

    pub payment_reference: String,

    /// pending, processing, shipped, delivered or cancelled
    pub status: String,

    pub tracking_number: Option<String>,
    pub shipping_provider: Option<String>,
    pub shipping_status: Option<String>,
    pub estimated_delivery: Option<String>,
    pub notes: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<OrderRecord> for OrderResponse {
    fn from(record: OrderRecord) -> Self {
        Self {
            uuid: record.uuid.into(),
            order_number: record.order_number,
            customer: record.customer.into(),
            shipping_address: record.shipping_address.into(),
            items: record.items.into_iter().map(OrderItemBody::from).collect(),
            event_booking: record.event_booking.map(EventBookingBody::from),
            subtotal: record.totals.subtotal,
            shipping_cost: record.totals.shipping_cost,
            total: record.totals.total,
            payment_reference: record.payment_reference,
            status: record.status.to_string(),
            tracking_number: record.tracking_number,
            shipping_provider: record.shipping_provider,
            shipping_status: record.shipping_status,
            estimated_delivery: record.estimated_delivery,
            notes: record.notes,
            created_at: record.created_at.to_string(),
            updated_at: record.updated_at.to_string(),
        }
    }
}

/// Orders, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrdersResponse {
    pub orders: Vec<OrderResponse>,
}

impl FromIterator<OrderRecord> for OrdersResponse {
    fn from_iter<I: IntoIterator<Item = OrderRecord>>(records: I) -> Self {
        Self {
            orders: records.into_iter().map(OrderResponse::from).collect(),
        }
    }
}

/// A page of orders, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrdersPageResponse {
    pub orders: Vec<OrderResponse>,

    /// Orders across all pages
    pub total: u64,

    pub page: u32,
    pub limit: u32,
}

impl From<Page<OrderRecord>> for OrdersPageResponse {
    fn from(page: Page<OrderRecord>) -> Self {
        Self {
            orders: page.items.into_iter().map(OrderResponse::from).collect(),
            total: page.total,
            page: page.page,
            limit: page.limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    fn request(quantity: u32) -> TestResult<CreateOrderRequest> {
        Ok(serde_json::from_value(json!({
            "customer": { "name": "Thandi", "email": "thandi@example.com" },
            "shipping_address": {
                "street_address": "1 Main Rd",
                "city": "Cape Town",
                "country": "South Africa",
                "postal_code": "8001"
            },
            "items": [{ "product_id": "P1", "name": "Fig Candle", "price": 15000, "quantity": quantity }],
            "shipping_cost": 7500,
            "payment_reference": "pay_123"
        }))?)
    }

    #[test]
    fn optional_fields_default() -> TestResult {
        let details = OrderDetails::try_from(request(2)?)?;

        assert_eq!(details.customer.phone, "");
        assert_eq!(details.notes, "");
        assert!(details.event_booking.is_none());
        assert_eq!(details.items.first().map(|item| item.quantity.get()), Some(2));

        Ok(())
    }

    #[test]
    fn zero_quantity_is_rejected() -> TestResult {
        assert_eq!(
            OrderDetails::try_from(request(0)?),
            Err(InvalidOrderBody::ZeroQuantity)
        );

        Ok(())
    }
}
