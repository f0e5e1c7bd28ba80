//! Shipments

use serde::{Deserialize, Serialize};

/// Name recorded on orders shipped through the shipping provider.
pub const SHIPPING_PROVIDER_NAME: &str = "Shiplogic";

/// Shipping status held by an order while its shipment is being booked.
pub const BOOKING_SHIPPING_STATUS: &str = "booking";

/// Reference quoted to the provider so a shipment can be matched back to its order.
pub fn customer_reference(order_number: &str) -> String {
    format!("Order #{order_number}")
}

/// A shipment booked with the shipping provider for an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shipment {
    /// Provider shipment identifier
    pub provider_id: i64,

    /// Tracking reference issued by the provider
    pub tracking_reference: String,

    /// Provider shipment status
    pub status: String,

    /// Start of the estimated delivery window
    pub estimated_delivery_from: Option<String>,

    /// End of the estimated delivery window
    pub estimated_delivery_to: Option<String>,
}

/// Tracking details written onto an order once its shipment is booked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentUpdate {
    /// Tracking reference
    pub tracking_number: String,

    /// Provider name
    pub shipping_provider: String,

    /// Provider shipment status
    pub shipping_status: String,

    /// Estimated delivery date
    pub estimated_delivery: Option<String>,
}

impl From<&Shipment> for ShipmentUpdate {
    fn from(shipment: &Shipment) -> Self {
        Self {
            tracking_number: shipment.tracking_reference.clone(),
            shipping_provider: SHIPPING_PROVIDER_NAME.to_string(),
            shipping_status: shipment.status.clone(),
            estimated_delivery: shipment.estimated_delivery_to.clone(),
        }
    }
}
