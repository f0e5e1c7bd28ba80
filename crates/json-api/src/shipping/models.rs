//! Shipping request and response bodies.

use std::num::NonZeroU32;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use taper::{
    catalog::CartLine,
    money::minor_units,
    rates::{RateQuote, RateSelection, RateSource},
    shipments::Shipment,
};
use taper_app::domain::shipping::BookedShipment;

use crate::orders::models::DestinationBody;

/// A product and quantity in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartLineBody {
    pub product_id: String,

    /// Number of units, at least 1
    pub quantity: u32,
}

/// Rate quote request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct RatesRequest {
    pub destination: DestinationBody,

    #[serde(default)]
    pub items: Vec<CartLineBody>,
}

impl RatesRequest {
    /// Cart lines with a usable quantity; zero-quantity lines are dropped.
    pub(crate) fn cart_lines(&self) -> Vec<CartLine> {
        self.items
            .iter()
            .filter_map(|line| {
                Some(CartLine {
                    product_id: line.product_id.as_str().into(),
                    quantity: NonZeroU32::new(line.quantity)?,
                })
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct CourierBody {
    pub id: String,
    pub name: String,
    pub logo_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct ServiceLevelBody {
    pub id: String,
    pub name: String,

    /// Code to send when booking a shipment
    pub code: String,
}

/// A shipping option offered at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct RateQuoteBody {
    pub id: String,
    pub courier: CourierBody,
    pub service_level: ServiceLevelBody,
    pub collection_date: Option<String>,
    pub delivery_from: Option<String>,
    pub delivery_to: Option<String>,
    pub estimate: Option<String>,

    /// Price in cents
    pub total: i64,

    /// ISO 4217 currency code
    pub currency: String,

    pub valid_until: String,
}

impl From<RateQuote> for RateQuoteBody {
    fn from(quote: RateQuote) -> Self {
        Self {
            total: minor_units(&quote.total),
            currency: quote.total.currency().iso_alpha_code.to_string(),
            id: quote.id,
            courier: CourierBody {
                id: quote.courier.id,
                name: quote.courier.name,
                logo_url: quote.courier.logo_url,
            },
            service_level: ServiceLevelBody {
                id: quote.service_level.id,
                name: quote.service_level.name,
                code: quote.service_level.code,
            },
            collection_date: quote.collection_date,
            delivery_from: quote.delivery_from,
            delivery_to: quote.delivery_to,
            estimate: quote.estimate,
            valid_until: quote.valid_until.to_string(),
        }
    }
}

/// Where quotes came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub(crate) enum RateSourceBody {
    Provider,
    Fallback,
}

/// Shipping options with the default choice made.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct RatesResponse {
    pub quotes: Vec<RateQuoteBody>,

    /// Identifier of the pre-selected quote
    pub selected: Option<String>,

    pub source: RateSourceBody,
}

impl From<RateSelection> for RatesResponse {
    fn from(selection: RateSelection) -> Self {
        Self {
            source: match selection.source {
                RateSource::Provider => RateSourceBody::Provider,
                RateSource::Fallback => RateSourceBody::Fallback,
            },
            selected: selection.selected,
            quotes: selection
                .quotes
                .into_iter()
                .map(RateQuoteBody::from)
                .collect(),
        }
    }
}

/// Shipment booking request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateShipmentRequest {
    /// Service level code of the chosen rate
    pub service_level_code: String,
}

/// A booked shipment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct ShipmentResponse {
    pub provider_id: i64,
    pub tracking_reference: String,
    pub status: String,
    pub estimated_delivery_from: Option<String>,
    pub estimated_delivery_to: Option<String>,

    /// Whether the tracking details were saved on the order
    pub persisted: bool,
}

impl From<BookedShipment> for ShipmentResponse {
    fn from(booked: BookedShipment) -> Self {
        let Shipment {
            provider_id,
            tracking_reference,
            status,
            estimated_delivery_from,
            estimated_delivery_to,
        } = booked.shipment;

        Self {
            provider_id,
            tracking_reference,
            status,
            estimated_delivery_from,
            estimated_delivery_to,
            persisted: booked.persisted,
        }
    }
}
