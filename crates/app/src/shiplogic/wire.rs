//! Shiplogic v2 request and response payloads.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use taper::{
    addresses::{Address, Contact},
    parcels::Parcel,
    shipments::Shipment,
};

/// Parcels of a single request. Orders ship as one parcel.
pub type Parcels = SmallVec<[WireParcel; 1]>;

/// A parcel as submitted to the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireParcel {
    /// Length in centimetres
    pub submitted_length_cm: u32,

    /// Width in centimetres
    pub submitted_width_cm: u32,

    /// Height in centimetres
    pub submitted_height_cm: u32,

    /// Weight in kilograms
    pub submitted_weight_kg: f64,

    /// Free-text description printed on the waybill
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parcel_description: Option<String>,
}

impl WireParcel {
    /// Wire form of an aggregated parcel.
    #[must_use]
    pub fn new(parcel: &Parcel, description: Option<String>) -> Self {
        Self {
            submitted_length_cm: parcel.length_cm,
            submitted_width_cm: parcel.width_cm,
            submitted_height_cm: parcel.height_cm,
            submitted_weight_kg: parcel.weight_kg,
            parcel_description: description,
        }
    }
}

/// `POST /v2/rates` body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateRequest {
    /// Pickup address
    pub collection_address: Address,

    /// Drop-off address
    pub delivery_address: Address,

    /// Parcels to quote
    pub parcels: Parcels,

    /// Declared value in rand
    #[serde(with = "rust_decimal::serde::float")]
    pub declared_value: Decimal,

    /// Earliest collection date, `YYYY-MM-DD`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_min_date: Option<String>,

    /// Earliest delivery date, `YYYY-MM-DD`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_min_date: Option<String>,
}

/// `POST /v2/rates` response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RatesResponse {
    /// Informational message from the provider
    #[serde(default)]
    pub message: Option<String>,

    /// Quoted rates; absent when the provider cannot quote
    #[serde(default)]
    pub rates: Option<Vec<ProviderRate>>,
}

/// A single quoted rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderRate {
    /// Price in rand, including VAT
    #[serde(with = "rust_decimal::serde::float")]
    pub rate: Decimal,

    /// Price in rand, excluding VAT
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub rate_excluding_vat: Option<Decimal>,

    /// Shipping tier of this rate
    pub service_level: ProviderServiceLevel,
}

/// A provider service level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderServiceLevel {
    /// Numeric identifier
    pub id: i64,

    /// Code used when booking shipments
    pub code: String,

    /// Display name
    pub name: String,

    /// Description
    #[serde(default)]
    pub description: Option<String>,

    /// Earliest collection date
    #[serde(default)]
    pub collection_date: Option<String>,

    /// Start of the delivery window
    #[serde(default)]
    pub delivery_date_from: Option<String>,

    /// End of the delivery window
    #[serde(default)]
    pub delivery_date_to: Option<String>,
}

/// `POST /v2/shipments` body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentRequest {
    /// Pickup address
    pub collection_address: Address,

    /// Pickup contact
    pub collection_contact: Contact,

    /// Drop-off address
    pub delivery_address: Address,

    /// Drop-off contact
    pub delivery_contact: Contact,

    /// Parcels to ship
    pub parcels: Parcels,

    /// Service level code of the chosen rate
    pub service_level_code: String,

    /// Declared value in rand
    #[serde(with = "rust_decimal::serde::float")]
    pub declared_value: Decimal,

    /// Merchant reference shown on the waybill
    pub customer_reference: String,

    /// Instructions for the delivery driver
    #[serde(default)]
    pub special_instructions_delivery: String,
}

/// A shipment as returned by `POST /v2/shipments` and `GET /v2/shipments/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentResponse {
    /// Provider shipment identifier
    pub id: i64,

    /// Tracking reference
    #[serde(default)]
    pub short_tracking_reference: String,

    /// Merchant reference
    #[serde(default)]
    pub customer_reference: Option<String>,

    /// Shipment status
    #[serde(default)]
    pub status: String,

    /// Service level code
    #[serde(default)]
    pub service_level_code: Option<String>,

    /// Service level name
    #[serde(default)]
    pub service_level_name: Option<String>,

    /// Charged rate in rand
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub rate: Option<Decimal>,

    /// Start of the estimated delivery window
    #[serde(default)]
    pub estimated_delivery_from: Option<String>,

    /// End of the estimated delivery window
    #[serde(default)]
    pub estimated_delivery_to: Option<String>,
}

impl From<ShipmentResponse> for Shipment {
    fn from(response: ShipmentResponse) -> Self {
        Self {
            provider_id: response.id,
            tracking_reference: response.short_tracking_reference,
            status: response.status,
            estimated_delivery_from: response.estimated_delivery_from,
            estimated_delivery_to: response.estimated_delivery_to,
        }
    }
}

/// `GET /v2/tracking/shipments` response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackingResponse {
    /// Shipments matching the reference
    #[serde(default)]
    pub shipments: Vec<TrackedShipment>,

    /// Overall progress of the first shipment
    #[serde(default)]
    pub tracking_steps: Vec<TrackingStep>,
}

/// Shipment details returned by the tracking endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedShipment {
    /// Courier identifier
    #[serde(default)]
    pub provider_id: i64,

    /// Shipment identifier
    pub shipment_id: i64,

    /// Tracking reference
    #[serde(default)]
    pub short_tracking_reference: String,

    /// Shipment status
    #[serde(default)]
    pub status: String,

    /// When the shipment was booked
    #[serde(default)]
    pub shipment_time_created: Option<String>,

    /// When the courier collected the parcel
    #[serde(default)]
    pub shipment_collected_date: Option<String>,

    /// When the parcel was delivered
    #[serde(default)]
    pub shipment_delivered_date: Option<String>,

    /// Estimated collection date
    #[serde(default)]
    pub shipment_estimated_collection: Option<String>,

    /// Start of the estimated delivery window
    #[serde(default)]
    pub shipment_estimated_delivery_from: Option<String>,

    /// End of the estimated delivery window
    #[serde(default)]
    pub shipment_estimated_delivery_to: Option<String>,

    /// Hub the parcel was collected into
    #[serde(default)]
    pub collection_hub: Option<String>,

    /// Hub the parcel is delivered from
    #[serde(default)]
    pub delivery_hub: Option<String>,

    /// Service level code
    #[serde(default)]
    pub service_level_code: Option<String>,

    /// Service level name
    #[serde(default)]
    pub service_level_name: Option<String>,

    /// Events, in provider order
    #[serde(default)]
    pub tracking_events: Vec<TrackingEvent>,
}

/// A scan or status change on a tracked shipment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingEvent {
    /// Event identifier
    pub id: i64,

    /// Parcel the event refers to
    #[serde(default)]
    pub parcel_id: Option<i64>,

    /// Event time
    pub date: String,

    /// Status after the event
    pub status: String,

    /// Event source, e.g. the hub
    #[serde(default)]
    pub source: Option<String>,

    /// Human-readable description
    #[serde(default)]
    pub message: String,
}

/// A step in the provider's progress indicator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingStep {
    /// Position of the step, starting at 1
    pub step_number: u32,

    /// Step label
    pub label: String,

    /// Whether the step is done, current or pending
    pub progress: StepProgress,
}

/// Progress of a tracking step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepProgress {
    /// Completed
    Done,

    /// In progress
    Current,

    /// Not reached yet
    Pending,
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn rates_response_decodes_provider_payload() -> TestResult {
        let response: RatesResponse = serde_json::from_value(json!({
            "message": "",
            "rates": [{
                "rate": 99.5,
                "rate_excluding_vat": 86.52,
                "base_rate": { "charge": 99.5 },
                "service_level": {
                    "id": 7,
                    "code": "ECO",
                    "name": "Economy",
                    "description": "Economy road freight",
                    "delivery_date_from": "2026-03-04",
                    "delivery_date_to": "2026-03-06",
                    "collection_date": "2026-03-02",
                    "vat_type": "standard"
                }
            }]
        }))?;

        let rates = response.rates.ok_or("rates missing")?;
        let rate = rates.first().ok_or("no rate")?;

        assert_eq!(rate.rate, Decimal::new(995, 1));
        assert_eq!(rate.service_level.id, 7);
        assert_eq!(rate.service_level.code, "ECO");
        assert_eq!(
            rate.service_level.delivery_date_to.as_deref(),
            Some("2026-03-06")
        );

        Ok(())
    }

    #[test]
    fn empty_object_has_no_rates() -> TestResult {
        let response: RatesResponse = serde_json::from_str("{}")?;

        assert!(response.rates.is_none());

        Ok(())
    }

    #[test]
    fn parcel_serializes_submitted_fields() -> TestResult {
        let parcel = WireParcel::new(&Parcel::DEFAULT, Some("Umi Candles Order #1".to_string()));
        let value = serde_json::to_value(&parcel)?;

        assert_eq!(
            value,
            json!({
                "submitted_length_cm": 30,
                "submitted_width_cm": 20,
                "submitted_height_cm": 15,
                "submitted_weight_kg": 1.0,
                "parcel_description": "Umi Candles Order #1"
            })
        );

        Ok(())
    }

    #[test]
    fn shipment_response_becomes_shipment() -> TestResult {
        let response: ShipmentResponse = serde_json::from_value(json!({
            "id": 9001,
            "short_tracking_reference": "UMI4X2",
            "status": "submitted",
            "estimated_delivery_from": "2026-03-04",
            "estimated_delivery_to": "2026-03-06",
            "tracking_events": []
        }))?;

        let shipment = Shipment::from(response);

        assert_eq!(shipment.provider_id, 9001);
        assert_eq!(shipment.tracking_reference, "UMI4X2");
        assert_eq!(shipment.estimated_delivery_to.as_deref(), Some("2026-03-06"));

        Ok(())
    }

    #[test]
    fn tracking_steps_decode_progress() -> TestResult {
        let response: TrackingResponse = serde_json::from_value(json!({
            "shipments": [],
            "tracking_steps": [
                { "step_number": 1, "label": "Collected", "progress": "done" },
                { "step_number": 2, "label": "In transit", "progress": "current" },
                { "step_number": 3, "label": "Delivered", "progress": "pending" }
            ]
        }))?;

        let progress: Vec<StepProgress> = response
            .tracking_steps
            .iter()
            .map(|step| step.progress)
            .collect();

        assert_eq!(
            progress,
            [StepProgress::Done, StepProgress::Current, StepProgress::Pending]
        );

        Ok(())
    }
}
