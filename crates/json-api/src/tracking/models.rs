//! Tracking response bodies.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use taper_app::shiplogic::wire::{
    StepProgress, TrackedShipment, TrackingEvent, TrackingResponse, TrackingStep,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct TrackingEventBody {
    pub date: String,
    pub status: String,
    pub source: Option<String>,
    pub message: String,
}

impl From<TrackingEvent> for TrackingEventBody {
    fn from(event: TrackingEvent) -> Self {
        Self {
            date: event.date,
            status: event.status,
            source: event.source,
            message: event.message,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct TrackedShipmentBody {
    pub shipment_id: i64,
    pub tracking_reference: String,
    pub status: String,
    pub service_level: Option<String>,
    pub created_at: Option<String>,
    pub collected_at: Option<String>,
    pub delivered_at: Option<String>,
    pub estimated_collection: Option<String>,
    pub estimated_delivery_from: Option<String>,
    pub estimated_delivery_to: Option<String>,

    /// Events in the order the provider reported them
    pub events: Vec<TrackingEventBody>,
}

impl From<TrackedShipment> for TrackedShipmentBody {
    fn from(shipment: TrackedShipment) -> Self {
        Self {
            shipment_id: shipment.shipment_id,
            tracking_reference: shipment.short_tracking_reference,
            status: shipment.status,
            service_level: shipment.service_level_name,
            created_at: shipment.shipment_time_created,
            collected_at: shipment.shipment_collected_date,
            delivered_at: shipment.shipment_delivered_date,
            estimated_collection: shipment.shipment_estimated_collection,
            estimated_delivery_from: shipment.shipment_estimated_delivery_from,
            estimated_delivery_to: shipment.shipment_estimated_delivery_to,
            events: shipment
                .tracking_events
                .into_iter()
                .map(TrackingEventBody::from)
                .collect(),
        }
    }
}

/// Progress of a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub(crate) enum StepProgressBody {
    Done,
    Current,
    Pending,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct TrackingStepBody {
    pub step_number: u32,
    pub label: String,
    pub progress: StepProgressBody,
}

impl From<TrackingStep> for TrackingStepBody {
    fn from(step: TrackingStep) -> Self {
        Self {
            step_number: step.step_number,
            label: step.label,
            progress: match step.progress {
                StepProgress::Done => StepProgressBody::Done,
                StepProgress::Current => StepProgressBody::Current,
                StepProgress::Pending => StepProgressBody::Pending,
            },
        }
    }
}

/// Shipment progress for a tracking reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct TrackingReport {
    pub shipments: Vec<TrackedShipmentBody>,
    pub steps: Vec<TrackingStepBody>,
}

impl From<TrackingResponse> for TrackingReport {
    fn from(response: TrackingResponse) -> Self {
        Self {
            shipments: response
                .shipments
                .into_iter()
                .map(TrackedShipmentBody::from)
                .collect(),
            steps: response
                .tracking_steps
                .into_iter()
                .map(TrackingStepBody::from)
                .collect(),
        }
    }
}
