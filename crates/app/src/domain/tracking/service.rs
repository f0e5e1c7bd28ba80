//! Tracking service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;

use crate::{
    domain::tracking::errors::TrackingServiceError,
    shiplogic::{ShippingProvider, validation::ValidationError, wire::TrackingResponse},
};

#[derive(Clone)]
pub struct ProviderTrackingService {
    provider: Arc<dyn ShippingProvider>,
}

impl ProviderTrackingService {
    #[must_use]
    pub fn new(provider: Arc<dyn ShippingProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl TrackingService for ProviderTrackingService {
    async fn track(&self, reference: &str) -> Result<TrackingResponse, TrackingServiceError> {
        let reference = reference.trim();

        if reference.is_empty() {
            return Err(ValidationError::MissingTrackingReference.into());
        }

        let report = self
            .provider
            .track_shipment(reference)
            .await
            .map_err(|error| TrackingServiceError::from_provider(reference, error))?;

        if report.shipments.is_empty() {
            return Err(TrackingServiceError::NotFound(reference.to_string()));
        }

        Ok(report)
    }
}

#[automock]
#[async_trait]
pub trait TrackingService: Send + Sync {
    /// Shipment progress for a tracking reference, with events in provider order.
    async fn track(&self, reference: &str) -> Result<TrackingResponse, TrackingServiceError>;
}
