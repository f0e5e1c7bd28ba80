//! Shiplogic HTTP client.

use async_trait::async_trait;
use mockall::automock;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, error, warn};

use crate::shiplogic::{
    ShiplogicConfig, ShiplogicError,
    validation::{ValidationError, validate_rate_request, validate_shipment_request},
    wire::{RateRequest, RatesResponse, ShipmentRequest, ShipmentResponse, TrackingResponse},
};

/// HTTP client for the Shiplogic v2 API.
#[derive(Debug, Clone)]
pub struct ShiplogicClient {
    config: ShiplogicConfig,
    http: Client,
}

impl ShiplogicClient {
    /// Create a client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built.
    pub fn new(config: ShiplogicConfig) -> Result<Self, ShiplogicError> {
        let http = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self { config, http })
    }

    fn authorized(
        &self,
        build: impl FnOnce(&Client, String) -> RequestBuilder,
        path: &str,
    ) -> Result<RequestBuilder, ShiplogicError> {
        let api_key = self
            .config
            .api_key()
            .ok_or(ShiplogicError::MissingCredentials)?;

        let url = self.config.url(path);

        debug!(%url, "shipping provider request");

        Ok(build(&self.http, url).bearer_auth(api_key))
    }

    async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ShiplogicError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!(status = status.as_u16(), %body, "shipping provider rejected request");

            return Err(ShiplogicError::Status { status, body });
        }

        decode(&body)
    }
}

/// Decode a successful response body. An empty body decodes as `{}`.
fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ShiplogicError> {
    let trimmed = body.trim();
    let json = if trimmed.is_empty() { "{}" } else { trimmed };

    serde_json::from_str(json).map_err(|source| {
        error!(%body, "could not decode shipping provider response: {source}");

        ShiplogicError::Decode(source)
    })
}

#[async_trait]
impl ShippingProvider for ShiplogicClient {
    async fn get_rates(&self, request: RateRequest) -> Result<RatesResponse, ShiplogicError> {
        let builder = self.authorized(Client::post, "/v2/rates")?;

        validate_rate_request(&request)?;

        Self::send(builder.json(&request)).await
    }

    async fn create_shipment(
        &self,
        request: ShipmentRequest,
    ) -> Result<ShipmentResponse, ShiplogicError> {
        let builder = self.authorized(Client::post, "/v2/shipments")?;

        validate_shipment_request(&request)?;

        Self::send(builder.json(&request)).await
    }

    async fn get_shipment(&self, shipment: i64) -> Result<ShipmentResponse, ShiplogicError> {
        let builder = self.authorized(Client::get, &format!("/v2/shipments/{shipment}"))?;

        Self::send(builder).await
    }

    async fn track_shipment(&self, reference: &str) -> Result<TrackingResponse, ShiplogicError> {
        let builder = self.authorized(Client::get, "/v2/tracking/shipments")?;

        let reference = reference.trim();

        if reference.is_empty() {
            return Err(ValidationError::MissingTrackingReference.into());
        }

        Self::send(builder.query(&[("tracking_reference", reference)])).await
    }
}

/// Courier API used to quote, book and track shipments.
#[automock]
#[async_trait]
pub trait ShippingProvider: Send + Sync {
    /// Quote rates for a parcel between two addresses.
    async fn get_rates(&self, request: RateRequest) -> Result<RatesResponse, ShiplogicError>;

    /// Book a shipment.
    async fn create_shipment(
        &self,
        request: ShipmentRequest,
    ) -> Result<ShipmentResponse, ShiplogicError>;

    /// Fetch a booked shipment.
    async fn get_shipment(&self, shipment: i64) -> Result<ShipmentResponse, ShiplogicError>;

    /// Look up shipment progress by tracking reference.
    async fn track_shipment(&self, reference: &str) -> Result<TrackingResponse, ShiplogicError>;
}
