//! Shipping service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use taper::{
    addresses::Destination,
    catalog::{CartLine, Catalog},
    parcels::{aggregate, declared_value},
    rates::RateSelection,
    shipments::{Shipment, ShipmentUpdate, customer_reference},
};
use tracing::{error, info, warn};

use crate::{
    domain::{
        orders::{OrdersService, records::OrderUuid},
        shipping::{
            errors::ShippingServiceError,
            rates::normalize,
            requests::{rate_request, shipment_request},
        },
    },
    shiplogic::{ShippingProvider, validation::ValidationError},
};

/// A shipment booked for an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookedShipment {
    pub shipment: Shipment,

    /// Whether the tracking details were written back onto the order
    pub persisted: bool,
}

#[derive(Clone)]
pub struct ProviderShippingService {
    provider: Arc<dyn ShippingProvider>,
    orders: Arc<dyn OrdersService>,
    catalog: Arc<Catalog>,
}

impl ProviderShippingService {
    #[must_use]
    pub fn new(
        provider: Arc<dyn ShippingProvider>,
        orders: Arc<dyn OrdersService>,
        catalog: Arc<Catalog>,
    ) -> Self {
        Self {
            provider,
            orders,
            catalog,
        }
    }
}

#[async_trait]
impl ShippingService for ProviderShippingService {
    async fn quote_rates(
        &self,
        destination: Destination,
        cart: Vec<CartLine>,
    ) -> Result<RateSelection, ShippingServiceError> {
        let items = self.catalog.line_items(&cart);
        let parcel = aggregate(&items);
        let request = rate_request(&destination, &parcel, declared_value(&items));

        let response = match self.provider.get_rates(request).await {
            Ok(response) => response,
            Err(failure) if failure.is_configuration() || failure.is_validation() => {
                return Err(failure.into());
            }
            Err(failure) => {
                warn!("shipping rates unavailable, offering flat rates: {failure}");

                return Ok(RateSelection::fallback(Timestamp::now()));
            }
        };

        let quotes = normalize(response.rates.unwrap_or_default(), Timestamp::now());

        if quotes.is_empty() {
            info!(
                provider_message = response.message.as_deref().unwrap_or_default(),
                "no shipping rates returned, offering flat rates"
            );

            return Ok(RateSelection::fallback(Timestamp::now()));
        }

        Ok(RateSelection::from_quotes(quotes))
    }

    async fn create_shipment(
        &self,
        order: OrderUuid,
        service_level_code: String,
    ) -> Result<BookedShipment, ShippingServiceError> {
        if service_level_code.trim().is_empty() {
            return Err(ValidationError::MissingServiceLevel.into());
        }

        let record = self.orders.claim_shipment(order).await?;
        let request = shipment_request(&record, &self.catalog, &service_level_code);

        let shipment = match self.provider.create_shipment(request).await {
            Ok(response) => Shipment::from(response),
            Err(failure) => {
                if let Err(release) = self.orders.release_shipment_claim(order).await {
                    warn!(
                        order_number = %record.order_number,
                        "shipment booking failed and its claim was not released: {release}"
                    );
                }

                return Err(failure.into());
            }
        };

        info!(
            order_number = %record.order_number,
            tracking_reference = %shipment.tracking_reference,
            "shipment created"
        );

        let persisted = match self
            .orders
            .record_shipment(order, ShipmentUpdate::from(&shipment))
            .await
        {
            Ok(_) => true,
            Err(failure) => {
                error!(
                    order_number = %record.order_number,
                    provider_id = shipment.provider_id,
                    tracking_reference = %shipment.tracking_reference,
                    "shipment created but tracking details were not saved: {failure}"
                );

                false
            }
        };

        Ok(BookedShipment {
            shipment,
            persisted,
        })
    }

    async fn attach_shipment(
        &self,
        order: OrderUuid,
        provider_id: i64,
    ) -> Result<BookedShipment, ShippingServiceError> {
        let record = self.orders.get_order(order).await?;

        if let Some(tracking_number) = record.tracking_number {
            return Err(ShippingServiceError::AlreadyShipped { tracking_number });
        }

        let response = self.provider.get_shipment(provider_id).await?;

        if response.customer_reference.as_deref()
            != Some(customer_reference(&record.order_number).as_str())
        {
            return Err(ShippingServiceError::ShipmentMismatch { provider_id });
        }

        let shipment = Shipment::from(response);

        self.orders
            .record_shipment(order, ShipmentUpdate::from(&shipment))
            .await?;

        info!(
            order_number = %record.order_number,
            tracking_reference = %shipment.tracking_reference,
            "existing shipment attached"
        );

        Ok(BookedShipment {
            shipment,
            persisted: true,
        })
    }
}

#[automock]
#[async_trait]
pub trait ShippingService: Send + Sync {
    /// Quote shipping for a cart, falling back to flat rates when the provider has none.
    async fn quote_rates(
        &self,
        destination: Destination,
        cart: Vec<CartLine>,
    ) -> Result<RateSelection, ShippingServiceError>;

    /// Book a shipment for a stored order and record its tracking details.
    ///
    /// The order is claimed before the provider is called, so concurrent bookings for the same
    /// order create at most one provider shipment.
    async fn create_shipment(
        &self,
        order: OrderUuid,
        service_level_code: String,
    ) -> Result<BookedShipment, ShippingServiceError>;

    /// Record an already-booked provider shipment onto an order whose tracking details were
    /// never saved.
    async fn attach_shipment(
        &self,
        order: OrderUuid,
        provider_id: i64,
    ) -> Result<BookedShipment, ShippingServiceError>;
}
