//! Attach Shipment Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use tracing::info;
use uuid::Uuid;

use crate::{
    extensions::*,
    shipping::{errors::into_status_error, models::ShipmentResponse},
    state::State,
};

/// Attach Shipment Handler
///
/// Records a shipment that was booked with the provider but never saved on the order.
#[endpoint(
    tags("admin"),
    summary = "Attach Booked Shipment to Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Shipment recorded on the order"),
        (status_code = StatusCode::NOT_FOUND, description = "Order or shipment not found"),
        (status_code = StatusCode::CONFLICT, description = "Order already shipped or shipment belongs to another order"),
        (status_code = StatusCode::BAD_GATEWAY, description = "Shipping provider failed"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Shipping provider is not configured"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    shipment: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<ShipmentResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let admin = depot.admin_or_401()?;
    let order = order.into_inner();

    let attached = state
        .app
        .shipping
        .attach_shipment(order.into(), shipment.into_inner())
        .await
        .map_err(|error| into_status_error(error, state.expose_error_details))?;

    info!(
        order_uuid = %order,
        tracking_reference = %attached.shipment.tracking_reference,
        admin = %admin.name,
        "attached shipment"
    );

    Ok(Json(attached.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use taper::shipments::Shipment;
    use taper_app::domain::shipping::{BookedShipment, MockShippingService, ShippingServiceError};

    use crate::test_helpers::{TEST_ORDER_UUID, TestServices};

    use super::*;

    fn make_service(shipping: MockShippingService) -> Service {
        TestServices {
            shipping,
            ..TestServices::default()
        }
        .admin_service(Router::with_path("admin/orders/{order}/shipments/{shipment}").put(handler))
    }

    fn url() -> String {
        format!("http://example.com/admin/orders/{TEST_ORDER_UUID}/shipments/981")
    }

    #[tokio::test]
    async fn test_booked_shipment_is_attached() -> TestResult {
        let mut shipping = MockShippingService::new();

        shipping
            .expect_attach_shipment()
            .once()
            .withf(|uuid, shipment| Uuid::from(*uuid) == TEST_ORDER_UUID && *shipment == 981)
            .return_once(|_, _| {
                Ok(BookedShipment {
                    shipment: Shipment {
                        provider_id: 981,
                        tracking_reference: "UMI4X2".to_string(),
                        status: "submitted".to_string(),
                        estimated_delivery_from: None,
                        estimated_delivery_to: Some("2026-03-05".to_string()),
                    },
                    persisted: true,
                })
            });

        let mut res = TestClient::put(url()).send(&make_service(shipping)).await;

        let shipment: ShipmentResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(shipment.tracking_reference, "UMI4X2");
        assert!(shipment.persisted);

        Ok(())
    }

    #[tokio::test]
    async fn test_shipment_for_another_order_returns_409() -> TestResult {
        let mut shipping = MockShippingService::new();

        shipping
            .expect_attach_shipment()
            .once()
            .return_once(|_, shipment| {
                Err(ShippingServiceError::ShipmentMismatch {
                    provider_id: shipment,
                })
            });

        let res = TestClient::put(url()).send(&make_service(shipping)).await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}
