//! Create Shipment Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    extensions::*,
    shipping::{
        errors::into_status_error,
        models::{CreateShipmentRequest, ShipmentResponse},
    },
    state::State,
};

/// Create Shipment Handler
#[endpoint(
    tags("admin"),
    summary = "Book Shipment for Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Shipment booked"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing service level or incomplete address"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::CONFLICT, description = "Order already has a shipment"),
        (status_code = StatusCode::BAD_GATEWAY, description = "Shipping provider failed"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Shipping provider is not configured"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<CreateShipmentRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ShipmentResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let admin = depot.admin_or_401()?;
    let order = order.into_inner();

    let booked = state
        .app
        .shipping
        .create_shipment(order.into(), json.into_inner().service_level_code)
        .await
        .map_err(|error| into_status_error(error, state.expose_error_details))?;

    if booked.persisted {
        info!(
            order_uuid = %order,
            tracking_reference = %booked.shipment.tracking_reference,
            admin = %admin.name,
            "booked shipment"
        );
    } else {
        warn!(
            order_uuid = %order,
            tracking_reference = %booked.shipment.tracking_reference,
            "booked shipment but could not save tracking details on the order"
        );
    }

    res.status_code(StatusCode::CREATED);

    Ok(Json(booked.into()))
}
