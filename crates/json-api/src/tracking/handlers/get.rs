//! Track Shipment Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    extensions::*,
    state::State,
    tracking::{errors::into_status_error, models::TrackingReport},
};

/// Track Shipment Handler
#[endpoint(
    tags("tracking"),
    summary = "Track Shipment",
    responses(
        (status_code = StatusCode::OK, description = "Shipment progress"),
        (status_code = StatusCode::BAD_REQUEST, description = "Blank tracking reference"),
        (status_code = StatusCode::NOT_FOUND, description = "No shipment for this reference"),
        (status_code = StatusCode::BAD_GATEWAY, description = "Shipping provider failed"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Shipping provider is not configured"),
    ),
)]
pub(crate) async fn handler(
    reference: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<TrackingReport>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let report = state
        .app
        .tracking
        .track(&reference.into_inner())
        .await
        .map_err(|error| into_status_error(error, state.expose_error_details))?;

    Ok(Json(report.into()))
}
