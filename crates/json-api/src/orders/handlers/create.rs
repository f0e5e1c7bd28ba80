//! Place Order Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use taper_app::domain::orders::{
    data::{NewOrder, OrderDetails},
    outbox::PlacedOrder,
};

use crate::{
    extensions::*,
    orders::{
        errors::{checkout_status_error, into_status_error},
        models::{CreateOrderRequest, OrderResponse},
    },
    state::State,
};

/// Whether the order reached the database or waits in the outbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Placement {
    Stored,
    Queued,
}

/// Order Placed Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderPlacedResponse {
    pub order_number: String,
    pub placement: Placement,

    /// The stored order, absent while queued
    pub order: Option<OrderResponse>,
}

/// Place Order Handler
#[endpoint(
    tags("orders"),
    summary = "Place Order",
    responses(
        (status_code = StatusCode::CREATED, description = "Order stored"),
        (status_code = StatusCode::ACCEPTED, description = "Order queued for storage"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::CONFLICT, description = "Order already exists"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Order could not be saved"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderPlacedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let details: OrderDetails = json
        .into_inner()
        .try_into()
        .or_400("Invalid order payload")?;

    let order = NewOrder::from_details(details, Timestamp::now())
        .map_err(|source| into_status_error(source.into()))?;

    let placed = state
        .app
        .checkout
        .place_order(order)
        .await
        .map_err(checkout_status_error)?;

    let order_number = placed.order_number().to_string();

    info!(order_number = %order_number, "order placed");

    let response = match placed {
        PlacedOrder::Stored(record) => {
            res.add_header(LOCATION, format!("/orders/{order_number}"), true)
                .or_500("failed to set location header")?
                .status_code(StatusCode::CREATED);

            OrderPlacedResponse {
                order_number,
                placement: Placement::Stored,
                order: Some(OrderResponse::from(*record)),
            }
        }
        PlacedOrder::Queued(_) => {
            res.status_code(StatusCode::ACCEPTED);

            OrderPlacedResponse {
                order_number,
                placement: Placement::Queued,
                order: None,
            }
        }
    };

    Ok(Json(response))
}
