//! List Orders Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use taper::orders::OrderStatus;
use taper_app::domain::orders::data::PageRequest;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, models::OrdersPageResponse},
    state::State,
};

/// List Orders Handler
///
/// Pages through all orders, newest first. `limit` is capped at 100.
#[endpoint(
    tags("admin"),
    summary = "List Orders",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "A page of orders, newest first"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status filter"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    page: QueryParam<u32, false>,
    limit: QueryParam<u32, false>,
    status: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<OrdersPageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    depot.admin_or_401()?;

    let status = status
        .into_inner()
        .map(|status| status.parse::<OrderStatus>())
        .transpose()
        .or_400("Unknown order status")?;

    let orders = state
        .app
        .orders
        .list_orders(PageRequest::new(page.into_inner(), limit.into_inner()), status)
        .await
        .map_err(into_status_error)?;

    Ok(Json(orders.into()))
}
