//! Customer Orders Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    extensions::*,
    orders::{errors::into_status_error, models::OrdersResponse},
    state::State,
};

/// Customer Orders Handler
#[endpoint(
    tags("orders"),
    summary = "List Orders for a Customer Email",
    responses(
        (status_code = StatusCode::OK, description = "Orders, newest first"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing email"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    email: QueryParam<String, true>,
    depot: &mut Depot,
) -> Result<Json<OrdersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let email = email.into_inner();

    if email.trim().is_empty() {
        return Err(StatusError::bad_request().brief("An email address is required"));
    }

    let orders = state
        .app
        .orders
        .list_orders_by_email(&email)
        .await
        .map_err(into_status_error)?;

    Ok(Json(orders.into_iter().collect()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use taper_app::domain::orders::MockOrdersService;

    use crate::test_helpers::{TestServices, make_order};

    use super::*;

    fn make_service(orders: MockOrdersService) -> Service {
        TestServices {
            orders,
            ..TestServices::default()
        }
        .service(Router::with_path("orders").get(handler))
    }

    #[tokio::test]
    async fn test_orders_for_email() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_list_orders_by_email()
            .once()
            .withf(|email| email == "thandi@example.com")
            .return_once(|_| Ok(vec![make_order("UMI-000002-0002"), make_order("UMI-000001-0001")]));

        let mut res = TestClient::get("http://example.com/orders?email=thandi@example.com")
            .send(&make_service(orders))
            .await;

        let body: OrdersResponse = res.take_json().await?;
        let numbers: Vec<_> = body
            .orders
            .iter()
            .map(|order| order.order_number.as_str())
            .collect();

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(numbers, ["UMI-000002-0002", "UMI-000001-0001"]);

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_email_returns_400() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_list_orders_by_email().never();

        let res = TestClient::get("http://example.com/orders")
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_blank_email_returns_400() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_list_orders_by_email().never();

        let res = TestClient::get("http://example.com/orders?email=%20")
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
