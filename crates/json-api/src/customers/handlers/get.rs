//! Get Customer Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use taper_app::domain::orders::OrdersServiceError;

use crate::{
    customers::models::CustomerResponse, extensions::*, orders::errors::into_status_error,
    state::State,
};

/// Get Customer Handler
#[endpoint(
    tags("admin"),
    summary = "Get Customer with Orders",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Customer and their orders, newest first"),
        (status_code = StatusCode::NOT_FOUND, description = "No orders for this email"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    email: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<CustomerResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    depot.admin_or_401()?;

    let customer = state
        .app
        .orders
        .get_customer(&email.into_inner())
        .await
        .map_err(|error| match error {
            OrdersServiceError::NotFound => StatusError::not_found().brief("Customer not found"),
            other => into_status_error(other),
        })?;

    Ok(Json(customer.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use taper_app::domain::orders::{MockOrdersService, records::CustomerOrders};

    use crate::test_helpers::{TestServices, make_order};

    use super::*;

    fn make_service(orders: MockOrdersService) -> Service {
        TestServices {
            orders,
            ..TestServices::default()
        }
        .admin_service(Router::with_path("admin/customers/{email}").get(handler))
    }

    #[tokio::test]
    async fn test_customer_with_orders() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_get_customer()
            .once()
            .withf(|email| email == "thandi@example.com")
            .return_once(|_| {
                CustomerOrders::from_orders(vec![
                    make_order("UMI-000001-0002"),
                    make_order("UMI-000001-0001"),
                ])
                .ok_or(OrdersServiceError::NotFound)
            });

        let mut res = TestClient::get("http://example.com/admin/customers/thandi@example.com")
            .send(&make_service(orders))
            .await;

        let body: CustomerResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.summary.order_count, 2);
        assert_eq!(body.orders.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_customer_returns_404() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_get_customer()
            .once()
            .return_once(|_| Err(OrdersServiceError::NotFound));

        let res = TestClient::get("http://example.com/admin/customers/nobody@example.com")
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
