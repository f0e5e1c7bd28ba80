//! List Customers Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use taper_app::domain::orders::data::PageRequest;

use crate::{
    customers::models::CustomersPageResponse, extensions::*, orders::errors::into_status_error,
    state::State,
};

/// List Customers Handler
///
/// Customers are grouped by email address, ignoring case.
#[endpoint(
    tags("admin"),
    summary = "List Customers",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "A page of customers, most recently active first"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    page: QueryParam<u32, false>,
    limit: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<CustomersPageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    depot.admin_or_401()?;

    let customers = state
        .app
        .orders
        .list_customers(PageRequest::new(page.into_inner(), limit.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(customers.into()))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use taper_app::domain::orders::{
        MockOrdersService,
        records::{CustomerSummary, Page},
    };

    use crate::test_helpers::{TestServices, make_order};

    use super::*;

    fn make_service(orders: MockOrdersService) -> Service {
        TestServices {
            orders,
            ..TestServices::default()
        }
        .admin_service(Router::with_path("admin/customers").get(handler))
    }

    #[tokio::test]
    async fn test_list_customers() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_list_customers()
            .once()
            .withf(|page| page.page() == 2 && page.limit() == 5)
            .return_once(|page| {
                Ok(Page {
                    items: vec![CustomerSummary {
                        customer: make_order("UMI-000001-0001").customer,
                        order_count: 3,
                        first_order_at: Timestamp::UNIX_EPOCH,
                        last_order_at: Timestamp::UNIX_EPOCH,
                    }],
                    total: 6,
                    page: page.page(),
                    limit: page.limit(),
                })
            });

        let mut res = TestClient::get("http://example.com/admin/customers?page=2&limit=5")
            .send(&make_service(orders))
            .await;

        let body: CustomersPageResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.total, 6);
        assert_eq!(
            body.customers
                .first()
                .map(|summary| (summary.customer.email.as_str(), summary.order_count)),
            Some(("thandi@example.com", 3))
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_without_admin_returns_401() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_list_customers().never();

        let service = TestServices {
            orders,
            ..TestServices::default()
        }
        .service(Router::with_path("admin/customers").get(handler));

        let res = TestClient::get("http://example.com/admin/customers")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
