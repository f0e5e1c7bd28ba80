//! App Router

use salvo::Router;

use crate::{admin, auth, customers, healthcheck, orders, shipping, tracking};

pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("shipping/rates").post(shipping::handlers::rates::handler))
        .push(Router::with_path("tracking/{reference}").get(tracking::handlers::get::handler))
        .push(
            Router::with_path("orders")
                .get(orders::handlers::index::handler)
                .post(orders::handlers::create::handler)
                .push(Router::with_path("{number}").get(orders::handlers::get::handler)),
        )
        .push(
            Router::with_path("admin")
                .hoop(auth::middleware::handler)
                .push(
                    Router::with_path("orders")
                        .get(admin::handlers::index::handler)
                        .push(
                            Router::with_path("{order}")
                                .get(admin::handlers::get::handler)
                                .push(
                                    Router::with_path("status")
                                        .put(admin::handlers::status::handler),
                                )
                                .push(
                                    Router::with_path("shipments")
                                        .post(admin::handlers::shipments::handler)
                                        .push(
                                            Router::with_path("{shipment}")
                                                .put(admin::handlers::attach::handler),
                                        ),
                                ),
                        ),
                )
                .push(
                    Router::with_path("customers")
                        .get(customers::handlers::index::handler)
                        .push(Router::with_path("{email}").get(customers::handlers::get::handler)),
                ),
        )
}

#[cfg(test)]
mod tests {
    use salvo::{
        http::{StatusCode, header::AUTHORIZATION},
        prelude::*,
        test::TestClient,
    };
    use testresult::TestResult;

    use taper_app::{
        auth::{AuthServiceError, MockAuthService},
        domain::orders::{MockOrdersService, records::Page},
    };

    use crate::test_helpers::{TestServices, admin_identity, make_order};

    use super::*;

    #[tokio::test]
    async fn test_admin_routes_require_a_token() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_list_orders().never();

        let service = TestServices {
            orders,
            ..TestServices::default()
        }
        .service(app_router());

        let res = TestClient::get("http://example.com/admin/orders")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_revoked_token_is_rejected() -> TestResult {
        let mut auth = MockAuthService::new();
        let mut orders = MockOrdersService::new();

        auth.expect_authenticate_bearer()
            .once()
            .return_once(|_| Err(AuthServiceError::NotFound));
        orders.expect_list_orders().never();

        let service = TestServices {
            orders,
            auth,
            ..TestServices::default()
        }
        .service(app_router());

        let res = TestClient::get("http://example.com/admin/orders")
            .add_header(AUTHORIZATION, "Bearer tpr_revoked", true)
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_authenticated_admin_reaches_orders() -> TestResult {
        let mut auth = MockAuthService::new();
        let mut orders = MockOrdersService::new();

        auth.expect_authenticate_bearer()
            .once()
            .return_once(|_| Ok(admin_identity()));
        orders
            .expect_list_orders()
            .once()
            .return_once(|page, _| {
                Ok(Page {
                    items: vec![make_order("UMI-000001-0001")],
                    total: 1,
                    page: page.page(),
                    limit: page.limit(),
                })
            });

        let service = TestServices {
            orders,
            auth,
            ..TestServices::default()
        }
        .service(app_router());

        let res = TestClient::get("http://example.com/admin/orders")
            .add_header(AUTHORIZATION, "Bearer tpr_valid", true)
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_public_order_lookup_needs_no_token() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_get_order_by_number()
            .once()
            .return_once(|number| Ok(make_order(number)));

        let service = TestServices {
            orders,
            ..TestServices::default()
        }
        .service(app_router());

        let res = TestClient::get("http://example.com/orders/UMI-000001-0001")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }
}
