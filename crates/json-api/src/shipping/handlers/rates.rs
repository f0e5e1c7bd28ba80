//! Quote Rates Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};
use tracing::info;

use crate::{
    extensions::*,
    shipping::{
        errors::into_status_error,
        models::{RatesRequest, RatesResponse},
    },
    state::State,
};

/// Quote Rates Handler
#[endpoint(
    tags("shipping"),
    summary = "Quote Shipping Rates",
    responses(
        (status_code = StatusCode::OK, description = "Rates, falling back to flat tiers when the provider has none"),
        (status_code = StatusCode::BAD_REQUEST, description = "Address or parcel is incomplete"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Shipping provider is not configured"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<RatesRequest>,
    depot: &mut Depot,
) -> Result<Json<RatesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();
    let cart = request.cart_lines();

    let selection = state
        .app
        .shipping
        .quote_rates(request.destination.into(), cart)
        .await
        .map_err(|error| into_status_error(error, state.expose_error_details))?;

    info!(
        quotes = selection.quotes.len(),
        fallback = selection.is_fallback(),
        "quoted shipping rates"
    );

    Ok(Json(selection.into()))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use taper::rates::RateSelection;
    use taper_app::{
        domain::shipping::{MockShippingService, ShippingServiceError},
        shiplogic::validation::{AddressRole, ValidationError},
    };

    use crate::{
        shipping::models::RateSourceBody,
        test_helpers::{TestServices, destination},
    };

    use super::*;

    fn make_service(shipping: MockShippingService) -> Service {
        TestServices {
            shipping,
            ..TestServices::default()
        }
        .service(Router::with_path("shipping/rates").post(handler))
    }

    fn body() -> serde_json::Value {
        json!({
            "destination": {
                "street_address": "1 Main Rd",
                "city": "Cape Town",
                "country": "South Africa",
                "postal_code": "8001"
            },
            "items": [{ "product_id": "P1", "quantity": 2 }]
        })
    }

    #[tokio::test]
    async fn test_rates_are_quoted_for_cart() -> TestResult {
        let mut shipping = MockShippingService::new();

        shipping
            .expect_quote_rates()
            .once()
            .withf(|to, cart| {
                *to == destination()
                    && cart.len() == 1
                    && cart
                        .first()
                        .is_some_and(|line| line.product_id.as_str() == "P1" && line.quantity.get() == 2)
            })
            .return_once(|_, _| Ok(RateSelection::fallback(Timestamp::UNIX_EPOCH)));

        let mut res = TestClient::post("http://example.com/shipping/rates")
            .json(&body())
            .send(&make_service(shipping))
            .await;

        let rates: RatesResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(rates.source, RateSourceBody::Fallback);
        assert_eq!(rates.quotes.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_validation_error_returns_400() -> TestResult {
        let mut shipping = MockShippingService::new();

        shipping.expect_quote_rates().once().return_once(|_, _| {
            Err(ShippingServiceError::Validation(
                ValidationError::MissingAddressField {
                    role: AddressRole::Delivery,
                    field: taper::addresses::AddressField::City,
                },
            ))
        });

        let res = TestClient::post("http://example.com/shipping/rates")
            .json(&body())
            .send(&make_service(shipping))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_configuration_returns_503() -> TestResult {
        let mut shipping = MockShippingService::new();

        shipping
            .expect_quote_rates()
            .once()
            .return_once(|_, _| Err(ShippingServiceError::Configuration));

        let res = TestClient::post("http://example.com/shipping/rates")
            .json(&body())
            .send(&make_service(shipping))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::SERVICE_UNAVAILABLE));

        Ok(())
    }
}
