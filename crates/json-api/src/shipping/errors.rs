//! Errors

use salvo::http::StatusError;
use tracing::{error, warn};

use taper_app::{domain::shipping::ShippingServiceError, shiplogic::ProviderErrorKind};

/// Map a shipping failure to a response. Raw provider details are only attached when
/// `expose_details` is set.
pub(crate) fn into_status_error(error: ShippingServiceError, expose_details: bool) -> StatusError {
    let brief = error.user_message();
    let detail = error.debug_detail();

    let status = match &error {
        ShippingServiceError::Configuration => {
            error!("shipping provider is not configured");

            StatusError::service_unavailable()
        }
        ShippingServiceError::Validation(_) => StatusError::bad_request(),
        ShippingServiceError::OrderNotFound => StatusError::not_found(),
        ShippingServiceError::AlreadyShipped { .. }
        | ShippingServiceError::ShipmentInProgress
        | ShippingServiceError::ShipmentMismatch { .. } => StatusError::conflict(),
        ShippingServiceError::Provider { kind, detail } => {
            warn!(?kind, %detail, "shipping provider request failed");

            match kind {
                ProviderErrorKind::BadRequest => StatusError::unprocessable_entity(),
                ProviderErrorKind::NotFound => StatusError::not_found(),
                ProviderErrorKind::Authentication
                | ProviderErrorKind::Server
                | ProviderErrorKind::Unknown => StatusError::bad_gateway(),
            }
        }
        ShippingServiceError::Orders(source) => {
            error!("order lookup failed while booking shipment: {source}");

            StatusError::internal_server_error()
        }
    };

    let status = status.brief(brief);

    match detail {
        Some(detail) if expose_details => status.detail(detail),
        _ => status,
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;
    use taper_app::shiplogic::validation::ValidationError;

    use super::*;

    fn provider_failure() -> ShippingServiceError {
        ShippingServiceError::Provider {
            kind: ProviderErrorKind::Server,
            detail: "upstream stack trace".to_string(),
        }
    }

    #[test]
    fn configuration_errors_are_unavailable() {
        let status = into_status_error(ShippingServiceError::Configuration, false);

        assert_eq!(status.code, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn validation_errors_carry_their_message() {
        let status = into_status_error(ValidationError::NoParcels.into(), false);

        assert_eq!(status.code, StatusCode::BAD_REQUEST);
        assert_eq!(status.brief, "At least one parcel is required");
    }

    #[test]
    fn provider_details_are_hidden_by_default() {
        let status = into_status_error(provider_failure(), false);

        assert_eq!(status.code, StatusCode::BAD_GATEWAY);
        assert!(status.detail.is_none());
        assert!(!status.brief.contains("stack trace"));
    }

    #[test]
    fn provider_details_can_be_exposed() {
        let status = into_status_error(provider_failure(), true);

        assert_eq!(status.detail.as_deref(), Some("upstream stack trace"));
    }

    #[test]
    fn second_shipments_conflict() {
        let status = into_status_error(
            ShippingServiceError::AlreadyShipped {
                tracking_number: "UMI4X2".to_string(),
            },
            false,
        );

        assert_eq!(status.code, StatusCode::CONFLICT);
    }

    #[test]
    fn bookings_in_flight_conflict() {
        let status = into_status_error(ShippingServiceError::ShipmentInProgress, false);

        assert_eq!(status.code, StatusCode::CONFLICT);
    }
}
