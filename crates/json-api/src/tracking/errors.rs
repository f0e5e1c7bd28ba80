//! Errors

use salvo::http::StatusError;
use tracing::{error, warn};

use taper_app::domain::tracking::TrackingServiceError;

pub(crate) fn into_status_error(error: TrackingServiceError, expose_details: bool) -> StatusError {
    let brief = error.user_message();
    let detail = error.debug_detail();

    let status = match &error {
        TrackingServiceError::Configuration => {
            error!("shipping provider is not configured");

            StatusError::service_unavailable()
        }
        TrackingServiceError::Validation(_) => StatusError::bad_request(),
        TrackingServiceError::NotFound(_) => StatusError::not_found(),
        TrackingServiceError::Provider { kind, detail } => {
            warn!(?kind, %detail, "tracking lookup failed");

            StatusError::bad_gateway()
        }
    };

    let status = status.brief(brief);

    match detail {
        Some(detail) if expose_details => status.detail(detail),
        _ => status,
    }
}
