//! Errors

use salvo::http::StatusError;
use tracing::error;

use taper_app::domain::orders::{OrdersServiceError, outbox::CheckoutError};

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::AlreadyExists => StatusError::conflict().brief("Order already exists"),
        OrdersServiceError::TransitionNotAllowed { from, to } => {
            StatusError::conflict().brief(format!("Order cannot move from {from} to {to}"))
        }
        OrdersServiceError::ShipmentClaimed { .. } => {
            StatusError::conflict().brief("A shipment has already been booked for this order")
        }
        OrdersServiceError::MissingRequiredData
        | OrdersServiceError::InvalidData
        | OrdersServiceError::InvalidTotals(_) => {
            StatusError::bad_request().brief("Invalid order payload")
        }
        OrdersServiceError::Sql(source) => {
            error!("order storage failed: {source}");

            StatusError::internal_server_error()
        }
    }
}

pub(crate) fn checkout_status_error(error: CheckoutError) -> StatusError {
    match error {
        CheckoutError::Orders(source) => into_status_error(source),
        CheckoutError::Outbox(source) => {
            error!("failed to spool order: {source}");

            StatusError::service_unavailable()
                .brief("We couldn't save your order. Please try again shortly.")
        }
    }
}
