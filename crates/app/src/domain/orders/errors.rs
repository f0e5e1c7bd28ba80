//! Orders service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use taper::orders::{OrderStatus, OrderTotalsError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("order already exists")]
    AlreadyExists,

    #[error("order not found")]
    NotFound,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("order cannot move from {from} to {to}")]
    TransitionNotAllowed { from: OrderStatus, to: OrderStatus },

    /// The order already has a shipment, or another booking holds it.
    #[error("order shipment is already booked or being booked")]
    ShipmentClaimed { tracking_number: Option<String> },

    #[error("invalid order totals")]
    InvalidTotals(#[from] OrderTotalsError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl OrdersServiceError {
    /// Whether the failure came from the storage layer rather than the order itself.
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Sql(_))
    }
}

impl From<Error> for OrdersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
