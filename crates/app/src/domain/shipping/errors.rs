//! Shipping service errors.

use thiserror::Error;

use crate::{
    domain::orders::OrdersServiceError,
    shiplogic::{ProviderErrorKind, ShiplogicError, validation::ValidationError},
};

#[derive(Debug, Error)]
pub enum ShippingServiceError {
    #[error("shipping provider is not configured")]
    Configuration,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("shipping provider request failed: {detail}")]
    Provider {
        kind: ProviderErrorKind,
        detail: String,
    },

    #[error("order not found")]
    OrderNotFound,

    #[error("order already shipped with tracking number {tracking_number}")]
    AlreadyShipped { tracking_number: String },

    #[error("a shipment is already being booked for this order")]
    ShipmentInProgress,

    #[error("provider shipment {provider_id} does not belong to this order")]
    ShipmentMismatch { provider_id: i64 },

    #[error("order lookup failed")]
    Orders(#[source] OrdersServiceError),
}

impl ShippingServiceError {
    /// Message safe to show to customers.
    pub fn user_message(&self) -> String {
        match self {
            Self::Configuration => {
                "Shipping is temporarily unavailable. Please contact support.".to_string()
            }
            Self::Validation(error) => error.to_string(),
            Self::Provider { kind, .. } => kind.user_message().to_string(),
            Self::OrderNotFound => "Order not found.".to_string(),
            Self::AlreadyShipped { .. } => {
                "A shipment has already been created for this order.".to_string()
            }
            Self::ShipmentInProgress => {
                "A shipment is already being created for this order.".to_string()
            }
            Self::ShipmentMismatch { .. } => {
                "That shipment was booked for a different order.".to_string()
            }
            Self::Orders(_) => "We couldn't load this order. Please try again later.".to_string(),
        }
    }

    /// Raw failure detail for development builds.
    pub fn debug_detail(&self) -> Option<String> {
        match self {
            Self::Provider { detail, .. } => Some(detail.clone()),
            Self::Orders(source) => Some(format!("{source:?}")),
            _ => None,
        }
    }
}

impl From<ShiplogicError> for ShippingServiceError {
    fn from(error: ShiplogicError) -> Self {
        match error {
            ShiplogicError::MissingCredentials => Self::Configuration,
            ShiplogicError::Validation(error) => Self::Validation(error),
            other => Self::Provider {
                kind: other.kind().unwrap_or(ProviderErrorKind::Unknown),
                detail: other.to_string(),
            },
        }
    }
}

impl From<OrdersServiceError> for ShippingServiceError {
    fn from(error: OrdersServiceError) -> Self {
        match error {
            OrdersServiceError::NotFound => Self::OrderNotFound,
            OrdersServiceError::ShipmentClaimed {
                tracking_number: Some(tracking_number),
            } => Self::AlreadyShipped { tracking_number },
            OrdersServiceError::ShipmentClaimed {
                tracking_number: None,
            } => Self::ShipmentInProgress,
            other => Self::Orders(other),
        }
    }
}
