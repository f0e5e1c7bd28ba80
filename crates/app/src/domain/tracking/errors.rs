//! Tracking service errors.

use thiserror::Error;

use crate::shiplogic::{ProviderErrorKind, ShiplogicError, validation::ValidationError};

#[derive(Debug, Error)]
pub enum TrackingServiceError {
    #[error("shipping provider is not configured")]
    Configuration,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("no shipment found for tracking reference {0}")]
    NotFound(String),

    #[error("shipping provider request failed: {detail}")]
    Provider {
        kind: ProviderErrorKind,
        detail: String,
    },
}

impl TrackingServiceError {
    /// Message safe to show to customers.
    pub fn user_message(&self) -> String {
        match self {
            Self::Configuration => {
                "Tracking is temporarily unavailable. Please contact support.".to_string()
            }
            Self::Validation(error) => error.to_string(),
            Self::NotFound(_) => {
                "We couldn't find a shipment with that tracking number. Please check it and try again."
                    .to_string()
            }
            Self::Provider { kind, .. } => kind.user_message().to_string(),
        }
    }

    /// Raw failure detail for development builds.
    pub fn debug_detail(&self) -> Option<String> {
        match self {
            Self::Provider { detail, .. } => Some(detail.clone()),
            _ => None,
        }
    }

    pub(crate) fn from_provider(reference: &str, error: ShiplogicError) -> Self {
        match error {
            ShiplogicError::MissingCredentials => Self::Configuration,
            ShiplogicError::Validation(error) => Self::Validation(error),
            other => match other.kind() {
                Some(ProviderErrorKind::NotFound) => Self::NotFound(reference.to_string()),
                kind => Self::Provider {
                    kind: kind.unwrap_or(ProviderErrorKind::Unknown),
                    detail: other.to_string(),
                },
            },
        }
    }
}
