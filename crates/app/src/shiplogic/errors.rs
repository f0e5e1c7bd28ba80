//! Shiplogic client errors.

use reqwest::StatusCode;
use thiserror::Error;

use crate::shiplogic::validation::ValidationError;

#[derive(Debug, Error)]
pub enum ShiplogicError {
    #[error("shipping provider API key is not configured")]
    MissingCredentials,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("shipping provider returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("shipping provider request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("shipping provider returned an invalid response: {0}")]
    Decode(#[source] serde_json::Error),
}

/// User-facing category of a provider failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    Authentication,
    BadRequest,
    NotFound,
    Server,
    Unknown,
}

impl ProviderErrorKind {
    /// Classify a failure from its status code, falling back to the wording of its message.
    pub fn classify(status: Option<StatusCode>, message: &str) -> Self {
        match status {
            Some(StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) => Self::Authentication,
            Some(StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY) => Self::BadRequest,
            Some(StatusCode::NOT_FOUND) => Self::NotFound,
            Some(status) if status.is_server_error() => Self::Server,
            _ => Self::from_message(message),
        }
    }

    fn from_message(message: &str) -> Self {
        let message = message.to_ascii_lowercase();
        let mentions = |needles: &[&str]| needles.iter().any(|needle| message.contains(needle));

        if mentions(&["unauthorized", "unauthorised", "forbidden", "authentication"]) {
            Self::Authentication
        } else if mentions(&["bad request", "invalid address", "invalid"]) {
            Self::BadRequest
        } else if mentions(&["not found"]) {
            Self::NotFound
        } else if mentions(&["server error", "unavailable", "timed out", "timeout"]) {
            Self::Server
        } else {
            Self::Unknown
        }
    }

    /// Message safe to show to customers.
    pub fn user_message(self) -> &'static str {
        match self {
            Self::Authentication => {
                "Our shipping service is temporarily unavailable. Please contact support."
            }
            Self::BadRequest => {
                "We couldn't calculate shipping for this address. Please check your address details and try again."
            }
            Self::NotFound => "The requested shipping information could not be found.",
            Self::Server => {
                "Our shipping partner is experiencing problems. Please try again later."
            }
            Self::Unknown => {
                "We're having trouble calculating shipping rates at the moment. Please try again later or contact support."
            }
        }
    }
}

impl ShiplogicError {
    /// Whether the client is missing its credentials.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::MissingCredentials)
    }

    /// Whether the request was rejected before submission.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Category of a provider or network failure. `None` for configuration and validation
    /// errors, which never reach the provider.
    pub fn kind(&self) -> Option<ProviderErrorKind> {
        match self {
            Self::MissingCredentials | Self::Validation(_) => None,
            Self::Status { status, body } => Some(ProviderErrorKind::classify(Some(*status), body)),
            Self::Http(source) if source.is_timeout() || source.is_connect() => {
                Some(ProviderErrorKind::Server)
            }
            Self::Http(source) => Some(ProviderErrorKind::classify(
                source.status(),
                &source.to_string(),
            )),
            Self::Decode(_) => Some(ProviderErrorKind::Unknown),
        }
    }
}
