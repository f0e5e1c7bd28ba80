//! Tracking

pub mod errors;
pub mod service;

pub use errors::TrackingServiceError;
pub use service::*;
