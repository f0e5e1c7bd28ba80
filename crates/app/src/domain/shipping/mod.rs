//! Shipping

pub mod errors;
pub mod rates;
pub mod requests;
pub mod service;

pub use errors::ShippingServiceError;
pub use service::*;
