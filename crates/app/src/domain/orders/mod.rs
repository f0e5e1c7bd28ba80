//! Orders

pub mod data;
pub mod errors;
pub mod numbers;
pub mod outbox;
pub mod records;
mod repository;
pub mod service;

pub use errors::OrdersServiceError;
pub use service::*;
