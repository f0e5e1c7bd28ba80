//! Shiplogic
//!
//! Typed client for the Shiplogic v2 courier API.

mod client;
mod config;
mod errors;
pub mod validation;
pub mod wire;

pub use client::*;
pub use config::*;
pub use errors::*;
