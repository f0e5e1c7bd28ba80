//! Storefront Domain Concerns

pub mod orders;
pub mod shipping;
pub mod tracking;
