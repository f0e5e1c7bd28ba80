//! Taper
//!
//! Taper is the shipping and order domain of a direct-to-consumer candle storefront: parcel
//! aggregation, rate quotes, addresses and the order lifecycle.

pub mod addresses;
pub mod catalog;
pub mod countries;
pub mod money;
pub mod orders;
pub mod parcels;
pub mod prelude;
pub mod rates;
pub mod shipments;
