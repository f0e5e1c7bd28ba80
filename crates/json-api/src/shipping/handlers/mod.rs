//! Shipping Handlers

pub(crate) mod rates;
