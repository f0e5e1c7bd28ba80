//! Back Office

pub(crate) mod handlers;
