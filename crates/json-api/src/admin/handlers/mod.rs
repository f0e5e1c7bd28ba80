//! Back Office Handlers

pub(crate) mod attach;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod shipments;
pub(crate) mod status;
