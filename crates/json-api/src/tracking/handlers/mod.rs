//! Tracking Handlers

pub(crate) mod get;
