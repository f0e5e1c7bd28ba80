//! Order persistence, shipping provider integration and back-office auth.

pub mod auth;
pub mod context;
pub mod database;
pub mod domain;
pub mod shiplogic;

#[cfg(test)]
mod test;

mod uuids;
