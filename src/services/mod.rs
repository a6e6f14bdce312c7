//! Business logic services.

pub mod auth;
pub mod stats_api;
pub mod users;
