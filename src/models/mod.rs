//! Database models, form DTOs and view state.

pub mod dashboard;
pub mod user;
