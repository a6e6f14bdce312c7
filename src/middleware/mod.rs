//! Request extractors: session state, login guard and CSRF-checked forms.

pub mod auth;
pub mod csrf;
pub mod session;
