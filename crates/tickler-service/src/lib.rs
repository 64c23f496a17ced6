//! Task lifecycle and single-user authentication.

pub mod auth;
pub mod error;
pub mod task;
