//! SQLite persistence for scheduled tasks.

pub mod db;
pub mod error;
pub mod model;
