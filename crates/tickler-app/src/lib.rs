//! HTTP surface of the task scheduler: routes, depot handlers and middleware.

pub mod app;
pub mod config;
pub mod db_handler;
pub mod error;
pub mod middleware;
