//! Tickler task scheduler - integration test support.
//!
//! This crate re-exports the workspace crates so integration tests reach every
//! layer through `tickler_test::` paths.

pub mod component {
    pub use tickler_service::{auth, error, task};

    pub mod config {
        pub use tickler_app::config::ConfigHandler;
        pub use tickler_core::config::*;
    }

    pub mod constants {
        pub use tickler_core::constants::*;
    }

    pub mod db {
        pub use tickler_db::db::*;
        pub use tickler_db::model;
    }

    pub mod rule {
        pub use tickler_rule::*;
    }
}

pub mod app {
    pub use tickler_app::*;
}
