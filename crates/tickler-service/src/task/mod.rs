//! Task lifecycle.
//!
//! - `draft`: validation of client-submitted fields
//! - `search`: interpretation of the list search box
//! - `service`: create, read, update, delete, list and complete

pub mod draft;
pub mod search;
pub mod service;

pub use draft::{TaskDraft, TaskId, prepare_new_task, prepare_task_update};
pub use search::TaskFilter;
pub use service::{
    Completion, complete_task, create_task, delete_task, get_task, list_tasks, update_task,
};
