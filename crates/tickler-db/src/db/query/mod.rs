pub mod task;
pub mod text_match;
