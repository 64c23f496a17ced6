pub mod core;
pub mod evaluate;
pub mod parse;
