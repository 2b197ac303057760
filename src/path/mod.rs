pub mod dir;
pub mod expander;

pub use dir::{change_dir, ChdirError};
pub use expander::{is_pattern, PathExpander};
