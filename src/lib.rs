//! Line-oriented CSV reading, cell access and row searching.

pub mod process;
pub mod types;
