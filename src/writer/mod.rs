pub mod format;
pub mod sql;

pub use sql::*;
