pub mod catalog;
pub mod tables;
pub mod types;

pub use catalog::*;
pub use tables::*;
pub use types::*;
