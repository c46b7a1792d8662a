mod command;
mod date;
pub mod format;
pub mod mealplan;
pub mod memory;
pub mod recipe;
pub mod wire;

pub use command::*;
pub use date::*;

/// Record identifier assigned by the storage backend.
pub type Id = i64;
