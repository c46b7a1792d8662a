mod command;
pub mod consolidate;
pub mod fixtures;
mod model;
mod repository;

pub use command::*;
pub use model::*;
pub use repository::*;
