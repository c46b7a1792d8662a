pub mod calendar;
mod command;
pub mod fixtures;
mod model;
mod query;
mod repository;

pub use command::*;
pub use model::*;
pub use query::*;
pub use repository::*;
