mod command;
pub mod filter;
pub mod fixtures;
mod model;
mod query;
mod repository;
pub mod review;
pub mod timer;

pub use command::*;
pub use model::*;
pub use query::*;
pub use repository::*;
