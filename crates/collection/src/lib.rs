mod command;
pub mod fixtures;
mod folder;
mod query;
mod saved;

pub use command::*;
pub use folder::*;
pub use query::*;
pub use saved::*;
