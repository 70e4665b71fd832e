pub mod query;
pub mod visitor;

pub use query::*;
pub use visitor::*;
