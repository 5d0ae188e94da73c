pub mod catalog;
pub mod error;
pub mod executor;

pub use catalog::{CannedQuery, QueryGroup};
pub use executor::execute;
