pub mod config;
pub mod engines;
pub mod error;
pub mod types;

pub use engines::generation::{GpContext, Individual, IndividualType, MutationType};
pub use error::{GpError, Result};
