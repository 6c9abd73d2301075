pub mod error;
pub mod parameters;

pub use error::*;
pub use parameters::*;
