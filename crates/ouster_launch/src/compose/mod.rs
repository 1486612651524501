//! Launch graph composition

pub mod arguments;
pub mod conditional;
pub mod error;
pub mod parameters;
pub mod plan;
pub mod sensor;
pub mod units;

pub use arguments::*;
pub use conditional::*;
pub use error::*;
pub use parameters::*;
pub use plan::*;
pub use sensor::*;
pub use units::*;
