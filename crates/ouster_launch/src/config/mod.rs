//! Composition configuration and substitution

mod composition;
mod substitution;

pub use composition::*;
pub use substitution::*;
