//! Storage row encoding
//!
//! An indexed tree is stored as two flat row lists, one per payload kind,
//! each row carrying its node's nested-set bounds.

mod decoder;
mod encoder;

pub use decoder::*;
pub use encoder::*;
