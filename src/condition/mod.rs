//! Condition tokens and their external forms
//!
//! This module defines the flat token language (scope markers, logic
//! operators, equality comparisons), its JSON wire format and the
//! space-separated display text.

mod ast;
mod lexer;
pub mod wire;

pub use ast::*;
pub use lexer::*;
pub use wire::{conditions_to_json, parse_conditions_json, WireCondition};
