//! Logic Tree Core - boolean condition trees in nested-set form
//!
//! This crate turns a flat, parenthesized sequence of condition tokens into
//! an expression tree, numbers the tree with nested-set bounds, and encodes
//! it as equality and logic rows for bulk loading. Trees can be flattened
//! back into tokens for display, and stored rows decoded back into trees.
//!
//! With the `python` feature the crate builds as a Python extension module.

pub mod condition;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod rows;
pub mod store;
pub mod tree;

#[cfg(feature = "python")]
mod python;

pub use crate::condition::{Condition, ConditionKind, ScopeMarker};
pub use crate::config::{ParseMode, ParserConfig};
pub use crate::error::{LogicTreeError, Result, RowKind};
pub use crate::pipeline::{encode_conditions, Encoding};
pub use crate::rows::{decode_rows, encode_rows, EncodedRows, EqualityRow, LogicRow};
pub use crate::store::RuleStore;
pub use crate::tree::{assign_bounds, build_tree, build_tree_with, flatten_tree, TreeNode};
