//! Expression tree construction, nested-set indexing and serialization
//!
//! Tokens become a [`TreeNode`] tree through [`build_tree`], get their
//! nested-set bounds from [`assign_bounds`], and can be turned back into
//! tokens with [`flatten_tree`].

mod bounds;
mod builder;
mod flatten;
mod node;


pub use bounds::*;
pub use builder::*;
pub use flatten::*;
pub use node::*;
