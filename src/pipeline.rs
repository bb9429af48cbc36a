//! Token stream to storage rows in one call

use crate::condition::Condition;
use crate::config::ParserConfig;
use crate::error::Result;
use crate::rows::{encode_rows, EncodedRows};
use crate::tree::{assign_bounds, build_tree_with, flatten_tree};

/// Rows ready for storage plus the normalized tokens to redisplay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoding {
    pub rows: EncodedRows,
    pub conditions: Vec<Condition>,
}

/// Build, index, check and encode `tokens`.
///
/// The tree shape is checked by flattening before any rows are produced,
/// so a failure here leaves nothing half-encoded.
pub fn encode_conditions(tokens: &[Condition], config: &ParserConfig) -> Result<Encoding> {
    let mut tree = build_tree_with(tokens, config)?;
    assign_bounds(&mut tree);

    let conditions = flatten_tree(&tree)?;
    let rows = encode_rows(&tree)?;

    Ok(Encoding { rows, conditions })
}
