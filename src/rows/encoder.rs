//! Indexed tree to storage rows

use serde::{Deserialize, Serialize};

use crate::condition::Condition;
use crate::error::{LogicTreeError, Result, RowKind};
use crate::tree::TreeNode;

/// Stored form of an equality leaf
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EqualityRow {
    pub field: String,
    pub operator: String,
    pub value: String,
    pub left: u32,
    pub right: u32,
}

/// Stored form of a logic branch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogicRow {
    pub operator: String,
    pub left: u32,
    pub right: u32,
}

/// The two row lists a tree is stored as
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedRows {
    pub equality: Vec<EqualityRow>,
    pub logic: Vec<LogicRow>,
}

impl EncodedRows {
    pub fn len(&self) -> usize {
        self.equality.len() + self.logic.len()
    }

    pub fn is_empty(&self) -> bool {
        self.equality.is_empty() && self.logic.is_empty()
    }
}

/// Encode an indexed tree into equality and logic rows.
///
/// Children are emitted before their parent. Both lists must end up
/// non-empty: a tree with no equality leaves or no logic branches is
/// reported as [`LogicTreeError::EmptyEncoding`].
pub fn encode_rows(root: &TreeNode) -> Result<EncodedRows> {
    if !root.is_indexed() {
        return Err(LogicTreeError::MissingBounds);
    }

    let mut rows = EncodedRows::default();
    encode_into(root, &mut rows);

    if rows.equality.is_empty() {
        return Err(LogicTreeError::EmptyEncoding(RowKind::Equality));
    }
    if rows.logic.is_empty() {
        return Err(LogicTreeError::EmptyEncoding(RowKind::Logic));
    }

    log::debug!(
        "encoded {} equality rows and {} logic rows",
        rows.equality.len(),
        rows.logic.len()
    );
    Ok(rows)
}

fn encode_into(node: &TreeNode, rows: &mut EncodedRows) {
    for child in &node.children {
        encode_into(child, rows);
    }

    match &node.payload {
        Condition::Equality(eq) => rows.equality.push(EqualityRow {
            field: eq.field.clone(),
            operator: eq.operator.clone(),
            value: eq.value.clone(),
            left: node.left,
            right: node.right,
        }),
        Condition::Logic(logic) => rows.logic.push(LogicRow {
            operator: logic.operator.clone(),
            left: node.left,
            right: node.right,
        }),
        Condition::Scope(marker) => {
            log::warn!(
                "skipping scope marker {:?} at ({}, {})",
                marker.as_str(),
                node.left,
                node.right
            );
        }
    }
}
