//! Storage rows back to a tree
//!
//! Rows are merged, ordered by `left`, and re-nested by interval
//! containment. The decoded tree keeps the stored bounds.

use smallvec::SmallVec;

use crate::condition::{Condition, ConditionKind};
use crate::error::{LogicTreeError, Result};
use crate::rows::encoder::EncodedRows;
use crate::tree::{TreeNode, UNSET_BOUND};

/// Rebuild the tree that `rows` encode
pub fn decode_rows(rows: &EncodedRows) -> Result<TreeNode> {
    let mut nodes: Vec<TreeNode> = Vec::with_capacity(rows.len());

    for row in &rows.equality {
        let mut node = TreeNode::leaf(Condition::equality(
            row.field.as_str(),
            row.operator.as_str(),
            row.value.as_str(),
        ));
        node.left = row.left;
        node.right = row.right;
        nodes.push(node);
    }
    for row in &rows.logic {
        let mut node = TreeNode::leaf(Condition::logic(row.operator.as_str()));
        node.left = row.left;
        node.right = row.right;
        nodes.push(node);
    }

    for node in &nodes {
        if node.left == UNSET_BOUND || node.left >= node.right {
            return Err(LogicTreeError::MalformedRows(format!(
                "Invalid bounds ({}, {}) on {:?}",
                node.left,
                node.right,
                node.payload.text()
            )));
        }
    }

    nodes.sort_by_key(|node| node.left);
    if let Some(pair) = nodes.windows(2).find(|pair| pair[0].left == pair[1].left) {
        return Err(LogicTreeError::MalformedRows(format!(
            "Duplicate left bound {}",
            pair[0].left
        )));
    }

    let mut stack: SmallVec<[TreeNode; 16]> = SmallVec::new();
    let mut root: Option<TreeNode> = None;

    for node in nodes {
        while stack.last().is_some_and(|top| top.right < node.left) {
            close_top(&mut stack, &mut root)?;
        }

        match stack.last() {
            Some(top) if node.right >= top.right => {
                return Err(LogicTreeError::MalformedRows(format!(
                    "Row ({}, {}) overlaps ({}, {})",
                    node.left, node.right, top.left, top.right
                )));
            }
            None if root.is_some() => {
                return Err(LogicTreeError::MalformedRows(format!(
                    "Second root at ({}, {})",
                    node.left, node.right
                )));
            }
            _ => {}
        }

        stack.push(node);
    }

    while !stack.is_empty() {
        close_top(&mut stack, &mut root)?;
    }

    let root = root.ok_or_else(|| LogicTreeError::MalformedRows("No rows".to_string()))?;
    log::debug!("decoded tree of {} nodes from rows", root.node_count());
    Ok(root)
}

/// Pop the finished node on top of the stack into its parent, or into `root`
fn close_top(stack: &mut SmallVec<[TreeNode; 16]>, root: &mut Option<TreeNode>) -> Result<()> {
    let Some(node) = stack.pop() else {
        return Ok(());
    };

    match stack.last_mut() {
        Some(parent) => {
            if parent.kind() == ConditionKind::Equality {
                return Err(LogicTreeError::MalformedRows(format!(
                    "Equality row ({}, {}) contains ({}, {})",
                    parent.left, parent.right, node.left, node.right
                )));
            }
            parent.children.push(node);
        }
        None => *root = Some(node),
    }
    Ok(())
}
