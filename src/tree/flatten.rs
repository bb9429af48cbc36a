//! Expression tree back to a flat token stream

use crate::condition::{Condition, ConditionKind};
use crate::error::{LogicTreeError, Result};
use crate::tree::node::TreeNode;

/// Serialize `root` into tokens, one scope pair per branch.
///
/// Leaves must carry equality payloads and branches logic payloads; the
/// first violation found aborts with no partial output.
pub fn flatten_tree(root: &TreeNode) -> Result<Vec<Condition>> {
    let mut out = Vec::with_capacity(root.node_count() * 2);
    flatten_into(root, &mut out)?;
    log::debug!("flattened {} nodes into {} tokens", root.node_count(), out.len());
    Ok(out)
}

fn flatten_into(node: &TreeNode, out: &mut Vec<Condition>) -> Result<()> {
    if node.is_leaf() {
        if node.kind() != ConditionKind::Equality {
            return Err(LogicTreeError::LeafTypeMismatch);
        }
        out.push(node.payload.clone());
        return Ok(());
    }

    if node.kind() != ConditionKind::Logic {
        return Err(LogicTreeError::BranchTypeMismatch);
    }

    out.push(Condition::open());
    for (i, child) in node.children.iter().enumerate() {
        if i != 0 {
            out.push(node.payload.clone());
        }
        flatten_into(child, out)?;
    }
    out.push(Condition::close());

    Ok(())
}
