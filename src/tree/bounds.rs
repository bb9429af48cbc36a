//! Nested-set numbering

use crate::tree::node::TreeNode;

/// Stamp `left`/`right` on every node with one depth-first pass.
///
/// Numbering is 1-based: the counter is bumped before each assignment, so
/// the root gets `left = 1` and `right = 2 * node_count`.
pub fn assign_bounds(root: &mut TreeNode) {
    let mut counter = 0;
    stamp(root, &mut counter);
    log::debug!("assigned bounds 1..={} to {} nodes", counter, counter / 2);
}

fn stamp(node: &mut TreeNode, counter: &mut u32) {
    *counter += 1;
    node.left = *counter;

    for child in &mut node.children {
        stamp(child, counter);
    }

    *counter += 1;
    node.right = *counter;
}
