//! Expression tree node

use crate::condition::{Condition, ConditionKind};

/// Bound value meaning "not yet indexed"
pub const UNSET_BOUND: u32 = 0;

/// One node of a parsed expression tree.
///
/// Children are owned and ordered by operand position. A well-formed tree
/// carries `Logic` payloads on branches and `Equality` payloads on leaves;
/// the serializer checks this, construction does not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub payload: Condition,
    pub children: Vec<TreeNode>,
    /// Nested-set left bound, [`UNSET_BOUND`] until indexed
    pub left: u32,
    /// Nested-set right bound, [`UNSET_BOUND`] until indexed
    pub right: u32,
}

impl TreeNode {
    pub fn leaf(payload: Condition) -> Self {
        Self {
            payload,
            children: Vec::new(),
            left: UNSET_BOUND,
            right: UNSET_BOUND,
        }
    }

    pub fn branch(payload: Condition, children: Vec<TreeNode>) -> Self {
        Self {
            payload,
            children,
            left: UNSET_BOUND,
            right: UNSET_BOUND,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn is_indexed(&self) -> bool {
        self.left != UNSET_BOUND && self.right != UNSET_BOUND
    }

    pub fn kind(&self) -> ConditionKind {
        self.payload.kind()
    }

    /// Total number of nodes in this subtree
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(TreeNode::node_count).sum::<usize>()
    }

    /// Number of nodes in this subtree whose payload is `kind`
    pub fn count_kind(&self, kind: ConditionKind) -> usize {
        let own = usize::from(self.kind() == kind);
        own + self
            .children
            .iter()
            .map(|child| child.count_kind(kind))
            .sum::<usize>()
    }

    /// Height of the subtree, a lone leaf has depth 1
    pub fn depth(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(TreeNode::depth)
            .max()
            .unwrap_or(0)
    }

    /// Visit every node in pre-order
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a TreeNode)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }

    /// Compare shape and payload tokens, ignoring display text and bounds
    pub fn same_shape(&self, other: &TreeNode) -> bool {
        self.payload.same_token(&other.payload)
            && self.children.len() == other.children.len()
            && self
                .children
                .iter()
                .zip(&other.children)
                .all(|(a, b)| a.same_shape(b))
    }

    /// Reset every bound to [`UNSET_BOUND`]
    pub fn clear_bounds(&mut self) {
        self.left = UNSET_BOUND;
        self.right = UNSET_BOUND;
        for child in &mut self.children {
            child.clear_bounds();
        }
    }
}
