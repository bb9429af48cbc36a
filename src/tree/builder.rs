//! Flat token stream to expression tree
//!
//! Tokens are read once, left to right, through a shared [`TokenCursor`].
//! An `Open` marker descends one level and the subtree built there becomes
//! the next operand of the enclosing scope; `Close` ends the level. A scope
//! that never saw a logic operator stands for its single operand and is
//! unwrapped, which is what turns the outermost `( ... )` into the root.

use crate::condition::{Condition, LogicCondition, ScopeMarker};
use crate::config::ParserConfig;
use crate::error::{LogicTreeError, Result};
use crate::tree::node::TreeNode;

/// Read position into an immutable token slice
#[derive(Debug, Clone)]
pub struct TokenCursor<'a> {
    tokens: &'a [Condition],
    pos: usize,
}

impl<'a> TokenCursor<'a> {
    pub fn new(tokens: &'a [Condition]) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Consume the next token
    pub fn next_token(&mut self) -> Option<&'a Condition> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(token)
    }

    /// Number of tokens consumed so far
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.tokens.len() - self.pos
    }

    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.tokens.len()
    }
}

/// Build a tree with the default lenient configuration
pub fn build_tree(tokens: &[Condition]) -> Result<TreeNode> {
    build_tree_with(tokens, &ParserConfig::default())
}

/// Build a tree from `tokens`.
///
/// In lenient mode malformed input still yields a tree where one can be
/// formed; it fails only for an empty stream, an empty scope, or nesting
/// beyond `max_depth`. Strict mode rejects any malformed input and
/// requires the whole stream to be one `( ... )` group.
pub fn build_tree_with(tokens: &[Condition], config: &ParserConfig) -> Result<TreeNode> {
    let mut cursor = TokenCursor::new(tokens);
    let root = if config.is_strict() {
        build_outermost(&mut cursor, config)?
    } else {
        build_scope(&mut cursor, config, 0)?
    };

    log::debug!(
        "built tree of {} nodes from {} tokens",
        root.node_count(),
        cursor.position()
    );
    Ok(root)
}

/// Strict entry: one outermost scope spanning every token
fn build_outermost(cursor: &mut TokenCursor<'_>, config: &ParserConfig) -> Result<TreeNode> {
    match cursor.next_token() {
        Some(Condition::Scope(ScopeMarker::Open)) => {}
        Some(token) => {
            return Err(LogicTreeError::malformed(format!(
                "Expression must start with '(', found {:?}",
                token.text()
            )))
        }
        None => return Err(LogicTreeError::malformed("Empty expression")),
    }
    if config.depth_limit() < 1 {
        return Err(LogicTreeError::malformed(format!(
            "Nesting deeper than {} at token 0",
            config.depth_limit()
        )));
    }

    let root = build_scope(cursor, config, 1)?;
    if !cursor.is_exhausted() {
        return Err(LogicTreeError::malformed(format!(
            "Trailing tokens after outermost scope at token {}",
            cursor.position()
        )));
    }
    Ok(root)
}

/// Operands and operator gathered for one scope level
#[derive(Debug, Default)]
struct Scope {
    logic: Option<LogicCondition>,
    children: Vec<TreeNode>,
    /// An operator was seen and no operand has followed it yet
    awaiting_operand: bool,
}

impl Scope {
    fn push_operand(&mut self, node: TreeNode, strict: bool, at: usize) -> Result<()> {
        if strict && !self.children.is_empty() && !self.awaiting_operand {
            return Err(LogicTreeError::malformed(format!(
                "Missing logic operator before token {}",
                at
            )));
        }
        self.children.push(node);
        self.awaiting_operand = false;
        Ok(())
    }

    fn set_logic(&mut self, logic: &LogicCondition, strict: bool, at: usize) -> Result<()> {
        if strict && (self.children.is_empty() || self.awaiting_operand) {
            return Err(LogicTreeError::malformed(format!(
                "Logic operator {:?} without left operand at token {}",
                logic.operator, at
            )));
        }

        if let Some(current) = &self.logic {
            if current.operator != logic.operator {
                if strict {
                    return Err(LogicTreeError::malformed(format!(
                        "Mixed operators {:?} and {:?} in one scope at token {}",
                        current.operator, logic.operator, at
                    )));
                }
                log::warn!(
                    "operator {:?} replaces {:?} in one scope at token {}",
                    logic.operator,
                    current.operator,
                    at
                );
            }
        }

        self.logic = Some(logic.clone());
        self.awaiting_operand = true;
        Ok(())
    }

    fn finish(self, strict: bool) -> Result<TreeNode> {
        if strict && self.awaiting_operand {
            return Err(LogicTreeError::malformed("Logic operator without right operand"));
        }

        match self.logic {
            Some(logic) => Ok(TreeNode::branch(Condition::Logic(logic), self.children)),
            None => {
                let mut children = self.children.into_iter();
                let first = children
                    .next()
                    .ok_or_else(|| LogicTreeError::malformed("Empty scope"))?;
                let dropped = children.count();
                if dropped > 0 {
                    log::warn!(
                        "scope without logic operator has {} surplus operands, keeping the first",
                        dropped
                    );
                }
                Ok(first)
            }
        }
    }
}

fn build_scope(
    cursor: &mut TokenCursor<'_>,
    config: &ParserConfig,
    depth: usize,
) -> Result<TreeNode> {
    let strict = config.is_strict();
    let mut scope = Scope::default();

    while let Some(token) = cursor.next_token() {
        let at = cursor.position() - 1;
        log::trace!("depth {} token {}: {:?}", depth, at, token.text());

        match token {
            Condition::Scope(ScopeMarker::Open) => {
                if depth + 1 > config.depth_limit() {
                    return Err(LogicTreeError::malformed(format!(
                        "Nesting deeper than {} at token {}",
                        config.depth_limit(),
                        at
                    )));
                }
                let subtree = build_scope(cursor, config, depth + 1)?;
                scope.push_operand(subtree, strict, at)?;
            }
            Condition::Scope(ScopeMarker::Close) => {
                if depth == 0 {
                    if strict {
                        return Err(LogicTreeError::malformed(format!(
                            "Unmatched ')' at token {}",
                            at
                        )));
                    }
                    log::warn!(
                        "unmatched ')' at token {}, ignoring {} trailing tokens",
                        at,
                        cursor.remaining()
                    );
                }
                return scope.finish(strict);
            }
            Condition::Logic(logic) => scope.set_logic(logic, strict, at)?,
            Condition::Equality(_) => {
                scope.push_operand(TreeNode::leaf(token.clone()), strict, at)?;
            }
        }
    }

    if depth > 0 {
        if strict {
            return Err(LogicTreeError::malformed(format!(
                "Unclosed '(' at depth {}",
                depth
            )));
        }
        log::warn!("token stream ended inside an unclosed scope at depth {}", depth);
    }

    scope.finish(strict)
}
