//! In-memory rule set storage with replace-all semantics

use parking_lot::RwLock;

use crate::condition::Condition;
use crate::config::ParserConfig;
use crate::error::Result;
use crate::pipeline::{encode_conditions, Encoding};
use crate::rows::{decode_rows, EncodedRows};
use crate::tree::flatten_tree;

/// Holds the rows of the current rule set.
///
/// Every update replaces the whole set; a failed update leaves the
/// previous rows untouched.
#[derive(Debug, Default)]
pub struct RuleStore {
    rows: RwLock<Option<EncodedRows>>,
}

impl RuleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all stored rows
    pub fn replace(&self, rows: EncodedRows) {
        log::debug!(
            "replacing rule set with {} equality and {} logic rows",
            rows.equality.len(),
            rows.logic.len()
        );
        *self.rows.write() = Some(rows);
    }

    /// Drop all stored rows
    pub fn truncate(&self) {
        *self.rows.write() = None;
    }

    /// Snapshot of the stored rows
    pub fn rows(&self) -> Option<EncodedRows> {
        self.rows.read().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.read().is_none()
    }

    /// Encode `tokens` and store the result
    pub fn update(&self, tokens: &[Condition], config: &ParserConfig) -> Result<Encoding> {
        let encoding = encode_conditions(tokens, config)?;
        self.replace(encoding.rows.clone());
        Ok(encoding)
    }

    /// Stored rule set as display tokens, empty when nothing is stored
    pub fn conditions(&self) -> Result<Vec<Condition>> {
        let guard = self.rows.read();
        match guard.as_ref() {
            Some(rows) => flatten_tree(&decode_rows(rows)?),
            None => Ok(Vec::new()),
        }
    }
}
