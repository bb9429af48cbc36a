//! Parser configuration
//!
//! This module handles deserialization of parser settings from JSON or,
//! with the `python` feature, from Python dicts.

use serde::Deserialize;

use crate::error::Result;

/// Default nesting limit for scope markers
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Ceiling on `max_depth`; building, indexing and flattening recurse once per level
pub const MAX_DEPTH_LIMIT: usize = 1024;

/// How the tree builder treats malformed token streams
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseMode {
    /// Build whatever tree the tokens imply, repairing by dropping input
    #[default]
    Lenient,
    /// Reject unbalanced scopes, missing or mixed operators
    Strict,
}

/// Settings shared by the lexer and the tree builder
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    pub mode: ParseMode,
    pub max_depth: usize,
    /// Words the lexer reads as logic operators (matched case-insensitively)
    pub logic_operators: Vec<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            mode: ParseMode::Lenient,
            max_depth: DEFAULT_MAX_DEPTH,
            logic_operators: vec!["AND".to_string(), "OR".to_string()],
        }
    }
}

impl ParserConfig {
    pub fn strict() -> Self {
        Self {
            mode: ParseMode::Strict,
            ..Default::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config.clamped())
    }

    /// Copy with `max_depth` capped at [`MAX_DEPTH_LIMIT`]
    pub fn clamped(mut self) -> Self {
        if self.max_depth > MAX_DEPTH_LIMIT {
            log::warn!(
                "max_depth {} exceeds limit, using {}",
                self.max_depth,
                MAX_DEPTH_LIMIT
            );
            self.max_depth = MAX_DEPTH_LIMIT;
        }
        self
    }

    /// Nesting limit the builder enforces
    pub fn depth_limit(&self) -> usize {
        self.max_depth.min(MAX_DEPTH_LIMIT)
    }

    pub fn is_strict(&self) -> bool {
        self.mode == ParseMode::Strict
    }

    /// Canonical spelling of `word` if it names a logic operator
    pub fn logic_operator(&self, word: &str) -> Option<&str> {
        self.logic_operators
            .iter()
            .find(|op| op.eq_ignore_ascii_case(word))
            .map(String::as_str)
    }
}

#[cfg(feature = "python")]
mod python {
    use pyo3::types::{PyAnyMethods, PyDict, PyDictMethods};
    use pyo3::Bound;

    use super::{ParseMode, ParserConfig};

    /// Helper to get optional attribute from either dict or object
    fn get_attr_opt<'py>(
        obj: &Bound<'py, pyo3::PyAny>,
        name: &str,
    ) -> Option<Bound<'py, pyo3::PyAny>> {
        if let Ok(dict) = obj.downcast::<PyDict>() {
            dict.get_item(name).ok().flatten()
        } else {
            obj.getattr(name).ok()
        }
    }

    /// Deserialize parser settings from a Python dict or object.
    /// Missing keys keep their defaults.
    pub fn deserialize_parser_config(
        obj: &Bound<'_, pyo3::PyAny>,
    ) -> pyo3::PyResult<ParserConfig> {
        let mut config = ParserConfig::default();

        if let Some(mode) = get_attr_opt(obj, "mode") {
            if !mode.is_none() {
                let mode: String = mode.extract()?;
                config.mode = match mode.to_ascii_lowercase().as_str() {
                    "lenient" => ParseMode::Lenient,
                    "strict" => ParseMode::Strict,
                    other => {
                        return Err(pyo3::exceptions::PyValueError::new_err(format!(
                            "Invalid parse mode: {}",
                            other
                        )))
                    }
                };
            }
        }

        if let Some(depth) = get_attr_opt(obj, "max_depth").and_then(|v| v.extract().ok()) {
            config.max_depth = depth;
        }

        if let Some(ops) = get_attr_opt(obj, "logic_operators") {
            if !ops.is_none() {
                let ops: Vec<String> = ops.extract()?;
                if !ops.is_empty() {
                    config.logic_operators = ops;
                }
            }
        }

        Ok(config.clamped())
    }
}

#[cfg(feature = "python")]
pub use python::deserialize_parser_config;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ParserConfig::default();
        assert_eq!(config.mode, ParseMode::Lenient);
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(config.logic_operator("and"), Some("AND"));
        assert_eq!(config.logic_operator("xor"), None);
    }

    #[test]
    fn test_from_json_partial() {
        let config = ParserConfig::from_json(r#"{"mode": "strict", "max_depth": 8}"#).unwrap();
        assert!(config.is_strict());
        assert_eq!(config.max_depth, 8);
        assert_eq!(config.logic_operators, vec!["AND", "OR"]);
    }

    #[test]
    fn test_from_json_clamps_max_depth() {
        let config = ParserConfig::from_json(r#"{"max_depth": 1000000}"#).unwrap();
        assert_eq!(config.max_depth, MAX_DEPTH_LIMIT);
        assert_eq!(config.depth_limit(), MAX_DEPTH_LIMIT);
    }

    #[test]
    fn test_from_json_rejects_unknown_mode() {
        assert!(ParserConfig::from_json(r#"{"mode": "sloppy"}"#).is_err());
    }
}
