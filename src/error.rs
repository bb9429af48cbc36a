//! Error types for the logic tree core

use std::fmt;

use thiserror::Error;

/// Which of the two storage row lists an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Equality,
    Logic,
}

impl fmt::Display for RowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowKind::Equality => f.write_str("equality"),
            RowKind::Logic => f.write_str("logic"),
        }
    }
}

/// Main error type for the logic tree core
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LogicTreeError {
    #[error("branch logic condition found in leaf position")]
    LeafTypeMismatch,

    #[error("non-logic condition found in branch position")]
    BranchTypeMismatch,

    #[error("empty {0} encoding")]
    EmptyEncoding(RowKind),

    #[error("tree has no nested-set bounds; assign bounds before encoding")]
    MissingBounds,

    #[error("Malformed expression: {0}")]
    MalformedExpression(String),

    #[error("Malformed rows: {0}")]
    MalformedRows(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl LogicTreeError {
    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        LogicTreeError::MalformedExpression(msg.into())
    }
}

impl From<serde_json::Error> for LogicTreeError {
    fn from(err: serde_json::Error) -> Self {
        LogicTreeError::Deserialization(err.to_string())
    }
}

#[cfg(feature = "python")]
impl From<LogicTreeError> for pyo3::PyErr {
    fn from(err: LogicTreeError) -> pyo3::PyErr {
        use pyo3::exceptions::{PyRuntimeError, PyValueError};

        match err {
            LogicTreeError::MalformedExpression(_)
            | LogicTreeError::MalformedRows(_)
            | LogicTreeError::Deserialization(_) => PyValueError::new_err(err.to_string()),
            LogicTreeError::LeafTypeMismatch
            | LogicTreeError::BranchTypeMismatch
            | LogicTreeError::EmptyEncoding(_)
            | LogicTreeError::MissingBounds => PyRuntimeError::new_err(err.to_string()),
        }
    }
}

/// Result type alias for the logic tree core
pub type Result<T> = std::result::Result<T, LogicTreeError>;
