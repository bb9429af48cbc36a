//! Python bindings
//!
//! The host passes condition lists as the front-end's JSON and receives
//! rows as plain tuples, ready for a bulk insert.

use once_cell::sync::{Lazy, OnceCell};
use parking_lot::RwLock;
use pyo3::prelude::*;

use crate::condition::{conditions_to_json, parse_conditions_json, render_text, tokenize};
use crate::config::{deserialize_parser_config, ParserConfig};
use crate::pipeline;
use crate::store::RuleStore;
use crate::tree::{build_tree_with, flatten_tree};

type EqualityTuple = (String, String, String, u32, u32);
type LogicTuple = (String, u32, u32);

// ============================================================================
// Cached State
// ============================================================================

/// Parser settings installed by `init_config`
static CACHED_CONFIG: OnceCell<RwLock<ParserConfig>> = OnceCell::new();

/// Rule set held for `update_conditions` / `get_conditions`
static RULE_STORE: Lazy<RuleStore> = Lazy::new(RuleStore::new);

fn current_config() -> ParserConfig {
    CACHED_CONFIG
        .get()
        .map(|config| config.read().clone())
        .unwrap_or_default()
}

// ============================================================================
// Python Functions
// ============================================================================

/// Install parser settings (call once at startup)
///
/// # Arguments
/// * `config` - Optional dict with `mode` ("lenient" or "strict"), `max_depth`
///   and `logic_operators`; missing keys keep their defaults
#[pyfunction]
#[pyo3(signature = (config=None))]
fn init_config(config: Option<&Bound<'_, PyAny>>) -> PyResult<()> {
    let parsed = match config {
        Some(obj) if !obj.is_none() => deserialize_parser_config(obj)?,
        _ => ParserConfig::default(),
    };

    // If already initialized, update the config
    if let Some(existing) = CACHED_CONFIG.get() {
        *existing.write() = parsed;
    } else {
        let _ = CACHED_CONFIG.set(RwLock::new(parsed));
    }

    Ok(())
}

/// Check if config is initialized
#[pyfunction]
fn is_config_initialized() -> bool {
    CACHED_CONFIG.get().is_some()
}

/// Encode a JSON condition list into storage rows
///
/// # Returns
/// `(equality_rows, logic_rows)` where equality rows are
/// `(field, operator, value, left, right)` and logic rows `(operator, left, right)`
#[pyfunction]
fn encode_conditions(conditions_json: &str) -> PyResult<(Vec<EqualityTuple>, Vec<LogicTuple>)> {
    let tokens = parse_conditions_json(conditions_json)?;
    let encoding = pipeline::encode_conditions(&tokens, &current_config())?;

    let equality = encoding
        .rows
        .equality
        .into_iter()
        .map(|row| (row.field, row.operator, row.value, row.left, row.right))
        .collect();
    let logic = encoding
        .rows
        .logic
        .into_iter()
        .map(|row| (row.operator, row.left, row.right))
        .collect();

    Ok((equality, logic))
}

/// Replace the stored rule set with a JSON condition list
///
/// # Returns
/// The normalized condition list as JSON
#[pyfunction]
fn update_conditions(conditions_json: &str) -> PyResult<String> {
    let tokens = parse_conditions_json(conditions_json)?;
    let encoding = RULE_STORE.update(&tokens, &current_config())?;
    Ok(conditions_to_json(&encoding.conditions)?)
}

/// Stored rule set as a JSON condition list (empty list when nothing is stored)
#[pyfunction]
fn get_conditions() -> PyResult<String> {
    let conditions = RULE_STORE.conditions()?;
    Ok(conditions_to_json(&conditions)?)
}

/// Drop the stored rule set
#[pyfunction]
fn truncate() {
    RULE_STORE.truncate();
}

/// Normalize display text, e.g. `((a eq 1) and b eq 2)` to `( a eq 1 AND b eq 2 )`
#[pyfunction]
fn flatten_text(text: &str) -> PyResult<String> {
    let config = current_config();
    let tokens = tokenize(text, &config)?;
    let tree = build_tree_with(&tokens, &config)?;
    Ok(render_text(&flatten_tree(&tree)?))
}

// ============================================================================
// Python Module Definition
// ============================================================================

/// Python module definition
#[pymodule]
fn logic_tree_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(init_config, m)?)?;
    m.add_function(wrap_pyfunction!(is_config_initialized, m)?)?;
    m.add_function(wrap_pyfunction!(encode_conditions, m)?)?;
    m.add_function(wrap_pyfunction!(update_conditions, m)?)?;
    m.add_function(wrap_pyfunction!(get_conditions, m)?)?;
    m.add_function(wrap_pyfunction!(truncate, m)?)?;
    m.add_function(wrap_pyfunction!(flatten_text, m)?)?;
    Ok(())
}
