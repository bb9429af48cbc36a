//! JSON wire format for condition lists posted by the front-end
//!
//! Each token arrives as a flat record with every field present:
//! `{"Text": "age eq 4", "Type": "equality", "Field": "age", "Operator": "eq", "Value": "4"}`.
//! Scope tokens carry their marker in `Operator`. Lowercase keys are accepted too.

use serde::{Deserialize, Serialize};

use crate::condition::ast::{
    equality_text, Condition, EqualityCondition, LogicCondition, ScopeMarker,
};
use crate::error::{LogicTreeError, Result};

pub const TYPE_SCOPE: &str = "scope";
pub const TYPE_LOGIC: &str = "logic";
pub const TYPE_EQUALITY: &str = "equality";

/// Loosely-typed record as it appears on the wire
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WireCondition {
    #[serde(default, alias = "text")]
    pub text: String,
    #[serde(rename = "Type", alias = "type")]
    pub kind: String,
    #[serde(default, alias = "field")]
    pub field: String,
    #[serde(default, alias = "operator")]
    pub operator: String,
    #[serde(default, alias = "value")]
    pub value: String,
}

impl TryFrom<WireCondition> for Condition {
    type Error = LogicTreeError;

    fn try_from(wire: WireCondition) -> Result<Self> {
        match wire.kind.to_ascii_lowercase().as_str() {
            TYPE_SCOPE => match wire.operator.as_str() {
                "(" => Ok(Condition::Scope(ScopeMarker::Open)),
                ")" => Ok(Condition::Scope(ScopeMarker::Close)),
                other => Err(LogicTreeError::Deserialization(format!(
                    "Unknown scope marker: {:?}",
                    other
                ))),
            },
            TYPE_LOGIC => {
                if wire.operator.is_empty() {
                    return Err(LogicTreeError::Deserialization(
                        "Logic condition without operator".to_string(),
                    ));
                }
                let text = if wire.text.is_empty() {
                    wire.operator.clone()
                } else {
                    wire.text
                };
                Ok(Condition::Logic(LogicCondition {
                    text,
                    operator: wire.operator,
                }))
            }
            TYPE_EQUALITY => {
                let text = if wire.text.is_empty() {
                    equality_text(&wire.field, &wire.operator, &wire.value)
                } else {
                    wire.text
                };
                Ok(Condition::Equality(EqualityCondition {
                    text,
                    field: wire.field,
                    operator: wire.operator,
                    value: wire.value,
                }))
            }
            other => Err(LogicTreeError::Deserialization(format!(
                "Unknown condition type: {:?}",
                other
            ))),
        }
    }
}

impl From<Condition> for WireCondition {
    fn from(condition: Condition) -> Self {
        match condition {
            Condition::Scope(marker) => WireCondition {
                text: marker.as_str().to_string(),
                kind: TYPE_SCOPE.to_string(),
                operator: marker.as_str().to_string(),
                ..Default::default()
            },
            Condition::Logic(logic) => WireCondition {
                text: logic.text,
                kind: TYPE_LOGIC.to_string(),
                operator: logic.operator,
                ..Default::default()
            },
            Condition::Equality(eq) => WireCondition {
                text: eq.text,
                kind: TYPE_EQUALITY.to_string(),
                field: eq.field,
                operator: eq.operator,
                value: eq.value,
            },
        }
    }
}

/// Decode a JSON array of wire records into conditions
pub fn parse_conditions_json(json: &str) -> Result<Vec<Condition>> {
    let conditions: Vec<Condition> = serde_json::from_str(json)?;
    log::debug!("decoded {} conditions from json", conditions.len());
    Ok(conditions)
}

/// Encode conditions as a JSON array of wire records
pub fn conditions_to_json(conditions: &[Condition]) -> Result<String> {
    Ok(serde_json::to_string(conditions)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_front_end_payload() {
        let json = r#"[
            {"Text": "(", "Type": "scope", "Operator": "("},
            {"Text": "age eq 1", "Type": "equality", "Field": "age", "Operator": "eq", "Value": "1"},
            {"Text": "AND", "Type": "logic", "Operator": "AND"},
            {"text": "age eq 2", "type": "equality", "field": "age", "operator": "eq", "value": "2"},
            {"Text": ")", "Type": "scope", "Operator": ")"}
        ]"#;

        let conditions = parse_conditions_json(json).unwrap();
        assert_eq!(
            conditions,
            vec![
                Condition::open(),
                Condition::equality("age", "eq", "1"),
                Condition::logic("AND"),
                Condition::equality("age", "eq", "2"),
                Condition::close(),
            ]
        );
    }

    #[test]
    fn test_unknown_type_rejected() {
        let json = r#"[{"Text": "x", "Type": "bogus"}]"#;
        let err = parse_conditions_json(json).unwrap_err();
        assert!(matches!(err, LogicTreeError::Deserialization(msg) if msg.contains("bogus")));
    }

    #[test]
    fn test_unknown_scope_marker_rejected() {
        let json = r#"[{"Type": "scope", "Operator": "["}]"#;
        assert!(parse_conditions_json(json).is_err());
    }

    #[test]
    fn test_missing_text_is_derived() {
        let json = r#"[{"Type": "equality", "Field": "age", "Operator": "lt", "Value": "9"}]"#;
        let conditions = parse_conditions_json(json).unwrap();
        assert_eq!(conditions[0].text(), "age lt 9");
    }

    #[test]
    fn test_json_round_trip_keeps_text() {
        let conditions = vec![
            Condition::open(),
            Condition::equality("name", "ne", "bob"),
            Condition::close(),
        ];
        let json = conditions_to_json(&conditions).unwrap();
        assert!(json.contains(r#""Type":"equality""#));
        assert_eq!(parse_conditions_json(&json).unwrap(), conditions);
    }
}
