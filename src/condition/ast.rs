//! Token types for the flat condition language

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::condition::wire::WireCondition;

/// Grouping marker, textually "(" or ")"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeMarker {
    Open,
    Close,
}

impl ScopeMarker {
    pub fn as_str(self) -> &'static str {
        match self {
            ScopeMarker::Open => "(",
            ScopeMarker::Close => ")",
        }
    }
}

/// Logic operator joining the operands of one scope, e.g. "AND"
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LogicCondition {
    pub text: String,
    pub operator: String,
}

/// Comparison leaf such as "age eq 4"
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EqualityCondition {
    pub text: String,
    pub field: String,
    pub operator: String,
    pub value: String,
}

/// Display text for a comparison, one word per part.
///
/// Parts that are empty or contain whitespace or parentheses are
/// double-quoted so the text tokenizes back into the same comparison.
pub fn equality_text(field: &str, operator: &str, value: &str) -> String {
    format!(
        "{} {} {}",
        display_word(field),
        display_word(operator),
        display_word(value)
    )
}

fn display_word(word: &str) -> Cow<'_, str> {
    let needs_quotes =
        word.is_empty() || word.chars().any(|c| c.is_whitespace() || c == '(' || c == ')');
    if needs_quotes {
        Cow::Owned(format!("\"{}\"", word))
    } else {
        Cow::Borrowed(word)
    }
}

/// Discriminant of a [`Condition`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionKind {
    Scope,
    Logic,
    Equality,
}

/// One token of the flat expression language.
///
/// Equality is structural over every field, text included.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "WireCondition", into = "WireCondition")]
pub enum Condition {
    Scope(ScopeMarker),
    Logic(LogicCondition),
    Equality(EqualityCondition),
}

impl Condition {
    pub fn open() -> Self {
        Condition::Scope(ScopeMarker::Open)
    }

    pub fn close() -> Self {
        Condition::Scope(ScopeMarker::Close)
    }

    /// Logic token whose display text is the operator itself
    pub fn logic(operator: impl Into<String>) -> Self {
        let operator = operator.into();
        Condition::Logic(LogicCondition {
            text: operator.clone(),
            operator,
        })
    }

    /// Equality token with the display text "{field} {operator} {value}",
    /// see [`equality_text`]
    pub fn equality(
        field: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        let field = field.into();
        let operator = operator.into();
        let value = value.into();
        Condition::Equality(EqualityCondition {
            text: equality_text(&field, &operator, &value),
            field,
            operator,
            value,
        })
    }

    pub fn kind(&self) -> ConditionKind {
        match self {
            Condition::Scope(_) => ConditionKind::Scope,
            Condition::Logic(_) => ConditionKind::Logic,
            Condition::Equality(_) => ConditionKind::Equality,
        }
    }

    /// Human-readable rendering of this token
    pub fn text(&self) -> &str {
        match self {
            Condition::Scope(marker) => marker.as_str(),
            Condition::Logic(logic) => &logic.text,
            Condition::Equality(eq) => &eq.text,
        }
    }

    /// Same token ignoring display text
    pub fn same_token(&self, other: &Condition) -> bool {
        match (self, other) {
            (Condition::Scope(a), Condition::Scope(b)) => a == b,
            (Condition::Logic(a), Condition::Logic(b)) => a.operator == b.operator,
            (Condition::Equality(a), Condition::Equality(b)) => {
                a.field == b.field && a.operator == b.operator && a.value == b.value
            }
            _ => false,
        }
    }

    pub fn as_logic(&self) -> Option<&LogicCondition> {
        match self {
            Condition::Logic(logic) => Some(logic),
            _ => None,
        }
    }

    pub fn as_equality(&self) -> Option<&EqualityCondition> {
        match self {
            Condition::Equality(eq) => Some(eq),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_text() {
        let cond = Condition::equality("age", "eq", "4");
        assert_eq!(cond.text(), "age eq 4");
        assert_eq!(cond.kind(), ConditionKind::Equality);
    }

    #[test]
    fn test_equality_text_quotes_awkward_words() {
        assert_eq!(equality_text("name", "eq", "mary ann"), r#"name eq "mary ann""#);
        assert_eq!(equality_text("note", "eq", ""), r#"note eq """#);
        assert_eq!(equality_text("expr", "eq", "f(x)"), r#"expr eq "f(x)""#);
        assert_eq!(equality_text("age", "eq", "4"), "age eq 4");
    }

    #[test]
    fn test_scope_text() {
        assert_eq!(Condition::open().text(), "(");
        assert_eq!(Condition::close().text(), ")");
    }

    #[test]
    fn test_equality_compares_text() {
        let a = Condition::equality("age", "eq", "4");
        let b = Condition::Equality(EqualityCondition {
            text: "age = 4".to_string(),
            field: "age".to_string(),
            operator: "eq".to_string(),
            value: "4".to_string(),
        });
        assert_ne!(a, b);
        assert!(a.same_token(&b));
    }

    #[test]
    fn test_same_token_across_kinds() {
        assert!(!Condition::logic("AND").same_token(&Condition::open()));
        assert!(!Condition::logic("AND").same_token(&Condition::logic("OR")));
        assert!(Condition::logic("OR").same_token(&Condition::logic("OR")));
    }
}
