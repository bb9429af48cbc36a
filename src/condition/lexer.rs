//! Display-text tokenizer
//!
//! Reads the textual form shown to users, e.g. `( age eq 1 AND ( age eq 2 OR age eq 3 ) )`,
//! back into a condition sequence. Equality tokens are three words
//! (`field operator value`); a value containing spaces may be double-quoted.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::condition::ast::{equality_text, Condition, EqualityCondition};
use crate::config::ParserConfig;
use crate::error::{LogicTreeError, Result};

static WORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""(?P<quoted>[^"]*)"|(?P<paren>[()])|(?P<bare>[^\s()"]+)"#)
        .unwrap_or_else(|e| panic!("invalid word pattern: {}", e))
});

/// Split display text into conditions
pub fn tokenize(text: &str, config: &ParserConfig) -> Result<Vec<Condition>> {
    let text = text.trim();
    if text.is_empty() {
        return Err(LogicTreeError::malformed("Empty expression"));
    }

    let mut tokens = Vec::new();
    let mut pending: Vec<String> = Vec::with_capacity(3);
    let mut last_end = 0;

    for caps in WORD.captures_iter(text) {
        let whole = caps.get(0).map_or(0..0, |m| m.range());
        let gap = &text[last_end..whole.start];
        if !gap.trim().is_empty() {
            return Err(LogicTreeError::malformed(format!(
                "Unexpected characters: {:?}",
                gap.trim()
            )));
        }
        last_end = whole.end;

        if let Some(paren) = caps.name("paren") {
            flush_pending(&pending)?;
            tokens.push(if paren.as_str() == "(" {
                Condition::open()
            } else {
                Condition::close()
            });
            continue;
        }

        let (word, quoted) = match (caps.name("quoted"), caps.name("bare")) {
            (Some(q), _) => (q.as_str(), true),
            (None, Some(b)) => (b.as_str(), false),
            (None, None) => continue,
        };

        if pending.is_empty() && !quoted {
            if let Some(op) = config.logic_operator(word) {
                tokens.push(Condition::logic(op));
                continue;
            }
        }

        pending.push(word.to_string());
        if pending.len() == 3 {
            tokens.push(equality_from_words(&mut pending));
        }
    }

    let tail = &text[last_end..];
    if !tail.trim().is_empty() {
        return Err(LogicTreeError::malformed(format!(
            "Unexpected characters: {:?}",
            tail.trim()
        )));
    }
    flush_pending(&pending)?;

    log::trace!("tokenized {:?} into {} conditions", text, tokens.len());
    Ok(tokens)
}

fn flush_pending(pending: &[String]) -> Result<()> {
    if pending.is_empty() {
        Ok(())
    } else {
        Err(LogicTreeError::malformed(format!(
            "Incomplete comparison: {}",
            pending.join(" ")
        )))
    }
}

fn equality_from_words(pending: &mut Vec<String>) -> Condition {
    let mut words = pending.drain(..);
    let field = words.next().unwrap_or_default();
    let operator = words.next().unwrap_or_default();
    let value = words.next().unwrap_or_default();
    drop(words);

    let text = equality_text(&field, &operator, &value);
    Condition::Equality(EqualityCondition {
        text,
        field,
        operator,
        value,
    })
}

/// Join the display texts of `conditions` with single spaces
pub fn render_text(conditions: &[Condition]) -> String {
    conditions
        .iter()
        .map(Condition::text)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(text: &str) -> Vec<Condition> {
        tokenize(text, &ParserConfig::default()).unwrap()
    }

    #[test]
    fn test_tokenize_simple() {
        assert_eq!(
            lex("( age eq 1 AND age eq 2 )"),
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
    fn test_tokenize_tight_parens() {
        let tokens = lex("((age eq 1 or age eq 2) and name ne bob)");
        assert_eq!(tokens.len(), 9);
        assert_eq!(tokens[3], Condition::logic("OR"));
        assert_eq!(tokens[6], Condition::logic("AND"));
    }

    #[test]
    fn test_keyword_as_value() {
        let tokens = lex("( word eq AND )");
        assert_eq!(tokens[1], Condition::equality("word", "eq", "AND"));
    }

    #[test]
    fn test_quoted_value() {
        let tokens = lex(r#"( name eq "mary ann" )"#);
        assert_eq!(tokens[1], Condition::equality("name", "eq", "mary ann"));
    }

    #[test]
    fn test_incomplete_comparison() {
        let err = tokenize("( age eq )", &ParserConfig::default()).unwrap_err();
        assert!(matches!(err, LogicTreeError::MalformedExpression(msg) if msg.contains("age eq")));
    }

    #[test]
    fn test_empty_expression() {
        assert!(tokenize("   ", &ParserConfig::default()).is_err());
    }

    #[test]
    fn test_custom_operators() {
        let config = ParserConfig {
            logic_operators: vec!["XOR".to_string()],
            ..Default::default()
        };
        let tokens = tokenize("( a eq 1 xor b eq 2 )", &config).unwrap();
        assert_eq!(tokens[2], Condition::logic("XOR"));
    }

    #[test]
    fn test_render_text_inverts_tokenize() {
        let text = "( ( age eq 1 OR age eq 2 ) AND name ne bob )";
        assert_eq!(render_text(&lex(text)), text);
    }

    #[test]
    fn test_quoted_value_survives_render() {
        let text = r#"( name eq "mary ann" OR age eq 1 )"#;
        let tokens = lex(text);
        let rendered = render_text(&tokens);
        assert_eq!(rendered, text);
        assert_eq!(lex(&rendered), tokens);
    }

    #[test]
    fn test_built_tokens_survive_render() {
        let tokens = vec![
            Condition::open(),
            Condition::equality("city", "eq", "new york"),
            Condition::logic("AND"),
            Condition::equality("note", "ne", ""),
            Condition::logic("AND"),
            Condition::equality("expr", "eq", "f(x)"),
            Condition::close(),
        ];
        assert_eq!(lex(&render_text(&tokens)), tokens);
    }
}
