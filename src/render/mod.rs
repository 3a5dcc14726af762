//! Stage renderers
//!
//! Pure functions from normalized stage data to display text. Output is
//! deterministic and column-aligned so it can be compared byte for byte.
//!
//! # Token lines
//!
//! ```text
//! Token 1: IDENTIFIER      | "print"      | Line 1, Col 1
//! Token 2: LPAREN          | "("          | Line 1, Col 6
//! ```

mod bytecode;

pub use bytecode::{operand_text, render_bytecode};

use crate::client::Token;
use crate::view::Tone;
use serde_json::Value;
use std::fmt::Write;

/// Width the token type column is padded to
pub const TYPE_WIDTH: usize = 15;

/// Minimum visual width of the quoted-lexeme column, measured from the lexeme
pub const LEXEME_WIDTH: usize = 10;

/// One line per token, numbered from 1 in list order
pub fn render_tokens(tokens: &[Token]) -> String {
    let mut out = String::new();
    for (idx, token) in tokens.iter().enumerate() {
        let _ = writeln!(
            out,
            "Token {}: {:<width$} | \"{}\"{} | Line {}, Col {}",
            idx + 1,
            token.kind,
            token.lexeme,
            lexeme_spacer(&token.lexeme),
            token.line,
            token.column,
            width = TYPE_WIDTH
        );
    }
    out
}

fn lexeme_spacer(lexeme: &str) -> String {
    if lexeme.is_empty() {
        return " ".repeat(LEXEME_WIDTH);
    }
    let len = lexeme.chars().count();
    " ".repeat(LEXEME_WIDTH.saturating_sub(len).max(1))
}

/// Pretty-print the syntax tree with 2-space indentation, keys in received order
pub fn render_tree(tree: &Value) -> String {
    serde_json::to_string_pretty(tree).unwrap_or_else(|_| tree.to_string())
}

/// Semantic panel tone: error only for a failed compile whose report mentions "error"
pub fn semantic_tone(success: bool, semantic: &str) -> Tone {
    if !success && semantic.contains("error") {
        Tone::Error
    } else {
        Tone::Normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn token(kind: &str, lexeme: &str, line: u32, column: u32) -> Token {
        Token {
            kind: kind.to_string(),
            lexeme: lexeme.to_string(),
            line,
            column,
        }
    }

    #[test]
    fn test_token_lines() {
        let tokens = vec![
            token("IDENTIFIER", "print", 1, 1),
            token("NUMBER", "42", 1, 7),
            token("EOF", "", 2, 1),
        ];

        let expected = concat!(
            "Token 1: IDENTIFIER      | \"print\"      | Line 1, Col 1\n",
            "Token 2: NUMBER          | \"42\"         | Line 1, Col 7\n",
            "Token 3: EOF             | \"\"           | Line 2, Col 1\n",
        );
        assert_eq!(render_tokens(&tokens), expected);
    }

    #[test]
    fn test_long_lexeme_keeps_one_space() {
        let tokens = vec![token("STRING", "a rather long literal", 3, 9)];
        assert_eq!(
            render_tokens(&tokens),
            "Token 1: STRING          | \"a rather long literal\"  | Line 3, Col 9\n"
        );
    }

    #[test]
    fn test_exactly_ten_char_lexeme() {
        let tokens = vec![token("IDENTIFIER", "abcdefghij", 1, 1)];
        assert_eq!(
            render_tokens(&tokens),
            "Token 1: IDENTIFIER      | \"abcdefghij\"  | Line 1, Col 1\n"
        );
    }

    #[test]
    fn test_no_tokens_renders_nothing() {
        assert_eq!(render_tokens(&[]), "");
    }

    #[test]
    fn test_tree_indentation() {
        let tree = json!({"type": "Program", "statements": [{"type": "PrintStatement"}]});
        let expected = "{\n  \"type\": \"Program\",\n  \"statements\": [\n    {\n      \"type\": \"PrintStatement\"\n    }\n  ]\n}";
        assert_eq!(render_tree(&tree), expected);
    }

    #[test]
    fn test_semantic_tone_needs_both_conditions() {
        assert_eq!(semantic_tone(false, "1 error found"), Tone::Error);
        assert_eq!(semantic_tone(false, "all checks passed"), Tone::Normal);
        assert_eq!(semantic_tone(true, "1 error found"), Tone::Normal);
        assert_eq!(semantic_tone(true, "all checks passed"), Tone::Normal);
    }
}
