//! Regular expressions shared by the lexer, the generator and the macro catalog.

use once_cell::sync::Lazy;
use regex::Regex;

/// A backslash followed by anything but a double quote.
pub static ESCAPE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"(\\[^"])"#).unwrap());

/// `\"` comments, optionally introduced by a control character.
pub static COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r#"(\.\\)?\\""#).unwrap());

/// A dot followed by a non-dot character.
pub static MACRO: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\.[^.]").unwrap());

pub static LINE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[ \t\r]*\n$").unwrap());

/// One pair of double quotes wrapping the whole string.
pub static WRAPPING_QUOTES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^\s*"([^"]*)"\s*$"#).unwrap());

/// Signed relative size at the start of a `\s` argument.
pub static REAL_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)^([-+]?\d+)(.*)$").unwrap());

pub static NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d").unwrap());

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_macro_needs_leading_dot() {
        assert!(MACRO.is_match(".TH"));
        assert!(!MACRO.is_match(" .TH"));
        assert!(!MACRO.is_match("TH."));
        assert!(!MACRO.is_match(".."));
    }

    #[test]
    fn test_comment_anywhere_in_lexeme() {
        assert!(COMMENT.is_match(r#".\""#));
        assert!(COMMENT.is_match(r#"\""#));
        assert!(COMMENT.is_match(r#"title\"comment"#));
        assert!(!COMMENT.is_match(r"\fB"));
    }

    #[test]
    fn test_line_break() {
        assert!(LINE_BREAK.is_match("\n"));
        assert!(LINE_BREAK.is_match(" \t\n"));
        assert!(!LINE_BREAK.is_match(" "));
        assert!(!LINE_BREAK.is_match("a\n"));
    }
}
