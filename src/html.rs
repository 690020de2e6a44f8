//! Markup helpers shared by the generator and the macro catalog.

use std::borrow::Cow;

use crate::grammar::RoffGrammar;
use crate::patterns;

/// Remove one pair of double quotes wrapping the whole string.
///
/// `"X"` becomes `X`, while `"X" "Y"` and `X "Y` are left untouched.
pub fn clean_quotes(value: &str) -> Cow<'_, str> {
    patterns::WRAPPING_QUOTES.replace(value, "${1}")
}

/// Split a rendered argument string into arguments. Double quoted groups form
/// a single argument; surrounding quotes and blanks are stripped.
pub fn parse_arguments(args: &str) -> Vec<String> {
    let raw = RoffGrammar::arguments(args).unwrap_or_else(|err| {
        tracing::error!(%err, "argument grammar rejected input");
        args.split_whitespace().collect()
    });

    raw.into_iter()
        .map(|arg| clean_quotes(arg).trim().to_owned())
        .collect()
}

/// Wrap `content` in a tag. `name` may describe nested tags as `p>a`.
pub fn generate_tag(name: &str, content: &str) -> String {
    let tags: Vec<&str> = name.split('>').filter(|tag| !tag.is_empty()).collect();
    let mut result = String::new();

    for tag in &tags {
        result.push_str(&format!("<{tag}> "));
    }
    result.push_str(content);
    for tag in tags.iter().rev() {
        result.push_str(&format!(" </{tag}>"));
    }

    result
}

/// Wrap each argument alternately in `first` and `second`, as `.BI` does.
pub fn generate_altern_tag(first: &str, second: &str, content: &str) -> String {
    parse_arguments(content)
        .iter()
        .zip([first, second].into_iter().cycle())
        .map(|(arg, tag)| generate_tag(tag, arg))
        .collect()
}

pub fn close_tag(tag: &str) -> String {
    format!("</{tag}>")
}

/// Close every tag in the stack, innermost first, leaving it empty.
pub fn close_all_tags(tags: &mut Vec<String>) -> String {
    close_tags_until("", tags)
}

/// Close tags innermost first until `limit` has been closed. When `limit`
/// is not in the stack every tag is closed.
pub fn close_tags_until(limit: &str, tags: &mut Vec<String>) -> String {
    let mut result = String::new();

    while let Some(tag) = tags.pop() {
        result.push_str(&close_tag(&tag));
        if tag == limit {
            break;
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_quotes_removes_wrapping_pair() {
        assert_eq!(clean_quotes("\"Lorem Ipsum\""), "Lorem Ipsum");
        assert_eq!(clean_quotes(" \"X\" "), "X");
    }

    #[test]
    fn test_clean_quotes_keeps_partial_quotes() {
        assert_eq!(clean_quotes("Lorem \"Ipsum"), "Lorem \"Ipsum");
        assert_eq!(clean_quotes("\"Lorem\" \"Ipsum\""), "\"Lorem\" \"Ipsum\"");
        assert_eq!(clean_quotes("\"X\" \"Y\""), "\"X\" \"Y\"");
    }

    #[test]
    fn test_parse_arguments_groups_quotes() {
        assert_eq!(
            parse_arguments(" FOO 1 \"MARCH 1995\" Linux \"User Manuals\""),
            vec!["FOO", "1", "MARCH 1995", "Linux", "User Manuals"]
        );
        assert_eq!(parse_arguments("FOO \"\" BAR"), vec!["FOO", "", "BAR"]);
        assert!(parse_arguments("   ").is_empty());
    }

    #[test]
    fn test_generate_tag() {
        assert_eq!(generate_tag("span", "test"), "<span> test </span>");
        assert_eq!(generate_tag("p>strong", "x"), "<p> <strong> x </strong> </p>");
    }

    #[test]
    fn test_generate_altern_tag() {
        assert_eq!(
            generate_altern_tag("strong", "i", "a b c"),
            "<strong> a </strong><i> b </i><strong> c </strong>"
        );
    }

    #[test]
    fn test_close_all_tags_is_lifo_and_empties_stack() {
        let mut tags = vec!["div".to_string(), "p".to_string(), "span".to_string()];
        assert_eq!(close_all_tags(&mut tags), "</span></p></div>");
        assert!(tags.is_empty());
    }

    #[test]
    fn test_close_tags_until_stops_at_limit() {
        let mut tags = vec!["section".to_string(), "div".to_string(), "span".to_string()];
        assert_eq!(close_tags_until("div", &mut tags), "</span></div>");
        assert_eq!(tags, vec!["section".to_string()]);
    }

    #[test]
    fn test_close_tag() {
        assert_eq!(close_tag("p"), "</p>");
    }
}
