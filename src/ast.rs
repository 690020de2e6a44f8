use std::fmt;

/// Kind of a parsed token
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `\"` comment, runs until the end of the line
    Comment,
    /// Line-initial macro such as `.TH`
    Macro,
    /// Callable macro name used in the middle of a line (`doc` dialect)
    InlineMacro,
    /// End of an input line
    LineBreak,
    /// Literal text, including runs of whitespace
    Text,
    /// Placeholder that becomes typed once content is mixed into it
    #[default]
    Empty,
    /// Backslash escape sequence such as `\f`
    Escape,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Comment => "comment",
            TokenKind::Macro => "macro",
            TokenKind::InlineMacro => "inline macro",
            TokenKind::LineBreak => "line break",
            TokenKind::Text => "text",
            TokenKind::Empty => "empty",
            TokenKind::Escape => "escape",
        };
        f.write_str(name)
    }
}

/// A node of the token tree.
///
/// The lexer produces these flat and childless; the parser nests argument
/// tokens into the `children` of macros, inline macros and escapes.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Token {
    pub value: String,
    pub kind: TokenKind,
    pub children: Vec<Token>,
}

impl Token {
    pub fn new(value: impl Into<String>, kind: TokenKind) -> Self {
        Self {
            value: value.into(),
            kind,
            children: Vec::new(),
        }
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self::new(value, TokenKind::Text)
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Macros, inline macros and escapes are dispatched to the macro table.
    pub fn is_structural(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Macro | TokenKind::InlineMacro | TokenKind::Escape
        )
    }

    /// Whether text arriving in the same scope should be mixed into this token.
    pub fn accepts_text(&self) -> bool {
        matches!(self.kind, TokenKind::Text | TokenKind::Empty)
    }

    pub fn add_child(&mut self, token: Token) -> &mut Self {
        debug_assert!(self.kind != TokenKind::Text, "text tokens have no children");
        self.children.push(token);
        self
    }

    pub fn last_child(&self) -> Option<&Token> {
        self.children.last()
    }

    /// Concatenate the value of `other` into this token. An empty
    /// placeholder takes the kind of whatever is mixed into it.
    pub fn mix(&mut self, other: &Token) -> &mut Self {
        self.value.push_str(&other.value);
        if self.kind == TokenKind::Empty {
            self.kind = other.kind;
        }
        self
    }

    /// True when the last child ends with a non-whitespace character.
    pub fn last_child_is_not_space(&self) -> bool {
        self.last_child()
            .and_then(|child| child.value.chars().last())
            .is_some_and(|c| !c.is_whitespace())
    }

    /// Reinterpret this token as literal text.
    ///
    /// Macro tokens get their control character back, so a `.word` that
    /// turns out not to start a line reads the way it was written.
    pub fn into_text(self) -> Token {
        let value = match self.kind {
            TokenKind::Macro => format!(".{}", self.value),
            _ => self.value,
        };
        Token::text(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mix_concatenates_values() {
        let mut token = Token::text("FOO");
        token.mix(&Token::text(" BAR"));
        assert_eq!(token.value, "FOO BAR");
        assert_eq!(token.kind, TokenKind::Text);
    }

    #[test]
    fn test_mix_types_empty_placeholder() {
        let mut token = Token::empty();
        token.mix(&Token::text("word"));
        assert_eq!(token, Token::text("word"));
    }

    #[test]
    fn test_mix_keeps_receiver_kind() {
        let mut token = Token::new("TH", TokenKind::Macro);
        token.mix(&Token::text("X"));
        assert_eq!(token.kind, TokenKind::Macro);
        assert_eq!(token.value, "THX");
    }

    #[test]
    fn test_last_child_is_not_space() {
        let mut escape = Token::new("\\f", TokenKind::Escape);
        assert!(!escape.last_child_is_not_space());

        escape.add_child(Token::text("  "));
        assert!(!escape.last_child_is_not_space());

        escape.add_child(Token::text("B"));
        assert!(escape.last_child_is_not_space());
    }

    #[test]
    fn test_macro_into_text_restores_dot() {
        let token = Token::new("bar", TokenKind::Macro).into_text();
        assert_eq!(token, Token::text(".bar"));

        let token = Token::new("Fl", TokenKind::InlineMacro).into_text();
        assert_eq!(token, Token::text("Fl"));
    }
}
