use crate::ast::{Token, TokenKind};
use crate::dialect::Dialect;
use crate::grammar::RoffGrammar;
use crate::patterns;

/// Maps raw lexemes to typed tokens under a given dialect.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokenFactory {
    dialect: Dialect,
}

impl TokenFactory {
    pub fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }

    /// Classify a lexeme. `None` marks the end of the stream and yields an
    /// [`TokenKind::Empty`] token.
    pub fn create(&self, lexeme: Option<&str>) -> Token {
        let Some(raw) = lexeme else {
            return Token::empty();
        };

        if patterns::COMMENT.is_match(raw) {
            Token::new(raw, TokenKind::Comment)
        } else if patterns::MACRO.is_match(raw) {
            Token::new(&raw[1..], TokenKind::Macro)
        } else if self.dialect.is_callable(raw) {
            Token::new(raw, TokenKind::InlineMacro)
        } else if patterns::LINE_BREAK.is_match(raw) {
            Token::new(raw, TokenKind::LineBreak)
        } else if raw.starts_with('\\') {
            Token::new(raw, TokenKind::Escape)
        } else {
            Token::text(raw)
        }
    }
}

/// Turns a document into a flat token stream, tracking line and column.
#[derive(Debug)]
pub struct Lexer {
    source: Vec<String>,
    position: usize,
    line: usize,
    column: usize,
    factory: TokenFactory,
}

impl Lexer {
    pub fn new(source: &str, dialect: Dialect) -> Self {
        let cleaned = Self::clean_source(source);
        let source = match RoffGrammar::lexemes(&cleaned) {
            Ok(lexemes) => lexemes.into_iter().map(str::to_owned).collect(),
            Err(err) => {
                tracing::error!(%err, "lexeme grammar rejected input, keeping it as text");
                vec![cleaned.clone()]
            }
        };

        Self {
            source,
            position: 0,
            line: 1,
            column: 0,
            factory: TokenFactory::new(dialect),
        }
    }

    /// Separate escape sequences from surrounding text and escape the two
    /// characters that would otherwise break the generated markup.
    pub fn clean_source(source: &str) -> String {
        patterns::ESCAPE
            .replace_all(source, " ${1} ")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
    }

    pub fn lex(mut self) -> Vec<Token> {
        let factory = self.factory;
        let mut tokens = Vec::with_capacity(self.source.len());

        while let Some(lexeme) = self.next_lexeme() {
            tokens.push(factory.create(Some(lexeme)));
        }

        tracing::trace!(count = tokens.len(), lines = self.line, "lexed document");
        tokens
    }

    /// Advance the cursor, returning `None` once every lexeme was consumed.
    pub fn next_lexeme(&mut self) -> Option<&str> {
        let lexeme = self.source.get(self.position)?;
        self.position += 1;

        if lexeme.ends_with('\n') {
            self.column = 0;
            self.line += 1;
        } else {
            self.column += lexeme.chars().count();
        }

        Some(lexeme.as_str())
    }

    pub fn lexemes(&self) -> &[String] {
        &self.source
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(".TH", Dialect::An, TokenKind::Macro, "TH")]
    #[case("\n", Dialect::An, TokenKind::LineBreak, "\n")]
    #[case("  \n", Dialect::Doc, TokenKind::LineBreak, "  \n")]
    #[case("Fl", Dialect::Doc, TokenKind::InlineMacro, "Fl")]
    #[case("Fl", Dialect::An, TokenKind::Text, "Fl")]
    #[case(r#".\""#, Dialect::An, TokenKind::Comment, r#".\""#)]
    #[case(r#"\""#, Dialect::Doc, TokenKind::Comment, r#"\""#)]
    #[case(r"\f", Dialect::An, TokenKind::Escape, r"\f")]
    #[case("..", Dialect::An, TokenKind::Text, "..")]
    #[case("word", Dialect::Doc, TokenKind::Text, "word")]
    fn test_factory_classifies(
        #[case] raw: &str,
        #[case] dialect: Dialect,
        #[case] kind: TokenKind,
        #[case] value: &str,
    ) {
        let token = TokenFactory::new(dialect).create(Some(raw));
        assert_eq!(token.kind, kind);
        assert_eq!(token.value, value);
        assert!(token.children.is_empty());
    }

    #[test]
    fn test_factory_end_of_stream_is_empty() {
        let token = TokenFactory::default().create(None);
        assert_eq!(token.kind, TokenKind::Empty);
        assert_eq!(token.value, "");
    }

    #[test]
    fn test_clean_source_spaces_escapes() {
        assert_eq!(Lexer::clean_source(r"[\-\-version]"), r"[ \-  \- version]");
    }

    #[test]
    fn test_clean_source_leaves_comments_alone() {
        assert_eq!(Lexer::clean_source(r#".\" note"#), r#".\" note"#);
    }

    #[test]
    fn test_clean_source_escapes_angle_brackets() {
        assert_eq!(Lexer::clean_source("<test>"), "&lt;test&gt;");
    }

    #[test]
    fn test_splits_source_on_whitespace() {
        let lexer = Lexer::new(".TH TITLE\n.SH  TEST", Dialect::An);
        assert_eq!(
            lexer.lexemes(),
            &[".TH", " ", "TITLE", "\n", ".SH", "  ", "TEST"]
        );
        assert_eq!(lexer.line(), 1);
        assert_eq!(lexer.column(), 0);
    }

    #[test]
    fn test_next_lexeme_tracks_line_and_column() {
        let mut lexer = Lexer::new(".TH TITLE\n.SH  TEST", Dialect::An);

        assert_eq!(lexer.next_lexeme(), Some(".TH"));
        assert_eq!(lexer.column(), 3);
        assert_eq!(lexer.line(), 1);

        lexer.next_lexeme();
        lexer.next_lexeme();
        assert_eq!(lexer.column(), 9);
        assert_eq!(lexer.position(), 3);

        assert_eq!(lexer.next_lexeme(), Some("\n"));
        assert_eq!(lexer.column(), 0);
        assert_eq!(lexer.line(), 2);
    }

    #[test]
    fn test_lex_returns_typed_tokens() {
        let tokens = Lexer::new(".TH TITLE\n.SH  TEST", Dialect::An).lex();
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();

        assert_eq!(
            kinds,
            vec![
                TokenKind::Macro,
                TokenKind::Text,
                TokenKind::Text,
                TokenKind::LineBreak,
                TokenKind::Macro,
                TokenKind::Text,
                TokenKind::Text,
            ]
        );
        assert_eq!(tokens[0].value, "TH");
        assert_eq!(tokens[1].value, " ");
        assert_eq!(tokens[2].value, "TITLE");
    }

    #[test]
    fn test_lex_isolates_escapes() {
        let tokens = Lexer::new(r"\fBbold", Dialect::An).lex();
        let escape = tokens
            .iter()
            .find(|t| t.kind == TokenKind::Escape)
            .unwrap();
        assert_eq!(escape.value, r"\f");
        assert!(tokens.iter().any(|t| t.value == "Bbold"));
    }
}
