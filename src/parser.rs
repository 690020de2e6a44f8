use std::fmt;

use crate::ast::{Token, TokenKind};
use crate::dialect::Dialect;
use crate::error::ParseError;
use crate::lexer::Lexer;

/// Escapes that take the next word of input as their argument.
pub const ESCAPES_WITH_ARGUMENTS: &[&str] = &["\\f", "\\s", "\\m", "\\("];

pub fn takes_argument(escape: &str) -> bool {
    ESCAPES_WITH_ARGUMENTS.contains(&escape)
}

/// State of the parser state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParserState {
    Comment,
    Macro,
    InlineMacro,
    /// Start of a line, ready for a new structural unit
    LineBreak,
    Text,
    /// An escape is waiting for its argument
    Escape,
}

impl fmt::Display for ParserState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParserState::Comment => "comment",
            ParserState::Macro => "macro",
            ParserState::InlineMacro => "inline macro",
            ParserState::LineBreak => "line break",
            ParserState::Text => "text",
            ParserState::Escape => "escape",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    StartMacro,
    StartText,
    Concatenate,
    AddInlineMacro,
    StartEscape,
    EscapeArgument,
    HandleBreak,
    Ignore,
    CleanBreak,
}

/// The transition table. `None` means the grammar has no answer for the pair.
fn transition(state: ParserState, kind: TokenKind) -> Option<Action> {
    use ParserState as S;
    use TokenKind as K;

    let action = match (state, kind) {
        (S::Comment, K::LineBreak) => Action::HandleBreak,
        (S::Comment, _) => Action::Ignore,

        (S::LineBreak, K::Macro) => Action::StartMacro,
        (S::LineBreak, K::Text) => Action::StartText,
        (S::LineBreak, K::InlineMacro) => Action::AddInlineMacro,
        (S::LineBreak, K::Escape) => Action::StartEscape,
        (S::LineBreak, K::Comment) => Action::Ignore,
        (S::LineBreak, K::LineBreak) => Action::HandleBreak,
        (S::LineBreak, _) => Action::CleanBreak,

        (S::Macro | S::InlineMacro | S::Text, K::Text | K::Macro) => Action::Concatenate,
        (S::Macro | S::InlineMacro | S::Text, K::InlineMacro) => Action::AddInlineMacro,
        (S::Macro | S::InlineMacro | S::Text, K::Escape) => Action::StartEscape,
        (S::Macro | S::InlineMacro | S::Text, K::Comment) => Action::Ignore,
        (S::Macro | S::InlineMacro | S::Text, K::LineBreak) => Action::HandleBreak,

        (S::Escape, K::Text | K::Macro | K::InlineMacro) => Action::EscapeArgument,
        (S::Escape, K::Escape) => Action::StartEscape,
        (S::Escape, K::Comment) => Action::Ignore,
        (S::Escape, K::LineBreak) => Action::HandleBreak,

        _ => return None,
    };

    Some(action)
}

/// Builds a token tree out of the flat token stream produced by the lexer.
#[derive(Debug)]
pub struct Parser {
    tokens: Vec<Token>,
    ast: Vec<Token>,
    state: ParserState,
    /// How many levels below the root new tokens are appended, always
    /// following the last token of each level.
    depth: usize,
    /// State to go back to once a pending escape got its argument.
    resume: ParserState,
    breaks: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            ast: Vec::new(),
            state: ParserState::LineBreak,
            depth: 0,
            resume: ParserState::LineBreak,
            breaks: 0,
        }
    }

    pub fn from_source(source: &str, dialect: Dialect) -> Self {
        Self::new(Lexer::new(source, dialect).lex())
    }

    pub fn build_ast(mut self) -> Result<Vec<Token>, ParseError> {
        let tokens = std::mem::take(&mut self.tokens);

        for (position, token) in tokens.into_iter().enumerate() {
            let Some(action) = transition(self.state, token.kind) else {
                return Err(ParseError::UnexpectedToken {
                    state: self.state,
                    kind: token.kind,
                    position,
                });
            };

            if token.kind != TokenKind::LineBreak {
                self.breaks = 0;
            }

            tracing::trace!(state = %self.state, kind = %token.kind, ?action, "transition");
            self.apply(action, token);
        }

        Ok(self.ast)
    }

    fn apply(&mut self, action: Action, token: Token) {
        match action {
            Action::StartMacro => self.start_macro(token),
            Action::StartText => {
                self.state = ParserState::Text;
                self.push_text(token);
            }
            Action::Concatenate => self.push_text(token),
            Action::AddInlineMacro => self.add_inline_macro(token),
            Action::StartEscape => self.start_escape(token),
            Action::EscapeArgument => self.escape_argument(token),
            Action::HandleBreak => self.handle_break(),
            Action::Ignore => self.state = ParserState::Comment,
            Action::CleanBreak => {
                tracing::debug!(value = %token.value, "dropping token at line start");
            }
        }
    }

    /// The container new tokens are appended to.
    fn scope_mut(&mut self) -> &mut Vec<Token> {
        let mut scope = &mut self.ast;
        for _ in 0..self.depth {
            if scope.is_empty() {
                break;
            }
            let last = scope.len() - 1;
            scope = &mut scope[last].children;
        }
        scope
    }

    fn start_macro(&mut self, token: Token) {
        self.scope_mut().push(token);
        self.depth += 1;
        self.state = ParserState::Macro;
    }

    /// Mix text into the last token of the scope, or start a new text node.
    fn push_text(&mut self, token: Token) {
        let token = token.into_text();
        let scope = self.scope_mut();

        match scope.last_mut() {
            Some(last) if last.accepts_text() => {
                last.mix(&token);
            }
            _ => scope.push(token),
        }
    }

    fn add_inline_macro(&mut self, token: Token) {
        self.scope_mut().push(token);
        self.depth += 1;
        self.state = ParserState::InlineMacro;
    }

    fn start_escape(&mut self, token: Token) {
        let pending = takes_argument(&token.value);
        self.scope_mut().push(token);

        if self.state != ParserState::Escape {
            self.resume = self.state;
        }

        if pending {
            self.state = ParserState::Escape;
        } else {
            self.resume_after_escape();
        }
    }

    fn escape_argument(&mut self, token: Token) {
        // Blanks here are the separator inserted around the escape by the lexer.
        if token.kind == TokenKind::Text && token.value.trim().is_empty() {
            return;
        }

        let argument = token.into_text();
        let scope = self.scope_mut();
        let placeholder = match scope.last_mut() {
            Some(escape) => {
                escape.add_child(argument);
                escape.last_child_is_not_space()
            }
            None => {
                scope.push(argument);
                false
            }
        };

        if placeholder {
            scope.push(Token::empty());
        }

        self.resume_after_escape();
    }

    fn resume_after_escape(&mut self) {
        self.state = match self.resume {
            ParserState::LineBreak | ParserState::Escape => ParserState::Text,
            state => state,
        };
    }

    fn handle_break(&mut self) {
        self.depth = 0;
        self.state = ParserState::LineBreak;
        self.breaks += 1;

        if self.ast.is_empty() {
            return;
        }

        match self.breaks {
            1 => self.push_text(Token::text(" ")),
            2 => self.ast.push(Token::new("br", TokenKind::Macro)),
            _ => {}
        }
    }
}
