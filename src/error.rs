use thiserror::Error;

use crate::ast::TokenKind;
use crate::parser::ParserState;

/// Structural failure of the parser state machine. Fatal for the document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("no transition from the {state} state on a {kind} token (token #{position})")]
    UnexpectedToken {
        state: ParserState,
        kind: TokenKind,
        position: usize,
    },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("unknown macro dialect `{0}`, expected `an` or `doc`")]
    UnknownDialect(String),
}
