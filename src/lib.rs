//! Converts `man` and `mdoc` formatted documents to HTML fragments.
//!
//! Source text goes through a [`Lexer`], a state machine [`Parser`] that
//! builds a token tree, and an [`Interpreter`] that dispatches every macro,
//! inline macro and escape to a [`MacroTable`].

pub mod ast;
pub mod buffer;
pub mod dialect;
pub mod error;
pub mod generator;
pub mod grammar;
pub mod html;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod patterns;

pub use ast::{Token, TokenKind};
pub use buffer::{Buffer, Diagnostic, Style};
pub use dialect::Dialect;
pub use error::{Error, ParseError};
pub use generator::{HtmlGenerator, Interpreter, generate};
pub use lexer::{Lexer, TokenFactory};
pub use macros::MacroTable;
pub use parser::{Parser, ParserState};

/// Convert a whole document with the built-in macro catalog of `dialect`.
pub fn to_html(source: &str, dialect: Dialect) -> Result<String, Error> {
    HtmlGenerator::new(dialect).generate(source)
}
