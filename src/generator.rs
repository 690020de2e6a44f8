use crate::ast::{Token, TokenKind};
use crate::buffer::{Buffer, Diagnostic, Style};
use crate::dialect::Dialect;
use crate::error::Error;
use crate::html::{clean_quotes, close_all_tags};
use crate::macros::MacroTable;
use crate::parser::{self, Parser};

/// Macros that open a new major section. Every open font mode and block tag
/// is closed before they run.
pub const SECTION_MACROS: &[&str] = &["SH", "Sh"];

/// Walks a token tree, dispatching structural tokens to a macro table.
#[derive(Debug)]
pub struct Interpreter<'m> {
    macros: &'m MacroTable,
    buffer: Buffer,
}

impl<'m> Interpreter<'m> {
    pub fn new(macros: &'m MacroTable) -> Self {
        Self::with_buffer(macros, Buffer::default())
    }

    pub fn with_buffer(macros: &'m MacroTable, buffer: Buffer) -> Self {
        Self { macros, buffer }
    }

    pub fn render(&mut self, tokens: &[Token]) -> String {
        let mut result = String::new();

        for token in tokens {
            if token.is_structural() {
                result.push_str(&self.dispatch(token));
            } else {
                result.push_str(&clean_quotes(&token.value));
            }
        }

        result
    }

    /// Close everything still open at the end of the document.
    pub fn finish(&mut self) -> String {
        let mut result = close_all_tags(&mut self.buffer.font_modes);
        result.push_str(&close_all_tags(&mut self.buffer.open_tags));
        result.push_str(&close_all_tags(&mut self.buffer.section_tags));
        result
    }

    fn dispatch(&mut self, token: &Token) -> String {
        let name = token.value.as_str();
        let mut result = String::new();

        if SECTION_MACROS.contains(&name) {
            result.push_str(&close_all_tags(&mut self.buffer.font_modes));
            result.push_str(&close_all_tags(&mut self.buffer.open_tags));
        }

        // An escape that never received its argument renders as nothing.
        if token.kind == TokenKind::Escape
            && parser::takes_argument(name)
            && token.children.is_empty()
        {
            return result;
        }

        let argument = self.render(&token.children);
        match self.macros.get(name) {
            Some(action) => result.push_str(&action(&argument, &mut self.buffer)),
            None => {
                tracing::warn!(name, kind = %token.kind, "unknown macro");
                self.buffer.diagnostics.push(Diagnostic::UnknownMacro {
                    name: name.to_string(),
                });
                result.push_str(&argument);
            }
        }

        result
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    pub fn into_buffer(self) -> Buffer {
        self.buffer
    }
}

/// Render a token tree with a fresh formatting context.
pub fn generate(tree: &[Token], macros: &MacroTable) -> String {
    Interpreter::new(macros).render(tree)
}

/// Converts whole documents of one dialect to HTML.
#[derive(Debug)]
pub struct HtmlGenerator {
    dialect: Dialect,
    style: Style,
    macros: MacroTable,
}

impl HtmlGenerator {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            style: Style::default(),
            macros: MacroTable::for_dialect(dialect),
        }
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Replace the macro table entirely.
    pub fn with_macros(mut self, macros: MacroTable) -> Self {
        self.macros = macros;
        self
    }

    pub fn macros_mut(&mut self) -> &mut MacroTable {
        &mut self.macros
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn generate(&self, source: &str) -> Result<String, Error> {
        Ok(self.generate_with_buffer(source)?.0)
    }

    /// Like [`HtmlGenerator::generate`], also returning the final formatting
    /// context so callers can inspect page metadata and diagnostics.
    pub fn generate_with_buffer(&self, source: &str) -> Result<(String, Buffer), Error> {
        let buffer = Buffer::new(self.style.clone());
        if source.is_empty() {
            return Ok((String::new(), buffer));
        }

        let tree = Parser::from_source(source, self.dialect).build_ast()?;
        tracing::debug!(dialect = %self.dialect, nodes = tree.len(), "parsed document");

        let mut interpreter = Interpreter::with_buffer(&self.macros, buffer);
        let mut html = interpreter.render(&tree);
        html.push_str(&interpreter.finish());

        let buffer = interpreter.into_buffer();
        if !buffer.diagnostics.is_empty() {
            tracing::debug!(count = buffer.diagnostics.len(), "document used unknown macros");
        }

        Ok((html, buffer))
    }
}

impl Default for HtmlGenerator {
    fn default() -> Self {
        Self::new(Dialect::default())
    }
}
