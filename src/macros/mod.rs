use std::collections::HashMap;
use std::fmt;

use crate::buffer::Buffer;
use crate::dialect::Dialect;

pub mod an;
pub mod defaults;
pub mod doc;

/// A macro action: receives the rendered argument string and the formatting
/// context, returns the markup to emit in place of the macro.
pub type MacroFn = dyn Fn(&str, &mut Buffer) -> String + Send + Sync;

/// Registry of macro actions keyed by name (`TH`, `Bl`, `\f`, ...).
#[derive(Default)]
pub struct MacroTable(HashMap<String, Box<MacroFn>>);

impl MacroTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The default requests and escapes with the dialect's catalog merged
    /// over them.
    pub fn for_dialect(dialect: Dialect) -> Self {
        let mut table = Self::new();
        defaults::register(&mut table);
        match dialect {
            Dialect::An => an::register(&mut table),
            Dialect::Doc => doc::register(&mut table),
        }
        table
    }

    /// Register an action, replacing any previous one with the same name.
    pub fn register<F>(&mut self, name: impl Into<String>, action: F)
    where
        F: Fn(&str, &mut Buffer) -> String + Send + Sync + 'static,
    {
        self.0.insert(name.into(), Box::new(action));
    }

    pub fn get(&self, name: &str) -> Option<&MacroFn> {
        self.0.get(name).map(Box::as_ref)
    }

    pub fn is_defined(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for MacroTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.0.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_tuple("MacroTable").field(&names).finish()
    }
}
