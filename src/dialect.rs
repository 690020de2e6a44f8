use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Macro names that `mdoc` allows to be called from within another macro line.
pub const CALLABLE_MACROS: &[&str] = &[
    "Ac", "Ao", "Bc", "Bo", "Brc", "Bro", "Dc", "Do", "Ec", "Eo", "Fc", "Oc", "Oo", "Pc", "Po",
    "Qc", "Qo", "Sc", "So", "Xc", "Xo", "Aq", "Bq", "Brq", "Dq", "Op", "Pq", "Ql", "Qq", "Sq",
    "Vt", "Ta", "Ad", "An", "Ap", "Ar", "At", "Bsx", "Bx", "Cd", "Cm", "Dv", "Dx", "Em", "Er",
    "Ev", "Fa", "Fl", "Fn", "Ft", "Fx", "Ic", "Li", "Lk", "Ms", "Mt", "Nm", "Ns", "Nx", "Ox",
    "Pa", "Pf", "Sx", "Sy", "Tn", "Ux", "Va", "Xr",
];

/// The macro package a document is written against.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// `man(7)`
    An,
    /// `mdoc(7)`
    #[default]
    Doc,
}

impl Dialect {
    pub fn supports_inline_macros(self) -> bool {
        matches!(self, Dialect::Doc)
    }

    /// Whether `name` is lexed as an inline macro under this dialect.
    pub fn is_callable(self, name: &str) -> bool {
        self.supports_inline_macros() && CALLABLE_MACROS.contains(&name)
    }
}

impl FromStr for Dialect {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "an" | "man" => Ok(Dialect::An),
            "doc" | "mdoc" => Ok(Dialect::Doc),
            _ => Err(Error::UnknownDialect(s.to_owned())),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::An => f.write_str("an"),
            Dialect::Doc => f.write_str("doc"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_callable_only_under_doc() {
        assert!(Dialect::Doc.is_callable("Fl"));
        assert!(!Dialect::An.is_callable("Fl"));
        assert!(!Dialect::Doc.is_callable("TH"));
    }

    #[test]
    fn test_parse_dialect_names() {
        assert_eq!("an".parse::<Dialect>().unwrap(), Dialect::An);
        assert_eq!("man".parse::<Dialect>().unwrap(), Dialect::An);
        assert_eq!("mdoc".parse::<Dialect>().unwrap(), Dialect::Doc);
        assert!(matches!(
            "ms".parse::<Dialect>(),
            Err(Error::UnknownDialect(name)) if name == "ms"
        ));
    }
}
