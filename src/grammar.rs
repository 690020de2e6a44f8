use pest::Parser;
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "src/roff.pest"]
pub struct RoffGrammar;

impl RoffGrammar {
    /// Split cleaned source text into lexemes: newlines, blank runs and words.
    pub fn lexemes(input: &str) -> Result<Vec<&str>, Box<pest::error::Error<Rule>>> {
        let mut pairs = RoffGrammar::parse(Rule::source, input).map_err(Box::new)?;
        let Some(source) = pairs.next() else {
            return Ok(Vec::new());
        };

        Ok(source
            .into_inner()
            .filter(|pair| pair.as_rule() != Rule::EOI)
            .map(|pair| pair.as_str())
            .collect())
    }

    /// Split a raw argument string on blanks, keeping double quoted groups whole.
    ///
    /// The quotes themselves are left in place; see [`crate::html::parse_arguments`].
    pub fn arguments(input: &str) -> Result<Vec<&str>, Box<pest::error::Error<Rule>>> {
        let mut pairs = RoffGrammar::parse(Rule::arguments, input).map_err(Box::new)?;
        let Some(arguments) = pairs.next() else {
            return Ok(Vec::new());
        };

        Ok(arguments
            .into_inner()
            .filter(|pair| matches!(pair.as_rule(), Rule::quoted | Rule::bare))
            .map(|pair| pair.as_str())
            .collect())
    }
}
