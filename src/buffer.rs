/// Style settings shared by every macro of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Style {
    /// Indentation unit, in percent of the page width.
    pub indent: u32,
    /// Base font size in pixels; `\s` adjusts it relative to this value.
    pub font_size: i32,
    pub hyphens: Option<String>,
    pub text_align: Option<String>,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            indent: 8,
            font_size: 16,
            hyphens: None,
            text_align: None,
        }
    }
}

/// One open `.Bl` list.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ListState {
    pub flags: Vec<String>,
    /// Next number handed out by an `-enum` list.
    pub counter: u32,
    /// Whether an item was opened and still needs closing.
    pub is_open: bool,
}

impl ListState {
    pub fn new(flags: Vec<String>) -> Self {
        Self {
            flags,
            counter: 1,
            is_open: false,
        }
    }
}

/// Bibliographic reference collected between `.Rs` and `.Re`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReferenceRecord {
    pub authors: Vec<String>,
    pub book_title: String,
    pub date: String,
    pub publisher: String,
    pub journal: String,
    pub issue: String,
    pub optional: String,
    pub page: String,
    pub corporate: String,
    pub report: String,
    pub article_title: String,
    pub volume: String,
}

impl ReferenceRecord {
    /// Non-empty fields in citation order, authors joined with "and".
    pub fn fields(&self) -> Vec<String> {
        let authors = self.authors.join(" and ");
        [
            authors.as_str(),
            &self.book_title,
            &self.date,
            &self.publisher,
            &self.journal,
            &self.issue,
            &self.optional,
            &self.page,
            &self.corporate,
            &self.report,
            &self.article_title,
            &self.volume,
        ]
        .into_iter()
        .map(str::trim)
        .filter(|field| !field.is_empty())
        .map(str::to_owned)
        .collect()
    }
}

/// Document metadata remembered by title and name macros.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PageInfo {
    pub title: String,
    /// Manual section number, e.g. `1`.
    pub section: String,
    pub date: String,
    pub source: String,
    pub manual: String,
    pub volume: String,
    pub os: String,
    /// First name given to `.Nm`, reused when it is called without arguments.
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    UnknownMacro { name: String },
}

/// Formatting context threaded through every macro call of a generation run.
#[derive(Debug, Default, Clone)]
pub struct Buffer {
    pub style: Style,
    /// Block level tags waiting to be closed.
    pub open_tags: Vec<String>,
    /// Inline font tags, closed independently from `open_tags`.
    pub font_modes: Vec<String>,
    /// Tags opened by section headers.
    pub section_tags: Vec<String>,
    /// Innermost list last.
    pub lists: Vec<ListState>,
    /// Title of the current section.
    pub section: String,
    pub references: Option<ReferenceRecord>,
    pub page: PageInfo,
    pub function_type: Option<String>,
    pub function_name: String,
    pub function_args: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Buffer {
    pub fn new(style: Style) -> Self {
        Self {
            style,
            ..Self::default()
        }
    }

    pub fn is_inside_of_section(&self, section: &str) -> bool {
        self.section.eq_ignore_ascii_case(section)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_check_ignores_case() {
        let mut buffer = Buffer::default();
        buffer.section = "Synopsis".to_string();
        assert!(buffer.is_inside_of_section("SYNOPSIS"));
        assert!(!buffer.is_inside_of_section("DESCRIPTION"));
    }

    #[test]
    fn test_reference_fields_skip_empty_values() {
        let record = ReferenceRecord {
            authors: vec!["A. Author".into(), "B. Author".into()],
            article_title: " On Things".into(),
            date: "1999".into(),
            ..Default::default()
        };
        assert_eq!(
            record.fields(),
            vec!["A. Author and B. Author", "1999", "On Things"]
        );
    }
}
