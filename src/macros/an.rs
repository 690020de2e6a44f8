//! The `man` macro package.

use crate::buffer::Buffer;
use crate::html::{close_all_tags, close_tags_until, generate_altern_tag, generate_tag, parse_arguments};
use crate::macros::MacroTable;

pub fn register(table: &mut MacroTable) {
    table.register("TH", title);
    table.register("SH", section_header);
    table.register("SS", |args: &str, _: &mut Buffer| generate_tag("h3", args.trim()));

    table.register("B", |args: &str, _: &mut Buffer| generate_tag("strong", args.trim()));
    table.register("I", |args: &str, _: &mut Buffer| generate_tag("i", args.trim()));
    table.register("SM", |args: &str, _: &mut Buffer| generate_tag("small", args.trim()));

    for (name, first, second) in [
        ("BI", "strong", "i"),
        ("BR", "strong", "span"),
        ("IB", "i", "strong"),
        ("IR", "i", "span"),
        ("RB", "span", "strong"),
        ("RI", "span", "i"),
        ("SB", "small", "strong"),
    ] {
        table.register(name, move |args: &str, _: &mut Buffer| {
            generate_altern_tag(first, second, args)
        });
    }

    for name in ["P", "LP", "PP"] {
        table.register(name, paragraph);
    }
    table.register("RS", start_indent);
    table.register("RE", end_indent);
}

/// `.TH title section date source manual`
fn title(args: &str, buffer: &mut Buffer) -> String {
    let mut args = parse_arguments(args).into_iter();
    let page = &mut buffer.page;

    page.title = args.next().unwrap_or_default();
    page.section = args.next().unwrap_or_default();
    page.date = args.next().unwrap_or_default();
    page.source = args.next().unwrap_or_default();
    page.manual = args.next().unwrap_or_default();

    let heading = format!("{}({})", page.title, page.section);
    format!(
        "<p><span>{heading}</span><span>{}</span><span>{heading}</span></p>",
        page.manual
    )
}

fn section_header(args: &str, buffer: &mut Buffer) -> String {
    let mut result = close_all_tags(&mut buffer.font_modes);
    result.push_str(&close_all_tags(&mut buffer.open_tags));
    result.push_str(&close_all_tags(&mut buffer.section_tags));

    buffer.section = args.trim().to_string();
    buffer.section_tags.push("section".to_string());

    result.push_str(&generate_tag("h2", args.trim()));
    result.push_str(&format!(
        "<section style=\"margin-left:{}%;\">",
        buffer.style.indent
    ));
    result
}

fn paragraph(_: &str, buffer: &mut Buffer) -> String {
    let mut result = close_all_tags(&mut buffer.font_modes);
    if buffer.open_tags.iter().any(|tag| tag == "div") {
        result.push_str(&close_tags_until("div", &mut buffer.open_tags));
    }

    buffer.open_tags.push("div".to_string());
    result + "<div style=\"margin-bottom: 2%;\">"
}

fn start_indent(_: &str, buffer: &mut Buffer) -> String {
    let result = close_all_tags(&mut buffer.font_modes);
    buffer.open_tags.push("section".to_string());
    format!(
        "{result}<section style=\"margin-left:{}%\">",
        buffer.style.indent
    )
}

fn end_indent(_: &str, buffer: &mut Buffer) -> String {
    if buffer.open_tags.iter().any(|tag| tag == "section") {
        close_tags_until("section", &mut buffer.open_tags)
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(name: &str, args: &str, buffer: &mut Buffer) -> String {
        let mut table = MacroTable::new();
        register(&mut table);
        let action = table.get(name).unwrap();
        action(args, buffer)
    }

    #[test]
    fn test_title_stores_page_info() {
        let mut buffer = Buffer::default();
        let html = call(
            "TH",
            " FOO 1 \"MARCH 1995\" Linux \"User Manuals\"",
            &mut buffer,
        );

        assert_eq!(
            html,
            "<p><span>FOO(1)</span><span>User Manuals</span><span>FOO(1)</span></p>"
        );
        assert_eq!(buffer.page.title, "FOO");
        assert_eq!(buffer.page.section, "1");
        assert_eq!(buffer.page.date, "MARCH 1995");
        assert_eq!(buffer.page.source, "Linux");
        assert_eq!(buffer.page.manual, "User Manuals");
    }

    #[test]
    fn test_title_without_arguments() {
        let mut buffer = Buffer::default();
        assert_eq!(
            call("TH", "", &mut buffer),
            "<p><span>()</span><span></span><span>()</span></p>"
        );
    }

    #[test]
    fn test_section_header_closes_previous_section() {
        let mut buffer = Buffer::default();
        let first = call("SH", " NAME", &mut buffer);
        assert_eq!(
            first,
            "<h2> NAME </h2><section style=\"margin-left:8%;\">"
        );
        assert_eq!(buffer.section, "NAME");

        buffer.font_modes.push("i".to_string());
        let second = call("SH", " SYNOPSIS", &mut buffer);
        assert!(second.starts_with("</i></section><h2> SYNOPSIS </h2>"));
        assert_eq!(buffer.section_tags, vec!["section"]);
        assert!(buffer.is_inside_of_section("synopsis"));
    }

    #[test]
    fn test_font_macros() {
        let mut buffer = Buffer::default();
        assert_eq!(call("B", " bold", &mut buffer), "<strong> bold </strong>");
        assert_eq!(
            call("BR", " name (1)", &mut buffer),
            "<strong> name </strong><span> (1) </span>"
        );
        assert_eq!(
            call("IR", "a b c", &mut buffer),
            "<i> a </i><span> b </span><i> c </i>"
        );
    }

    #[test]
    fn test_paragraphs_replace_each_other() {
        let mut buffer = Buffer::default();
        assert_eq!(call("PP", "", &mut buffer), "<div style=\"margin-bottom: 2%;\">");
        assert_eq!(
            call("LP", "", &mut buffer),
            "</div><div style=\"margin-bottom: 2%;\">"
        );
        assert_eq!(buffer.open_tags, vec!["div"]);
    }

    #[test]
    fn test_relative_indent_closes_inner_blocks() {
        let mut buffer = Buffer::default();
        assert_eq!(
            call("RS", "", &mut buffer),
            "<section style=\"margin-left:8%\">"
        );
        call("P", "", &mut buffer);
        assert_eq!(call("RE", "", &mut buffer), "</div></section>");
        assert!(buffer.open_tags.is_empty());
        assert_eq!(call("RE", "", &mut buffer), "");
    }
}
