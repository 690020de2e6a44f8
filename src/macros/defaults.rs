//! Requests and escapes shared by both dialects.

use crate::buffer::Buffer;
use crate::html::close_all_tags;
use crate::macros::MacroTable;
use crate::patterns;

/// Named glyphs reachable through `\(xx`. Angle brackets were already
/// replaced by entities when the source was cleaned.
const GLYPHS: &[(&str, &str)] = &[
    ("em", "&mdash;"),
    ("en", "&ndash;"),
    ("bu", "&bull;"),
    ("co", "&copy;"),
    ("rg", "&reg;"),
    ("tm", "&trade;"),
    ("de", "&deg;"),
    ("lq", "&ldquo;"),
    ("rq", "&rdquo;"),
    ("dq", "&quot;"),
    ("aq", "&apos;"),
    ("hy", "&#8208;"),
    ("mi", "&minus;"),
    ("pl", "&plus;"),
    ("mu", "&times;"),
    ("&lt;=", "&le;"),
    ("&gt;=", "&ge;"),
    ("-&gt;", "&rarr;"),
    ("&lt;-", "&larr;"),
];

pub fn register(table: &mut MacroTable) {
    table.register("br", br);
    table.register("sp", sp);
    table.register("ss", ss);
    table.register("ft", ft);
    table.register("vs", vs);
    table.register("nf", vs);
    table.register("in", indent);
    table.register("ul", italic);
    table.register("cu", italic);
    table.register("nh", nh);
    table.register("ad", ad);

    for name in ["if", "ie", "el", "\\}", "de", "ne", ".", "fi"] {
        table.register(name, nothing);
    }

    table.register("\\\\", backslash);
    table.register("\\e", backslash);
    table.register("\\-", |_: &str, _: &mut Buffer| "&minus;".to_string());
    table.register("\\+", |_: &str, _: &mut Buffer| "&plus;".to_string());
    table.register("\\f", font_escape);
    table.register("\\s", size_escape);
    table.register("\\(", glyph_escape);
    // A lone backslash is a line continuation.
    for name in ["\\", "\\&", "\\m", "\\d", "\\u"] {
        table.register(name, nothing);
    }
}

fn nothing(_: &str, _: &mut Buffer) -> String {
    String::new()
}

fn number_or(args: &str, default: f64) -> f64 {
    args.trim()
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
        .unwrap_or(default)
}

fn br(_: &str, _: &mut Buffer) -> String {
    "<br>".to_string()
}

fn sp(args: &str, _: &mut Buffer) -> String {
    format!(
        "<hr style=\"margin-top:{}em;visibility:hidden;\">",
        number_or(args, 2.0)
    )
}

/// Word spacing in 36ths of an em.
fn ss(args: &str, buffer: &mut Buffer) -> String {
    buffer.open_tags.push("span".to_string());
    format!(
        "<span style=\"word-spacing:{}em;\">",
        number_or(args, 12.0) / 36.0
    )
}

fn font_tag(font: &str) -> Option<&'static str> {
    match font {
        "B" | "3" => Some("strong"),
        "I" | "2" => Some("i"),
        "S" => Some("small"),
        _ => None,
    }
}

/// Switch font. Regular fonts (`R`, `P`, `1`) and unknown names only close
/// the active font modes.
pub fn ft(args: &str, buffer: &mut Buffer) -> String {
    let mut result = close_all_tags(&mut buffer.font_modes);

    if let Some(tag) = font_tag(args.trim()) {
        result.push_str(&format!("<{tag}> "));
        buffer.font_modes.push(tag.to_string());
    }

    result
}

fn vs(args: &str, buffer: &mut Buffer) -> String {
    buffer.open_tags.push("section".to_string());
    format!(
        "<section style=\"line-height:{}em;\">",
        number_or(args, 12.0) / 12.0
    )
}

fn indent(args: &str, buffer: &mut Buffer) -> String {
    buffer.open_tags.push("section".to_string());
    format!(
        "<section style=\"margin-left:{}em;\">",
        number_or(args, 3.0) / 3.0
    )
}

fn italic(_: &str, buffer: &mut Buffer) -> String {
    ft("I", buffer)
}

fn nh(_: &str, buffer: &mut Buffer) -> String {
    buffer.style.hyphens = Some("none".to_string());
    String::new()
}

fn ad(args: &str, buffer: &mut Buffer) -> String {
    let align = args.trim();
    buffer.style.text_align = (!align.is_empty()).then(|| align.to_string());
    String::new()
}

fn backslash(_: &str, _: &mut Buffer) -> String {
    "\\".to_string()
}

/// Split a font name off its argument: `Bword`, `(CWword` or `[name]word`.
fn split_font_name(args: &str) -> (&str, &str) {
    if let Some(inner) = args.strip_prefix('[') {
        return inner.split_once(']').unwrap_or((inner, ""));
    }

    let (skip, take) = match args.strip_prefix('(') {
        Some(_) => (1, 2),
        None => (0, 1),
    };
    let end = args
        .char_indices()
        .nth(skip + take)
        .map_or(args.len(), |(index, _)| index);
    let start = args.char_indices().nth(skip).map_or(args.len(), |(index, _)| index);

    (&args[start..end], &args[end..])
}

fn font_escape(args: &str, buffer: &mut Buffer) -> String {
    let (font, rest) = split_font_name(args.trim());
    format!("{} {}", ft(font, buffer), rest)
}

/// `\s+N`/`\s-N` change the font size relative to the current one.
fn size_escape(args: &str, buffer: &mut Buffer) -> String {
    let Some(captures) = patterns::REAL_NUMBER.captures(args.trim()) else {
        return args.to_string();
    };

    let delta = captures[1].parse::<i32>().unwrap_or(0);
    buffer.style.font_size = buffer.style.font_size.saturating_add(delta);
    buffer.open_tags.push("span".to_string());

    format!(
        "<span style=\"font-size:{}px;\">{}",
        buffer.style.font_size, &captures[2]
    )
}

fn glyph_escape(args: &str, _: &mut Buffer) -> String {
    let args = args.trim();

    GLYPHS
        .iter()
        .find_map(|(name, glyph)| args.strip_prefix(name).map(|rest| format!("{glyph}{rest}")))
        .unwrap_or_else(|| args.to_string())
}
