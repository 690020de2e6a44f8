//! The `mdoc` macro package.

use crate::buffer::{Buffer, ListState, ReferenceRecord};
use crate::html::{close_all_tags, close_tags_until, generate_tag, parse_arguments};
use crate::macros::MacroTable;
use crate::patterns;

const DOC_SECTIONS: &[(&str, &str)] = &[
    ("1", "General Commands Manual"),
    ("2", "System Calls Manual"),
    ("3", "Library Functions Manual"),
    ("4", "Kernel Interfaces Manual"),
    ("5", "File Formats Manual"),
    ("6", "Games Manual"),
    ("7", "Miscellaneous Information Manual"),
    ("8", "System Manager's Manual"),
    ("9", "Kernel Developer's Manual"),
];

const VOLUMES: &[(&str, &str)] = &[
    ("USD", "User's Supplementary Documents"),
    ("PS1", "Programmer's Supplementary Documents"),
    ("AMD", "Ancestral Manual Documents"),
    ("SMM", "System Manager's Manual"),
    ("URM", "User's Reference Manual"),
    ("PRM", "Programmer's Manual"),
    ("KM", "Kernel Manual"),
    ("IND", "Manual Master Index"),
    ("LOCAL", "Local Manual"),
    ("CON", "Contributed Software Manual"),
];

const ARCHITECTURES: &[&str] = &[
    "alpha", "acorn26", "acorn32", "algor", "amd64", "amiga", "arc", "arm26", "arm32", "atari",
    "bebox", "cats", "cesfic", "cobalt", "dreamcast", "evbarm", "evbmips", "evbppc", "evbsh3",
    "hp300", "hp700", "hpcmips", "i386", "luna68k", "m68k", "mac68k", "macppc", "mips", "mmeye",
    "mvme68k", "mvmeppc", "netwinder", "news68k", "newsmips", "next68k", "ofppc", "pc532", "pmax",
    "pmppc", "powerpc", "prep", "sandpoint", "sgimips", "sh3", "shark", "sparc", "sparc64", "sun3",
    "tahoe", "vax", "x68k", "x86_64",
];

const FONT_MODES: &[(&str, &str)] = &[
    ("-emphasis", "i"),
    ("-literal", "span"),
    ("-symbolic", "strong"),
];

const STANDARDS: &[(&str, &str)] = &[
    ("-ansiC", "ANSI X3.159-1989 (``ANSI C89'')"),
    ("-ansiC-89", "ANSI X3.159-1989 (``ANSI C89'')"),
    ("-isoC", "ISO/IEC 9899:1990 (``ISO C90'')"),
    ("-isoC-90", "ISO/IEC 9899:1990 (``ISO C90'')"),
    ("-isoC-99", "ISO/IEC 9899:1999 (``ISO C99'')"),
    ("-iso9945-1-90", "ISO/IEC 9945-1:1990 (``POSIX.1'')"),
    ("-iso9945-1-96", "ISO/IEC 9945-1:1996 (``POSIX.1'')"),
    ("-p1003.1", "IEEE Std 1003.1 (``POSIX.1'')"),
    ("-p1003.1-88", "IEEE Std 1003.1-1988 (``POSIX.1'')"),
    ("-p1003.1-90", "ISO/IEC 9945-1:1990 (``POSIX.1'')"),
    ("-p1003.1-96", "ISO/IEC 9945-1:1996 (``POSIX.1'')"),
    ("-p1003.1b-93", "IEEE Std 1003.1b-1993 (``POSIX.1'')"),
    ("-p1003.1c-95", "IEEE Std 1003.1c-1995 (``POSIX.1'')"),
    ("-p1003.1g-2000", "IEEE Std 1003.1g-2000 (``POSIX.1'')"),
    ("-p1003.1i-95", "IEEE Std 1003.1i-1995 (``POSIX.1'')"),
    ("-p1003.1-2001", "IEEE Std 1003.1-2001 (``POSIX.1'')"),
    ("-p1003.1-2004", "IEEE Std 1003.1-2004 (``POSIX.1'')"),
    ("-iso9945-2-93", "ISO/IEC 9945-2:1993 (``POSIX.2'')"),
    ("-p1003.2", "IEEE Std 1003.2 (``POSIX.2'')"),
    ("-p1003.2-92", "IEEE Std 1003.2-1992 (``POSIX.2'')"),
    ("-p1003.2a-92", "IEEE Std 1003.2a-1992 (``POSIX.2'')"),
    ("-susv2", "Version 2 of the Single UNIX Specification (``SUSv2'')"),
    ("-susv3", "Version 3 of the Single UNIX Specification (``SUSv3'')"),
    ("-svid4", "System V Interface Definition, Fourth Edition (``SVID4'')"),
    ("-xbd5", "X/Open System Interface Definitions Issue 5 (``XBD5'')"),
    ("-xcu5", "X/Open Commands and Utilities Issue 5 (``XCU5'')"),
    ("-xcurses4.2", "X/Open Curses Issue 4, Version 2 (``XCURSES4.2'')"),
    ("-xns5", "X/Open Networking Services Issue 5 (``XNS5'')"),
    ("-xns5.2", "X/Open Networking Services Issue 5.2 (``XNS5.2'')"),
    ("-xpg3", "X/Open Portability Guide Issue 3 (``XPG3'')"),
    ("-xpg4", "X/Open Portability Guide Issue 4 (``XPG4'')"),
    ("-xpg4.2", "X/Open Portability Guide Issue 4, Version 2 (``XPG4.2'')"),
    ("-xsh5", "X/Open System Interfaces and Headers Issue 5 (``XSH5'')"),
    ("-ieee754", "IEEE Std 754-1985"),
    ("-iso8802-3", "ISO/IEC 8802-3:1989"),
];

/// Enclosures: the quoting macro, its open and close halves, and the
/// delimiters they emit.
const ENCLOSURES: &[(&str, &str, &str, &str, &str)] = &[
    ("Aq", "Ao", "Ac", "&lt;", "&gt;"),
    ("Bq", "Bo", "Bc", "[", "]"),
    ("Brq", "Bro", "Brc", "{", "}"),
    ("Dq", "Do", "Dc", "``", "''"),
    ("Pq", "Po", "Pc", "(", ")"),
    ("Qq", "Qo", "Qc", "\"", "\""),
    ("Sq", "So", "Sc", "`", "'"),
];

fn lookup<'a>(table: &'a [(&str, &str)], key: &str) -> Option<&'a str> {
    table
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, value)| *value)
}

/// Register a macro that wraps its trimmed argument in `tag`.
fn register_tag(table: &mut MacroTable, name: &str, tag: &'static str) {
    table.register(name, move |args: &str, _: &mut Buffer| {
        generate_tag(tag, args.trim())
    });
}

pub fn register(table: &mut MacroTable) {
    table.register("Dd", date);
    table.register("Dt", document_title);
    table.register("Os", operating_system);
    table.register("Sh", section_header);
    table.register("Ss", |args: &str, _: &mut Buffer| generate_tag("h3", args.trim()));
    table.register("Nm", name);
    table.register("Nd", |args: &str, _: &mut Buffer| {
        generate_tag("span", &format!("-- {}", args.trim()))
    });

    for (name, tag) in [
        ("Ad", "i"),
        ("An", "span"),
        ("Cm", "strong"),
        ("Dv", "span"),
        ("Er", "span"),
        ("Ev", "span"),
        ("Tn", "small"),
        ("Sy", "strong"),
        ("Va", "i"),
        ("Li", "span"),
        ("Em", "i"),
    ] {
        register_tag(table, name, tag);
    }

    table.register("Ar", |args: &str, _: &mut Buffer| {
        generate_tag("i", or_default(args, "file ..."))
    });
    table.register("Pa", |args: &str, _: &mut Buffer| {
        generate_tag("i", or_default(args, "~"))
    });
    table.register("Cd", config_declaration);
    table.register("Fl", |args: &str, _: &mut Buffer| {
        generate_tag("strong", &format!("-{}", args.trim()))
    });
    table.register("Op", |args: &str, _: &mut Buffer| {
        generate_tag("span", &format!("[{}]", args.trim()))
    });
    table.register("Ql", |args: &str, _: &mut Buffer| {
        generate_tag("span", &format!("`{}'", args.trim()))
    });
    table.register("Xr", cross_reference);

    table.register("Bl", begin_list);
    table.register("It", list_item);
    table.register("El", end_list);
    table.register("Pp", paragraph);

    for &(quote, open, close, left, right) in ENCLOSURES {
        table.register(quote, move |args: &str, _: &mut Buffer| {
            generate_tag("span", &format!("{left}{}{right}", args.trim()))
        });
        table.register(open, move |_: &str, _: &mut Buffer| generate_tag("span", left));
        table.register(close, move |_: &str, _: &mut Buffer| generate_tag("span", right));
    }
    table.register("Oo", |_: &str, _: &mut Buffer| "[".to_string());
    table.register("Oc", |_: &str, _: &mut Buffer| "]".to_string());
    table.register("Eo", |args: &str, _: &mut Buffer| generate_tag("span", args.trim()));
    table.register("Ec", |args: &str, _: &mut Buffer| generate_tag("span", args.trim()));

    table.register("St", standard);
    table.register("At", att_unix);
    table.register("Bx", bsd_unix);

    table.register("Rs", |_: &str, buffer: &mut Buffer| {
        buffer.references = Some(ReferenceRecord::default());
        String::new()
    });
    table.register("%A", |args: &str, buffer: &mut Buffer| {
        references(buffer).authors.push(args.trim().to_string());
        String::new()
    });
    register_reference(table, "%B", |record| &mut record.book_title);
    register_reference(table, "%D", |record| &mut record.date);
    register_reference(table, "%I", |record| &mut record.publisher);
    register_reference(table, "%J", |record| &mut record.journal);
    register_reference(table, "%N", |record| &mut record.issue);
    register_reference(table, "%O", |record| &mut record.optional);
    register_reference(table, "%P", |record| &mut record.page);
    register_reference(table, "%Q", |record| &mut record.corporate);
    register_reference(table, "%R", |record| &mut record.report);
    register_reference(table, "%T", |record| &mut record.article_title);
    register_reference(table, "%V", |record| &mut record.volume);
    table.register("Re", end_reference);

    table.register("Bf", begin_font);
    table.register("Ef", |_: &str, buffer: &mut Buffer| {
        buffer
            .font_modes
            .pop()
            .map(|tag| format!("</{tag}>"))
            .unwrap_or_default()
    });

    table.register("Fn", function);
    table.register("Ft", |args: &str, buffer: &mut Buffer| {
        let kind = args.trim();
        buffer.function_type = (!kind.is_empty()).then(|| kind.to_string());
        String::new()
    });
    table.register("Fo", |args: &str, buffer: &mut Buffer| {
        buffer.function_name = args.trim().to_string();
        buffer.function_args.clear();
        String::new()
    });
    table.register("Fa", |args: &str, buffer: &mut Buffer| {
        buffer.function_args.push(args.trim().to_string());
        String::new()
    });
    table.register("Fc", |_: &str, buffer: &mut Buffer| {
        let name = std::mem::take(&mut buffer.function_name);
        let params = std::mem::take(&mut buffer.function_args).join(", ");
        render_function(&name, &params, buffer)
    });
    table.register("Vt", |args: &str, buffer: &mut Buffer| {
        let base = generate_tag("i", args.trim());
        if buffer.is_inside_of_section("SYNOPSIS") {
            base + "<br>"
        } else {
            base
        }
    });
}

fn or_default<'a>(args: &'a str, default: &'a str) -> &'a str {
    match args.trim() {
        "" => default,
        args => args,
    }
}

fn date(args: &str, buffer: &mut Buffer) -> String {
    buffer.page.date = args.trim().to_string();
    String::new()
}

fn operating_system(args: &str, buffer: &mut Buffer) -> String {
    buffer.page.os = args.trim().to_string();
    String::new()
}

/// `.Dt TITLE [section [volume|arch]]`
fn document_title(args: &str, buffer: &mut Buffer) -> String {
    let args = parse_arguments(args);
    let title = args.first().filter(|title| !title.is_empty());
    let section = args.get(1).filter(|section| !section.is_empty());
    let volume = args.get(2).filter(|volume| !volume.is_empty());

    let page = &mut buffer.page;
    page.title = title.cloned().unwrap_or_else(|| "UNTITLED".to_string());
    page.section = section.cloned().unwrap_or_default();
    page.volume = volume.cloned().unwrap_or_else(|| "LOCAL".to_string());

    let mut side = page.title.clone();
    let mut middle = page.volume.clone();

    if section.is_some() {
        side = format!("{}({})", page.title, page.section);
        let manual = lookup(DOC_SECTIONS, &page.section);
        let volume = volume.map(String::as_str).unwrap_or_default();

        if let Some(volume) = lookup(VOLUMES, volume) {
            middle = volume.to_string();
        } else if ARCHITECTURES.contains(&volume) {
            middle = format!("BSD/{} {}", page.volume, manual.unwrap_or_default());
        } else if let Some(manual) = manual {
            middle = format!("BSD {manual}");
        }
    }

    let mut result = close_all_tags(&mut buffer.section_tags);
    buffer.section_tags.push("section".to_string());
    result.push_str(&format!(
        "<p><span>{side}</span><span>{middle}</span><span>{side}</span></p><section>"
    ));
    result
}

fn section_header(args: &str, buffer: &mut Buffer) -> String {
    let mut result = close_all_tags(&mut buffer.section_tags);

    buffer.section = args.trim().to_string();
    buffer.section_tags.push("section".to_string());

    result.push_str(&generate_tag("h2", args.trim()));
    result.push_str(&format!(
        "<section style=\"margin-left:{}%;\">",
        buffer.style.indent
    ));
    result
}

/// The first name given is remembered and reused by bare `.Nm` calls.
fn name(args: &str, buffer: &mut Buffer) -> String {
    let args = args.trim();
    if buffer.page.name.is_none() && !args.is_empty() {
        buffer.page.name = Some(args.to_string());
    }

    let name = match args {
        "" => buffer.page.name.as_deref().unwrap_or_default(),
        args => args,
    };
    generate_tag("strong", name)
}

fn config_declaration(args: &str, buffer: &mut Buffer) -> String {
    let tag = if buffer.is_inside_of_section("SYNOPSIS") {
        "p>strong"
    } else {
        "strong"
    };
    generate_tag(tag, args.trim())
}

/// `.Xr name [section] [trailing text]`
fn cross_reference(args: &str, _: &mut Buffer) -> String {
    let mut args = parse_arguments(args).into_iter();
    let mut reference = args.next().unwrap_or_default();

    if let Some(section) = args.next() {
        reference.push_str(&format!("({section})"));
    }
    let rest: Vec<String> = args.collect();
    if !rest.is_empty() {
        reference.push(' ');
        reference.push_str(&rest.join(" "));
    }

    generate_tag("span", &reference)
}

fn begin_list(args: &str, buffer: &mut Buffer) -> String {
    buffer.lists.push(ListState::new(parse_arguments(args)));

    let depth = buffer.lists.len() - 1;
    let indent = f64::from(buffer.style.indent) / 4.0 * depth as f64;
    format!("<ul style=\"list-style:none;padding:0 0 0 {indent}%;\">")
}

fn list_item(args: &str, buffer: &mut Buffer) -> String {
    let args = args.trim();
    let Some(list) = buffer.lists.last_mut() else {
        tracing::debug!("list item outside of a list");
        return generate_tag("span", args);
    };

    let pre = if list.is_open { "</span></li>" } else { "" };
    let mut tag = String::new();
    let mut tag_styles = String::new();
    let mut content_styles = String::from("margin-bottom:2%;");
    list.is_open = true;

    // The first flag wins, so flags are applied last to first.
    for flag in list.flags.iter().rev() {
        match flag.as_str() {
            "-bullet" => {
                tag = "&compfn;".to_string();
                content_styles.push_str("margin-left:2%;");
            }
            "-dash" | "-hyphen" => {
                tag = "&minus;".to_string();
                content_styles.push_str("margin-left:2%;");
            }
            "-enum" => {
                tag = format!("{}.", list.counter);
                list.counter += 1;
                content_styles.push_str("margin-left:2%;");
            }
            "-item" => {
                tag.clear();
                content_styles.push_str("margin-left:2%;");
            }
            "-tag" => {
                tag = args.to_string();
                tag_styles.push_str("display:inline-block;");
                content_styles.push_str("margin-left:2%;");
            }
            "-hang" => {
                tag = generate_tag("i", args);
                tag_styles.push_str("width:8%;display:inline-block;");
                content_styles.push_str("margin-left:2%;");
            }
            "-ohang" => {
                tag = generate_tag("strong", args);
                tag_styles.push_str("display:block;");
                content_styles.push_str("display:inline-block;");
            }
            "-inset" => {
                tag = generate_tag("i", args);
                content_styles.push_str("display:inline-block;");
            }
            "-compact" => {
                tag_styles.push_str("margin-bottom:0;");
                content_styles.push_str("margin-bottom:0;");
            }
            _ => {}
        }
    }

    format!(
        "{pre}<li><span style=\"{tag_styles}\">{tag}</span><span style=\"{content_styles}\">"
    )
}

fn end_list(_: &str, buffer: &mut Buffer) -> String {
    match buffer.lists.pop() {
        Some(list) if list.is_open => "</span></li></ul>".to_string(),
        Some(_) => "</ul>".to_string(),
        None => String::new(),
    }
}

fn paragraph(_: &str, buffer: &mut Buffer) -> String {
    let mut result = String::new();
    if buffer.open_tags.iter().any(|tag| tag == "p") {
        result.push_str(&close_tags_until("p", &mut buffer.open_tags));
    }

    buffer.open_tags.push("p".to_string());
    result + "<p>"
}

fn standard(args: &str, _: &mut Buffer) -> String {
    let args = args.trim();
    match lookup(STANDARDS, args) {
        Some(standard) => generate_tag("abbr", standard),
        None => args.to_string(),
    }
}

fn att_unix(args: &str, _: &mut Buffer) -> String {
    let content = match patterns::NUMBER.find(args) {
        Some(version) => format!("Version {} AT&amp;T UNIX", version.as_str()),
        None => "AT&amp;T UNIX".to_string(),
    };
    generate_tag("span", &content)
}

fn bsd_unix(args: &str, _: &mut Buffer) -> String {
    let content = match args.trim() {
        "-devel" => "BSD (currently under development)".to_string(),
        version => format!("{version}BSD"),
    };
    generate_tag("span", &content)
}

fn references(buffer: &mut Buffer) -> &mut ReferenceRecord {
    buffer.references.get_or_insert_with(ReferenceRecord::default)
}

fn register_reference(
    table: &mut MacroTable,
    name: &str,
    field: fn(&mut ReferenceRecord) -> &mut String,
) {
    table.register(name, move |args: &str, buffer: &mut Buffer| {
        let value = field(references(buffer));
        value.push(' ');
        value.push_str(args.trim());
        String::new()
    });
}

fn end_reference(_: &str, buffer: &mut Buffer) -> String {
    match buffer.references.take() {
        Some(record) => generate_tag("p", &record.fields().join(", ")),
        None => String::new(),
    }
}

fn begin_font(args: &str, buffer: &mut Buffer) -> String {
    let mode = parse_arguments(args).into_iter().next().unwrap_or_default();
    let tag = lookup(FONT_MODES, &mode).unwrap_or("span");

    buffer.font_modes.push(tag.to_string());
    format!("<{tag}>")
}

/// `.Fn name [params...]`
fn function(args: &str, buffer: &mut Buffer) -> String {
    let args = parse_arguments(args);
    match args.split_first() {
        Some((name, params)) if !name.is_empty() => {
            render_function(name, &params.join(", "), buffer)
        }
        _ => String::new(),
    }
}

fn render_function(name: &str, params: &str, buffer: &mut Buffer) -> String {
    if name.is_empty() {
        return String::new();
    }

    let kind = buffer
        .function_type
        .take()
        .map(|kind| generate_tag("i", &kind))
        .unwrap_or_default();
    let name = generate_tag("strong", name);

    generate_tag("span", &format!("{kind}{name}({params})"))
}
