//! Documentation comment rendering.
//!
//! Schema descriptions are HTML-flavored free text with schema-specific
//! `$(ref:...)` cross-references. They are converted to JSDoc-style markup
//! and wrapped into comment blocks.

use std::sync::LazyLock;

use regex::Regex;

use super::INDENT;

const WRAP_COLUMN: usize = 100;

static REF_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\(ref:([^)]+)\)").unwrap());
static TOPIC_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\(topic:[^)]+\)\[([^\]]+)\]").unwrap());
static CODE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<(?:code|var)>(.*?)</(?:code|var)>").unwrap());
static STRONG_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<(?:b|strong)>(.*?)</(?:b|strong)>").unwrap());
static EM_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<(?:em|i)>(.*?)</(?:em|i)>").unwrap());
static ANCHOR_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<a\s[^>]*?href=["']([^"']*)["'][^>]*>(.*?)</a>"#).unwrap());
static EXTRA_BLANKS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Convert an HTML-flavored description to comment markup.
///
/// Only the tags upstream descriptions actually use are handled; unknown
/// angle-bracket text such as `<all_urls>` passes through untouched.
pub fn render_description(text: &str) -> String {
    let mut out = TOPIC_LINK.replace_all(text, "$1").into_owned();
    out = REF_LINK.replace_all(&out, "{@link $1}").into_owned();
    out = CODE_TAG.replace_all(&out, "`$1`").into_owned();
    out = STRONG_TAG.replace_all(&out, "**$1**").into_owned();
    out = EM_TAG.replace_all(&out, "*$1*").into_owned();
    out = ANCHOR_TAG.replace_all(&out, "[$2]($1)").into_owned();
    out = out
        .replace("<br>", "\n")
        .replace("<br/>", "\n")
        .replace("<br />", "\n")
        .replace("<ul>", "\n")
        .replace("</ul>", "\n")
        .replace("<ol>", "\n")
        .replace("</ol>", "\n")
        .replace("<li>", "\n- ")
        .replace("</li>", "")
        .replace("<p>", "\n\n")
        .replace("</p>", "");
    out = out
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&");
    // A comment block must not contain its own terminator.
    out = out.replace("*/", "*\\/");
    EXTRA_BLANKS.replace_all(&out, "\n\n").trim().to_string()
}

/// Wrap comment markup in a `/** */` block indented `depth` levels.
///
/// Single-line text becomes a one-line block; longer text is wrapped at
/// [`WRAP_COLUMN`] and laid out with a `*` gutter.
pub fn doc_comment(text: &str, depth: usize) -> String {
    let text = text.trim();
    if text.is_empty() {
        return String::new();
    }
    let pad = INDENT.repeat(depth);
    let width = WRAP_COLUMN.saturating_sub(pad.len() + 3);
    let mut lines: Vec<String> = Vec::new();
    for raw in text.lines() {
        let raw = raw.trim_end();
        if raw.trim().is_empty() {
            lines.push(String::new());
        } else {
            lines.extend(wrap_line(raw, width));
        }
    }
    if lines.len() == 1 {
        return format!("{pad}/** {} */\n", lines[0]);
    }
    let mut out = format!("{pad}/**\n");
    for line in &lines {
        if line.is_empty() {
            out.push_str(&format!("{pad} *\n"));
        } else {
            out.push_str(&format!("{pad} * {line}\n"));
        }
    }
    out.push_str(&format!("{pad} */\n"));
    out
}

fn wrap_line(line: &str, width: usize) -> Vec<String> {
    if line.len() <= width {
        return vec![line.to_string()];
    }
    let mut out = Vec::new();
    let mut current = String::new();
    for word in line.split(' ') {
        if current.is_empty() {
            current.push_str(word);
        } else if current.len() + 1 + word.len() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            out.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}
