//! Markup cleanup rules
//!
//! Turns raw article HTML into plain text and strips the page chrome
//! (navigation, account links, sidebar controls) that reference sites wrap
//! around the content proper. The keyword list targets Wikipedia-style
//! chrome but is harmless on other sources.

use regex::{Regex, RegexBuilder};
use std::sync::OnceLock;

/// Lines containing any of these fragments are page chrome, not content.
const CHROME_KEYWORDS: &[&str] = &[
    "Main menu",
    "Navigation",
    "Contribute",
    "Appearance",
    "Personal tools",
    "Pages for logged out editors",
    "Toggle the table of contents",
    "Print/export",
    "In other projects",
    "Edit links",
    "Create account",
    "Log in",
    "Donate",
    "move to sidebar hide",
    "Color (beta)",
];

fn script_style_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        RegexBuilder::new(r"<(script|style)\b.*?</(script|style)>")
            .case_insensitive(true)
            .dot_matches_new_line(true)
            .build()
            .unwrap()
    })
}

fn comment_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        RegexBuilder::new(r"<!--.*?-->")
            .dot_matches_new_line(true)
            .build()
            .unwrap()
    })
}

fn block_end_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        RegexBuilder::new(r"</(p|div|li|ul|ol|h[1-6]|tr|table|section|article|blockquote)>|<br\s*/?>")
            .case_insensitive(true)
            .build()
            .unwrap()
    })
}

fn tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]+>").unwrap())
}

fn chrome_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let alternatives = CHROME_KEYWORDS
            .iter()
            .map(|k| regex::escape(k))
            .collect::<Vec<_>>()
            .join("|");
        RegexBuilder::new(&alternatives)
            .case_insensitive(true)
            .build()
            .unwrap()
    })
}

fn edit_marker_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        RegexBuilder::new(r"\[\s*edit\s*\]")
            .case_insensitive(true)
            .build()
            .unwrap()
    })
}

fn title_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        RegexBuilder::new(r"<title[^>]*>(.*?)</title>")
            .case_insensitive(true)
            .dot_matches_new_line(true)
            .build()
            .unwrap()
    })
}

/// Extract the page title, without the " - Wikipedia" style site suffix.
pub fn title_of(html: &str) -> Option<String> {
    let captures = title_re().captures(html)?;
    let raw = decode_entities(captures.get(1)?.as_str()).trim().to_string();
    if raw.is_empty() {
        return None;
    }
    let title = raw
        .rsplit_once(" - ")
        .map(|(head, _site)| head.trim().to_string())
        .filter(|head| !head.is_empty())
        .unwrap_or(raw);
    Some(title)
}

/// Convert article HTML to cleaned plain text.
///
/// Content before the first `<h1>` is discarded (everything above the title
/// is navigation), scripts/styles/comments are removed, block boundaries
/// become newlines, tags are stripped, and the chrome line filter runs over
/// the result.
pub fn article_text(html: &str) -> String {
    let body = match html.to_ascii_lowercase().find("<h1") {
        Some(index) => &html[index..],
        None => html,
    };

    let text = script_style_re().replace_all(body, "");
    let text = comment_re().replace_all(&text, "");
    let text = block_end_re().replace_all(&text, "\n");
    let text = tag_re().replace_all(&text, "");
    let text = decode_entities(&text);

    clean_text(&text)
}

/// Apply the chrome filter and whitespace normalization to plain text.
pub fn clean_text(text: &str) -> String {
    let without_edits = edit_marker_re().replace_all(text, "");

    let mut lines: Vec<&str> = Vec::new();
    for line in without_edits.lines() {
        if chrome_line_re().is_match(line) {
            continue;
        }
        lines.push(line.trim_end());
    }

    // Collapse runs of blank lines into a single separator
    let mut out = String::new();
    let mut previous_blank = true;
    for line in lines {
        let blank = line.trim().is_empty();
        if blank && previous_blank {
            continue;
        }
        out.push_str(line);
        out.push('\n');
        previous_blank = blank;
    }

    out.trim().to_string()
}

/// Decode the handful of HTML entities that survive tag stripping.
fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
