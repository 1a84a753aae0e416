//! String normalization shared by catalog loading and lookups.
//!
//! Catalog authors wrap long strings, escape quotes and mix apostrophe styles.
//! Both catalog keys and query strings go through [`normalize`] so that those
//! differences never cause a lookup miss.

use regex::Regex;
use std::sync::OnceLock;

/// Literal `\n\n` as written in a catalog file.
const ESCAPED_BLANK_LINE: &str = "\\n\\n";
/// Literal `\n` as written in a catalog file.
const ESCAPED_NEWLINE: &str = "\\n";
/// Literal `\"` as written in a catalog file.
const ESCAPED_QUOTE: &str = "\\\"";

/// Apostrophe variants folded into the ASCII apostrophe.
const APOSTROPHES: [char; 3] = ['\u{2018}', '\u{2019}', '\u{02BC}'];

static NEWLINE_RUN_REGEX: OnceLock<Regex> = OnceLock::new();

/// Canonicalize a catalog or query string.
///
/// `None` normalizes to the empty string. With `collapse_newlines` every run
/// of line breaks becomes a single space; without it line breaks are kept and
/// only spaces and tabs are collapsed.
///
/// The result is stable: normalizing it again with the same flag returns it
/// unchanged.
///
/// # Example
/// ```
/// use po_translator::i18n::normalize;
///
/// assert_eq!(normalize("Hello \\n  world", true), "Hello world");
/// assert_eq!(normalize(None, false), "");
/// ```
pub fn normalize<'a>(raw: impl Into<Option<&'a str>>, collapse_newlines: bool) -> String {
    let Some(raw) = raw.into() else {
        return String::new();
    };

    let unescaped = unescape(raw);
    let apostrophes = unescaped.replace(APOSTROPHES, "'");
    let collapsed = collapse_whitespace(&apostrophes, collapse_newlines);

    collapsed.trim_matches('\n').trim_matches('\t').to_string()
}

/// Replace escape sequences until none are left.
///
/// A single pass can expose a new sequence (`\\"` becomes `\"`), so the rules
/// run to a fixed point. Every replacement shortens the string.
fn unescape(raw: &str) -> String {
    let mut current = raw.to_string();
    loop {
        let next = current
            .replace(ESCAPED_BLANK_LINE, "\n\n")
            .replace(ESCAPED_NEWLINE, " ")
            .replace(ESCAPED_QUOTE, "\"");
        if next == current {
            return current;
        }
        current = next;
    }
}

fn is_edge_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\n' | '\t' | '\r')
}

fn collapse_whitespace(s: &str, collapse_newlines: bool) -> String {
    let (Some(first), Some(last)) = (s.chars().next(), s.chars().next_back()) else {
        return String::new();
    };
    let starts_with_space = is_edge_whitespace(first);
    let ends_with_space = is_edge_whitespace(last);

    let joined = if collapse_newlines {
        let regex = NEWLINE_RUN_REGEX.get_or_init(|| Regex::new(r"[\r\n]+").expect("valid regex"));
        join_non_empty(regex.split(s))
    } else {
        s.to_string()
    };
    let body = join_non_empty(joined.split(['\t', ' ']));

    if body.is_empty() {
        return " ".to_string();
    }

    let mut out = String::with_capacity(body.len() + 2);
    if starts_with_space {
        out.push(' ');
    }
    out.push_str(&body);
    if ends_with_space {
        out.push(' ');
    }
    out
}

fn join_non_empty<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    parts
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
