//! Line-oriented helpers for carving up talosctl output.
//!
//! All helpers return the ordered line sequence; [`join_lines`] turns a
//! sequence back into a single newline-separated block when a caller
//! needs text rather than lines.

use regex::Regex;

/// Join lines into a single block separated by newlines.
pub fn join_lines(lines: &[&str]) -> String {
    lines.join("\n")
}

/// Remove every blank or whitespace-only line, preserving the order of
/// the remaining lines.
pub fn strip_empty_lines(text: &str) -> Vec<&str> {
    text.lines().filter(|line| !line.trim().is_empty()).collect()
}

/// Remove the maximal prefix of blank lines, stopping at the first
/// non-blank line.
pub fn strip_leading_lines(text: &str) -> Vec<&str> {
    let lines: Vec<&str> = text.lines().collect();
    let start = lines
        .iter()
        .position(|line| !line.trim().is_empty())
        .unwrap_or(lines.len());
    lines[start..].to_vec()
}

/// Remove the maximal suffix of blank lines.
pub fn strip_trailing_lines(text: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = text.lines().collect();
    while lines.last().is_some_and(|line| line.trim().is_empty()) {
        lines.pop();
    }
    lines
}

/// Drop every line up to and including the first one matching `pattern`.
///
/// Matching is on the raw line content, case-sensitive; anchor the
/// pattern with `^` to require a match at the start of the line. When no
/// line matches, the text is returned unchanged (as lines).
pub fn remove_up_to_match<'a>(text: &'a str, pattern: &Regex) -> Vec<&'a str> {
    let lines: Vec<&str> = text.lines().collect();
    match lines.iter().position(|line| pattern.is_match(line)) {
        Some(index) => lines[index + 1..].to_vec(),
        None => lines,
    }
}
