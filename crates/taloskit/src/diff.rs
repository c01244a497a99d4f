//! Extraction of the configuration diff embedded in talosctl stderr.

use crate::text::{join_lines, remove_up_to_match, strip_leading_lines};
use crate::types::CmdOutput;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Marker line preceding the diff body in apply-config dry-run output.
pub const DIFF_MARKER_PATTERN: &str = r"^Config diff:";

static DIFF_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DIFF_MARKER_PATTERN).unwrap());

/// The configuration diff talosctl printed for a dry-run.
///
/// Holds the ordered diff lines; render the whole block with `to_string`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigDiff {
    lines: Vec<String>,
}

impl ConfigDiff {
    /// Extract the diff section from a dry-run's stderr.
    ///
    /// Everything up to and including the `Config diff:` marker is
    /// dropped, then leading blank lines. Without a marker the whole
    /// stderr (minus leading blanks) is returned; callers should only
    /// extract a diff from output already classified as changed, where
    /// the marker is expected.
    pub fn from_output(output: &CmdOutput) -> Self {
        let tail = join_lines(&remove_up_to_match(&output.stderr, &DIFF_MARKER));
        let lines = strip_leading_lines(&tail)
            .into_iter()
            .map(str::to_string)
            .collect();
        Self { lines }
    }

    /// The diff body as ordered lines.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of lines in the diff body.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the diff body is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl fmt::Display for ConfigDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lines.join("\n"))
    }
}
