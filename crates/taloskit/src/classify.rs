//! Classification of talosctl dry-run output.
//!
//! talosctl ends every apply-config run with a terminal summary line on
//! stderr. The patterns below are a wording contract with the tool: if an
//! upstream release changes these strings, the tests in this module must
//! fail rather than the classification silently flipping.

use crate::types::CmdOutput;
use regex::Regex;
use std::sync::LazyLock;

/// Terminal line talosctl prints when a dry-run would change nothing.
pub const NO_CHANGES_PATTERN: &str = r"^No changes\.";

/// Terminal line printed for a node that has no applied config yet.
pub const MAINTENANCE_MODE_PATTERN: &str =
    r"^Node is running in maintenance mode and does not have a config yet";

static NO_CHANGES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(NO_CHANGES_PATTERN).unwrap());
static MAINTENANCE_MODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(MAINTENANCE_MODE_PATTERN).unwrap());

/// Last non-blank line of stderr, the only line classification looks at.
fn last_line(output: &CmdOutput) -> Option<&str> {
    output
        .stderr
        .lines()
        .rev()
        .find(|line| !line.trim().is_empty())
}

/// Whether the proposed change is anything other than a no-op.
///
/// Only an output whose last non-blank stderr line starts with
/// `No changes.` counts as unchanged. Everything else — other summary
/// lines, garbled output, even empty stderr — is treated as changed: the
/// bias is toward reporting a change rather than silently skipping one.
pub fn is_changed(output: &CmdOutput) -> bool {
    last_line(output).is_none_or(|line| !NO_CHANGES.is_match(line))
}

/// Whether the target node is still in maintenance mode (no applied
/// config yet).
///
/// Exposed for callers that want to branch on bootstrap state; the
/// apply-config flow itself does not consume it.
pub fn is_maintenance_mode(output: &CmdOutput) -> bool {
    last_line(output).is_some_and(|line| MAINTENANCE_MODE.is_match(line))
}
