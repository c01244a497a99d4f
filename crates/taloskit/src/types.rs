//! Core types for talosctl invocations.

use serde::{Deserialize, Serialize};
use std::process::Output;

/// Connection parameters forwarded to every talosctl invocation.
///
/// Built once per run and passed explicitly into [`crate::Talosctl`];
/// nothing in this crate reads connection settings from ambient state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    /// Cluster to use from the client configuration (`--cluster`).
    pub cluster: Option<String>,
    /// Context to use from the client configuration (`--context`).
    pub context: Option<String>,
    /// API endpoints to talk to (`--endpoints`).
    #[serde(default)]
    pub endpoints: Vec<String>,
    /// Target node addresses (`--nodes`).
    #[serde(default)]
    pub nodes: Vec<String>,
    /// Path to the talos client configuration file (`--talosconfig`).
    pub talosconfig: Option<String>,
}

/// Value attached to a single command flag.
///
/// talosctl flags come in three shapes: bare switches, repeated-value
/// flags, and plain `--flag value` pairs. A false switch, an empty list,
/// or an empty value omits the flag entirely; "absent" is simply the flag
/// not being listed at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagValue {
    /// Flag emitted alone when true, omitted when false.
    Switch(bool),
    /// Flag emitted once, followed by every element as its own argument.
    List(Vec<String>),
    /// Flag followed by its value.
    Value(String),
}

impl FlagValue {
    /// Append this flag (and its value, if any) to an argument list.
    pub fn render(&self, flag: &str, args: &mut Vec<String>) {
        match self {
            Self::Switch(false) => {}
            Self::Switch(true) => args.push(flag.to_string()),
            Self::List(items) if items.is_empty() => {}
            Self::List(items) => {
                args.push(flag.to_string());
                args.extend(items.iter().cloned());
            }
            Self::Value(value) if value.is_empty() => {}
            Self::Value(value) => {
                args.push(flag.to_string());
                args.push(value.clone());
            }
        }
    }
}

/// A talosctl command plus its flags, in emission order.
///
/// Flags are kept as an ordered list, not a map: talosctl sees them in
/// exactly the order the caller supplied them.
#[derive(Debug, Clone, Default)]
pub struct CommandSpec {
    /// Subcommand name, e.g. `apply-config`.
    pub command: String,
    /// Flags in emission order.
    pub flags: Vec<(String, FlagValue)>,
}

impl CommandSpec {
    /// Start a spec for the given subcommand.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            flags: Vec::new(),
        }
    }

    /// Append a flag, preserving insertion order.
    pub fn flag(mut self, name: impl Into<String>, value: FlagValue) -> Self {
        self.flags.push((name.into(), value));
        self
    }
}

/// Captured result of one external invocation.
///
/// Produced exactly once per invocation and read-only after creation; the
/// classifier and diff extractor only ever look at `stderr`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CmdOutput {
    /// Process exit code. `-1` when the process was killed by a signal.
    pub rc: i32,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
}

impl CmdOutput {
    /// Whether the process exited zero.
    pub fn success(&self) -> bool {
        self.rc == 0
    }
}

impl From<Output> for CmdOutput {
    fn from(output: Output) -> Self {
        Self {
            rc: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}
