//! Externally visible results of an apply-config run.

use crate::error::Error;
use serde::Serialize;

/// Successful result of one apply-config run.
///
/// Constructed once by the orchestrator and never mutated afterwards.
/// `rc`, `stdout`, and `stderr` come from the last invocation that ran
/// (the dry-run when no mutation happened, the real apply otherwise).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplyReport {
    /// Exit code of the reported invocation.
    pub rc: i32,
    /// Its captured standard output.
    pub stdout: String,
    /// Its captured standard error.
    pub stderr: String,
    /// Whether applying the configuration changed (or would change)
    /// anything.
    pub changed: bool,
    /// Rendered configuration diff. Present only when diff reporting was
    /// requested and a change was detected; an unchanged report never
    /// carries a diff.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<String>,
}

/// Fatal failure surfaced to the caller.
///
/// Carries the triggering process's exit code, stdout, and stderr
/// verbatim; `msg` repeats stderr as the human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureReport {
    /// Exit code of the failed invocation.
    pub rc: i32,
    /// Its captured standard output.
    pub stdout: String,
    /// Its captured standard error.
    pub stderr: String,
    /// Human-readable message.
    pub msg: String,
}

impl FailureReport {
    /// Build the failure report for an error.
    ///
    /// A spawn failure has no process output to surface; it is reported
    /// with exit code 127 and the OS error as the message.
    pub fn from_error(err: &Error) -> Self {
        match err {
            Error::NotAvailable { output } | Error::Command { output, .. } => Self {
                rc: output.rc,
                stdout: output.stdout.clone(),
                stderr: output.stderr.clone(),
                msg: output.stderr.clone(),
            },
            Error::Exec { .. } => Self {
                rc: 127,
                stdout: String::new(),
                stderr: String::new(),
                msg: err.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CmdOutput;

    #[test]
    fn test_diff_is_omitted_from_json_when_absent() {
        let report = ApplyReport {
            rc: 0,
            stdout: String::new(),
            stderr: "No changes.".to_string(),
            changed: false,
            diff: None,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("diff").is_none());
        assert_eq!(json["changed"], false);
        assert_eq!(json["rc"], 0);
    }

    #[test]
    fn test_diff_is_present_in_json_when_computed() {
        let report = ApplyReport {
            rc: 0,
            stdout: String::new(),
            stderr: String::new(),
            changed: true,
            diff: Some("--- old\n+++ new".to_string()),
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["diff"], "--- old\n+++ new");
    }

    #[test]
    fn test_failure_report_msg_equals_stderr() {
        let err = Error::Command {
            command: "apply-config".to_string(),
            output: CmdOutput {
                rc: 5,
                stdout: "partial".to_string(),
                stderr: "certificate required".to_string(),
            },
        };
        let failure = FailureReport::from_error(&err);
        assert_eq!(failure.rc, 5);
        assert_eq!(failure.stdout, "partial");
        assert_eq!(failure.stderr, "certificate required");
        assert_eq!(failure.msg, "certificate required");
    }

    #[test]
    fn test_spawn_failure_maps_to_127() {
        let err = Error::Exec {
            program: "talosctl".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "No such file"),
        };
        let failure = FailureReport::from_error(&err);
        assert_eq!(failure.rc, 127);
        assert!(failure.msg.contains("talosctl"));
    }
}
