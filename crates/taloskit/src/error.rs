//! Error types for talosctl operations.
//!
//! Two failure kinds matter to callers: the tool not being invocable at
//! all (the liveness probe failed) and a command exiting non-zero. Both
//! carry the triggering process output verbatim; there is no retry and no
//! partial-success state anywhere in this crate.

use crate::types::CmdOutput;
use thiserror::Error;

/// Errors from driving talosctl.
#[derive(Debug, Error)]
pub enum Error {
    /// The liveness probe exited non-zero: talosctl is present but not
    /// usable.
    #[error("talosctl is not available (probe exited with {})", .output.rc)]
    NotAvailable {
        /// Output of the failed probe invocation, verbatim.
        output: CmdOutput,
    },

    /// A talosctl command exited non-zero.
    #[error("talosctl {command} failed with exit code {}", .output.rc)]
    Command {
        /// The subcommand that failed.
        command: String,
        /// Output of the failed invocation, verbatim.
        output: CmdOutput,
    },

    /// The talosctl process could not be spawned at all.
    #[error("failed to execute {program}: {source}")]
    Exec {
        /// Program that could not be started.
        program: String,
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
    },
}

/// Result type for talosctl operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_carries_exit_code() {
        let err = Error::Command {
            command: "apply-config".to_string(),
            output: CmdOutput {
                rc: 5,
                stdout: String::new(),
                stderr: "boom".to_string(),
            },
        };
        assert_eq!(err.to_string(), "talosctl apply-config failed with exit code 5");
    }

    #[test]
    fn test_not_available_display() {
        let err = Error::NotAvailable {
            output: CmdOutput {
                rc: 1,
                stdout: String::new(),
                stderr: String::new(),
            },
        };
        assert_eq!(err.to_string(), "talosctl is not available (probe exited with 1)");
    }
}
