//! # taloskit
//!
//! Pure Rust library for driving the `talosctl` CLI.
//!
//! This crate provides functionality for:
//! - Assembling talosctl argument lists from connection parameters and
//!   per-command flags
//! - Running talosctl synchronously and capturing its output
//! - Classifying dry-run output into changed / unchanged /
//!   maintenance-mode states
//! - Extracting the configuration diff embedded in apply-config output
//! - Applying a machine configuration idempotently, with check-mode and
//!   diff-mode support
//!
//! ## Example
//!
//! ```no_run
//! use taloskit::{ApplyConfig, ApplyOptions, Connection, Talosctl};
//!
//! let connection = Connection {
//!     nodes: vec!["10.0.0.10".to_string()],
//!     endpoints: vec!["10.0.0.10".to_string()],
//!     talosconfig: Some("/home/op/.talos/config".to_string()),
//!     ..Connection::default()
//! };
//!
//! let client = Talosctl::new(connection);
//! let config = ApplyConfig::new("controlplane.yaml");
//! let options = ApplyOptions { check_mode: false, diff_mode: true };
//!
//! let report = client.apply_config(&config, &options).expect("apply failed");
//! if report.changed {
//!     println!("{}", report.diff.as_deref().unwrap_or(""));
//! }
//! ```
//!
//! ## Decision oracle
//!
//! Whether an apply would change anything is decided purely from
//! talosctl's own dry-run output (see [`classify`]); this crate never
//! parses the machine configuration itself. The classification is
//! deliberately conservative: only the exact `No changes.` summary counts
//! as a no-op.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod apply;
pub mod backend;
pub mod classify;
pub mod diff;
pub mod error;
pub mod report;
pub mod text;
pub mod types;

pub use apply::{ApplyConfig, ApplyOptions, Mode};
pub use diff::ConfigDiff;
pub use error::{Error, Result};
pub use report::{ApplyReport, FailureReport};
pub use types::{CmdOutput, CommandSpec, Connection, FlagValue};

use backend::Backend;

/// High-level client for talosctl operations.
///
/// Holds the connection parameters for the duration of a run and wraps a
/// [`Backend`] that does the actual process execution.
pub struct Talosctl {
    connection: Connection,
    backend: Box<dyn Backend>,
}

impl Talosctl {
    /// Create a client talking to the real talosctl CLI.
    pub fn new(connection: Connection) -> Self {
        Self {
            connection,
            backend: Box::new(backend::default_backend()),
        }
    }

    /// Create a client with a custom backend (useful for testing).
    pub fn with_backend(connection: Connection, backend: Box<dyn Backend>) -> Self {
        Self {
            connection,
            backend,
        }
    }

    /// The connection parameters every invocation is built from.
    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// Check whether talosctl is invocable at all.
    pub fn is_available(&self) -> bool {
        self.probe().is_ok()
    }

    /// Liveness probe: a bare talosctl invocation with no arguments.
    ///
    /// Returns [`Error::NotAvailable`] carrying the probe's output
    /// verbatim when it exits non-zero.
    pub fn probe(&self) -> Result<()> {
        let output = self.backend.run(&[])?;
        if output.success() {
            Ok(())
        } else {
            Err(Error::NotAvailable { output })
        }
    }

    /// Run one talosctl command and return its raw output.
    ///
    /// The liveness probe runs first, before any arguments are assembled;
    /// a failed probe means nothing else executes. The caller gets the
    /// captured output back regardless of exit code and decides how to
    /// branch on it.
    pub fn run(&self, spec: &CommandSpec) -> Result<CmdOutput> {
        self.probe()?;
        let args = self.build_args(spec);
        self.backend.run(&args)
    }

    /// Run a command that must succeed.
    ///
    /// Like [`run`](Self::run), but a non-zero exit becomes
    /// [`Error::Command`] carrying the output verbatim.
    pub fn run_checked(&self, spec: &CommandSpec) -> Result<CmdOutput> {
        let output = self.run(spec)?;
        if output.success() {
            Ok(output)
        } else {
            Err(Error::Command {
                command: spec.command.clone(),
                output,
            })
        }
    }

    /// Apply a machine configuration idempotently.
    ///
    /// See [`apply::apply_config`] for the orchestration contract.
    pub fn apply_config(
        &self,
        config: &ApplyConfig,
        options: &ApplyOptions,
    ) -> Result<ApplyReport> {
        apply::apply_config(self, config, options)
    }

    /// Assemble the full argument list for a command.
    ///
    /// The subcommand name comes first, then the global connection flags
    /// (cluster, context, endpoints, nodes, talosconfig), then the
    /// command's own flags in caller-supplied order. Unset or empty
    /// connection values are omitted.
    pub fn build_args(&self, spec: &CommandSpec) -> Vec<String> {
        let mut args = vec![spec.command.clone()];

        let conn = &self.connection;
        if let Some(cluster) = &conn.cluster {
            FlagValue::Value(cluster.clone()).render("--cluster", &mut args);
        }
        if let Some(context) = &conn.context {
            FlagValue::Value(context.clone()).render("--context", &mut args);
        }
        FlagValue::List(conn.endpoints.clone()).render("--endpoints", &mut args);
        FlagValue::List(conn.nodes.clone()).render("--nodes", &mut args);
        if let Some(talosconfig) = &conn.talosconfig {
            FlagValue::Value(talosconfig.clone()).render("--talosconfig", &mut args);
        }

        for (flag, value) in &spec.flags {
            value.render(flag, &mut args);
        }

        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::mock::MockBackend;

    fn ok_output() -> CmdOutput {
        CmdOutput::default()
    }

    fn full_connection() -> Connection {
        Connection {
            cluster: Some("prod".to_string()),
            context: Some("admin@prod".to_string()),
            endpoints: vec!["10.0.0.1".to_string(), "10.0.0.2".to_string()],
            nodes: vec!["10.0.0.10".to_string()],
            talosconfig: Some("/etc/talos/config".to_string()),
        }
    }

    #[test]
    fn test_build_args_global_flags_before_command_flags() {
        let client = Talosctl::with_backend(
            full_connection(),
            Box::new(MockBackend::new(Vec::new())),
        );
        let spec = CommandSpec::new("apply-config")
            .flag("--file", FlagValue::Value("cp.yaml".to_string()))
            .flag("--dry-run", FlagValue::Switch(true));

        let args = client.build_args(&spec);
        assert_eq!(
            args,
            [
                "apply-config",
                "--cluster",
                "prod",
                "--context",
                "admin@prod",
                "--endpoints",
                "10.0.0.1",
                "10.0.0.2",
                "--nodes",
                "10.0.0.10",
                "--talosconfig",
                "/etc/talos/config",
                "--file",
                "cp.yaml",
                "--dry-run",
            ]
        );
    }

    #[test]
    fn test_build_args_omits_unset_connection_values() {
        let client = Talosctl::with_backend(
            Connection::default(),
            Box::new(MockBackend::new(Vec::new())),
        );
        let spec = CommandSpec::new("version");
        assert_eq!(client.build_args(&spec), ["version"]);
    }

    #[test]
    fn test_run_probes_before_command() {
        let backend = MockBackend::new(vec![ok_output(), ok_output()]);
        let client = Talosctl::with_backend(Connection::default(), Box::new(backend.clone()));

        let spec = CommandSpec::new("version");
        client.run(&spec).unwrap();

        let calls = backend.calls();
        assert_eq!(calls.len(), 2);
        assert!(calls[0].is_empty(), "probe must run with no arguments");
        assert_eq!(calls[1], ["version"]);
    }

    #[test]
    fn test_failed_probe_stops_before_argument_assembly() {
        let probe = CmdOutput {
            rc: 1,
            stdout: "usage".to_string(),
            stderr: "talosctl misconfigured".to_string(),
        };
        let backend = MockBackend::new(vec![probe]);
        let client = Talosctl::with_backend(Connection::default(), Box::new(backend.clone()));

        let spec = CommandSpec::new("apply-config");
        let err = client.run(&spec).unwrap_err();
        match err {
            Error::NotAvailable { output } => {
                assert_eq!(output.rc, 1);
                assert_eq!(output.stdout, "usage");
                assert_eq!(output.stderr, "talosctl misconfigured");
            }
            other => panic!("expected NotAvailable, got {other:?}"),
        }
        assert_eq!(backend.calls().len(), 1, "only the probe may have run");
    }

    #[test]
    fn test_run_checked_maps_nonzero_exit() {
        let failed = CmdOutput {
            rc: 5,
            stdout: String::new(),
            stderr: "error talking to node".to_string(),
        };
        let backend = MockBackend::new(vec![ok_output(), failed]);
        let client = Talosctl::with_backend(Connection::default(), Box::new(backend));

        let err = client.run_checked(&CommandSpec::new("apply-config")).unwrap_err();
        match err {
            Error::Command { command, output } => {
                assert_eq!(command, "apply-config");
                assert_eq!(output.rc, 5);
            }
            other => panic!("expected Command, got {other:?}"),
        }
    }
}
