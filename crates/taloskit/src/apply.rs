//! The apply-config orchestration sequence.
//!
//! A single synchronous pass with no retries: run apply-config with
//! `--dry-run`, classify the output, then either report (check mode or no
//! change) or perform the real apply. The changed/unchanged decision is
//! only ever made from the dry-run output; once a change is confirmed the
//! real invocation is fire-and-forget apart from its exit code.

use crate::Talosctl;
use crate::classify;
use crate::diff::ConfigDiff;
use crate::error::{Error, Result};
use crate::report::ApplyReport;
use crate::types::{CommandSpec, FlagValue};
use std::fmt;

/// The talosctl subcommand this orchestrator drives.
const APPLY_CONFIG: &str = "apply-config";

/// Timeout forwarded to talosctl when the caller does not pick one.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Reboot behavior when applying a configuration (`--mode`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Let talosctl pick between reboot and no-reboot.
    #[default]
    Auto,
    /// Apply immediately and ask on the console when a reboot is needed.
    Interactive,
    /// Apply immediately, fail if a reboot would be required.
    NoReboot,
    /// Apply on the next reboot.
    Reboot,
    /// Stage the config, apply on a later reboot.
    Staged,
    /// Apply immediately, revert unless confirmed.
    Try,
}

impl Mode {
    /// The value talosctl expects after `--mode`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Interactive => "interactive",
            Self::NoReboot => "no-reboot",
            Self::Reboot => "reboot",
            Self::Staged => "staged",
            Self::Try => "try",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters of one apply-config run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyConfig {
    /// Machine configuration file (`--file`).
    pub file: String,
    /// Server certificate fingerprints to accept (`--cert-fingerprint`).
    pub cert_fingerprints: Vec<String>,
    /// Patches applied on top of the file (`--config-patch`).
    pub config_patches: Vec<String>,
    /// Skip TLS verification (`--insecure`); needed for nodes still in
    /// maintenance mode.
    pub insecure: bool,
    /// Reboot behavior (`--mode`).
    pub mode: Mode,
    /// Timeout in seconds, forwarded as `--timeout <n>s` when positive.
    /// talosctl enforces it; this crate does not watch the clock.
    pub timeout_secs: u64,
}

impl ApplyConfig {
    /// Apply `file` with default settings.
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            ..Self::default()
        }
    }

    /// Build the apply-config command with the dry-run flag set as given.
    fn command_spec(&self, dry_run: bool) -> CommandSpec {
        let mut spec = CommandSpec::new(APPLY_CONFIG)
            .flag("--cert-fingerprint", FlagValue::List(self.cert_fingerprints.clone()))
            .flag("--config-patch", FlagValue::List(self.config_patches.clone()))
            .flag("--file", FlagValue::Value(self.file.clone()))
            .flag("--insecure", FlagValue::Switch(self.insecure))
            .flag("--mode", FlagValue::Value(self.mode.as_str().to_string()))
            .flag("--dry-run", FlagValue::Switch(dry_run));
        if self.timeout_secs > 0 {
            // talosctl wants a duration, not a bare integer
            let timeout = format!("{}s", self.timeout_secs);
            spec = spec.flag("--timeout", FlagValue::Value(timeout));
        }
        spec
    }
}

impl Default for ApplyConfig {
    fn default() -> Self {
        Self {
            file: String::new(),
            cert_fingerprints: Vec::new(),
            config_patches: Vec::new(),
            insecure: false,
            mode: Mode::default(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Flags supplied by the caller's execution context.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyOptions {
    /// Compute and report the intended change without performing it.
    pub check_mode: bool,
    /// Include the configuration diff in the report.
    pub diff_mode: bool,
}

/// Apply a machine configuration idempotently.
///
/// The sequence:
///
/// 1. Run apply-config with `--dry-run`; a non-zero exit is fatal
///    ([`Error::Command`]), nothing is mutated.
/// 2. Classify the dry-run output. When nothing would change, or in check
///    mode, the run is a pure read: the report is built from the dry-run
///    alone and no real invocation happens.
/// 3. Otherwise run the real apply with the same flags (dry-run off),
///    carrying the diff computed from the dry-run; its non-zero exit is
///    fatal too.
///
/// The diff is computed only in diff mode and only when a change was
/// detected, so an unchanged report never carries one.
pub fn apply_config(
    client: &Talosctl,
    config: &ApplyConfig,
    options: &ApplyOptions,
) -> Result<ApplyReport> {
    let dry_run = client.run(&config.command_spec(true))?;
    if !dry_run.success() {
        return Err(Error::Command {
            command: APPLY_CONFIG.to_string(),
            output: dry_run,
        });
    }

    let changed = classify::is_changed(&dry_run);
    if classify::is_maintenance_mode(&dry_run) {
        log::info!("node is in maintenance mode and has no config yet");
    }

    let diff = if options.diff_mode && changed {
        Some(ConfigDiff::from_output(&dry_run).to_string())
    } else {
        None
    };

    if options.check_mode || !changed {
        return Ok(ApplyReport {
            rc: dry_run.rc,
            stdout: dry_run.stdout,
            stderr: dry_run.stderr,
            changed,
            diff,
        });
    }

    let applied = client.run_checked(&config.command_spec(false))?;
    Ok(ApplyReport {
        rc: applied.rc,
        stdout: applied.stdout,
        stderr: applied.stderr,
        changed: true,
        diff,
    })
}
