//! Real talosctl CLI backend.

use crate::backend::Backend;
use crate::error::{Error, Result};
use crate::types::CmdOutput;
use std::process::Command;

/// Default program name, resolved through `PATH`.
pub const DEFAULT_PROGRAM: &str = "talosctl";

/// Backend that executes the real `talosctl` binary synchronously.
pub struct TalosctlBackend {
    program: String,
}

impl TalosctlBackend {
    /// Backend invoking `talosctl` from `PATH`.
    pub fn new() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
        }
    }

    /// Backend invoking a specific talosctl binary.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for TalosctlBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for TalosctlBackend {
    fn run(&self, args: &[String]) -> Result<CmdOutput> {
        log::debug!("running {} {}", self.program, args.join(" "));
        let output = Command::new(&self.program)
            .args(args)
            .output()
            .map_err(|source| Error::Exec {
                program: self.program.clone(),
                source,
            })?;
        Ok(CmdOutput::from(output))
    }
}
