//! Backend abstraction for running talosctl.
//!
//! The [`Backend`] trait is the process-execution seam: the real
//! implementation shells out to the `talosctl` binary, tests substitute
//! a scripted one.

pub mod talosctl;

use crate::error::Result;
use crate::types::CmdOutput;

/// Executes one talosctl invocation.
pub trait Backend: Send + Sync {
    /// Run talosctl with the given arguments, blocking until it exits,
    /// and capture exit code, stdout, and stderr as one atomic unit.
    fn run(&self, args: &[String]) -> Result<CmdOutput>;
}

/// Get the default backend (the real talosctl CLI).
pub fn default_backend() -> talosctl::TalosctlBackend {
    talosctl::TalosctlBackend::new()
}

#[cfg(test)]
pub(crate) mod mock {
    use super::Backend;
    use crate::error::Result;
    use crate::types::CmdOutput;
    use std::sync::{Arc, Mutex};

    /// Scripted backend: hands out one canned output per invocation, in
    /// order, and records every argument list it was given.
    pub struct MockBackend {
        outputs: Mutex<Vec<CmdOutput>>,
        calls: Mutex<Vec<Vec<String>>>,
    }

    impl MockBackend {
        pub fn new(outputs: Vec<CmdOutput>) -> Arc<Self> {
            Arc::new(Self {
                outputs: Mutex::new(outputs),
                calls: Mutex::new(Vec::new()),
            })
        }

        /// Every argument list this backend has run, in order.
        pub fn calls(&self) -> Vec<Vec<String>> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl Backend for Arc<MockBackend> {
        fn run(&self, args: &[String]) -> Result<CmdOutput> {
            self.calls.lock().unwrap().push(args.to_vec());
            let mut outputs = self.outputs.lock().unwrap();
            assert!(!outputs.is_empty(), "mock backend ran out of scripted outputs");
            Ok(outputs.remove(0))
        }
    }
}
