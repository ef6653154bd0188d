//! Test utilities for Zork unit tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use zork::test_support::{RecordingRunner, model_fixture};
//!
//! #[test]
//! fn test_example() {
//!     let runner = RecordingRunner::new().fail_on(1, 2);
//!     let model = model_fixture(&["main.cpp"], &["src/math.cppm"], 20);
//!     // Build with `runner`, then inspect `runner.commands()`
//! }
//! ```

pub mod fixtures;

use std::collections::HashMap;
use std::sync::Mutex;

use crate::builder::toolchain::CommandSpec;
use crate::util::process::{InvocationResult, ProcessRunner};

pub use fixtures::*;

/// Process runner that records commands instead of spawning them.
///
/// Every invocation succeeds with exit code 0 unless a different result was
/// scripted for its position (0-based, in call order).
#[derive(Debug, Default)]
pub struct RecordingRunner {
    commands: Mutex<Vec<CommandSpec>>,
    scripted: HashMap<usize, InvocationResult>,
}

impl RecordingRunner {
    /// Create a runner where every invocation succeeds.
    pub fn new() -> Self {
        RecordingRunner::default()
    }

    /// Make the `index`-th invocation exit with `exit_code`.
    pub fn fail_on(mut self, index: usize, exit_code: i32) -> Self {
        self.scripted
            .insert(index, InvocationResult::Ok { exit_code });
        self
    }

    /// Make the `index`-th invocation fail to run at all.
    pub fn unrunnable_on(mut self, index: usize, reason: &str) -> Self {
        self.scripted.insert(
            index,
            InvocationResult::Failed {
                reason: reason.to_string(),
            },
        );
        self
    }

    /// Commands run so far, in order.
    pub fn commands(&self) -> Vec<CommandSpec> {
        self.commands.lock().unwrap().clone()
    }

    /// Argument vectors of the commands run so far.
    pub fn argvs(&self) -> Vec<Vec<String>> {
        self.commands().iter().map(|c| c.to_argv()).collect()
    }
}

impl ProcessRunner for RecordingRunner {
    fn run(&self, cmd: &CommandSpec) -> InvocationResult {
        let mut commands = self.commands.lock().unwrap();
        let index = commands.len();
        commands.push(cmd.clone());

        self.scripted
            .get(&index)
            .cloned()
            .unwrap_or(InvocationResult::Ok { exit_code: 0 })
    }
}
