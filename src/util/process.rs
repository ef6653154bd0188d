//! Subprocess execution utilities.

use std::ffi::OsStr;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use anyhow::{Context, Result};

use crate::builder::toolchain::CommandSpec;

/// Builder for subprocess execution.
#[derive(Debug, Clone)]
pub struct ProcessBuilder {
    program: PathBuf,
    args: Vec<String>,
    cwd: Option<PathBuf>,
}

impl ProcessBuilder {
    /// Create a new process builder for the given program.
    pub fn new(program: impl AsRef<Path>) -> Self {
        ProcessBuilder {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Add a single argument.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_string_lossy().into_owned());
        self
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|s| s.as_ref().to_string_lossy().into_owned()));
        self
    }

    /// Set the working directory.
    pub fn cwd(mut self, cwd: impl AsRef<Path>) -> Self {
        self.cwd = Some(cwd.as_ref().to_path_buf());
        self
    }

    fn build_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);

        if let Some(ref cwd) = self.cwd {
            cmd.current_dir(cwd);
        }

        cmd
    }

    /// Execute with inherited stdio and wait for the exit status.
    pub fn status(&self) -> Result<ExitStatus> {
        let mut cmd = self.build_command();
        let status = cmd
            .status()
            .with_context(|| format!("failed to execute `{}`", self.program.display()))?;
        Ok(status)
    }

    /// Display the command for error messages.
    pub fn display_command(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }
}

impl From<&CommandSpec> for ProcessBuilder {
    fn from(spec: &CommandSpec) -> Self {
        ProcessBuilder::new(&spec.program).args(&spec.args)
    }
}

/// Outcome of a single toolchain invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvocationResult {
    /// The process ran to completion.
    Ok { exit_code: i32 },
    /// The process could not be started, or ended without an exit code.
    Failed { reason: String },
}

impl InvocationResult {
    /// Check whether the process exited with code 0.
    pub fn is_success(&self) -> bool {
        matches!(self, InvocationResult::Ok { exit_code: 0 })
    }
}

impl fmt::Display for InvocationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvocationResult::Ok { exit_code } => write!(f, "exited with code {}", exit_code),
            InvocationResult::Failed { reason } => write!(f, "{}", reason),
        }
    }
}

/// Runs toolchain commands, one at a time, to completion.
pub trait ProcessRunner {
    fn run(&self, cmd: &CommandSpec) -> InvocationResult;
}

/// Runs commands as real child processes with inherited stdio.
#[derive(Debug, Clone)]
pub struct SystemRunner {
    cwd: PathBuf,
}

impl SystemRunner {
    /// Create a runner whose children start in `cwd`.
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        SystemRunner { cwd: cwd.into() }
    }
}

impl ProcessRunner for SystemRunner {
    fn run(&self, cmd: &CommandSpec) -> InvocationResult {
        let process = ProcessBuilder::from(cmd).cwd(&self.cwd);

        match process.status() {
            Ok(status) => match status.code() {
                Some(exit_code) => InvocationResult::Ok { exit_code },
                None => InvocationResult::Failed {
                    reason: format!(
                        "`{}` was terminated by a signal",
                        process.display_command()
                    ),
                },
            },
            Err(e) => InvocationResult::Failed {
                reason: format!("{:#}", e),
            },
        }
    }
}

/// Find an executable in PATH.
pub fn find_executable(name: impl AsRef<OsStr>) -> Option<PathBuf> {
    which::which(name).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_command() {
        let pb = ProcessBuilder::new("clang++").args(["--std=c++20", "-o", "app", "main.cpp"]);

        assert_eq!(pb.display_command(), "clang++ --std=c++20 -o app main.cpp");
    }

    #[test]
    fn test_from_command_spec() {
        let spec = CommandSpec::new("clang++").args(["-o", "build/app"]);
        let pb = ProcessBuilder::from(&spec);

        assert_eq!(pb.display_command(), "clang++ -o build/app");
    }

    #[test]
    fn test_invocation_result() {
        assert!(InvocationResult::Ok { exit_code: 0 }.is_success());
        assert!(!InvocationResult::Ok { exit_code: 2 }.is_success());
        assert_eq!(
            InvocationResult::Ok { exit_code: 2 }.to_string(),
            "exited with code 2"
        );
        assert!(!InvocationResult::Failed {
            reason: "no such file".to_string()
        }
        .is_success());
    }

    #[cfg(unix)]
    #[test]
    fn test_system_runner_reports_exit_code() {
        let tmp = tempfile::TempDir::new().unwrap();
        let runner = SystemRunner::new(tmp.path());

        let ok = runner.run(&CommandSpec::new("sh").args(["-c", "exit 0"]));
        assert_eq!(ok, InvocationResult::Ok { exit_code: 0 });

        let failed = runner.run(&CommandSpec::new("sh").args(["-c", "exit 3"]));
        assert_eq!(failed, InvocationResult::Ok { exit_code: 3 });
    }

    #[test]
    fn test_system_runner_missing_program() {
        let tmp = tempfile::TempDir::new().unwrap();
        let runner = SystemRunner::new(tmp.path());

        let result = runner.run(&CommandSpec::new("zork-definitely-not-a-real-binary"));
        assert!(matches!(result, InvocationResult::Failed { .. }));
    }
}
