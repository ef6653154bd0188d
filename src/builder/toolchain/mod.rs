//! Toolchain abstraction for C++ compilers.
//!
//! Each supported compiler provides a [`Toolchain`] that knows how to render
//! module precompile and compile-and-link commands. Compiler selection maps a
//! [`CppCompiler`] onto one of these strategies; selections without a
//! strategy are rejected before any work happens.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::builder::errors::BuildError;
use crate::core::{CompilerSettings, CppCompiler, LanguageSpec};

mod clang;

pub use clang::ClangToolchain;

/// A command to execute: program and arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandSpec {
    /// The program to run (e.g., "clang++")
    pub program: PathBuf,
    /// Command arguments
    pub args: Vec<String>,
}

impl CommandSpec {
    /// Create a new command spec.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        CommandSpec {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Add an argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Add multiple arguments.
    pub fn args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args.extend(args.into_iter().map(|a| a.into()));
        self
    }

    /// The full argument vector, program first.
    pub fn to_argv(&self) -> Vec<String> {
        let mut argv = Vec::with_capacity(self.args.len() + 1);
        argv.push(self.program.display().to_string());
        argv.extend(self.args.iter().cloned());
        argv
    }

    /// The command line as a single space-separated string.
    pub fn display(&self) -> String {
        self.to_argv().join(" ")
    }
}

/// Input for precompiling one module interface unit.
#[derive(Debug, Clone)]
pub struct ModuleInput {
    /// Module interface source
    pub source: PathBuf,
    /// Precompiled module artifact to produce
    pub output: PathBuf,
}

/// Input for the main compile-and-link step.
#[derive(Debug, Clone)]
pub struct ExecutableInput {
    /// Executable to produce
    pub output: PathBuf,
    /// Translation units, in order
    pub sources: Vec<PathBuf>,
    /// Module interface sources passed again to the main invocation
    pub module_sources: Vec<PathBuf>,
    /// Directory holding the precompiled module artifacts
    pub prebuilt_module_path: Option<PathBuf>,
}

/// Trait for toolchain implementations.
///
/// Each toolchain knows how to generate commands for its specific compiler.
pub trait Toolchain: Send + Sync {
    /// The compiler this toolchain drives.
    fn compiler(&self) -> &CppCompiler;

    /// Path to the compiler driver.
    fn driver(&self) -> &Path;

    /// File extension of precompiled module artifacts (without the dot).
    fn module_artifact_extension(&self) -> &str;

    /// Generate the command that precompiles one module interface unit.
    fn precompile_module_command(&self, lang: &LanguageSpec, input: &ModuleInput) -> CommandSpec;

    /// Generate the command that compiles and links the executable.
    fn executable_command(&self, lang: &LanguageSpec, input: &ExecutableInput) -> CommandSpec;
}

/// Select the toolchain strategy for the configured compiler.
pub fn select_toolchain(settings: &CompilerSettings) -> Result<Box<dyn Toolchain>, BuildError> {
    match &settings.cpp_compiler {
        CppCompiler::Clang => Ok(Box::new(ClangToolchain::new(settings.driver_path.clone()))),
        unsupported @ (CppCompiler::Gcc | CppCompiler::Other(_)) => {
            Err(BuildError::UnsupportedCompiler(unsupported.clone()))
        }
    }
}
