//! Build error types and diagnostics.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::core::CppCompiler;
use crate::util::diagnostic::{suggestions, Diagnostic};

/// The pipeline step a toolchain invocation belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvocationStep {
    /// Precompiling a module interface unit
    PrecompileModule(PathBuf),
    /// The main compile-and-link invocation
    BuildExecutable(String),
    /// Running the produced executable
    RunExecutable(PathBuf),
}

impl fmt::Display for InvocationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvocationStep::PrecompileModule(module) => {
                write!(f, "precompiling module `{}`", module.display())
            }
            InvocationStep::BuildExecutable(name) => write!(f, "building executable `{}`", name),
            InvocationStep::RunExecutable(path) => write!(f, "running `{}`", path.display()),
        }
    }
}

/// Error during a build.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("unsupported compiler `{0}`")]
    UnsupportedCompiler(CppCompiler),

    #[error("C++{actual} is not enough for {feature}: at least C++{required} is required")]
    LanguageLevelNotEnough {
        required: u32,
        actual: u32,
        feature: String,
    },

    #[error("failed to create directory `{}`", .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("toolchain invocation failed while {step}: {reason}")]
    ToolchainInvocation { step: InvocationStep, reason: String },
}

impl BuildError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            BuildError::UnsupportedCompiler(compiler) => {
                Diagnostic::error(format!("unsupported compiler `{}`", compiler))
                    .with_context("only `clang` has a supported build path")
                    .with_suggestion("Set `cpp_compiler = \"clang\"` in the `[compiler]` section")
            }

            BuildError::LanguageLevelNotEnough {
                required,
                actual,
                feature,
            } => Diagnostic::error(format!(
                "C++{} is not enough for {}",
                actual, feature
            ))
            .with_context(format!("{} require at least C++{}", feature, required))
            .with_suggestion(format!(
                "Set `cpp_standard = {}` or higher in the `[language]` section",
                required
            ))
            .with_suggestion("Remove the `modules` entry from the `[language]` section"),

            BuildError::Filesystem { path, source } => {
                Diagnostic::error(format!("failed to create directory `{}`", path.display()))
                    .with_context(source.to_string())
                    .with_suggestion("Check the permissions of the project directory")
                    .with_suggestion("Remove any file occupying the build output path")
            }

            BuildError::ToolchainInvocation { step, reason } => {
                Diagnostic::error(format!("toolchain invocation failed while {}", step))
                    .with_context(reason.clone())
                    .with_suggestion(suggestions::BUILD_FAILED)
            }
        }
    }
}
