//! Implementation of `zork build` and `zork run`.
//!
//! The build moves through these stages:
//!
//! 1. Select the toolchain for the configured compiler
//! 2. Validate the language level against declared modules
//! 3. Ensure the output directory exists
//! 4. Precompile module units (only when modules are declared)
//! 5. Assemble and run the compile-and-link command
//!
//! Stages 1 and 2 fail before anything touches the filesystem or spawns a
//! process.

use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info};

use crate::builder::{
    ensure_output_dir, select_toolchain, BuildError, BuildPlan, CommandBuilder, CommandSpec,
    InvocationStep, ModulePrecompiler,
};
use crate::core::ZorkModel;
use crate::util::process::{InvocationResult, ProcessRunner};

/// Options for a build.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Log every assembled command line before running it
    pub verbose: bool,
    /// Run the executable after a successful build, regardless of `auto_execute`
    pub run: bool,
}

/// Result of a build that reached the main toolchain invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOutcome {
    /// Exit code of the compile-and-link invocation, verbatim
    pub exit_code: i32,
    /// Executable path, relative to the project root
    pub executable: PathBuf,
    /// Exit code of the executable, if it was run
    pub run_exit_code: Option<i32>,
}

impl BuildOutcome {
    /// Check whether the compile-and-link step succeeded.
    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Compute the build plan without side effects.
pub fn plan(model: &ZorkModel) -> Result<BuildPlan, BuildError> {
    BuildPlan::new(model)
}

/// Build the project rooted at `root`.
///
/// Returns the toolchain's exit code for the main invocation; non-zero codes
/// are not turned into errors. Module precompile failures are.
pub fn build(
    root: &Path,
    model: &ZorkModel,
    opts: &BuildOptions,
    runner: &dyn ProcessRunner,
) -> Result<BuildOutcome, BuildError> {
    let start = Instant::now();

    let toolchain = select_toolchain(&model.compiler)?;
    let precompiler = if model.language.has_modules() {
        Some(ModulePrecompiler::new(
            toolchain.as_ref(),
            &model.language,
            &model.build.output_dir,
        )?)
    } else {
        None
    };

    let output_dir = ensure_output_dir(root, &model.build.output_dir)?;
    debug!("output directory: {}", output_dir.display());

    let modules_dir = match precompiler {
        Some(ref precompiler) => Some(precompiler.precompile(root, runner, opts.verbose)?),
        None => None,
    };

    let builder = CommandBuilder::new(toolchain.as_ref(), model);
    let command = builder.build(modules_dir.as_deref());
    let executable = builder.executable_path();

    info!(
        "Building `{}` with {} ({} source file(s))",
        model.executable.name,
        toolchain.compiler(),
        model.executable.sources.len()
    );
    if opts.verbose {
        info!("Command line executed: {}", command.display());
    } else {
        debug!("command line: {}", command.display());
    }

    let exit_code = match runner.run(&command) {
        InvocationResult::Ok { exit_code } => exit_code,
        InvocationResult::Failed { reason } => {
            return Err(BuildError::ToolchainInvocation {
                step: InvocationStep::BuildExecutable(model.executable.name.clone()),
                reason,
            });
        }
    };

    if exit_code == 0 {
        info!(
            "Finished `{}` -> {} in {:.2}s",
            model.executable.name,
            executable.display(),
            start.elapsed().as_secs_f64()
        );
    } else {
        debug!("compiler exited with code {}", exit_code);
    }

    let run_exit_code = if exit_code == 0 && (opts.run || model.executable.auto_execute) {
        Some(run_executable(root, &executable, runner)?)
    } else {
        None
    };

    Ok(BuildOutcome {
        exit_code,
        executable,
        run_exit_code,
    })
}

fn run_executable(
    root: &Path,
    executable: &Path,
    runner: &dyn ProcessRunner,
) -> Result<i32, BuildError> {
    let program = root.join(executable);
    info!("Running `{}`", executable.display());

    match runner.run(&CommandSpec::new(&program)) {
        InvocationResult::Ok { exit_code } => Ok(exit_code),
        InvocationResult::Failed { reason } => Err(BuildError::ToolchainInvocation {
            step: InvocationStep::RunExecutable(executable.to_path_buf()),
            reason,
        }),
    }
}
