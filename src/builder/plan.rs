//! Build plan: every command a build would run, computed without side effects.
//!
//! `zork build --plan` prints this as JSON.

use std::path::PathBuf;

use serde::Serialize;

use crate::builder::command::CommandBuilder;
use crate::builder::errors::BuildError;
use crate::builder::modules::{ModuleArtifact, ModulePrecompiler};
use crate::builder::toolchain::{select_toolchain, CommandSpec};
use crate::core::ZorkModel;

/// A module precompile step.
#[derive(Debug, Clone, Serialize)]
pub struct ModuleStep {
    #[serde(flatten)]
    pub artifact: ModuleArtifact,
    pub command: CommandSpec,
}

/// The full, ordered set of toolchain invocations for a build.
#[derive(Debug, Clone, Serialize)]
pub struct BuildPlan {
    /// Selected compiler identifier
    pub compiler: String,
    /// Output directory, relative to the project root
    pub output_dir: PathBuf,
    /// Precompiled module directory, when the project has modules
    pub modules_dir: Option<PathBuf>,
    /// Module precompile steps, in execution order
    pub modules: Vec<ModuleStep>,
    /// Final compile-and-link command
    pub main_command: CommandSpec,
    /// Executable produced by `main_command`
    pub executable: PathBuf,
}

impl BuildPlan {
    /// Compute the plan. Fails with the same configuration errors a build would.
    pub fn new(model: &ZorkModel) -> Result<Self, BuildError> {
        let toolchain = select_toolchain(&model.compiler)?;

        let (modules_dir, modules) = if model.language.has_modules() {
            let precompiler = ModulePrecompiler::new(
                toolchain.as_ref(),
                &model.language,
                &model.build.output_dir,
            )?;
            let steps = precompiler
                .commands()
                .into_iter()
                .map(|(artifact, command)| ModuleStep { artifact, command })
                .collect();
            (Some(precompiler.modules_dir().to_path_buf()), steps)
        } else {
            (None, Vec::new())
        };

        let builder = CommandBuilder::new(toolchain.as_ref(), model);

        Ok(BuildPlan {
            compiler: toolchain.compiler().to_string(),
            output_dir: model.build.output_dir.clone(),
            main_command: builder.build(modules_dir.as_deref()),
            executable: builder.executable_path(),
            modules_dir,
            modules,
        })
    }

    /// Total number of toolchain invocations.
    pub fn invocation_count(&self) -> usize {
        self.modules.len() + 1
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
