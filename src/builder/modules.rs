//! C++20 module precompilation.
//!
//! Every module interface unit declared in `language.modules` is
//! precompiled into `{output_dir}/modules/{base_name}.pcm` before the main
//! compile-and-link step. Units are precompiled one at a time, in
//! declaration order; the first failure stops the pipeline.

use std::path::{Path, PathBuf, MAIN_SEPARATOR};

use serde::Serialize;
use tracing::{debug, info};

use crate::builder::errors::{BuildError, InvocationStep};
use crate::builder::provision::ensure_build_dir;
use crate::builder::toolchain::{CommandSpec, ModuleInput, Toolchain};
use crate::core::LanguageSpec;
use crate::util::process::ProcessRunner;

/// Minimum C++ standard with modules.
pub const MODULES_MIN_STANDARD: u32 = 20;

/// Name of the precompiled module directory under the output directory.
pub const MODULES_DIR_NAME: &str = "modules";

/// Reject module builds below C++20.
pub fn check_language_level(lang: &LanguageSpec) -> Result<(), BuildError> {
    if lang.has_modules() && lang.standard < MODULES_MIN_STANDARD {
        return Err(BuildError::LanguageLevelNotEnough {
            required: MODULES_MIN_STANDARD,
            actual: lang.standard,
            feature: "Modules".to_string(),
        });
    }
    Ok(())
}

/// Derive the artifact base name for a module unit.
///
/// A path with directories keeps only its last segment, cut at the first
/// `.`. A bare filename is returned unchanged, extension included.
pub fn module_base_name(module: &Path) -> String {
    let raw = module.to_string_lossy();
    let is_separator = |c: char| c == '/' || c == MAIN_SEPARATOR;

    if !raw.contains(is_separator) {
        return raw.into_owned();
    }

    let file_name = raw.rsplit(is_separator).next().unwrap_or_default();
    file_name.split('.').next().unwrap_or_default().to_string()
}

/// A precompiled module artifact derived from one module unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleArtifact {
    /// Module interface source
    pub source: PathBuf,
    /// File name without directories (and, for nested paths, without extension)
    pub base_name: String,
    /// Where the precompiled artifact is written
    pub pcm_path: PathBuf,
}

impl ModuleArtifact {
    pub fn new(source: &Path, modules_dir: &Path, extension: &str) -> Self {
        let base_name = module_base_name(source);
        let pcm_path = modules_dir.join(format!("{}.{}", base_name, extension));
        ModuleArtifact {
            source: source.to_path_buf(),
            base_name,
            pcm_path,
        }
    }
}

/// Precompiles the module units of a project.
pub struct ModulePrecompiler<'a> {
    toolchain: &'a dyn Toolchain,
    lang: &'a LanguageSpec,
    modules_dir: PathBuf,
}

impl<'a> ModulePrecompiler<'a> {
    /// Create a precompiler, validating the language level first.
    pub fn new(
        toolchain: &'a dyn Toolchain,
        lang: &'a LanguageSpec,
        output_dir: &Path,
    ) -> Result<Self, BuildError> {
        check_language_level(lang)?;

        Ok(ModulePrecompiler {
            toolchain,
            lang,
            modules_dir: output_dir.join(MODULES_DIR_NAME),
        })
    }

    /// Directory receiving the artifacts, relative to the project root.
    pub fn modules_dir(&self) -> &Path {
        &self.modules_dir
    }

    /// One artifact per module unit, in declaration order.
    pub fn artifacts(&self) -> Vec<ModuleArtifact> {
        let extension = self.toolchain.module_artifact_extension();
        self.lang
            .modules
            .iter()
            .map(|module| ModuleArtifact::new(module, &self.modules_dir, extension))
            .collect()
    }

    /// The precompile command for each artifact, without running anything.
    pub fn commands(&self) -> Vec<(ModuleArtifact, CommandSpec)> {
        self.artifacts()
            .into_iter()
            .map(|artifact| {
                let cmd = self.toolchain.precompile_module_command(
                    self.lang,
                    &ModuleInput {
                        source: artifact.source.clone(),
                        output: artifact.pcm_path.clone(),
                    },
                );
                (artifact, cmd)
            })
            .collect()
    }

    /// Precompile every module unit.
    ///
    /// Creates the modules directory under `root` if needed and returns its
    /// (root-relative) path for the prebuilt module search path.
    pub fn precompile(
        &self,
        root: &Path,
        runner: &dyn ProcessRunner,
        verbose: bool,
    ) -> Result<PathBuf, BuildError> {
        ensure_build_dir(root, &self.modules_dir)?;

        let commands = self.commands();
        info!("Precompiling {} module unit(s)", commands.len());

        for (artifact, cmd) in &commands {
            if verbose {
                info!("Command line executed: {}", cmd.display());
            } else {
                debug!(
                    "precompiling {} -> {}",
                    artifact.source.display(),
                    artifact.pcm_path.display()
                );
            }

            let result = runner.run(cmd);
            if !result.is_success() {
                return Err(BuildError::ToolchainInvocation {
                    step: InvocationStep::PrecompileModule(artifact.source.clone()),
                    reason: result.to_string(),
                });
            }
        }

        info!("Precompilation finished");
        Ok(self.modules_dir.clone())
    }
}
