//! Clang toolchain implementation.

use std::path::{Path, PathBuf};

use crate::core::{CppCompiler, LanguageSpec};

use super::{CommandSpec, ExecutableInput, ModuleInput, Toolchain};

/// Clang/LLVM toolchain with C++20 modules support.
#[derive(Debug, Clone)]
pub struct ClangToolchain {
    compiler: CppCompiler,
    /// Path to the C++ driver
    pub driver: PathBuf,
}

impl ClangToolchain {
    /// Create a Clang toolchain, using `clang++` unless a driver is given.
    pub fn new(driver: Option<PathBuf>) -> Self {
        let compiler = CppCompiler::Clang;
        let driver = driver.unwrap_or_else(|| PathBuf::from(compiler.default_driver()));
        ClangToolchain { compiler, driver }
    }

    fn language_flags(lang: &LanguageSpec) -> [String; 2] {
        [
            format!("--std=c++{}", lang.standard),
            format!("-stdlib={}", lang.std_lib),
        ]
    }
}

impl Toolchain for ClangToolchain {
    fn compiler(&self) -> &CppCompiler {
        &self.compiler
    }

    fn driver(&self) -> &Path {
        &self.driver
    }

    fn module_artifact_extension(&self) -> &str {
        "pcm"
    }

    fn precompile_module_command(&self, lang: &LanguageSpec, input: &ModuleInput) -> CommandSpec {
        CommandSpec::new(&self.driver)
            .args(Self::language_flags(lang))
            .arg("-fmodules")
            .arg("--precompile")
            .arg("-o")
            .arg(input.output.display().to_string())
            .arg(input.source.display().to_string())
    }

    fn executable_command(&self, lang: &LanguageSpec, input: &ExecutableInput) -> CommandSpec {
        let mut cmd = CommandSpec::new(&self.driver)
            .args(Self::language_flags(lang))
            .arg("-o")
            .arg(input.output.display().to_string());

        cmd = cmd.args(input.sources.iter().map(|s| s.display().to_string()));

        // Clang re-parses the interface units here, so the raw sources go in too
        if !input.module_sources.is_empty() {
            cmd = cmd.args(input.module_sources.iter().map(|m| m.display().to_string()));
            cmd = cmd.arg("-fmodules").arg("-fmodules-ts");
            if let Some(ref prebuilt) = input.prebuilt_module_path {
                cmd = cmd.arg(format!("-fprebuilt-module-path={}", prebuilt.display()));
            }
        }

        cmd
    }
}
