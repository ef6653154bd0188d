//! Main compile-and-link command assembly.

use std::path::{Path, PathBuf};

use crate::builder::toolchain::{CommandSpec, ExecutableInput, Toolchain};
use crate::core::ZorkModel;

/// Assembles the single invocation that compiles and links the executable.
pub struct CommandBuilder<'a> {
    toolchain: &'a dyn Toolchain,
    model: &'a ZorkModel,
}

impl<'a> CommandBuilder<'a> {
    pub fn new(toolchain: &'a dyn Toolchain, model: &'a ZorkModel) -> Self {
        CommandBuilder { toolchain, model }
    }

    /// Path of the produced executable, relative to the project root.
    pub fn executable_path(&self) -> PathBuf {
        self.model.build.output_dir.join(&self.model.executable.name)
    }

    /// Build the argument sequence.
    ///
    /// Module flags are appended only when the project declares modules;
    /// `modules_dir` is the precompiled module directory to search.
    pub fn build(&self, modules_dir: Option<&Path>) -> CommandSpec {
        let lang = &self.model.language;

        let (module_sources, prebuilt_module_path) = if lang.has_modules() {
            (lang.modules.clone(), modules_dir.map(Path::to_path_buf))
        } else {
            (Vec::new(), None)
        };

        let input = ExecutableInput {
            output: self.executable_path(),
            sources: self.model.executable.sources.clone(),
            module_sources,
            prebuilt_module_path,
        };

        self.toolchain.executable_command(lang, &input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::toolchain::ClangToolchain;
    use crate::test_support::model_fixture;

    #[test]
    fn test_command_without_modules() {
        let clang = ClangToolchain::new(None);
        let model = model_fixture(&["a.cpp", "b.cpp"], &[], 20);

        let cmd = CommandBuilder::new(&clang, &model).build(None);

        assert_eq!(
            cmd.to_argv(),
            vec!["clang++", "--std=c++20", "-stdlib=libc++", "-o", "build/app", "a.cpp", "b.cpp"]
        );
    }

    #[test]
    fn test_command_with_modules() {
        let clang = ClangToolchain::new(None);
        let model = model_fixture(&["main.cpp", "util.cpp"], &["./src/math.cppm"], 20);

        let cmd = CommandBuilder::new(&clang, &model).build(Some(Path::new("build/modules")));

        assert_eq!(
            cmd.to_argv(),
            vec![
                "clang++",
                "--std=c++20",
                "-stdlib=libc++",
                "-o",
                "build/app",
                "main.cpp",
                "util.cpp",
                "./src/math.cppm",
                "-fmodules",
                "-fmodules-ts",
                "-fprebuilt-module-path=build/modules",
            ]
        );
    }

    #[test]
    fn test_duplicate_sources_preserved() {
        let clang = ClangToolchain::new(None);
        let model = model_fixture(&["a.cpp", "a.cpp"], &[], 17);

        let cmd = CommandBuilder::new(&clang, &model).build(None);

        assert_eq!(&cmd.args[4..], &["a.cpp".to_string(), "a.cpp".to_string()]);
        assert_eq!(cmd.args[0], "--std=c++17");
    }

    #[test]
    fn test_modules_dir_ignored_without_modules() {
        let clang = ClangToolchain::new(None);
        let model = model_fixture(&["main.cpp"], &[], 20);

        let cmd = CommandBuilder::new(&clang, &model).build(Some(Path::new("build/modules")));

        assert!(!cmd.args.iter().any(|a| a.starts_with("-fmodules")));
        assert!(!cmd.args.iter().any(|a| a.starts_with("-fprebuilt-module-path")));
    }

    #[test]
    fn test_executable_path() {
        let clang = ClangToolchain::new(None);
        let model = model_fixture(&["main.cpp"], &[], 20);

        assert_eq!(
            CommandBuilder::new(&clang, &model).executable_path(),
            PathBuf::from("build/app")
        );
    }
}
