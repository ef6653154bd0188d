//! Project model fixtures.

use std::path::PathBuf;

use crate::core::{
    BuildSpec, CompilerSettings, CppCompiler, ExecutableSpec, LanguageSpec, ZorkModel,
};

/// A Clang project producing `build/app` with the given inputs.
pub fn model_fixture(sources: &[&str], modules: &[&str], standard: u32) -> ZorkModel {
    ZorkModel {
        compiler: CompilerSettings {
            cpp_compiler: CppCompiler::Clang,
            driver_path: None,
        },
        language: LanguageSpec {
            standard,
            std_lib: "libc++".to_string(),
            modules: modules.iter().map(PathBuf::from).collect(),
        },
        build: BuildSpec {
            output_dir: PathBuf::from("build"),
        },
        executable: ExecutableSpec {
            name: "app".to_string(),
            sources: sources.iter().map(PathBuf::from).collect(),
            auto_execute: false,
        },
    }
}

/// Same as [`model_fixture`], with a different compiler.
pub fn model_with_compiler(compiler: CppCompiler, modules: &[&str], standard: u32) -> ZorkModel {
    let mut model = model_fixture(&["main.cpp"], modules, standard);
    model.compiler.cpp_compiler = compiler;
    model
}
