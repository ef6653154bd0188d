//! Core data structures for Zork.
//!
//! This module contains the typed project model read from `zork.toml`:
//! - Compiler selection
//! - Language, build, and executable settings
//! - Config file discovery and source pattern resolution

pub mod compiler;
pub mod config;

pub use compiler::CppCompiler;
pub use config::{
    find_config_file, project_root, BuildSpec, CompilerSettings, ExecutableSpec, LanguageSpec,
    ZorkConfigFile, ZorkModel, CONFIG_FILE_NAME,
};
