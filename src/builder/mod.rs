//! C++ build driver.
//!
//! This module turns a [`ZorkModel`](crate::core::ZorkModel) into toolchain
//! invocations: output directory provisioning, module precompilation, and
//! the final compile-and-link command.

pub mod command;
pub mod errors;
pub mod modules;
pub mod plan;
pub mod provision;
pub mod toolchain;

pub use command::CommandBuilder;
pub use errors::{BuildError, InvocationStep};
pub use modules::{ModuleArtifact, ModulePrecompiler};
pub use plan::BuildPlan;
pub use provision::ensure_output_dir;
pub use toolchain::{select_toolchain, ClangToolchain, CommandSpec, Toolchain};
