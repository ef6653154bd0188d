//! Zork - a project-driven build runner for C++
//!
//! This crate reads a `zork.toml` project description, precompiles C++20
//! module interface units when the project declares them, and drives the
//! final compile-and-link invocation of the selected toolchain.

pub mod builder;
pub mod core;
pub mod ops;
pub mod util;

/// Test utilities for Zork unit tests.
///
/// Only available when compiling tests. Provides a process runner that
/// records commands instead of spawning them.
#[cfg(test)]
pub mod test_support;

pub use crate::builder::{BuildError, BuildPlan, Toolchain};
pub use crate::core::{CppCompiler, ZorkModel};
