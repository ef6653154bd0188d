//! High-level operations.
//!
//! This module contains the implementation of Zork commands.

pub mod zork_build;
pub mod zork_new;

pub use zork_build::{build, plan, BuildOptions, BuildOutcome};
pub use zork_new::{new_project, NewOptions};
