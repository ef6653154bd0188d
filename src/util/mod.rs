//! Shared utilities

pub mod diagnostic;
pub mod fs;
pub mod process;

pub use diagnostic::Diagnostic;
pub use process::{InvocationResult, ProcessBuilder, ProcessRunner, SystemRunner};
