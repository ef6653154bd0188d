//! Compiler selection.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The C++ compiler selected in the `[compiler]` section.
///
/// Unknown identifiers are kept verbatim in `Other` so they can be
/// reported back exactly as the user wrote them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CppCompiler {
    /// Clang/LLVM
    Clang,
    /// GCC (GNU Compiler Collection)
    Gcc,
    /// Any other identifier
    Other(String),
}

impl CppCompiler {
    /// Get the compiler identifier as a string.
    pub fn as_str(&self) -> &str {
        match self {
            CppCompiler::Clang => "clang",
            CppCompiler::Gcc => "gcc",
            CppCompiler::Other(name) => name,
        }
    }

    /// Get the C++ driver binary name used when no explicit path is configured.
    pub fn default_driver(&self) -> &str {
        match self {
            CppCompiler::Clang => "clang++",
            CppCompiler::Gcc => "g++",
            CppCompiler::Other(name) => name,
        }
    }
}

impl From<&str> for CppCompiler {
    fn from(s: &str) -> Self {
        let trimmed = s.trim();
        match trimmed.to_lowercase().as_str() {
            "clang" | "clang++" => CppCompiler::Clang,
            "gcc" | "g++" => CppCompiler::Gcc,
            _ => CppCompiler::Other(trimmed.to_string()),
        }
    }
}

impl From<String> for CppCompiler {
    fn from(s: String) -> Self {
        CppCompiler::from(s.as_str())
    }
}

impl From<CppCompiler> for String {
    fn from(compiler: CppCompiler) -> Self {
        compiler.as_str().to_string()
    }
}

impl fmt::Display for CppCompiler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
