//! `zork.toml` parsing and the typed project model.
//!
//! The config file is deserialized into [`ZorkConfigFile`] and then resolved
//! against the project root into a [`ZorkModel`], which is what the build
//! consumes. Resolution expands glob patterns in `sources` and `modules`.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::compiler::CppCompiler;
use crate::util::diagnostic::suggestions;
use crate::util::fs::{glob_relative, read_to_string};

/// Name of the project configuration file.
pub const CONFIG_FILE_NAME: &str = "zork.toml";

/// The raw `zork.toml` contents.
#[derive(Debug, Clone, Deserialize)]
pub struct ZorkConfigFile {
    pub compiler: CompilerSection,
    pub language: LanguageSection,
    #[serde(default)]
    pub build: BuildSection,
    pub executable: ExecutableSection,
}

/// `[compiler]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct CompilerSection {
    pub cpp_compiler: CppCompiler,

    /// Explicit driver binary, overriding the compiler's default driver
    #[serde(default)]
    pub driver_path: Option<PathBuf>,
}

/// `[language]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct LanguageSection {
    pub cpp_standard: u32,

    #[serde(default = "default_std_lib")]
    pub std_lib: String,

    /// Module interface units, as paths or glob patterns
    #[serde(default)]
    pub modules: Vec<String>,
}

/// `[build]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct BuildSection {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl Default for BuildSection {
    fn default() -> Self {
        BuildSection {
            output_dir: default_output_dir(),
        }
    }
}

/// `[executable]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ExecutableSection {
    pub executable_name: String,

    /// Translation units, as paths or glob patterns
    #[serde(default)]
    pub sources: Vec<String>,

    #[serde(default)]
    pub auto_execute: bool,
}

fn default_std_lib() -> String {
    "libc++".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("build")
}

/// Compiler choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompilerSettings {
    pub cpp_compiler: CppCompiler,
    pub driver_path: Option<PathBuf>,
}

/// Language level, standard library, and module units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageSpec {
    /// C++ standard as a number (17, 20, 23...)
    pub standard: u32,
    /// Standard library implementation (e.g. "libc++")
    pub std_lib: String,
    /// Module interface unit sources, in declaration order
    pub modules: Vec<PathBuf>,
}

impl LanguageSpec {
    /// Check whether the project declares any module units.
    pub fn has_modules(&self) -> bool {
        !self.modules.is_empty()
    }
}

/// Build output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildSpec {
    /// Output directory, relative to the project root
    pub output_dir: PathBuf,
}

/// The executable to produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutableSpec {
    pub name: String,
    /// Source files in order; duplicates are kept
    pub sources: Vec<PathBuf>,
    /// Run the executable after a successful build
    pub auto_execute: bool,
}

/// The resolved project model consumed by the build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZorkModel {
    pub compiler: CompilerSettings,
    pub language: LanguageSpec,
    pub build: BuildSpec,
    pub executable: ExecutableSpec,
}

impl ZorkModel {
    /// Load and resolve a `zork.toml` file.
    ///
    /// Patterns are resolved against the directory containing the file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = read_to_string(path)?;
        let file: ZorkConfigFile = toml::from_str(&contents)
            .with_context(|| format!("failed to parse {}", path.display()))?;

        Self::from_config(file, &project_root(path))
    }

    /// Resolve a parsed config file against a project root.
    pub fn from_config(file: ZorkConfigFile, root: &Path) -> Result<Self> {
        if file.executable.executable_name.trim().is_empty() {
            bail!("`executable.executable_name` must not be empty");
        }

        let modules = resolve_entries(root, &file.language.modules)
            .context("failed to resolve `language.modules`")?;
        let sources = resolve_entries(root, &file.executable.sources)
            .context("failed to resolve `executable.sources`")?;

        Ok(ZorkModel {
            compiler: CompilerSettings {
                cpp_compiler: file.compiler.cpp_compiler,
                driver_path: file.compiler.driver_path,
            },
            language: LanguageSpec {
                standard: file.language.cpp_standard,
                std_lib: file.language.std_lib,
                modules,
            },
            build: BuildSpec {
                output_dir: file.build.output_dir,
            },
            executable: ExecutableSpec {
                name: file.executable.executable_name,
                sources,
                auto_execute: file.executable.auto_execute,
            },
        })
    }
}

/// Resolve source or module entries into paths.
///
/// Entries with a `/` are made explicitly relative (`./`), entries with a
/// `*` are expanded as globs under `root`. Order is preserved.
pub fn resolve_entries(root: &Path, entries: &[String]) -> Result<Vec<PathBuf>> {
    let mut resolved = Vec::new();

    for entry in entries {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }
        let entry = relativize_entry(entry);

        if entry.contains('*') {
            let matches = glob_relative(root, &entry)?;
            if matches.is_empty() {
                tracing::warn!("pattern `{}` did not match any file", entry);
            }
            resolved.extend(
                matches
                    .iter()
                    .map(|m| PathBuf::from(relativize_entry(&m.to_string_lossy()))),
            );
        } else {
            resolved.push(PathBuf::from(entry));
        }
    }

    Ok(resolved)
}

fn relativize_entry(entry: &str) -> String {
    if entry.contains('/') && !entry.starts_with("./") && !Path::new(entry).is_absolute() {
        format!("./{}", entry)
    } else {
        entry.to_string()
    }
}

/// The project root for a config file: the directory containing it.
///
/// A bare file name (`zork.toml`) has an empty parent, which maps to `.`.
pub fn project_root(config_path: &Path) -> PathBuf {
    config_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Find `zork.toml` in `start` or any of its ancestors.
pub fn find_config_file(start: &Path) -> Result<PathBuf> {
    for dir in start.ancestors() {
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Ok(candidate);
        }
    }

    bail!(
        "could not find `{}` in `{}` or any parent directory\n\nhelp: {}",
        CONFIG_FILE_NAME,
        start.display(),
        suggestions::NO_CONFIG
    )
}

/// Generate a `zork.toml` for a new project.
pub fn generate_config(name: &str, with_modules: bool) -> String {
    let (standard, modules) = if with_modules {
        (20, r#"["src/math.cppm"]"#)
    } else {
        (17, "[]")
    };

    format!(
        r#"[compiler]
cpp_compiler = "clang"

[language]
cpp_standard = {standard}
std_lib = "libc++"
modules = {modules}

[build]
output_dir = "build"

[executable]
executable_name = "{name}"
sources = ["src/*.cpp"]
auto_execute = false
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const FULL_CONFIG: &str = r#"
[compiler]
cpp_compiler = "clang"

[language]
cpp_standard = 20
std_lib = "libc++"
modules = ["src/inner/foo.cppm", "bar.cppm"]

[build]
output_dir = "out"

[executable]
executable_name = "calc"
sources = ["main.cpp", "lib/util.cpp", "main.cpp"]
auto_execute = true
"#;

    #[test]
    fn test_load_full_config() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, FULL_CONFIG).unwrap();

        let model = ZorkModel::load(&path).unwrap();

        assert_eq!(model.compiler.cpp_compiler, CppCompiler::Clang);
        assert_eq!(model.compiler.driver_path, None);
        assert_eq!(model.language.standard, 20);
        assert_eq!(model.language.std_lib, "libc++");
        assert_eq!(
            model.language.modules,
            vec![PathBuf::from("./src/inner/foo.cppm"), PathBuf::from("bar.cppm")]
        );
        assert_eq!(model.build.output_dir, PathBuf::from("out"));
        assert_eq!(model.executable.name, "calc");
        assert_eq!(
            model.executable.sources,
            vec![
                PathBuf::from("main.cpp"),
                PathBuf::from("./lib/util.cpp"),
                PathBuf::from("main.cpp"),
            ]
        );
        assert!(model.executable.auto_execute);
    }

    #[test]
    fn test_defaults() {
        let content = r#"
[compiler]
cpp_compiler = "clang++"

[language]
cpp_standard = 17

[executable]
executable_name = "app"
sources = ["main.cpp"]
"#;
        let file: ZorkConfigFile = toml::from_str(content).unwrap();
        let model = ZorkModel::from_config(file, Path::new(".")).unwrap();

        assert_eq!(model.language.std_lib, "libc++");
        assert!(model.language.modules.is_empty());
        assert!(!model.language.has_modules());
        assert_eq!(model.build.output_dir, PathBuf::from("build"));
        assert!(!model.executable.auto_execute);
    }

    #[test]
    fn test_unknown_compiler_is_preserved() {
        let content = r#"
[compiler]
cpp_compiler = "msvc"

[language]
cpp_standard = 20

[executable]
executable_name = "app"
"#;
        let file: ZorkConfigFile = toml::from_str(content).unwrap();
        assert_eq!(
            file.compiler.cpp_compiler,
            CppCompiler::Other("msvc".to_string())
        );
    }

    #[test]
    fn test_empty_executable_name_rejected() {
        let content = r#"
[compiler]
cpp_compiler = "clang"

[language]
cpp_standard = 20

[executable]
executable_name = "  "
"#;
        let file: ZorkConfigFile = toml::from_str(content).unwrap();
        let err = ZorkModel::from_config(file, Path::new(".")).unwrap_err();
        assert!(err.to_string().contains("executable_name"));
    }

    #[test]
    fn test_resolve_glob_entries() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("b.cpp"), "").unwrap();
        fs::write(src.join("a.cpp"), "").unwrap();
        fs::write(src.join("notes.txt"), "").unwrap();

        let resolved = resolve_entries(
            tmp.path(),
            &["main.cpp".to_string(), "src/*.cpp".to_string()],
        )
        .unwrap();

        assert_eq!(
            resolved,
            vec![
                PathBuf::from("main.cpp"),
                PathBuf::from("./src/a.cpp"),
                PathBuf::from("./src/b.cpp"),
            ]
        );
    }

    #[test]
    fn test_resolve_trims_and_skips_blank_entries() {
        let resolved = resolve_entries(
            Path::new("."),
            &[" main.cpp ".to_string(), "".to_string(), "./x/y.cpp".to_string()],
        )
        .unwrap();

        assert_eq!(
            resolved,
            vec![PathBuf::from("main.cpp"), PathBuf::from("./x/y.cpp")]
        );
    }

    #[test]
    fn test_find_config_file_in_ancestor() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE_NAME), FULL_CONFIG).unwrap();
        let nested = tmp.path().join("src").join("inner");
        fs::create_dir_all(&nested).unwrap();

        let found = find_config_file(&nested).unwrap();
        assert_eq!(found, tmp.path().join(CONFIG_FILE_NAME));
    }

    #[test]
    fn test_find_config_file_missing() {
        let tmp = TempDir::new().unwrap();
        let err = find_config_file(tmp.path()).unwrap_err();
        assert!(err.to_string().contains("could not find `zork.toml`"));
        assert!(err.to_string().contains("help: Run `zork new <name>`"));
    }

    #[test]
    fn test_project_root_of_bare_file_name() {
        assert_eq!(project_root(Path::new("zork.toml")), PathBuf::from("."));
        assert_eq!(
            project_root(Path::new("demo/zork.toml")),
            PathBuf::from("demo")
        );
        assert_eq!(
            project_root(Path::new("/work/demo/zork.toml")),
            PathBuf::from("/work/demo")
        );
    }

    #[test]
    fn test_generated_config_parses() {
        let file: ZorkConfigFile = toml::from_str(&generate_config("demo", true)).unwrap();
        assert_eq!(file.executable.executable_name, "demo");
        assert_eq!(file.language.cpp_standard, 20);
        assert_eq!(file.language.modules, vec!["src/math.cppm".to_string()]);

        let file: ZorkConfigFile = toml::from_str(&generate_config("demo", false)).unwrap();
        assert_eq!(file.language.cpp_standard, 17);
        assert!(file.language.modules.is_empty());
    }
}
