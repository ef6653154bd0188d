//! Implementation of `zork new`.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::core::config::{generate_config, CONFIG_FILE_NAME};
use crate::util::fs::write_string;

/// Options for creating a new project.
#[derive(Debug, Clone)]
pub struct NewOptions {
    /// Project and executable name
    pub name: String,

    /// Scaffold a module interface unit and target C++20
    pub modules: bool,
}

const MAIN_WITH_MODULES: &str = r#"import math;

#include <iostream>

int main() {
    std::cout << "2 + 3 = " << math::add(2, 3) << std::endl;
    return 0;
}
"#;

const MAIN_WITHOUT_MODULES: &str = r#"#include <iostream>

int main() {
    std::cout << "Hello from Zork!" << std::endl;
    return 0;
}
"#;

const MATH_MODULE: &str = r#"export module math;

export namespace math {
    int add(int a, int b) {
        return a + b;
    }
}
"#;

/// Create a new Zork project at `path`.
///
/// Fails if `path` is a file or a non-empty directory.
pub fn new_project(path: &Path, opts: &NewOptions) -> Result<()> {
    if opts.name.trim().is_empty() {
        bail!("project name must not be empty");
    }

    if path.is_file() {
        bail!("destination `{}` already exists and is a file", path.display());
    }

    if path.is_dir() {
        let mut entries = fs::read_dir(path)
            .with_context(|| format!("failed to read directory: {}", path.display()))?;
        if entries.next().is_some() {
            bail!(
                "destination `{}` already exists and is not empty",
                path.display()
            );
        }
    }

    write_string(
        &path.join(CONFIG_FILE_NAME),
        &generate_config(&opts.name, opts.modules),
    )?;

    let src_dir = path.join("src");
    if opts.modules {
        write_string(&src_dir.join("main.cpp"), MAIN_WITH_MODULES)?;
        write_string(&src_dir.join("math.cppm"), MATH_MODULE)?;
    } else {
        write_string(&src_dir.join("main.cpp"), MAIN_WITHOUT_MODULES)?;
    }

    tracing::debug!("created project `{}` at {}", opts.name, path.display());
    Ok(())
}
