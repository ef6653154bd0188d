//! Command implementations

pub mod build;
pub mod new;
pub mod run;
pub mod toolchain;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use zork::core::{find_config_file, project_root, ZorkModel};

/// A loaded project: its root directory and resolved model.
pub struct Project {
    pub root: PathBuf,
    pub model: ZorkModel,
}

/// Load the project from `--config`, or by searching upward from the current directory.
pub fn load_project(config: Option<&Path>) -> Result<Project> {
    let config_path = match config {
        Some(path) => path.to_path_buf(),
        None => {
            let cwd = std::env::current_dir().context("failed to get current directory")?;
            find_config_file(&cwd)?
        }
    };

    let model = ZorkModel::load(&config_path)?;
    let root = project_root(&config_path);
    tracing::debug!("project root: {}", root.display());

    Ok(Project { root, model })
}
