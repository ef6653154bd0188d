//! Build output directory provisioning.

use std::path::{Path, PathBuf};

use crate::builder::errors::BuildError;
use crate::util::fs::ensure_dir;

/// Ensure `dir` (relative to `root`) exists as a directory.
///
/// Returns `true` when the directory had to be created. Calling this on an
/// existing directory is a no-op.
pub fn ensure_build_dir(root: &Path, dir: &Path) -> Result<bool, BuildError> {
    let path = root.join(dir);
    let created = ensure_dir(&path).map_err(|source| BuildError::Filesystem {
        path: path.clone(),
        source,
    })?;

    if created {
        tracing::debug!("created directory {}", path.display());
    }
    Ok(created)
}

/// Ensure the build output directory exists before any compiler runs.
pub fn ensure_output_dir(root: &Path, output_dir: &Path) -> Result<PathBuf, BuildError> {
    ensure_build_dir(root, output_dir)?;
    Ok(root.join(output_dir))
}
