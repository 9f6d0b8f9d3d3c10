use crate::error::{MultimodError, Result};
use git2::Repository;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Finds the working directory of the git repository containing `start`.
///
/// Searches `start` and its parent directories, like `git rev-parse --show-toplevel`.
///
/// # Returns
/// * `Ok(PathBuf)` - Top-level directory of the repository
/// * `Err` - If `start` is not inside a repository, or the repository is bare
pub fn find_repo_root(start: impl AsRef<Path>) -> Result<PathBuf> {
    let repo = Repository::discover(start.as_ref())?;
    let workdir = repo
        .workdir()
        .ok_or_else(|| MultimodError::config("bare repository has no working directory"))?;

    // git2 reports the workdir with a trailing separator
    let root: PathBuf = workdir.components().collect();
    debug!(repo_root = %root.display(), "discovered repository root");
    Ok(root)
}
