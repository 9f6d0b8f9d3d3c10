use crate::domain::module::{module_paths_to_file_paths, ModuleFilePath, ModulePath, ModulePathMap};
use crate::error::{MultimodError, Result};
use std::fmt;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// File name every module declares itself in
pub const MOD_FILE_NAME: &str = "go.mod";

/// Display form of the tag name for a module whose go.mod sits at the repo root
pub const REPO_ROOT_TAG: &str = "repoRootTag";

/// Tag namespace of a module within the repository.
///
/// Modules below the repo root are tagged `<dir>/<version>`; the module at the
/// repo root is tagged with the bare version.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ModuleTagName {
    RepoRoot,
    /// Directory of the module relative to the repo root, '/' separated
    Path(String),
}

impl ModuleTagName {
    pub fn path(fragment: impl Into<String>) -> Self {
        ModuleTagName::Path(fragment.into())
    }

    pub fn is_repo_root(&self) -> bool {
        matches!(self, ModuleTagName::RepoRoot)
    }

    /// Full tag for this module at `version`
    pub fn with_version(&self, version: &str) -> String {
        match self {
            ModuleTagName::RepoRoot => version.to_string(),
            ModuleTagName::Path(fragment) => format!("{}/{}", fragment, version),
        }
    }
}

impl fmt::Display for ModuleTagName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModuleTagName::RepoRoot => f.write_str(REPO_ROOT_TAG),
            ModuleTagName::Path(fragment) => f.write_str(fragment),
        }
    }
}

// "./root/go.mod" and "root/go.mod" must agree
fn without_cur_dir(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

/// Derive the tag name of the module whose go.mod lives at `mod_file_path`.
///
/// # Errors
/// * `InvalidModFilePath` - the path does not name a go.mod file
/// * `NotUnderRepoRoot` - the path is not inside `repo_root`
pub fn module_file_path_to_tag_name(
    mod_file_path: &ModuleFilePath,
    repo_root: impl AsRef<Path>,
) -> Result<ModuleTagName> {
    let file_path = without_cur_dir(mod_file_path.as_path());
    if file_path.file_name().map_or(true, |name| name != MOD_FILE_NAME) {
        return Err(MultimodError::InvalidModFilePath(
            mod_file_path.as_path().to_path_buf(),
        ));
    }

    let not_under_root = || MultimodError::NotUnderRepoRoot {
        path: mod_file_path.as_path().to_path_buf(),
        repo_root: repo_root.as_ref().to_path_buf(),
    };

    let root = without_cur_dir(repo_root.as_ref());
    let relative = file_path.strip_prefix(&root).map_err(|_| not_under_root())?;
    let module_dir = relative.parent().unwrap_or_else(|| Path::new(""));

    let mut fragment = Vec::new();
    for component in module_dir.components() {
        match component {
            Component::Normal(part) => fragment.push(part.to_string_lossy().into_owned()),
            _ => return Err(not_under_root()),
        }
    }

    let tag_name = if fragment.is_empty() {
        ModuleTagName::RepoRoot
    } else {
        ModuleTagName::Path(fragment.join("/"))
    };
    debug!(path = %mod_file_path.as_path().display(), tag = %tag_name, "derived module tag name");
    Ok(tag_name)
}

/// Derive tag names for a sequence of go.mod paths.
///
/// All-or-nothing: the first invalid path fails the whole call.
pub fn module_file_paths_to_tag_names(
    mod_file_paths: &[ModuleFilePath],
    repo_root: impl AsRef<Path>,
) -> Result<Vec<ModuleTagName>> {
    let repo_root = repo_root.as_ref();
    mod_file_paths
        .iter()
        .map(|path| module_file_path_to_tag_name(path, repo_root))
        .collect()
}

/// Resolve modules to their go.mod paths, then derive their tag names.
pub fn module_paths_to_tag_names(
    mod_paths: &[ModulePath],
    mod_path_map: &ModulePathMap,
    repo_root: impl AsRef<Path>,
) -> Result<Vec<ModuleTagName>> {
    let file_paths = module_paths_to_file_paths(mod_paths, mod_path_map)?;
    module_file_paths_to_tag_names(&file_paths, repo_root)
}

/// Combine tag names with a version into full tag strings.
///
/// Example: `["a/b", RepoRoot]` with "v1.0.0" -> `["a/b/v1.0.0", "v1.0.0"]`
pub fn combine_module_tag_names_and_version(
    tag_names: &[ModuleTagName],
    version: &str,
) -> Vec<String> {
    tag_names
        .iter()
        .map(|tag_name| tag_name.with_version(version))
        .collect()
}
