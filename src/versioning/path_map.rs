//! Resolving module paths to go.mod files on disk

use crate::domain::{ModuleFilePath, ModulePath, ModulePathMap, MOD_FILE_NAME};
use crate::error::{MultimodError, Result};
use crate::versioning::config::VersionConfig;
use regex::Regex;
use std::collections::hash_map::Entry;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// Extract the module path from the `module` directive of go.mod contents.
///
/// Accepts quoted and unquoted paths and ignores trailing comments. The path must
/// be on the same line as the keyword; a bare `module` or the block form
/// `module (` is not a directive.
pub fn parse_module_directive(contents: &str) -> Option<ModulePath> {
    Regex::new(r#"(?m)^[ \t]*module[ \t]+"?([^"\s(]+)"?"#)
        .ok()
        .and_then(|re| re.captures(contents))
        .and_then(|captures| captures.get(1))
        .map(|m| ModulePath::new(m.as_str()))
}

/// Read the module path a go.mod file declares for itself
pub fn read_module_path(mod_file: &Path) -> Result<ModulePath> {
    let contents = fs::read_to_string(mod_file)?;
    parse_module_directive(&contents)
        .ok_or_else(|| MultimodError::mod_file(mod_file, "missing module directive"))
}

fn is_hidden_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .map_or(false, |name| name.starts_with('.'))
}

impl VersionConfig {
    /// Map every non-excluded module found below `repo_root` to its go.mod.
    ///
    /// Hidden directories are skipped, and directories that cannot be read are
    /// skipped with a warning. Paths in the result are `repo_root` joined with the
    /// file's location inside it. Fails if the set memberships are invalid (see
    /// [`VersionConfig::build_module_map`]), if `repo_root` itself cannot be read,
    /// if two files declare the same module, or if a module listed in any set has
    /// no go.mod.
    pub fn build_module_path_map(&self, repo_root: impl AsRef<Path>) -> Result<ModulePathMap> {
        let repo_root = repo_root.as_ref();
        self.build_module_map()?;
        let mut mod_path_map = ModulePathMap::new();

        let walker = WalkDir::new(repo_root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_hidden_dir(entry));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) if err.depth() > 0 => {
                    warn!(error = %err, "skipping unreadable path");
                    continue;
                }
                Err(err) => return Err(err.into()),
            };
            if !entry.file_type().is_file() || entry.file_name() != MOD_FILE_NAME {
                continue;
            }

            let mod_path = read_module_path(entry.path())?;
            if self.should_exclude_module(&mod_path) {
                debug!(module = %mod_path, "skipping excluded module");
                continue;
            }

            let file_path = entry.into_path();
            debug!(module = %mod_path, path = %file_path.display(), "found module");
            match mod_path_map.entry(mod_path) {
                Entry::Occupied(existing) => {
                    return Err(MultimodError::AmbiguousModule {
                        module: existing.key().to_string(),
                        first: existing.get().as_path().to_path_buf(),
                        second: file_path,
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(ModuleFilePath::new(file_path));
                }
            }
        }

        for mod_set in self.module_sets.values() {
            if let Some(missing) = mod_set
                .modules
                .iter()
                .find(|module| !mod_path_map.contains_key(*module))
            {
                return Err(MultimodError::module_not_found(missing.as_str()));
            }
        }

        Ok(mod_path_map)
    }
}
