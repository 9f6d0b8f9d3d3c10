use crate::error::{MultimodError, Result};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::{Path, PathBuf};

/// Identifier a module declares for itself (e.g. "go.opentelemetry.io/otel/trace")
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModulePath(String);

impl ModulePath {
    /// Create a module path from any string-like value
    pub fn new(path: impl Into<String>) -> Self {
        ModulePath(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModulePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ModulePath {
    fn from(path: &str) -> Self {
        ModulePath::new(path)
    }
}

impl From<String> for ModulePath {
    fn from(path: String) -> Self {
        ModulePath(path)
    }
}

impl Borrow<str> for ModulePath {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Location of a module's go.mod file
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModuleFilePath(PathBuf);

impl ModuleFilePath {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ModuleFilePath(path.into())
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

impl From<&str> for ModuleFilePath {
    fn from(path: &str) -> Self {
        ModuleFilePath::new(path)
    }
}

impl From<PathBuf> for ModuleFilePath {
    fn from(path: PathBuf) -> Self {
        ModuleFilePath(path)
    }
}

impl AsRef<Path> for ModuleFilePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

/// A named group of modules released together under a single version.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleSet {
    pub version: String,

    #[serde(default)]
    pub modules: Vec<ModulePath>,
}

impl ModuleSet {
    pub fn new(version: impl Into<String>, modules: Vec<ModulePath>) -> Self {
        ModuleSet {
            version: version.into(),
            modules,
        }
    }
}

/// Which module set a module belongs to, and the version that set carries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleInfo {
    pub module_set_name: String,
    pub version: String,
}

/// Module set name -> module set, ordered by name
pub type ModuleSetMap = BTreeMap<String, ModuleSet>;

/// Module path -> owning set and version
pub type ModuleInfoMap = HashMap<ModulePath, ModuleInfo>;

/// Module path -> go.mod location
pub type ModulePathMap = HashMap<ModulePath, ModuleFilePath>;

/// Looks up the go.mod location of every module in `mod_paths`, in order.
///
/// Fails on the first module missing from `mod_path_map`; no partial result is returned.
pub fn module_paths_to_file_paths(
    mod_paths: &[ModulePath],
    mod_path_map: &ModulePathMap,
) -> Result<Vec<ModuleFilePath>> {
    mod_paths
        .iter()
        .map(|mod_path| {
            mod_path_map
                .get(mod_path)
                .cloned()
                .ok_or_else(|| MultimodError::module_not_found(mod_path.as_str()))
        })
        .collect()
}
