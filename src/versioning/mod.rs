//! Module versioning: the validated view of a versioning file against a repository
//!
//! [`ModuleVersioning`] combines three maps built once from a versioning file and a
//! repository root:
//!
//! - module set name -> module set
//! - module path -> go.mod location
//! - module path -> owning set and version
//!
//! It is an immutable snapshot; build a new one to pick up changes.

pub mod config;
pub mod path_map;
pub mod release;

pub use config::VersionConfig;
pub use path_map::{parse_module_directive, read_module_path};
pub use release::ModuleSetRelease;

use crate::domain::{ModuleInfo, ModuleInfoMap, ModulePath, ModulePathMap, ModuleSet, ModuleSetMap};
use crate::error::{MultimodError, Result};
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, PartialEq)]
pub struct ModuleVersioning {
    mod_set_map: ModuleSetMap,
    mod_path_map: ModulePathMap,
    mod_info_map: ModuleInfoMap,
}

impl ModuleVersioning {
    /// Load `versioning_file` and resolve its modules below `repo_root`.
    pub fn new(versioning_file: impl AsRef<Path>, repo_root: impl AsRef<Path>) -> Result<Self> {
        let config = VersionConfig::load(versioning_file)?;
        Self::from_config(&config, repo_root)
    }

    pub fn from_config(config: &VersionConfig, repo_root: impl AsRef<Path>) -> Result<Self> {
        let mod_info_map = config.build_module_map()?;
        let mod_path_map = config.build_module_path_map(repo_root)?;

        info!(
            module_sets = config.module_sets.len(),
            modules = mod_info_map.len(),
            "loaded module versioning"
        );

        Ok(ModuleVersioning {
            mod_set_map: config.module_sets.clone(),
            mod_path_map,
            mod_info_map,
        })
    }

    /// Build from already-resolved maps, validating set membership against `excluded`.
    pub fn from_parts(
        mod_set_map: ModuleSetMap,
        mod_path_map: ModulePathMap,
        excluded: Vec<ModulePath>,
    ) -> Result<Self> {
        let config = VersionConfig::new(mod_set_map, excluded);
        let mod_info_map = config.build_module_map()?;

        Ok(ModuleVersioning {
            mod_set_map: config.module_sets,
            mod_path_map,
            mod_info_map,
        })
    }

    pub fn mod_set_map(&self) -> &ModuleSetMap {
        &self.mod_set_map
    }

    pub fn mod_path_map(&self) -> &ModulePathMap {
        &self.mod_path_map
    }

    pub fn mod_info_map(&self) -> &ModuleInfoMap {
        &self.mod_info_map
    }

    /// Look up a module set by exact name
    pub fn get_module_set(&self, mod_set_name: &str) -> Result<ModuleSet> {
        self.mod_set_map
            .get(mod_set_name)
            .cloned()
            .ok_or_else(|| MultimodError::ModuleSetNotFound(mod_set_name.to_string()))
    }

    /// Owning set and version of a module, if it is versioned
    pub fn module_info(&self, mod_path: &ModulePath) -> Option<&ModuleInfo> {
        self.mod_info_map.get(mod_path)
    }

    pub fn module_set_names(&self) -> impl Iterator<Item = &str> {
        self.mod_set_map.keys().map(String::as_str)
    }
}
