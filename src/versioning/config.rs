//! Versioning file loading and module set validation

use crate::domain::{is_valid_version, ModuleInfo, ModuleInfoMap, ModulePath, ModuleSetMap};
use crate::error::{MultimodError, Result};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::Entry;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Contents of a versioning file.
///
/// ```yaml
/// module-sets:
///   stable-v1:
///     version: v1.0.0
///     modules:
///       - go.example.io/proj
/// excluded-modules:
///   - go.example.io/proj/internal/tools
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct VersionConfig {
    #[serde(default)]
    pub module_sets: ModuleSetMap,

    #[serde(default)]
    pub excluded_modules: Vec<ModulePath>,
}

impl VersionConfig {
    pub fn new(module_sets: ModuleSetMap, excluded_modules: Vec<ModulePath>) -> Self {
        VersionConfig {
            module_sets,
            excluded_modules,
        }
    }

    /// Reads a versioning file from disk.
    ///
    /// Files ending in `.toml` are parsed as TOML, anything else as YAML. Only
    /// syntax and structure are checked here; see [`VersionConfig::build_module_map`]
    /// for membership validation.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        debug!(path = %path.display(), "read versioning file");

        if path.extension().map_or(false, |ext| ext == "toml") {
            Self::from_toml_str(&contents)
        } else {
            Self::from_yaml_str(&contents)
        }
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        serde_yaml::from_str(contents).map_err(|e| MultimodError::parse(e.to_string()))
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| MultimodError::parse(e.to_string()))
    }

    /// Whether `mod_path` is opted out of versioning
    pub fn should_exclude_module(&self, mod_path: &ModulePath) -> bool {
        self.excluded_modules.contains(mod_path)
    }

    pub fn excluded_modules(&self) -> HashSet<ModulePath> {
        self.excluded_modules.iter().cloned().collect()
    }

    /// Returns the declared module sets once they pass validation.
    pub fn build_module_sets_map(&self) -> Result<ModuleSetMap> {
        self.build_module_map()?;
        Ok(self.module_sets.clone())
    }

    /// Builds the module -> (set, version) index.
    ///
    /// Sets are visited in name order and members in declaration order; the first
    /// module that is excluded or already claimed by a set fails the build.
    pub fn build_module_map(&self) -> Result<ModuleInfoMap> {
        let excluded = self.excluded_modules();
        let mut mod_map = ModuleInfoMap::new();

        for (set_name, mod_set) in &self.module_sets {
            if mod_set.modules.is_empty() {
                warn!(module_set = %set_name, "module set has no modules");
            }
            if !is_valid_version(&mod_set.version) {
                warn!(
                    module_set = %set_name,
                    version = %mod_set.version,
                    "module set version is not valid semver"
                );
            }

            for module in &mod_set.modules {
                if excluded.contains(module) {
                    return Err(MultimodError::ModuleExcluded {
                        module: module.to_string(),
                        mod_set: set_name.clone(),
                    });
                }

                match mod_map.entry(module.clone()) {
                    Entry::Occupied(existing) => {
                        return Err(MultimodError::DuplicateModule {
                            module: module.to_string(),
                            first_set: existing.get().module_set_name.clone(),
                            second_set: set_name.clone(),
                        });
                    }
                    Entry::Vacant(slot) => {
                        slot.insert(ModuleInfo {
                            module_set_name: set_name.clone(),
                            version: mod_set.version.clone(),
                        });
                    }
                }
            }
        }

        Ok(mod_map)
    }
}
