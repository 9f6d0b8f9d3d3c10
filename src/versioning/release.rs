use crate::domain::{
    combine_module_tag_names_and_version, is_stable_version, module_paths_to_tag_names,
    ModulePath, ModuleSet, ModuleTagName,
};
use crate::error::Result;
use crate::versioning::ModuleVersioning;
use std::path::Path;

/// One module set selected for release, with the tag names of its modules resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleSetRelease {
    versioning: ModuleVersioning,
    mod_set_name: String,
    mod_set: ModuleSet,
    tag_names: Vec<ModuleTagName>,
}

impl ModuleSetRelease {
    /// Load the versioning file and prepare the release of `mod_set_name`.
    pub fn new(
        versioning_file: impl AsRef<Path>,
        mod_set_name: &str,
        repo_root: impl AsRef<Path>,
    ) -> Result<Self> {
        let repo_root = repo_root.as_ref();
        let versioning = ModuleVersioning::new(versioning_file, repo_root)?;
        Self::from_versioning(versioning, mod_set_name, repo_root)
    }

    pub fn from_versioning(
        versioning: ModuleVersioning,
        mod_set_name: &str,
        repo_root: impl AsRef<Path>,
    ) -> Result<Self> {
        let mod_set = versioning.get_module_set(mod_set_name)?;
        let tag_names =
            module_paths_to_tag_names(&mod_set.modules, versioning.mod_path_map(), repo_root)?;

        Ok(ModuleSetRelease {
            versioning,
            mod_set_name: mod_set_name.to_string(),
            mod_set,
            tag_names,
        })
    }

    pub fn versioning(&self) -> &ModuleVersioning {
        &self.versioning
    }

    pub fn mod_set_name(&self) -> &str {
        &self.mod_set_name
    }

    pub fn mod_set_version(&self) -> &str {
        &self.mod_set.version
    }

    pub fn mod_set_paths(&self) -> &[ModulePath] {
        &self.mod_set.modules
    }

    /// Tag names in the same order as [`ModuleSetRelease::mod_set_paths`]
    pub fn tag_names(&self) -> &[ModuleTagName] {
        &self.tag_names
    }

    /// Full tags to create for this release, e.g. "sdk/metric/v1.2.0"
    pub fn module_full_tag_names(&self) -> Vec<String> {
        combine_module_tag_names_and_version(&self.tag_names, &self.mod_set.version)
    }

    pub fn is_stable(&self) -> bool {
        is_stable_version(&self.mod_set.version)
    }
}
