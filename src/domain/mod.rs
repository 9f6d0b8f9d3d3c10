//! Domain logic - pure rules over module sets, tag names and versions

pub mod module;
pub mod tag;
pub mod version;

pub use module::{
    module_paths_to_file_paths, ModuleFilePath, ModuleInfo, ModuleInfoMap, ModulePath,
    ModulePathMap, ModuleSet, ModuleSetMap,
};
pub use tag::{
    combine_module_tag_names_and_version, module_file_path_to_tag_name,
    module_file_paths_to_tag_names, module_paths_to_tag_names, ModuleTagName, MOD_FILE_NAME,
    REPO_ROOT_TAG,
};
pub use version::{is_stable_version, is_valid_version, parse_version};
