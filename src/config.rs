use crate::error::{MultimodError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the tool configuration file
pub const CONFIG_FILE_NAME: &str = "multimod.toml";

/// Returns the default versioning file name.
fn default_versioning_file() -> PathBuf {
    PathBuf::from("versions.yaml")
}

/// Configuration for the multimod command line tool.
///
/// Points at the versioning file and, optionally, the repository root. Relative
/// paths are resolved against the repository root.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_versioning_file")]
    pub versioning_file: PathBuf,

    /// Repository root; discovered from the git repository when unset
    #[serde(default)]
    pub repo_root: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            versioning_file: default_versioning_file(),
            repo_root: None,
        }
    }
}

impl Config {
    /// Versioning file location, resolved against `repo_root` when relative
    pub fn versioning_file_in(&self, repo_root: &Path) -> PathBuf {
        if self.versioning_file.is_absolute() {
            self.versioning_file.clone()
        } else {
            repo_root.join(&self.versioning_file)
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `multimod.toml` in current directory
/// 3. `multimod.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let local = Path::new(".").join(CONFIG_FILE_NAME);

    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if local.exists() {
        fs::read_to_string(local)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    toml::from_str(&config_str).map_err(|e| MultimodError::config(e.to_string()))
}
