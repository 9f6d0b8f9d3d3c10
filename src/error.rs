use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for multimod operations
#[derive(Error, Debug)]
pub enum MultimodError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Versioning file parse error: {0}")]
    Parse(String),

    #[error("Invalid go.mod file {}: {message}", .path.display())]
    ModFile { path: PathBuf, message: String },

    #[error("Module {module} is listed in module sets '{first_set}' and '{second_set}'")]
    DuplicateModule {
        module: String,
        first_set: String,
        second_set: String,
    },

    #[error("Module {module} in module set '{mod_set}' is also listed as excluded")]
    ModuleExcluded { module: String, mod_set: String },

    #[error("Module {0} not found in module path map")]
    ModuleNotFound(String),

    #[error("Module {module} is declared by more than one go.mod: {} and {}", .first.display(), .second.display())]
    AmbiguousModule {
        module: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("Module set '{0}' not found")]
    ModuleSetNotFound(String),

    #[error("Not a valid go.mod path: {}", .0.display())]
    InvalidModFilePath(PathBuf),

    #[error("Module file path {} is not rooted under {}", .path.display(), .repo_root.display())]
    NotUnderRepoRoot { path: PathBuf, repo_root: PathBuf },

    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in multimod
pub type Result<T> = std::result::Result<T, MultimodError>;

impl MultimodError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        MultimodError::Config(msg.into())
    }

    /// Create a versioning file parse error with context
    pub fn parse(msg: impl Into<String>) -> Self {
        MultimodError::Parse(msg.into())
    }

    /// Create a go.mod parse error for the given file
    pub fn mod_file(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        MultimodError::ModFile {
            path: path.into(),
            message: msg.into(),
        }
    }

    /// Create a lookup failure for a module missing from a path map
    pub fn module_not_found(module: impl Into<String>) -> Self {
        MultimodError::ModuleNotFound(module.into())
    }
}
