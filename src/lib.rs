pub mod config;
pub mod domain;
pub mod error;
pub mod git_ops;
pub mod versioning;

pub use error::{MultimodError, Result};
pub use versioning::{ModuleSetRelease, ModuleVersioning, VersionConfig};
