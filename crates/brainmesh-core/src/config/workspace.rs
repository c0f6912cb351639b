//! Scratch workspace configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use validator::Validate;

/// Where per-job scratch directories are created.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct WorkspaceConfig {
    /// Root under which `<filename>` scratch directories are created.
    ///
    /// Defaults to `$HOME/.make3dbrain`.
    pub scratch_root: Option<PathBuf>,
    /// Name of the tool-log directory inside each scratch directory.
    #[validate(length(min = 1))]
    pub log_dir_name: String,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            scratch_root: None,
            log_dir_name: "logs".to_string(),
        }
    }
}

impl WorkspaceConfig {
    /// Resolve the effective scratch root directory.
    pub fn effective_scratch_root(&self) -> PathBuf {
        self.scratch_root.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join(".make3dbrain")
        })
    }
}
