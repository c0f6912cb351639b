//! Application configuration schemas.
//!
//! Configuration is layered through the `config` crate: built-in defaults,
//! then an optional TOML file, then `MAKE3DBRAIN__*` environment variables.
//! Each sub-module represents a logical configuration section.

pub mod logging;
pub mod notification;
pub mod pipeline;
pub mod tools;
pub mod workspace;

use std::path::Path;

use serde::{Deserialize, Serialize};
use validator::Validate;

use self::logging::LoggingConfig;
use self::notification::NotificationConfig;
use self::pipeline::PipelineConfig;
use self::tools::ToolsConfig;
use self::workspace::WorkspaceConfig;

use crate::error::AppError;

/// Prefix of environment variables that override configuration values.
pub const ENV_PREFIX: &str = "MAKE3DBRAIN";

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct AppConfig {
    /// External executables.
    #[validate(nested)]
    pub tools: ToolsConfig,
    /// Scratch directory layout.
    #[validate(nested)]
    pub workspace: WorkspaceConfig,
    /// Stage execution limits.
    #[validate(nested)]
    pub pipeline: PipelineConfig,
    /// Completion notice routing.
    #[validate(nested)]
    pub notification: NotificationConfig,
    /// Logging settings.
    #[validate(nested)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration.
    ///
    /// Merges the built-in defaults with the optional TOML file at `path`
    /// and environment variables such as
    /// `MAKE3DBRAIN__NOTIFICATION__ADMIN_EMAIL`.
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        Self::load_from(path, environment())
    }

    fn load_from(path: Option<&Path>, env: config::Environment) -> Result<Self, AppError> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            tracing::debug!(path = %path.display(), "Loading configuration file");
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let config = builder
            .add_source(env)
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: AppConfig = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        config.validate()?;
        Ok(config)
    }
}

/// Environment source. List-valued keys split on spaces, so
/// `MAKE3DBRAIN__TOOLS__RECON_ALL_FLAGS="-all -parallel"` yields two flags.
fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
        .list_separator(" ")
        .with_list_parse_key("tools.recon_all_flags")
}
