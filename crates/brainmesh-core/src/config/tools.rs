//! External tool configuration.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Names or paths of the external executables the pipelines invoke.
///
/// A value without a path separator is looked up on `PATH`; a value with one
/// is used as-is.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ToolsConfig {
    /// DICOM to NIFTI converter.
    #[validate(length(min = 1))]
    pub dcm2niix: String,
    /// FreeSurfer cortical reconstruction driver.
    #[validate(length(min = 1))]
    pub recon_all: String,
    /// FreeSurfer surface format converter.
    #[validate(length(min = 1))]
    pub mris_convert: String,
    /// Mail user agent used for completion notices.
    #[validate(length(min = 1))]
    pub mail: String,
    /// Flags appended to every `recon-all` invocation.
    pub recon_all_flags: Vec<String>,
    /// Environment-loading step suggested when a tool cannot be found.
    pub environment_hint: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            dcm2niix: "dcm2niix".to_string(),
            recon_all: "recon-all".to_string(),
            mris_convert: "mris_convert".to_string(),
            mail: "mail".to_string(),
            recon_all_flags: default_recon_all_flags(),
            environment_hint: default_environment_hint(),
        }
    }
}

fn default_recon_all_flags() -> Vec<String> {
    vec!["-all".to_string()]
}

fn default_environment_hint() -> String {
    "load FreeSurfer first, e.g. `source $FREESURFER_HOME/SetUpFreeSurfer.sh`".to_string()
}
