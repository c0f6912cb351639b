//! External tool resolution and the availability preflight.
//!
//! A configured tool that contains a path separator must point at an
//! executable file. Anything else is searched for on `PATH`, the same way a
//! shell would resolve it.

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

use brainmesh_core::config::tools::ToolsConfig;
use brainmesh_core::types::InputKind;
use tracing::{debug, info, warn};

use crate::error::PipelineError;

/// An external executable the pipelines may need.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    /// DICOM to NIFTI converter.
    Dcm2Niix,
    /// Cortical reconstruction.
    ReconAll,
    /// Surface to STL converter.
    MrisConvert,
    /// Mail user agent.
    Mail,
}

impl Tool {
    /// Conventional executable name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Dcm2Niix => "dcm2niix",
            Self::ReconAll => "recon-all",
            Self::MrisConvert => "mris_convert",
            Self::Mail => "mail",
        }
    }

    /// Tools needed to process `kind`, plus the mailer when notifying.
    pub fn required_for(kind: &InputKind, notify: bool) -> Vec<Tool> {
        let mut tools = match kind {
            InputKind::Dicom(_) => vec![Tool::Dcm2Niix, Tool::ReconAll, Tool::MrisConvert],
            InputKind::Nifti(_) => vec![Tool::ReconAll, Tool::MrisConvert],
            InputKind::Pial(_) => vec![Tool::MrisConvert],
        };
        if notify {
            tools.push(Tool::Mail);
        }
        tools
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolves configured tools against the filesystem.
#[derive(Debug, Clone)]
pub struct Toolchain {
    tools: ToolsConfig,
    search_path: Option<OsString>,
}

impl Toolchain {
    /// Create a toolchain searching the process `PATH`.
    pub fn new(tools: ToolsConfig) -> Self {
        Self {
            tools,
            search_path: std::env::var_os("PATH"),
        }
    }

    /// Search `path` instead of the process `PATH`.
    pub fn with_search_path(mut self, path: impl Into<OsString>) -> Self {
        self.search_path = Some(path.into());
        self
    }

    /// The configured name or path of `tool`.
    pub fn configured(&self, tool: Tool) -> &str {
        match tool {
            Tool::Dcm2Niix => &self.tools.dcm2niix,
            Tool::ReconAll => &self.tools.recon_all,
            Tool::MrisConvert => &self.tools.mris_convert,
            Tool::Mail => &self.tools.mail,
        }
    }

    /// The program to launch for `tool`: its resolved path, or the configured
    /// value when it cannot be resolved.
    pub fn program(&self, tool: Tool) -> PathBuf {
        self.resolve(tool)
            .unwrap_or_else(|| PathBuf::from(self.configured(tool)))
    }

    /// Locate `tool`, returning `None` when it is not an executable file.
    pub fn resolve(&self, tool: Tool) -> Option<PathBuf> {
        let configured = self.configured(tool);
        let candidate = Path::new(configured);

        if candidate.components().count() > 1 {
            return is_executable(candidate).then(|| candidate.to_path_buf());
        }

        let search_path = self.search_path.as_ref()?;
        std::env::split_paths(search_path)
            .map(|dir| dir.join(configured))
            .find(|p| is_executable(p))
    }

    /// Resolve every tool needed for `kind`, reporting all missing ones at once.
    pub fn preflight(&self, kind: &InputKind, notify: bool) -> Result<(), PipelineError> {
        let mut missing = Vec::new();

        for tool in Tool::required_for(kind, notify) {
            match self.resolve(tool) {
                Some(path) => {
                    debug!(tool = %tool, path = %path.display(), "Resolved external tool");
                }
                None => {
                    warn!(tool = %tool, configured = self.configured(tool), "External tool not found");
                    missing.push(tool.name().to_string());
                }
            }
        }

        if !missing.is_empty() {
            return Err(PipelineError::ToolsMissing {
                tools: missing,
                hint: self.tools.environment_hint.clone(),
            });
        }

        info!(input_kind = kind.label(), "All required tools available");
        Ok(())
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
