//! Error types for classification, preflight, and workspace preparation.
//!
//! Stage execution failures come from [`ExecutorError`](crate::executor::ExecutorError);
//! both map into `brainmesh_core::AppError` for the CLI.

use std::path::PathBuf;

use brainmesh_core::error::{AppError, ErrorKind};
use thiserror::Error;

/// Failures detected before any external tool runs.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The input path does not exist.
    #[error("Input path does not exist: {path}")]
    InputNotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// A directory with neither `*.dcm` nor `*.pial` files.
    #[error("Directory {path} contains no DICOM (*.dcm) or pial surface (*.pial) files")]
    UnrecognizedDirectory {
        /// The directory that was scanned.
        path: PathBuf,
    },

    /// A file whose extension is not `nii`.
    #[error("Unsupported input file {path}: expected a NIFTI volume with extension 'nii', found '{extension}'")]
    UnsupportedFile {
        /// The rejected file.
        path: PathBuf,
        /// Its extension, empty when it has none.
        extension: String,
    },

    /// Neither a regular file nor a directory.
    #[error("Input {path} is neither a directory nor a regular file")]
    UnsupportedInputType {
        /// The rejected path.
        path: PathBuf,
    },

    /// A pial directory lacks one of the hemisphere surfaces.
    #[error("Pial surface not found: {path}")]
    MissingSurface {
        /// The expected surface path.
        path: PathBuf,
    },

    /// One or more required executables could not be resolved.
    #[error("Required tool(s) not found: {}. Please {hint}", tools.join(", "))]
    ToolsMissing {
        /// Names of the unresolved tools.
        tools: Vec<String>,
        /// Suggested environment-loading step.
        hint: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<PipelineError> for AppError {
    fn from(err: PipelineError) -> Self {
        let message = err.to_string();
        match err {
            PipelineError::ToolsMissing { .. } => AppError::tool_missing(message),
            PipelineError::Io(source) => AppError::with_source(ErrorKind::Io, message, source),
            _ => AppError::unsupported_input(message),
        }
    }
}
