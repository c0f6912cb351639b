//! Unified application error types for brainmesh.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator. The CLI turns the [`ErrorKind`] into
//! a process exit code.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// A command-line argument failed validation (email, filename).
    Validation,
    /// The input path is not a DICOM directory, pial directory, or NIFTI file.
    UnsupportedInput,
    /// A required external executable could not be resolved.
    ToolMissing,
    /// An external tool exited unsuccessfully.
    StageFailed,
    /// An external tool succeeded but its declared output is absent or empty.
    OutputMissing,
    /// An external tool exceeded the configured stage timeout.
    Timeout,
    /// The run was interrupted by a signal.
    Cancelled,
    /// The completion notice could not be delivered.
    Notification,
    /// A configuration error occurred.
    Configuration,
    /// A filesystem I/O error occurred.
    Io,
}

impl ErrorKind {
    /// Process exit code reported for this kind of failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Cancelled => 130,
            _ => 1,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation => write!(f, "VALIDATION"),
            Self::UnsupportedInput => write!(f, "UNSUPPORTED_INPUT"),
            Self::ToolMissing => write!(f, "TOOL_MISSING"),
            Self::StageFailed => write!(f, "STAGE_FAILED"),
            Self::OutputMissing => write!(f, "OUTPUT_MISSING"),
            Self::Timeout => write!(f, "TIMEOUT"),
            Self::Cancelled => write!(f, "CANCELLED"),
            Self::Notification => write!(f, "NOTIFICATION"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Io => write!(f, "IO"),
        }
    }
}

/// The unified application error used throughout brainmesh.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create an unsupported-input error.
    pub fn unsupported_input(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnsupportedInput, message)
    }

    /// Create a missing-tool error.
    pub fn tool_missing(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ToolMissing, message)
    }

    /// Create a stage failure error.
    pub fn stage_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::StageFailed, message)
    }

    /// Create a missing-output error.
    pub fn output_missing(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::OutputMissing, message)
    }

    /// Create a timeout error.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Timeout, message)
    }

    /// Create a cancellation error.
    pub fn cancelled(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Cancelled, message)
    }

    /// Create a notification error.
    pub fn notification(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Notification, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Prefix the message with the name of the stage that produced it.
    pub fn in_stage(mut self, stage: &str) -> Self {
        self.message = format!("stage '{stage}': {}", self.message);
        self
    }

    /// Exit code the CLI should terminate with.
    pub fn exit_code(&self) -> i32 {
        self.kind.exit_code()
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorKind::Io, format!("I/O error: {err}"), err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Invalid configuration: {err}"),
            err,
        )
    }
}
