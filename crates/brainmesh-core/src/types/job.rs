//! Job parameters collected from the command line.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::types::email::EmailAddress;

/// One conversion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobParams {
    /// DICOM directory, pial directory, or NIFTI file.
    pub input: PathBuf,
    /// Directory receiving intermediates and the STL pair.
    pub dest: PathBuf,
    /// Base name for outputs and the scratch directory.
    pub filename: String,
    /// Where to send the completion notice, if anywhere.
    pub email: Option<EmailAddress>,
}

impl JobParams {
    /// Validate raw arguments into job parameters.
    ///
    /// Performs no filesystem access.
    pub fn new(
        input: impl Into<PathBuf>,
        dest: impl Into<PathBuf>,
        filename: &str,
        email: Option<&str>,
    ) -> Result<Self, AppError> {
        let email = email.map(EmailAddress::parse).transpose()?;
        validate_filename(filename)?;

        Ok(Self {
            input: input.into(),
            dest: dest.into(),
            filename: filename.to_string(),
            email,
        })
    }
}

/// The filename names a scratch directory and the output files, so it must
/// be a single path component. It also reaches recon-all as `-s <filename>`,
/// where a leading `-` would be read as a flag.
fn validate_filename(filename: &str) -> Result<(), AppError> {
    if filename.trim().is_empty() {
        return Err(AppError::validation("Output filename must not be empty"));
    }
    if filename == "." || filename == ".." {
        return Err(AppError::validation(format!(
            "Output filename '{filename}' is not allowed"
        )));
    }
    if filename.starts_with('-') {
        return Err(AppError::validation(format!(
            "Output filename '{filename}' must not start with '-'"
        )));
    }
    if filename.contains('/') || filename.contains('\\') || filename.contains('\0') {
        return Err(AppError::validation(format!(
            "Output filename '{filename}' must not contain path separators"
        )));
    }
    Ok(())
}
