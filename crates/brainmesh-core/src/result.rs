//! Convenience result type alias for brainmesh.

use crate::error::AppError;

/// A specialized `Result` type for brainmesh operations.
pub type AppResult<T> = Result<T, AppError>;
