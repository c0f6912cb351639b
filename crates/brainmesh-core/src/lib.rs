//! # brainmesh-core
//!
//! Core crate for brainmesh. Contains the configuration schema, the
//! capability traits behind which every external neuroimaging tool sits,
//! the job and report types, and the unified error system.
//!
//! This crate has **no** internal dependencies on other brainmesh crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
