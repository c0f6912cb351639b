//! # brainmesh-pipeline
//!
//! Turns a DICOM series, a NIFTI volume, or a pair of FreeSurfer pial
//! surfaces into one STL mesh per hemisphere.
//!
//! ## Flow
//!
//! 1. [`classifier`] picks the conversion path from the input on disk.
//! 2. [`toolchain`] checks that every external executable the path needs is
//!    available, before anything is written.
//! 3. [`workspace`] lays out the destination and scratch directories.
//! 4. [`orchestrator`] runs the stages strictly in order through the
//!    capability [`backends`], each launched by the [`executor`], and stops
//!    at the first failure.
//! 5. [`notify`] composes the completion notice.

pub mod backends;
pub mod classifier;
pub mod error;
pub mod executor;
pub mod notify;
pub mod orchestrator;
pub mod toolchain;
pub mod workspace;

pub use error::PipelineError;
pub use executor::{ExecutionParams, ExecutionResult, ExecutorError, ProcessExecutor};
pub use notify::CompletionMessage;
pub use orchestrator::{Backends, Orchestrator, Stage};
pub use toolchain::{Tool, Toolchain};
pub use workspace::JobWorkspace;
