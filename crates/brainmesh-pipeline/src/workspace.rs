//! Destination and scratch directory layout for one job.

use std::path::{Path, PathBuf};

use brainmesh_core::config::AppConfig;
use brainmesh_core::types::{Hemisphere, JobParams};
use tracing::debug;

use crate::error::PipelineError;

/// Paths used by one job.
///
/// The scratch directory `<scratch_root>/<filename>` doubles as FreeSurfer's
/// `SUBJECTS_DIR`; the subject is named after the output filename. Nothing
/// here is removed when the job ends.
#[derive(Debug, Clone)]
pub struct JobWorkspace {
    dest: PathBuf,
    scratch_dir: PathBuf,
    log_dir: PathBuf,
    filename: String,
}

impl JobWorkspace {
    /// Compute the layout without touching the filesystem.
    pub fn new(job: &JobParams, config: &AppConfig) -> Self {
        let scratch_dir = config
            .workspace
            .effective_scratch_root()
            .join(&job.filename);
        let log_dir = scratch_dir.join(&config.workspace.log_dir_name);

        Self {
            dest: job.dest.clone(),
            scratch_dir,
            log_dir,
            filename: job.filename.clone(),
        }
    }

    /// Create the destination, scratch, and log directories.
    ///
    /// Idempotent: existing directories are reused.
    pub async fn prepare(&self) -> Result<(), PipelineError> {
        for dir in [&self.dest, &self.scratch_dir, &self.log_dir] {
            tokio::fs::create_dir_all(dir).await?;
        }
        debug!(
            dest = %self.dest.display(),
            scratch = %self.scratch_dir.display(),
            "Workspace prepared"
        );
        Ok(())
    }

    /// Destination directory.
    pub fn dest(&self) -> &Path {
        &self.dest
    }

    /// Scratch directory, used as `SUBJECTS_DIR`.
    pub fn subjects_dir(&self) -> &Path {
        &self.scratch_dir
    }

    /// FreeSurfer subject name.
    pub fn subject(&self) -> &str {
        &self.filename
    }

    /// Directory for tool output logs.
    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    /// `<dest>/<filename>.nii`
    pub fn nifti_path(&self) -> PathBuf {
        self.dest.join(format!("{}.nii", self.filename))
    }

    /// `<dest>/<filename>_<lh|rh>.pial`
    pub fn copied_surface(&self, hemisphere: Hemisphere) -> PathBuf {
        self.dest
            .join(format!("{}_{}.pial", self.filename, hemisphere.prefix()))
    }

    /// `<dest>/<filename>_<lh|rh>.stl`
    pub fn stl_path(&self, hemisphere: Hemisphere) -> PathBuf {
        self.dest
            .join(format!("{}_{}.stl", self.filename, hemisphere.prefix()))
    }
}
