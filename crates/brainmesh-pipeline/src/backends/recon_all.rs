//! FreeSurfer `recon-all` backend for [`SurfaceReconstructor`].

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use brainmesh_core::result::AppResult;
use brainmesh_core::traits::SurfaceReconstructor;
use brainmesh_core::types::{StageContext, SurfacePair};

use super::output::verify_output;
use crate::executor::{ExecutionParams, ProcessExecutor};

/// Runs `recon-all -s <subject> -i <volume> <flags>` with `SUBJECTS_DIR` set.
///
/// This is the long stage: a full reconstruction takes many hours.
#[derive(Debug, Clone)]
pub struct ReconAll {
    program: PathBuf,
    flags: Vec<String>,
}

impl ReconAll {
    /// Create a backend launching `program` with extra `flags`.
    pub fn new(program: impl Into<PathBuf>, flags: Vec<String>) -> Self {
        Self {
            program: program.into(),
            flags,
        }
    }
}

#[async_trait]
impl SurfaceReconstructor for ReconAll {
    fn name(&self) -> &str {
        "recon-all"
    }

    async fn reconstruct(
        &self,
        volume: &Path,
        subjects_dir: &Path,
        subject: &str,
        ctx: &StageContext,
    ) -> AppResult<SurfacePair> {
        let params = ExecutionParams::new(&self.program, ctx.log_path())
            .args(["-s", subject, "-i"])
            .args([volume.to_string_lossy()])
            .args(self.flags.iter().cloned())
            .env("SUBJECTS_DIR", subjects_dir.to_string_lossy())
            .timeout(ctx.timeout);

        ProcessExecutor::new(ctx.diagnostic_tail_lines)
            .execute(&params, &ctx.cancel)
            .await?;

        let surfaces = SurfacePair::in_dir(&subjects_dir.join(subject).join("surf"));
        verify_output(&surfaces.lh, ctx.min_output_bytes).await?;
        verify_output(&surfaces.rh, ctx.min_output_bytes).await?;
        Ok(surfaces)
    }
}
