//! `dcm2niix` backend for [`DicomConverter`].

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use brainmesh_core::result::AppResult;
use brainmesh_core::traits::DicomConverter;
use brainmesh_core::types::StageContext;

use super::output::verify_output;
use crate::executor::{ExecutionParams, ProcessExecutor};

/// Converts a DICOM series with `dcm2niix -z n -o <out_dir> -f <basename> <dir>`.
#[derive(Debug, Clone)]
pub struct Dcm2Niix {
    program: PathBuf,
}

impl Dcm2Niix {
    /// Create a backend launching `program`.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

#[async_trait]
impl DicomConverter for Dcm2Niix {
    fn name(&self) -> &str {
        "dcm2niix"
    }

    async fn to_nifti(
        &self,
        dicom_dir: &Path,
        out_dir: &Path,
        basename: &str,
        ctx: &StageContext,
    ) -> AppResult<PathBuf> {
        let params = ExecutionParams::new(&self.program, ctx.log_path())
            .args(["-z", "n", "-o"])
            .args([out_dir.to_string_lossy(), "-f".into(), basename.into()])
            .args([dicom_dir.to_string_lossy()])
            .timeout(ctx.timeout);

        ProcessExecutor::new(ctx.diagnostic_tail_lines)
            .execute(&params, &ctx.cancel)
            .await?;

        let nifti = out_dir.join(format!("{basename}.nii"));
        verify_output(&nifti, ctx.min_output_bytes).await?;
        Ok(nifti)
    }
}
