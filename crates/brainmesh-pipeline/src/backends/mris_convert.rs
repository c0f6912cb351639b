//! FreeSurfer `mris_convert` backend for [`MeshConverter`].

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use brainmesh_core::result::AppResult;
use brainmesh_core::traits::MeshConverter;
use brainmesh_core::types::StageContext;

use super::output::verify_output;
use crate::executor::{ExecutionParams, ProcessExecutor};

/// Converts a surface with `mris_convert <surface> <stl>`.
#[derive(Debug, Clone)]
pub struct MrisConvert {
    program: PathBuf,
}

impl MrisConvert {
    /// Create a backend launching `program`.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

#[async_trait]
impl MeshConverter for MrisConvert {
    fn name(&self) -> &str {
        "mris_convert"
    }

    async fn to_stl(&self, surface: &Path, stl: &Path, ctx: &StageContext) -> AppResult<()> {
        let params = ExecutionParams::new(&self.program, ctx.log_path())
            .args([surface.to_string_lossy(), stl.to_string_lossy()])
            .timeout(ctx.timeout);

        ProcessExecutor::new(ctx.diagnostic_tail_lines)
            .execute(&params, &ctx.cancel)
            .await?;

        verify_output(stl, ctx.min_output_bytes).await?;
        Ok(())
    }
}
