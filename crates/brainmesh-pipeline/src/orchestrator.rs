//! Pipeline orchestration: classify, preflight, run stages in order, notify.
//!
//! Stages run strictly one after another. Every stage result is checked and
//! the run stops at the first failure, naming the stage that failed. Partial
//! outputs are left in place.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use brainmesh_core::config::AppConfig;
use brainmesh_core::error::AppError;
use brainmesh_core::result::AppResult;
use brainmesh_core::traits::{DicomConverter, MeshConverter, Notifier, SurfaceReconstructor};
use brainmesh_core::types::{
    Hemisphere, InputKind, JobParams, RunReport, StageContext, StageReport, SurfacePair,
};
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::backends::{Dcm2Niix, MailNotifier, MrisConvert, ReconAll};
use crate::classifier;
use crate::notify::CompletionMessage;
use crate::toolchain::{Tool, Toolchain};
use crate::workspace::JobWorkspace;

/// One step of a conversion pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// DICOM series to `<dest>/<filename>.nii`.
    DicomToNifti,
    /// Copy a NIFTI input to `<dest>/<filename>.nii`.
    StageNifti,
    /// Cortical reconstruction in the scratch subjects directory.
    Reconstruct,
    /// Copy reconstructed pial surfaces into the destination.
    CopySurfaces,
    /// Pial surface to STL for one hemisphere.
    Mesh(Hemisphere),
}

impl Stage {
    /// Stage name used in logs, reports, and log file names.
    pub fn name(&self) -> &'static str {
        match self {
            Self::DicomToNifti => "dicom-to-nifti",
            Self::StageNifti => "stage-nifti",
            Self::Reconstruct => "reconstruct",
            Self::CopySurfaces => "copy-surfaces",
            Self::Mesh(Hemisphere::Left) => "mesh-lh",
            Self::Mesh(Hemisphere::Right) => "mesh-rh",
        }
    }

    /// The fixed stage sequence for an input kind.
    pub fn plan(kind: &InputKind) -> Vec<Stage> {
        let meshes = Hemisphere::BOTH.map(Stage::Mesh);
        match kind {
            InputKind::Dicom(_) => [
                vec![Stage::DicomToNifti, Stage::Reconstruct, Stage::CopySurfaces],
                meshes.to_vec(),
            ]
            .concat(),
            InputKind::Nifti(_) => [
                vec![Stage::StageNifti, Stage::Reconstruct, Stage::CopySurfaces],
                meshes.to_vec(),
            ]
            .concat(),
            InputKind::Pial(_) => meshes.to_vec(),
        }
    }
}

/// The capability implementations a run uses.
#[derive(Debug, Clone)]
pub struct Backends {
    /// DICOM to NIFTI.
    pub dicom: Arc<dyn DicomConverter>,
    /// Volume to pial surfaces.
    pub reconstructor: Arc<dyn SurfaceReconstructor>,
    /// Surface to STL.
    pub mesher: Arc<dyn MeshConverter>,
    /// Completion notices.
    pub notifier: Arc<dyn Notifier>,
}

impl Backends {
    /// Backends that launch the configured external executables.
    pub fn external(toolchain: &Toolchain, config: &AppConfig) -> Self {
        Self {
            dicom: Arc::new(Dcm2Niix::new(toolchain.program(Tool::Dcm2Niix))),
            reconstructor: Arc::new(ReconAll::new(
                toolchain.program(Tool::ReconAll),
                config.tools.recon_all_flags.clone(),
            )),
            mesher: Arc::new(MrisConvert::new(toolchain.program(Tool::MrisConvert))),
            notifier: Arc::new(MailNotifier::new(toolchain.program(Tool::Mail))),
        }
    }

    fn name_for(&self, stage: Stage) -> &str {
        match stage {
            Stage::DicomToNifti => self.dicom.name(),
            Stage::Reconstruct => self.reconstructor.name(),
            Stage::Mesh(_) => self.mesher.name(),
            Stage::StageNifti | Stage::CopySurfaces => "copy",
        }
    }
}

/// Stage name of the completion notice.
const NOTIFY_STAGE: &str = "notify";

/// Intermediate results threaded between stages.
#[derive(Debug, Default)]
struct PipelineState {
    volume: Option<PathBuf>,
    surfaces: Option<SurfacePair>,
}

/// Runs one conversion job end to end.
#[derive(Debug)]
pub struct Orchestrator {
    config: AppConfig,
    backends: Backends,
    toolchain: Option<Toolchain>,
}

impl Orchestrator {
    /// Create an orchestrator without a tool preflight.
    pub fn new(config: AppConfig, backends: Backends) -> Self {
        Self {
            config,
            backends,
            toolchain: None,
        }
    }

    /// Check tool availability with `toolchain` before anything is written.
    pub fn with_preflight(mut self, toolchain: Toolchain) -> Self {
        self.toolchain = Some(toolchain);
        self
    }

    /// Execute `job`.
    ///
    /// Classification, surface checks, and the tool preflight all happen
    /// before the destination or scratch directories are created.
    #[instrument(skip(self, job, cancel), fields(run_id = tracing::field::Empty, filename = %job.filename, input_kind = tracing::field::Empty))]
    pub async fn run(&self, job: &JobParams, cancel: CancellationToken) -> AppResult<RunReport> {
        let run_id = Uuid::now_v7().to_string();
        let span = tracing::Span::current();
        span.record("run_id", run_id.as_str());

        let kind = classifier::classify(&job.input)?;
        span.record("input_kind", kind.label());
        info!(input = %kind, "Classified input");

        let mut state = PipelineState::default();
        if let InputKind::Pial(dir) = &kind {
            state.surfaces = Some(classifier::pial_surfaces(dir)?);
        }

        if let Some(toolchain) = &self.toolchain {
            toolchain.preflight(&kind, job.email.is_some())?;
        }

        let workspace = JobWorkspace::new(job, &self.config);
        workspace.prepare().await?;

        let started = Instant::now();
        let mut stages = Vec::new();

        for stage in Stage::plan(&kind) {
            if cancel.is_cancelled() {
                return Err(AppError::cancelled(format!(
                    "Run cancelled before stage '{}'",
                    stage.name()
                )));
            }

            info!(
                stage = stage.name(),
                backend = self.backends.name_for(stage),
                "Starting stage"
            );
            let stage_start = Instant::now();
            let ctx = self.stage_context(stage.name(), &workspace, &cancel);

            let artifacts = self
                .run_stage(stage, &kind, &workspace, &mut state, &ctx)
                .await
                .map_err(|e| e.in_stage(stage.name()))?;

            let duration_ms = stage_start.elapsed().as_millis() as u64;
            info!(stage = stage.name(), duration_ms, "Stage completed");
            stages.push(StageReport {
                stage: stage.name().to_string(),
                duration_ms,
                artifacts,
            });
        }

        let mut report = RunReport {
            run_id,
            input_kind: kind.label().to_string(),
            filename: job.filename.clone(),
            stages,
            lh_stl: workspace.stl_path(Hemisphere::Left),
            rh_stl: workspace.stl_path(Hemisphere::Right),
            total_ms: started.elapsed().as_millis() as u64,
            notified: false,
        };

        if let Some(recipient) = &job.email {
            if cancel.is_cancelled() {
                return Err(AppError::cancelled(format!(
                    "Run cancelled before stage '{NOTIFY_STAGE}'"
                )));
            }

            let notifier = &self.backends.notifier;
            info!(stage = NOTIFY_STAGE, backend = notifier.name(), "Starting stage");
            let message =
                CompletionMessage::compose(recipient, &report, &self.config.notification);
            let ctx = self.stage_context(NOTIFY_STAGE, &workspace, &cancel);
            notifier
                .send(&message, &ctx)
                .await
                .map_err(|e| e.in_stage(NOTIFY_STAGE))?;
            report.notified = true;
        }

        info!(total_ms = report.total_ms, "Conversion finished");
        Ok(report)
    }

    fn stage_context(
        &self,
        stage: &str,
        workspace: &JobWorkspace,
        cancel: &CancellationToken,
    ) -> StageContext {
        StageContext {
            stage: stage.to_string(),
            log_dir: workspace.log_dir().to_path_buf(),
            timeout: self.config.pipeline.stage_timeout(),
            min_output_bytes: self.config.pipeline.min_output_bytes,
            diagnostic_tail_lines: self.config.pipeline.diagnostic_tail_lines,
            cancel: cancel.clone(),
        }
    }

    async fn run_stage(
        &self,
        stage: Stage,
        kind: &InputKind,
        workspace: &JobWorkspace,
        state: &mut PipelineState,
        ctx: &StageContext,
    ) -> AppResult<Vec<PathBuf>> {
        match stage {
            Stage::DicomToNifti => {
                let volume = self
                    .backends
                    .dicom
                    .to_nifti(kind.path(), workspace.dest(), workspace.subject(), ctx)
                    .await?;
                state.volume = Some(volume.clone());
                Ok(vec![volume])
            }
            Stage::StageNifti => {
                let target = workspace.nifti_path();
                if is_same_file(kind.path(), &target).await {
                    warn!(path = %target.display(), "Input already in place, not copying");
                } else {
                    tokio::fs::copy(kind.path(), &target).await?;
                }
                state.volume = Some(target.clone());
                Ok(vec![target])
            }
            Stage::Reconstruct => {
                let volume = state
                    .volume
                    .clone()
                    .ok_or_else(|| AppError::stage_failed("No volume to reconstruct"))?;
                let surfaces = self
                    .backends
                    .reconstructor
                    .reconstruct(&volume, workspace.subjects_dir(), workspace.subject(), ctx)
                    .await?;
                let artifacts = vec![surfaces.lh.clone(), surfaces.rh.clone()];
                state.surfaces = Some(surfaces);
                Ok(artifacts)
            }
            Stage::CopySurfaces => {
                let surfaces = state
                    .surfaces
                    .as_ref()
                    .ok_or_else(|| AppError::stage_failed("No surfaces to copy"))?;
                let mut copied = Vec::with_capacity(2);
                for hemisphere in Hemisphere::BOTH {
                    let target = workspace.copied_surface(hemisphere);
                    tokio::fs::copy(surfaces.get(hemisphere), &target).await?;
                    copied.push(target);
                }
                Ok(copied)
            }
            Stage::Mesh(hemisphere) => {
                let surfaces = state
                    .surfaces
                    .as_ref()
                    .ok_or_else(|| AppError::stage_failed("No surfaces to convert"))?;
                let stl = workspace.stl_path(hemisphere);
                self.backends
                    .mesher
                    .to_stl(surfaces.get(hemisphere), &stl, ctx)
                    .await?;
                Ok(vec![stl])
            }
        }
    }
}

/// Copying a file onto itself would truncate it.
async fn is_same_file(a: &Path, b: &Path) -> bool {
    match (tokio::fs::canonicalize(a).await, tokio::fs::canonicalize(b).await) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
