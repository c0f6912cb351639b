//! Conversion capabilities: DICOM to NIFTI, volume to surfaces, surface to mesh.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::{StageContext, SurfacePair};

/// Converts a DICOM series into a NIFTI volume.
#[async_trait]
pub trait DicomConverter: Send + Sync + std::fmt::Debug + 'static {
    /// Backend name for logs.
    fn name(&self) -> &str;

    /// Convert the series in `dicom_dir`, writing `<out_dir>/<basename>.nii`.
    ///
    /// Returns the path of the written volume.
    async fn to_nifti(
        &self,
        dicom_dir: &Path,
        out_dir: &Path,
        basename: &str,
        ctx: &StageContext,
    ) -> AppResult<PathBuf>;
}

/// Reconstructs cortical surfaces from a structural volume.
#[async_trait]
pub trait SurfaceReconstructor: Send + Sync + std::fmt::Debug + 'static {
    /// Backend name for logs.
    fn name(&self) -> &str;

    /// Reconstruct `subject` from `volume` inside `subjects_dir`.
    ///
    /// Returns the left and right pial surfaces.
    async fn reconstruct(
        &self,
        volume: &Path,
        subjects_dir: &Path,
        subject: &str,
        ctx: &StageContext,
    ) -> AppResult<SurfacePair>;
}

/// Converts a surface file into an STL mesh.
#[async_trait]
pub trait MeshConverter: Send + Sync + std::fmt::Debug + 'static {
    /// Backend name for logs.
    fn name(&self) -> &str;

    /// Convert `surface` into the STL mesh at `stl`.
    async fn to_stl(&self, surface: &Path, stl: &Path, ctx: &StageContext) -> AppResult<()>;
}
