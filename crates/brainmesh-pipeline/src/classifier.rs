//! Input classification: picks the DICOM, pial, or NIFTI conversion path.

use std::path::Path;

use brainmesh_core::types::{InputKind, SurfacePair};
use tracing::debug;

use crate::error::PipelineError;

/// Classify `path` by what it is and, for directories, what it contains.
///
/// Directories are scanned non-recursively. A directory with any `*.dcm`
/// file is DICOM even if `*.pial` files are also present.
pub fn classify(path: &Path) -> Result<InputKind, PipelineError> {
    let metadata = std::fs::metadata(path).map_err(|_| PipelineError::InputNotFound {
        path: path.to_path_buf(),
    })?;

    if metadata.is_dir() {
        let counts = count_extensions(path)?;
        debug!(
            path = %path.display(),
            dcm = counts.dcm,
            pial = counts.pial,
            "Scanned input directory"
        );

        return if counts.dcm > 0 {
            Ok(InputKind::Dicom(path.to_path_buf()))
        } else if counts.pial > 0 {
            Ok(InputKind::Pial(path.to_path_buf()))
        } else {
            Err(PipelineError::UnrecognizedDirectory {
                path: path.to_path_buf(),
            })
        };
    }

    if metadata.is_file() {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();

        return if extension == "nii" {
            Ok(InputKind::Nifti(path.to_path_buf()))
        } else {
            Err(PipelineError::UnsupportedFile {
                path: path.to_path_buf(),
                extension: extension.to_string(),
            })
        };
    }

    Err(PipelineError::UnsupportedInputType {
        path: path.to_path_buf(),
    })
}

/// The hemisphere surfaces a pial directory must provide.
pub fn pial_surfaces(dir: &Path) -> Result<SurfacePair, PipelineError> {
    let pair = SurfacePair::in_dir(dir);
    for surface in [&pair.lh, &pair.rh] {
        if !surface.is_file() {
            return Err(PipelineError::MissingSurface {
                path: surface.clone(),
            });
        }
    }
    Ok(pair)
}

#[derive(Debug, Default)]
struct ExtensionCounts {
    dcm: usize,
    pial: usize,
}

fn count_extensions(dir: &Path) -> Result<ExtensionCounts, PipelineError> {
    let mut counts = ExtensionCounts::default();

    for entry in std::fs::read_dir(dir)?.flatten() {
        let p = entry.path();
        if !p.is_file() {
            continue;
        }
        match p.extension().and_then(|e| e.to_str()) {
            Some(e) if e.eq_ignore_ascii_case("dcm") => counts.dcm += 1,
            Some(e) if e.eq_ignore_ascii_case("pial") => counts.pial += 1,
            _ => {}
        }
    }

    Ok(counts)
}
