//! Input classification results and hemisphere naming.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// The conversion path selected for an input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "path", rename_all = "lowercase")]
pub enum InputKind {
    /// Directory containing at least one `*.dcm` file.
    Dicom(PathBuf),
    /// Directory with no DICOM files but at least one `*.pial` file.
    Pial(PathBuf),
    /// Regular file with extension `nii`.
    Nifti(PathBuf),
}

impl InputKind {
    /// Short lowercase label used in logs and reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Dicom(_) => "dicom",
            Self::Pial(_) => "pial",
            Self::Nifti(_) => "nifti",
        }
    }

    /// The classified input path.
    pub fn path(&self) -> &Path {
        match self {
            Self::Dicom(p) | Self::Pial(p) | Self::Nifti(p) => p,
        }
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label(), self.path().display())
    }
}

/// A cerebral hemisphere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hemisphere {
    /// Left hemisphere (`lh`).
    Left,
    /// Right hemisphere (`rh`).
    Right,
}

impl Hemisphere {
    /// Both hemispheres, left first.
    pub const BOTH: [Hemisphere; 2] = [Hemisphere::Left, Hemisphere::Right];

    /// FreeSurfer prefix: `lh` or `rh`.
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Left => "lh",
            Self::Right => "rh",
        }
    }

    /// FreeSurfer pial surface file name, e.g. `lh.pial`.
    pub fn pial_file_name(&self) -> String {
        format!("{}.pial", self.prefix())
    }
}

/// Left and right pial surfaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfacePair {
    /// Left hemisphere surface.
    pub lh: PathBuf,
    /// Right hemisphere surface.
    pub rh: PathBuf,
}

impl SurfacePair {
    /// Surfaces named `lh.pial` and `rh.pial` inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            lh: dir.join(Hemisphere::Left.pial_file_name()),
            rh: dir.join(Hemisphere::Right.pial_file_name()),
        }
    }

    /// The surface for one hemisphere.
    pub fn get(&self, hemisphere: Hemisphere) -> &Path {
        match hemisphere {
            Hemisphere::Left => &self.lh,
            Hemisphere::Right => &self.rh,
        }
    }
}
