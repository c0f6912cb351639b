//! Command-line argument definitions.

use std::path::PathBuf;

use clap::Parser;

use crate::output::OutputFormat;

const AFTER_HELP: &str = "\
Input kinds:
  DICOM   a directory containing *.dcm files
  NIFTI   a single *.nii file
  Pial    a directory containing lh.pial and rh.pial

Outputs <dest>/<filename>_lh.stl and <dest>/<filename>_rh.stl.
DICOM and NIFTI input run FreeSurfer's recon-all, which takes several hours.
Load FreeSurfer into the environment before running.

Examples:
  make3dBrain ~/scans/series1 ~/brains MyBrain me@kumc.edu
  make3dBrain ~/scans/T1.nii ~/brains MyBrain
  make3dBrain ~/subjects/me/surf ~/brains MyBrain";

/// Convert brain imaging data into 3D-printable STL hemispheres
#[derive(Debug, Parser)]
#[command(name = "make3dBrain", version, about, long_about = None, after_help = AFTER_HELP)]
pub struct Cli {
    /// DICOM directory, NIFTI file, or directory with lh.pial and rh.pial
    pub input: PathBuf,

    /// Destination directory for intermediates and the STL files
    pub dest: PathBuf,

    /// Base name for the output files
    pub filename: String,

    /// Email address to notify when the conversion is done
    pub email: Option<String>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,

    /// Run summary format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}
