//! Per-stage execution context handed to capability backends.

use std::path::PathBuf;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

/// What a backend needs to run one stage.
#[derive(Debug, Clone)]
pub struct StageContext {
    /// Stage name, used for the log file name.
    pub stage: String,
    /// Directory receiving tool output logs.
    pub log_dir: PathBuf,
    /// Optional stage timeout.
    pub timeout: Option<Duration>,
    /// Minimum size of a valid output file.
    pub min_output_bytes: u64,
    /// Tool-log lines quoted on failure.
    pub diagnostic_tail_lines: usize,
    /// Cancelled when the run is interrupted.
    pub cancel: CancellationToken,
}

impl StageContext {
    /// `<log_dir>/<stage>.log`
    pub fn log_path(&self) -> PathBuf {
        self.log_dir.join(format!("{}.log", self.stage))
    }
}
