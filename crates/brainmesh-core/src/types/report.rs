//! Run and stage reports.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Outcome of one completed stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageReport {
    /// Stage name, e.g. `reconstruct`.
    pub stage: String,
    /// Wall-clock duration.
    pub duration_ms: u64,
    /// Files the stage produced.
    pub artifacts: Vec<PathBuf>,
}

/// Outcome of a successful run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Correlates log lines of one invocation.
    pub run_id: String,
    /// Classified input label.
    pub input_kind: String,
    /// Output base name.
    pub filename: String,
    /// Completed stages in execution order.
    pub stages: Vec<StageReport>,
    /// Left hemisphere STL.
    pub lh_stl: PathBuf,
    /// Right hemisphere STL.
    pub rh_stl: PathBuf,
    /// Total wall-clock duration.
    pub total_ms: u64,
    /// Whether a completion email was sent.
    pub notified: bool,
}

impl RunReport {
    /// Names of completed stages, in order.
    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|s| s.stage.as_str()).collect()
    }
}
