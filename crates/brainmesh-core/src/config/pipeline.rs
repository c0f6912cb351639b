//! Pipeline execution limits.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use validator::Validate;

/// Execution limits applied to every external stage.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct PipelineConfig {
    /// Per-stage timeout in seconds; `0` disables the timeout.
    ///
    /// Cortical reconstruction routinely runs for many hours.
    pub stage_timeout_seconds: u64,
    /// Outputs smaller than this many bytes count as a failed stage.
    #[validate(range(min = 1))]
    pub min_output_bytes: u64,
    /// Number of tool-log lines quoted when a stage fails.
    #[validate(range(min = 1, max = 200))]
    pub diagnostic_tail_lines: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            stage_timeout_seconds: 0,
            min_output_bytes: 1,
            diagnostic_tail_lines: 20,
        }
    }
}

impl PipelineConfig {
    /// The stage timeout, if one is configured.
    pub fn stage_timeout(&self) -> Option<Duration> {
        match self.stage_timeout_seconds {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}
