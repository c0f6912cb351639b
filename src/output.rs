//! Text and JSON output for the run summary.
//!
//! Stdout carries only user-facing output; logs go to stderr.

use brainmesh_core::types::RunReport;
use serde::Serialize;

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Aligned key/value lines
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Run report plus the post-processing instructions printed when no email
/// was sent.
#[derive(Debug, Serialize)]
pub struct RunSummary<'a> {
    #[serde(flatten)]
    pub report: &'a RunReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

/// Print the summary of a successful run
pub fn print_summary(summary: &RunSummary<'_>, format: OutputFormat) {
    match format {
        OutputFormat::Text => {
            if let Some(instructions) = &summary.instructions {
                println!("{}", instructions);
            }
            let report = summary.report;
            print_success(&format!("Created {} brain meshes", report.filename));
            print_kv("Run ID", &report.run_id);
            print_kv("Input", &report.input_kind);
            print_kv("Left hemisphere", &report.lh_stl.display().to_string());
            print_kv("Right hemisphere", &report.rh_stl.display().to_string());
            for stage in &report.stages {
                print_kv(
                    &format!("Stage {}", stage.stage),
                    &format_duration(stage.duration_ms),
                );
            }
            print_kv("Total", &format_duration(report.total_ms));
            print_kv("Email sent", if report.notified { "yes" } else { "no" });
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(summary).unwrap_or_else(|_| "{}".to_string());
            println!("{}", json);
        }
    }
}

/// Print a success message
pub fn print_success(msg: &str) {
    println!("✓ {}", msg);
}

/// Print an error message
pub fn print_error(msg: &str) {
    eprintln!("✗ {}", msg);
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:<24} {}", format!("{}:", key), value);
}

/// `1h 02m 03s`, `2m 03s`, or `3.2s`
fn format_duration(ms: u64) -> String {
    let secs = ms / 1000;
    let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    if h > 0 {
        format!("{h}h {m:02}m {s:02}s")
    } else if m > 0 {
        format!("{m}m {s:02}s")
    } else {
        format!("{:.1}s", ms as f64 / 1000.0)
    }
}
