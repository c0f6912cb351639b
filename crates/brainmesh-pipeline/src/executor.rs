//! External process execution for pipeline stages.
//!
//! Runs one tool as a child process with its output appended to a log file,
//! racing completion against an optional timeout and the run's cancellation
//! token.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, Instant};

use brainmesh_core::error::AppError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

/// Errors from process execution
#[derive(Debug, Error)]
pub enum ExecutorError {
    /// The program could not be started
    #[error("Failed to start '{command}': {source}")]
    Spawn {
        /// The program that failed to start
        command: String,
        /// The underlying spawn error
        #[source]
        source: std::io::Error,
    },

    /// The process exited with a non-zero code
    #[error("'{command}' exited with code {code} (log: {})\n{diagnostic}", log_path.display())]
    Failed {
        /// The program
        command: String,
        /// The exit code
        code: i32,
        /// Last lines of the tool log
        diagnostic: String,
        /// Full tool log
        log_path: PathBuf,
    },

    /// The process was terminated by a signal
    #[error("'{command}' was terminated by a signal (log: {})", log_path.display())]
    Killed {
        /// The program
        command: String,
        /// Full tool log
        log_path: PathBuf,
    },

    /// The process exceeded the stage timeout
    #[error("'{command}' timed out after {timeout_seconds} seconds")]
    Timeout {
        /// The program
        command: String,
        /// The timeout that was exceeded
        timeout_seconds: u64,
    },

    /// The run was cancelled while the process was running
    #[error("'{command}' was cancelled")]
    Cancelled {
        /// The program
        command: String,
    },

    /// IO error around the process (log file, stdin)
    #[error("IO error during execution: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ExecutorError> for AppError {
    fn from(err: ExecutorError) -> Self {
        let message = err.to_string();
        match err {
            ExecutorError::Spawn { source, .. } => {
                AppError::with_source(brainmesh_core::ErrorKind::ToolMissing, message, source)
            }
            ExecutorError::Failed { .. } | ExecutorError::Killed { .. } => {
                AppError::stage_failed(message)
            }
            ExecutorError::Timeout { .. } => AppError::timeout(message),
            ExecutorError::Cancelled { .. } => AppError::cancelled(message),
            ExecutorError::Io(source) => {
                AppError::with_source(brainmesh_core::ErrorKind::Io, message, source)
            }
        }
    }
}

/// Result of a successful execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Exit code
    pub exit_code: i32,
    /// Duration of the run
    pub duration_ms: u64,
    /// Where stdout and stderr were written
    pub log_path: PathBuf,
}

/// Parameters for executing one tool
#[derive(Debug, Clone, Default)]
pub struct ExecutionParams {
    /// The program to execute
    pub program: PathBuf,
    /// Arguments
    pub args: Vec<String>,
    /// Environment variables to set
    pub env_vars: Vec<(String, String)>,
    /// Text written to the child's stdin; stdin is closed when absent
    pub stdin: Option<String>,
    /// Log file receiving stdout and stderr (appended)
    pub log_path: PathBuf,
    /// Kill the process after this long
    pub timeout: Option<Duration>,
}

impl ExecutionParams {
    /// Start building parameters for `program`, logging to `log_path`.
    pub fn new(program: impl Into<PathBuf>, log_path: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            log_path: log_path.into(),
            ..Default::default()
        }
    }

    /// Append arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set an environment variable for the child.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.push((key.into(), value.into()));
        self
    }

    /// Feed `input` to the child's stdin.
    pub fn stdin(mut self, input: impl Into<String>) -> Self {
        self.stdin = Some(input.into());
        self
    }

    /// Set the timeout.
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    fn command_name(&self) -> String {
        self.program
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.program.to_string_lossy().to_string())
    }
}

/// Executor for running external tools one at a time
#[derive(Debug, Clone)]
pub struct ProcessExecutor {
    /// Log lines quoted in failure diagnostics
    tail_lines: usize,
}

impl Default for ProcessExecutor {
    fn default() -> Self {
        Self { tail_lines: 20 }
    }
}

impl ProcessExecutor {
    /// Create an executor quoting `tail_lines` log lines on failure
    pub fn new(tail_lines: usize) -> Self {
        Self { tail_lines }
    }

    /// Execute a command and wait for it to finish
    pub async fn execute(
        &self,
        params: &ExecutionParams,
        cancel: &CancellationToken,
    ) -> Result<ExecutionResult, ExecutorError> {
        let command = params.command_name();

        if cancel.is_cancelled() {
            return Err(ExecutorError::Cancelled { command });
        }

        if let Some(parent) = params.log_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut log = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&params.log_path)?;
        writeln!(
            log,
            "$ {} {}",
            params.program.display(),
            params.args.join(" ")
        )?;

        info!(
            command = %params.program.display(),
            args = ?params.args,
            log = %params.log_path.display(),
            "Executing external tool"
        );

        let mut cmd = Command::new(&params.program);
        cmd.args(&params.args)
            .stdout(Stdio::from(log.try_clone()?))
            .stderr(Stdio::from(log))
            .stdin(if params.stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .kill_on_drop(true);

        for (key, value) in &params.env_vars {
            cmd.env(key, value);
        }

        let start = Instant::now();

        let mut child = cmd.spawn().map_err(|source| ExecutorError::Spawn {
            command: command.clone(),
            source,
        })?;

        // Written off the wait path so a child that never drains stdin is
        // still subject to the timeout and cancellation below.
        if let (Some(input), Some(mut pipe)) = (params.stdin.clone(), child.stdin.take()) {
            let command = command.clone();
            tokio::spawn(async move {
                if let Err(e) = pipe.write_all(input.as_bytes()).await {
                    debug!(command = %command, error = %e, "Child closed stdin early");
                }
            });
        }

        let deadline = async {
            match params.timeout {
                Some(timeout) => tokio::time::sleep(timeout).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            result = child.wait() => {
                let status = result?;
                let duration_ms = start.elapsed().as_millis() as u64;

                match status.code() {
                    Some(0) => {
                        info!(command = %command, duration_ms, "External tool completed");
                        Ok(ExecutionResult {
                            exit_code: 0,
                            duration_ms,
                            log_path: params.log_path.clone(),
                        })
                    }
                    Some(code) => {
                        let diagnostic = self.read_tail(&params.log_path).await;
                        error!(
                            command = %command,
                            code,
                            duration_ms,
                            log = %params.log_path.display(),
                            "External tool failed"
                        );
                        Err(ExecutorError::Failed {
                            command,
                            code,
                            diagnostic,
                            log_path: params.log_path.clone(),
                        })
                    }
                    None => {
                        error!(command = %command, "External tool terminated by signal");
                        Err(ExecutorError::Killed {
                            command,
                            log_path: params.log_path.clone(),
                        })
                    }
                }
            }
            _ = deadline => {
                let timeout_seconds = params.timeout.map(|t| t.as_secs()).unwrap_or_default();
                error!(command = %command, timeout_s = timeout_seconds, "External tool timed out, killing");
                let _ = child.kill().await;
                Err(ExecutorError::Timeout { command, timeout_seconds })
            }
            _ = cancel.cancelled() => {
                info!(command = %command, "Run cancelled, killing external tool");
                let _ = child.kill().await;
                Err(ExecutorError::Cancelled { command })
            }
        }
    }

    /// Last `tail_lines` lines of a log file; empty if it cannot be read.
    async fn read_tail(&self, path: &Path) -> String {
        let bytes = tokio::fs::read(path).await.unwrap_or_default();
        let text = String::from_utf8_lossy(&bytes);
        let lines: Vec<&str> = text.lines().collect();
        let skip = lines.len().saturating_sub(self.tail_lines);
        lines[skip..].join("\n")
    }
}
