//! `mail` backend for [`Notifier`].

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use brainmesh_core::result::AppResult;
use brainmesh_core::traits::Notifier;
use brainmesh_core::types::{OutgoingMessage, StageContext};
use brainmesh_core::{AppError, ErrorKind};
use tracing::info;

use crate::executor::{ExecutionParams, ProcessExecutor};

/// Sends notices with `mail -s <subject> [-c <cc>] -- <to>`, body on stdin.
#[derive(Debug, Clone)]
pub struct MailNotifier {
    program: PathBuf,
}

impl MailNotifier {
    /// Create a notifier launching `program`.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn params(&self, message: &OutgoingMessage, log_path: &Path) -> ExecutionParams {
        let mut params = ExecutionParams::new(&self.program, log_path)
            .args(["-s", message.subject.as_str()]);
        if let Some(cc) = &message.cc {
            params = params.args(["-c", cc.as_str()]);
        }
        // The recipient is user input; `--` keeps a leading `-` from being
        // read as an option.
        params
            .args(["--", message.to.as_str()])
            .stdin(message.body.as_str())
    }
}

#[async_trait]
impl Notifier for MailNotifier {
    fn name(&self) -> &str {
        "mail"
    }

    async fn send(&self, message: &OutgoingMessage, ctx: &StageContext) -> AppResult<()> {
        let params = self
            .params(message, &ctx.log_path())
            .timeout(ctx.timeout);

        ProcessExecutor::new(ctx.diagnostic_tail_lines)
            .execute(&params, &ctx.cancel)
            .await
            .map_err(|e| {
                let err = AppError::from(e);
                match err.kind {
                    ErrorKind::Cancelled | ErrorKind::Timeout => err,
                    _ => AppError::notification(format!(
                        "Failed to send completion email: {}",
                        err.message
                    )),
                }
            })?;

        info!(to = %message.to, cc = ?message.cc, "Completion email sent");
        Ok(())
    }
}
