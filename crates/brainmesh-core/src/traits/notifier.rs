//! Completion notice delivery.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::{OutgoingMessage, StageContext};

/// Delivers a composed completion notice.
#[async_trait]
pub trait Notifier: Send + Sync + std::fmt::Debug + 'static {
    /// Backend name for logs.
    fn name(&self) -> &str;

    /// Send `message`, honouring the stage timeout and cancellation in `ctx`.
    async fn send(&self, message: &OutgoingMessage, ctx: &StageContext) -> AppResult<()>;
}
