//! Outgoing completion notice.

use serde::{Deserialize, Serialize};

/// A composed email ready for a [`Notifier`](crate::traits::notifier::Notifier).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingMessage {
    /// Primary recipient.
    pub to: String,
    /// Copy recipient, if routing added one.
    pub cc: Option<String>,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub body: String,
}
