//! Completion notice configuration.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Addresses and wording used for completion emails.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct NotificationConfig {
    /// Receives a copy of every notice sent outside the institutional domain.
    #[validate(email)]
    pub admin_email: String,
    /// Recipients in this domain (or a subdomain of it) are not copied.
    #[validate(length(min = 1))]
    pub institutional_domain: String,
    /// Subject line of the completion notice.
    #[validate(length(min = 1))]
    pub subject: String,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            admin_email: "brainmesh-admin@kumc.edu".to_string(),
            institutional_domain: "kumc.edu".to_string(),
            subject: "Your 3D printable brain is ready".to_string(),
        }
    }
}
