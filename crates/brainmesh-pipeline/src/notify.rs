//! Completion notice composition and recipient routing.

use brainmesh_core::config::notification::NotificationConfig;
use brainmesh_core::types::{EmailAddress, OutgoingMessage, RunReport};

/// Post-processing steps sent with every completed run.
const POST_PROCESSING: &str = "\
Before printing, clean up the meshes:
  1. Open both STL files in MeshLab (or another mesh editor).
  2. Smooth the surface: Filters > Smoothing > Laplacian Smooth, 3-5 steps.
  3. Reduce the triangle count: Filters > Remeshing > Quadric Edge Collapse
     Decimation, targeting roughly 200,000 faces per hemisphere.
  4. Repair the mesh: remove duplicate faces, close holes, and remove
     non-manifold edges.
  5. Scale to the desired print size and export each hemisphere as STL for
     your slicer.";

/// Text of the completion notice.
pub struct CompletionMessage;

impl CompletionMessage {
    /// Completion notice body: where the meshes are and what to do next.
    pub fn instructions(report: &RunReport) -> String {
        format!(
            "Your 3D brain conversion '{}' has finished.\n\n\
             Left hemisphere:  {}\n\
             Right hemisphere: {}\n\n\
             {POST_PROCESSING}\n",
            report.filename,
            report.lh_stl.display(),
            report.rh_stl.display(),
        )
    }

    /// Compose the email for `recipient`, copying the administrator when the
    /// recipient is outside the institutional domain.
    pub fn compose(
        recipient: &EmailAddress,
        report: &RunReport,
        config: &NotificationConfig,
    ) -> OutgoingMessage {
        OutgoingMessage {
            to: recipient.to_string(),
            cc: copy_recipient(recipient, config),
            subject: config.subject.clone(),
            body: Self::instructions(report),
        }
    }
}

/// The administrator address for external recipients, `None` otherwise.
pub fn copy_recipient(recipient: &EmailAddress, config: &NotificationConfig) -> Option<String> {
    if is_institutional(recipient.domain(), &config.institutional_domain) {
        None
    } else {
        Some(config.admin_email.clone())
    }
}

/// Whether `domain` equals `institutional` or is a subdomain of it.
pub fn is_institutional(domain: &str, institutional: &str) -> bool {
    let domain = domain.to_ascii_lowercase();
    let institutional = institutional.to_ascii_lowercase();
    domain == institutional || domain.ends_with(&format!(".{institutional}"))
}
