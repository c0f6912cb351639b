//! Capability traits for the external tools the pipelines drive.
//!
//! Every external collaborator sits behind one of these traits so that
//! alternate backends, or in-memory fakes in tests, can be substituted for
//! the real long-running binaries.

pub mod converter;
pub mod notifier;

pub use converter::{DicomConverter, MeshConverter, SurfaceReconstructor};
pub use notifier::Notifier;
