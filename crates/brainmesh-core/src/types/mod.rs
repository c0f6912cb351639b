//! Domain types shared by the pipeline and the CLI.

pub mod email;
pub mod input;
pub mod job;
pub mod message;
pub mod report;
pub mod stage;

pub use email::EmailAddress;
pub use input::{Hemisphere, InputKind, SurfacePair};
pub use job::JobParams;
pub use message::OutgoingMessage;
pub use report::{RunReport, StageReport};
pub use stage::StageContext;
