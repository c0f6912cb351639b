//! External-tool implementations of the capability traits.

pub mod dcm2niix;
pub mod mail;
pub mod mris_convert;
pub mod output;
pub mod recon_all;

pub use dcm2niix::Dcm2Niix;
pub use mail::MailNotifier;
pub use mris_convert::MrisConvert;
pub use recon_all::ReconAll;
