//! Server-side export of a frame range and delivery of the result.
mod controller;
mod download;
mod kind;


pub use controller::{ExportController, ExportOutcome, ExportSettings, ExportStatus};
pub use download::{Downloads, RELEASE_GRACE, StagedExport, discard, release_after};
pub use kind::ExportKind;
