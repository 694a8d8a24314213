//! Service layer: the ingest pipeline and its report/error types.
//!
//! Domain logic lives here, separated from CLI and web concerns so both
//! interfaces drive the same pipeline.

pub mod ingest;

pub use ingest::{IngestError, IngestReport, IngestService};
