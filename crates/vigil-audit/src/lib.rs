//! # vigil-audit
//!
//! Reference orchestration over the vigil crates.
//!
//! [`AuditPipeline`] builds a runner from [`vigil_config::VigilConfig`],
//! runs the registered engines against a project root and hands back a
//! pre-sorted [`vigil_core::AuditReport`]. Run workspaces the runner fails to
//! dispose are handed to a tracker so [`AuditPipeline::housekeeping`] can
//! reclaim them. [`telemetry::init_tracing`] installs the log subscriber.

pub mod error;
pub mod pipeline;
pub mod telemetry;

pub use error::AuditError;
pub use pipeline::{AuditOutcome, AuditPipeline, HousekeepingReport};
pub use telemetry::init_tracing;
