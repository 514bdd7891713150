//! # vigil-core
//!
//! Core types and error types for vigil.
//!
//! This crate provides the records shared by every other vigil crate:
//! - `Issue` findings produced by analysis engines
//! - `FlagStatus` / `FlagConflict` records produced by flag reconciliation
//! - Status and classification enums with stable string forms
//! - `SnapshotInfo` for the artifact retention layout
//! - `AuditReport`, the pre-sorted handoff to report renderers
//! - The structural source-model seam (`SourceModel`, `SourceModelProvider`)
//!   that keeps analysis logic independent of any concrete parser

pub mod enums;
pub mod errors;
pub mod flag;
pub mod issue;
pub mod report;
pub mod snapshot;
pub mod source;

pub use enums::{
    Category, ConflictSeverity, ConflictType, Effort, FlagImplStatus, IssueStatus, Priority,
    ProvenanceSource, Severity, SnapshotStatus,
};
pub use errors::{CoreError, SourceError};
pub use flag::{FlagConflict, FlagStatus};
pub use issue::{Issue, sort_issues};
pub use report::{AuditReport, ReportSummary};
pub use snapshot::SnapshotInfo;
pub use source::{
    CallShape, FieldRef, SourceModel, SourceModelProvider, SourceSymbol, SymbolKind,
};
