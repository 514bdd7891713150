//! Classification and status enums for findings, flags, and snapshots.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`
//! except `Priority`, which keeps its `P0`..`P3` labels. Each enum exposes
//! `as_str()` for the stable string form used in reports.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// Area of concern a finding belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    CodeQuality,
    Documentation,
    Testing,
    Security,
    Performance,
    Usability,
}

impl Category {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CodeQuality => "code_quality",
            Self::Documentation => "documentation",
            Self::Testing => "testing",
            Self::Security => "security",
            Self::Performance => "performance",
            Self::Usability => "usability",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

/// Severity of a finding.
///
/// Variants are declared in ascending order so the derived `Ord` gives
/// `Critical > High > Medium > Low > Info`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// All severities, most severe first.
    pub const DESCENDING: [Self; 5] = [
        Self::Critical,
        Self::High,
        Self::Medium,
        Self::Low,
        Self::Info,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

/// Remediation priority. `P0` is the most urgent and sorts first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
pub enum Priority {
    P0,
    P1,
    P2,
    P3,
}

impl Priority {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::P0 => "P0",
            Self::P1 => "P1",
            Self::P2 => "P2",
            Self::P3 => "P3",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Effort
// ---------------------------------------------------------------------------

/// Estimated remediation effort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Effort {
    Small,
    Medium,
    Large,
}

impl Effort {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }
}

impl fmt::Display for Effort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// IssueStatus
// ---------------------------------------------------------------------------

/// Remediation status of a finding. New findings start as `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum IssueStatus {
    #[default]
    Pending,
    InProgress,
    Resolved,
    WontFix,
}

impl IssueStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Resolved => "resolved",
            Self::WontFix => "wont_fix",
        }
    }
}

impl fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// FlagImplStatus
// ---------------------------------------------------------------------------

/// Implementation verdict for a declared command-line flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FlagImplStatus {
    /// Field is read by both the configuration source and the main entry.
    FullyImplemented,
    /// Field is read by exactly one of the two sources.
    PartiallyImplemented,
    /// Field is read nowhere, or the flag exists only in planning docs.
    PlannedNotImplemented,
    /// Flag is wired but known to misbehave.
    NeedsRepair,
}

impl FlagImplStatus {
    pub const ALL: [Self; 4] = [
        Self::FullyImplemented,
        Self::PartiallyImplemented,
        Self::PlannedNotImplemented,
        Self::NeedsRepair,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FullyImplemented => "fully_implemented",
            Self::PartiallyImplemented => "partially_implemented",
            Self::PlannedNotImplemented => "planned_not_implemented",
            Self::NeedsRepair => "needs_repair",
        }
    }
}

impl fmt::Display for FlagImplStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ConflictType / ConflictSeverity / ProvenanceSource
// ---------------------------------------------------------------------------

/// Kind of cross-source disagreement detected for a flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ConflictType {
    /// Declared in code, absent from help text and user docs.
    OrphanedFlag,
    /// Declared in code, absent from user docs.
    DescriptionConflict,
    /// Mentioned in planning docs, not declared in code.
    PlanningMismatch,
}

impl ConflictType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OrphanedFlag => "orphaned_flag",
            Self::DescriptionConflict => "description_conflict",
            Self::PlanningMismatch => "planning_mismatch",
        }
    }
}

impl fmt::Display for ConflictType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity attached to a flag conflict.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ConflictSeverity {
    Medium,
    High,
    Critical,
}

impl ConflictSeverity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    /// Map onto the finding severity scale.
    #[must_use]
    pub const fn as_severity(self) -> Severity {
        match self {
            Self::Medium => Severity::Medium,
            Self::High => Severity::High,
            Self::Critical => Severity::Critical,
        }
    }
}

impl fmt::Display for ConflictSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a piece of evidence about a flag came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ProvenanceSource {
    Code,
    HelpText,
    UserDocs,
    Planning,
}

impl ProvenanceSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Code => "code",
            Self::HelpText => "help_text",
            Self::UserDocs => "user_docs",
            Self::Planning => "planning",
        }
    }
}

impl fmt::Display for ProvenanceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// SnapshotStatus
// ---------------------------------------------------------------------------

/// Lifecycle of a report snapshot.
///
/// ```text
/// active → archived
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotStatus {
    Active,
    Archived,
}

impl SnapshotStatus {
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Active => &[Self::Archived],
            Self::Archived => &[],
        }
    }

    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Archived => "archived",
        }
    }
}

impl fmt::Display for SnapshotStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn severity_orders_critical_highest() {
        assert!(Severity::Critical > Severity::High);
        assert!(Severity::High > Severity::Medium);
        assert!(Severity::Medium > Severity::Low);
        assert!(Severity::Low > Severity::Info);
    }

    #[test]
    fn priority_orders_p0_first() {
        let mut priorities = vec![Priority::P3, Priority::P0, Priority::P2, Priority::P1];
        priorities.sort();
        assert_eq!(
            priorities,
            vec![Priority::P0, Priority::P1, Priority::P2, Priority::P3]
        );
    }

    #[test]
    fn serde_forms_match_as_str() {
        let json = serde_json::to_string(&Category::CodeQuality).unwrap();
        assert_eq!(json, "\"code_quality\"");
        let json = serde_json::to_string(&Priority::P2).unwrap();
        assert_eq!(json, "\"P2\"");
        let json = serde_json::to_string(&FlagImplStatus::PlannedNotImplemented).unwrap();
        assert_eq!(json, format!("\"{}\"", FlagImplStatus::PlannedNotImplemented));
    }

    #[test]
    fn issue_status_defaults_to_pending() {
        assert_eq!(IssueStatus::default(), IssueStatus::Pending);
    }

    #[test]
    fn snapshot_transitions() {
        assert!(SnapshotStatus::Active.can_transition_to(SnapshotStatus::Archived));
        assert!(!SnapshotStatus::Archived.can_transition_to(SnapshotStatus::Active));
    }

    #[test]
    fn conflict_severity_maps_onto_issue_severity() {
        assert_eq!(ConflictSeverity::High.as_severity(), Severity::High);
        assert_eq!(ConflictSeverity::Medium.as_severity(), Severity::Medium);
    }
}
