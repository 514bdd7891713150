use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{ConflictSeverity, ConflictType, FlagImplStatus, ProvenanceSource};

/// Reconciliation record for one declared command-line flag.
///
/// Created by cataloging (or as a ghost entry during cross-referencing) and
/// mutated in place by every later reconciliation phase.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct FlagStatus {
    /// Long form without the flag marker, e.g. `dry-run`.
    pub name: String,
    pub long_form: String,
    /// Empty for long-only registrations.
    #[serde(default)]
    pub short_form: String,
    #[serde(default)]
    pub description: String,
    pub status: FlagImplStatus,
    pub defined_in_code: bool,
    pub defined_in_help: bool,
    pub defined_in_docs: bool,
    pub defined_in_planning: bool,
    pub test_coverage: bool,
    #[serde(default)]
    pub actual_behavior: String,
    /// Source location of the registration call, `file:line`.
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub conflicts: Vec<FlagConflict>,
}

impl FlagStatus {
    /// A flag found in a registration call.
    #[must_use]
    pub fn declared(
        long_form: impl Into<String>,
        short_form: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let long_form = long_form.into();
        Self {
            name: long_form.clone(),
            long_form,
            short_form: short_form.into(),
            description: description.into(),
            status: FlagImplStatus::PlannedNotImplemented,
            defined_in_code: true,
            defined_in_help: false,
            defined_in_docs: false,
            defined_in_planning: false,
            test_coverage: false,
            actual_behavior: String::new(),
            location: String::new(),
            conflicts: Vec::new(),
        }
    }

    /// A flag mentioned in planning text but never declared in code.
    #[must_use]
    pub fn ghost(long_form: impl Into<String>) -> Self {
        let mut flag = Self::declared(long_form, "", "");
        flag.defined_in_code = false;
        flag.defined_in_planning = true;
        flag
    }

    #[must_use]
    pub fn has_conflict(&self, kind: ConflictType) -> bool {
        self.conflicts.iter().any(|c| c.conflict_type == kind)
    }
}

/// A disagreement between two provenance sources about one flag.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct FlagConflict {
    pub conflict_type: ConflictType,
    pub source1: ProvenanceSource,
    pub source2: ProvenanceSource,
    /// Plain text, safe to embed directly in rendered reports.
    pub description: String,
    pub severity: ConflictSeverity,
}
