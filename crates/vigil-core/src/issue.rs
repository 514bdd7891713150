use std::cmp::Ordering;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{Category, Effort, IssueStatus, Priority, Severity};

/// A single finding produced by an analysis engine.
///
/// Issues are built with [`Issue::new`] plus the `with_*` builders and are
/// treated as immutable once handed to a collector.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Issue {
    /// Stable category code, e.g. `FLAG-ORPHANED`.
    pub id: String,
    pub category: Category,
    pub severity: Severity,
    pub priority: Priority,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// `file:line` or a bare path. Empty when the finding is not tied to a file.
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub suggestion: String,
    pub effort: Effort,
    #[serde(default)]
    pub status: IssueStatus,
}

impl Issue {
    /// Create a pending issue with small effort and empty free-text fields.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        category: Category,
        severity: Severity,
        priority: Priority,
        title: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            category,
            severity,
            priority,
            title: title.into(),
            description: String::new(),
            location: String::new(),
            suggestion: String::new(),
            effort: Effort::Small,
            status: IssueStatus::Pending,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = suggestion.into();
        self
    }

    #[must_use]
    pub const fn with_effort(mut self, effort: Effort) -> Self {
        self.effort = effort;
        self
    }

    /// Report ordering: priority ascending (P0 first), then severity
    /// descending (Critical first).
    #[must_use]
    pub fn report_order(&self, other: &Self) -> Ordering {
        self.priority
            .cmp(&other.priority)
            .then_with(|| other.severity.cmp(&self.severity))
    }
}

/// Sort issues into report order. The sort is stable, so issues with equal
/// priority and severity keep their collection order.
pub fn sort_issues(issues: &mut [Issue]) {
    issues.sort_by(Issue::report_order);
}
