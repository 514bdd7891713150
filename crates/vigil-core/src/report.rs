use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{FlagImplStatus, Severity};
use crate::flag::FlagStatus;
use crate::issue::{Issue, sort_issues};

/// Everything a report renderer consumes from one audit run.
///
/// Issues are always stored in report order (see [`Issue::report_order`]).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct AuditReport {
    pub generated_at: DateTime<Utc>,
    pub issues: Vec<Issue>,
    pub flags: Vec<FlagStatus>,
    pub summary: ReportSummary,
}

/// Counters derived from the issue and flag lists.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ReportSummary {
    pub total_issues: usize,
    /// Keyed by `Severity::as_str()`.
    pub issues_by_severity: BTreeMap<String, usize>,
    pub total_flags: usize,
    /// Keyed by `FlagImplStatus::as_str()`.
    pub flags_by_status: BTreeMap<String, usize>,
    pub flag_conflicts: usize,
}

impl AuditReport {
    #[must_use]
    pub fn new(issues: Vec<Issue>, flags: Vec<FlagStatus>) -> Self {
        Self::at(Utc::now(), issues, flags)
    }

    #[must_use]
    pub fn at(generated_at: DateTime<Utc>, mut issues: Vec<Issue>, flags: Vec<FlagStatus>) -> Self {
        sort_issues(&mut issues);
        let summary = ReportSummary::from_parts(&issues, &flags);
        Self {
            generated_at,
            issues,
            flags,
            summary,
        }
    }

    #[must_use]
    pub fn count_severity(&self, severity: Severity) -> usize {
        self.issues.iter().filter(|i| i.severity == severity).count()
    }
}

impl ReportSummary {
    fn from_parts(issues: &[Issue], flags: &[FlagStatus]) -> Self {
        let mut issues_by_severity = BTreeMap::new();
        for severity in Severity::DESCENDING {
            let n = issues.iter().filter(|i| i.severity == severity).count();
            if n > 0 {
                issues_by_severity.insert(severity.as_str().to_string(), n);
            }
        }

        let mut flags_by_status = BTreeMap::new();
        for status in FlagImplStatus::ALL {
            let n = flags.iter().filter(|f| f.status == status).count();
            if n > 0 {
                flags_by_status.insert(status.as_str().to_string(), n);
            }
        }

        Self {
            total_issues: issues.len(),
            issues_by_severity,
            total_flags: flags.len(),
            flags_by_status,
            flag_conflicts: flags.iter().map(|f| f.conflicts.len()).sum(),
        }
    }
}
