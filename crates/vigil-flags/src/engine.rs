use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{info, warn};
use vigil_config::FlagsConfig;
use vigil_core::{
    Category, ConflictType, Effort, FlagImplStatus, FlagStatus, Issue, Priority, Severity,
    SourceModelProvider,
};
use vigil_engine::{Engine, EngineError, RunContext};
use vigil_workspace::Workspace;

use crate::help::HelpTextRenderer;
use crate::reconciler::FlagReconciler;
use crate::settings::ReconcileSettings;
use crate::FlagError;

/// Workspace path of the serialized flag statuses.
pub const STATUS_ARTIFACT: &str = "flags/status.json";

/// Adapts [`FlagReconciler`] to the [`Engine`] contract.
pub struct FlagEngine {
    config: FlagsConfig,
    provider: Arc<dyn SourceModelProvider>,
    help: Arc<dyn HelpTextRenderer>,
    statuses: Mutex<Vec<FlagStatus>>,
}

impl FlagEngine {
    pub fn new(
        config: FlagsConfig,
        provider: Arc<dyn SourceModelProvider>,
        help: Arc<dyn HelpTextRenderer>,
    ) -> Self {
        Self {
            config,
            provider,
            help,
            statuses: Mutex::new(Vec::new()),
        }
    }

    /// Flag statuses from the most recent analysis.
    #[must_use]
    pub fn statuses(&self) -> Vec<FlagStatus> {
        self.statuses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn store(&self, flags: &[FlagStatus]) {
        *self.statuses.lock().unwrap_or_else(PoisonError::into_inner) = flags.to_vec();
    }
}

impl Engine for FlagEngine {
    fn name(&self) -> &str {
        "flags"
    }

    fn analyze(
        &self,
        ctx: &RunContext,
        root: &Path,
        workspace: &dyn Workspace,
    ) -> Result<Vec<Issue>, EngineError> {
        self.store(&[]);
        ctx.check()?;
        let reconciler = FlagReconciler::new(
            ReconcileSettings::from_config(root, &self.config),
            Arc::clone(&self.provider),
            Arc::clone(&self.help),
        );
        let outcome = reconciler
            .run_with(ctx)
            .map_err(|e| EngineError::Other(e.into()))?;

        self.store(&outcome.flags);
        if let Err(e) = write_statuses(workspace, &outcome.flags) {
            warn!(error = %e, "could not write flag statuses to workspace");
        }

        let issues = flag_issues(&outcome.flags, &self.config.flag_marker);
        info!(flags = outcome.flags.len(), issues = issues.len(), "flag engine finished");
        Ok(issues)
    }
}

fn write_statuses(workspace: &dyn Workspace, flags: &[FlagStatus]) -> Result<(), FlagError> {
    let json = serde_json::to_vec_pretty(flags)?;
    workspace.write_file(STATUS_ARTIFACT, &json)?;
    Ok(())
}

/// Findings for a reconciled flag list: one per conflict plus one per
/// partially implemented flag.
#[must_use]
pub fn flag_issues(flags: &[FlagStatus], marker: &str) -> Vec<Issue> {
    let mut issues = Vec::new();
    for flag in flags {
        let token = format!("{marker}{}", flag.long_form);
        for conflict in &flag.conflicts {
            let (id, category, priority, title, suggestion) = match conflict.conflict_type {
                ConflictType::OrphanedFlag => (
                    "FLAG-ORPHANED",
                    Category::Usability,
                    Priority::P1,
                    format!("Orphaned flag {token}"),
                    "List the flag in help output and user documentation, or remove it",
                ),
                ConflictType::DescriptionConflict => (
                    "FLAG-UNDOCUMENTED",
                    Category::Documentation,
                    Priority::P2,
                    format!("Flag {token} missing from user documentation"),
                    "Describe the flag in the user documentation",
                ),
                ConflictType::PlanningMismatch => (
                    "FLAG-PLANNING-MISMATCH",
                    Category::Documentation,
                    Priority::P1,
                    format!("Planned flag {token} is not declared"),
                    "Implement the flag or update the planning documents",
                ),
            };
            issues.push(
                Issue::new(
                    format!("{id}:{}", flag.long_form),
                    category,
                    conflict.severity.as_severity(),
                    priority,
                    title,
                )
                .with_description(conflict.description.clone())
                .with_location(flag.location.clone())
                .with_suggestion(suggestion),
            );
        }

        if flag.status == FlagImplStatus::PartiallyImplemented {
            issues.push(
                Issue::new(
                    format!("FLAG-PARTIAL:{}", flag.long_form),
                    Category::CodeQuality,
                    Severity::Low,
                    Priority::P3,
                    format!("Flag {token} is only partially implemented"),
                )
                .with_description(format!(
                    "{token} is read in only one of the configuration source and the main entry"
                ))
                .with_location(flag.location.clone())
                .with_suggestion("Wire the flag's field through both the configuration and the main entry")
                .with_effort(Effort::Medium),
            );
        }
    }
    issues
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use vigil_core::{ConflictSeverity, FlagConflict, ProvenanceSource};

    use super::*;

    #[test]
    fn conflicts_and_partial_flags_become_issues() {
        let mut orphan = FlagStatus::declared("hidden", "", "");
        orphan.location = "internal/config/flags.go:12".into();
        orphan.conflicts.push(FlagConflict {
            conflict_type: ConflictType::OrphanedFlag,
            source1: ProvenanceSource::Code,
            source2: ProvenanceSource::HelpText,
            description: "orphaned".into(),
            severity: ConflictSeverity::High,
        });
        orphan.status = FlagImplStatus::PartiallyImplemented;

        let issues = flag_issues(&[orphan], "--");
        assert_eq!(issues.len(), 2);

        assert_eq!(issues[0].id, "FLAG-ORPHANED:hidden");
        assert_eq!(issues[0].category, Category::Usability);
        assert_eq!(issues[0].severity, Severity::High);
        assert_eq!(issues[0].priority, Priority::P1);
        assert_eq!(issues[0].location, "internal/config/flags.go:12");

        assert_eq!(issues[1].category, Category::CodeQuality);
        assert_eq!(issues[1].severity, Severity::Low);
        assert_eq!(issues[1].priority, Priority::P3);
    }

    #[test]
    fn clean_flags_yield_nothing() {
        let mut flag = FlagStatus::declared("verbose", "v", "");
        flag.status = FlagImplStatus::FullyImplemented;
        assert!(flag_issues(&[flag], "--").is_empty());
    }
}
