//! Phase 4: cross-source conflicts.

use tracing::debug;
use vigil_core::{ConflictSeverity, ConflictType, FlagConflict, FlagStatus, ProvenanceSource};

use crate::settings::ReconcileSettings;

/// Append conflicts to each flag.
///
/// Orphaned and description conflicts are exclusive within one call.
/// Conflicts are never cleared, so running this twice duplicates them.
pub fn detect_conflicts(flags: &mut [FlagStatus], settings: &ReconcileSettings) {
    for flag in flags.iter_mut() {
        let token = settings.flag_token(&flag.long_form);
        if flag.defined_in_code && !flag.defined_in_help && !flag.defined_in_docs {
            flag.conflicts.push(FlagConflict {
                conflict_type: ConflictType::OrphanedFlag,
                source1: ProvenanceSource::Code,
                source2: ProvenanceSource::HelpText,
                description: format!(
                    "{token} is declared in code but appears in neither help text nor user documentation"
                ),
                severity: ConflictSeverity::High,
            });
        } else if flag.defined_in_code && !flag.defined_in_docs {
            flag.conflicts.push(FlagConflict {
                conflict_type: ConflictType::DescriptionConflict,
                source1: ProvenanceSource::Code,
                source2: ProvenanceSource::UserDocs,
                description: format!("{token} is declared in code but missing from user documentation"),
                severity: ConflictSeverity::Medium,
            });
        }

        if flag.defined_in_planning && !flag.defined_in_code {
            flag.conflicts.push(FlagConflict {
                conflict_type: ConflictType::PlanningMismatch,
                source1: ProvenanceSource::Planning,
                source2: ProvenanceSource::Code,
                description: format!("{token} is planned but not declared in code"),
                severity: ConflictSeverity::High,
            });
        }
        if !flag.conflicts.is_empty() {
            debug!(flag = %flag.long_form, conflicts = flag.conflicts.len(), "flag conflicts");
        }
    }
}
