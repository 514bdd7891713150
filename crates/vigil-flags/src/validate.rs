//! Phase 5: observed help output.

use vigil_core::{FlagImplStatus, FlagStatus};

use crate::help::HelpTextRenderer;
use crate::settings::ReconcileSettings;
use crate::text::mentions_flag;
use crate::FlagError;

pub const LISTED_IN_HELP: &str = "flag is accepted and listed in help output";
pub const MISSING_FROM_HELP: &str = "flag is missing from help output";

/// Record observed behavior for every flag not already planned-only.
pub fn validate_with(flags: &mut [FlagStatus], settings: &ReconcileSettings, help: &str) {
    for flag in flags
        .iter_mut()
        .filter(|f| f.status != FlagImplStatus::PlannedNotImplemented)
    {
        let listed = mentions_flag(help, &settings.flag_token(&flag.long_form));
        let behavior = if listed { LISTED_IN_HELP } else { MISSING_FROM_HELP };
        flag.actual_behavior = behavior.to_string();
        flag.test_coverage = listed;
    }
}

/// # Errors
///
/// Fails when the help text cannot be rendered.
pub fn validate(
    flags: &mut [FlagStatus],
    settings: &ReconcileSettings,
    help: &dyn HelpTextRenderer,
) -> Result<(), FlagError> {
    let text = help.render()?;
    validate_with(flags, settings, &text);
    Ok(())
}
