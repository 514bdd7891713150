//! Phase 2: implementation status from field references.

use tracing::debug;
use vigil_core::{FlagImplStatus, FlagStatus, SourceModel, SourceModelProvider};

use crate::catalog::config_models;
use crate::help::HelpTextRenderer;
use crate::settings::ReconcileSettings;
use crate::text::mentions_flag;
use crate::FlagError;

/// Status from the two independent reference checks.
#[must_use]
pub const fn status_for(in_config: bool, in_main: bool) -> FlagImplStatus {
    match (in_config, in_main) {
        (true, true) => FlagImplStatus::FullyImplemented,
        (true, false) | (false, true) => FlagImplStatus::PartiallyImplemented,
        (false, false) => FlagImplStatus::PlannedNotImplemented,
    }
}

/// Classify against already-parsed models and help text.
pub fn classify_with(
    flags: &mut [FlagStatus],
    settings: &ReconcileSettings,
    config: &[SourceModel],
    main: &SourceModel,
    help: &str,
) {
    let skip = |member: &str| settings.is_registration(member);
    for flag in flags.iter_mut().filter(|f| f.defined_in_code) {
        let field = settings.namer.field_name(&flag.long_form);
        let in_config = config
            .iter()
            .any(|m| m.references_field(&settings.receiver, &field, skip));
        let in_main = main.references_field(&settings.receiver, &field, skip);
        flag.status = status_for(in_config, in_main);
        if mentions_flag(help, &settings.flag_token(&flag.long_form)) {
            flag.defined_in_help = true;
        }
        debug!(flag = %flag.long_form, %field, in_config, in_main, status = %flag.status, "classified flag");
    }
}

/// # Errors
///
/// Fails when the configuration source or main entry cannot be parsed, or
/// the help text cannot be rendered.
pub fn classify(
    flags: &mut [FlagStatus],
    settings: &ReconcileSettings,
    provider: &dyn SourceModelProvider,
    help: &dyn HelpTextRenderer,
) -> Result<(), FlagError> {
    let config = config_models(settings, provider)?;
    let main = provider.model(&settings.main_source)?;
    let text = help.render()?;
    classify_with(flags, settings, &config, &main, &text);
    Ok(())
}
