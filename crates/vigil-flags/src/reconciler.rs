use std::sync::Arc;

use tracing::{info, warn};
use vigil_core::{FlagStatus, SourceModelProvider};
use vigil_engine::RunContext;

use crate::help::HelpTextRenderer;
use crate::settings::ReconcileSettings;
use crate::{FlagError, Phase, catalog, classify, conflicts, validate, xref};

/// Result of a full reconciliation.
#[derive(Debug, Default)]
pub struct Reconciliation {
    pub flags: Vec<FlagStatus>,
    /// Later-phase failures that were logged and skipped.
    pub skipped: Vec<FlagError>,
}

/// Runs the five phases in order over one target program.
///
/// Only cataloging is fatal. Later phase failures are logged, recorded in
/// [`Reconciliation::skipped`] and the next phase runs on what exists.
pub struct FlagReconciler {
    settings: ReconcileSettings,
    provider: Arc<dyn SourceModelProvider>,
    help: Arc<dyn HelpTextRenderer>,
}

impl FlagReconciler {
    pub fn new(
        settings: ReconcileSettings,
        provider: Arc<dyn SourceModelProvider>,
        help: Arc<dyn HelpTextRenderer>,
    ) -> Self {
        Self {
            settings,
            provider,
            help,
        }
    }

    #[must_use]
    pub const fn settings(&self) -> &ReconcileSettings {
        &self.settings
    }

    /// # Errors
    ///
    /// Phase-qualified error from cataloging.
    pub fn catalog(&self) -> Result<Vec<FlagStatus>, FlagError> {
        catalog::catalog(&self.settings, self.provider.as_ref())
            .map_err(|e| e.in_phase(Phase::Catalog))
    }

    /// # Errors
    ///
    /// Phase-qualified error from classification.
    pub fn classify(&self, flags: &mut [FlagStatus]) -> Result<(), FlagError> {
        classify::classify(flags, &self.settings, self.provider.as_ref(), self.help.as_ref())
            .map_err(|e| e.in_phase(Phase::Classify))
    }

    /// # Errors
    ///
    /// Phase-qualified error from reading documents.
    pub fn cross_reference(&self, flags: &mut Vec<FlagStatus>) -> Result<(), FlagError> {
        xref::cross_reference(flags, &self.settings).map_err(|e| e.in_phase(Phase::CrossReference))
    }

    pub fn detect_conflicts(&self, flags: &mut [FlagStatus]) {
        conflicts::detect_conflicts(flags, &self.settings);
    }

    /// # Errors
    ///
    /// Phase-qualified error from rendering help.
    pub fn validate(&self, flags: &mut [FlagStatus]) -> Result<(), FlagError> {
        validate::validate(flags, &self.settings, self.help.as_ref())
            .map_err(|e| e.in_phase(Phase::Validate))
    }

    /// All phases without cancellation.
    ///
    /// # Errors
    ///
    /// Only when cataloging fails.
    pub fn run(&self) -> Result<Reconciliation, FlagError> {
        self.run_with(&RunContext::new())
    }

    /// All phases, stopping between phases once `ctx` is cancelled.
    ///
    /// # Errors
    ///
    /// When cataloging fails, or when cancelled before cataloging finished.
    pub fn run_with(&self, ctx: &RunContext) -> Result<Reconciliation, FlagError> {
        if ctx.is_cancelled() {
            return Err(FlagError::Cancelled.in_phase(Phase::Catalog));
        }
        let mut out = Reconciliation {
            flags: self.catalog()?,
            skipped: Vec::new(),
        };

        for phase in &Phase::ALL[1..] {
            if ctx.is_cancelled() {
                warn!(%phase, "reconciliation cancelled");
                out.skipped.push(FlagError::Cancelled.in_phase(*phase));
                break;
            }
            let result = match phase {
                Phase::Classify => self.classify(&mut out.flags),
                Phase::CrossReference => self.cross_reference(&mut out.flags),
                Phase::DetectConflicts => {
                    self.detect_conflicts(&mut out.flags);
                    Ok(())
                }
                Phase::Validate => self.validate(&mut out.flags),
                Phase::Catalog => Ok(()),
            };
            if let Err(e) = result {
                warn!(error = %e, "reconciliation phase failed, continuing");
                out.skipped.push(e);
            }
        }

        info!(
            flags = out.flags.len(),
            skipped = out.skipped.len(),
            "flag reconciliation complete"
        );
        Ok(out)
    }
}
