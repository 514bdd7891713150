//! # vigil-flags
//!
//! Flag reconciliation: decides, for every command-line flag a target
//! program registers, whether it is wired through, listed in help output,
//! documented, and consistent with planning documents.
//!
//! Five phases run in order over a shared `Vec<FlagStatus>`:
//! [`catalog`], [`classify`], [`cross_reference`], [`detect_conflicts`] and
//! [`validate`]. [`FlagReconciler`] orchestrates them and [`FlagEngine`]
//! plugs the result into the analysis runner.

pub mod catalog;
pub mod classify;
pub mod conflicts;
pub mod engine;
pub mod error;
pub mod help;
pub mod naming;
pub mod reconciler;
pub mod settings;
pub mod text;
pub mod validate;
pub mod xref;

pub use catalog::catalog;
pub use classify::classify;
pub use conflicts::detect_conflicts;
pub use engine::{FlagEngine, STATUS_ARTIFACT, flag_issues};
pub use error::{FlagError, Phase};
pub use help::{CommandHelpRenderer, HelpTextRenderer, StaticHelpText};
pub use naming::FieldNamer;
pub use reconciler::{FlagReconciler, Reconciliation};
pub use settings::{ReconcileSettings, RegistrationShape};
pub use validate::validate;
pub use xref::cross_reference;
