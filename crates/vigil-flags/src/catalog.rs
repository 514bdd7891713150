//! Phase 1: find flag registrations in the configuration source.

use std::io::ErrorKind;
use std::path::PathBuf;

use tracing::{debug, info};
use vigil_core::{CallShape, FlagStatus, SourceModel, SourceModelProvider};

use crate::settings::ReconcileSettings;
use crate::text::unquote;
use crate::FlagError;

/// Supported source files directly inside the configuration directory,
/// sorted by path.
///
/// # Errors
///
/// [`FlagError::ConfigSourceMissing`] when the directory does not exist,
/// [`FlagError::Read`] when it cannot be listed.
pub fn config_files(
    settings: &ReconcileSettings,
    provider: &dyn SourceModelProvider,
) -> Result<Vec<PathBuf>, FlagError> {
    let dir = &settings.config_dir;
    let entries = std::fs::read_dir(dir).map_err(|e| match e.kind() {
        ErrorKind::NotFound => FlagError::ConfigSourceMissing(dir.clone()),
        _ => FlagError::read(dir, e),
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| FlagError::read(dir, e))?.path();
        if path.is_file() && provider.supports(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Parse every configuration source file.
///
/// # Errors
///
/// See [`config_files`]; parse failures propagate as [`FlagError::Source`].
pub fn config_models(
    settings: &ReconcileSettings,
    provider: &dyn SourceModelProvider,
) -> Result<Vec<SourceModel>, FlagError> {
    config_files(settings, provider)?
        .iter()
        .map(|path| provider.model(path).map_err(FlagError::from))
        .collect()
}

/// One [`FlagStatus`] per recognised registration call, in file then line
/// order.
///
/// # Errors
///
/// Fails when the configuration source is missing or unreadable.
pub fn catalog(
    settings: &ReconcileSettings,
    provider: &dyn SourceModelProvider,
) -> Result<Vec<FlagStatus>, FlagError> {
    let models = config_models(settings, provider)?;
    let mut flags = Vec::new();
    for model in &models {
        for call in &model.calls {
            if let Some(mut flag) = registration(settings, call) {
                flag.location = format!("{}:{}", settings.display_path(&model.path), call.line);
                debug!(flag = %flag.long_form, location = %flag.location, "cataloged flag");
                flags.push(flag);
            }
        }
    }
    info!(files = models.len(), flags = flags.len(), "flag catalog complete");
    Ok(flags)
}

/// Parse one call into a flag, or `None` when it is not a registration.
#[must_use]
pub fn registration(settings: &ReconcileSettings, call: &CallShape) -> Option<FlagStatus> {
    let shape = settings.registration_shape(&call.member)?;
    if call.args.len() < 3 {
        return None;
    }
    let literal = |idx: usize| call.args.get(idx).and_then(|a| unquote(a));

    let long = literal(1).filter(|l| !l.is_empty())?;
    let short = shape
        .short_index()
        .and_then(literal)
        .unwrap_or_default();
    let description = literal(shape.description_index()).unwrap_or_default();
    Some(FlagStatus::declared(long, short, description))
}
