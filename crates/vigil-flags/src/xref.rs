//! Phase 3: user docs, planning docs and ghost flags.

use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::PathBuf;

use regex::Regex;
use tracing::debug;
use vigil_core::FlagStatus;

use crate::settings::ReconcileSettings;
use crate::text::mentions_flag;
use crate::FlagError;

/// Concatenate the given documents, newline separated. Missing files are
/// skipped.
///
/// # Errors
///
/// Any read failure other than not-found.
pub fn read_blob(paths: &[PathBuf]) -> Result<String, FlagError> {
    let mut blob = String::new();
    for path in paths {
        match std::fs::read_to_string(path) {
            Ok(text) => {
                blob.push_str(&text);
                blob.push('\n');
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "document not found, skipping");
            }
            Err(e) => return Err(FlagError::read(path, e)),
        }
    }
    Ok(blob)
}

/// Flag-shaped tokens (`--name`) in first-occurrence order, without the
/// marker and deduplicated. A token runs to the next non-flag character and
/// is dropped whole if it is not lowercase kebab-case.
///
/// # Errors
///
/// Only if `marker` produces an invalid pattern, which escaping prevents.
pub fn flag_tokens(text: &str, marker: &str) -> Result<Vec<String>, FlagError> {
    let re = Regex::new(&format!(
        r"(?:^|[^A-Za-z0-9_-]){}([A-Za-z0-9_-]+)",
        regex::escape(marker)
    ))?;
    let mut seen = HashSet::new();
    Ok(re
        .captures_iter(text)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str())
        .filter(|t| is_flag_name(t))
        .map(str::to_string)
        .filter(|t| seen.insert(t.clone()))
        .collect())
}

/// `[a-z][a-z0-9-]*[a-z0-9]`
fn is_flag_name(token: &str) -> bool {
    let bytes = token.as_bytes();
    match (bytes.first(), bytes.last()) {
        (Some(first), Some(last)) if bytes.len() >= 2 => {
            first.is_ascii_lowercase()
                && (last.is_ascii_lowercase() || last.is_ascii_digit())
                && bytes
                    .iter()
                    .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || *b == b'-')
        }
        _ => false,
    }
}

/// Mark docs/planning presence and append ghost flags.
///
/// # Errors
///
/// See [`flag_tokens`].
pub fn cross_reference_with(
    flags: &mut Vec<FlagStatus>,
    settings: &ReconcileSettings,
    user_docs: &str,
    planning: &str,
) -> Result<(), FlagError> {
    for flag in flags.iter_mut() {
        let token = settings.flag_token(&flag.long_form);
        flag.defined_in_docs = mentions_flag(user_docs, &token);
        flag.defined_in_planning = mentions_flag(planning, &token);
    }

    let known: HashSet<String> = flags.iter().map(|f| f.long_form.clone()).collect();
    for token in flag_tokens(planning, &settings.flag_marker)? {
        if !known.contains(&token) {
            debug!(flag = %token, "ghost flag from planning docs");
            let mut ghost = FlagStatus::ghost(token);
            ghost.defined_in_docs = mentions_flag(user_docs, &settings.flag_token(&ghost.long_form));
            flags.push(ghost);
        }
    }
    Ok(())
}

/// # Errors
///
/// Fails when a present document cannot be read.
pub fn cross_reference(
    flags: &mut Vec<FlagStatus>,
    settings: &ReconcileSettings,
) -> Result<(), FlagError> {
    let user_docs = read_blob(&settings.user_docs)?;
    let planning = read_blob(&settings.planning_docs)?;
    cross_reference_with(flags, settings, &user_docs, &planning)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use pretty_assertions::assert_eq;
    use vigil_config::FlagsConfig;
    use vigil_core::FlagImplStatus;

    use super::*;

    #[test]
    fn tokens_are_deduplicated_in_order() {
        let text = "Add --watch mode.\nLater: --cache-dir, then --watch again. Not -x or x--y.\n\
                    Nor --dry_run or --outputDir.";
        assert_eq!(flag_tokens(text, "--").unwrap(), vec!["watch", "cache-dir"]);
    }

    #[test]
    fn tokens_need_two_characters_and_no_trailing_dash() {
        assert_eq!(flag_tokens("--a --ab --bad- --2x", "--").unwrap(), vec!["ab"]);
    }

    #[test]
    fn non_kebab_tokens_are_not_ghosts() {
        let settings = ReconcileSettings::from_config(Path::new("/p"), &FlagsConfig::default());
        let mut flags = Vec::new();
        cross_reference_with(
            &mut flags,
            &settings,
            "",
            "Plan: support --dry_run and --outputDir.",
        )
        .unwrap();
        assert!(flags.is_empty(), "{flags:?}");
    }

    #[test]
    fn ghosts_only_for_uncataloged_tokens() {
        let settings = ReconcileSettings::from_config(Path::new("/p"), &FlagsConfig::default());
        let mut flags = vec![FlagStatus::declared("verbose", "v", "")];
        cross_reference_with(
            &mut flags,
            &settings,
            "Use --verbose.",
            "Keep --verbose. Add --watch.",
        )
        .unwrap();

        assert_eq!(flags.len(), 2);
        assert!(flags[0].defined_in_docs);
        assert!(flags[0].defined_in_planning);
        let ghost = &flags[1];
        assert_eq!(ghost.long_form, "watch");
        assert_eq!(ghost.status, FlagImplStatus::PlannedNotImplemented);
        assert!(ghost.defined_in_planning);
        assert!(!ghost.defined_in_code);
    }

    #[test]
    fn blob_skips_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let readme = dir.path().join("README.md");
        std::fs::write(&readme, "use --json").unwrap();
        let blob = read_blob(&[dir.path().join("absent.md"), readme]).unwrap();
        assert_eq!(blob, "use --json\n");
    }

    #[test]
    fn blob_fails_on_unreadable_entry() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_blob(&[dir.path().to_path_buf()]).unwrap_err();
        assert!(matches!(err, FlagError::Read { .. }));
    }
}
