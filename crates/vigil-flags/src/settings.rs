use std::path::{Path, PathBuf};

use vigil_config::FlagsConfig;

use crate::naming::FieldNamer;

/// Registration call shapes recognised by the catalog phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationShape {
    /// `StringVarP(&cfg.Output, "output", "o", "", "desc")`
    LongShort,
    /// `StringVar(&cfg.Output, "output", "", "desc")`
    LongOnly,
}

impl RegistrationShape {
    /// Argument index of the short form, if the shape has one.
    #[must_use]
    pub const fn short_index(self) -> Option<usize> {
        match self {
            Self::LongShort => Some(2),
            Self::LongOnly => None,
        }
    }

    #[must_use]
    pub const fn description_index(self) -> usize {
        match self {
            Self::LongShort => 4,
            Self::LongOnly => 3,
        }
    }
}

/// Target-program layout for one reconciliation, resolved against a root.
#[derive(Debug, Clone)]
pub struct ReconcileSettings {
    pub root: PathBuf,
    pub config_dir: PathBuf,
    pub main_source: PathBuf,
    pub user_docs: Vec<PathBuf>,
    pub planning_docs: Vec<PathBuf>,
    pub receiver: String,
    pub flag_marker: String,
    pub registration_suffix: String,
    pub short_marker: String,
    pub namer: FieldNamer,
}

impl ReconcileSettings {
    #[must_use]
    pub fn from_config(root: &Path, config: &FlagsConfig) -> Self {
        let resolve = |p: &PathBuf| root.join(p);
        Self {
            root: root.to_path_buf(),
            config_dir: resolve(&config.config_source),
            main_source: resolve(&config.main_source),
            user_docs: config.user_docs.iter().map(resolve).collect(),
            planning_docs: config.planning_docs.iter().map(resolve).collect(),
            receiver: config.receiver.clone(),
            flag_marker: config.flag_marker.clone(),
            registration_suffix: config.registration_suffix.clone(),
            short_marker: config.short_marker.clone(),
            namer: FieldNamer::new(config.field_overrides.clone(), config.field_naming),
        }
    }

    /// Shape of a call by its member name. Long+short is checked first since
    /// its suffix extends the long-only one.
    #[must_use]
    pub fn registration_shape(&self, member: &str) -> Option<RegistrationShape> {
        let suffix = self.registration_suffix.as_str();
        let short = format!("{suffix}{}", self.short_marker);
        if !self.short_marker.is_empty() && member.ends_with(&short) {
            Some(RegistrationShape::LongShort)
        } else if member.ends_with(suffix) {
            Some(RegistrationShape::LongOnly)
        } else {
            None
        }
    }

    #[must_use]
    pub fn is_registration(&self, member: &str) -> bool {
        self.registration_shape(member).is_some()
    }

    /// `verbose` -> `--verbose`.
    #[must_use]
    pub fn flag_token(&self, long_form: &str) -> String {
        format!("{}{long_form}", self.flag_marker)
    }

    /// Path shown in issue locations, relative to the root when possible.
    #[must_use]
    pub fn display_path(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .display()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> ReconcileSettings {
        ReconcileSettings::from_config(Path::new("/proj"), &FlagsConfig::default())
    }

    #[test]
    fn shapes_by_member_suffix() {
        let s = settings();
        assert_eq!(s.registration_shape("StringVarP"), Some(RegistrationShape::LongShort));
        assert_eq!(s.registration_shape("BoolVar"), Some(RegistrationShape::LongOnly));
        assert_eq!(s.registration_shape("Println"), None);
    }

    #[test]
    fn paths_resolve_against_root() {
        let s = settings();
        assert_eq!(s.config_dir, PathBuf::from("/proj/internal/config"));
        assert_eq!(s.main_source, PathBuf::from("/proj/main.go"));
        assert_eq!(s.display_path(&s.main_source), "main.go");
        assert_eq!(s.flag_token("dry-run"), "--dry-run");
    }
}
