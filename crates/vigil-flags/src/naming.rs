//! Flag name to configuration field name.
//!
//! An exact-match override table is consulted first. Everything else goes
//! through a pure transform chosen by [`FieldNaming`].

use std::collections::BTreeMap;

use vigil_config::FieldNaming;

/// Maps flag long forms onto the field names the program reads them through.
#[derive(Debug, Clone, Default)]
pub struct FieldNamer {
    overrides: BTreeMap<String, String>,
    naming: FieldNaming,
}

impl FieldNamer {
    #[must_use]
    pub const fn new(overrides: BTreeMap<String, String>, naming: FieldNaming) -> Self {
        Self { overrides, naming }
    }

    /// Add or replace an override.
    #[must_use]
    pub fn with_override(mut self, flag: impl Into<String>, field: impl Into<String>) -> Self {
        self.overrides.insert(flag.into(), field.into());
        self
    }

    #[must_use]
    pub fn field_name(&self, flag: &str) -> String {
        if let Some(field) = self.overrides.get(flag) {
            return field.clone();
        }
        match self.naming {
            FieldNaming::Pascal => pascal_case(flag),
            FieldNaming::Snake => snake_case(flag),
        }
    }
}

fn is_separator(c: char) -> bool {
    matches!(c, '-' | '_' | '.' | ' ')
}

/// `dry-run` -> `DryRun`.
#[must_use]
pub fn pascal_case(flag: &str) -> String {
    flag.split(is_separator)
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect::<String>()
            })
        })
        .collect()
}

/// `dry-run` -> `dry_run`.
#[must_use]
pub fn snake_case(flag: &str) -> String {
    flag.split(is_separator)
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}
