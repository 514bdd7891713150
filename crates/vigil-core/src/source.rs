//! Structural source model.
//!
//! Analysis code asks a [`SourceModelProvider`] for a [`SourceModel`] and
//! works only against these records: declared symbols, imports, call shapes
//! and field references. Which parser produced them is invisible here.

use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::SourceError;

/// Kind of a top-level declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    Function,
    Method,
    Type,
    Constant,
    Variable,
}

impl SymbolKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Function => "function",
            Self::Method => "method",
            Self::Type => "type",
            Self::Constant => "constant",
            Self::Variable => "variable",
        }
    }
}

impl std::fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A declared symbol and its documentation state.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SourceSymbol {
    pub name: String,
    pub kind: SymbolKind,
    pub exported: bool,
    pub documented: bool,
    /// 1-based.
    pub line: usize,
}

/// A method-style call `receiver.member(args...)`.
///
/// Free-function calls have an empty `receiver`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CallShape {
    pub receiver: String,
    pub member: String,
    /// Positional argument source texts, verbatim.
    pub args: Vec<String>,
    pub line: usize,
}

/// A field read `receiver.field` that is not itself the callee of a call.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct FieldRef {
    pub receiver: String,
    pub field: String,
    /// Member name of the innermost call whose arguments contain this
    /// reference, if any.
    pub enclosing_call: Option<String>,
    pub line: usize,
}

/// Structural view of one source file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SourceModel {
    pub path: PathBuf,
    pub language: String,
    pub symbols: Vec<SourceSymbol>,
    pub imports: Vec<String>,
    pub calls: Vec<CallShape>,
    pub field_refs: Vec<FieldRef>,
}

impl SourceModel {
    /// Exported symbols that carry no documentation comment.
    pub fn undocumented_exports(&self) -> impl Iterator<Item = &SourceSymbol> {
        self.symbols.iter().filter(|s| s.exported && !s.documented)
    }

    /// Whether `receiver.field` is read anywhere outside a call whose member
    /// satisfies `skip_call`.
    pub fn references_field<F>(&self, receiver: &str, field: &str, skip_call: F) -> bool
    where
        F: Fn(&str) -> bool,
    {
        self.field_refs.iter().any(|r| {
            r.receiver == receiver
                && r.field == field
                && !r.enclosing_call.as_deref().is_some_and(&skip_call)
        })
    }
}

/// Supplies structural models for source files.
pub trait SourceModelProvider: Send + Sync {
    /// Whether this provider understands the file (usually by extension).
    fn supports(&self, path: &Path) -> bool;

    /// Parse `path` into a model.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Unsupported`] for files [`supports`](Self::supports)
    /// rejects, [`SourceError::Read`] when the file cannot be read.
    fn model(&self, path: &Path) -> Result<SourceModel, SourceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_ref(receiver: &str, field: &str, call: Option<&str>) -> FieldRef {
        FieldRef {
            receiver: receiver.into(),
            field: field.into(),
            enclosing_call: call.map(Into::into),
            line: 1,
        }
    }

    #[test]
    fn references_field_skips_excluded_calls() {
        let model = SourceModel {
            field_refs: vec![field_ref("cfg", "Verbose", Some("BoolVarP"))],
            ..SourceModel::default()
        };
        assert!(!model.references_field("cfg", "Verbose", |m| m.ends_with("Var") || m.ends_with("VarP")));
        assert!(model.references_field("cfg", "Verbose", |_| false));
    }

    #[test]
    fn references_field_matches_receiver_and_field() {
        let model = SourceModel {
            field_refs: vec![
                field_ref("opts", "Verbose", None),
                field_ref("cfg", "Quiet", Some("Println")),
            ],
            ..SourceModel::default()
        };
        assert!(!model.references_field("cfg", "Verbose", |_| false));
        assert!(model.references_field("cfg", "Quiet", |m| m == "BoolVar"));
    }

    #[test]
    fn undocumented_exports_filters_private_and_documented() {
        let sym = |name: &str, exported, documented| SourceSymbol {
            name: name.into(),
            kind: SymbolKind::Function,
            exported,
            documented,
            line: 1,
        };
        let model = SourceModel {
            symbols: vec![sym("A", true, true), sym("b", false, false), sym("C", true, false)],
            ..SourceModel::default()
        };
        let names: Vec<_> = model.undocumented_exports().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["C"]);
    }
}
