//! # vigil-parser
//!
//! [`SourceModelProvider`] implementation backed by ast-grep.
//!
//! Go and Rust sources are reduced to the structural records the analysis
//! crates consume: top-level symbols with export and doc-comment state,
//! imports, method-style call shapes and field references.

mod calls;
mod go;
mod grammar;
mod rust;

use std::fs;
use std::path::Path;

use ast_grep_language::{LanguageExt, SupportLang};
use tracing::debug;
use vigil_core::{SourceError, SourceModel, SourceModelProvider};

pub use grammar::detect_language;

/// Provider for `.go` and `.rs` files.
#[derive(Debug, Clone, Copy, Default)]
pub struct AstGrepProvider;

impl AstGrepProvider {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl SourceModelProvider for AstGrepProvider {
    fn supports(&self, path: &Path) -> bool {
        detect_language(path).is_some()
    }

    fn model(&self, path: &Path) -> Result<SourceModel, SourceError> {
        let lang = detect_language(path).ok_or_else(|| SourceError::Unsupported(path.to_path_buf()))?;
        let source = fs::read_to_string(path).map_err(|source| SourceError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(parse_model(path, &source, lang))
    }
}

/// Build a model from in-memory source text.
#[must_use]
pub fn parse_model(path: &Path, source: &str, lang: SupportLang) -> SourceModel {
    let root = lang.ast_grep(source);
    let grammar = grammar::Grammar::for_lang(lang);
    let (symbols, imports) = match lang {
        SupportLang::Rust => (rust::symbols(&root), rust::imports(&root)),
        _ => (go::symbols(&root), go::imports(&root)),
    };
    let model = SourceModel {
        path: path.to_path_buf(),
        language: grammar.name.to_string(),
        symbols,
        imports,
        calls: calls::extract_calls(&root, &grammar),
        field_refs: calls::extract_field_refs(&root, &grammar),
    };
    debug!(
        path = %path.display(),
        symbols = model.symbols.len(),
        calls = model.calls.len(),
        field_refs = model.field_refs.len(),
        "parsed source model"
    );
    model
}
