//! Cross-cutting error types for vigil.
//!
//! Domain-specific errors (`WorkspaceError`, `RetentionError`, `FlagError`)
//! live in their own crates. `AuditError` in `vigil-audit` is where they
//! converge.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can be raised by any vigil crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Data failed validation (format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Errors raised while building a structural source model.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The provider has no grammar for this file.
    #[error("unsupported source file: {}", .0.display())]
    Unsupported(PathBuf),

    /// The file could not be read.
    #[error("reading {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The parser rejected the file.
    #[error("parsing {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_read_error_names_path() {
        let err = SourceError::Read {
            path: PathBuf::from("cfg/flags.go"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(err.to_string(), "reading cfg/flags.go: gone");
    }
}
