use std::path::{Component, Path, PathBuf};

use crate::WorkspaceError;

/// Validate a workspace-relative path and return its normalized form.
///
/// `.` segments are dropped. `..`, a root, or a drive prefix is a traversal.
pub(crate) fn normalize(rel: &str) -> Result<PathBuf, WorkspaceError> {
    let mut out = PathBuf::new();
    for component in Path::new(rel).components() {
        match component {
            Component::Normal(part) => out.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(WorkspaceError::Traversal(rel.to_string()));
            }
        }
    }
    if out.as_os_str().is_empty() {
        return Err(WorkspaceError::InvalidPath(rel.to_string()));
    }
    Ok(out)
}

/// Join segments onto `root`, ignoring empty segments.
pub(crate) fn join(root: &Path, segments: &[&str]) -> PathBuf {
    segments
        .iter()
        .filter(|s| !s.is_empty())
        .fold(root.to_path_buf(), |acc, s| acc.join(s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("a.txt", "a.txt")]
    #[case("./nested/b.json", "nested/b.json")]
    #[case("x/./y", "x/y")]
    fn accepts_relative(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize(input).unwrap(), PathBuf::from(expected));
    }

    #[rstest]
    #[case("../escape")]
    #[case("a/../../b")]
    #[case("a/..")]
    #[case("/etc/passwd")]
    fn rejects_traversal(#[case] input: &str) {
        assert!(matches!(normalize(input), Err(WorkspaceError::Traversal(_))));
    }

    #[rstest]
    #[case("")]
    #[case(".")]
    fn rejects_empty(#[case] input: &str) {
        assert!(matches!(normalize(input), Err(WorkspaceError::InvalidPath(_))));
    }
}
