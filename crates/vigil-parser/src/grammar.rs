//! Per-language node kinds used by the shared call and field extraction.

use std::path::Path;

use ast_grep_language::SupportLang;

pub(crate) struct Grammar {
    pub name: &'static str,
    pub lang: SupportLang,
    pub call: &'static str,
    /// `receiver.member` expression.
    pub selector: &'static str,
    pub selector_object: &'static str,
    pub selector_member: &'static str,
    pub arguments: &'static str,
    pub comments: &'static [&'static str],
}

impl Grammar {
    pub(crate) const fn for_lang(lang: SupportLang) -> Self {
        match lang {
            SupportLang::Rust => Self {
                name: "rust",
                lang: SupportLang::Rust,
                call: "call_expression",
                selector: "field_expression",
                selector_object: "value",
                selector_member: "field",
                arguments: "arguments",
                comments: &["line_comment", "block_comment"],
            },
            _ => Self {
                name: "go",
                lang: SupportLang::Go,
                call: "call_expression",
                selector: "selector_expression",
                selector_object: "operand",
                selector_member: "field",
                arguments: "argument_list",
                comments: &["comment"],
            },
        }
    }

    pub(crate) fn is_punctuation_or_comment(&self, kind: &str) -> bool {
        matches!(kind, "(" | ")" | ",") || self.comments.contains(&kind)
    }
}

/// Language for a path, by extension. Only Go and Rust are supported.
#[must_use]
pub fn detect_language(path: &Path) -> Option<SupportLang> {
    match path.extension()?.to_str()? {
        "go" => Some(SupportLang::Go),
        "rs" => Some(SupportLang::Rust),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("cmd/main.go", Some(SupportLang::Go))]
    #[case("src/lib.rs", Some(SupportLang::Rust))]
    #[case("README.md", None)]
    #[case("Makefile", None)]
    fn detects_supported_extensions(#[case] path: &str, #[case] expected: Option<SupportLang>) {
        assert_eq!(detect_language(Path::new(path)), expected);
    }

    #[test]
    fn punctuation_and_comments_are_not_arguments() {
        let go = Grammar::for_lang(SupportLang::Go);
        assert!(go.is_punctuation_or_comment(","));
        assert!(go.is_punctuation_or_comment("comment"));
        assert!(!go.is_punctuation_or_comment("interpreted_string_literal"));
        let rust = Grammar::for_lang(SupportLang::Rust);
        assert!(rust.is_punctuation_or_comment("line_comment"));
    }
}
