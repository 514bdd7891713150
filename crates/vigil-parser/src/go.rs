//! Go symbols and imports.

use ast_grep_core::matcher::KindMatcher;
use ast_grep_core::ops::Any;
use ast_grep_core::{AstGrep, Doc, Node};
use ast_grep_language::SupportLang;
use vigil_core::{SourceSymbol, SymbolKind};

const GO_TOP_KINDS: &[&str] = &[
    "function_declaration",
    "method_declaration",
    "type_declaration",
    "const_declaration",
    "var_declaration",
];

pub(crate) fn symbols<D: Doc<Lang = SupportLang>>(root: &AstGrep<D>) -> Vec<SourceSymbol> {
    let matcher = Any::new(
        GO_TOP_KINDS
            .iter()
            .map(|k| KindMatcher::new(k, SupportLang::Go))
            .collect::<Vec<_>>(),
    );
    let mut out = Vec::new();
    for node in root.root().find_all(&matcher) {
        if !is_top_level(&node) {
            continue;
        }
        let kind = node.kind();
        match kind.as_ref() {
            "function_declaration" => push_named(&mut out, &node, &node, SymbolKind::Function),
            "method_declaration" => push_named(&mut out, &node, &node, SymbolKind::Method),
            "type_declaration" => push_specs(&mut out, &node, "type_spec", SymbolKind::Type),
            "const_declaration" => push_specs(&mut out, &node, "const_spec", SymbolKind::Constant),
            "var_declaration" => push_specs(&mut out, &node, "var_spec", SymbolKind::Variable),
            _ => {}
        }
    }
    out
}

pub(crate) fn imports<D: Doc<Lang = SupportLang>>(root: &AstGrep<D>) -> Vec<String> {
    let matcher = KindMatcher::new("import_spec", SupportLang::Go);
    root.root()
        .find_all(&matcher)
        .filter_map(|spec| spec.field("path"))
        .map(|path| path.text().trim_matches(|c| c == '"' || c == '`').to_string())
        .collect()
}

fn is_top_level<D: Doc>(node: &Node<D>) -> bool {
    node.parent()
        .is_some_and(|p| p.kind().as_ref() == "source_file")
}

/// Specs may sit directly under the declaration or inside a parenthesized
/// group (`const ( ... )`).
fn push_specs<D: Doc>(out: &mut Vec<SourceSymbol>, decl: &Node<D>, spec_kind: &str, kind: SymbolKind) {
    for child in decl.children() {
        if child.kind().as_ref() == spec_kind {
            push_named(out, decl, &child, kind);
        } else {
            for spec in child.children().filter(|c| c.kind().as_ref() == spec_kind) {
                push_named(out, decl, &spec, kind);
            }
        }
    }
}

fn push_named<D: Doc>(out: &mut Vec<SourceSymbol>, decl: &Node<D>, named: &Node<D>, kind: SymbolKind) {
    let Some(name) = named.field("name").map(|n| n.text().to_string()) else {
        return;
    };
    out.push(SourceSymbol {
        exported: name.starts_with(char::is_uppercase),
        documented: has_doc_comment(named) || has_doc_comment(decl),
        line: named.start_pos().line() + 1,
        name,
        kind,
    });
}

/// A `//` or `/* */` comment immediately preceding the node.
fn has_doc_comment<D: Doc>(node: &Node<D>) -> bool {
    node.prev().is_some_and(|prev| {
        prev.kind().as_ref() == "comment"
            && prev.end_pos().line() + 1 >= node.start_pos().line()
    })
}
