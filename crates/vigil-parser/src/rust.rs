//! Rust symbols and imports.

use ast_grep_core::matcher::KindMatcher;
use ast_grep_core::ops::Any;
use ast_grep_core::{AstGrep, Doc, Node};
use ast_grep_language::SupportLang;
use vigil_core::{SourceSymbol, SymbolKind};

const RUST_ITEM_KINDS: &[(&str, SymbolKind)] = &[
    ("function_item", SymbolKind::Function),
    ("struct_item", SymbolKind::Type),
    ("enum_item", SymbolKind::Type),
    ("trait_item", SymbolKind::Type),
    ("type_item", SymbolKind::Type),
    ("const_item", SymbolKind::Constant),
    ("static_item", SymbolKind::Variable),
];

pub(crate) fn symbols<D: Doc<Lang = SupportLang>>(root: &AstGrep<D>) -> Vec<SourceSymbol> {
    let matcher = Any::new(
        RUST_ITEM_KINDS
            .iter()
            .map(|(k, _)| KindMatcher::new(k, SupportLang::Rust))
            .collect::<Vec<_>>(),
    );
    let mut out = Vec::new();
    for node in root.root().find_all(&matcher) {
        let node_kind = node.kind();
        let Some(base) = RUST_ITEM_KINDS
            .iter()
            .find(|(k, _)| *k == node_kind.as_ref())
            .map(|(_, kind)| *kind)
        else {
            continue;
        };
        let kind = match placement(&node) {
            Placement::TopLevel => base,
            Placement::ImplOrTrait if base == SymbolKind::Function => SymbolKind::Method,
            Placement::ImplOrTrait | Placement::Nested => continue,
        };
        let Some(name) = node.field("name").map(|n| n.text().to_string()) else {
            continue;
        };
        out.push(SourceSymbol {
            name,
            kind,
            exported: node
                .children()
                .any(|c| c.kind().as_ref() == "visibility_modifier"),
            documented: has_doc_comment(&node),
            line: node.start_pos().line() + 1,
        });
    }
    out
}

pub(crate) fn imports<D: Doc<Lang = SupportLang>>(root: &AstGrep<D>) -> Vec<String> {
    let matcher = KindMatcher::new("use_declaration", SupportLang::Rust);
    root.root()
        .find_all(&matcher)
        .filter_map(|decl| decl.field("argument"))
        .map(|arg| arg.text().to_string())
        .collect()
}

enum Placement {
    TopLevel,
    ImplOrTrait,
    Nested,
}

fn placement<D: Doc>(node: &Node<D>) -> Placement {
    let Some(parent) = node.parent() else {
        return Placement::Nested;
    };
    match parent.kind().as_ref() {
        "source_file" => Placement::TopLevel,
        "declaration_list" => match parent.parent() {
            Some(owner) if matches!(owner.kind().as_ref(), "impl_item" | "trait_item") => {
                Placement::ImplOrTrait
            }
            _ => Placement::Nested,
        },
        _ => Placement::Nested,
    }
}

/// An outer doc comment (`///` or `/** */`) above the item, looking past
/// attributes.
fn has_doc_comment<D: Doc>(node: &Node<D>) -> bool {
    let mut current = node.prev();
    while let Some(sibling) = current {
        let kind = sibling.kind();
        match kind.as_ref() {
            "attribute_item" => {}
            "line_comment" => return sibling.text().starts_with("///"),
            "block_comment" => return sibling.text().starts_with("/**"),
            _ => return false,
        }
        current = sibling.prev();
    }
    false
}
