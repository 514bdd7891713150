//! Call shapes and field references, shared by both grammars.

use ast_grep_core::matcher::KindMatcher;
use ast_grep_core::{AstGrep, Doc, Node};
use ast_grep_language::SupportLang;
use vigil_core::{CallShape, FieldRef};

use crate::grammar::Grammar;

pub(crate) fn extract_calls<D: Doc<Lang = SupportLang>>(
    root: &AstGrep<D>,
    grammar: &Grammar,
) -> Vec<CallShape> {
    let matcher = KindMatcher::new(grammar.call, grammar.lang);
    root.root()
        .find_all(&matcher)
        .filter_map(|call| {
            let (receiver, member) = callee(&call.field("function")?, grammar);
            let args = call
                .field("arguments")
                .map(|list| {
                    list.children()
                        .filter(|c| !grammar.is_punctuation_or_comment(c.kind().as_ref()))
                        .map(|c| c.text().to_string())
                        .collect()
                })
                .unwrap_or_default();
            Some(CallShape {
                receiver,
                member,
                args,
                line: call.start_pos().line() + 1,
            })
        })
        .collect()
}

pub(crate) fn extract_field_refs<D: Doc<Lang = SupportLang>>(
    root: &AstGrep<D>,
    grammar: &Grammar,
) -> Vec<FieldRef> {
    let matcher = KindMatcher::new(grammar.selector, grammar.lang);
    root.root()
        .find_all(&matcher)
        .filter(|node| !is_callee(node, grammar))
        .filter_map(|node| {
            let receiver = node.field(grammar.selector_object)?.text().to_string();
            let field = node.field(grammar.selector_member)?.text().to_string();
            Some(FieldRef {
                receiver,
                field,
                enclosing_call: enclosing_call(&node, grammar),
                line: node.start_pos().line() + 1,
            })
        })
        .collect()
}

/// `(receiver, member)` of a call's function node.
fn callee<D: Doc>(func: &Node<D>, grammar: &Grammar) -> (String, String) {
    let kind = func.kind();
    let text_of = |name: &str| {
        func.field(name)
            .map(|n| n.text().to_string())
            .unwrap_or_default()
    };
    if kind.as_ref() == grammar.selector {
        (text_of(grammar.selector_object), text_of(grammar.selector_member))
    } else if kind.as_ref() == "scoped_identifier" {
        (text_of("path"), text_of("name"))
    } else if kind.as_ref() == "generic_function" {
        func.field("function")
            .map_or_else(|| (String::new(), func.text().to_string()), |f| callee(&f, grammar))
    } else {
        (String::new(), func.text().to_string())
    }
}

/// Whether `node` is the function position of its parent call.
fn is_callee<D: Doc>(node: &Node<D>, grammar: &Grammar) -> bool {
    node.parent().is_some_and(|parent| {
        parent.kind().as_ref() == grammar.call
            && parent
                .field("function")
                .is_some_and(|f| f.range() == node.range())
    })
}

/// Member name of the innermost call whose argument list contains `node`.
fn enclosing_call<D: Doc>(node: &Node<D>, grammar: &Grammar) -> Option<String> {
    let list = node
        .ancestors()
        .find(|a| a.kind().as_ref() == grammar.arguments)?;
    let call = list.parent()?;
    if call.kind().as_ref() != grammar.call {
        return None;
    }
    let (_, member) = callee(&call.field("function")?, grammar);
    Some(member)
}
