//! Syntactic predicates over AMD call sites.
//!
//! All predicates are structural: they look at node kinds and identifier
//! text only, never at scoping, so a shadowed `define` still counts.

use crate::treesitter::node_text;
use tree_sitter::Node;

/// The callee of a call expression.
fn callee(node: Node<'_>) -> Option<Node<'_>> {
    if node.kind() != "call_expression" {
        return None;
    }
    node.child_by_field_name("function")
}

fn is_identifier(node: Node<'_>, source: &str, name: &str) -> bool {
    node.kind() == "identifier" && node_text(node, source) == name
}

/// `define(...)`
pub fn is_define(node: Node<'_>, source: &str) -> bool {
    callee(node).is_some_and(|c| is_identifier(c, source, "define"))
}

/// `require(...)` or `require.main.require(...)`
pub fn is_require(node: Node<'_>, source: &str) -> bool {
    let Some(c) = callee(node) else {
        return false;
    };
    is_identifier(c, source, "require") || is_main_scoped_require(c, source)
}

fn is_main_scoped_require(callee: Node<'_>, source: &str) -> bool {
    if callee.kind() != "member_expression" {
        return false;
    }
    let (Some(object), Some(property)) = (
        callee.child_by_field_name("object"),
        callee.child_by_field_name("property"),
    ) else {
        return false;
    };
    if node_text(property, source) != "require" || object.kind() != "member_expression" {
        return false;
    }
    let inner_object = object.child_by_field_name("object");
    let inner_property = object.child_by_field_name("property");
    inner_object.is_some_and(|o| is_identifier(o, source, "require"))
        && inner_property.is_some_and(|p| node_text(p, source) == "main")
}

/// A require call that forms a whole statement directly in the program body.
pub fn is_top_level_require(node: Node<'_>, source: &str) -> bool {
    if !is_require(node, source) {
        return false;
    }
    let Some(stmt) = node.parent() else {
        return false;
    };
    stmt.kind() == "expression_statement" && stmt.parent().is_some_and(|p| p.kind() == "program")
}

/// Argument expressions of a call, comments removed.
pub fn call_arguments(node: Node<'_>) -> Vec<Node<'_>> {
    match node.child_by_field_name("arguments") {
        Some(args) if args.kind() == "arguments" => expression_children(args),
        _ => Vec::new(),
    }
}

/// Elements of an array literal, comments removed. Holes produce no node.
pub fn array_elements(node: Node<'_>) -> Vec<Node<'_>> {
    expression_children(node)
}

fn expression_children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| child.kind() != "comment")
        .collect()
}

pub fn is_array(node: Node<'_>) -> bool {
    node.kind() == "array"
}

pub fn is_string(node: Node<'_>) -> bool {
    node.kind() == "string"
}

pub fn is_object(node: Node<'_>) -> bool {
    node.kind() == "object"
}

/// Function expressions and arrow functions; both serve as AMD factories.
pub fn is_function(node: Node<'_>) -> bool {
    matches!(node.kind(), "function_expression" | "arrow_function")
}

/// Formal parameters of a function expression or arrow function.
pub fn function_params(node: Node<'_>) -> Vec<Node<'_>> {
    if let Some(params) = node.child_by_field_name("parameters") {
        return expression_children(params);
    }
    // `x => ...` has a single bare parameter
    node.child_by_field_name("parameter").into_iter().collect()
}
