//! Pre-order traversal over named syntax nodes.
//!
//! A walk never leaves the subtree it starts on, so the same functions serve
//! both the whole-module pass and the scoped pass over a single call site.

use tree_sitter::Node;

/// Visit `root` and every named descendant exactly once, parents before children.
pub fn walk<'tree>(root: Node<'tree>, mut visit: impl FnMut(Node<'tree>)) {
    walk_until(root, |node| {
        visit(node);
        false
    });
}

/// First named node in pre-order for which `predicate` holds.
pub fn find_first<'tree>(
    root: Node<'tree>,
    mut predicate: impl FnMut(Node<'tree>) -> bool,
) -> Option<Node<'tree>> {
    let mut found = None;
    walk_until(root, |node| {
        if predicate(node) {
            found = Some(node);
            true
        } else {
            false
        }
    });
    found
}

/// Walk until `visit` returns true.
fn walk_until<'tree>(root: Node<'tree>, mut visit: impl FnMut(Node<'tree>) -> bool) {
    let mut cursor = root.walk();
    let mut depth = 0usize;
    loop {
        let node = cursor.node();
        if node.is_named() && visit(node) {
            return;
        }
        if cursor.goto_first_child() {
            depth += 1;
            continue;
        }
        loop {
            if depth == 0 {
                return;
            }
            if cursor.goto_next_sibling() {
                break;
            }
            cursor.goto_parent();
            depth -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::treesitter::ParsedSource;

    #[test]
    fn test_walk_is_preorder_and_named_only() {
        let parsed = ParsedSource::parse("a(b);").unwrap();
        let mut kinds = Vec::new();
        walk(parsed.root(), |n| kinds.push(n.kind()));
        assert_eq!(
            kinds,
            vec![
                "program",
                "expression_statement",
                "call_expression",
                "identifier",
                "arguments",
                "identifier",
            ]
        );
    }

    #[test]
    fn test_walk_stays_inside_subtree() {
        let parsed = ParsedSource::parse("first(x); second(y);").unwrap();
        let first_stmt = parsed.root().named_child(0).unwrap();
        let mut idents = Vec::new();
        walk(first_stmt, |n| {
            if n.kind() == "identifier" {
                idents.push(&parsed.source()[n.byte_range()]);
            }
        });
        assert_eq!(idents, vec!["first", "x"]);
    }

    #[test]
    fn test_walk_single_leaf() {
        let parsed = ParsedSource::parse("x;").unwrap();
        let ident = parsed.root().named_child(0).unwrap().named_child(0).unwrap();
        let mut count = 0;
        walk(ident, |_| count += 1);
        assert_eq!(count, 1);
    }

    #[test]
    fn test_find_first_stops_early() {
        let parsed = ParsedSource::parse("a(); b(); c();").unwrap();
        let mut visited = 0;
        let found = find_first(parsed.root(), |n| {
            visited += 1;
            n.kind() == "call_expression"
        });
        assert!(found.is_some());
        // program, expression_statement, call_expression
        assert_eq!(visited, 3);
    }
}
