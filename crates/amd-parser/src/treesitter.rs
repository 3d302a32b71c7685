//! Tree-sitter integration for JavaScript parsing.

use amd_core::DetectiveError;
use tree_sitter::{Node, Tree};

/// The JavaScript grammar every AMD source is parsed with.
pub fn javascript() -> tree_sitter::Language {
    tree_sitter_javascript::LANGUAGE.into()
}

/// Source text paired with its syntax tree.
#[derive(Debug, Clone)]
pub struct ParsedSource {
    source: String,
    tree: Tree,
}

impl ParsedSource {
    /// Parse JavaScript source text, rejecting trees that contain syntax errors.
    pub fn parse(source: impl Into<String>) -> Result<Self, DetectiveError> {
        let source = source.into();
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&javascript())
            .map_err(|e| DetectiveError::Grammar(e.to_string()))?;
        let tree = parser
            .parse(source.as_bytes(), None)
            .ok_or_else(|| DetectiveError::Grammar("parser produced no tree".to_string()))?;

        if let Some(bad) = first_error(tree.root_node()) {
            let pos = bad.start_position();
            return Err(DetectiveError::Syntax {
                line: pos.row + 1,
                column: pos.column + 1,
            });
        }

        Ok(Self { source, tree })
    }

    /// Wrap a tree that was built elsewhere. The tree is used as-is.
    pub fn from_tree(source: impl Into<String>, tree: Tree) -> Self {
        Self {
            source: source.into(),
            tree,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }
}

/// Input accepted by the extraction entry points.
#[derive(Debug, Clone, Copy)]
pub enum Source<'a> {
    Text(&'a str),
    Tree(&'a ParsedSource),
}

impl<'a> From<&'a str> for Source<'a> {
    fn from(text: &'a str) -> Self {
        Source::Text(text)
    }
}

impl<'a> From<&'a ParsedSource> for Source<'a> {
    fn from(parsed: &'a ParsedSource) -> Self {
        Source::Tree(parsed)
    }
}

/// First `ERROR` or `MISSING` node in pre-order.
fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(bad) = first_error(child) {
            return Some(bad);
        }
    }
    None
}

/// Text covered by a node.
pub fn node_text<'s>(node: Node<'_>, source: &'s str) -> &'s str {
    source.get(node.byte_range()).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_source() {
        let parsed = ParsedSource::parse("define(['a'], function (a) {});").unwrap();
        assert_eq!(parsed.root().kind(), "program");
        assert!(!parsed.root().has_error());
    }

    #[test]
    fn test_parse_reports_error_location() {
        let err = ParsedSource::parse("var a = 1;\n)").unwrap_err();
        match err {
            DetectiveError::Syntax { line, .. } => assert_eq!(line, 2),
            other => panic!("expected syntax error, got {:?}", other),
        }
    }

    #[test]
    fn test_from_tree_skips_validation() {
        let mut parser = tree_sitter::Parser::new();
        parser.set_language(&javascript()).unwrap();
        let src = "define([";
        let tree = parser.parse(src, None).unwrap();
        let parsed = ParsedSource::from_tree(src, tree);
        assert!(parsed.root().has_error());
        assert_eq!(parsed.source(), src);
    }

    #[test]
    fn test_node_text() {
        let parsed = ParsedSource::parse("foo.bar;").unwrap();
        let stmt = parsed.root().child(0).unwrap();
        assert_eq!(node_text(stmt, parsed.source()), "foo.bar;");
    }
}
