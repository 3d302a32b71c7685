//! Regenerate normalized source text for expression nodes.
//!
//! Used as the fallback when a dependency argument is not a plain string,
//! e.g. `define([base + '/util'], ...)` yields `base + '/util'`.

use crate::treesitter::node_text;
use tree_sitter::Node;

/// Normalized source text of an expression. Never fails.
pub fn generate(node: Node<'_>, source: &str) -> String {
    if node.kind() == "parenthesized_expression"
        && let Some(inner) = first_expression(node)
    {
        return generate(inner, source);
    }
    emit(node, source)
}

fn emit(node: Node<'_>, source: &str) -> String {
    match node.kind() {
        "identifier" | "property_identifier" | "private_property_identifier" | "this"
        | "super" | "number" | "true" | "false" | "null" | "undefined" | "regex"
        | "template_string" => node_text(node, source).to_string(),
        "string" => quote(&string_value(node, source)),
        "member_expression" => {
            let (Some(object), Some(property)) = (
                node.child_by_field_name("object"),
                node.child_by_field_name("property"),
            ) else {
                return collapse_whitespace(node_text(node, source));
            };
            let dot = if has_optional_chain(node) { "?." } else { "." };
            format!("{}{}{}", emit(object, source), dot, emit(property, source))
        }
        "subscript_expression" => {
            let (Some(object), Some(index)) = (
                node.child_by_field_name("object"),
                node.child_by_field_name("index"),
            ) else {
                return collapse_whitespace(node_text(node, source));
            };
            let open = if has_optional_chain(node) { "?.[" } else { "[" };
            format!("{}{}{}]", emit(object, source), open, generate(index, source))
        }
        "binary_expression" => {
            let (Some(left), Some(op), Some(right)) = (
                node.child_by_field_name("left"),
                node.child_by_field_name("operator"),
                node.child_by_field_name("right"),
            ) else {
                return collapse_whitespace(node_text(node, source));
            };
            format!(
                "{} {} {}",
                emit(left, source),
                node_text(op, source),
                emit(right, source)
            )
        }
        "parenthesized_expression" => match first_expression(node) {
            Some(inner) => format!("({})", generate(inner, source)),
            None => collapse_whitespace(node_text(node, source)),
        },
        _ => collapse_whitespace(node_text(node, source)),
    }
}

fn first_expression(node: Node<'_>) -> Option<Node<'_>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .find(|child| child.kind() != "comment")
}

fn has_optional_chain(node: Node<'_>) -> bool {
    let mut cursor = node.walk();
    node.children(&mut cursor)
        .any(|child| child.kind() == "optional_chain")
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Single-quoted JavaScript string literal for `value`.
fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out.push('\'');
    out
}

/// Decoded value of a `string` node.
pub fn string_value(node: Node<'_>, source: &str) -> String {
    let mut value = String::new();
    let mut cursor = node.walk();
    for part in node.named_children(&mut cursor) {
        let text = node_text(part, source);
        if part.kind() == "escape_sequence" {
            decode_escape(text, &mut value);
        } else {
            value.push_str(text);
        }
    }
    value
}

fn decode_escape(text: &str, out: &mut String) {
    let Some(body) = text.strip_prefix('\\') else {
        out.push_str(text);
        return;
    };
    let mut chars = body.chars();
    let Some(first) = chars.next() else {
        return;
    };
    match first {
        'n' => out.push('\n'),
        't' => out.push('\t'),
        'r' => out.push('\r'),
        'b' => out.push('\u{8}'),
        'f' => out.push('\u{c}'),
        'v' => out.push('\u{b}'),
        '0' if body.len() == 1 => out.push('\0'),
        // line continuation
        '\n' | '\r' | '\u{2028}' | '\u{2029}' => {}
        'x' => push_code_point(&body[1..], text, out),
        'u' => {
            let hex = body[1..].trim_start_matches('{').trim_end_matches('}');
            push_code_point(hex, text, out);
        }
        _ => out.push_str(body),
    }
}

fn push_code_point(hex: &str, raw: &str, out: &mut String) {
    match u32::from_str_radix(hex, 16).ok().and_then(char::from_u32) {
        Some(ch) => out.push(ch),
        None => out.push_str(raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::call_arguments;
    use crate::treesitter::ParsedSource;
    use crate::walker::find_first;

    /// Generated text of the first argument of the first call in `src`.
    fn gen_arg(src: &str) -> String {
        let parsed = ParsedSource::parse(src).unwrap();
        let call = find_first(parsed.root(), |n| n.kind() == "call_expression").unwrap();
        let arg = call_arguments(call)[0];
        generate(arg, parsed.source())
    }

    fn string_arg(src: &str) -> String {
        let parsed = ParsedSource::parse(src).unwrap();
        let call = find_first(parsed.root(), |n| n.kind() == "call_expression").unwrap();
        string_value(call_arguments(call)[0], parsed.source())
    }

    #[test]
    fn test_identifier() {
        assert_eq!(gen_arg("f(moduleName);"), "moduleName");
    }

    #[test]
    fn test_member_expression() {
        assert_eq!(gen_arg("f(config . paths  .jquery);"), "config.paths.jquery");
        assert_eq!(gen_arg("f(a?.b);"), "a?.b");
    }

    #[test]
    fn test_subscript_expression() {
        assert_eq!(gen_arg("f(paths[ \"lib\" ]);"), "paths['lib']");
    }

    #[test]
    fn test_binary_expression() {
        assert_eq!(gen_arg("f(base+\"/util\");"), "base + '/util'");
        assert_eq!(gen_arg("f((a+b)+c);"), "(a + b) + c");
    }

    #[test]
    fn test_outer_parens_dropped() {
        assert_eq!(gen_arg("f((lib));"), "lib");
    }

    #[test]
    fn test_fallback_collapses_whitespace() {
        assert_eq!(gen_arg("f(cond  ?\n  'a' : 'b');"), "cond ? 'a' : 'b'");
    }

    #[test]
    fn test_template_string_kept() {
        assert_eq!(gen_arg("f(`lib/${name}`);"), "`lib/${name}`");
    }

    #[test]
    fn test_string_value_plain() {
        assert_eq!(string_arg("f('jquery');"), "jquery");
        assert_eq!(string_arg("f(\"\");"), "");
    }

    #[test]
    fn test_string_value_escapes() {
        assert_eq!(string_arg(r#"f("a\"b");"#), "a\"b");
        assert_eq!(string_arg(r"f('it\'s');"), "it's");
        assert_eq!(string_arg(r"f('\x41B\u{43}');"), "ABC");
        assert_eq!(string_arg(r"f('tab\there');"), "tab\there");
    }

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote("it's"), r"'it\'s'");
        assert_eq!(quote("a\\b"), r"'a\\b'");
    }
}
