//! Sniff which AMD form a call site uses.

use crate::classify::{
    call_arguments, function_params, is_array, is_define, is_function, is_object, is_require,
    is_string,
};
use crate::treesitter::{ParsedSource, node_text};
use crate::walker::find_first;
use amd_core::{AmdForm, DetectiveError};
use tree_sitter::Node;

/// Classify a call node. Anything that is not a recognizable AMD call is `Unknown`.
///
/// Checks run in a fixed order, so `define(function (require) {})` is REM
/// rather than a plain factory.
pub fn form_of(node: Node<'_>, source: &str) -> AmdForm {
    if is_define(node, source) {
        let args = call_arguments(node);
        let Some(&first) = args.first() else {
            return AmdForm::Unknown;
        };
        if is_string(first) {
            AmdForm::Named
        } else if is_array(first) {
            AmdForm::Deps
        } else if is_rem_factory(first, source) {
            AmdForm::Rem
        } else if args.len() == 1 && is_function(first) {
            AmdForm::Factory
        } else if is_object(first) {
            AmdForm::NoDeps
        } else {
            AmdForm::Unknown
        }
    } else if is_require(node, source) && call_arguments(node).first().is_some_and(|&a| is_array(a)) {
        AmdForm::Driver
    } else {
        AmdForm::Unknown
    }
}

const REM_PARAMS: [&str; 3] = ["require", "exports", "module"];

/// `function (require[, exports[, module]]) { ... }`
fn is_rem_factory(node: Node<'_>, source: &str) -> bool {
    if !is_function(node) {
        return false;
    }
    let params = function_params(node);
    (1..=REM_PARAMS.len()).contains(&params.len())
        && params.iter().zip(REM_PARAMS).all(|(param, expected)| {
            param.kind() == "identifier" && node_text(*param, source) == expected
        })
}

/// Form of the first define/require call in the tree that has a known form.
pub fn form_of_tree(parsed: &ParsedSource) -> AmdForm {
    let source = parsed.source();
    find_first(parsed.root(), |node| form_of(node, source).is_known())
        .map_or(AmdForm::Unknown, |node| form_of(node, source))
}

/// Parse `source` and report the form of its first AMD call.
pub fn form_of_source(source: &str) -> Result<AmdForm, DetectiveError> {
    if source.is_empty() {
        return Ok(AmdForm::Unknown);
    }
    let parsed = ParsedSource::parse(source)?;
    Ok(form_of_tree(&parsed))
}
