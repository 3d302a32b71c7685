//! Extract AMD dependencies from a parsed module.
//!
//! Two passes: the module walk collects every define/require call site with
//! its sniffed form, then each site is resolved on its own. Resolving a site
//! may run a second walk confined to that call's subtree to pick up nested
//! `require` calls.

use crate::classify::{
    array_elements, call_arguments, is_array, is_define, is_function, is_require,
    is_top_level_require,
};
use crate::codegen::{generate, string_value};
use crate::module_type::{form_of, form_of_tree};
use crate::treesitter::{ParsedSource, Source};
use crate::walker::walk;
use amd_core::report::dedupe;
use amd_core::{AmdForm, DependencyList, DetectiveError, ExtractOptions, FileReport};
use rayon::prelude::*;
use std::path::PathBuf;
use tree_sitter::Node;

/// A define/require call found by the module walk.
#[derive(Debug, Clone, Copy)]
pub struct CallSite<'tree> {
    pub node: Node<'tree>,
    pub form: AmdForm,
    pub top_level: bool,
}

/// Dependencies referenced by one AMD source unit, de-duplicated in
/// first-discovery order.
///
/// `None` is rejected with [`DetectiveError::InvalidInput`]; empty text
/// returns an empty list without parsing. Parse failures propagate unchanged.
pub fn extract(
    source: Option<Source<'_>>,
    options: &ExtractOptions,
) -> Result<DependencyList, DetectiveError> {
    let Some(source) = source else {
        return Err(DetectiveError::missing_source());
    };
    match source {
        Source::Text("") => Ok(Vec::new()),
        Source::Text(text) => {
            let parsed = ParsedSource::parse(text)?;
            Ok(extract_from_tree(&parsed, options))
        }
        Source::Tree(parsed) => Ok(extract_from_tree(parsed, options)),
    }
}

/// [`extract`] for source text.
pub fn extract_source(
    text: &str,
    options: &ExtractOptions,
) -> Result<DependencyList, DetectiveError> {
    extract(Some(text.into()), options)
}

/// Dependencies plus the module's form, for one file.
pub fn extract_report(
    path: impl Into<PathBuf>,
    text: &str,
    options: &ExtractOptions,
) -> Result<FileReport, DetectiveError> {
    let path = path.into();
    if text.is_empty() {
        return Ok(FileReport {
            path,
            form: AmdForm::Unknown,
            dependencies: Vec::new(),
        });
    }
    let parsed = ParsedSource::parse(text)?;
    let form = form_of_tree(&parsed);
    let dependencies = extract_from_tree(&parsed, options);
    tracing::debug!(
        "{}: {} form, {} dependencies",
        path.display(),
        form,
        dependencies.len()
    );
    Ok(FileReport {
        path,
        form,
        dependencies,
    })
}

/// Extract many files in parallel. Output order matches input order.
pub fn extract_files_parallel(
    files: Vec<(PathBuf, String)>,
    options: &ExtractOptions,
) -> Vec<Result<FileReport, (PathBuf, DetectiveError)>> {
    files
        .into_par_iter()
        .map(|(path, text)| {
            extract_report(path.clone(), &text, options).map_err(|e| (path, e))
        })
        .collect()
}

/// Run both passes over an already parsed module.
pub fn extract_from_tree(parsed: &ParsedSource, options: &ExtractOptions) -> DependencyList {
    let source = parsed.source();
    let dependencies = call_sites(parsed, options)
        .into_iter()
        .flat_map(|site| site_dependencies(site, source, options))
        .collect();
    dedupe(dependencies)
}

/// First pass: every call site that can contribute dependencies, in pre-order.
pub fn call_sites<'tree>(
    parsed: &'tree ParsedSource,
    options: &ExtractOptions,
) -> Vec<CallSite<'tree>> {
    let source = parsed.source();
    let mut sites = Vec::new();
    walk(parsed.root(), |node| {
        let top_level = is_top_level_require(node, source);
        let require = is_require(node, source);
        if !top_level && !require && !is_define(node, source) {
            return;
        }

        let form = form_of(node, source);

        // Nested requires are lazy loads, except in REM modules where they are
        // the only way dependencies get declared.
        if !top_level && require && form != AmdForm::Rem && options.skip_lazy_loaded {
            tracing::debug!(
                "skipping lazy require at line {}",
                node.start_position().row + 1
            );
            return;
        }

        sites.push(CallSite {
            node,
            form,
            top_level,
        });
    });
    sites
}

/// Second pass: dependencies contributed by one call site.
pub fn site_dependencies(
    site: CallSite<'_>,
    source: &str,
    options: &ExtractOptions,
) -> DependencyList {
    let args = call_arguments(site.node);
    let Some(declared_at) = site.form.deps_argument() else {
        return match site.form {
            AmdForm::Factory | AmdForm::Rem => lazy_loaded_deps(site.node, source),
            _ => Vec::new(),
        };
    };

    let mut deps = match args.get(declared_at) {
        // `define('name', function () {})`: the factory is not a dependency list
        Some(&arg) if !is_function(arg) => element_values(arg, source),
        _ => Vec::new(),
    };
    if !options.skip_lazy_loaded {
        deps.extend(lazy_loaded_deps(site.node, source));
    }
    deps
}

/// Dependencies from every `require` call inside `node`, including `node` itself.
///
/// Handles both `require('x')` and `require(['x', 'y'])`.
pub fn lazy_loaded_deps(node: Node<'_>, source: &str) -> DependencyList {
    let mut deps = Vec::new();
    walk(node, |inner| {
        if !is_require(inner, source) {
            return;
        }
        if let Some(&first) = call_arguments(inner).first() {
            deps.extend(element_values(first, source));
        }
    });
    deps
}

/// Non-empty values of an array's elements, or the single value of any other node.
pub fn element_values(node: Node<'_>, source: &str) -> DependencyList {
    if is_array(node) {
        array_elements(node)
            .into_iter()
            .map(|el| evaluated_value(el, source))
            .filter(|dep| !dep.is_empty())
            .collect()
    } else {
        let dep = evaluated_value(node, source);
        if dep.is_empty() { Vec::new() } else { vec![dep] }
    }
}

/// The dependency string an expression stands for.
///
/// Strings yield their value. Calls are computed at runtime and yield an
/// empty string, as do falsy literals. Everything else is regenerated source.
pub fn evaluated_value(node: Node<'_>, source: &str) -> String {
    match node.kind() {
        "string" => string_value(node, source),
        "call_expression" | "null" | "false" | "undefined" => String::new(),
        _ => generate(node, source),
    }
}
