//! Dependency lists and per-file reports.

use crate::form::AmdForm;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

/// Dependency strings in first-discovery order.
pub type DependencyList = Vec<String>;

/// Remove duplicates, keeping the position of each string's first occurrence.
pub fn dedupe(mut deps: DependencyList) -> DependencyList {
    let mut seen = HashSet::with_capacity(deps.len());
    deps.retain(|dep| seen.insert(dep.clone()));
    deps
}

/// Extraction result for one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReport {
    pub path: PathBuf,
    /// Form of the first recognizable define/require call in the file.
    pub form: AmdForm,
    pub dependencies: DependencyList,
}
