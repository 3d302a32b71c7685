//! Options accepted by a single extraction call.

use serde::{Deserialize, Serialize};

/// Per-call extraction options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    /// Omit dependencies that only appear through `require` calls nested in a
    /// factory body. REM modules are exempt: inner requires are how they
    /// declare dependencies at all.
    pub skip_lazy_loaded: bool,
}

impl ExtractOptions {
    pub fn skip_lazy_loaded() -> Self {
        Self {
            skip_lazy_loaded: true,
        }
    }
}
