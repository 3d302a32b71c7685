//! Configuration for `amd-deps` scans.
//!
//! Load order: `.amd-deps/config.toml` → environment variables → defaults.

use crate::options::ExtractOptions;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = ".amd-deps";
const CONFIG_FILE: &str = "config.toml";

/// Top-level amd-deps configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AmdConfig {
    pub extract: ExtractOptions,
    pub scan: ScanConfig,
}

/// Which files a directory scan picks up.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// File extensions (without the dot) treated as AMD sources.
    pub extensions: Vec<String>,
    /// Glob patterns a file must match, relative to the scan root. Empty means all.
    pub include: Vec<String>,
    /// Glob patterns that exclude a file, relative to the scan root.
    pub exclude: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["js".to_string()],
            include: Vec::new(),
            exclude: Vec::new(),
        }
    }
}

impl ScanConfig {
    pub fn matches_extension(&self, path: &Path) -> bool {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))
    }
}

/// Path of the config file for a given project root.
pub fn config_file(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_DIR).join(CONFIG_FILE)
}

/// Helper to parse an env var value and apply it to a config field.
fn env_override<T: std::str::FromStr>(value: Option<String>, target: &mut T) {
    if let Some(v) = value
        && let Ok(parsed) = v.trim().parse()
    {
        *target = parsed;
    }
}

impl AmdConfig {
    /// Load config from `.amd-deps/config.toml` in the project root, with env var overrides.
    /// Falls back to defaults if no config file exists.
    pub fn load(project_root: &Path) -> Result<Self> {
        Self::load_with_env(project_root, |var| std::env::var(var).ok())
    }

    /// Same as [`AmdConfig::load`] with an explicit environment lookup.
    pub fn load_with_env(
        project_root: &Path,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let config_path = config_file(project_root);

        let mut config: Self = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("failed to read {}", config_path.display()))?;
            toml::from_str(&content)
                .with_context(|| format!("invalid config in {}", config_path.display()))?
        } else {
            Self::default()
        };

        env_override(
            env("AMD_DEPS_SKIP_LAZY_LOADED"),
            &mut config.extract.skip_lazy_loaded,
        );
        if let Some(list) = env("AMD_DEPS_EXTENSIONS") {
            config.scan.extensions = list
                .split(',')
                .map(|e| e.trim().trim_start_matches('.').to_string())
                .filter(|e| !e.is_empty())
                .collect();
        }

        // Extensions are compared without the leading dot.
        for ext in &mut config.scan.extensions {
            *ext = ext.trim_start_matches('.').to_lowercase();
        }

        if config.scan.extensions.is_empty() {
            anyhow::bail!("scan.extensions must list at least one file extension");
        }

        Ok(config)
    }
}
