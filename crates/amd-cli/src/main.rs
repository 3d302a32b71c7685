//! CLI binary for amd-deps: list the dependencies declared by AMD modules.

use amd_core::config::{AmdConfig, ScanConfig};
use amd_core::{ExtractOptions, FileReport};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "amd-deps", about = "List dependencies of AMD modules")]
struct Cli {
    /// Project root used to load .amd-deps/config.toml (defaults to current directory)
    #[arg(short, long, global = true)]
    project: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the dependencies of each file
    Deps {
        /// Files or directories to scan (defaults to the project root)
        paths: Vec<PathBuf>,

        /// Omit requires nested in factory bodies (REM modules excepted)
        #[arg(long)]
        skip_lazy_loaded: bool,

        /// Glob patterns to include files (repeatable)
        #[arg(long)]
        include: Vec<String>,

        /// Glob patterns to exclude files (repeatable)
        #[arg(long)]
        exclude: Vec<String>,

        /// Emit a JSON array of reports instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print the AMD form of a file (named, deps, driver, factory, rem, nodeps, unknown)
    Form {
        /// Source file
        path: PathBuf,
    },
}

fn get_project_root(cli: &Cli) -> Result<PathBuf> {
    match &cli.project {
        Some(p) => Ok(p.clone()),
        None => std::env::current_dir().context("failed to get current directory"),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let project_root = get_project_root(&cli)?;

    match cli.command {
        Commands::Deps {
            paths,
            skip_lazy_loaded,
            include,
            exclude,
            json,
        } => {
            let mut config = AmdConfig::load(&project_root)?;
            config.extract.skip_lazy_loaded |= skip_lazy_loaded;
            config.scan.include.extend(include);
            config.scan.exclude.extend(exclude);
            let paths = if paths.is_empty() {
                vec![project_root]
            } else {
                paths
            };
            cmd_deps(&paths, &config, json)
        }
        Commands::Form { path } => cmd_form(&path),
    }
}

fn build_globset(patterns: &[String], flag: &str) -> Result<Option<globset::GlobSet>> {
    if patterns.is_empty() {
        return Ok(None);
    }
    let mut builder = globset::GlobSetBuilder::new();
    for p in patterns {
        let glob =
            globset::Glob::new(p).with_context(|| format!("invalid {} glob: {}", flag, p))?;
        builder.add(glob);
    }
    Ok(Some(
        builder
            .build()
            .with_context(|| format!("invalid {} glob set", flag))?,
    ))
}

/// Source files gathered by a scan.
#[derive(Debug, Default)]
struct Collected {
    files: Vec<(PathBuf, String)>,
    /// Paths that could not be walked or read.
    failures: usize,
}

impl Collected {
    fn read(&mut self, path: &Path) {
        match std::fs::read_to_string(path) {
            Ok(source) => self.files.push((path.to_path_buf(), source)),
            Err(e) => {
                tracing::warn!("failed to read {}: {}", path.display(), e);
                self.failures += 1;
            }
        }
    }
}

/// Collect source files under `roots` matching the scan config.
///
/// Files named directly are always taken; directories are walked honoring
/// .gitignore and `.amd-depsignore`. Missing roots, walk errors and unreadable
/// files are logged and counted, not fatal.
fn collect_source_files(roots: &[PathBuf], scan: &ScanConfig) -> Result<Collected> {
    use indicatif::{ProgressBar, ProgressStyle};

    let include_set = build_globset(&scan.include, "--include")?;
    let exclude_set = build_globset(&scan.exclude, "--exclude")?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .map_err(|e| anyhow::anyhow!("invalid spinner template: {:?}", e))?,
    );
    spinner.set_message("Scanning files...");

    let mut collected = Collected::default();

    for root in roots {
        if root.is_file() {
            collected.read(root);
            continue;
        }
        if !root.is_dir() {
            tracing::warn!("{}: no such file or directory", root.display());
            collected.failures += 1;
            continue;
        }

        let walker = ignore::WalkBuilder::new(root)
            .hidden(true)
            .git_ignore(true)
            .add_custom_ignore_filename(".amd-depsignore")
            .build();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("{}: {}", root.display(), e);
                    collected.failures += 1;
                    continue;
                }
            };
            let path = entry.path();
            if !path.is_file() || !scan.matches_extension(path) {
                continue;
            }
            let rel_path = path.strip_prefix(root).unwrap_or(path);
            if let Some(ref inc) = include_set
                && !inc.is_match(rel_path)
            {
                continue;
            }
            if let Some(ref exc) = exclude_set
                && exc.is_match(rel_path)
            {
                continue;
            }

            collected.read(path);
            spinner.set_message(format!("{} files collected", collected.files.len()));
            spinner.tick();
        }
    }
    spinner.finish_and_clear();
    Ok(collected)
}

fn format_report(report: &FileReport) -> String {
    format!(
        "{}: {}",
        report.path.display(),
        report.dependencies.join(", ")
    )
}

fn cmd_deps(paths: &[PathBuf], config: &AmdConfig, json: bool) -> Result<()> {
    let Collected {
        files,
        failures: unreadable,
    } = collect_source_files(paths, &config.scan)?;
    let total = files.len() + unreadable;
    let options: ExtractOptions = config.extract;

    let mut reports = Vec::with_capacity(files.len());
    let mut failures = unreadable;
    for result in amd_parser::extract_files_parallel(files, &options) {
        match result {
            Ok(report) => reports.push(report),
            Err((path, e)) => {
                tracing::warn!("{}: {}", path.display(), e);
                failures += 1;
            }
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            println!("{}", format_report(report));
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} files could not be read or parsed", failures, total);
    }
    Ok(())
}

fn cmd_form(path: &Path) -> Result<()> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let form = amd_parser::module_type::form_of_source(&source)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    println!("{}", form);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use amd_core::AmdForm;

    fn write(dir: &Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn test_collect_filters_by_extension_and_globs() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("project");
        write(&root, "app/main.js", "define(['a'], function () {});");
        write(&root, "app/readme.md", "# docs");
        write(&root, "vendor/lib.js", "define(['b'], function () {});");

        let scan = ScanConfig {
            exclude: vec!["vendor/**".to_string()],
            ..ScanConfig::default()
        };
        let collected = collect_source_files(&[root], &scan).unwrap();
        assert_eq!(collected.files.len(), 1);
        assert_eq!(collected.failures, 0);
        assert!(collected.files[0].0.ends_with("app/main.js"));
    }

    #[test]
    fn test_collect_takes_named_files_regardless_of_extension() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "module.amd", "define(['a'], function () {});");
        let file = tmp.path().join("module.amd");
        let collected = collect_source_files(&[file], &ScanConfig::default()).unwrap();
        assert_eq!(collected.files.len(), 1);
    }

    #[test]
    fn test_invalid_glob_is_an_error() {
        let scan = ScanConfig {
            include: vec!["[".to_string()],
            ..ScanConfig::default()
        };
        assert!(collect_source_files(&[], &scan).is_err());
    }

    #[test]
    fn test_missing_path_is_a_failure() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("not-here.js");

        let collected = collect_source_files(&[missing.clone()], &ScanConfig::default()).unwrap();
        assert!(collected.files.is_empty());
        assert_eq!(collected.failures, 1);

        let err = cmd_deps(&[missing], &AmdConfig::default(), false).unwrap_err();
        assert!(err.to_string().contains("1 of 1"), "got: {}", err);
    }

    #[test]
    fn test_unreadable_file_in_directory_is_a_failure() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("project");
        write(&root, "good.js", "define(['a'], function () {});");
        std::fs::write(root.join("bad.js"), [0xff, 0xfe, 0x00]).unwrap();

        let collected = collect_source_files(&[root.clone()], &ScanConfig::default()).unwrap();
        assert_eq!(collected.files.len(), 1);
        assert!(collected.files[0].0.ends_with("good.js"));
        assert_eq!(collected.failures, 1);

        let err = cmd_deps(&[root], &AmdConfig::default(), false).unwrap_err();
        assert!(err.to_string().contains("1 of 2"), "got: {}", err);
    }

    #[test]
    fn test_unreadable_named_file_does_not_stop_the_scan() {
        let tmp = tempfile::tempdir().unwrap();
        let bad = tmp.path().join("bad.js");
        std::fs::write(&bad, [0xff, 0xfe, 0x00]).unwrap();
        write(tmp.path(), "good.js", "define(['a'], function () {});");
        let good = tmp.path().join("good.js");

        let collected = collect_source_files(&[bad, good], &ScanConfig::default()).unwrap();
        assert_eq!(collected.files.len(), 1);
        assert!(collected.files[0].0.ends_with("good.js"));
        assert_eq!(collected.failures, 1);
    }

    #[test]
    fn test_format_report() {
        let report = FileReport {
            path: PathBuf::from("main.js"),
            form: AmdForm::Driver,
            dependencies: vec!["a".to_string(), "b".to_string()],
        };
        assert_eq!(format_report(&report), "main.js: a, b");
    }
}
