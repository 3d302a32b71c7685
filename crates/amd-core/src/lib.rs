//! Core types for AMD dependency extraction.
//!
//! Provides the AMD form tag ([`form::AmdForm`]), extraction options, the
//! error taxonomy, per-file reports and the layered `amd-deps` configuration.

pub mod config;
pub mod error;
pub mod form;
pub mod options;
pub mod report;

pub use error::DetectiveError;
pub use form::AmdForm;
pub use options::ExtractOptions;
pub use report::{DependencyList, FileReport};
