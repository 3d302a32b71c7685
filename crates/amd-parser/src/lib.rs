//! Tree-sitter based dependency extraction for AMD modules.
//!
//! Parses a single JavaScript source unit and returns the ordered,
//! de-duplicated list of module identifiers it depends on, covering the
//! named, dependency-array, driver, factory and REM forms plus `require`
//! calls nested inside factory bodies.

pub mod classify;
pub mod codegen;
pub mod deps;
pub mod module_type;
pub mod treesitter;
pub mod walker;

pub use deps::{extract, extract_files_parallel, extract_report, extract_source};
pub use treesitter::{ParsedSource, Source};
