//! Errors raised by dependency extraction.

/// Failures that can escape an extraction call.
///
/// Malformed or computed dependency expressions are never errors; they
/// degrade to empty or regenerated dependency strings instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DetectiveError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("syntax error at line {line}, column {column}")]
    Syntax { line: usize, column: usize },
    #[error("failed to load JavaScript grammar: {0}")]
    Grammar(String),
}

impl DetectiveError {
    /// The source was not given at all.
    pub fn missing_source() -> Self {
        Self::InvalidInput("src not given".to_string())
    }

    pub fn is_syntax(&self) -> bool {
        matches!(self, Self::Syntax { .. })
    }
}
