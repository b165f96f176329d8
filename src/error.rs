//! Error types for dynq.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DynqError {
    /// Failed to parse the query template.
    #[error("Parse error at position {position}: {message}")]
    Parse { position: usize, message: String },

    /// A bound parameter value has no literal mapping.
    #[error("Unsupported parameter type: {0}")]
    UnsupportedParameterType(String),

    /// An INSERT tuple element's parameter is unbound. Dropping the element
    /// would silently desync the value tuple from the column list.
    #[error("No value bound for parameter ':{name}' feeding INSERT column '{column}'")]
    UnboundInsertValue { name: String, column: String },

    /// Every assignment in an UPDATE was pruned.
    #[error("All assignments pruned in UPDATE on '{table}'; refusing to emit an empty SET")]
    EmptyAssignments { table: String },

    /// Unrecognized backend selector.
    #[error("Unsupported backend: '{0}'. Expected: relational or document-store")]
    UnsupportedBackend(String),

    /// The rewritten statement cannot be translated for the selected backend.
    #[error("Translation error: {0}")]
    Translation(String),

    /// Backend execution failure, passed through unmodified.
    #[error("Backend execution error: {0}")]
    Execution(String),

    /// A result row cannot be coerced to the declared shape.
    #[error("Mapping error: {0}")]
    Mapping(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DynqError {
    /// Create a parse error at the given position.
    pub fn parse(position: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            position,
            message: message.into(),
        }
    }
}

/// Result type alias for dynq operations.
pub type DynqResult<T> = Result<T, DynqError>;
