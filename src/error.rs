//! Error types for roster construction and analysis

use thiserror::Error;

/// Result type for analyzer operations
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Errors raised when input violates the analyzer's preconditions
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// More users than the configured capacity allows
    #[error("roster has {count} users, capacity is {max}")]
    TooManyUsers { count: usize, max: usize },

    /// A user carries more tags than allowed
    #[error("user u{user} has {count} tags, capacity is {max}")]
    TooManyTags { user: usize, count: usize, max: usize },

    /// A tag is empty or longer than allowed
    #[error("user u{user} has invalid tag {tag:?}: {reason}")]
    InvalidTag {
        user: usize,
        tag: String,
        reason: String,
    },

    /// Identifier outside 0..N-1
    #[error("user id u{id} is out of range for a roster of {count} users")]
    UserOutOfRange { id: usize, count: usize },

    /// Same identifier declared twice
    #[error("user id u{0} is declared more than once")]
    DuplicateUser(usize),

    /// Adjacency matrix is not N×N
    #[error("adjacency matrix has shape {rows}x{cols}, expected {expected}x{expected}")]
    MatrixShape {
        rows: usize,
        cols: usize,
        expected: usize,
    },

    /// Threshold value cannot be compared meaningfully
    #[error("invalid threshold: {0}")]
    InvalidThreshold(String),

    /// Malformed roster text
    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },
}

impl AnalysisError {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}
