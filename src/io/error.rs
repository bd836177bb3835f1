//! Error types and context management for game operations

use std::fmt;
use std::path::PathBuf;

use crate::spatial::Position;

/// Main error type for all game operations
#[derive(Debug)]
pub enum GameError {
    /// Level storage could not be opened, read or written
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// A persisted level or index record could not be decoded
    MalformedRecord {
        /// The offending record, possibly truncated
        record: String,
        /// Explanation of what is wrong with it
        reason: String,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Cell access outside the grid
    ///
    /// Every position handed around the engine comes from the grid itself,
    /// so this signals a broken internal invariant rather than bad input.
    OutOfBounds {
        /// The position that was accessed
        position: Position,
        /// Grid dimensions (rows, cols)
        dimensions: (usize, usize),
    },

    /// The background generation worker stopped answering
    WorkerUnavailable {
        /// What was being attempted
        reason: String,
    },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::MalformedRecord { record, reason } => {
                write!(f, "Malformed record '{record}': {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::OutOfBounds {
                position,
                dimensions,
            } => {
                write!(
                    f,
                    "Position {position} is outside the {}x{} grid",
                    dimensions.0, dimensions.1
                )
            }
            Self::WorkerUnavailable { reason } => {
                write!(f, "Generation worker unavailable: {reason}")
            }
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for game results
pub type Result<T> = std::result::Result<T, GameError>;

/// Extra detail attached to an error as it propagates
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// File the failing operation worked on
    pub path: Option<PathBuf>,
    /// Operation being performed
    pub operation: Option<&'static str>,
}

/// Enriches errors with the file and operation that produced them
pub trait WithContext<T> {
    /// Add error context to a Result
    ///
    /// # Errors
    ///
    /// Propagates the original error with additional context applied
    fn with_context(self, context: ErrorContext) -> Result<T>;

    /// Add the path and operation of a file system access
    ///
    /// # Errors
    ///
    /// Propagates the original error with the file context applied
    fn with_file(self, path: impl Into<PathBuf>, operation: &'static str) -> Result<T>;
}

impl<T, E> WithContext<T> for std::result::Result<T, E>
where
    E: Into<GameError>,
{
    fn with_context(self, context: ErrorContext) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            // Only file system errors carry a location worth filling in
            if let GameError::FileSystem {
                path, operation, ..
            } = &mut error
            {
                if let Some(context_path) = context.path {
                    *path = context_path;
                }
                if let Some(context_operation) = context.operation {
                    *operation = context_operation;
                }
            }
            error
        })
    }

    fn with_file(self, path: impl Into<PathBuf>, operation: &'static str) -> Result<T> {
        self.with_context(ErrorContext {
            path: Some(path.into()),
            operation: Some(operation),
        })
    }
}

impl From<std::io::Error> for GameError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> GameError {
    GameError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a malformed record error, truncating long records for display
pub fn malformed_record(record: &str, reason: &impl ToString) -> GameError {
    const MAX_SHOWN: usize = 64;
    let shown = match record.char_indices().nth(MAX_SHOWN) {
        Some((cut, _)) => format!("{}...", record.get(..cut).unwrap_or(record)),
        None => record.to_string(),
    };
    GameError::MalformedRecord {
        record: shown,
        reason: reason.to_string(),
    }
}

/// Create an out-of-bounds error for a grid of the given dimensions
pub const fn out_of_bounds(position: Position, dimensions: (usize, usize)) -> GameError {
    GameError::OutOfBounds {
        position,
        dimensions,
    }
}
