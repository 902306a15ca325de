//! Error types for ingestion, detection, classification and file handling

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::algorithm::classifier::SymmetrySignature;

/// Main error type for all frieze analysis operations
#[derive(Debug)]
pub enum FriezeError {
    /// The buffer contained no data rows at all
    EmptyInput,

    /// Rows were present but none of them described a primitive
    MalformedInput {
        /// Number of rows that were rejected
        rejected_rows: usize,
        /// Reason given for the first rejected row
        first_reason: String,
    },

    /// No translation maps the pattern onto itself along any tested axis
    NoPeriodicityFound {
        /// Number of primitives in the pattern
        primitives: usize,
        /// Number of strip axes that were searched
        axes_tried: usize,
    },

    /// The detected symmetries do not form one of the seven frieze groups
    AmbiguousSymmetry {
        /// Boolean signature of the accepted candidates
        signature: SymmetrySignature,
        /// Why the signature was rejected
        reason: String,
    },

    /// The configured time budget ran out between primitive comparisons
    Interrupted {
        /// Pipeline stage that was running
        stage: &'static str,
        /// Time spent before the interruption
        elapsed: Duration,
    },

    /// Configuration parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl FriezeError {
    /// True for failures caused by the analysed data rather than by the environment
    ///
    /// The CLI reports these per file and moves on to the next one.
    pub const fn is_engine_failure(&self) -> bool {
        matches!(
            self,
            Self::EmptyInput
                | Self::MalformedInput { .. }
                | Self::NoPeriodicityFound { .. }
                | Self::AmbiguousSymmetry { .. }
                | Self::Interrupted { .. }
        )
    }
}

impl fmt::Display for FriezeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "Input contains no data rows"),
            Self::MalformedInput {
                rejected_rows,
                first_reason,
            } => {
                write!(
                    f,
                    "Malformed input: all {rejected_rows} rows were rejected (first: {first_reason})"
                )
            }
            Self::NoPeriodicityFound {
                primitives,
                axes_tried,
            } => {
                write!(
                    f,
                    "No periodicity found among {primitives} primitives along {axes_tried} axes"
                )
            }
            Self::AmbiguousSymmetry { signature, reason } => {
                write!(f, "Ambiguous symmetry {signature}: {reason}")
            }
            Self::Interrupted { stage, elapsed } => {
                write!(
                    f,
                    "Interrupted during {stage} after {} ms",
                    elapsed.as_millis()
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
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
        }
    }
}

impl std::error::Error for FriezeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for frieze results
pub type Result<T> = std::result::Result<T, FriezeError>;

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> FriezeError {
    FriezeError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Attach a path and operation to an I/O error
pub fn file_system_error(
    path: impl Into<PathBuf>,
    operation: &'static str,
    source: std::io::Error,
) -> FriezeError {
    FriezeError::FileSystem {
        path: path.into(),
        operation,
        source,
    }
}
