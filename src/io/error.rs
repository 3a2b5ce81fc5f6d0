//! Error types for puzzle generation operations

use std::fmt;
use std::path::PathBuf;

/// Main error type for all generation operations
///
/// Variants split into two classes: configuration errors, which are fatal
/// and abort a batch immediately, and constraint violations, which are
/// recoverable and handled by the retry loop (see [`GenerationError::is_recoverable`]).
#[derive(Debug)]
pub enum GenerationError {
    /// Rule specification carries a kind tag the factory does not know
    UnknownRuleType {
        /// The unrecognized kind tag
        name: String,
    },

    /// Rule was configured with an attribute it cannot operate on
    UnsupportedAttribute {
        /// Name of the rule rejecting the attribute
        rule: &'static str,
        /// The rejected attribute name
        attribute: String,
    },

    /// Composite rule contains a binary sub-rule past the first position
    RuleArity {
        /// Index of the offending sub-rule within the sequence
        position: usize,
        /// Panels the sub-rule requires
        required: usize,
    },

    /// Attribute value falls outside its schema range
    InvalidAttributeValue {
        /// Name of the attribute being set
        attribute: &'static str,
        /// Provided value that failed validation
        value: i32,
        /// Minimum allowed value
        min: i32,
        /// Maximum allowed value
        max: i32,
    },

    /// Entity count would leave the allowed bound after a change
    EntityBound {
        /// Entity count before the change
        current: usize,
        /// Requested change in entity count
        change: i32,
        /// Minimum allowed count
        min: usize,
        /// Maximum allowed count
        max: usize,
    },

    /// Fewer seed panels supplied than the configured rules require
    InsufficientSeedPanels {
        /// Panels the rule set requires
        required: usize,
        /// Panels actually supplied
        supplied: usize,
    },

    /// Panel constraints cannot produce any valid panel
    UnsatisfiableConstraints {
        /// Description of the conflict
        reason: String,
    },

    /// Generation parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Failed to save a rendered image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
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

impl GenerationError {
    /// Whether the retry loop may absorb this error and attempt again
    ///
    /// Constraint violations arise from unlucky sampling and are expected
    /// during normal operation; configuration and IO errors are not.
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::EntityBound { .. }
                | Self::InsufficientSeedPanels { .. }
                | Self::UnsatisfiableConstraints { .. }
        )
    }
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownRuleType { name } => {
                write!(f, "Unknown rule type '{name}'")
            }
            Self::UnsupportedAttribute { rule, attribute } => {
                write!(f, "Rule '{rule}' does not support attribute '{attribute}'")
            }
            Self::RuleArity { position, required } => {
                write!(
                    f,
                    "Composite sub-rule at position {position} requires {required} panels; \
                     only the first sub-rule may take more than one"
                )
            }
            Self::InvalidAttributeValue {
                attribute,
                value,
                min,
                max,
            } => {
                write!(
                    f,
                    "Value {value} for attribute '{attribute}' is out of range [{min}, {max}]"
                )
            }
            Self::EntityBound {
                current,
                change,
                min,
                max,
            } => {
                write!(
                    f,
                    "Changing entity count {current} by {change} leaves the bound [{min}, {max}]"
                )
            }
            Self::InsufficientSeedPanels { required, supplied } => {
                write!(
                    f,
                    "Rule set requires {required} seed panels but {supplied} were supplied"
                )
            }
            Self::UnsatisfiableConstraints { reason } => {
                write!(f, "Unsatisfiable panel constraints: {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
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

impl std::error::Error for GenerationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for generation results
pub type Result<T> = std::result::Result<T, GenerationError>;

impl From<image::ImageError> for GenerationError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageExport {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for GenerationError {
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
) -> GenerationError {
    GenerationError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an unsatisfiable constraints error
pub fn unsatisfiable(reason: &impl ToString) -> GenerationError {
    GenerationError::UnsatisfiableConstraints {
        reason: reason.to_string(),
    }
}
