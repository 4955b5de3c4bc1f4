//! Error types for engine, search and file operations

use std::fmt;
use std::path::PathBuf;

/// Main error type for all engine and search operations
#[derive(Debug)]
pub enum AlgorithmError {
    /// Failed to load the target image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
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

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Instruction references a block that is not currently valid
    UnknownBlock {
        /// Rendered block id
        id: String,
        /// Mnemonic of the instruction that referenced it
        opcode: &'static str,
    },

    /// Cut coordinate does not lie strictly inside the block
    InvalidCut {
        /// Rendered block id
        id: String,
        /// Which coordinate is out of range and why
        reason: String,
    },

    /// Swap or merge between blocks that do not satisfy the geometric predicate
    IncompatibleBlocks {
        /// Mnemonic of the rejected instruction
        opcode: &'static str,
        /// Rendered id of the first block
        first: String,
        /// Rendered id of the second block
        second: String,
    },

    /// Block path would exceed the maximum digit count
    IdentifierOverflow {
        /// Rendered id of the block whose child was requested
        id: String,
        /// Maximum digit count supported
        max_digits: usize,
    },

    /// Counter-allocated blocks have no parent path
    NoParent {
        /// Rendered block id
        id: String,
    },

    /// A line of ISL program text could not be parsed
    ProgramParse {
        /// 1-based line number
        line: usize,
        /// Offending text
        text: String,
        /// Description of the problem
        reason: String,
    },
}

impl fmt::Display for AlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
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
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::UnknownBlock { id, opcode } => {
                write!(f, "Incorrect block id {id} in {opcode}")
            }
            Self::InvalidCut { id, reason } => {
                write!(f, "Invalid cut of block {id}: {reason}")
            }
            Self::IncompatibleBlocks {
                opcode,
                first,
                second,
            } => {
                write!(f, "Blocks {first} and {second} are incompatible for {opcode}")
            }
            Self::IdentifierOverflow { id, max_digits } => {
                write!(
                    f,
                    "Digit overflow: child of {id} would exceed {max_digits} path digits"
                )
            }
            Self::NoParent { id } => {
                write!(f, "Block {id} has no parent path")
            }
            Self::ProgramParse { line, text, reason } => {
                write!(f, "Cannot parse ISL line {line} '{text}': {reason}")
            }
        }
    }
}

impl std::error::Error for AlgorithmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for algorithm results
pub type Result<T> = std::result::Result<T, AlgorithmError>;

impl From<std::io::Error> for AlgorithmError {
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
) -> AlgorithmError {
    AlgorithmError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a file system error bound to a path
pub fn file_system_error(
    path: impl Into<PathBuf>,
    operation: &'static str,
    source: std::io::Error,
) -> AlgorithmError {
    AlgorithmError::FileSystem {
        path: path.into(),
        operation,
        source,
    }
}
