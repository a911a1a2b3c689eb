//! Error types and handling for region analysis operations

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for region analysis and rewriting operations
#[derive(Debug, Error)]
pub enum RegionateError {
    /// Parse errors from the C# lexer or structural parser
    #[error("Parse error: {message} at line {line}, column {col}")]
    Parse { message: String, line: u32, col: u32 },

    /// Region directives in the input do not pair by the depth rule
    #[error("Malformed region nesting: '{directive}' at line {line}")]
    MalformedRegionNesting { line: u32, directive: String },

    /// The naming policy was given a construct the convention does not cover
    #[error("Unsupported declaration: {construct} at line {line}")]
    UnsupportedDeclaration { construct: String, line: u32 },

    /// Configuration loading or validation errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// File system I/O errors
    #[error("IO error for path '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Generic internal errors
    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Error kind enumeration for categorizing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Parse,
    MalformedRegionNesting,
    UnsupportedDeclaration,
    Config,
    Io,
    Internal,
}

impl RegionateError {
    /// Get the error kind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            RegionateError::Parse { .. } => ErrorKind::Parse,
            RegionateError::MalformedRegionNesting { .. } => ErrorKind::MalformedRegionNesting,
            RegionateError::UnsupportedDeclaration { .. } => ErrorKind::UnsupportedDeclaration,
            RegionateError::Config { .. } => ErrorKind::Config,
            RegionateError::Io { .. } => ErrorKind::Io,
            RegionateError::Internal { .. } => ErrorKind::Internal,
        }
    }

    /// Check if this error is recoverable (can continue processing other files)
    ///
    /// Per-file input-shape errors are recoverable at the batch level: the
    /// offending file gets no output, but the run continues. Config and
    /// internal errors abort.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::Parse
                | ErrorKind::MalformedRegionNesting
                | ErrorKind::UnsupportedDeclaration
                | ErrorKind::Io
        )
    }

    /// Create a parse error
    pub fn parse_error(message: impl Into<String>, line: u32, col: u32) -> Self {
        Self::Parse {
            message: message.into(),
            line,
            col,
        }
    }

    /// Create a malformed region nesting error
    pub fn malformed_nesting(directive: impl Into<String>, line: u32) -> Self {
        Self::MalformedRegionNesting {
            line,
            directive: directive.into(),
        }
    }

    /// Create an unsupported declaration error
    pub fn unsupported_declaration(construct: impl Into<String>, line: u32) -> Self {
        Self::UnsupportedDeclaration {
            construct: construct.into(),
            line,
        }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an IO error with path context
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create an internal error
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

/// Convert from std::io::Error
impl From<std::io::Error> for RegionateError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: PathBuf::new(),
            source: err,
        }
    }
}
