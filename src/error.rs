//! Error types for `roulette-bot`
//!
//! The engine itself never fails a play: storage problems are logged and
//! swallowed inside the ledger. The errors here cover everything around it,
//! from configuration and caller input to the HTTP listener.

use std::path::PathBuf;
use thiserror::Error;

use crate::store::DocumentName;

// ============================================================================
// Exit Codes
// ============================================================================

/// Process exit codes for the `roulette-bot` binary.
pub struct ExitCode;

impl ExitCode {
    /// Successful execution
    pub const SUCCESS: i32 = 0;

    /// General error
    pub const ERROR: i32 = 1;

    /// Configuration error (invalid YAML, out-of-range rule)
    pub const CONFIG_ERROR: i32 = 2;

    /// I/O error (unreadable data directory, permission denied)
    pub const IO_ERROR: i32 = 3;

    /// HTTP server error (bind failure, bad bind address)
    pub const SERVER_ERROR: i32 = 4;

    /// Usage error (empty channel or user)
    pub const USAGE_ERROR: i32 = 64;

    /// Interrupted by SIGINT (Ctrl+C)
    pub const INTERRUPTED: i32 = 130;

    /// Terminated by SIGTERM
    pub const TERMINATED: i32 = 143;
}

// ============================================================================
// Top-Level Error
// ============================================================================

/// Top-level error type for `roulette-bot` operations.
///
/// Aggregates the domain errors and maps each one to a process exit code.
#[derive(Debug, Error)]
pub enum RouletteError {
    /// Configuration loading or validation error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Caller supplied an empty channel or user
    #[error(transparent)]
    Input(#[from] InputError),

    /// HTTP server error
    #[error(transparent)]
    Server(#[from] ServerError),

    /// Persistent store error
    #[error(transparent)]
    Store(#[from] StoreError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RouletteError {
    /// Returns the exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => ExitCode::CONFIG_ERROR,
            Self::Input(_) => ExitCode::USAGE_ERROR,
            Self::Server(_) => ExitCode::SERVER_ERROR,
            Self::Store(_) | Self::Io(_) => ExitCode::IO_ERROR,
            Self::Json(_) => ExitCode::ERROR,
        }
    }
}

// ============================================================================
// Configuration Errors
// ============================================================================

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// YAML parsing failed
    #[error("parse error in {path}: {message}")]
    ParseError {
        /// Path to the configuration file
        path: PathBuf,
        /// Line number where the error occurred (if available)
        line: Option<usize>,
        /// Error message from the parser
        message: String,
    },

    /// Referenced configuration file not found
    #[error("file not found: {path}")]
    MissingFile {
        /// Path to the missing file
        path: PathBuf,
    },

    /// Field has an invalid value
    #[error("invalid value for '{field}': got '{value}', expected {expected}")]
    InvalidValue {
        /// Name of the field with invalid value
        field: String,
        /// The actual value provided
        value: String,
        /// Description of what was expected
        expected: String,
    },
}

// ============================================================================
// Input Errors
// ============================================================================

/// Rejected caller input.
///
/// Raised by the HTTP and CLI layers before a request reaches the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// Channel parameter missing or blank
    #[error("channel not specified")]
    MissingChannel,

    /// User parameter missing or blank
    #[error("user not specified")]
    MissingUser,
}

// ============================================================================
// Server Errors
// ============================================================================

/// HTTP server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The bind address could not be parsed
    #[error("invalid bind address \"{input}\": {message}")]
    InvalidBindAddress {
        /// Address as supplied by the user
        input: String,
        /// Parser message
        message: String,
    },

    /// The TCP listener could not bind
    #[error("bind failed on {addr}: {source}")]
    BindFailed {
        /// Address that failed to bind
        addr: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The server loop exited with an I/O error
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),

    /// The metrics exporter could not be installed
    #[error("metrics exporter failed: {0}")]
    Metrics(String),
}

// ============================================================================
// Store Errors
// ============================================================================

/// Persistent store errors.
///
/// These never escape a play: the ledger logs them and carries on with the
/// in-memory state.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed
    #[error("I/O error on {document}: {source}")]
    Io {
        /// Document being accessed
        document: DocumentName,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The stored document is not valid for its schema
    #[error("malformed {document}: {source}")]
    Malformed {
        /// Document being decoded
        document: DocumentName,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// Writes are switched off (used to simulate disk failures)
    #[error("writes to {document} are disabled")]
    WriteDisabled {
        /// Document that was being written
        document: DocumentName,
    },
}
