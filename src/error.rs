//! Error types for the token extractor
//!
//! Extraction itself never fails (malformed CSS degrades to an empty token set),
//! these errors only come from configuration loading, origin parsing and
//! parser setup.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for token extraction support operations
#[derive(Error, Debug)]
pub enum TokenError {
    /// IO errors (reading config files, CSS inputs)
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON parsing/serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// YAML parsing errors
    #[error("YAML error: {message}")]
    Yaml {
        message: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// Config file with an extension we don't know how to read
    #[error("Unsupported config format: {path:?}")]
    UnsupportedConfigFormat { path: PathBuf },

    /// Tree-sitter language setup errors
    #[error("Failed to set up tree-sitter language: {message}")]
    TreeSitterLanguage { message: String },

    /// Origin URL could not be parsed or has no host
    #[error("Invalid origin url '{url}': {message}")]
    InvalidOrigin { url: String, message: String },
}

/// Result type alias for token extraction support operations
pub type TokenResult<T> = Result<T, TokenError>;

impl From<std::io::Error> for TokenError {
    fn from(err: std::io::Error) -> Self {
        TokenError::Io {
            source: err,
            message: "IO operation failed".to_string(),
        }
    }
}

impl From<serde_json::Error> for TokenError {
    fn from(err: serde_json::Error) -> Self {
        TokenError::Json {
            source: err,
            message: "JSON operation failed".to_string(),
        }
    }
}

/// Helper trait for converting IO errors with context
pub trait IoContext<T> {
    fn with_io_context(self, message: &str) -> TokenResult<T>;
}

impl<T> IoContext<T> for Result<T, std::io::Error> {
    fn with_io_context(self, message: &str) -> TokenResult<T> {
        self.map_err(|e| TokenError::Io {
            message: message.to_string(),
            source: e,
        })
    }
}

/// Helper trait for converting JSON errors with context
pub trait JsonContext<T> {
    fn with_json_context(self, message: &str) -> TokenResult<T>;
}

impl<T> JsonContext<T> for Result<T, serde_json::Error> {
    fn with_json_context(self, message: &str) -> TokenResult<T> {
        self.map_err(|e| TokenError::Json {
            message: message.to_string(),
            source: e,
        })
    }
}
