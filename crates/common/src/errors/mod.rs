//! Error types for the ShelfRank core
//!
//! Provides:
//! - Distinct error types for validation, graph input, and storage failures
//! - Machine-readable error codes for the consuming service layer
//! - A shared `Result` alias used across the workspace
//!
//! Data sparsity (a book id with no metadata, an empty seed set, an empty
//! neighbor list) is never an error and never appears here; sparse reads
//! degrade gracefully at the call site.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

/// Error codes for machine-readable error identification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Validation errors (1xxx)
    ValidationError,
    InvalidParameter,

    // Graph input errors (2xxx)
    EmptyGraph,
    InvalidGraph,

    // Resource errors (4xxx)
    BookNotFound,

    // Storage errors (7xxx)
    StorageUnavailable,

    // Internal errors (9xxx)
    InternalError,
    ConfigurationError,
    SerializationError,
}

impl ErrorCode {
    /// Get the numeric code for this error
    pub fn as_code(&self) -> u16 {
        match self {
            // Validation (1xxx)
            ErrorCode::ValidationError => 1001,
            ErrorCode::InvalidParameter => 1002,

            // Graph input (2xxx)
            ErrorCode::EmptyGraph => 2001,
            ErrorCode::InvalidGraph => 2002,

            // Resources (4xxx)
            ErrorCode::BookNotFound => 4001,

            // Storage (7xxx)
            ErrorCode::StorageUnavailable => 7001,

            // Internal (9xxx)
            ErrorCode::InternalError => 9001,
            ErrorCode::ConfigurationError => 9002,
            ErrorCode::SerializationError => 9003,
        }
    }
}

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation failed: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    #[error("Invalid parameter: {message}")]
    InvalidParameter { message: String },

    // Graph input errors
    #[error("Graph contains no nodes")]
    EmptyGraph,

    #[error("Invalid graph: {message}")]
    InvalidGraph { message: String },

    // Resource errors
    #[error("Book not found: {id}")]
    BookNotFound { id: i64 },

    // Storage errors
    #[error("Storage unavailable: {message}")]
    StorageUnavailable { message: String },

    // Internal errors
    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // Generic
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Get the error code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation { .. } => ErrorCode::ValidationError,
            AppError::InvalidParameter { .. } => ErrorCode::InvalidParameter,
            AppError::EmptyGraph => ErrorCode::EmptyGraph,
            AppError::InvalidGraph { .. } => ErrorCode::InvalidGraph,
            AppError::BookNotFound { .. } => ErrorCode::BookNotFound,
            AppError::StorageUnavailable { .. } => ErrorCode::StorageUnavailable,
            AppError::Internal { .. } => ErrorCode::InternalError,
            AppError::Configuration { .. } => ErrorCode::ConfigurationError,
            AppError::Serialization(_) => ErrorCode::SerializationError,
            AppError::Other(_) => ErrorCode::InternalError,
        }
    }

    /// Check if this error is a caller mistake (bad parameters or graph input)
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            AppError::Validation { .. }
                | AppError::InvalidParameter { .. }
                | AppError::EmptyGraph
                | AppError::InvalidGraph { .. }
        )
    }

    /// Check if this error came from the storage collaborator
    pub fn is_storage_error(&self) -> bool {
        matches!(self, AppError::StorageUnavailable { .. })
    }
}
