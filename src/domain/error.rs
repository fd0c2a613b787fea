//! Error types for the shopdash plugin.
//!
//! This module defines the centralized error type [`ShopdashError`] and a type alias
//! [`Result`] used throughout the crate. All errors are implemented with the
//! `thiserror` crate for automatic `Error` trait implementation.

use super::entity::EntityKind;
use thiserror::Error;

/// The main error type for shopdash operations.
///
/// Consolidates every failure that can occur while loading, mutating or
/// persisting dashboard data, plus configuration and theming problems. Errors
/// coming out of the worker are flattened to strings before they cross the
/// thread boundary, so the UI only ever sees their `Display` form.
///
/// # Examples
///
/// ```
/// use shopdash::domain::{EntityKind, ShopdashError};
///
/// let err = ShopdashError::NotFound { kind: EntityKind::Orders, id: "ORD-404".to_string() };
/// assert_eq!(err.to_string(), "order not found: ORD-404");
/// ```
#[derive(Debug, Error)]
pub enum ShopdashError {
    /// Storage operation failed.
    ///
    /// Occurs when reading from or writing to the document store fails for a
    /// reason other than plain I/O (for example a corrupt document).
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Theme parsing or application failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Communication with the background worker failed.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A record submitted for saving breaks a field rule.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A column definition names a field the record type does not have.
    #[error("Invalid column: {0}")]
    InvalidColumn(String),

    /// A record referenced by id does not exist in its collection.
    #[error("{} not found: {id}", kind.singular())]
    NotFound {
        /// Collection that was searched.
        kind: EntityKind,
        /// Identifier that could not be resolved.
        id: String,
    },
}

/// A specialized `Result` type for shopdash operations.
pub type Result<T> = std::result::Result<T, ShopdashError>;
