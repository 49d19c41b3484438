//! # Error Types
//!
//! Structured error types for rcs_core. Every failure is local to a single
//! call: nothing is retried and the caller decides whether to re-prompt,
//! log or abort.
//!
//! ## Example
//!
//! ```rust
//! use rcs_core::errors::{CalcError, CalcResult};
//!
//! fn validate_diameter(diameter_cm: f64) -> CalcResult<()> {
//!     if diameter_cm <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "diameter_cm",
//!             diameter_cm.to_string(),
//!             "Bar diameter must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_diameter(-1.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for rcs_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for section verification.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, too few vertices, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// The equivalent section has zero or negative area.
    ///
    /// This is a data-entry problem (empty outline, holes wound the same
    /// way as the outer boundary, ...), not something to retry.
    #[error("Degenerate section: equivalent area {area} cm² is not positive")]
    DegenerateSection { area: f64 },

    /// The 3x3 generalized stiffness matrix cannot be inverted
    #[error("Singular stiffness system: determinant {determinant:e}")]
    SingularSystem { determinant: f64 },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a DegenerateSection error
    pub fn degenerate_section(area: f64) -> Self {
        CalcError::DegenerateSection { area }
    }

    /// Create a SingularSystem error
    pub fn singular_system(determinant: f64) -> Self {
        CalcError::SingularSystem { determinant }
    }

    /// Create a FileError
    pub fn file_error(
        operation: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// True for errors caused by the section data itself rather than I/O.
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            CalcError::InvalidInput { .. }
                | CalcError::DegenerateSection { .. }
                | CalcError::SingularSystem { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::DegenerateSection { .. } => "DEGENERATE_SECTION",
            CalcError::SingularSystem { .. } => "SINGULAR_SYSTEM",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::SerializationError {
            reason: err.to_string(),
        }
    }
}
