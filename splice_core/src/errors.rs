//! # Error Types
//!
//! Structured error types for splice_core. Every sizing failure is reported
//! synchronously as one of these variants; nothing is retried or recovered
//! inside the engine, so the caller decides what to show the user.
//!
//! ## Example
//!
//! ```rust
//! use splice_core::errors::{SpliceError, SpliceResult};
//!
//! fn validate_moment(m_max_knm: f64) -> SpliceResult<()> {
//!     if !(m_max_knm.is_finite() && m_max_knm > 0.0) {
//!         return Err(SpliceError::invalid_moment(m_max_knm));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_moment(-5.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for splice_core operations
pub type SpliceResult<T> = Result<T, SpliceError>;

/// Structured error type for joint sizing operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum SpliceError {
    /// Responsibility level outside the closed enumeration
    #[error("Invalid responsibility level: '{value}'")]
    InvalidResponsibilityLevel { value: String },

    /// Beam identifier missing from the catalog and no inline geometry given
    #[error("Beam not found: {beam_id}")]
    BeamNotFound { beam_id: String },

    /// Steel grade missing from the catalog and no inline yield strength given
    #[error("Steel grade not found: {grade}")]
    SteelNotFound { grade: String },

    /// Design moment is not a positive finite value
    #[error("Invalid design moment M_max = {value} kN·m - must be positive and finite")]
    InvalidMoment { value: String },

    /// Minimum spacing cannot be met within the available plate dimension
    #[error(
        "Insufficient length: {bolt_count} bolts of d={diameter_mm} mm need {required_length_mm} mm, only {available_length_mm} mm available"
    )]
    InsufficientLength {
        diameter_mm: f64,
        bolt_count: u32,
        required_length_mm: f64,
        available_length_mm: f64,
    },

    /// Computed pitch exceeds the maximum allowed pitch
    #[error("Spacing infeasible: step {step_mm} mm exceeds maximum {max_step_mm} mm for d={diameter_mm} mm")]
    SpacingInfeasible {
        diameter_mm: f64,
        step_mm: f64,
        max_step_mm: f64,
    },

    /// Whole diameter x row search space exhausted
    #[error("No feasible bolt arrangement for {force_kn:.2} kN on a {length_mm} x {width_mm} mm plate")]
    NoFeasibleBoltArrangement {
        force_kn: f64,
        length_mm: f64,
        width_mm: f64,
    },

    /// An input value is invalid (out of range, wrong type, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// File I/O error (catalogs, settings)
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// TOML/JSON serialization or deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl SpliceError {
    /// Create an InvalidResponsibilityLevel error
    pub fn invalid_responsibility_level(value: impl Into<String>) -> Self {
        SpliceError::InvalidResponsibilityLevel {
            value: value.into(),
        }
    }

    /// Create a BeamNotFound error
    pub fn beam_not_found(beam_id: impl Into<String>) -> Self {
        SpliceError::BeamNotFound {
            beam_id: beam_id.into(),
        }
    }

    /// Create a SteelNotFound error
    pub fn steel_not_found(grade: impl Into<String>) -> Self {
        SpliceError::SteelNotFound {
            grade: grade.into(),
        }
    }

    /// Create an InvalidMoment error
    pub fn invalid_moment(value: f64) -> Self {
        SpliceError::InvalidMoment {
            value: value.to_string(),
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        SpliceError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        SpliceError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        SpliceError::SerializationError {
            reason: reason.into(),
        }
    }

    /// True for errors raised while checking a single bolt layout candidate.
    ///
    /// The bolt search skips candidates that fail this way instead of
    /// aborting the whole request.
    pub fn is_candidate_rejection(&self) -> bool {
        matches!(
            self,
            SpliceError::InsufficientLength { .. } | SpliceError::SpacingInfeasible { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            SpliceError::InvalidResponsibilityLevel { .. } => "INVALID_RESPONSIBILITY_LEVEL",
            SpliceError::BeamNotFound { .. } => "BEAM_NOT_FOUND",
            SpliceError::SteelNotFound { .. } => "STEEL_NOT_FOUND",
            SpliceError::InvalidMoment { .. } => "INVALID_MOMENT",
            SpliceError::InsufficientLength { .. } => "INSUFFICIENT_LENGTH",
            SpliceError::SpacingInfeasible { .. } => "SPACING_INFEASIBLE",
            SpliceError::NoFeasibleBoltArrangement { .. } => "NO_FEASIBLE_BOLT_ARRANGEMENT",
            SpliceError::InvalidInput { .. } => "INVALID_INPUT",
            SpliceError::FileError { .. } => "FILE_ERROR",
            SpliceError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<toml::de::Error> for SpliceError {
    fn from(err: toml::de::Error) -> Self {
        SpliceError::serialization(err.to_string())
    }
}

impl From<serde_json::Error> for SpliceError {
    fn from(err: serde_json::Error) -> Self {
        SpliceError::serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = SpliceError::InsufficientLength {
            diameter_mm: 20.0,
            bolt_count: 5,
            required_length_mm: 320.0,
            available_length_mm: 50.0,
        };
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InsufficientLength\""));
        let roundtrip: SpliceError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(SpliceError::beam_not_found("I40").error_code(), "BEAM_NOT_FOUND");
        assert_eq!(SpliceError::steel_not_found("C255").error_code(), "STEEL_NOT_FOUND");
        assert_eq!(SpliceError::invalid_moment(0.0).error_code(), "INVALID_MOMENT");
    }

    #[test]
    fn test_candidate_rejection() {
        let spacing = SpliceError::SpacingInfeasible {
            diameter_mm: 16.0,
            step_mm: 200.0,
            max_step_mm: 190.0,
        };
        assert!(spacing.is_candidate_rejection());
        assert!(!SpliceError::invalid_moment(-1.0).is_candidate_rejection());
    }

    #[test]
    fn test_display_mentions_required_length() {
        let error = SpliceError::InsufficientLength {
            diameter_mm: 20.0,
            bolt_count: 5,
            required_length_mm: 320.0,
            available_length_mm: 50.0,
        };
        let msg = error.to_string();
        assert!(msg.contains("320"));
        assert!(msg.contains("50"));
    }
}
