//! # Error Types
//!
//! Structured error types for timber_core. Errors carry enough context for a
//! caller (human or program) to see which input or table entry is at fault.
//!
//! Inside the verification engine an error never aborts the whole request:
//! each check converts its own error into an `Error` verdict and the
//! remaining checks keep running.
//!
//! ## Example
//!
//! ```rust
//! use timber_core::errors::{CalcError, CalcResult};
//!
//! fn validate_length(length_m: f64) -> CalcResult<()> {
//!     if length_m <= 0.0 {
//!         return Err(CalcError::InvalidInput {
//!             field: "length_m".to_string(),
//!             value: length_m.to_string(),
//!             reason: "Length must be positive".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for timber_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for verification operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, not finite, negative, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A parameter required by a check was not supplied
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Section dimensions that cannot describe a rectangle
    #[error("Invalid geometry: b = {width_mm} mm, h = {height_mm} mm - {reason}")]
    InvalidGeometry {
        width_mm: f64,
        height_mm: f64,
        reason: String,
    },

    /// Table origin or wood class not present in the code tables
    #[error("Unknown wood class '{class}' in {origin} table")]
    UnknownClass { origin: String, class: String },

    /// Load-duration or moisture key with no kmod entry
    #[error("Unknown {kind} modifier: '{key}'")]
    UnknownModifier { kind: String, key: String },

    /// A formula was evaluated outside the range where the code allows it
    #[error("Out of validity range: {quantity} = {value:.2} exceeds limit {limit:.2}")]
    OutOfValidityRange {
        quantity: String,
        value: f64,
        limit: f64,
    },

    /// A ratio whose denominator is zero, negative or not finite
    #[error("Indeterminate ratio in {check}: {reason}")]
    ArithmeticIndeterminate { check: String, reason: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
        }
    }

    /// Create an InvalidGeometry error
    pub fn invalid_geometry(width_mm: f64, height_mm: f64, reason: impl Into<String>) -> Self {
        CalcError::InvalidGeometry {
            width_mm,
            height_mm,
            reason: reason.into(),
        }
    }

    /// Create an UnknownClass error
    pub fn unknown_class(origin: impl Into<String>, class: impl Into<String>) -> Self {
        CalcError::UnknownClass {
            origin: origin.into(),
            class: class.into(),
        }
    }

    /// Create an UnknownModifier error
    pub fn unknown_modifier(kind: impl Into<String>, key: impl Into<String>) -> Self {
        CalcError::UnknownModifier {
            kind: kind.into(),
            key: key.into(),
        }
    }

    /// Create an OutOfValidityRange error
    pub fn out_of_range(quantity: impl Into<String>, value: f64, limit: f64) -> Self {
        CalcError::OutOfValidityRange {
            quantity: quantity.into(),
            value,
            limit,
        }
    }

    /// Create an ArithmeticIndeterminate error
    pub fn indeterminate(check: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::ArithmeticIndeterminate {
            check: check.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::InvalidGeometry { .. } => "INVALID_GEOMETRY",
            CalcError::UnknownClass { .. } => "UNKNOWN_CLASS",
            CalcError::UnknownModifier { .. } => "UNKNOWN_MODIFIER",
            CalcError::OutOfValidityRange { .. } => "OUT_OF_VALIDITY_RANGE",
            CalcError::ArithmeticIndeterminate { .. } => "ARITHMETIC_INDETERMINATE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("length_m", "-5", "Length must be positive");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidInput\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::missing_field("l1_mm").error_code(), "MISSING_FIELD");
        assert_eq!(CalcError::unknown_class("structural", "C99").error_code(), "UNKNOWN_CLASS");
        assert_eq!(
            CalcError::out_of_range("lambda", 150.0, 140.0).error_code(),
            "OUT_OF_VALIDITY_RANGE"
        );
    }

    #[test]
    fn test_messages_name_the_culprit() {
        let msg = CalcError::out_of_range("lambda_max", 152.3, 140.0).to_string();
        assert!(msg.contains("lambda_max"));
        assert!(msg.contains("152.30"));
    }
}
