//! Error handling for LaserCam
//!
//! Provides the error taxonomy used across the workspace:
//! - Validation errors (rejected before any compilation work starts)
//! - Shape errors (raised while compiling a single shape, recovered by the caller)
//! - Configuration errors (settings files)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Validation error type
///
/// Raised when the selection or the numeric parameters break an invariant.
/// These are surfaced verbatim to the caller and abort the request.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Nothing was selected
    #[error("No nodes provided for G-code generation.")]
    EmptySelection,

    /// Cutting feed rate must be positive
    #[error("Invalid parameters: feed rate must be positive (got {value})")]
    NonPositiveFeedRate {
        /// The rejected feed rate.
        value: f64,
    },

    /// Rapid feed rate must be positive
    #[error("Invalid parameters: rapid feed rate must be positive (got {value})")]
    NonPositiveRapidFeedRate {
        /// The rejected rapid feed rate.
        value: f64,
    },

    /// Laser intensity must not be negative
    #[error("Invalid parameters: laser power must be non-negative (got {value})")]
    NegativeIntensity {
        /// The rejected laser intensity.
        value: f64,
    },

    /// Any other rejected setting
    #[error("Invalid setting '{setting}': {reason}")]
    InvalidSetting {
        /// The setting name.
        setting: String,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Shape error type
///
/// Raised by the compiler for a single shape. The program assembler
/// skips the offending shape and keeps going.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShapeError {
    /// A vector network segment points at a vertex that does not exist
    #[error("Malformed vector network: segment {segment} references vertex {vertex} but only {vertex_count} vertices exist")]
    MalformedVectorNetwork {
        /// Index of the offending segment.
        segment: usize,
        /// The missing vertex index.
        vertex: usize,
        /// Number of vertices in the network.
        vertex_count: usize,
    },

    /// Position or size is not a finite number
    #[error("Invalid dimension '{field}': {value}")]
    InvalidDimension {
        /// The attribute name (x, y, width, height).
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// Star inner radius ratio outside (0, 1]
    #[error("Invalid star inner radius ratio {ratio}: must be in (0, 1]")]
    InvalidStarRatio {
        /// The rejected ratio.
        ratio: f64,
    },
}

/// Main error type for LaserCam
///
/// A unified error type for the public APIs. Shape errors never reach it:
/// the program assembler recovers them per shape.
#[derive(Error, Debug)]
pub enum Error {
    /// Validation error
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No shape in the selection produced any geometry
    #[error("No valid geometry was generated from the selected objects ({skipped} skipped). Please check that you have selected supported shape types.")]
    EmptyResult {
        /// Number of shapes skipped because their compiler failed.
        skipped: usize,
    },

    /// Configuration file error
    #[error("Configuration error: {reason}")]
    Config {
        /// The reason the configuration was rejected.
        reason: String,
    },

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a configuration error
    pub fn config(reason: impl Into<String>) -> Self {
        Error::Config {
            reason: reason.into(),
        }
    }

    /// Check if this is a validation error
    pub fn is_validation_error(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    /// Check if this is the empty-result error
    pub fn is_empty_result(&self) -> bool {
        matches!(self, Error::EmptyResult { .. })
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
