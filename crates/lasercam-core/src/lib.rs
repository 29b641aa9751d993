//! # LaserCam Core
//!
//! Core types and utilities shared by the LaserCam crates.
//! Provides the error taxonomy and the number formatting rules of the
//! toolpath dialect.

pub mod error;
pub mod units;

pub use error::{Error, Result, ShapeError, ValidationError};
pub use units::{
    format_coordinate, format_length, format_percent, format_rate, FEED_RATE_LABEL, UNIT_LABEL,
};
