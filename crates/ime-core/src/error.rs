//! Error types for ime-core operations.
//!
//! # Overview
//!
//! The [`Error`] enum covers the failure modes of the raster data model:
//! - Pixel access outside the image grid
//! - Raw buffers whose length does not match the declared dimensions
//! - Raw channel values outside `[0, max]`
//! - Pixels whose channel ceiling differs from the owning image
//!
//! # Usage
//!
//! ```rust
//! use ime_core::{Error, Result};
//!
//! fn check(row: u32, col: u32, width: u32, height: u32) -> Result<()> {
//!     if row >= height || col >= width {
//!         return Err(Error::out_of_bounds(row, col, width, height));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check(3, 0, 4, 2).is_err());
//! ```
//!
//! # Dependencies
//!
//! - [`thiserror`] - For derive macro error implementation

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when building or accessing images.
///
/// # Categories
///
/// - **Bounds errors**: [`OutOfBounds`](Error::OutOfBounds)
/// - **Shape errors**: [`InvalidDimensions`](Error::InvalidDimensions)
/// - **Value errors**: [`ChannelOutOfRange`](Error::ChannelOutOfRange), [`InvalidMax`](Error::InvalidMax),
///   [`MaxMismatch`](Error::MaxMismatch)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Pixel coordinates are outside image bounds.
    ///
    /// Returned when `row >= height` or `col >= width`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use ime_core::Error;
    ///
    /// let err = Error::out_of_bounds(7, 2, 4, 4);
    /// assert!(err.to_string().contains("(7, 2)"));
    /// ```
    #[error("pixel ({row}, {col}) out of bounds for image {width}x{height}")]
    OutOfBounds {
        /// Row that was accessed
        row: u32,
        /// Column that was accessed
        col: u32,
        /// Image width
        width: u32,
        /// Image height
        height: u32,
    },

    /// Pixel buffer does not match the declared dimensions.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Declared width
        width: u32,
        /// Declared height
        height: u32,
        /// Why the buffer was rejected
        reason: String,
    },

    /// A raw channel value lies outside `[0, max]`.
    ///
    /// Raw ingestion rejects such values; only pixel construction clamps.
    #[error("channel value {value} at ({row}, {col}) outside [0, {max}]")]
    ChannelOutOfRange {
        /// Row of the offending pixel
        row: u32,
        /// Column of the offending pixel
        col: u32,
        /// Offending value
        value: i32,
        /// Channel ceiling
        max: i32,
    },

    /// A channel ceiling is negative.
    #[error("invalid channel max {0}")]
    InvalidMax(i32),

    /// A pixel's channel ceiling differs from the image's.
    #[error("pixel max {got} does not match image max {expected}")]
    MaxMismatch {
        /// Image max
        expected: i32,
        /// Pixel max
        got: i32,
    },
}

impl Error {
    /// Creates an [`Error::OutOfBounds`] error.
    #[inline]
    pub fn out_of_bounds(row: u32, col: u32, width: u32, height: u32) -> Self {
        Self::OutOfBounds {
            row,
            col,
            width,
            height,
        }
    }

    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::ChannelOutOfRange`] error.
    #[inline]
    pub fn channel_out_of_range(row: u32, col: u32, value: i32, max: i32) -> Self {
        Self::ChannelOutOfRange {
            row,
            col,
            value,
            max,
        }
    }

    /// Creates an [`Error::MaxMismatch`] error.
    #[inline]
    pub fn max_mismatch(expected: i32, got: i32) -> Self {
        Self::MaxMismatch { expected, got }
    }

    /// Returns `true` if this is a bounds-related error.
    #[inline]
    pub fn is_bounds_error(&self) -> bool {
        matches!(self, Self::OutOfBounds { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds() {
        let err = Error::out_of_bounds(100, 50, 80, 60);
        let msg = err.to_string();
        assert!(msg.contains("100"));
        assert!(msg.contains("50"));
        assert!(msg.contains("80x60"));
        assert!(err.is_bounds_error());
    }

    #[test]
    fn test_invalid_dimensions() {
        let err = Error::invalid_dimensions(2, 2, "expected 4 pixels, got 3");
        assert!(err.to_string().contains("2x2"));
        assert!(!err.is_bounds_error());
    }

    #[test]
    fn test_channel_out_of_range() {
        let err = Error::channel_out_of_range(0, 1, 300, 255);
        let msg = err.to_string();
        assert!(msg.contains("300"));
        assert!(msg.contains("[0, 255]"));
    }
}
