//! Error types for image operations.

use thiserror::Error;

/// Error type for image operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OpsError {
    /// Convolution kernel or color matrix has an unusable shape.
    #[error("invalid kernel: {0}")]
    InvalidKernel(String),

    /// Images that must share dimensions do not.
    #[error("dimension mismatch: {a_width}x{a_height} vs {b_width}x{b_height}")]
    DimensionMismatch {
        /// First image width
        a_width: u32,
        /// First image height
        a_height: u32,
        /// Second image width
        b_width: u32,
        /// Second image height
        b_height: u32,
    },

    /// Error from the raster data model.
    #[error(transparent)]
    Core(#[from] ime_core::Error),
}

impl OpsError {
    /// Creates an [`OpsError::DimensionMismatch`] error.
    #[inline]
    pub fn dimension_mismatch(a: (u32, u32), b: (u32, u32)) -> Self {
        Self::DimensionMismatch {
            a_width: a.0,
            a_height: a.1,
            b_width: b.0,
            b_height: b.1,
        }
    }
}

/// Result type for image operations.
pub type OpsResult<T> = Result<T, OpsError>;
