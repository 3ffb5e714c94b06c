//! Error types for engine operations and configuration loading.

use std::path::PathBuf;
use thiserror::Error;

use ime_ops::color::ParseGreyscaleModeError;
use ime_ops::OpsError;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur during engine operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// No image is stored under the requested name.
    #[error("image not found: {name}")]
    NotFound {
        /// Name that was looked up.
        name: String,
    },

    /// Filter construction or application failed.
    #[error(transparent)]
    Ops(#[from] OpsError),

    /// Raster data model error.
    #[error(transparent)]
    Core(#[from] ime_core::Error),

    /// Greyscale mode name did not parse.
    #[error("unknown greyscale mode: {0}")]
    UnknownGreyscale(String),

    /// I/O error reading config files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Config file not found.
    #[error("config file not found: {path}")]
    ConfigNotFound {
        /// Path that was searched.
        path: PathBuf,
    },
}

impl EngineError {
    /// Creates an [`EngineError::NotFound`] error.
    #[inline]
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    /// Returns `true` if this is an unknown-image error.
    #[inline]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` if this is a size mismatch between source images.
    #[inline]
    pub fn is_dimension_mismatch(&self) -> bool {
        matches!(self, Self::Ops(OpsError::DimensionMismatch { .. }))
    }

    /// Returns `true` if a kernel or color matrix was rejected.
    #[inline]
    pub fn is_invalid_kernel(&self) -> bool {
        matches!(self, Self::Ops(OpsError::InvalidKernel(_)))
    }
}

impl From<ParseGreyscaleModeError> for EngineError {
    fn from(err: ParseGreyscaleModeError) -> Self {
        Self::UnknownGreyscale(err.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found() {
        let err = EngineError::not_found("koala");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "image not found: koala");
    }

    #[test]
    fn test_ops_classification() {
        let err: EngineError = OpsError::dimension_mismatch((2, 2), (2, 3)).into();
        assert!(err.is_dimension_mismatch());
        assert!(!err.is_not_found());

        let err: EngineError = OpsError::InvalidKernel("even".into()).into();
        assert!(err.is_invalid_kernel());
    }
}
