//! Engine configuration.
//!
//! The kernels used by the named operations are configuration, not part of
//! the convolution or color-matrix mechanisms. Defaults reproduce the classic
//! presets; a YAML file can override any subset:
//!
//! ```yaml
//! blur_kernel:
//!   - [0.0625, 0.125, 0.0625]
//!   - [0.125, 0.25, 0.125]
//!   - [0.0625, 0.125, 0.0625]
//! dither:
//!   threshold: 100
//! ```
//!
//! # Example
//!
//! ```rust
//! use ime_engine::EngineConfig;
//!
//! let cfg = EngineConfig::from_yaml_str("dither: { threshold: 100 }").unwrap();
//! assert_eq!(cfg.dither.threshold, 100);
//! assert_eq!(cfg.dither.high, 255);
//! assert_eq!(cfg.blur_kernel.len(), 3);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use ime_ops::{ColorMatrix, DitherParams, Kernel};

use crate::error::{EngineError, EngineResult};

/// Dither quantization settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DitherConfig {
    /// Values at or below this quantize to `low`.
    pub threshold: i32,
    /// Dark level.
    pub low: i32,
    /// Bright level.
    pub high: i32,
}

impl Default for DitherConfig {
    fn default() -> Self {
        let p = DitherParams::default();
        Self {
            threshold: p.threshold,
            low: p.low,
            high: p.high,
        }
    }
}

impl From<DitherConfig> for DitherParams {
    fn from(c: DitherConfig) -> Self {
        DitherParams {
            threshold: c.threshold,
            low: c.low,
            high: c.high,
        }
    }
}

/// Kernels and parameters used by the engine's named operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Convolution kernel for `blur`.
    pub blur_kernel: Vec<Vec<f64>>,
    /// Convolution kernel for `sharpen`.
    pub sharpen_kernel: Vec<Vec<f64>>,
    /// Color matrix for `sepia`.
    pub sepia_matrix: Vec<Vec<f64>>,
    /// Dither quantization.
    pub dither: DitherConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            blur_kernel: Kernel::gaussian_3x3().to_rows(),
            sharpen_kernel: Kernel::sharpen_5x5().to_rows(),
            sepia_matrix: ColorMatrix::sepia().to_rows(),
            dither: DitherConfig::default(),
        }
    }
}

/// Validated filters built from an [`EngineConfig`].
#[derive(Debug, Clone, PartialEq)]
pub struct Presets {
    /// Blur kernel.
    pub blur: Kernel,
    /// Sharpen kernel.
    pub sharpen: Kernel,
    /// Sepia matrix.
    pub sepia: ColorMatrix,
    /// Dither parameters.
    pub dither: DitherParams,
}

impl Default for Presets {
    fn default() -> Self {
        Self {
            blur: Kernel::gaussian_3x3(),
            sharpen: Kernel::sharpen_5x5(),
            sepia: ColorMatrix::sepia(),
            dither: DitherParams::default(),
        }
    }
}

impl EngineConfig {
    /// Parses a YAML document and validates it.
    pub fn from_yaml_str(yaml: &str) -> EngineResult<Self> {
        let cfg: Self = serde_yaml::from_str(yaml)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Loads and validates a YAML config file.
    pub fn from_file(path: impl AsRef<Path>) -> EngineResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(EngineError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let cfg = Self::from_yaml_str(&content)?;
        info!(path = %path.display(), "loaded engine config");
        Ok(cfg)
    }

    /// Serializes to YAML.
    pub fn to_yaml(&self) -> EngineResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Builds the kernels, failing with `InvalidKernel` on a malformed entry.
    pub fn compile(&self) -> EngineResult<Presets> {
        Ok(Presets {
            blur: Kernel::new(self.blur_kernel.clone())?,
            sharpen: Kernel::new(self.sharpen_kernel.clone())?,
            sepia: ColorMatrix::new(self.sepia_matrix.clone())?,
            dither: self.dither.into(),
        })
    }

    /// Checks that every kernel is well formed.
    pub fn validate(&self) -> EngineResult<()> {
        self.compile().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::io::Write;

    #[test]
    fn test_default_compiles_to_presets() {
        let presets = EngineConfig::default().compile().unwrap();
        assert_eq!(presets, Presets::default());
    }

    #[test]
    fn test_partial_override() {
        let cfg = EngineConfig::from_yaml_str("blur_kernel: [[1.0]]\n").unwrap();
        assert_eq!(cfg.blur_kernel, vec![vec![1.0]]);
        assert_eq!(cfg.sharpen_kernel, Kernel::sharpen_5x5().to_rows());
        assert_eq!(cfg.dither, DitherConfig::default());
    }

    #[test]
    fn test_yaml_round_trip() {
        let cfg = EngineConfig::default();
        let yaml = cfg.to_yaml().unwrap();
        let back = EngineConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(back, cfg);
        assert_relative_eq!(back.sepia_matrix[2][2], 0.131);
    }

    #[test]
    fn test_rejects_even_kernel() {
        let err = EngineConfig::from_yaml_str("sharpen_kernel: [[1.0, 0.0], [0.0, 1.0]]").unwrap_err();
        assert!(err.is_invalid_kernel());
    }

    #[test]
    fn test_rejects_short_color_matrix() {
        let err = EngineConfig::from_yaml_str("sepia_matrix: [[1.0, 0.0, 0.0]]").unwrap_err();
        assert!(err.is_invalid_kernel());
    }

    #[test]
    fn test_rejects_bad_yaml() {
        let err = EngineConfig::from_yaml_str("dither: [oops").unwrap_err();
        assert!(matches!(err, EngineError::Yaml(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "dither:\n  threshold: 64\n  high: 200").unwrap();
        let cfg = EngineConfig::from_file(file.path()).unwrap();
        assert_eq!(cfg.dither.threshold, 64);
        assert_eq!(cfg.dither.low, 0);
        assert_eq!(cfg.dither.high, 200);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = EngineConfig::from_file(dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, EngineError::ConfigNotFound { .. }));
    }
}
