//! Per-pixel color operations.
//!
//! - [`brighten`] - add a constant to every channel
//! - [`greyscale`] - replicate one channel or derived quantity into all three
//! - [`ColorMatrix`] / [`color_transform`] - linear channel mix (sepia)
//!
//! # Greyscale modes
//!
//! | Mode        | Name                  | Source quantity             |
//! |-------------|-----------------------|-----------------------------|
//! | `Red`       | `red-component`       | red channel                 |
//! | `Green`     | `green-component`     | green channel               |
//! | `Blue`      | `blue-component`      | blue channel                |
//! | `Value`     | `value-component`     | `max(r, g, b)`              |
//! | `Intensity` | `intensity-component` | `floor((r + g + b) / 3)`    |
//! | `Luma`      | `luma-component`      | `round(Rec.709 weighted)`   |

use std::fmt;
use std::str::FromStr;

use ime_core::{Image, Pixel};
use tracing::trace;

use crate::filter::PointwiseFilter;
use crate::{OpsError, OpsResult};

/// Builds a filter that offsets every channel by `amount`.
///
/// Negative amounts darken. Clamping absorbs overflow at both ends.
///
/// # Example
///
/// ```rust
/// use ime_core::{Image, Pixel};
/// use ime_ops::color::brighten;
///
/// let src = Image::filled(1, 1, 255, Pixel::new(10, 250, 0, 255));
/// let out = brighten(10).apply(&src).unwrap();
/// assert_eq!(out.get(0, 0).unwrap(), Pixel::new(20, 255, 10, 255));
/// ```
pub fn brighten(amount: i32) -> PointwiseFilter {
    PointwiseFilter::new("brighten", move |img, row, col| {
        Ok(img.get(row, col)?.offset(amount))
    })
}

/// Quantity replicated into all three channels by a greyscale filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GreyscaleMode {
    /// Red channel.
    Red,
    /// Green channel.
    Green,
    /// Blue channel.
    Blue,
    /// Largest channel.
    Value,
    /// Truncated channel mean.
    Intensity,
    /// Rec.709 luma.
    Luma,
}

impl GreyscaleMode {
    /// All modes, in declaration order.
    pub const ALL: [GreyscaleMode; 6] = [
        GreyscaleMode::Red,
        GreyscaleMode::Green,
        GreyscaleMode::Blue,
        GreyscaleMode::Value,
        GreyscaleMode::Intensity,
        GreyscaleMode::Luma,
    ];

    /// Canonical component name.
    pub fn name(self) -> &'static str {
        match self {
            GreyscaleMode::Red => "red-component",
            GreyscaleMode::Green => "green-component",
            GreyscaleMode::Blue => "blue-component",
            GreyscaleMode::Value => "value-component",
            GreyscaleMode::Intensity => "intensity-component",
            GreyscaleMode::Luma => "luma-component",
        }
    }

    /// Extracts this mode's quantity from a pixel.
    #[inline]
    pub fn extract(self, px: &Pixel) -> i32 {
        match self {
            GreyscaleMode::Red => px.red(),
            GreyscaleMode::Green => px.green(),
            GreyscaleMode::Blue => px.blue(),
            GreyscaleMode::Value => px.value(),
            GreyscaleMode::Intensity => px.intensity(),
            GreyscaleMode::Luma => px.luma(),
        }
    }
}

impl fmt::Display for GreyscaleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a greyscale mode name does not parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseGreyscaleModeError(pub String);

impl fmt::Display for ParseGreyscaleModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown greyscale mode: {}", self.0)
    }
}

impl std::error::Error for ParseGreyscaleModeError {}

impl FromStr for GreyscaleMode {
    type Err = ParseGreyscaleModeError;

    /// Accepts the component name (`luma-component`) or the bare mode (`luma`),
    /// case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let bare = lower.strip_suffix("-component").unwrap_or(&lower);
        match bare {
            "red" => Ok(GreyscaleMode::Red),
            "green" => Ok(GreyscaleMode::Green),
            "blue" => Ok(GreyscaleMode::Blue),
            "value" => Ok(GreyscaleMode::Value),
            "intensity" => Ok(GreyscaleMode::Intensity),
            "luma" => Ok(GreyscaleMode::Luma),
            _ => Err(ParseGreyscaleModeError(s.to_string())),
        }
    }
}

/// Builds a filter replicating `mode`'s quantity into all three channels.
///
/// The quantity is read from the source pixel at the same coordinate.
pub fn greyscale(mode: GreyscaleMode) -> PointwiseFilter {
    PointwiseFilter::new(mode.name(), move |img, row, col| {
        let px = img.get(row, col)?;
        Ok(Pixel::grey(mode.extract(&px), img.max()))
    })
}

/// 3x3 matrix mixing `[r, g, b]` into new `[r, g, b]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorMatrix {
    m: [[f64; 3]; 3],
}

impl ColorMatrix {
    /// Creates a matrix from rows.
    ///
    /// # Errors
    ///
    /// Returns [`OpsError::InvalidKernel`] unless `rows` is exactly 3x3. Row
    /// `k` produces output channel `k`.
    pub fn new(rows: Vec<Vec<f64>>) -> OpsResult<Self> {
        if rows.len() != 3 {
            return Err(OpsError::InvalidKernel(format!(
                "color matrix must have 3 rows, got {}",
                rows.len()
            )));
        }
        let mut m = [[0.0; 3]; 3];
        for (i, row) in rows.iter().enumerate() {
            if row.len() != 3 {
                return Err(OpsError::InvalidKernel(format!(
                    "color matrix must have 3 columns: row {} has {}",
                    i,
                    row.len()
                )));
            }
            m[i].copy_from_slice(row);
        }
        Ok(Self { m })
    }

    /// Creates a matrix from a fixed array.
    #[inline]
    pub const fn from_array(m: [[f64; 3]; 3]) -> Self {
        Self { m }
    }

    /// Identity matrix.
    pub const fn identity() -> Self {
        Self::from_array([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]])
    }

    /// Sepia tone matrix.
    pub const fn sepia() -> Self {
        Self::from_array([
            [0.393, 0.769, 0.189],
            [0.349, 0.686, 0.168],
            [0.272, 0.534, 0.131],
        ])
    }

    /// Matrix rows.
    #[inline]
    pub fn rows(&self) -> &[[f64; 3]; 3] {
        &self.m
    }

    /// Weights as nested rows.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.m.iter().map(|r| r.to_vec()).collect()
    }

    /// Multiplies `[r, g, b]` by the matrix, rounding each result.
    #[inline]
    pub fn transform(&self, rgb: [i32; 3]) -> [i32; 3] {
        let [r, g, b] = rgb.map(|c| c as f64);
        self.m.map(|row| (row[0] * r + row[1] * g + row[2] * b).round() as i32)
    }
}

/// Applies a color matrix to every pixel.
pub fn color_transform(src: &Image, matrix: &ColorMatrix) -> OpsResult<Image> {
    trace!(width = src.width(), height = src.height(), "color_transform");

    let max = src.max();
    let pixels = src
        .as_pixels()
        .iter()
        .map(|px| Pixel::from_channels(matrix.transform(px.channels()), max))
        .collect();
    Ok(Image::from_pixels(src.width(), src.height(), max, pixels)?)
}
