//! Geometric transformations.
//!
//! # Operations
//!
//! - [`flip_horizontal`] - left-right mirror
//! - [`flip_vertical`] - top-bottom mirror
//!
//! Both are pointwise rules reading the reflected source coordinate, which is
//! always in range for an output coordinate that is.
//!
//! # Example
//!
//! ```rust
//! use ime_core::{Image, Pixel};
//! use ime_ops::transform::flip_horizontal;
//!
//! let src = Image::from_fn(2, 1, 255, |_, col| Pixel::grey(col as i32, 255)).unwrap();
//! let flipped = flip_horizontal().apply(&src).unwrap();
//! assert_eq!(flipped.get(0, 0).unwrap(), Pixel::grey(1, 255));
//! ```

use crate::filter::PointwiseFilter;

/// Builds a filter mirroring the image left-right.
///
/// `out(row, col) = src(row, width - 1 - col)`
pub fn flip_horizontal() -> PointwiseFilter {
    PointwiseFilter::new("horizontal-flip", |img, row, col| {
        img.get(row, img.width() - 1 - col)
    })
}

/// Builds a filter mirroring the image top-bottom.
///
/// `out(row, col) = src(height - 1 - row, col)`
pub fn flip_vertical() -> PointwiseFilter {
    PointwiseFilter::new("vertical-flip", |img, row, col| {
        img.get(img.height() - 1 - row, col)
    })
}
