//! # ime-core
//!
//! Core types for the image manipulation engine.
//!
//! This crate provides the raster data model used throughout the workspace:
//!
//! - [`Pixel`] - Integer RGB triple with a shared channel ceiling, clamped on construction
//! - [`Image`] - Fixed-size row-major grid of pixels
//! - [`ImageFilter`] - Seam through which operations derive new images
//! - [`Error`] - Bounds and shape errors
//!
//! ## Crate Structure
//!
//! This crate has no internal dependencies. The other crates build on it:
//!
//! ```text
//! ime-core (this crate)
//!    ^
//!    |
//!    +-- ime-ops (filters, dither, channels)
//!         ^
//!         |
//!         +-- ime-engine (named session store)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod image;
pub mod pixel;

// Re-exports for convenience
pub use error::*;
pub use image::*;
pub use pixel::{clamp_channel, Pixel, REC709_LUMA, REC709_LUMA_B, REC709_LUMA_G, REC709_LUMA_R};

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```
/// use ime_core::prelude::*;
///
/// let img = Image::new(2, 2, 255);
/// assert_eq!(img.get(0, 0).unwrap(), Pixel::new(0, 0, 0, 255));
/// ```
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::image::{Image, ImageFilter};
    pub use crate::pixel::{clamp_channel, Pixel, REC709_LUMA};
}
