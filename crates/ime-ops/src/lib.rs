//! # ime-ops
//!
//! Image operations for the image manipulation engine.
//!
//! Every operation reads an [`Image`](ime_core::Image) and returns a new one;
//! the only in-place routine is the dither sweep, which runs on an image it
//! was handed exclusively.
//!
//! # Modules
//!
//! - [`filter`] - the [`Filter`] sum type, pointwise rules and convolution
//! - [`color`] - brighten, greyscale modes, color matrices (sepia)
//! - [`transform`] - horizontal and vertical flips
//! - [`channels`] - RGB split and combine
//! - [`dither`] - Floyd-Steinberg error diffusion
//! - [`stats`] - per-channel histograms
//!
//! # Example
//!
//! ```rust
//! use ime_core::{Image, Pixel};
//! use ime_ops::{color, filter::Kernel, Filter};
//!
//! let src = Image::filled(4, 4, 255, Pixel::new(100, 150, 200, 255));
//!
//! let bright = color::brighten(20).apply(&src).unwrap();
//! assert_eq!(bright.get(0, 0).unwrap(), Pixel::new(120, 170, 220, 255));
//!
//! let blurred = src.apply_filter(&Filter::from(Kernel::gaussian_3x3())).unwrap();
//! assert_eq!(blurred.dimensions(), (4, 4));
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod channels;
pub mod color;
pub mod dither;
pub mod filter;
pub mod stats;
pub mod transform;

pub use color::{ColorMatrix, GreyscaleMode};
pub use dither::DitherParams;
pub use error::{OpsError, OpsResult};
pub use filter::{Filter, Kernel, PointwiseFilter};
pub use stats::Histogram;
