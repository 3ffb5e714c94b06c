//! Image buffer type.
//!
//! This module provides the raster container used by every operation:
//! - [`Image`] - fixed-size grid of [`Pixel`]s sharing one channel ceiling
//! - [`ImageFilter`] - seam through which filters turn one image into another
//!
//! # Memory Layout
//!
//! Pixels are stored in **row-major** order, top-to-bottom:
//!
//! ```text
//! [P(0,0) P(0,1) ... P(0,w-1)]  <- row 0
//! [P(1,0) P(1,1) ... P(1,w-1)]  <- row 1
//! ...
//! ```
//!
//! Coordinates are `(row, col)` with `row < height` and `col < width`.
//!
//! # Usage
//!
//! ```rust
//! use ime_core::{Image, Pixel};
//!
//! let mut img = Image::new(4, 2, 255);
//! img.set(1, 3, Pixel::new(10, 20, 30, 255)).unwrap();
//! assert_eq!(img.get(1, 3).unwrap().green(), 20);
//! assert!(img.get(2, 0).is_err());
//! ```
//!
//! # Invariants
//!
//! - every stored pixel has `max == image.max()`
//! - dimensions and max never change after construction

use crate::{Error, Pixel, Result};

/// Operation that derives a new [`Image`] from an existing one.
///
/// Implementors must not mutate the input; they allocate their output.
pub trait ImageFilter {
    /// Error produced when the filter cannot be applied.
    type Error;

    /// Applies the filter to `image`, returning a fresh image.
    fn apply(&self, image: &Image) -> std::result::Result<Image, Self::Error>;
}

/// Owned RGB raster with a shared channel ceiling.
///
/// # Example
///
/// ```rust
/// use ime_core::{Image, Pixel};
///
/// let img = Image::filled(3, 3, 255, Pixel::grey(128, 255));
/// assert_eq!(img.pixel_count(), 9);
/// assert!(img.pixels().all(|(_, _, px)| px.red() == 128));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Image {
    /// Pixel grid, row-major
    pixels: Vec<Pixel>,
    /// Image width in pixels
    width: u32,
    /// Image height in pixels
    height: u32,
    /// Channel ceiling shared by every pixel
    max: i32,
}

impl Image {
    /// Creates a black image.
    ///
    /// A negative `max` is treated as `0`.
    pub fn new(width: u32, height: u32, max: i32) -> Self {
        let max = max.max(0);
        Self::filled(width, height, max, Pixel::new(0, 0, 0, max))
    }

    /// Creates an image with every slot set to a pixel built from `pixel`'s
    /// channels against `max`.
    pub fn filled(width: u32, height: u32, max: i32, pixel: Pixel) -> Self {
        let max = max.max(0);
        let pixel = Pixel::from_channels(pixel.channels(), max);
        Self {
            pixels: vec![pixel; width as usize * height as usize],
            width,
            height,
            max,
        }
    }

    /// Creates an image from row-major pixels.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidDimensions`] if `pixels.len() != width * height`
    /// - [`Error::MaxMismatch`] if any pixel's max differs from `max`
    pub fn from_pixels(width: u32, height: u32, max: i32, pixels: Vec<Pixel>) -> Result<Self> {
        let max = max.max(0);
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} pixels, got {}", expected, pixels.len()),
            ));
        }
        if let Some(px) = pixels.iter().find(|px| px.max() != max) {
            return Err(Error::max_mismatch(max, px.max()));
        }
        Ok(Self {
            pixels,
            width,
            height,
            max,
        })
    }

    /// Creates an image by evaluating `f(row, col)` at every coordinate, row-major.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MaxMismatch`] if `f` produces a pixel whose max differs
    /// from `max`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use ime_core::{Image, Pixel};
    ///
    /// let ramp = Image::from_fn(4, 1, 255, |_, col| Pixel::grey(col as i32 * 10, 255)).unwrap();
    /// assert_eq!(ramp.get(0, 3).unwrap().red(), 30);
    /// ```
    pub fn from_fn<F>(width: u32, height: u32, max: i32, mut f: F) -> Result<Self>
    where
        F: FnMut(u32, u32) -> Pixel,
    {
        let max = max.max(0);
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for row in 0..height {
            for col in 0..width {
                let px = f(row, col);
                if px.max() != max {
                    return Err(Error::max_mismatch(max, px.max()));
                }
                pixels.push(px);
            }
        }
        Ok(Self {
            pixels,
            width,
            height,
            max,
        })
    }

    /// Creates an image from row-major `[r, g, b]` triples without clamping.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidMax`] if `max` is negative
    /// - [`Error::InvalidDimensions`] if `rgb.len() != width * height`
    /// - [`Error::ChannelOutOfRange`] for the first channel outside `[0, max]`
    pub fn from_raw(width: u32, height: u32, max: i32, rgb: &[[i32; 3]]) -> Result<Self> {
        if max < 0 {
            return Err(Error::InvalidMax(max));
        }
        let expected = width as usize * height as usize;
        if rgb.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} triples, got {}", expected, rgb.len()),
            ));
        }
        let mut pixels = Vec::with_capacity(expected);
        for (i, triple) in rgb.iter().enumerate() {
            if let Some(&value) = triple.iter().find(|&&v| v < 0 || v > max) {
                let (row, col) = ((i / width as usize) as u32, (i % width as usize) as u32);
                return Err(Error::channel_out_of_range(row, col, value, max));
            }
            pixels.push(Pixel::from_channels(*triple, max));
        }
        Ok(Self {
            pixels,
            width,
            height,
            max,
        })
    }

    /// Row-major `[r, g, b]` triples.
    pub fn to_raw(&self) -> Vec<[i32; 3]> {
        self.pixels.iter().map(Pixel::channels).collect()
    }

    /// Returns the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the channel ceiling.
    #[inline]
    pub fn max(&self) -> i32 {
        self.max
    }

    /// Returns the image dimensions as (width, height).
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the total number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    /// Returns `true` if the image has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns `true` if `(row, col)` lies inside the grid.
    #[inline]
    pub fn contains(&self, row: u32, col: u32) -> bool {
        row < self.height && col < self.width
    }

    #[inline]
    fn offset(&self, row: u32, col: u32) -> Result<usize> {
        if !self.contains(row, col) {
            return Err(Error::out_of_bounds(row, col, self.width, self.height));
        }
        Ok(row as usize * self.width as usize + col as usize)
    }

    /// Returns the pixel at `(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if the coordinate is outside the grid.
    #[inline]
    pub fn get(&self, row: u32, col: u32) -> Result<Pixel> {
        let idx = self.offset(row, col)?;
        Ok(self.pixels[idx])
    }

    /// Replaces the pixel at `(row, col)`.
    ///
    /// # Errors
    ///
    /// - [`Error::OutOfBounds`] if the coordinate is outside the grid
    /// - [`Error::MaxMismatch`] if `pixel.max() != self.max()`
    #[inline]
    pub fn set(&mut self, row: u32, col: u32, pixel: Pixel) -> Result<()> {
        let idx = self.offset(row, col)?;
        if pixel.max() != self.max {
            return Err(Error::max_mismatch(self.max, pixel.max()));
        }
        self.pixels[idx] = pixel;
        Ok(())
    }

    /// Returns the row-major pixel slice.
    #[inline]
    pub fn as_pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// Returns the pixels of one row, or `None` if `row >= height`.
    #[inline]
    pub fn row(&self, row: u32) -> Option<&[Pixel]> {
        if row >= self.height {
            return None;
        }
        let start = row as usize * self.width as usize;
        self.pixels.get(start..start + self.width as usize)
    }

    /// Iterates over all pixels in row-major order.
    ///
    /// Yields `(row, col, pixel)` tuples.
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32, Pixel)> + '_ {
        let width = self.width.max(1);
        self.pixels
            .iter()
            .enumerate()
            .map(move |(i, px)| ((i as u32) / width, (i as u32) % width, *px))
    }

    /// Applies a filter, returning a new image. `self` is left untouched.
    #[inline]
    pub fn apply_filter<F: ImageFilter>(&self, filter: &F) -> std::result::Result<Image, F::Error> {
        filter.apply(self)
    }
}
