//! Error diffusion dithering.
//!
//! Dithering is not a [`Filter`](crate::filter::Filter): it sweeps a greyscale
//! image in place, row-major, quantizing each pixel to one of two levels and
//! pushing the quantization error onto neighbors that have not been visited.
//!
//! # Algorithm
//!
//! At each `(row, col)`:
//!
//! 1. `old` = current red channel (already carrying diffused error)
//! 2. `new` = `low` if `old <= threshold`, else `high`
//! 3. write `grey(new)` and compute `error = old - new`
//! 4. for each kernel neighbor inside the image, write
//!    `grey(round(neighbor + weight * error))`, clamped
//!
//! Because every neighbor write clamps, contributions are order-sensitive.
//!
//! # Kernel
//!
//! ```text
//!        X   7
//!    3   5   1
//! ```
//!
//! Weights: 7/16 right, 3/16 bottom-left, 5/16 bottom, 1/16 bottom-right.

use ime_core::{Image, Pixel};
use tracing::trace;

use crate::color::{greyscale, GreyscaleMode};
use crate::OpsResult;

/// An error diffusion kernel.
///
/// Each entry is `(d_row, d_col, weight)`; a neighbor receives
/// `error * weight / divisor`.
#[derive(Debug, Clone, Copy)]
pub struct DiffusionKernel {
    /// Neighbor offsets and weights.
    pub entries: &'static [(i32, i32, u8)],
    /// Total divisor for normalizing weights.
    pub divisor: u8,
}

/// Floyd-Steinberg kernel, 100% error propagation (16/16).
pub const FLOYD_STEINBERG: DiffusionKernel = DiffusionKernel {
    entries: &[
        (0, 1, 7),  // right
        (1, -1, 3), // bottom-left
        (1, 0, 5),  // bottom
        (1, 1, 1),  // bottom-right
    ],
    divisor: 16,
};

/// Two-level quantization parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DitherParams {
    /// Values at or below this quantize to `low`.
    pub threshold: i32,
    /// Dark level.
    pub low: i32,
    /// Bright level.
    pub high: i32,
}

impl Default for DitherParams {
    fn default() -> Self {
        Self {
            threshold: 127,
            low: 0,
            high: 255,
        }
    }
}

impl DitherParams {
    /// Quantizes one value.
    #[inline]
    pub fn quantize(&self, value: i32) -> i32 {
        if value <= self.threshold {
            self.low
        } else {
            self.high
        }
    }
}

/// Sweeps `image` in place with the Floyd-Steinberg kernel.
///
/// The image is treated as greyscale: only the red channel is read, and every
/// write stores the same value in all three channels.
pub fn error_diffuse(image: &mut Image, params: &DitherParams) -> OpsResult<()> {
    error_diffuse_with(image, params, &FLOYD_STEINBERG)
}

/// Sweeps `image` in place with an arbitrary diffusion kernel.
pub fn error_diffuse_with(
    image: &mut Image,
    params: &DitherParams,
    kernel: &DiffusionKernel,
) -> OpsResult<()> {
    trace!(
        width = image.width(),
        height = image.height(),
        threshold = params.threshold,
        "error_diffuse"
    );

    let (width, height) = (image.width() as i64, image.height() as i64);
    let max = image.max();
    let divisor = kernel.divisor as f64;

    for row in 0..image.height() {
        for col in 0..image.width() {
            let old = image.get(row, col)?.red();
            let new = params.quantize(old);
            let error = (old - new) as f64;
            image.set(row, col, Pixel::grey(new, max))?;

            for &(dr, dc, weight) in kernel.entries {
                let (nr, nc) = (row as i64 + dr as i64, col as i64 + dc as i64);
                if nr < 0 || nr >= height || nc < 0 || nc >= width {
                    continue;
                }
                let (nr, nc) = (nr as u32, nc as u32);
                let share = (weight as f64 / divisor) * error;
                let value = (image.get(nr, nc)?.red() as f64 + share).round() as i32;
                image.set(nr, nc, Pixel::grey(value, max))?;
            }
        }
    }

    Ok(())
}

/// Luma-greyscales `src` and dithers the result.
///
/// `src` is untouched; the sweep runs on the freshly built greyscale image.
///
/// # Example
///
/// ```rust
/// use ime_core::{Image, Pixel};
/// use ime_ops::dither::{dither, DitherParams};
///
/// let src = Image::filled(2, 2, 255, Pixel::grey(200, 255));
/// let out = dither(&src, &DitherParams::default()).unwrap();
/// assert!(out.pixels().all(|(_, _, px)| px == Pixel::grey(255, 255)));
/// ```
pub fn dither(src: &Image, params: &DitherParams) -> OpsResult<Image> {
    let mut scratch = greyscale(GreyscaleMode::Luma).apply(src)?;
    error_diffuse(&mut scratch, params)?;
    Ok(scratch)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grey_image(width: u32, height: u32, values: &[i32]) -> Image {
        let pixels = values.iter().map(|&v| Pixel::grey(v, 255)).collect();
        Image::from_pixels(width, height, 255, pixels).unwrap()
    }

    fn reds(img: &Image) -> Vec<i32> {
        img.as_pixels().iter().map(Pixel::red).collect()
    }

    #[test]
    fn test_kernel_weights_sum_to_divisor() {
        let total: u32 = FLOYD_STEINBERG.entries.iter().map(|e| e.2 as u32).sum();
        assert_eq!(total, FLOYD_STEINBERG.divisor as u32);
    }

    #[test]
    fn test_quantize() {
        let p = DitherParams::default();
        assert_eq!(p.quantize(127), 0);
        assert_eq!(p.quantize(128), 255);
        assert_eq!(p.quantize(-5), 0);
    }

    #[test]
    fn test_uniform_bright() {
        // 200 -> 255 everywhere; negative error pulls neighbors down but
        // never below the threshold on a 2x2 grid
        let mut img = grey_image(2, 2, &[200; 4]);
        error_diffuse(&mut img, &DitherParams::default()).unwrap();
        assert_eq!(reds(&img), vec![255, 255, 255, 255]);
    }

    #[test]
    fn test_uniform_mid_grey() {
        // (0,0) 100 -> 0, err 100: right 144, below 131, below-right 106
        // (0,1) 144 -> 255, err -111: below-left 110, below 71
        // (1,0) 110 -> 0, err 110: right 119
        // (1,1) 119 -> 0
        let mut img = grey_image(2, 2, &[100; 4]);
        error_diffuse(&mut img, &DitherParams::default()).unwrap();
        assert_eq!(reds(&img), vec![0, 255, 0, 0]);
    }

    #[test]
    fn test_single_row() {
        let mut img = grey_image(3, 1, &[100, 100, 100]);
        error_diffuse(&mut img, &DitherParams::default()).unwrap();
        assert_eq!(reds(&img), vec![0, 255, 0]);
    }

    #[test]
    fn test_neighbor_write_clamps() {
        // 250 + 127 * 7/16 overflows and clamps to 255 before quantizing
        let mut img = grey_image(2, 1, &[127, 250]);
        error_diffuse(&mut img, &DitherParams::default()).unwrap();
        assert_eq!(reds(&img), vec![0, 255]);
    }

    #[test]
    fn test_output_is_binary_grey() {
        let values: Vec<i32> = (0..64).map(|i| (i * 37) % 256).collect();
        let mut img = grey_image(8, 8, &values);
        error_diffuse(&mut img, &DitherParams::default()).unwrap();
        for (_, _, px) in img.pixels() {
            assert!(px.red() == 0 || px.red() == 255);
            assert_eq!(px.red(), px.green());
            assert_eq!(px.red(), px.blue());
        }
    }

    #[test]
    fn test_dither_leaves_source() {
        let src = Image::filled(3, 3, 255, Pixel::new(90, 140, 30, 255));
        let before = src.clone();
        let out = dither(&src, &DitherParams::default()).unwrap();
        assert_eq!(src, before);
        assert_eq!(out.dimensions(), (3, 3));
        assert_eq!(out.max(), 255);
    }

    #[test]
    fn test_dither_is_idempotent_on_binary() {
        let src = grey_image(2, 2, &[0, 255, 255, 0]);
        let once = dither(&src, &DitherParams::default()).unwrap();
        assert_eq!(once, src);
    }

    #[test]
    fn test_custom_levels() {
        let params = DitherParams {
            threshold: 50,
            low: 10,
            high: 90,
        };
        let mut img = grey_image(1, 1, &[60]);
        error_diffuse(&mut img, &params).unwrap();
        assert_eq!(reds(&img), vec![90]);
    }
}
