//! Filter abstraction and convolution.
//!
//! Every image-to-image operation in this crate is one of three filter kinds:
//!
//! - [`Filter::Pointwise`] - a coordinate rule evaluated at every output slot
//!   (brighten, flips, greyscale)
//! - [`Filter::Convolution`] - a square odd [`Kernel`] summed over each
//!   neighborhood (blur, sharpen)
//! - [`Filter::ColorMatrix`] - a 3x3 [`ColorMatrix`] applied to each `[r, g, b]`
//!   column vector (sepia)
//!
//! All three produce a new image with the source's width, height and max.
//!
//! # Kernels
//!
//! - [`Kernel::gaussian_3x3`] - 3x3 Gaussian blur
//! - [`Kernel::sharpen_5x5`] - 5x5 sharpen
//!
//! # Example
//!
//! ```rust
//! use ime_core::{Image, Pixel};
//! use ime_ops::filter::{Filter, Kernel};
//!
//! let src = Image::filled(8, 8, 255, Pixel::grey(100, 255));
//! let blurred = src.apply_filter(&Filter::from(Kernel::gaussian_3x3())).unwrap();
//! assert_eq!(blurred.get(4, 4).unwrap().red(), 100);
//! // zero padding dims the corners
//! assert!(blurred.get(0, 0).unwrap().red() < 100);
//! ```

use std::fmt;

use ime_core::{Image, ImageFilter, Pixel};
use tracing::trace;

use crate::color::ColorMatrix;
use crate::{OpsError, OpsResult};

/// Square convolution kernel with odd side length.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    /// Row-major weights.
    data: Vec<f64>,
    /// Side length (odd).
    size: usize,
}

impl Kernel {
    /// Creates a kernel from rows.
    ///
    /// # Errors
    ///
    /// Returns [`OpsError::InvalidKernel`] unless `rows` is non-empty, square,
    /// and has an odd side length.
    ///
    /// # Example
    ///
    /// ```rust
    /// use ime_ops::filter::Kernel;
    ///
    /// assert!(Kernel::new(vec![vec![1.0]]).is_ok());
    /// assert!(Kernel::new(vec![vec![0.5, 0.5], vec![0.5, 0.5]]).is_err());
    /// ```
    pub fn new(rows: Vec<Vec<f64>>) -> OpsResult<Self> {
        let size = rows.len();
        if size % 2 == 0 {
            return Err(OpsError::InvalidKernel(format!(
                "kernel side length must be odd, got {}",
                size
            )));
        }
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != size) {
            return Err(OpsError::InvalidKernel(format!(
                "kernel must be square: row {} has {} entries, expected {}",
                i,
                row.len(),
                size
            )));
        }
        Ok(Self {
            data: rows.into_iter().flatten().collect(),
            size,
        })
    }

    /// Creates the 3x3 Gaussian blur kernel.
    ///
    /// ```text
    /// 1/16 1/8 1/16
    /// 1/8  1/4 1/8
    /// 1/16 1/8 1/16
    /// ```
    #[rustfmt::skip]
    pub fn gaussian_3x3() -> Self {
        let (c, e, m) = (1.0 / 16.0, 1.0 / 8.0, 1.0 / 4.0);
        Self {
            data: vec![
                c, e, c,
                e, m, e,
                c, e, c,
            ],
            size: 3,
        }
    }

    /// Creates the 5x5 sharpen kernel.
    ///
    /// Outer ring `-1/8`, inner ring `1/4`, center `1`.
    #[rustfmt::skip]
    pub fn sharpen_5x5() -> Self {
        let (o, i) = (-1.0 / 8.0, 1.0 / 4.0);
        Self {
            data: vec![
                o, o, o, o, o,
                o, i, i, i, o,
                o, i, 1.0, i, o,
                o, i, i, i, o,
                o, o, o, o, o,
            ],
            size: 5,
        }
    }

    /// Side length.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Half-size.
    #[inline]
    pub fn radius(&self) -> usize {
        self.size / 2
    }

    /// Weight at `(u, v)`.
    #[inline]
    pub fn weight(&self, u: usize, v: usize) -> f64 {
        self.data[u * self.size + v]
    }

    /// Row-major weights.
    #[inline]
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Weights as nested rows.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.data.chunks(self.size).map(<[f64]>::to_vec).collect()
    }
}

/// Applies a convolution kernel to every channel independently.
///
/// For output `(row, col)` the sum runs over `kernel[u][v] * src(row - r + u, col - r + v)`
/// where `r` is the kernel radius. Neighbors outside the image contribute zero.
/// The rounded sum is clamped by pixel construction.
pub fn convolve(src: &Image, kernel: &Kernel) -> OpsResult<Image> {
    trace!(
        width = src.width(),
        height = src.height(),
        kernel = kernel.size(),
        "convolve"
    );

    let (width, height) = (src.width() as i64, src.height() as i64);
    let radius = kernel.radius() as i64;
    let pixels = src.as_pixels();
    let max = src.max();

    let out = Image::from_fn(src.width(), src.height(), max, |row, col| {
        let mut sums = [0.0f64; 3];
        for u in 0..kernel.size() {
            let sy = row as i64 - radius + u as i64;
            if sy < 0 || sy >= height {
                continue;
            }
            for v in 0..kernel.size() {
                let sx = col as i64 - radius + v as i64;
                if sx < 0 || sx >= width {
                    continue;
                }
                let w = kernel.weight(u, v);
                let px = pixels[(sy * width + sx) as usize];
                for (sum, c) in sums.iter_mut().zip(px.channels()) {
                    *sum += w * c as f64;
                }
            }
        }
        Pixel::new(
            sums[0].round() as i32,
            sums[1].round() as i32,
            sums[2].round() as i32,
            max,
        )
    })?;

    Ok(out)
}

/// Rule evaluated by a [`PointwiseFilter`]: `(source, row, col) -> output pixel`.
pub type PixelRule = dyn Fn(&Image, u32, u32) -> ime_core::Result<Pixel> + Send + Sync;

/// Filter that evaluates a coordinate rule at every output slot.
///
/// The rule may read any coordinate of the source, which is how flips are
/// expressed. The output has the source's width, height and max.
pub struct PointwiseFilter {
    name: &'static str,
    rule: Box<PixelRule>,
}

impl PointwiseFilter {
    /// Creates a pointwise filter from a rule.
    ///
    /// # Example
    ///
    /// ```rust
    /// use ime_core::{Image, Pixel};
    /// use ime_ops::filter::PointwiseFilter;
    ///
    /// let invert = PointwiseFilter::new("invert", |img, row, col| {
    ///     let px = img.get(row, col)?;
    ///     let m = img.max();
    ///     Ok(Pixel::new(m - px.red(), m - px.green(), m - px.blue(), m))
    /// });
    /// let out = invert.apply(&Image::new(2, 2, 255)).unwrap();
    /// assert_eq!(out.get(1, 1).unwrap(), Pixel::grey(255, 255));
    /// ```
    pub fn new<F>(name: &'static str, rule: F) -> Self
    where
        F: Fn(&Image, u32, u32) -> ime_core::Result<Pixel> + Send + Sync + 'static,
    {
        Self {
            name,
            rule: Box::new(rule),
        }
    }

    /// Rule name, used in logs.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Evaluates the rule over the whole image.
    pub fn apply(&self, src: &Image) -> OpsResult<Image> {
        trace!(
            filter = self.name,
            width = src.width(),
            height = src.height(),
            "pointwise"
        );

        let mut pixels = Vec::with_capacity(src.pixel_count());
        for row in 0..src.height() {
            for col in 0..src.width() {
                pixels.push((self.rule)(src, row, col)?);
            }
        }
        Ok(Image::from_pixels(src.width(), src.height(), src.max(), pixels)?)
    }
}

impl fmt::Debug for PointwiseFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PointwiseFilter")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Closed set of filter kinds.
#[derive(Debug)]
pub enum Filter {
    /// Per-coordinate rule.
    Pointwise(PointwiseFilter),
    /// Neighborhood convolution with zero padding.
    Convolution(Kernel),
    /// Linear channel mix.
    ColorMatrix(ColorMatrix),
}

impl Filter {
    /// Short name of the filter kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Filter::Pointwise(_) => "pointwise",
            Filter::Convolution(_) => "convolution",
            Filter::ColorMatrix(_) => "color-matrix",
        }
    }
}

impl ImageFilter for Filter {
    type Error = OpsError;

    fn apply(&self, image: &Image) -> OpsResult<Image> {
        match self {
            Filter::Pointwise(f) => f.apply(image),
            Filter::Convolution(k) => convolve(image, k),
            Filter::ColorMatrix(m) => crate::color::color_transform(image, m),
        }
    }
}

impl From<PointwiseFilter> for Filter {
    fn from(f: PointwiseFilter) -> Self {
        Filter::Pointwise(f)
    }
}

impl From<Kernel> for Filter {
    fn from(k: Kernel) -> Self {
        Filter::Convolution(k)
    }
}

impl From<ColorMatrix> for Filter {
    fn from(m: ColorMatrix) -> Self {
        Filter::ColorMatrix(m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn grey(v: i32) -> Pixel {
        Pixel::grey(v, 255)
    }

    #[test]
    fn test_kernel_validation() {
        assert!(Kernel::new(vec![vec![1.0]]).is_ok());
        assert!(Kernel::new(vec![vec![0.0; 3]; 3]).is_ok());

        // even
        let err = Kernel::new(vec![vec![0.0; 2]; 2]).unwrap_err();
        assert!(matches!(err, OpsError::InvalidKernel(_)));
        // empty
        assert!(Kernel::new(vec![]).is_err());
        // not square
        assert!(Kernel::new(vec![vec![0.0; 3], vec![0.0; 3], vec![0.0; 2]]).is_err());
        assert!(Kernel::new(vec![vec![0.0; 5]; 3]).is_err());
    }

    #[test]
    fn test_preset_sums() {
        let sum: f64 = Kernel::gaussian_3x3().data().iter().sum();
        assert_relative_eq!(sum, 1.0, epsilon = 1e-12);

        let sharpen = Kernel::sharpen_5x5();
        let sum: f64 = sharpen.data().iter().sum();
        assert_relative_eq!(sum, 1.0, epsilon = 1e-12);
        assert_relative_eq!(sharpen.weight(2, 2), 1.0);
        assert_relative_eq!(sharpen.weight(1, 2), 0.25);
        assert_relative_eq!(sharpen.weight(0, 4), -0.125);
    }

    #[test]
    fn test_to_rows_round_trip() {
        let k = Kernel::sharpen_5x5();
        assert_eq!(Kernel::new(k.to_rows()).unwrap(), k);
    }

    #[test]
    fn test_convolve_identity() {
        let src = Image::from_fn(3, 3, 255, |r, c| grey((r * 3 + c) as i32 * 20)).unwrap();
        let identity = Kernel::new(vec![
            vec![0.0, 0.0, 0.0],
            vec![0.0, 1.0, 0.0],
            vec![0.0, 0.0, 0.0],
        ])
        .unwrap();
        assert_eq!(convolve(&src, &identity).unwrap(), src);
    }

    #[test]
    fn test_convolve_zero_padding() {
        let src = Image::filled(3, 3, 255, grey(160));
        let out = convolve(&src, &Kernel::gaussian_3x3()).unwrap();

        // center sees the whole kernel
        assert_eq!(out.get(1, 1).unwrap(), grey(160));
        // corner sees 1/4 + 2/8 + 1/16 = 9/16 of it
        assert_eq!(out.get(0, 0).unwrap(), grey(90));
        // edge sees 1/4 + 1/8*3 + 1/16*2 = 12/16
        assert_eq!(out.get(0, 1).unwrap(), grey(120));
    }

    #[test]
    fn test_convolve_channels_independent() {
        let src = Image::filled(1, 1, 255, Pixel::new(16, 32, 64, 255));
        let out = convolve(&src, &Kernel::gaussian_3x3()).unwrap();
        assert_eq!(out.get(0, 0).unwrap(), Pixel::new(4, 8, 16, 255));
    }

    #[test]
    fn test_convolve_clamps() {
        let src = Image::filled(5, 5, 255, grey(200));
        let k = Kernel::new(vec![vec![2.0]]).unwrap();
        let out = convolve(&src, &k).unwrap();
        assert!(out.pixels().all(|(_, _, px)| px == grey(255)));

        let k = Kernel::new(vec![vec![-1.0]]).unwrap();
        let out = convolve(&src, &k).unwrap();
        assert!(out.pixels().all(|(_, _, px)| px == grey(0)));
    }

    #[test]
    fn test_pointwise_preserves_shape() {
        let src = Image::new(4, 2, 1023);
        let f = PointwiseFilter::new("ones", |img, _, _| Ok(Pixel::grey(1, img.max())));
        let out = f.apply(&src).unwrap();
        assert_eq!(out.dimensions(), (4, 2));
        assert_eq!(out.max(), 1023);
        assert!(out.pixels().all(|(_, _, px)| px.red() == 1));
    }

    #[test]
    fn test_pointwise_propagates_rule_error() {
        let src = Image::new(2, 2, 255);
        let f = PointwiseFilter::new("oob", |img, row, col| img.get(row + 5, col));
        let err = f.apply(&src).unwrap_err();
        assert!(matches!(err, OpsError::Core(ref e) if e.is_bounds_error()));
    }

    #[test]
    fn test_filter_dispatch() {
        let src = Image::filled(3, 3, 255, grey(100));
        let f = Filter::from(Kernel::gaussian_3x3());
        assert_eq!(f.kind(), "convolution");
        let out = src.apply_filter(&f).unwrap();
        assert_eq!(out.get(1, 1).unwrap(), grey(100));
        assert_eq!(src, Image::filled(3, 3, 255, grey(100)));
    }

    #[test]
    fn test_filter_dispatch_pointwise() {
        let src = Image::from_fn(2, 1, 255, |_, c| grey(c as i32 * 50)).unwrap();
        let f = Filter::from(PointwiseFilter::new("mirror", |img, r, c| {
            img.get(r, img.width() - 1 - c)
        }));
        assert_eq!(f.kind(), "pointwise");
        let out = src.apply_filter(&f).unwrap();
        assert_eq!(out.get(0, 0).unwrap(), grey(50));
        assert_eq!(out.get(0, 1).unwrap(), grey(0));
    }

    #[test]
    fn test_filter_dispatch_color_matrix() {
        let src = Image::filled(2, 2, 255, Pixel::new(10, 20, 30, 255));
        let swap = ColorMatrix::new(vec![
            vec![0.0, 0.0, 1.0],
            vec![0.0, 1.0, 0.0],
            vec![1.0, 0.0, 0.0],
        ])
        .unwrap();
        let f = Filter::from(swap);
        assert_eq!(f.kind(), "color-matrix");
        let out = src.apply_filter(&f).unwrap();
        assert!(out.pixels().all(|(_, _, px)| px == Pixel::new(30, 20, 10, 255)));
    }
}
