//! Channel split and combine.
//!
//! [`split`] produces one greyscale image per channel; [`combine`] rebuilds an
//! RGB image by taking red from the first source, green from the second and
//! blue from the third. `combine(split(img))` reproduces `img`.

use ime_core::{Image, Pixel};
use tracing::trace;

use crate::color::{greyscale, GreyscaleMode};
use crate::{OpsError, OpsResult};

/// Red, green and blue greyscale images produced by [`split`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelImages {
    /// Red channel replicated into all three channels.
    pub red: Image,
    /// Green channel replicated into all three channels.
    pub green: Image,
    /// Blue channel replicated into all three channels.
    pub blue: Image,
}

/// Splits an image into three channel-greyscale images.
pub fn split(src: &Image) -> OpsResult<ChannelImages> {
    Ok(ChannelImages {
        red: greyscale(GreyscaleMode::Red).apply(src)?,
        green: greyscale(GreyscaleMode::Green).apply(src)?,
        blue: greyscale(GreyscaleMode::Blue).apply(src)?,
    })
}

/// Combines the red channel of `red`, green of `green` and blue of `blue`.
///
/// The result's max is the largest of the three sources' maxes. Channels are
/// not rescaled.
///
/// # Errors
///
/// Returns [`OpsError::DimensionMismatch`] unless all three sources share
/// width and height.
///
/// # Example
///
/// ```rust
/// use ime_core::{Image, Pixel};
/// use ime_ops::channels::combine;
///
/// let r = Image::filled(1, 1, 255, Pixel::grey(10, 255));
/// let g = Image::filled(1, 1, 100, Pixel::grey(20, 100));
/// let b = Image::filled(1, 1, 255, Pixel::grey(30, 255));
/// let rgb = combine(&r, &g, &b).unwrap();
/// assert_eq!(rgb.get(0, 0).unwrap(), Pixel::new(10, 20, 30, 255));
/// ```
pub fn combine(red: &Image, green: &Image, blue: &Image) -> OpsResult<Image> {
    trace!(
        red = ?red.dimensions(),
        green = ?green.dimensions(),
        blue = ?blue.dimensions(),
        "combine"
    );

    for other in [green, blue] {
        if other.dimensions() != red.dimensions() {
            return Err(OpsError::dimension_mismatch(
                red.dimensions(),
                other.dimensions(),
            ));
        }
    }

    let max = red.max().max(green.max()).max(blue.max());
    let pixels = red
        .as_pixels()
        .iter()
        .zip(green.as_pixels())
        .zip(blue.as_pixels())
        .map(|((r, g), b)| Pixel::new(r.red(), g.green(), b.blue(), max))
        .collect();

    Ok(Image::from_pixels(red.width(), red.height(), max, pixels)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Image {
        Image::from_fn(3, 2, 255, |row, col| {
            Pixel::new(row as i32 * 50, col as i32 * 40, 255 - col as i32, 255)
        })
        .unwrap()
    }

    #[test]
    fn test_split_replicates() {
        let parts = split(&sample()).unwrap();
        let px = parts.red.get(1, 2).unwrap();
        assert_eq!(px, Pixel::grey(50, 255));
        assert_eq!(parts.green.get(1, 2).unwrap(), Pixel::grey(80, 255));
        assert_eq!(parts.blue.get(1, 2).unwrap(), Pixel::grey(253, 255));
    }

    #[test]
    fn test_split_combine_round_trip() {
        let src = sample();
        let parts = split(&src).unwrap();
        let back = combine(&parts.red, &parts.green, &parts.blue).unwrap();
        assert_eq!(back, src);
    }

    #[test]
    fn test_combine_dimension_mismatch() {
        let a = Image::new(2, 2, 255);
        let b = Image::new(2, 3, 255);
        let err = combine(&a, &a, &b).unwrap_err();
        assert_eq!(err, OpsError::dimension_mismatch((2, 2), (2, 3)));
        assert!(combine(&b, &a, &a).is_err());
    }

    #[test]
    fn test_combine_uses_largest_max() {
        let r = Image::filled(1, 1, 15, Pixel::grey(15, 15));
        let g = Image::filled(1, 1, 1023, Pixel::grey(1000, 1023));
        let b = Image::filled(1, 1, 255, Pixel::grey(200, 255));
        let out = combine(&r, &g, &b).unwrap();
        assert_eq!(out.max(), 1023);
        assert_eq!(out.get(0, 0).unwrap(), Pixel::new(15, 1000, 200, 1023));
    }
}
