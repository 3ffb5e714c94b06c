//! RGB pixel type with a shared channel ceiling.
//!
//! A [`Pixel`] is an immutable integer RGB triple together with the maximum
//! value any of its channels may take. Construction never fails: every channel
//! is saturated into `[0, max]`.
//!
//! ```
//! use ime_core::Pixel;
//!
//! let px = Pixel::new(300, -20, 128, 255);
//! assert_eq!(px.channels(), [255, 0, 128]);
//! ```
//!
//! # Derived quantities
//!
//! - [`Pixel::value`] - largest channel
//! - [`Pixel::intensity`] - truncated mean of the three channels
//! - [`Pixel::luma`] - rounded Rec.709 weighted sum
//!
//! # Used By
//!
//! - [`crate::image::Image`] - images store one pixel per grid slot
//! - `ime-ops` - every filter builds output pixels through [`Pixel::new`]

use std::fmt;

// ============================================================================
// Rec.709 Luma Constants
// ============================================================================

/// Rec.709 luma coefficient for red channel.
///
/// Used in the luma formula: `Y = 0.2126*R + 0.7152*G + 0.0722*B`
pub const REC709_LUMA_R: f64 = 0.2126;

/// Rec.709 luma coefficient for green channel.
pub const REC709_LUMA_G: f64 = 0.7152;

/// Rec.709 luma coefficient for blue channel.
pub const REC709_LUMA_B: f64 = 0.0722;

/// Rec.709 luma coefficients as an array [R, G, B].
pub const REC709_LUMA: [f64; 3] = [REC709_LUMA_R, REC709_LUMA_G, REC709_LUMA_B];

/// Saturates `value` into `[0, max]`.
///
/// # Example
/// ```
/// use ime_core::pixel::clamp_channel;
/// assert_eq!(clamp_channel(-4, 255), 0);
/// assert_eq!(clamp_channel(256, 255), 255);
/// assert_eq!(clamp_channel(17, 255), 17);
/// ```
#[inline]
pub fn clamp_channel(value: i32, max: i32) -> i32 {
    value.clamp(0, max.max(0))
}

/// Integer RGB pixel.
///
/// Channels always satisfy `0 <= channel <= max`. Pixels are `Copy` and have no
/// setters; an image slot is updated by storing a new pixel.
///
/// Equality compares all four fields exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Pixel {
    red: i32,
    green: i32,
    blue: i32,
    max: i32,
}

impl Pixel {
    /// Creates a pixel, clamping each channel into `[0, max]`.
    ///
    /// A negative `max` is treated as `0`.
    ///
    /// # Example
    ///
    /// ```
    /// use ime_core::Pixel;
    ///
    /// let px = Pixel::new(10, 20, 30, 255);
    /// assert_eq!(px.red(), 10);
    /// assert_eq!(px.max(), 255);
    /// ```
    #[inline]
    pub fn new(red: i32, green: i32, blue: i32, max: i32) -> Self {
        let max = max.max(0);
        Self {
            red: clamp_channel(red, max),
            green: clamp_channel(green, max),
            blue: clamp_channel(blue, max),
            max,
        }
    }

    /// Creates a pixel with the same value in all three channels.
    #[inline]
    pub fn grey(value: i32, max: i32) -> Self {
        Self::new(value, value, value, max)
    }

    /// Creates a pixel from an `[r, g, b]` array.
    #[inline]
    pub fn from_channels(rgb: [i32; 3], max: i32) -> Self {
        Self::new(rgb[0], rgb[1], rgb[2], max)
    }

    /// Red channel.
    #[inline]
    pub fn red(&self) -> i32 {
        self.red
    }

    /// Green channel.
    #[inline]
    pub fn green(&self) -> i32 {
        self.green
    }

    /// Blue channel.
    #[inline]
    pub fn blue(&self) -> i32 {
        self.blue
    }

    /// Channel ceiling.
    #[inline]
    pub fn max(&self) -> i32 {
        self.max
    }

    /// Channels as `[r, g, b]`.
    #[inline]
    pub fn channels(&self) -> [i32; 3] {
        [self.red, self.green, self.blue]
    }

    /// Largest of the three channels.
    #[inline]
    pub fn value(&self) -> i32 {
        self.red.max(self.green).max(self.blue)
    }

    /// Mean of the three channels, truncated.
    ///
    /// Channels are non-negative, so truncation equals flooring.
    #[inline]
    pub fn intensity(&self) -> i32 {
        ((self.red as i64 + self.green as i64 + self.blue as i64) / 3) as i32
    }

    /// Rec.709 luma, rounded to the nearest integer.
    ///
    /// # Example
    /// ```
    /// use ime_core::Pixel;
    /// // 0.2126*10 + 0.7152*20 + 0.0722*30 = 18.596
    /// assert_eq!(Pixel::new(10, 20, 30, 255).luma(), 19);
    /// ```
    #[inline]
    pub fn luma(&self) -> i32 {
        let y = REC709_LUMA_R * self.red as f64
            + REC709_LUMA_G * self.green as f64
            + REC709_LUMA_B * self.blue as f64;
        y.round() as i32
    }

    /// Returns a copy whose channels are offset by `amount`, saturating at both ends.
    #[inline]
    pub fn offset(&self, amount: i32) -> Self {
        Self::new(
            self.red.saturating_add(amount),
            self.green.saturating_add(amount),
            self.blue.saturating_add(amount),
            self.max,
        )
    }
}

impl fmt::Display for Pixel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.red, self.green, self.blue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_clamp_identity_within_range() {
        for max in [1, 15, 255, 1023] {
            for v in 0..=max {
                let px = Pixel::new(v, v, v, max);
                assert_eq!(px.channels(), [v, v, v]);
            }
        }
    }

    #[test]
    fn test_clamp_saturates() {
        let px = Pixel::new(-1, 256, i32::MAX, 255);
        assert_eq!(px.channels(), [0, 255, 255]);

        let px = Pixel::new(i32::MIN, 7, 8, 7);
        assert_eq!(px.channels(), [0, 7, 7]);
    }

    #[test]
    fn test_negative_max() {
        let px = Pixel::new(5, 5, 5, -3);
        assert_eq!(px.max(), 0);
        assert_eq!(px.channels(), [0, 0, 0]);
    }

    #[test]
    fn test_derived_values() {
        let px = Pixel::new(100, 50, 200, 255);
        assert_eq!(px.value(), 200);
        assert_eq!(px.intensity(), 116); // 350 / 3
        // 21.26 + 35.76 + 14.44 = 71.46
        assert_eq!(px.luma(), 71);
    }

    #[test]
    fn test_luma_weights_sum_to_one() {
        let sum: f64 = REC709_LUMA.iter().sum();
        assert_relative_eq!(sum, 1.0, epsilon = 1e-12);
        assert_eq!(Pixel::grey(200, 255).luma(), 200);
    }

    #[test]
    fn test_offset_saturates() {
        let px = Pixel::new(250, 10, 128, 255);
        assert_eq!(px.offset(10).channels(), [255, 20, 138]);
        assert_eq!(px.offset(-20).channels(), [230, 0, 108]);
        assert_eq!(px.offset(i32::MAX).channels(), [255, 255, 255]);
    }

    #[test]
    fn test_equality() {
        assert_eq!(Pixel::new(1, 2, 3, 255), Pixel::new(1, 2, 3, 255));
        assert_ne!(Pixel::new(1, 2, 3, 255), Pixel::new(1, 2, 3, 254));
        assert_ne!(Pixel::new(1, 2, 3, 255), Pixel::new(1, 2, 4, 255));
    }

    #[test]
    fn test_display() {
        assert_eq!(Pixel::new(1, 2, 3, 255).to_string(), "1 2 3");
    }
}
