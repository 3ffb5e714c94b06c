//! Per-channel value histograms.

use ime_core::Image;

/// Largest bin count per series.
pub const MAX_BINS: usize = 256;

/// Pixel counts per channel value.
///
/// Each vector has `min(max + 1, MAX_BINS)` bins. Below the cap, bin `v`
/// counts pixels whose channel equals `v`; above it, values are scaled
/// linearly onto the available bins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    /// Red channel counts.
    pub red: Vec<u64>,
    /// Green channel counts.
    pub green: Vec<u64>,
    /// Blue channel counts.
    pub blue: Vec<u64>,
    /// Intensity counts.
    pub intensity: Vec<u64>,
}

impl Histogram {
    /// Number of bins per channel.
    #[inline]
    pub fn bins(&self) -> usize {
        self.red.len()
    }

    /// Highest count across all four series, for chart scaling.
    pub fn peak(&self) -> u64 {
        [&self.red, &self.green, &self.blue, &self.intensity]
            .into_iter()
            .flat_map(|v| v.iter().copied())
            .max()
            .unwrap_or(0)
    }
}

/// Counts channel values over the whole image.
///
/// # Example
///
/// ```rust
/// use ime_core::{Image, Pixel};
/// use ime_ops::stats::histogram;
///
/// let img = Image::filled(2, 2, 255, Pixel::new(3, 6, 9, 255));
/// let h = histogram(&img);
/// assert_eq!(h.bins(), 256);
/// assert_eq!(h.green[6], 4);
/// assert_eq!(h.intensity[6], 4);
/// ```
pub fn histogram(image: &Image) -> Histogram {
    let max = image.max().max(0) as u64;
    let bins = (max + 1).min(MAX_BINS as u64) as usize;
    let bin = |value: i32| -> usize {
        let value = value.clamp(0, max as i32) as u64;
        if max < MAX_BINS as u64 {
            value as usize
        } else {
            (value * (bins as u64 - 1) / max) as usize
        }
    };
    let mut h = Histogram {
        red: vec![0; bins],
        green: vec![0; bins],
        blue: vec![0; bins],
        intensity: vec![0; bins],
    };
    for px in image.as_pixels() {
        h.red[bin(px.red())] += 1;
        h.green[bin(px.green())] += 1;
        h.blue[bin(px.blue())] += 1;
        h.intensity[bin(px.intensity())] += 1;
    }
    h
}
