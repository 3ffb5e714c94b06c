//! The transformation engine.
//!
//! [`Engine`] owns an [`ImageStore`] and the compiled [`Presets`]. Every
//! operation reads its source image(s) by name, computes the result in a
//! local buffer and inserts it under the destination name only after the
//! computation succeeded, so a failed call leaves the store untouched.
//!
//! # Example
//!
//! ```rust
//! use ime_engine::Engine;
//!
//! let mut engine = Engine::new();
//! engine
//!     .put_raw_image("koala", 2, 1, 255, &[[10, 20, 30], [200, 200, 200]])
//!     .unwrap();
//! engine.brighten(5, "koala", "bright").unwrap();
//! engine.luma_greyscale("bright", "grey").unwrap();
//! engine.dither("koala", "dots").unwrap();
//!
//! let raw = engine.get_raw_image("bright").unwrap();
//! assert_eq!(raw.pixels[0], [15, 25, 35]);
//! assert!(engine.image("missing").is_err());
//! ```

use tracing::debug;

use ime_core::Image;
use ime_ops::channels::{combine, split};
use ime_ops::color::{brighten, greyscale};
use ime_ops::dither::dither;
use ime_ops::stats::histogram;
use ime_ops::transform::{flip_horizontal, flip_vertical};
use ime_ops::{Filter, GreyscaleMode, Histogram};

use crate::config::{EngineConfig, Presets};
use crate::error::EngineResult;
use crate::store::ImageStore;

/// Image dimensions, ceiling and row-major channel triples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Channel ceiling.
    pub max: i32,
    /// Row-major `[r, g, b]` triples.
    pub pixels: Vec<[i32; 3]>,
}

impl From<&Image> for RawImage {
    fn from(image: &Image) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
            max: image.max(),
            pixels: image.to_raw(),
        }
    }
}

/// Named-image session with the full operation surface.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    store: ImageStore,
    presets: Presets,
}

impl Engine {
    /// Creates an empty engine with the default kernels.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty engine using the kernels from `config`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidKernel` if a configured kernel is malformed.
    pub fn with_config(config: &EngineConfig) -> EngineResult<Self> {
        Ok(Self {
            store: ImageStore::new(),
            presets: config.compile()?,
        })
    }

    /// The underlying store.
    #[inline]
    pub fn store(&self) -> &ImageStore {
        &self.store
    }

    /// The compiled kernels in use.
    #[inline]
    pub fn presets(&self) -> &Presets {
        &self.presets
    }

    /// Borrows the image stored under `name`.
    pub fn image(&self, name: &str) -> EngineResult<&Image> {
        self.store.get(name)
    }

    /// Stores an image directly, replacing any image with the same name.
    pub fn insert(&mut self, name: impl Into<String>, image: Image) -> Option<Image> {
        self.store.insert(name, image)
    }

    // ========================================================================
    // Single-source operations
    // ========================================================================

    /// Runs `filter` over the image under `src` and stores the result under `dst`.
    pub fn apply(&mut self, filter: &Filter, src: &str, dst: &str) -> EngineResult<()> {
        let out = self.store.get(src)?.apply_filter(filter)?;
        debug!(kind = filter.kind(), src, dst, "committed");
        self.store.insert(dst, out);
        Ok(())
    }

    /// Adds `amount` to every channel, saturating at `0` and the image max.
    pub fn brighten(&mut self, amount: i32, src: &str, dst: &str) -> EngineResult<()> {
        self.apply(&Filter::from(brighten(amount)), src, dst)
    }

    /// Mirrors top to bottom.
    pub fn vertical_flip(&mut self, src: &str, dst: &str) -> EngineResult<()> {
        self.apply(&Filter::from(flip_vertical()), src, dst)
    }

    /// Mirrors left to right.
    pub fn horizontal_flip(&mut self, src: &str, dst: &str) -> EngineResult<()> {
        self.apply(&Filter::from(flip_horizontal()), src, dst)
    }

    /// Replicates the value selected by `mode` into all three channels.
    pub fn greyscale(&mut self, mode: GreyscaleMode, src: &str, dst: &str) -> EngineResult<()> {
        self.apply(&Filter::from(greyscale(mode)), src, dst)
    }

    /// Like [`greyscale`](Self::greyscale), with the mode given by name
    /// (`"luma-component"`, `"red"`, ...).
    pub fn greyscale_by_name(&mut self, mode: &str, src: &str, dst: &str) -> EngineResult<()> {
        let mode: GreyscaleMode = mode.parse()?;
        self.greyscale(mode, src, dst)
    }

    /// Red channel greyscale.
    pub fn red_greyscale(&mut self, src: &str, dst: &str) -> EngineResult<()> {
        self.greyscale(GreyscaleMode::Red, src, dst)
    }

    /// Green channel greyscale.
    pub fn green_greyscale(&mut self, src: &str, dst: &str) -> EngineResult<()> {
        self.greyscale(GreyscaleMode::Green, src, dst)
    }

    /// Blue channel greyscale.
    pub fn blue_greyscale(&mut self, src: &str, dst: &str) -> EngineResult<()> {
        self.greyscale(GreyscaleMode::Blue, src, dst)
    }

    /// Greyscale from the largest channel.
    pub fn value_greyscale(&mut self, src: &str, dst: &str) -> EngineResult<()> {
        self.greyscale(GreyscaleMode::Value, src, dst)
    }

    /// Greyscale from the floored channel mean.
    pub fn intensity_greyscale(&mut self, src: &str, dst: &str) -> EngineResult<()> {
        self.greyscale(GreyscaleMode::Intensity, src, dst)
    }

    /// Greyscale from Rec. 709 luma.
    pub fn luma_greyscale(&mut self, src: &str, dst: &str) -> EngineResult<()> {
        self.greyscale(GreyscaleMode::Luma, src, dst)
    }

    /// Convolves with the configured blur kernel.
    pub fn blur(&mut self, src: &str, dst: &str) -> EngineResult<()> {
        self.apply(&Filter::Convolution(self.presets.blur.clone()), src, dst)
    }

    /// Convolves with the configured sharpen kernel.
    pub fn sharpen(&mut self, src: &str, dst: &str) -> EngineResult<()> {
        self.apply(&Filter::Convolution(self.presets.sharpen.clone()), src, dst)
    }

    /// Applies the configured sepia color matrix.
    pub fn sepia(&mut self, src: &str, dst: &str) -> EngineResult<()> {
        self.apply(&Filter::ColorMatrix(self.presets.sepia), src, dst)
    }

    /// Luma-greyscales `src` and error-diffuses it to two levels.
    ///
    /// The sweep mutates a scratch image owned by this call; it is stored
    /// under `dst` once complete.
    pub fn dither(&mut self, src: &str, dst: &str) -> EngineResult<()> {
        let out = dither(self.store.get(src)?, &self.presets.dither)?;
        debug!(op = "dither", src, dst, "committed");
        self.store.insert(dst, out);
        Ok(())
    }

    // ========================================================================
    // Multi-image operations
    // ========================================================================

    /// Splits `src` into red, green and blue greyscale images.
    ///
    /// All three results are computed before any is stored.
    pub fn rgb_split(
        &mut self,
        src: &str,
        red_dst: &str,
        green_dst: &str,
        blue_dst: &str,
    ) -> EngineResult<()> {
        let parts = split(self.store.get(src)?)?;
        debug!(op = "rgb_split", src, red_dst, green_dst, blue_dst, "committed");
        self.store.insert(red_dst, parts.red);
        self.store.insert(green_dst, parts.green);
        self.store.insert(blue_dst, parts.blue);
        Ok(())
    }

    /// Rebuilds an RGB image from three same-sized sources.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown source, `DimensionMismatch` if the sources
    /// differ in size. The store is unchanged on error.
    pub fn rgb_combine(
        &mut self,
        red_src: &str,
        green_src: &str,
        blue_src: &str,
        dst: &str,
    ) -> EngineResult<()> {
        let out = combine(
            self.store.get(red_src)?,
            self.store.get(green_src)?,
            self.store.get(blue_src)?,
        )?;
        debug!(op = "rgb_combine", red_src, green_src, blue_src, dst, "committed");
        self.store.insert(dst, out);
        Ok(())
    }

    // ========================================================================
    // Raw seam
    // ========================================================================

    /// Stores an image built from row-major `[r, g, b]` triples and returns
    /// its name.
    ///
    /// # Errors
    ///
    /// Rejects a negative max, a triple count other than `width * height`,
    /// and any channel outside `[0, max]`. Nothing is stored on error.
    pub fn put_raw_image<'a>(
        &mut self,
        name: &'a str,
        width: u32,
        height: u32,
        max: i32,
        pixels: &[[i32; 3]],
    ) -> EngineResult<&'a str> {
        let image = Image::from_raw(width, height, max, pixels)?;
        debug!(name, width, height, max, "put raw image");
        self.store.insert(name, image);
        Ok(name)
    }

    /// Copies the image under `name` out as raw triples.
    pub fn get_raw_image(&self, name: &str) -> EngineResult<RawImage> {
        Ok(RawImage::from(self.store.get(name)?))
    }

    /// Per-channel histogram of the image under `name`.
    pub fn histogram(&self, name: &str) -> EngineResult<Histogram> {
        Ok(histogram(self.store.get(name)?))
    }
}
