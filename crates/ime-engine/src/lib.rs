//! # ime-engine
//!
//! Named-image session store for the image manipulation engine.
//!
//! Callers address images by name. Each operation fetches its source(s),
//! derives a new image with [`ime_ops`] and stores it under the result name,
//! replacing any image already there. Codecs bridge external bitmap formats
//! through [`Engine::put_raw_image`] and [`Engine::get_raw_image`].
//!
//! # Modules
//!
//! - [`engine`] - [`Engine`] and the operation surface
//! - [`store`] - [`ImageStore`] name-to-image mapping
//! - [`config`] - YAML-loadable kernels and dither levels
//! - [`shared`] - mutex-guarded [`SharedEngine`]
//!
//! # Example
//!
//! ```rust
//! use ime_engine::Engine;
//!
//! let mut engine = Engine::new();
//! engine
//!     .put_raw_image("img", 2, 2, 255, &[[10, 20, 30], [40, 50, 60], [70, 80, 90], [100, 110, 120]])
//!     .unwrap();
//! engine.rgb_split("img", "r", "g", "b").unwrap();
//! engine.rgb_combine("r", "g", "b", "back").unwrap();
//! assert_eq!(engine.image("back").unwrap(), engine.image("img").unwrap());
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod config;
pub mod engine;
pub mod shared;
pub mod store;

pub use config::{DitherConfig, EngineConfig, Presets};
pub use engine::{Engine, RawImage};
pub use error::{EngineError, EngineResult};
pub use shared::SharedEngine;
pub use store::ImageStore;

pub use ime_core::{Image, Pixel};
pub use ime_ops::{GreyscaleMode, Histogram};
