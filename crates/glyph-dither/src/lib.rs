//! glyph-dither: palette dithering of raster images into glyph grids
//!
//! The crate turns a decoded image into a grid of characters, each carrying
//! the index of a palette color. It is synchronous, allocation-light and has
//! no dependencies; rendering and I/O live in the application crate.
//!
//! # Quick Start
//!
//! ```
//! use glyph_dither::{process_image, DitherSettings, ImageBuffer, PresetName};
//!
//! let image = ImageBuffer::solid(64, 64, [40, 200, 40]);
//! let settings = DitherSettings::default()
//!     .with_density(32)
//!     .with_preset(Some(PresetName::TerminalGreen));
//!
//! let result = process_image(&image, &settings).unwrap();
//! assert_eq!(result.cols(), 32);
//! assert_eq!(result.lines().len(), result.rows());
//! ```
//!
//! # Pipeline
//!
//! 1. [`downsample`] averages source pixels into one sample per glyph cell
//! 2. the palette comes from a [`PresetName`] or a [`PaletteMode`]
//! 3. a [`DitherAlgorithm`] maps every sample to a palette index, spreading
//!    quantization error to later cells (or thresholding against a Bayer
//!    matrix)
//! 4. [`build_result`] picks a glyph per cell from a [`CharacterSet`] ramp
//!
//! [`process_image`] runs all four steps.
//!
//! # Color Distance
//!
//! Matching uses plain squared Euclidean distance on 0..=255 RGB. Samples
//! are not clamped during diffusion, so accumulated error may push a
//! channel outside that range; the matcher handles such values as-is.

#![allow(clippy::module_inception)]

pub mod charset;
pub mod color;
pub mod dither;
pub mod downsample;
pub mod error;
pub mod output;
pub mod palette;
pub mod pipeline;
pub mod preset;
pub mod settings;


pub use charset::CharacterSet;
pub use color::{luminance, Rgb};
pub use dither::{Dither, DitherAlgorithm, IndexGrid};
pub use downsample::{downsample, ImageBuffer, PixelFormat, SampleGrid};
pub use error::DitherError;
pub use output::{build_result, Cell, DitherResult};
pub use palette::{parse_hex_list, Palette, PaletteError, PaletteMode, ParseColorError};
pub use pipeline::process_image;
pub use preset::{Preset, PresetName, PRESETS};
pub use settings::DitherSettings;
