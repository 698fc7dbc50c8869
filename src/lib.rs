//! inkglyph - glyph art from raster images
//!
//! Application layer around `glyph-dither`: configuration, PNG input,
//! canvas rendering and export, and a background worker for live re-renders.
//! This library exposes modules for integration testing.

pub mod assets;
pub mod error;
pub mod models;
pub mod rendering;
pub mod services;
