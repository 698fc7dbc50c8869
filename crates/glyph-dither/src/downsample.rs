//! Block-average downsampling from source pixels to the coarse glyph grid.
//!
//! One output cell corresponds to one glyph. Cell width is `W / cols` source
//! pixels and cell height is `cell_width / aspect_ratio`, which compensates
//! for glyphs being taller than they are wide.

use crate::color::Rgb;
use crate::error::DitherError;

/// Channel layout of an [`ImageBuffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// Three bytes per pixel.
    Rgb,
    /// Four bytes per pixel; alpha is ignored.
    Rgba,
}

impl PixelFormat {
    /// Bytes per pixel.
    #[inline]
    pub fn channels(&self) -> usize {
        match self {
            PixelFormat::Rgb => 3,
            PixelFormat::Rgba => 4,
        }
    }
}

/// A decoded 8-bit source image.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    width: usize,
    height: usize,
    format: PixelFormat,
    data: Vec<u8>,
}

impl ImageBuffer {
    /// Wrap decoded pixel bytes.
    ///
    /// # Errors
    ///
    /// [`DitherError::BufferSizeMismatch`] if `data.len()` is not
    /// `width * height * format.channels()`.
    pub fn new(
        width: usize,
        height: usize,
        format: PixelFormat,
        data: Vec<u8>,
    ) -> Result<Self, DitherError> {
        let expected = width * height * format.channels();
        if data.len() != expected {
            return Err(DitherError::BufferSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            format,
            data,
        })
    }

    /// A solid-color RGBA image, handy for tests and previews.
    pub fn solid(width: usize, height: usize, color: [u8; 3]) -> Self {
        let data = std::iter::repeat([color[0], color[1], color[2], 255])
            .take(width * height)
            .flatten()
            .collect();
        Self {
            width,
            height,
            format: PixelFormat::Rgba,
            data,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// RGB bytes of the pixel at `(x, y)`.
    #[inline]
    fn rgb_at(&self, x: usize, y: usize) -> [u8; 3] {
        let i = (y * self.width + x) * self.format.channels();
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }
}

/// Flat row-major grid of RGB samples, one triple per glyph cell.
///
/// The grid is the working buffer of a single pipeline run. Error diffusion
/// takes it by value and mutates it in place, so a caller that still needs
/// the undithered samples must [`clone`](Clone::clone) it first.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleGrid {
    data: Vec<f32>,
    width: usize,
    height: usize,
}

impl SampleGrid {
    /// Wrap `width * height * 3` channel values.
    ///
    /// # Errors
    ///
    /// [`DitherError::BufferSizeMismatch`] if the length disagrees with the
    /// declared dimensions.
    pub fn new(data: Vec<f32>, width: usize, height: usize) -> Result<Self, DitherError> {
        let expected = width * height * 3;
        if data.len() != expected {
            return Err(DitherError::BufferSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// A grid where every cell holds `color`.
    pub fn filled(width: usize, height: usize, color: Rgb) -> Self {
        let data = std::iter::repeat([color.r, color.g, color.b])
            .take(width * height)
            .flatten()
            .collect();
        Self {
            data,
            width,
            height,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of cells (`width * height`).
    #[inline]
    pub fn cells(&self) -> usize {
        self.width * self.height
    }

    /// Raw channel values.
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Sample at cell index `idx` (row-major).
    #[inline]
    pub fn get(&self, idx: usize) -> Rgb {
        let i = idx * 3;
        Rgb::new(self.data[i], self.data[i + 1], self.data[i + 2])
    }

    /// Sample at `(x, y)`.
    #[inline]
    pub fn at(&self, x: usize, y: usize) -> Rgb {
        self.get(y * self.width + x)
    }

    /// Add `error * scale` to every channel of cell `idx`.
    #[inline]
    pub(crate) fn add_scaled(&mut self, idx: usize, error: [f32; 3], scale: f32) {
        let i = idx * 3;
        self.data[i] += error[0] * scale;
        self.data[i + 1] += error[1] * scale;
        self.data[i + 2] += error[2] * scale;
    }
}

/// Downsample `image` to `cols` columns, deriving the row count from the
/// aspect ratio.
///
/// Each cell averages the source pixels in its floor-truncated rectangle,
/// clamped to the image bounds. Cells that cover no source pixel (possible
/// when `cols` exceeds the image width) stay black.
///
/// # Errors
///
/// [`DitherError::InvalidDimensions`] for a zero-area image or `cols == 0`.
///
/// # Example
///
/// ```
/// use glyph_dither::{downsample, ImageBuffer};
///
/// let image = ImageBuffer::solid(80, 40, [200, 100, 50]);
/// let grid = downsample(&image, 20, 0.5).unwrap();
/// assert_eq!((grid.width(), grid.height()), (20, 5));
/// ```
pub fn downsample(
    image: &ImageBuffer,
    cols: usize,
    aspect_ratio: f32,
) -> Result<SampleGrid, DitherError> {
    let (src_w, src_h) = (image.width(), image.height());
    if src_w == 0 || src_h == 0 || cols == 0 {
        return Err(DitherError::InvalidDimensions {
            width: src_w,
            height: src_h,
            cols,
        });
    }

    let cell_w = src_w as f64 / cols as f64;
    let cell_h = cell_w / aspect_ratio as f64;
    let rows = ((src_h as f64 / cell_h).floor() as usize).max(1);

    let mut data = vec![0.0f32; cols * rows * 3];

    for y in 0..rows {
        let sy0 = (y as f64 * cell_h).floor() as usize;
        let sy1 = (((y + 1) as f64 * cell_h).floor() as usize).min(src_h);
        for x in 0..cols {
            let sx0 = (x as f64 * cell_w).floor() as usize;
            let sx1 = (((x + 1) as f64 * cell_w).floor() as usize).min(src_w);

            let mut sum = [0u64; 3];
            let mut count = 0u64;
            for sy in sy0..sy1 {
                for sx in sx0..sx1 {
                    let [r, g, b] = image.rgb_at(sx, sy);
                    sum[0] += r as u64;
                    sum[1] += g as u64;
                    sum[2] += b as u64;
                    count += 1;
                }
            }

            if count > 0 {
                let di = (y * cols + x) * 3;
                data[di] = (sum[0] as f64 / count as f64) as f32;
                data[di + 1] = (sum[1] as f64 / count as f64) as f32;
                data[di + 2] = (sum[2] as f64 / count as f64) as f32;
            }
        }
    }

    Ok(SampleGrid {
        data,
        width: cols,
        height: rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_buffer_rejects_wrong_length() {
        let err = ImageBuffer::new(2, 2, PixelFormat::Rgba, vec![0; 15]).unwrap_err();
        assert_eq!(
            err,
            DitherError::BufferSizeMismatch {
                expected: 16,
                actual: 15
            }
        );
    }

    #[test]
    fn test_sample_grid_rejects_wrong_length() {
        assert!(SampleGrid::new(vec![0.0; 11], 2, 2).is_err());
        assert!(SampleGrid::new(vec![0.0; 12], 2, 2).is_ok());
    }

    #[test]
    fn test_rows_follow_aspect_ratio() {
        let image = ImageBuffer::solid(100, 100, [0, 0, 0]);
        // cell 10 wide, 20 tall
        let grid = downsample(&image, 10, 0.5).unwrap();
        assert_eq!((grid.width(), grid.height()), (10, 5));

        let square = downsample(&image, 10, 1.0).unwrap();
        assert_eq!((square.width(), square.height()), (10, 10));
    }

    #[test]
    fn test_at_least_one_row() {
        let image = ImageBuffer::solid(100, 2, [0, 0, 0]);
        let grid = downsample(&image, 4, 0.3).unwrap();
        assert_eq!(grid.height(), 1);
    }

    #[test]
    fn test_cells_are_averaged() {
        // 2x1 RGB: black | white, one column averages both
        let image =
            ImageBuffer::new(2, 1, PixelFormat::Rgb, vec![0, 0, 0, 255, 255, 255]).unwrap();
        let grid = downsample(&image, 1, 1.0).unwrap();
        assert_eq!(grid.cells(), 1);
        assert_eq!(grid.get(0), Rgb::new(127.5, 127.5, 127.5));
    }

    #[test]
    fn test_alpha_is_ignored() {
        let image =
            ImageBuffer::new(1, 1, PixelFormat::Rgba, vec![10, 20, 30, 0]).unwrap();
        let grid = downsample(&image, 1, 1.0).unwrap();
        assert_eq!(grid.get(0), Rgb::from_u8(10, 20, 30));
    }

    #[test]
    fn test_quadrants_keep_their_colors() {
        // 4x4 image, left half red, right half blue
        let mut data = Vec::new();
        for _y in 0..4 {
            for x in 0..4 {
                if x < 2 {
                    data.extend_from_slice(&[255, 0, 0, 255]);
                } else {
                    data.extend_from_slice(&[0, 0, 255, 255]);
                }
            }
        }
        let image = ImageBuffer::new(4, 4, PixelFormat::Rgba, data).unwrap();
        let grid = downsample(&image, 2, 1.0).unwrap();
        assert_eq!((grid.width(), grid.height()), (2, 2));
        assert_eq!(grid.at(0, 0), Rgb::from_u8(255, 0, 0));
        assert_eq!(grid.at(1, 1), Rgb::from_u8(0, 0, 255));
    }

    #[test]
    fn test_more_columns_than_pixels_leaves_empty_cells_black() {
        let image = ImageBuffer::solid(2, 4, [255, 255, 255]);
        let grid = downsample(&image, 4, 1.0).unwrap();
        assert_eq!(grid.width(), 4);
        // cell width 0.5: column 0 covers source columns [0, 0)
        assert_eq!(grid.at(0, 1), Rgb::BLACK);
        assert_eq!(grid.at(1, 1), Rgb::WHITE);
    }

    #[test]
    fn test_zero_area_is_invalid() {
        let image = ImageBuffer::new(0, 10, PixelFormat::Rgb, Vec::new()).unwrap();
        assert!(matches!(
            downsample(&image, 10, 0.5),
            Err(DitherError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_zero_columns_is_invalid() {
        let image = ImageBuffer::solid(4, 4, [0, 0, 0]);
        assert_eq!(
            downsample(&image, 0, 0.5),
            Err(DitherError::InvalidDimensions {
                width: 4,
                height: 4,
                cols: 0
            })
        );
    }
}
