//! PNG input decoding.
//!
//! Any 8- or 16-bit PNG is normalized to 8-bit RGB or RGBA so it can be fed
//! to the downsampler. Palette images are expanded, grayscale is widened to
//! three channels.

use crate::error::RenderError;
use glyph_dither::{ImageBuffer, PixelFormat};
use std::io::{BufRead, Cursor, Seek};
use std::path::Path;

/// Decode a PNG file.
pub fn load_png(path: &Path) -> Result<ImageBuffer, RenderError> {
    let file = std::fs::File::open(path)?;
    let image = decode_png(std::io::BufReader::new(file))?;
    tracing::debug!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        "Decoded input image"
    );
    Ok(image)
}

/// Decode PNG bytes.
pub fn decode_png_bytes(bytes: &[u8]) -> Result<ImageBuffer, RenderError> {
    decode_png(Cursor::new(bytes))
}

fn decode_png<R: BufRead + Seek>(reader: R) -> Result<ImageBuffer, RenderError> {
    let mut decoder = png::Decoder::new(reader);
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);

    let mut reader = decoder
        .read_info()
        .map_err(|e| RenderError::PngDecode(e.to_string()))?;
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| RenderError::PngDecode(e.to_string()))?;
    buf.truncate(info.buffer_size());

    if info.bit_depth != png::BitDepth::Eight {
        return Err(RenderError::UnsupportedFormat(format!(
            "bit depth {:?}",
            info.bit_depth
        )));
    }

    let (width, height) = (info.width as usize, info.height as usize);
    let (format, data) = match info.color_type {
        png::ColorType::Rgb => (PixelFormat::Rgb, buf),
        png::ColorType::Rgba => (PixelFormat::Rgba, buf),
        png::ColorType::Grayscale => (
            PixelFormat::Rgb,
            buf.iter().flat_map(|&v| [v, v, v]).collect(),
        ),
        png::ColorType::GrayscaleAlpha => (
            PixelFormat::Rgba,
            buf.chunks_exact(2)
                .flat_map(|px| [px[0], px[0], px[0], px[1]])
                .collect(),
        ),
        png::ColorType::Indexed => {
            return Err(RenderError::UnsupportedFormat(
                "indexed PNG was not expanded".to_string(),
            ))
        }
    };

    Ok(ImageBuffer::new(width, height, format, data)?)
}
