//! Export encoders: plain text, PNG and JSON.

use crate::error::RenderError;
use glyph_dither::DitherResult;
use serde::Serialize;
use std::io::Cursor;
use tiny_skia::Pixmap;

/// Plain text export: rows joined with `\n`, no trailing newline.
pub fn to_text(result: &DitherResult) -> String {
    result.text()
}

/// Serialized form of a [`DitherResult`].
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultDocument<'a> {
    pub text: String,
    pub color_indices: &'a [u8],
    pub cols: usize,
    pub rows: usize,
    /// Palette as `#rrggbb` strings, in index order
    pub palette: Vec<String>,
    /// Milliseconds
    pub processing_time: f64,
}

impl<'a> From<&'a DitherResult> for ResultDocument<'a> {
    fn from(result: &'a DitherResult) -> Self {
        Self {
            text: result.text(),
            color_indices: result.indices(),
            cols: result.cols(),
            rows: result.rows(),
            palette: result.palette().colors().iter().map(|c| c.to_hex()).collect(),
            processing_time: result.elapsed().as_nanos() as f64 / 1_000_000.0,
        }
    }
}

/// Pretty-printed JSON export.
pub fn to_json(result: &DitherResult) -> Result<String, RenderError> {
    Ok(serde_json::to_string_pretty(&ResultDocument::from(result))?)
}

/// Encode a rendered canvas as an RGBA PNG.
///
/// The canvas background is opaque, so premultiplied pixmap data can be
/// written as-is. With `optimize`, the file is re-compressed with oxipng;
/// if that fails the plain encoding is returned.
pub fn encode_png(pixmap: &Pixmap, optimize: bool) -> Result<Vec<u8>, RenderError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, pixmap.width(), pixmap.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Fast);
        let mut writer = encoder
            .write_header()
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(pixmap.data())
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
    }
    let png_bytes = buf.into_inner();

    if !optimize {
        return Ok(png_bytes);
    }

    let optimized = oxipng::optimize_from_memory(
        &png_bytes,
        &oxipng::Options {
            strip: oxipng::StripChunks::Safe,
            ..Default::default()
        },
    )
    .unwrap_or(png_bytes);
    Ok(optimized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyph_dither::{build_result, DitherSettings, IndexGrid, Palette};
    use std::time::Duration;

    fn sample() -> DitherResult {
        build_result(
            IndexGrid::new(vec![0, 1, 1, 0, 0, 0], 3, 2).unwrap(),
            Palette::black_and_white(),
            &DitherSettings::default(),
            None,
            Duration::from_micros(1500),
        )
        .unwrap()
    }

    #[test]
    fn test_text_export() {
        assert_eq!(to_text(&sample()), "@  \n@@@");
    }

    #[test]
    fn test_json_export_fields() {
        let json = to_json(&sample()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["cols"], 3);
        assert_eq!(value["rows"], 2);
        assert_eq!(value["text"], "@  \n@@@");
        assert_eq!(value["colorIndices"], serde_json::json!([0, 1, 1, 0, 0, 0]));
        assert_eq!(value["palette"], serde_json::json!(["#000000", "#ffffff"]));
        assert_eq!(value["processingTime"], 1.5);
    }

    #[test]
    fn test_png_export_round_trips_dimensions() {
        let mut pixmap = Pixmap::new(5, 3).unwrap();
        pixmap.fill(tiny_skia::Color::from_rgba8(10, 20, 30, 255));

        for optimize in [false, true] {
            let bytes = encode_png(&pixmap, optimize).unwrap();
            let decoder = png::Decoder::new(Cursor::new(bytes));
            let reader = decoder.read_info().unwrap();
            let info = reader.info();
            assert_eq!((info.width, info.height), (5, 3));
        }
    }
}
