//! Assertion helpers for tests.

use glyph_dither::DitherResult;
use pretty_assertions::assert_eq;

/// Assert bytes are a PNG image
pub fn assert_png(bytes: &[u8]) {
    assert!(
        bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]),
        "Expected PNG image, got {} bytes starting with {:?}",
        bytes.len(),
        &bytes[..8.min(bytes.len())]
    );
}

/// Assert the result text is `rows` lines of `cols` glyphs each
pub fn assert_text_shape(result: &DitherResult) {
    let text = result.text();
    let lines: Vec<&str> = text.split('\n').collect();
    assert_eq!(lines.len(), result.rows(), "Wrong line count:\n{text}");
    for (i, line) in lines.iter().enumerate() {
        assert_eq!(
            line.chars().count(),
            result.cols(),
            "Line {i} has the wrong glyph count: {line:?}"
        );
    }
}

/// Assert every color index is valid for the result palette
pub fn assert_indices_in_palette(result: &DitherResult) {
    assert_eq!(result.indices().len(), result.cols() * result.rows());
    let len = result.palette().len();
    for (i, &index) in result.indices().iter().enumerate() {
        assert!(
            (index as usize) < len,
            "Index {index} at cell {i} is outside a {len}-color palette"
        );
    }
}
