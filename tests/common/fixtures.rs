//! Test fixtures: small PNG images built in memory.

use std::path::{Path, PathBuf};

/// Encode an 8-bit RGB PNG whose pixels come from `pixel(x, y)`.
pub fn rgb_png(width: u32, height: u32, pixel: impl Fn(u32, u32) -> [u8; 3]) -> Vec<u8> {
    let mut data = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        for x in 0..width {
            data.extend_from_slice(&pixel(x, y));
        }
    }
    encode(width, height, png::ColorType::Rgb, &data)
}

/// Encode an 8-bit grayscale PNG whose pixels come from `pixel(x, y)`.
pub fn gray_png(width: u32, height: u32, pixel: impl Fn(u32, u32) -> u8) -> Vec<u8> {
    let mut data = Vec::with_capacity((width * height) as usize);
    for y in 0..height {
        for x in 0..width {
            data.push(pixel(x, y));
        }
    }
    encode(width, height, png::ColorType::Grayscale, &data)
}

/// Solid RGB image
pub fn solid_png(width: u32, height: u32, color: [u8; 3]) -> Vec<u8> {
    rgb_png(width, height, |_, _| color)
}

/// Black on the left edge to white on the right edge
pub fn horizontal_gradient(width: u32, height: u32) -> Vec<u8> {
    rgb_png(width, height, |x, _| {
        let v = (x * 255 / (width - 1)) as u8;
        [v, v, v]
    })
}

/// Write `bytes` to `dir/name` and return the path
pub fn write_file(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).expect("Failed to write fixture");
    path
}

fn encode(width: u32, height: u32, color: png::ColorType, data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, width, height);
        encoder.set_color(color);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().expect("Failed to write PNG header");
        writer
            .write_image_data(data)
            .expect("Failed to write PNG data");
    }
    out
}
