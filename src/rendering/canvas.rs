//! Canvas rendering of glyph results.
//!
//! A [`DitherResult`] is laid out as an SVG scene (one `<text>` per visible
//! glyph on a fixed monospace grid) and rasterized with resvg.

use crate::error::RenderError;
use glyph_dither::{DitherResult, DitherSettings, Rgb};
use resvg::usvg::{self, Transform};
use std::borrow::Cow;
use std::fmt::Write;
use std::sync::Arc;
use tiny_skia::Pixmap;

/// Glyph advance as a fraction of the font size.
pub const CHAR_WIDTH_RATIO: f32 = 0.6;

/// Colors and font used to draw a result.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasStyle {
    pub background: Rgb,
    /// Single color for every glyph. `None` draws each glyph in its matched
    /// palette color.
    pub foreground: Option<Rgb>,
    pub font_size: f32,
    pub font_family: String,
}

impl CanvasStyle {
    /// Style for `settings`, with optional color overrides.
    ///
    /// Without overrides the active preset's display colors are used; with
    /// no preset the background is black and glyphs keep their palette
    /// colors.
    pub fn for_settings(
        settings: &DitherSettings,
        background: Option<Rgb>,
        foreground: Option<Rgb>,
    ) -> Self {
        let preset = settings.active_preset();
        Self {
            background: background
                .or_else(|| preset.map(|p| p.background()))
                .unwrap_or(Rgb::BLACK),
            foreground: foreground.or_else(|| preset.map(|p| p.foreground())),
            font_size: settings.effective().font_size,
            font_family: settings.font_family.clone(),
        }
    }

    /// Fill color for a glyph matched to palette index `index`.
    pub fn fill_for(&self, result: &DitherResult, index: u8) -> Rgb {
        self.foreground
            .unwrap_or_else(|| result.palette().color(index as usize))
    }
}

/// Pixel size of the canvas for `result`: `ceil(cols * 0.6 * size)` by
/// `ceil(rows * size)`.
pub fn canvas_size(result: &DitherResult, font_size: f32) -> (u32, u32) {
    let char_width = font_size * CHAR_WIDTH_RATIO;
    (
        (result.cols() as f32 * char_width).ceil() as u32,
        (result.rows() as f32 * font_size).ceil() as u32,
    )
}

/// Build the SVG scene for `result`.
///
/// Blank glyphs are skipped. Each glyph is anchored at its cell's top-left
/// corner.
pub fn build_svg(result: &DitherResult, style: &CanvasStyle) -> String {
    let (width, height) = canvas_size(result, style.font_size);
    let char_width = style.font_size * CHAR_WIDTH_RATIO;

    let mut svg = String::with_capacity(result.cols() * result.rows() * 48);
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = width,
        h = height
    );
    let _ = write!(
        svg,
        r#"<rect width="{}" height="{}" fill="{}"/>"#,
        width,
        height,
        style.background.to_hex()
    );
    let _ = write!(
        svg,
        r#"<g font-family="{}" font-size="{}" dominant-baseline="text-before-edge" xml:space="preserve">"#,
        escape_xml(&style.font_family),
        style.font_size
    );

    for cell in result.cells() {
        if cell.glyph == ' ' {
            continue;
        }
        let mut buf = [0u8; 4];
        let _ = write!(
            svg,
            r#"<text x="{}" y="{}" fill="{}">{}</text>"#,
            cell.x as f32 * char_width,
            cell.y as f32 * style.font_size,
            style.fill_for(result, cell.index).to_hex(),
            escape_xml(cell.glyph.encode_utf8(&mut buf))
        );
    }

    svg.push_str("</g></svg>");
    svg
}

fn escape_xml(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Point the generic `monospace` family at a face that is installed.
///
/// fontdb maps `monospace` to "Courier New" regardless of what is loaded;
/// without such a face every glyph would be dropped. The first monospaced
/// face wins (extra fonts load first), then any face at all.
fn resolve_monospace(fontdb: &mut fontdb::Database) {
    let generic = fontdb::Family::Monospace;
    let query = fontdb::Query {
        families: &[generic],
        ..Default::default()
    };
    if fontdb.query(&query).is_some() {
        return;
    }

    let fallback = fontdb
        .faces()
        .find(|f| f.monospaced)
        .or_else(|| fontdb.faces().next())
        .and_then(|f| f.families.first().map(|(name, _)| name.clone()));

    match fallback {
        Some(family) => {
            tracing::debug!(%family, "Using fallback for monospace");
            fontdb.set_monospace_family(family);
        }
        None => tracing::warn!("No fonts available, glyphs will not be drawn"),
    }
}

/// Rasterizes glyph results with resvg.
pub struct CanvasRenderer {
    /// Font database for text rendering
    fontdb: Arc<fontdb::Database>,
}

impl CanvasRenderer {
    /// Create a renderer with extra fonts on top of the system fonts
    pub fn with_fonts(fonts: Vec<(String, Cow<'static, [u8]>)>) -> Self {
        let mut fontdb = fontdb::Database::new();

        for (name, data) in fonts {
            fontdb.load_font_data(data.into_owned());
            tracing::debug!(font = %name, "Loaded font");
        }

        fontdb.load_system_fonts();
        resolve_monospace(&mut fontdb);

        tracing::info!(font_count = fontdb.len(), "Loaded fonts for glyph rendering");

        Self {
            fontdb: Arc::new(fontdb),
        }
    }

    /// Create a renderer with system fonts only
    pub fn new() -> Self {
        Self::with_fonts(Vec::new())
    }

    /// Font family names known to the renderer, sorted and deduplicated
    pub fn font_families(&self) -> Vec<String> {
        let mut families: Vec<String> = self
            .fontdb
            .faces()
            .filter_map(|f| f.families.first().map(|(name, _)| name.clone()))
            .collect();
        families.sort();
        families.dedup();
        families
    }

    /// Render `result` to an RGBA pixmap
    pub fn render(&self, result: &DitherResult, style: &CanvasStyle) -> Result<Pixmap, RenderError> {
        let (width, height) = canvas_size(result, style.font_size);
        let svg = build_svg(result, style);

        let options = usvg::Options {
            fontdb: self.fontdb.clone(),
            font_family: style.font_family.clone(),
            ..Default::default()
        };
        let tree = usvg::Tree::from_str(&svg, &options)
            .map_err(|e| RenderError::SvgParse(e.to_string()))?;

        let mut pixmap = Pixmap::new(width, height).ok_or(RenderError::PixmapAllocation)?;
        let [r, g, b] = style.background.to_bytes();
        pixmap.fill(tiny_skia::Color::from_rgba8(r, g, b, 255));

        resvg::render(&tree, Transform::identity(), &mut pixmap.as_mut());

        tracing::debug!(width, height, "Rendered canvas");
        Ok(pixmap)
    }
}

impl Default for CanvasRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyph_dither::{build_result, IndexGrid, Palette, PresetName};
    use std::time::Duration;

    fn result(indices: Vec<u8>, cols: usize, rows: usize, palette: Palette) -> DitherResult {
        build_result(
            IndexGrid::new(indices, cols, rows).unwrap(),
            palette,
            &DitherSettings::default(),
            None,
            Duration::ZERO,
        )
        .unwrap()
    }

    fn style(foreground: Option<Rgb>) -> CanvasStyle {
        CanvasStyle {
            background: Rgb::BLACK,
            foreground,
            font_size: 10.0,
            font_family: "monospace".to_string(),
        }
    }

    #[test]
    fn test_canvas_size_rounds_up() {
        let r = result(vec![0; 3], 3, 1, Palette::black_and_white());
        // 3 * 0.6 * 7 = 12.6
        assert_eq!(canvas_size(&r, 7.0), (13, 7));
        assert_eq!(canvas_size(&r, 10.0), (18, 10));
    }

    #[test]
    fn test_style_defaults_without_preset() {
        let s = CanvasStyle::for_settings(&DitherSettings::default(), None, None);
        assert_eq!(s.background, Rgb::BLACK);
        assert_eq!(s.foreground, None);
        assert_eq!(s.font_size, 8.0);
    }

    #[test]
    fn test_style_takes_preset_colors() {
        let settings = DitherSettings::default().with_preset(Some(PresetName::OneBitMac));
        let s = CanvasStyle::for_settings(&settings, None, None);
        assert_eq!(s.background, Rgb::WHITE);
        assert_eq!(s.foreground, Some(Rgb::BLACK));

        let red = Rgb::from_u8(255, 0, 0);
        let s = CanvasStyle::for_settings(&settings, Some(red), Some(red));
        assert_eq!(s.background, red);
        assert_eq!(s.foreground, Some(red));
    }

    #[test]
    fn test_blank_glyphs_are_skipped() {
        // index 1 is white, which maps to a space
        let r = result(vec![0, 1, 1, 0], 2, 2, Palette::black_and_white());
        let svg = build_svg(&r, &style(None));
        assert_eq!(svg.matches("<text").count(), 2);
        assert!(svg.contains(r##"<text x="0" y="0" fill="#000000">@</text>"##));
        assert!(svg.contains(r##"<text x="6" y="10" fill="#000000">@</text>"##));
    }

    #[test]
    fn test_foreground_overrides_palette_color() {
        let palette = Palette::from_hex(&["#000000", "#ff0000", "#ffffff"]).unwrap();
        let r = result(vec![0, 1], 2, 1, palette);
        let svg = build_svg(&r, &style(None));
        assert!(svg.contains(r##"fill="#ff0000""##));

        let svg = build_svg(&r, &style(Some(Rgb::from_u8(0, 255, 0))));
        assert!(!svg.contains(r##"fill="#ff0000""##));
        assert_eq!(svg.matches(r##"fill="#00ff00""##).count(), 2);
    }

    #[test]
    fn test_glyphs_are_escaped() {
        assert_eq!(escape_xml("<&>"), "&lt;&amp;&gt;");
        assert_eq!(escape_xml("'\""), "&apos;&quot;");
        assert!(matches!(escape_xml("@"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_render_fills_background() {
        let renderer = CanvasRenderer::with_fonts(Vec::new());
        let r = result(vec![1; 4], 2, 2, Palette::black_and_white());
        let mut s = style(None);
        s.background = Rgb::from_u8(0, 0, 255);

        let pixmap = renderer.render(&r, &s).unwrap();
        assert_eq!((pixmap.width(), pixmap.height()), (12, 20));
        // all glyphs are blank, so every pixel is background
        assert!(pixmap
            .pixels()
            .iter()
            .all(|p| (p.red(), p.green(), p.blue(), p.alpha()) == (0, 0, 255, 255)));
    }

    #[test]
    fn test_monospace_resolves_to_loaded_face() {
        let renderer = CanvasRenderer::new();
        if renderer.font_families().is_empty() {
            return;
        }
        let query = fontdb::Query {
            families: &[fontdb::Family::Monospace],
            ..Default::default()
        };
        assert!(renderer.fontdb.query(&query).is_some());
    }

    #[test]
    fn test_render_draws_dense_glyphs_in_every_row() {
        let renderer = CanvasRenderer::new();
        if renderer.font_families().is_empty() {
            return;
        }
        let r = result(vec![0; 3], 1, 3, Palette::black_and_white());
        let s = CanvasStyle {
            background: Rgb::BLACK,
            foreground: Some(Rgb::WHITE),
            font_size: 16.0,
            font_family: "monospace".to_string(),
        };

        let pixmap = renderer.render(&r, &s).unwrap();

        let width = pixmap.width() as usize;
        let pixels = pixmap.pixels();
        for band in 0..3 {
            let lit = pixels[band * 16 * width..(band + 1) * 16 * width]
                .iter()
                .filter(|p| p.red() > 0)
                .count();
            assert!(lit > 0, "row {band} has no ink");
        }
    }
}
