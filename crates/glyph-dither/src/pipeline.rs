//! One synchronous pass from source image to [`DitherResult`].

use std::time::Instant;

use crate::downsample::{downsample, ImageBuffer};
use crate::error::DitherError;
use crate::output::{build_result, DitherResult};
use crate::settings::DitherSettings;

/// Run the full pipeline on `image`.
///
/// Resolves the palette (preset or mode), downsamples to
/// `settings.density` columns, keeps a copy of the undithered samples for
/// glyph selection, dithers and assembles the result. The reported elapsed
/// time covers all of these steps.
///
/// # Errors
///
/// - [`DitherError::InvalidDimensions`] for a zero-area image or zero density
/// - [`DitherError::Palette`] for a custom palette above 256 entries
///
/// # Example
///
/// ```
/// use glyph_dither::{process_image, DitherSettings, ImageBuffer};
///
/// let image = ImageBuffer::solid(4, 4, [0, 0, 0]);
/// let settings = DitherSettings::default()
///     .with_density(4)
///     .with_aspect_ratio(1.0);
/// let result = process_image(&image, &settings).unwrap();
///
/// assert_eq!(result.text(), "@@@@\n@@@@\n@@@@\n@@@@");
/// ```
pub fn process_image(
    image: &ImageBuffer,
    settings: &DitherSettings,
) -> Result<DitherResult, DitherError> {
    let start = Instant::now();

    let effective = settings.effective();
    let palette = settings.palette()?;

    let grid = downsample(image, effective.density, effective.aspect_ratio)?;
    let originals = grid.clone();

    let indices = effective.algorithm.apply(grid, &palette);

    build_result(
        indices,
        palette,
        &effective,
        Some(&originals),
        start.elapsed(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::PaletteMode;
    use crate::preset::PresetName;
    use crate::{DitherAlgorithm, Rgb};

    #[test]
    fn test_zero_area_image_is_rejected() {
        let image = ImageBuffer::solid(0, 10, [0, 0, 0]);
        let err = process_image(&image, &DitherSettings::default()).unwrap_err();
        assert!(matches!(err, DitherError::InvalidDimensions { .. }));
    }

    #[test]
    fn test_zero_density_is_rejected() {
        let image = ImageBuffer::solid(10, 10, [0, 0, 0]);
        let mut settings = DitherSettings::default();
        settings.density = 0;
        assert_eq!(
            process_image(&image, &settings).unwrap_err(),
            DitherError::InvalidDimensions {
                width: 10,
                height: 10,
                cols: 0
            }
        );
    }

    #[test]
    fn test_preset_palette_is_snapshotted() {
        let image = ImageBuffer::solid(16, 16, [255, 176, 0]);
        let settings = DitherSettings::default()
            .with_density(8)
            .with_preset(Some(PresetName::AmberCrt));
        let result = process_image(&image, &settings).unwrap();
        assert_eq!(result.palette(), &PresetName::AmberCrt.preset().palette());
        assert!(result.indices().iter().all(|&i| i == 1));
    }

    #[test]
    fn test_oversized_palette_surfaces() {
        let image = ImageBuffer::solid(4, 4, [0, 0, 0]);
        let settings = DitherSettings::default()
            .with_palette_mode(PaletteMode::Custom)
            .with_custom_palette(vec![Rgb::WHITE; 300]);
        assert!(matches!(
            process_image(&image, &settings),
            Err(DitherError::Palette(_))
        ));
    }

    #[test]
    fn test_indices_in_palette_range() {
        let mut data = Vec::with_capacity(32 * 32 * 4);
        for y in 0..32u32 {
            for x in 0..32u32 {
                data.extend_from_slice(&[(x * 8) as u8, (y * 8) as u8, ((x + y) * 4) as u8, 255]);
            }
        }
        let image = ImageBuffer::new(32, 32, crate::PixelFormat::Rgba, data).unwrap();
        for algorithm in DitherAlgorithm::ALL {
            let settings = DitherSettings::default()
                .with_density(16)
                .with_palette_mode(PaletteMode::FourBit)
                .with_algorithm(algorithm);
            let result = process_image(&image, &settings).unwrap();
            assert_eq!(result.indices().len(), result.cols() * result.rows());
            assert!(result.indices().iter().all(|&i| (i as usize) < 16));
        }
    }
}
