//! Bridge from RGB rasters to the eink-dither quantizer, plus palette remap.

use eink_dither::{DitherError, DitheredImage, GrayQuantizer, IndexedImage, Palette, Srgb};

use super::raster::RasterBuffer;
use crate::error::{PipelineError, Stage};
use crate::models::OutputFormat;

/// Quantized pixels ready for encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuantizedRaster {
    /// Level indices on an evenly spaced grey ramp.
    Gray(DitheredImage),
    /// Level indices mapped onto an explicit color table.
    Indexed(IndexedImage),
}

impl QuantizedRaster {
    pub fn width(&self) -> usize {
        match self {
            QuantizedRaster::Gray(img) => img.width(),
            QuantizedRaster::Indexed(img) => img.width(),
        }
    }

    pub fn height(&self) -> usize {
        match self {
            QuantizedRaster::Gray(img) => img.height(),
            QuantizedRaster::Indexed(img) => img.height(),
        }
    }

    /// Per-pixel index (level index or palette index; identical after remap).
    pub fn indices(&self) -> &[u8] {
        match self {
            QuantizedRaster::Gray(img) => img.indices(),
            QuantizedRaster::Indexed(img) => img.indices(),
        }
    }

    /// Number of distinct index values.
    pub fn level_count(&self) -> usize {
        match self {
            QuantizedRaster::Gray(img) => img.levels().count(),
            QuantizedRaster::Indexed(img) => img.palette().len(),
        }
    }

    /// Color of every index, in index order.
    pub fn color_table(&self) -> Vec<Srgb> {
        match self {
            QuantizedRaster::Gray(img) => img
                .levels()
                .values()
                .iter()
                .map(|&v| Srgb::grey(v))
                .collect(),
            QuantizedRaster::Indexed(img) => img.palette().colors().to_vec(),
        }
    }
}

/// Rec.601 luma of every pixel, row-major.
pub fn luma_plane(buffer: &RasterBuffer) -> Vec<u8> {
    buffer
        .as_raw()
        .chunks_exact(3)
        .map(|px| Srgb::from_u8(px[0], px[1], px[2]).luma())
        .collect()
}

/// Reduce a raster to `levels` grey levels, with or without error diffusion.
pub fn quantize(
    buffer: &RasterBuffer,
    levels: usize,
    dither: bool,
) -> Result<DitheredImage, PipelineError> {
    let context = || format!("levels={levels} dither={dither}");
    let quantizer = GrayQuantizer::new(levels)
        .map_err(|e| PipelineError::transform(Stage::Quantize, context(), e))?
        .dither(dither);

    let gray = luma_plane(buffer);
    let (width, height) = buffer.dimensions();
    let quantized = quantizer
        .quantize(&gray, width as usize, height as usize)
        .map_err(|e| PipelineError::transform(Stage::Quantize, context(), e))?;

    tracing::debug!(levels, dither, width, height, "Quantized");
    Ok(quantized)
}

/// Built-in color table for low bit depths.
pub fn default_colormap(bit_depth: u8) -> Option<Palette> {
    match bit_depth {
        1 => Some(Palette::black_white()),
        2 => Some(Palette::gray_4()),
        _ => None,
    }
}

/// Map quantized levels onto a color table.
///
/// Applies only to PNG output at bit depth 1 or 2; otherwise the grey levels
/// pass through. The table is `colormap` if given, else the built-in default.
pub fn remap(
    quantized: DitheredImage,
    format: OutputFormat,
    bit_depth: u8,
    colormap: Option<&Palette>,
) -> Result<QuantizedRaster, PipelineError> {
    if format != OutputFormat::Png || bit_depth > 2 {
        return Ok(QuantizedRaster::Gray(quantized));
    }

    let table = match colormap.cloned().or_else(|| default_colormap(bit_depth)) {
        Some(table) => table,
        None => return Ok(QuantizedRaster::Gray(quantized)),
    };

    match quantized.remap(&table) {
        Ok(indexed) => {
            tracing::debug!(
                entries = table.len(),
                levels = quantized.levels().count(),
                "Remapped onto color table"
            );
            Ok(QuantizedRaster::Indexed(indexed))
        }
        Err(e @ DitherError::PaletteTooSmall { .. }) => Err(PipelineError::invalid(e.to_string())),
        Err(e) => Err(PipelineError::transform(
            Stage::Remap,
            format!("table of {} entries", table.len()),
            e,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn gradient(width: u32) -> RasterBuffer {
        let data = (0..width)
            .flat_map(|x| {
                let v = (x * 255 / (width - 1)) as u8;
                [v, v, v]
            })
            .collect();
        RasterBuffer::from_rgb(width, 1, data).unwrap()
    }

    #[test]
    fn test_luma_plane() {
        let buffer = RasterBuffer::from_rgb(2, 1, vec![255, 0, 0, 9, 9, 9]).unwrap();
        assert_eq!(luma_plane(&buffer), vec![76, 9]);
    }

    #[test]
    fn test_flat_quantize_stays_on_levels() {
        let quantized = quantize(&gradient(64), 4, false).unwrap();
        let values = quantized.gray_values();
        assert!(values.iter().all(|v| [0, 85, 170, 255].contains(v)));
    }

    #[test]
    fn test_quantize_is_reproducible() {
        let a = quantize(&gradient(64), 2, true).unwrap();
        let b = quantize(&gradient(64), 2, true).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_quantize_invalid_levels() {
        let err = quantize(&gradient(4), 1, true).unwrap_err();
        assert_eq!(err.stage(), Some(Stage::Quantize));
    }

    #[test]
    fn test_remap_black_white() {
        let quantized = quantize(&gradient(4), 2, false).unwrap();
        let raster = remap(quantized.clone(), OutputFormat::Png, 1, None).unwrap();

        let QuantizedRaster::Indexed(indexed) = raster else {
            panic!("expected indexed output");
        };
        assert_eq!(indexed.palette(), &Palette::black_white());
        for (&level, &index) in quantized.indices().iter().zip(indexed.indices()) {
            assert_eq!(level, index);
        }
    }

    #[test]
    fn test_remap_skipped_for_bmp_and_deep_bit_depths() {
        let quantized = quantize(&gradient(4), 2, false).unwrap();
        assert!(matches!(
            remap(quantized.clone(), OutputFormat::Bmp, 1, None).unwrap(),
            QuantizedRaster::Gray(_)
        ));

        let quantized = quantize(&gradient(16), 16, false).unwrap();
        assert!(matches!(
            remap(quantized, OutputFormat::Png, 4, None).unwrap(),
            QuantizedRaster::Gray(_)
        ));
    }

    #[test]
    fn test_remap_table_too_small_is_invalid_input() {
        let quantized = quantize(&gradient(4), 4, false).unwrap();
        let err = remap(quantized, OutputFormat::Png, 2, Some(&Palette::black_white())).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidInput(_)));
    }

    #[test]
    fn test_color_table() {
        let quantized = quantize(&gradient(4), 4, false).unwrap();
        let gray = QuantizedRaster::Gray(quantized);
        assert_eq!(gray.level_count(), 4);
        assert_eq!(gray.color_table()[1], Srgb::grey(85));
    }
}
