//! Bit-depth packing and container encoding (PNG, BMP).

use std::io::Cursor;
use std::path::{Path, PathBuf};

use super::quantize::QuantizedRaster;
use crate::error::{PipelineError, Stage};
use crate::models::OutputFormat;

/// Smallest PNG sample depth (1, 2, 4, 8) that holds `bit_depth` bits.
pub fn packed_depth(bit_depth: u8) -> u8 {
    match bit_depth {
        0 | 1 => 1,
        2 => 2,
        3 | 4 => 4,
        _ => 8,
    }
}

/// BMP has no portable 2-bit mode, so 2-bit data is stored as 4-bit.
fn bmp_depth(bit_depth: u8) -> u8 {
    match packed_depth(bit_depth) {
        1 => 1,
        2 | 4 => 4,
        _ => 8,
    }
}

/// Encoded output plus the metadata a receiver needs to validate it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub bytes: Vec<u8>,
    pub format: OutputFormat,
    pub width: u32,
    pub height: u32,
    /// Bits per pixel actually written.
    pub bit_depth: u8,
}

impl EncodedImage {
    pub fn extension(&self) -> &'static str {
        self.format.extension()
    }

    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// `<dir>/<stem>_processed.<ext>` next to `input`.
    pub fn processed_path_for(&self, input: &Path) -> PathBuf {
        processed_path_for(input, self.format)
    }

    pub fn write_to(&self, path: &Path) -> Result<(), PipelineError> {
        std::fs::write(path, &self.bytes)
            .map_err(|e| PipelineError::transform(Stage::Write, path.display().to_string(), e))?;
        tracing::info!(
            path = %path.display(),
            size = self.bytes.len(),
            "Wrote {}",
            self.mime_type()
        );
        Ok(())
    }
}

/// Output path for a processed copy of `input`.
pub fn processed_path_for(input: &Path, format: OutputFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    input.with_file_name(format!("{stem}_processed.{}", format.extension()))
}

/// Serialize a quantized raster at the requested bit depth.
///
/// # Errors
///
/// [`PipelineError::InvalidInput`] if the bit depth is outside `1..=8` or the
/// raster has more levels than the packed depth can address.
pub fn encode(
    raster: &QuantizedRaster,
    format: OutputFormat,
    bit_depth: u8,
) -> Result<EncodedImage, PipelineError> {
    if !(1..=8).contains(&bit_depth) {
        return Err(PipelineError::invalid(format!(
            "bit depth must be between 1 and 8, got {bit_depth}"
        )));
    }
    let depth = match format {
        OutputFormat::Png => packed_depth(bit_depth),
        OutputFormat::Bmp => bmp_depth(bit_depth),
    };
    let levels = raster.level_count();
    if levels > 1 << depth {
        return Err(PipelineError::invalid(format!(
            "{levels} levels do not fit in {depth} bits per pixel"
        )));
    }

    let width = raster.width() as u32;
    let height = raster.height() as u32;
    let bytes = match format {
        OutputFormat::Png => encode_png(raster, depth)?,
        OutputFormat::Bmp => encode_bmp(raster, depth),
    };

    tracing::debug!(
        %format,
        width,
        height,
        depth,
        size = bytes.len(),
        "Encoded"
    );

    Ok(EncodedImage {
        bytes,
        format,
        width,
        height,
        bit_depth: depth,
    })
}

fn encode_png(raster: &QuantizedRaster, depth: u8) -> Result<Vec<u8>, PipelineError> {
    let width = raster.width() as u32;
    let height = raster.height() as u32;

    let (color_type, samples, plte) = match raster {
        QuantizedRaster::Indexed(_) => {
            let plte: Vec<u8> = raster
                .color_table()
                .iter()
                .flat_map(|c| c.to_bytes())
                .collect();
            (png::ColorType::Indexed, raster.indices().to_vec(), Some(plte))
        }
        QuantizedRaster::Gray(img) => {
            let max = (1u32 << depth) - 1;
            let samples = img
                .gray_values()
                .into_iter()
                .map(|v| ((v as u32 * max + 127) / 255) as u8)
                .collect();
            (png::ColorType::Grayscale, samples, None)
        }
    };

    let bit_depth = match depth {
        1 => png::BitDepth::One,
        2 => png::BitDepth::Two,
        4 => png::BitDepth::Four,
        _ => png::BitDepth::Eight,
    };
    let packed = if depth < 8 {
        pack_nbits(&samples, width, depth)
    } else {
        samples
    };

    let context = || format!("{width}x{height} png {depth}-bit");
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(color_type);
        encoder.set_depth(bit_depth);
        encoder.set_compression(png::Compression::Best);
        if let Some(plte) = plte {
            encoder.set_palette(plte);
        }
        let mut writer = encoder
            .write_header()
            .map_err(|e| PipelineError::transform(Stage::Encode, context(), e))?;
        writer
            .write_image_data(&packed)
            .map_err(|e| PipelineError::transform(Stage::Encode, context(), e))?;
        writer
            .finish()
            .map_err(|e| PipelineError::transform(Stage::Encode, context(), e))?;
    }
    Ok(buf.into_inner())
}

/// Pack pixel values into N-bit rows (1, 2, or 4 bits per pixel), MSB first.
///
/// Each row starts on a byte boundary.
fn pack_nbits(samples: &[u8], width: u32, bits: u8) -> Vec<u8> {
    let bytes_per_row = packed_row_len(width, bits);
    let height = samples.len() / width as usize;
    let mut packed = Vec::with_capacity(bytes_per_row * height);
    for row in samples.chunks(width as usize) {
        pack_row(row, bits, &mut packed);
    }
    packed
}

fn packed_row_len(width: u32, bits: u8) -> usize {
    (width as usize * bits as usize).div_ceil(8)
}

fn pack_row(row: &[u8], bits: u8, out: &mut Vec<u8>) {
    if bits == 8 {
        out.extend_from_slice(row);
        return;
    }
    let pixels_per_byte = 8 / bits as usize;
    let mask = (1u8 << bits) - 1;
    let mut byte = 0u8;
    for (i, &idx) in row.iter().enumerate() {
        let shift = (8 - bits) - (i % pixels_per_byte) as u8 * bits;
        byte |= (idx & mask) << shift;

        if (i % pixels_per_byte) == pixels_per_byte - 1 || i == row.len() - 1 {
            out.push(byte);
            byte = 0;
        }
    }
}

const BMP_HEADER_LEN: usize = 54;

/// Uncompressed paletted BMP: BITMAPINFOHEADER, color table, bottom-up rows
/// padded to 4 bytes.
fn encode_bmp(raster: &QuantizedRaster, depth: u8) -> Vec<u8> {
    let width = raster.width() as u32;
    let height = raster.height() as u32;
    let table = raster.color_table();

    let row_len = packed_row_len(width, depth);
    let stride = row_len.div_ceil(4) * 4;
    let pixel_data_size = stride * height as usize;
    let data_offset = BMP_HEADER_LEN + table.len() * 4;
    let file_size = data_offset + pixel_data_size;

    let mut out = Vec::with_capacity(file_size);
    write_bmp_header(
        &mut out,
        file_size,
        data_offset,
        pixel_data_size,
        width,
        height,
        depth as u16,
        table.len(),
    );
    for color in &table {
        out.extend_from_slice(&[color.b, color.g, color.r, 0]);
    }

    let mut row_buf = Vec::with_capacity(stride);
    for row in raster.indices().chunks(width as usize).rev() {
        row_buf.clear();
        pack_row(row, depth, &mut row_buf);
        row_buf.resize(stride, 0);
        out.extend_from_slice(&row_buf);
    }

    out
}

#[allow(clippy::too_many_arguments)]
fn write_bmp_header(
    out: &mut Vec<u8>,
    file_size: usize,
    data_offset: usize,
    pixel_data_size: usize,
    width: u32,
    height: u32,
    bpp: u16,
    colors_used: usize,
) {
    // File header (14 bytes)
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&(file_size as u32).to_le_bytes());
    out.extend_from_slice(&[0u8; 4]); // reserved
    out.extend_from_slice(&(data_offset as u32).to_le_bytes());

    // DIB header (BITMAPINFOHEADER, 40 bytes)
    out.extend_from_slice(&40u32.to_le_bytes());
    out.extend_from_slice(&(width as i32).to_le_bytes());
    out.extend_from_slice(&(height as i32).to_le_bytes()); // positive = bottom-up
    out.extend_from_slice(&1u16.to_le_bytes()); // planes
    out.extend_from_slice(&bpp.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes()); // BI_RGB
    out.extend_from_slice(&(pixel_data_size as u32).to_le_bytes());
    out.extend_from_slice(&2835u32.to_le_bytes()); // 72 DPI
    out.extend_from_slice(&2835u32.to_le_bytes());
    out.extend_from_slice(&(colors_used as u32).to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes()); // important colors
}
