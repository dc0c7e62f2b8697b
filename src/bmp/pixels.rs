//! Uncompressed pixel decoders (1/4/8/16/24/32 bits per pixel).
//!
//! Palette paths always write `[0, blue, green, red]`. Bitfield and
//! 24-bit paths place channels at the configured [`ChannelOffsets`].
//! The two conventions are independent and stay that way.

use enough::Stop;

use super::cursor::ByteCursor;
use super::header::PaletteEntry;
use super::masks::MaskRescaler;
use super::scanline::{RowControl, RowGeometry, scan_rows};
use crate::error::BitmapError;
use crate::pixel::ChannelOffsets;

/// Written for palette indices past the end of the color table.
const OUT_OF_RANGE: [u8; 4] = [0, 0xff, 0xff, 0xff];

/// Looks up palette indices and writes them in `[0, b, g, r]` order,
/// counting indices that fall outside the table.
pub(crate) struct PaletteWriter<'p> {
    palette: &'p [PaletteEntry],
    misses: usize,
}

impl<'p> PaletteWriter<'p> {
    pub(crate) fn new(palette: &'p [PaletteEntry]) -> Self {
        Self { palette, misses: 0 }
    }

    /// Number of out-of-range indices seen so far.
    pub(crate) fn misses(&self) -> usize {
        self.misses
    }

    #[inline]
    pub(crate) fn write(&mut self, px: &mut [u8], index: u8) {
        match self.palette.get(usize::from(index)) {
            Some(entry) => px.copy_from_slice(&[0, entry.blue, entry.green, entry.red]),
            None => {
                self.misses += 1;
                px.copy_from_slice(&OUT_OF_RANGE);
            }
        }
    }
}

#[inline]
fn pixel_mut(out: &mut [u8], width: usize, line: usize, col: usize) -> &mut [u8] {
    let start = (line * width + col) * 4;
    &mut out[start..start + 4]
}

#[inline]
fn write_masked(px: &mut [u8], sample: u32, rescaler: &MaskRescaler, at: ChannelOffsets) {
    px[at.red] = rescaler.red.extract(sample);
    px[at.green] = rescaler.green.extract(sample);
    px[at.blue] = rescaler.blue.extract(sample);
    px[at.alpha] = rescaler.alpha.extract(sample);
}

/// 1 bpp: eight palette indices per byte, most significant bit first.
pub(crate) fn decode_1bit(
    bytes: &mut ByteCursor<'_>,
    geometry: &RowGeometry,
    palette: &mut PaletteWriter<'_>,
    out: &mut [u8],
    stop: &dyn Stop,
) -> Result<(), BitmapError> {
    let width = geometry.width;
    scan_rows(bytes, geometry, width.div_ceil(8), stop, |bytes, x, line| {
        let b = bytes.read_u8()?;
        for i in 0..8 {
            let col = x * 8 + i;
            if col >= width {
                break;
            }
            palette.write(pixel_mut(out, width, line, col), (b >> (7 - i)) & 0x01);
        }
        Ok(RowControl::Continue)
    })
}

/// 4 bpp: two palette indices per byte, high nibble first. On odd widths
/// the low nibble of the last byte in each row is not a pixel.
pub(crate) fn decode_4bit(
    bytes: &mut ByteCursor<'_>,
    geometry: &RowGeometry,
    palette: &mut PaletteWriter<'_>,
    out: &mut [u8],
    stop: &dyn Stop,
) -> Result<(), BitmapError> {
    let width = geometry.width;
    scan_rows(bytes, geometry, width.div_ceil(2), stop, |bytes, x, line| {
        let b = bytes.read_u8()?;
        let col = x * 2;
        palette.write(pixel_mut(out, width, line, col), b >> 4);
        if col + 1 >= width {
            return Ok(RowControl::StopRow);
        }
        palette.write(pixel_mut(out, width, line, col + 1), b & 0x0f);
        Ok(RowControl::Continue)
    })
}

/// 8 bpp: one palette index per byte.
pub(crate) fn decode_8bit(
    bytes: &mut ByteCursor<'_>,
    geometry: &RowGeometry,
    palette: &mut PaletteWriter<'_>,
    out: &mut [u8],
    stop: &dyn Stop,
) -> Result<(), BitmapError> {
    let width = geometry.width;
    scan_rows(bytes, geometry, width, stop, |bytes, x, line| {
        let index = bytes.read_u8()?;
        palette.write(pixel_mut(out, width, line, x), index);
        Ok(RowControl::Continue)
    })
}

/// 16 bpp: one little-endian sample per pixel, split by the masks.
pub(crate) fn decode_16bit(
    bytes: &mut ByteCursor<'_>,
    geometry: &RowGeometry,
    rescaler: &MaskRescaler,
    at: ChannelOffsets,
    out: &mut [u8],
    stop: &dyn Stop,
) -> Result<(), BitmapError> {
    let width = geometry.width;
    scan_rows(bytes, geometry, width, stop, |bytes, x, line| {
        let sample = u32::from(bytes.read_u16_le()?);
        write_masked(pixel_mut(out, width, line, x), sample, rescaler, at);
        Ok(RowControl::Continue)
    })
}

/// 24 bpp: blue, green, red bytes. The fourth output byte is left as is.
pub(crate) fn decode_24bit(
    bytes: &mut ByteCursor<'_>,
    geometry: &RowGeometry,
    at: ChannelOffsets,
    out: &mut [u8],
    stop: &dyn Stop,
) -> Result<(), BitmapError> {
    let width = geometry.width;
    scan_rows(bytes, geometry, width, stop, |bytes, x, line| {
        let [blue, green, red] = bytes.read_fixed_bytes::<3>()?;
        let px = pixel_mut(out, width, line, x);
        px[at.red] = red;
        px[at.green] = green;
        px[at.blue] = blue;
        Ok(RowControl::Continue)
    })
}

/// 32 bpp: one little-endian sample per pixel, split by the masks.
pub(crate) fn decode_32bit(
    bytes: &mut ByteCursor<'_>,
    geometry: &RowGeometry,
    rescaler: &MaskRescaler,
    at: ChannelOffsets,
    out: &mut [u8],
    stop: &dyn Stop,
) -> Result<(), BitmapError> {
    let width = geometry.width;
    scan_rows(bytes, geometry, width, stop, |bytes, x, line| {
        let sample = bytes.read_u32_le()?;
        write_masked(pixel_mut(out, width, line, x), sample, rescaler, at);
        Ok(RowControl::Continue)
    })
}
