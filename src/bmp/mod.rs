//! Windows BMP decoder (internal).
//!
//! Use top-level [`crate::decode_bmp`], [`crate::DecodeRequest`], etc.

mod cursor;
pub(crate) mod header;
mod masks;
mod pixels;
mod rle;
mod scanline;

use alloc::vec;

use enough::Stop;

use self::cursor::ByteCursor;
use self::header::{BmpHeader, Compression};
use self::masks::MaskRescaler;
use self::pixels::PaletteWriter;
use self::rle::RleMode;
use self::scanline::RowGeometry;
use crate::decode::DecodeOutput;
use crate::error::BitmapError;
use crate::limits::Limits;
use crate::pixel::{ChannelOffsets, PixelLayout};

/// Parse headers only.
pub(crate) fn probe(data: &[u8]) -> Result<BmpHeader, BitmapError> {
    header::parse_header(&mut ByteCursor::new(data))
}

/// Decode a complete BMP file into 4-byte pixels, top row first.
pub(crate) fn decode(
    data: &[u8],
    rgba_order: bool,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<DecodeOutput, BitmapError> {
    let mut bytes = ByteCursor::new(data);
    let header = header::parse_header(&mut bytes)?;

    let out_len = header.output_len()?;
    if let Some(limits) = limits {
        limits.check(&header, out_len)?;
    }
    stop.check()?;

    let geometry = RowGeometry {
        width: header.width as usize,
        height: header.height as usize,
        bits_per_pixel: usize::from(header.bits_per_pixel),
        orientation: header.orientation,
    };
    let rle = match (header.bits_per_pixel, header.compression) {
        (8, Compression::Rle8) => Some(RleMode::Rle8),
        (4, Compression::Rle4) => Some(RleMode::Rle4),
        _ => None,
    };
    let layout = output_layout(header.bits_per_pixel, rle.is_some(), rgba_order)?;

    if out_len == 0 {
        return Ok(DecodeOutput::new(vec![], header, layout));
    }
    // Reject inputs that cannot hold the pixel data before allocating for it.
    let needed = match rle {
        Some(_) => 2,
        None => (geometry.unpadded_row_bytes() + geometry.row_padding())
            .checked_mul(geometry.height)
            .ok_or(BitmapError::UnexpectedEof)?,
    };
    if needed > bytes.remaining() {
        log::debug!(
            "pixel data needs {needed} bytes, {} remain",
            bytes.remaining()
        );
        return Err(BitmapError::UnexpectedEof);
    }

    let offsets = ChannelOffsets::new(rgba_order);
    let mut pixels = vec![0u8; out_len];
    let mut palette = PaletteWriter::new(&header.palette);

    match (rle, header.bits_per_pixel) {
        (Some(mode), _) => {
            rle::decode_rle(&mut bytes, mode, &geometry, &mut palette, &mut pixels, stop)?
        }
        (None, 1) => pixels::decode_1bit(&mut bytes, &geometry, &mut palette, &mut pixels, stop)?,
        (None, 4) => pixels::decode_4bit(&mut bytes, &geometry, &mut palette, &mut pixels, stop)?,
        (None, 8) => pixels::decode_8bit(&mut bytes, &geometry, &mut palette, &mut pixels, stop)?,
        (None, 16) => {
            let rescaler = MaskRescaler::new(&header.masks);
            pixels::decode_16bit(&mut bytes, &geometry, &rescaler, offsets, &mut pixels, stop)?
        }
        (None, 24) => pixels::decode_24bit(&mut bytes, &geometry, offsets, &mut pixels, stop)?,
        (None, _) => {
            let rescaler = MaskRescaler::new(&header.masks);
            pixels::decode_32bit(&mut bytes, &geometry, &rescaler, offsets, &mut pixels, stop)?
        }
    }

    if palette.misses() > 0 {
        log::debug!(
            "{} palette indices outside the {}-entry color table, written as white",
            palette.misses(),
            header.palette.len()
        );
    }

    Ok(DecodeOutput::new(pixels, header, layout))
}

/// Meaning of the 4 output bytes for a given source depth.
fn output_layout(bpp: u16, rle: bool, rgba_order: bool) -> Result<PixelLayout, BitmapError> {
    Ok(match (bpp, rgba_order) {
        _ if rle => PixelLayout::Xbgr8,
        (1 | 4 | 8, _) => PixelLayout::Xbgr8,
        (16 | 32, false) => PixelLayout::Abgr8,
        (16 | 32, true) => PixelLayout::Rgba8,
        (24, false) => PixelLayout::Xbgr8,
        (24, true) => PixelLayout::Rgbx8,
        (bpp, _) => return Err(BitmapError::UnsupportedBitDepth(bpp)),
    })
}
