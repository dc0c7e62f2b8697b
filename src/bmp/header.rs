//! BMP file header, info header (all five Windows revisions), bitfield
//! masks and color table.

use alloc::vec::Vec;

use super::cursor::ByteCursor;
use crate::error::BitmapError;

/// Size of the `BITMAPFILEHEADER` that precedes the info header.
pub(crate) const FILE_HEADER_SIZE: usize = 14;

// ── Header revision ─────────────────────────────────────────────────

/// Info header revision, selected by the header size field.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HeaderRevision {
    /// `BITMAPINFOHEADER` (40 bytes).
    Info,
    /// `BITMAPV2INFOHEADER` (52 bytes): adds RGB masks.
    V2Info,
    /// `BITMAPV3INFOHEADER` (56 bytes): adds the alpha mask.
    V3Info,
    /// `BITMAPV4HEADER` (108 bytes): adds color space and gamma.
    V4,
    /// `BITMAPV5HEADER` (124 bytes): adds intent and ICC profile fields.
    V5,
}

impl HeaderRevision {
    pub fn from_size(size: u32) -> Option<Self> {
        match size {
            40 => Some(Self::Info),
            52 => Some(Self::V2Info),
            56 => Some(Self::V3Info),
            108 => Some(Self::V4),
            124 => Some(Self::V5),
            _ => None,
        }
    }

    /// Info header size in bytes.
    pub fn size(self) -> u32 {
        match self {
            Self::Info => 40,
            Self::V2Info => 52,
            Self::V3Info => 56,
            Self::V4 => 108,
            Self::V5 => 124,
        }
    }
}

// ── Orientation ─────────────────────────────────────────────────────

/// Row order of the stored pixel data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    /// Last image row stored first (positive height; the BMP default).
    #[default]
    BottomUp,
    /// First image row stored first (negative height).
    TopDown,
}

// ── Compression ─────────────────────────────────────────────────────

#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Compression {
    Rgb,
    Rle8,
    Rle4,
    Bitfields,
    Jpeg,
    Png,
    AlphaBitfields,
    /// Unrecognized code; pixel data is read as uncompressed.
    Unknown(u32),
}

impl Compression {
    pub fn from_u32(code: u32) -> Self {
        match code {
            0 => Self::Rgb,
            1 => Self::Rle8,
            2 => Self::Rle4,
            3 => Self::Bitfields,
            4 => Self::Jpeg,
            5 => Self::Png,
            6 => Self::AlphaBitfields,
            other => Self::Unknown(other),
        }
    }

    /// The raw `biCompression` value.
    pub fn code(self) -> u32 {
        match self {
            Self::Rgb => 0,
            Self::Rle8 => 1,
            Self::Rle4 => 2,
            Self::Bitfields => 3,
            Self::Jpeg => 4,
            Self::Png => 5,
            Self::AlphaBitfields => 6,
            Self::Unknown(code) => code,
        }
    }
}

// ── Masks and palette ───────────────────────────────────────────────

/// Bitfield masks selecting each channel from a packed 16/32-bit sample.
///
/// An alpha mask of zero means the image has no alpha channel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ChannelMasks {
    pub red: u32,
    pub green: u32,
    pub blue: u32,
    pub alpha: u32,
}

impl ChannelMasks {
    /// Masks implied by the bit depth when the header carries none.
    pub fn defaults_for(bits_per_pixel: u16) -> Self {
        match bits_per_pixel {
            16 => Self {
                red: 0x7c00,
                green: 0x03e0,
                blue: 0x001f,
                alpha: 0,
            },
            32 => Self {
                red: 0x00ff_0000,
                green: 0x0000_ff00,
                blue: 0x0000_00ff,
                alpha: 0,
            },
            _ => Self::default(),
        }
    }
}

/// One color table entry, in file order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PaletteEntry {
    pub blue: u8,
    pub green: u8,
    pub red: u8,
    pub reserved: u8,
}

// ── Parsed header ───────────────────────────────────────────────────

/// Everything read from the file and info headers, plus masks and palette.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BmpHeader {
    pub file_size: u32,
    pub reserved1: u16,
    pub reserved2: u16,
    /// Offset of the pixel data from the start of the file.
    pub data_offset: u32,
    pub header_size: u32,
    pub revision: HeaderRevision,
    pub width: u32,
    /// Absolute image height; see [`BmpHeader::orientation`] for the sign.
    pub height: u32,
    pub orientation: Orientation,
    pub planes: u16,
    pub bits_per_pixel: u16,
    pub compression: Compression,
    pub raw_size: u32,
    pub horizontal_resolution: u32,
    pub vertical_resolution: u32,
    pub colors_used: u32,
    pub important_colors: u32,
    pub masks: ChannelMasks,
    pub palette: Vec<PaletteEntry>,
}

impl BmpHeader {
    pub fn is_top_down(&self) -> bool {
        self.orientation == Orientation::TopDown
    }

    /// Size of the decoded pixel buffer (`width * height * 4`).
    pub fn output_len(&self) -> Result<usize, BitmapError> {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|px| px.checked_mul(4))
            .ok_or(BitmapError::DimensionsTooLarge {
                width: self.width,
                height: self.height,
            })
    }
}

/// Parse the file header, info header, masks and palette.
///
/// On success the cursor sits at the first byte of pixel data.
pub(crate) fn parse_header(bytes: &mut ByteCursor<'_>) -> Result<BmpHeader, BitmapError> {
    let magic = bytes
        .read_fixed_bytes::<2>()
        .map_err(|_| BitmapError::InvalidSignature)?;
    if &magic != b"BM" {
        return Err(BitmapError::InvalidSignature);
    }

    let file_size = bytes.read_u32_le()?;
    let reserved1 = bytes.read_u16_le()?;
    let reserved2 = bytes.read_u16_le()?;
    let data_offset = bytes.read_u32_le()?;

    let header_size = bytes.read_u32_le()?;
    let revision = HeaderRevision::from_size(header_size)
        .ok_or(BitmapError::UnsupportedHeaderRevision(header_size))?;

    let width = bytes.read_u32_le()?;
    let raw_height = bytes.read_i32_le()?;
    let planes = bytes.read_u16_le()?;
    let bits_per_pixel = bytes.read_u16_le()?;
    let compression_code = bytes.read_u32_le()?;
    let raw_size = bytes.read_u32_le()?;
    let horizontal_resolution = bytes.read_u32_le()?;
    let vertical_resolution = bytes.read_u32_le()?;
    let colors_used = bytes.read_u32_le()?;
    let important_colors = bytes.read_u32_le()?;

    if !matches!(bits_per_pixel, 1 | 4 | 8 | 16 | 24 | 32) {
        return Err(BitmapError::UnsupportedBitDepth(bits_per_pixel));
    }

    let compression = Compression::from_u32(compression_code);
    match compression {
        Compression::Jpeg | Compression::Png => {
            return Err(BitmapError::UnsupportedCompression(compression_code));
        }
        Compression::Unknown(code) => {
            log::warn!("unknown BMP compression {code}, reading pixels as uncompressed");
        }
        _ => {}
    }

    let orientation = if raw_height < 0 {
        Orientation::TopDown
    } else {
        Orientation::BottomUp
    };
    let height = raw_height.unsigned_abs();

    // Masks: embedded for V2+ headers, or trailing a 40-byte header when
    // the compression declares bitfields.
    let mut masks = ChannelMasks::defaults_for(bits_per_pixel);
    if header_size > 40
        || matches!(
            compression,
            Compression::Bitfields | Compression::AlphaBitfields
        )
    {
        masks.red = bytes.read_u32_le()?;
        masks.green = bytes.read_u32_le()?;
        masks.blue = bytes.read_u32_le()?;
    }
    if header_size > 52 || compression == Compression::AlphaBitfields {
        masks.alpha = bytes.read_u32_le()?;
    }

    // Color space, endpoints, gamma, intent and profile fields are not
    // interpreted.
    let header_end = FILE_HEADER_SIZE + header_size as usize;
    if bytes.position() < header_end {
        bytes.set_position(header_end)?;
    }

    let palette = if bits_per_pixel <= 8 || colors_used > 0 {
        let len = if colors_used == 0 {
            1usize << bits_per_pixel
        } else {
            colors_used as usize
        };
        read_palette(bytes, len)?
    } else {
        Vec::new()
    };

    // Honor a gap between the color table and the pixel data.
    if data_offset as usize > bytes.position() {
        bytes.set_position(data_offset as usize)?;
    }

    log::debug!(
        "BMP {width}x{height} {bits_per_pixel}bpp {compression:?} {revision:?} \
         {orientation:?}, {} palette entries",
        palette.len()
    );

    Ok(BmpHeader {
        file_size,
        reserved1,
        reserved2,
        data_offset,
        header_size,
        revision,
        width,
        height,
        orientation,
        planes,
        bits_per_pixel,
        compression,
        raw_size,
        horizontal_resolution,
        vertical_resolution,
        colors_used,
        important_colors,
        masks,
        palette,
    })
}

fn read_palette(bytes: &mut ByteCursor<'_>, len: usize) -> Result<Vec<PaletteEntry>, BitmapError> {
    // Reject oversized color counts before allocating.
    let needed = len.checked_mul(4).ok_or(BitmapError::UnexpectedEof)?;
    if needed > bytes.remaining() {
        return Err(BitmapError::UnexpectedEof);
    }

    let mut palette = Vec::with_capacity(len);
    for _ in 0..len {
        let [blue, green, red, reserved] = bytes.read_fixed_bytes::<4>()?;
        palette.push(PaletteEntry {
            blue,
            green,
            red,
            reserved,
        });
    }
    Ok(palette)
}
