//! Hand-built BMP fixtures.

#![allow(dead_code)]

/// Assembles a BMP file from its parts. Defaults to a 40-byte info header,
/// no compression and no palette.
#[derive(Clone, Debug)]
pub struct BmpBuilder {
    pub header_size: u32,
    pub width: u32,
    pub height: i32,
    pub bpp: u16,
    pub compression: u32,
    pub colors_used: u32,
    pub masks: Option<[u32; 4]>,
    pub palette: Vec<[u8; 4]>,
    /// Zero bytes between the color table and the pixel data.
    pub gap: usize,
    pub pixel_data: Vec<u8>,
}

impl BmpBuilder {
    pub fn new(width: u32, height: i32, bpp: u16) -> Self {
        Self {
            header_size: 40,
            width,
            height,
            bpp,
            compression: 0,
            colors_used: 0,
            masks: None,
            palette: Vec::new(),
            gap: 0,
            pixel_data: Vec::new(),
        }
    }

    pub fn header_size(mut self, size: u32) -> Self {
        self.header_size = size;
        self
    }

    pub fn compression(mut self, code: u32) -> Self {
        self.compression = code;
        self
    }

    pub fn masks(mut self, masks: [u32; 4]) -> Self {
        self.masks = Some(masks);
        self
    }

    /// Palette entries as (blue, green, red).
    pub fn palette(mut self, entries: &[(u8, u8, u8)]) -> Self {
        self.palette = entries.iter().map(|&(b, g, r)| [b, g, r, 0]).collect();
        self
    }

    pub fn colors_used(mut self, n: u32) -> Self {
        self.colors_used = n;
        self
    }

    pub fn gap(mut self, n: usize) -> Self {
        self.gap = n;
        self
    }

    /// Raw pixel data, already padded.
    pub fn data(mut self, bytes: Vec<u8>) -> Self {
        self.pixel_data = bytes;
        self
    }

    /// Stored rows (in file order), each padded to 4 bytes.
    pub fn rows(self, rows: &[Vec<u8>]) -> Self {
        let data = pad_rows(rows);
        self.data(data)
    }

    pub fn build(&self) -> Vec<u8> {
        let default_masks = match self.bpp {
            16 => [0x7c00, 0x03e0, 0x001f, 0],
            32 => [0x00ff_0000, 0x0000_ff00, 0x0000_00ff, 0],
            _ => [0; 4],
        };
        let masks = self.masks.unwrap_or(default_masks);

        let mut info = Vec::new();
        info.extend_from_slice(&self.header_size.to_le_bytes());
        info.extend_from_slice(&self.width.to_le_bytes());
        info.extend_from_slice(&self.height.to_le_bytes());
        info.extend_from_slice(&1u16.to_le_bytes());
        info.extend_from_slice(&self.bpp.to_le_bytes());
        info.extend_from_slice(&self.compression.to_le_bytes());
        info.extend_from_slice(&(self.pixel_data.len() as u32).to_le_bytes());
        info.extend_from_slice(&2835u32.to_le_bytes());
        info.extend_from_slice(&2835u32.to_le_bytes());
        info.extend_from_slice(&self.colors_used.to_le_bytes());
        info.extend_from_slice(&0u32.to_le_bytes());

        if self.header_size > 40 || self.compression == 3 || self.compression == 6 {
            for m in &masks[..3] {
                info.extend_from_slice(&m.to_le_bytes());
            }
        }
        if self.header_size > 52 || self.compression == 6 {
            info.extend_from_slice(&masks[3].to_le_bytes());
        }
        if info.len() < self.header_size as usize {
            info.resize(self.header_size as usize, 0);
        }

        let palette_len = self.palette.len() * 4;
        let offset = 14 + info.len() + palette_len + self.gap;
        let file_size = offset + self.pixel_data.len();

        let mut out = Vec::with_capacity(file_size);
        out.extend_from_slice(b"BM");
        out.extend_from_slice(&(file_size as u32).to_le_bytes());
        out.extend_from_slice(&0u16.to_le_bytes());
        out.extend_from_slice(&0u16.to_le_bytes());
        out.extend_from_slice(&(offset as u32).to_le_bytes());
        out.extend_from_slice(&info);
        for entry in &self.palette {
            out.extend_from_slice(entry);
        }
        out.resize(offset, 0);
        out.extend_from_slice(&self.pixel_data);
        out
    }
}

/// Concatenate rows, padding each to a multiple of 4 bytes.
pub fn pad_rows(rows: &[Vec<u8>]) -> Vec<u8> {
    let mut out = Vec::new();
    for row in rows {
        out.extend_from_slice(row);
        out.resize(out.len().next_multiple_of(4), 0);
    }
    out
}

/// Palette of `n` entries where entry `i` is (blue = i, green = 2i, red = 3i).
pub fn ramp_palette(n: usize) -> Vec<(u8, u8, u8)> {
    (0..n)
        .map(|i| (i as u8, (i * 2) as u8, (i * 3) as u8))
        .collect()
}

/// The `[0, b, g, r]` bytes a palette entry decodes to.
pub fn xbgr(entry: (u8, u8, u8)) -> [u8; 4] {
    [0, entry.0, entry.1, entry.2]
}

pub fn noise(len: usize, seed: u32) -> Vec<u8> {
    let mut state = seed;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            state as u8
        })
        .collect()
}
