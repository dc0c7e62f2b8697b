//! RLE8 / RLE4 decompression.
//!
//! The stream is a sequence of byte pairs `(count, value)`:
//!
//! - `count > 0`: encoded run, `count` pixels of `value` (RLE4 alternates
//!   the high and low nibble of `value`, starting high).
//! - `(0, 0)`: end of line.
//! - `(0, 1)`: end of bitmap.
//! - `(0, 2)`: delta, followed by `dx, dy`.
//! - `(0, n)`, `n >= 3`: absolute run of `n` literal indices, padded to an
//!   even number of bytes.
//!
//! The output is pre-filled with `0xFF` so skipped pixels stay visible.

use enough::Stop;

use super::cursor::ByteCursor;
use super::header::Orientation;
use super::pixels::PaletteWriter;
use super::scanline::RowGeometry;
use crate::error::BitmapError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RleMode {
    Rle8,
    Rle4,
}

/// Output position of the RLE state machine.
struct RleWriter<'o, 'w, 'p> {
    out: &'o mut [u8],
    palette: &'w mut PaletteWriter<'p>,
    width: usize,
    height: usize,
    row: isize,
    col: usize,
    /// +1 for top-down, -1 for bottom-up.
    step: isize,
}

impl<'o, 'w, 'p> RleWriter<'o, 'w, 'p> {
    fn new(
        out: &'o mut [u8],
        palette: &'w mut PaletteWriter<'p>,
        width: usize,
        height: usize,
        orientation: Orientation,
    ) -> Self {
        let (row, step) = match orientation {
            Orientation::BottomUp => (height as isize - 1, -1),
            Orientation::TopDown => (0, 1),
        };
        Self {
            out,
            palette,
            width,
            height,
            row,
            col: 0,
            step,
        }
    }

    /// Byte offset of the next pixel in the output buffer.
    fn location(&self) -> usize {
        (self.row.max(0) as usize * self.width + self.col) * 4
    }

    fn last_row(&self) -> isize {
        if self.step > 0 { self.height as isize - 1 } else { 0 }
    }

    /// No further pixel can be written: the row has left the image, or
    /// the final row in the direction of travel is full.
    fn exhausted(&self) -> bool {
        self.row < 0
            || self.row >= self.height as isize
            || (self.row == self.last_row() && self.col >= self.width)
    }

    fn put(&mut self, index: u8) {
        if self.col < self.width && !self.exhausted() {
            let start = self.location();
            self.palette.write(&mut self.out[start..start + 4], index);
        }
        self.col = self.col.saturating_add(1);
    }

    fn end_of_line(&mut self) {
        self.row += self.step;
        self.col = 0;
    }

    fn delta(&mut self, dx: u8, dy: u8) {
        self.col = self.col.saturating_add(usize::from(dx));
        self.row += self.step * isize::from(dy);
    }
}

/// Decode an RLE4 or RLE8 stream into `out` (`width * height * 4` bytes).
pub(crate) fn decode_rle(
    bytes: &mut ByteCursor<'_>,
    mode: RleMode,
    geometry: &RowGeometry,
    palette: &mut PaletteWriter<'_>,
    out: &mut [u8],
    stop: &dyn Stop,
) -> Result<(), BitmapError> {
    out.fill(0xff);
    let mut w = RleWriter::new(
        out,
        palette,
        geometry.width,
        geometry.height,
        geometry.orientation,
    );
    let mut commands = 0u32;

    while !w.exhausted() {
        commands = commands.wrapping_add(1);
        if commands % 1024 == 0 {
            stop.check()?;
        }

        let count = bytes.read_u8()?;
        let value = bytes.read_u8()?;

        if count > 0 {
            match mode {
                RleMode::Rle8 => {
                    for _ in 0..count {
                        w.put(value);
                    }
                }
                RleMode::Rle4 => {
                    for i in 0..count {
                        w.put(if i & 1 == 0 { value >> 4 } else { value & 0x0f });
                    }
                }
            }
            continue;
        }

        match value {
            0 => w.end_of_line(),
            1 => {
                log::trace!("RLE end of bitmap at row {} col {}", w.row, w.col);
                return Ok(());
            }
            2 => {
                let dx = bytes.read_u8()?;
                let dy = bytes.read_u8()?;
                w.delta(dx, dy);
            }
            n => {
                let literal_bytes = match mode {
                    RleMode::Rle8 => {
                        for _ in 0..n {
                            let index = bytes.read_u8()?;
                            w.put(index);
                        }
                        usize::from(n)
                    }
                    RleMode::Rle4 => {
                        let mut packed = 0u8;
                        for i in 0..n {
                            if i & 1 == 0 {
                                packed = bytes.read_u8()?;
                                w.put(packed >> 4);
                            } else {
                                w.put(packed & 0x0f);
                            }
                        }
                        usize::from(n).div_ceil(2)
                    }
                };
                // Absolute runs are word aligned.
                if literal_bytes & 1 == 1 {
                    bytes.skip(1)?;
                }
            }
        }
    }

    log::trace!("RLE output exhausted at row {}", w.row);
    Ok(())
}
