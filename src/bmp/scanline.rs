//! Row iteration for uncompressed pixel data.

use enough::Stop;

use super::cursor::ByteCursor;
use super::header::Orientation;
use crate::error::BitmapError;

/// What the pixel callback wants done with the rest of the row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RowControl {
    Continue,
    /// Skip the remaining columns; the row's padding is still consumed.
    StopRow,
}

/// Row shape of an uncompressed image.
#[derive(Clone, Copy, Debug)]
pub(crate) struct RowGeometry {
    pub width: usize,
    pub height: usize,
    pub bits_per_pixel: usize,
    pub orientation: Orientation,
}

impl RowGeometry {
    /// Bytes of pixel data in one stored row, before padding.
    pub(crate) fn unpadded_row_bytes(&self) -> usize {
        (self.width * self.bits_per_pixel).div_ceil(8)
    }

    /// Bytes appended to each stored row to reach a 4-byte boundary.
    pub(crate) fn row_padding(&self) -> usize {
        let row = self.unpadded_row_bytes();
        row.next_multiple_of(4) - row
    }

    /// Output row for the stored row at physical index `y`.
    pub(crate) fn dest_row(&self, y: usize) -> usize {
        match self.orientation {
            Orientation::BottomUp => y,
            Orientation::TopDown => self.height - 1 - y,
        }
    }
}

/// Walk every stored row, calling `pixel(cursor, column, dest_row)` for
/// `columns` columns per row, then skipping the row padding.
///
/// Stored rows are visited in file order; `dest_row` is always the
/// top-down output row.
pub(crate) fn scan_rows<F>(
    bytes: &mut ByteCursor<'_>,
    geometry: &RowGeometry,
    columns: usize,
    stop: &dyn Stop,
    mut pixel: F,
) -> Result<(), BitmapError>
where
    F: FnMut(&mut ByteCursor<'_>, usize, usize) -> Result<RowControl, BitmapError>,
{
    let padding = geometry.row_padding();

    for (row_idx, y) in (0..geometry.height).rev().enumerate() {
        if row_idx % 16 == 0 {
            stop.check()?;
        }
        let line = geometry.dest_row(y);
        for x in 0..columns {
            if pixel(bytes, x, line)? == RowControl::StopRow {
                break;
            }
        }
        bytes.skip(padding)?;
    }
    Ok(())
}
