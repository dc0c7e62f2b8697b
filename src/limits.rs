use alloc::format;

use crate::bmp::header::BmpHeader;
use crate::error::BitmapError;

/// Resource limits for a decode.
///
/// All fields default to `None` (no limit). Limits are checked after the
/// header is parsed and before the pixel buffer is allocated.
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum size in bytes of the output pixel buffer.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Reject a header whose dimensions or `output_len`-byte buffer exceed
    /// any configured cap.
    pub(crate) fn check(&self, header: &BmpHeader, output_len: usize) -> Result<(), BitmapError> {
        let width = u64::from(header.width);
        let height = u64::from(header.height);
        let caps = [
            ("width", width, self.max_width),
            ("height", height, self.max_height),
            ("pixel count", width * height, self.max_pixels),
            ("output size", output_len as u64, self.max_memory_bytes),
        ];
        for (what, value, cap) in caps {
            match cap {
                Some(max) if value > max => {
                    return Err(BitmapError::LimitExceeded(format!(
                        "{what} {value} exceeds limit {max}"
                    )));
                }
                _ => {}
            }
        }
        Ok(())
    }
}
