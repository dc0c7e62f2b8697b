use alloc::string::String;
use enough::StopReason;

/// Errors from BMP decoding.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BitmapError {
    #[error("invalid BMP signature (expected \"BM\")")]
    InvalidSignature,

    #[error("unsupported BMP header revision: {0}-byte info header")]
    UnsupportedHeaderRevision(u32),

    #[error("unsupported BMP bit depth: {0}")]
    UnsupportedBitDepth(u16),

    #[error("unsupported BMP compression scheme: {0}")]
    UnsupportedCompression(u32),

    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("pixel layout mismatch: expected {expected:?}, got {actual:?}")]
    LayoutMismatch {
        expected: crate::PixelLayout,
        actual: crate::PixelLayout,
    },

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for BitmapError {
    fn from(r: StopReason) -> Self {
        BitmapError::Cancelled(r)
    }
}
