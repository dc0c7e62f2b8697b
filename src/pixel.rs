/// Meaning of the four bytes written for each output pixel.
///
/// Every layout is 4 bytes per pixel. The `X` layouts carry a padding byte
/// that is never written as alpha (palette and 24-bit sources have none).
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelLayout {
    /// Alpha, blue, green, red. Default order for bitfield (16/32-bit) sources.
    Abgr8,
    /// Red, green, blue, alpha. Bitfield sources decoded with `rgba_order`.
    Rgba8,
    /// Zero, blue, green, red. Palette sources, and 24-bit sources in default order.
    Xbgr8,
    /// Red, green, blue, zero. 24-bit sources decoded with `rgba_order`.
    Rgbx8,
}

impl PixelLayout {
    /// Bytes per pixel for this layout.
    pub fn bytes_per_pixel(&self) -> usize {
        4
    }

    /// Whether the fourth channel carries decoded alpha.
    pub fn has_alpha(&self) -> bool {
        matches!(self, Self::Abgr8 | Self::Rgba8)
    }

    /// Whether this layout has the same memory representation as `other`.
    ///
    /// For example, `Rgba8` and `Rgbx8` are compatible (same R,G,B,A/X order).
    pub fn is_memory_compatible(&self, other: PixelLayout) -> bool {
        if *self == other {
            return true;
        }
        matches!(
            (*self, other),
            (Self::Rgba8, Self::Rgbx8)
                | (Self::Rgbx8, Self::Rgba8)
                | (Self::Abgr8, Self::Xbgr8)
                | (Self::Xbgr8, Self::Abgr8)
        )
    }
}

/// Byte offsets of each channel inside one output pixel, for the
/// bitfield and 24-bit paths. Palette paths use a fixed order instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct ChannelOffsets {
    pub red: usize,
    pub green: usize,
    pub blue: usize,
    pub alpha: usize,
}

impl ChannelOffsets {
    pub(crate) const ABGR: Self = Self {
        red: 3,
        green: 2,
        blue: 1,
        alpha: 0,
    };

    pub(crate) const RGBA: Self = Self {
        red: 0,
        green: 1,
        blue: 2,
        alpha: 3,
    };

    pub(crate) fn new(rgba_order: bool) -> Self {
        if rgba_order { Self::RGBA } else { Self::ABGR }
    }
}

/// Pixel types that a decoded buffer can be viewed as.
#[cfg(feature = "rgb")]
pub trait DecodePixel: Copy + 'static {
    fn layout() -> PixelLayout;
}

#[cfg(feature = "rgb")]
impl DecodePixel for rgb::RGBA8 {
    fn layout() -> PixelLayout {
        PixelLayout::Rgba8
    }
}
