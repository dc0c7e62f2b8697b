//! Bitfield channel extraction.
//!
//! A mask is a single contiguous run of set bits. Its lowest set bit is
//! isolated with two's-complement arithmetic, `(!mask + 1) & mask`, which
//! gives both the right-shift divisor and the number of representable
//! levels (`mask / low_bit + 1`, e.g. 32 for a 5-bit channel). The
//! extracted sample is then stretched linearly so that level 0 maps to 0
//! and the top level maps to 255. 8-bit channels pass through unchanged.
//!
//! Non-contiguous masks are not validated and give unspecified values.

use super::header::ChannelMasks;

/// Extractor for one channel of a packed sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct ChannelScale {
    mask: u32,
    low_bit: u32,
    /// Number of distinct sample values the mask can hold.
    levels: u64,
}

impl ChannelScale {
    /// `mask` must be nonzero.
    fn new(mask: u32) -> Self {
        let low_bit = mask & mask.wrapping_neg();
        Self {
            mask,
            low_bit,
            levels: u64::from(mask / low_bit) + 1,
        }
    }

    #[cfg(test)]
    fn levels(&self) -> u64 {
        self.levels
    }

    pub(crate) fn extract(&self, x: u32) -> u8 {
        let sample = u64::from((x & self.mask) / self.low_bit);
        let max = self.levels - 1;
        ((sample * 255 + max / 2) / max) as u8
    }
}

/// How a channel value is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Channel {
    Scaled(ChannelScale),
    Constant(u8),
}

impl Channel {
    fn from_mask(mask: u32, absent: u8) -> Self {
        if mask == 0 {
            Channel::Constant(absent)
        } else {
            Channel::Scaled(ChannelScale::new(mask))
        }
    }

    #[inline]
    pub(crate) fn extract(&self, x: u32) -> u8 {
        match self {
            Channel::Scaled(scale) => scale.extract(x),
            Channel::Constant(v) => *v,
        }
    }
}

/// Per-channel extractors derived once from the header masks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct MaskRescaler {
    pub red: Channel,
    pub green: Channel,
    pub blue: Channel,
    pub alpha: Channel,
}

impl MaskRescaler {
    pub(crate) fn new(masks: &ChannelMasks) -> Self {
        Self {
            red: Channel::from_mask(masks.red, 0),
            green: Channel::from_mask(masks.green, 0),
            blue: Channel::from_mask(masks.blue, 0),
            // No alpha mask: fully opaque.
            alpha: Channel::from_mask(masks.alpha, 255),
        }
    }
}
