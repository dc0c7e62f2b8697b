//! # zenbmp
//!
//! Windows BMP decoder producing 4 bytes per pixel, top row first.
//!
//! ## Supported Input
//!
//! - `BITMAPINFOHEADER` and the V2, V3, V4 and V5 revisions (40, 52, 56,
//!   108 and 124-byte info headers)
//! - 1, 4 and 8-bit palette images, RLE4 and RLE8 compressed palette images
//! - 16 and 32-bit images with default or explicit bitfield masks of any
//!   contiguous width, rescaled to 8 bits per channel
//! - 24-bit BGR images
//! - bottom-up and top-down row order
//!
//! ## Output Channel Order
//!
//! Palette images always decode to `[0, blue, green, red]` per pixel.
//! Bitfield images decode to `[alpha, blue, green, red]`, or to
//! `[red, green, blue, alpha]` with [`DecodeRequest::with_rgba_order`].
//! 24-bit images fill the color channels in the same positions and leave
//! the fourth byte at zero. [`DecodeOutput::layout`] says which applies.
//!
//! ## Non-Goals
//!
//! - Encoding
//! - OS/2 headers and embedded JPEG/PNG streams
//! - Color management (ICC profiles, gamma)
//!
//! ## Usage
//!
//! ```no_run
//! use zenbmp::{DecodeRequest, PixelLayout, Unstoppable};
//!
//! let data: &[u8] = &[]; // your BMP bytes
//!
//! // Probe without decoding
//! let header = zenbmp::read_header(data)?;
//! println!("{}x{} {}bpp", header.width, header.height, header.bits_per_pixel);
//!
//! let decoded = DecodeRequest::new(data)
//!     .with_rgba_order(true)
//!     .decode(Unstoppable)?;
//! if decoded.layout == PixelLayout::Rgba8 {
//!     let _rgba: &[u8] = decoded.pixels();
//! }
//! # Ok::<(), zenbmp::BitmapError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod bmp;
mod decode;
mod error;
mod limits;
mod pixel;

// Re-exports
pub use bmp::header::{
    BmpHeader, ChannelMasks, Compression, HeaderRevision, Orientation, PaletteEntry,
};
pub use decode::{DecodeOutput, DecodeRequest};
pub use enough::{Stop, StopReason, Unstoppable};
pub use error::BitmapError;
pub use limits::Limits;
#[cfg(feature = "rgb")]
pub use pixel::DecodePixel;
pub use pixel::PixelLayout;

/// Decode a BMP file with the default channel order.
pub fn decode_bmp(data: &[u8], stop: impl Stop) -> Result<DecodeOutput, BitmapError> {
    DecodeRequest::new(data).decode(stop)
}

/// Decode a BMP file, writing bitfield and 24-bit pixels as R,G,B,A.
pub fn decode_bmp_rgba(data: &[u8], stop: impl Stop) -> Result<DecodeOutput, BitmapError> {
    DecodeRequest::new(data).with_rgba_order(true).decode(stop)
}

/// Parse the headers, masks and color table without decoding pixels.
pub fn read_header(data: &[u8]) -> Result<BmpHeader, BitmapError> {
    bmp::probe(data)
}
