use alloc::vec::Vec;

use enough::Stop;

#[cfg(feature = "rgb")]
use rgb::AsPixels as _;

use crate::bmp::header::{BmpHeader, ChannelMasks, Compression, PaletteEntry};
use crate::error::BitmapError;
use crate::limits::Limits;
use crate::pixel::PixelLayout;

/// Decode configuration for one BMP buffer.
///
/// ```no_run
/// use zenbmp::{DecodeRequest, Limits, Unstoppable};
///
/// let data: &[u8] = &[]; // your BMP bytes
/// let limits = Limits { max_pixels: Some(1 << 24), ..Default::default() };
/// let decoded = DecodeRequest::new(data)
///     .with_rgba_order(true)
///     .with_limits(&limits)
///     .decode(Unstoppable)?;
/// println!("{}x{} {:?}", decoded.width, decoded.height, decoded.layout);
/// # Ok::<(), zenbmp::BitmapError>(())
/// ```
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    rgba_order: bool,
    limits: Option<&'a Limits>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            rgba_order: false,
            limits: None,
        }
    }

    /// Write bitfield and 24-bit pixels as R,G,B,A instead of A,B,G,R.
    ///
    /// Palette-based images (1/4/8-bit, RLE) always decode to `[0, b, g, r]`.
    pub fn with_rgba_order(mut self, rgba_order: bool) -> Self {
        self.rgba_order = rgba_order;
        self
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn decode(self, stop: impl Stop) -> Result<DecodeOutput, BitmapError> {
        crate::bmp::decode(self.data, self.rgba_order, self.limits, &stop)
    }
}

/// Decoded image: `width * height * 4` bytes, top row first, plus the
/// parsed header.
#[derive(Clone, Debug)]
pub struct DecodeOutput {
    pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub layout: PixelLayout,
    pub header: BmpHeader,
}

impl DecodeOutput {
    pub(crate) fn new(pixels: Vec<u8>, header: BmpHeader, layout: PixelLayout) -> Self {
        Self {
            pixels,
            width: header.width,
            height: header.height,
            layout,
            header,
        }
    }

    /// Access the pixel data.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Take ownership of the pixel data.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    pub fn bits_per_pixel(&self) -> u16 {
        self.header.bits_per_pixel
    }

    pub fn compression(&self) -> Compression {
        self.header.compression
    }

    pub fn masks(&self) -> &ChannelMasks {
        &self.header.masks
    }

    /// Color table, empty for images without one.
    pub fn palette(&self) -> &[PaletteEntry] {
        &self.header.palette
    }

    /// The 4 bytes of the pixel at (`x`, `y`), `y` counted from the top.
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let start = (y as usize * self.width as usize + x as usize) * 4;
        self.pixels.get(start..start + 4)
    }

    /// Reinterpret pixel data as typed pixel slice.
    ///
    /// Returns [`crate::BitmapError::LayoutMismatch`] if the pixel layout doesn't match `P`.
    #[cfg(feature = "rgb")]
    pub fn as_pixels<P: crate::DecodePixel>(&self) -> Result<&[P], crate::BitmapError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        if !self.layout.is_memory_compatible(P::layout()) {
            return Err(crate::BitmapError::LayoutMismatch {
                expected: P::layout(),
                actual: self.layout,
            });
        }
        Ok(self.pixels().as_pixels())
    }

    /// Zero-copy view as an [`imgref::ImgRef`] of typed pixels.
    ///
    /// Returns [`crate::BitmapError::LayoutMismatch`] if the pixel layout doesn't match `P`.
    #[cfg(feature = "imgref")]
    pub fn as_imgref<P: crate::DecodePixel>(
        &self,
    ) -> Result<imgref::ImgRef<'_, P>, crate::BitmapError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        let pixels: &[P] = self.as_pixels()?;
        Ok(imgref::ImgRef::new(
            pixels,
            self.width as usize,
            self.height as usize,
        ))
    }

    /// Convert to an [`imgref::ImgVec`] of typed pixels.
    ///
    /// Returns [`crate::BitmapError::LayoutMismatch`] if the pixel layout doesn't match `P`.
    #[cfg(feature = "imgref")]
    pub fn to_imgvec<P: crate::DecodePixel>(&self) -> Result<imgref::ImgVec<P>, crate::BitmapError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        let pixels: &[P] = self.as_pixels()?;
        Ok(imgref::ImgVec::new(
            pixels.to_vec(),
            self.width as usize,
            self.height as usize,
        ))
    }
}
