use alloc::vec::Vec;

use enough::Stop;

use crate::error::AnymapError;
use crate::limits::Limits;
use crate::pnm::PnmFormat;

/// Decode request builder.
///
/// ```no_run
/// use zenanymap::{DecodeRequest, Limits};
/// use enough::Unstoppable;
///
/// let data: &[u8] = &[]; // your PNM/PAM bytes
/// let limits = Limits { max_pixels: Some(1 << 24), ..Default::default() };
/// let decoded = DecodeRequest::new(data)
///     .with_limits(&limits)
///     .decode(Unstoppable)?;
/// # Ok::<(), zenanymap::AnymapError>(())
/// ```
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, limits: None }
    }

    /// Apply resource limits to this decode.
    pub fn with_limits(self, limits: &'a Limits) -> Self {
        Self {
            limits: Some(limits),
            ..self
        }
    }

    /// Decode the input, producing packed RGBA pixels.
    pub fn decode(self, stop: impl Stop) -> Result<DecodeOutput, AnymapError> {
        crate::pnm::decode(self.data, self.limits, &stop)
    }
}

/// Decoded image: `width * height` packed 32-bit RGBA values.
///
/// Each pixel is `(r << 24) | (g << 16) | (b << 8) | a`, alpha `0xFF`
/// (opaque) for formats without an alpha channel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodeOutput {
    pixels: Vec<u32>,
    pub width: u32,
    pub height: u32,
    pub format: PnmFormat,
}

impl DecodeOutput {
    pub(crate) fn new(pixels: Vec<u32>, width: u32, height: u32, format: PnmFormat) -> Self {
        Self {
            pixels,
            width,
            height,
            format,
        }
    }

    /// Access the packed pixel data.
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Take ownership of the packed pixel data.
    pub fn into_pixels(self) -> Vec<u32> {
        self.pixels
    }

    /// Copy out as interleaved bytes in R, G, B, A order.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * 4);
        for px in &self.pixels {
            out.extend_from_slice(&px.to_be_bytes());
        }
        out
    }

    /// Copy out as typed [`rgb::RGBA8`] pixels.
    #[cfg(feature = "rgb")]
    pub fn to_rgba_pixels(&self) -> Vec<rgb::RGBA8> {
        self.pixels
            .iter()
            .map(|px| {
                let [r, g, b, a] = px.to_be_bytes();
                rgb::RGBA8 { r, g, b, a }
            })
            .collect()
    }

    /// Convert to an [`imgref::ImgVec`] of typed pixels.
    #[cfg(feature = "imgref")]
    pub fn to_imgvec(&self) -> imgref::ImgVec<rgb::RGBA8> {
        imgref::ImgVec::new(
            self.to_rgba_pixels(),
            self.width as usize,
            self.height as usize,
        )
    }
}
