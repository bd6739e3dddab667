//! PNM family: P1/P4 (PBM), P2/P5 (PGM), P3/P6 (PPM), P7 (PAM).
//!
//! All seven variants decode to packed 32-bit RGBA. Classic variants carry a
//! positional `width height [maxval]` header; PAM carries a keyword header
//! terminated by `ENDHDR`.

mod decode;
mod tokens;

use enough::Stop;

use crate::decode::DecodeOutput;
use crate::error::AnymapError;
use crate::info::ImageInfo;
use crate::limits::Limits;
use tokens::ByteCursor;

/// Which PNM sub-format a file uses, from the second magic byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PnmFormat {
    /// P1 — ASCII bitmap (PBM).
    PbmAscii,
    /// P2 — ASCII graymap (PGM).
    PgmAscii,
    /// P3 — ASCII pixmap (PPM).
    PpmAscii,
    /// P4 — binary bitmap (PBM).
    PbmRaw,
    /// P5 — binary graymap (PGM).
    PgmRaw,
    /// P6 — binary pixmap (PPM).
    PpmRaw,
    /// P7 — PAM (keyword header, 1-4 channels).
    Pam,
}

impl PnmFormat {
    /// Identify the format from the two magic bytes.
    pub fn from_magic(magic: [u8; 2]) -> Result<Self, AnymapError> {
        if magic[0] != b'P' {
            return Err(AnymapError::InvalidMagic);
        }
        Ok(match magic[1] {
            b'1' => Self::PbmAscii,
            b'2' => Self::PgmAscii,
            b'3' => Self::PpmAscii,
            b'4' => Self::PbmRaw,
            b'5' => Self::PgmRaw,
            b'6' => Self::PpmRaw,
            b'7' => Self::Pam,
            _ => return Err(AnymapError::InvalidMagic),
        })
    }
}

/// Parsed PNM header (internal).
///
/// `depth` is the source channel count: the PAM DEPTH field, or the implied
/// count for classic variants. Immutable once parsed.
pub(crate) struct PnmHeader {
    pub format: PnmFormat,
    pub width: u32,
    pub height: u32,
    pub maxval: u32,
    pub depth: u32,
}

impl PnmHeader {
    fn pixel_count(&self) -> Result<usize, AnymapError> {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .ok_or(AnymapError::DimensionsTooLarge {
                width: self.width,
                height: self.height,
            })
    }
}

/// Probe header for ImageInfo without decoding.
pub(crate) fn probe_header(data: &[u8]) -> Result<ImageInfo, AnymapError> {
    let mut cursor = ByteCursor::new(data);
    let header = decode::parse_header(&mut cursor)?;
    Ok(ImageInfo {
        width: header.width,
        height: header.height,
        format: header.format,
        channels: header.depth as u8,
    })
}

/// Decode PNM data (called from DecodeRequest).
pub(crate) fn decode(
    data: &[u8],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<DecodeOutput, AnymapError> {
    let mut cursor = ByteCursor::new(data);
    let header = decode::parse_header(&mut cursor)?;

    if let Some(limits) = limits {
        limits.check(header.width, header.height)?;
    }

    let pixel_count = header.pixel_count()?;
    let out_bytes = pixel_count
        .checked_mul(4)
        .ok_or(AnymapError::DimensionsTooLarge {
            width: header.width,
            height: header.height,
        })?;
    if let Some(limits) = limits {
        limits.check_memory(out_bytes)?;
    }

    stop.check()?;

    let pixels = decode::decode_pixels(&mut cursor, &header, pixel_count, stop)?;
    Ok(DecodeOutput::new(
        pixels,
        header.width,
        header.height,
        header.format,
    ))
}
