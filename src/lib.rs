//! # zenanymap
//!
//! Netpbm family (PBM/PGM/PPM/PAM) decoder producing packed 32-bit RGBA
//! pixels.
//!
//! ## Supported Formats
//!
//! All seven magic numbers:
//! - **P1/P4** (PBM ASCII/binary) — 1-bit bitmap; a set bit decodes to
//!   opaque black, a clear bit to opaque white
//! - **P2/P5** (PGM ASCII/binary) — grayscale, any maxval up to 65535
//! - **P3/P6** (PPM ASCII/binary) — RGB, any maxval up to 65535
//! - **P7** (PAM) — 1-4 channels (gray, gray+alpha, RGB, RGBA), binary only
//!
//! Samples are rescaled from the declared maxval to 0-255, so every decode
//! yields one `u32` per pixel: `(r << 24) | (g << 16) | (b << 8) | a`, with
//! alpha 0xFF when the source has no alpha channel.
//!
//! ## Non-Goals
//!
//! - Encoding
//! - Color management or gamma handling
//! - Formats outside P1-P7 (no PFM)
//! - Streaming decode; the whole image is materialized in memory
//!
//! ## Usage
//!
//! ```no_run
//! use zenanymap::{DecodeRequest, ImageInfo};
//! use enough::Unstoppable;
//!
//! let data: &[u8] = &[]; // your PNM/PAM bytes
//!
//! // Probe without decoding
//! let info = ImageInfo::from_bytes(data).unwrap();
//! println!("{}x{} {:?}", info.width, info.height, info.format);
//!
//! // Decode
//! let decoded = DecodeRequest::new(data).decode(Unstoppable)?;
//! let pixels: &[u32] = decoded.pixels();
//! # Ok::<(), zenanymap::AnymapError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod decode;
mod error;
mod info;
mod limits;

pub mod pnm;

// Re-exports
pub use decode::{DecodeOutput, DecodeRequest};
pub use enough::{Stop, Unstoppable};
pub use error::AnymapError;
pub use info::ImageInfo;
pub use limits::Limits;
pub use pnm::PnmFormat;

/// Decode PNM/PAM bytes into packed RGBA pixels, without limits.
pub fn decode(data: &[u8], stop: impl Stop) -> Result<DecodeOutput, AnymapError> {
    DecodeRequest::new(data).decode(stop)
}

/// Read a file and decode it.
#[cfg(feature = "std")]
pub fn decode_file(
    path: impl AsRef<std::path::Path>,
    stop: impl Stop,
) -> Result<DecodeOutput, AnymapError> {
    let data = std::fs::read(path).map_err(AnymapError::Io)?;
    decode(&data, stop)
}
