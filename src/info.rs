use crate::error::AnymapError;
use crate::pnm::PnmFormat;

/// Image metadata probed from the header, without decoding pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub format: PnmFormat,
    /// Source channel count (1-4). PAM reports its DEPTH field; classic
    /// variants report their implied count (1 for PBM/PGM, 3 for PPM).
    pub channels: u8,
}

impl ImageInfo {
    /// Parse and validate the header of `data`.
    pub fn from_bytes(data: &[u8]) -> Result<Self, AnymapError> {
        crate::pnm::probe_header(data)
    }
}
