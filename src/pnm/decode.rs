//! Header parsing and the seven per-format pixel decoders.
//!
//! Every decoder fills a `Vec<u32>` of packed RGBA values,
//! `(r << 24) | (g << 16) | (b << 8) | a`, scaling each source sample by
//! `sample * 255 / maxval` and defaulting alpha to 0xFF where the format
//! carries none.

use alloc::vec::Vec;

use enough::Stop;

use super::tokens::ByteCursor;
use super::{PnmFormat, PnmHeader};
use crate::error::AnymapError;

/// Bitmap polarity: a set bit is black, a clear bit is white.
const BIT_SET: u32 = 0x0000_00FF;
const BIT_CLEAR: u32 = 0xFFFF_FFFF;

const MAXVAL_LIMIT: u32 = u16::MAX as u32;

pub(crate) fn parse_header(cursor: &mut ByteCursor) -> Result<PnmHeader, AnymapError> {
    let format = read_magic(cursor)?;
    match format {
        PnmFormat::Pam => parse_pam_header(cursor),
        _ => parse_positional_header(cursor, format),
    }
}

/// The magic is exactly two bytes; whitespace skipping starts after it.
fn read_magic(cursor: &mut ByteCursor) -> Result<PnmFormat, AnymapError> {
    let p = cursor.next_byte().ok_or(AnymapError::InvalidMagic)?;
    let digit = cursor.next_byte().ok_or(AnymapError::InvalidMagic)?;
    PnmFormat::from_magic([p, digit])
}

/// Classic `width height [maxval]` header (P1-P6). PBM has no maxval field;
/// its samples are single bits, so maxval is fixed at 1.
fn parse_positional_header(
    cursor: &mut ByteCursor,
    format: PnmFormat,
) -> Result<PnmHeader, AnymapError> {
    let width = cursor.read_unsigned_int()?;
    if width < 1 {
        return Err(AnymapError::InvalidDimension { field: "width" });
    }

    let height = cursor.read_unsigned_int()?;
    if height < 1 {
        return Err(AnymapError::InvalidDimension { field: "height" });
    }

    let maxval = match format {
        PnmFormat::PbmAscii | PnmFormat::PbmRaw => 1,
        _ => {
            let maxval = cursor.read_unsigned_int()?;
            if !(1..=MAXVAL_LIMIT).contains(&maxval) {
                return Err(AnymapError::InvalidRange {
                    field: "maxval",
                    value: maxval,
                    min: 1,
                    max: MAXVAL_LIMIT,
                });
            }
            maxval
        }
    };

    let depth = match format {
        PnmFormat::PpmAscii | PnmFormat::PpmRaw => 3,
        _ => 1,
    };

    Ok(PnmHeader {
        format,
        width,
        height,
        maxval,
        depth,
    })
}

/// PAM keyword header: `WIDTH`, `HEIGHT`, `DEPTH`, `MAXVAL` in any order,
/// terminated by `ENDHDR`. Unknown keywords (TUPLTYPE lands here) are
/// skipped along with their value token. Absent fields stay 0 and fail
/// validation below.
fn parse_pam_header(cursor: &mut ByteCursor) -> Result<PnmHeader, AnymapError> {
    let mut width: u32 = 0;
    let mut height: u32 = 0;
    let mut depth: u32 = 0;
    let mut maxval: u32 = 0;

    loop {
        cursor.skip_to_token();
        if cursor.eof() {
            return Err(AnymapError::UnexpectedEof);
        }

        if cursor.match_literal("ENDHDR") {
            break;
        } else if cursor.match_literal("WIDTH") {
            width = cursor.read_unsigned_int()?;
        } else if cursor.match_literal("HEIGHT") {
            height = cursor.read_unsigned_int()?;
        } else if cursor.match_literal("DEPTH") {
            depth = cursor.read_unsigned_int()?;
        } else if cursor.match_literal("MAXVAL") {
            maxval = cursor.read_unsigned_int()?;
        } else {
            // Unknown keyword: discard it and its value token.
            cursor.skip_token();
            cursor.skip_to_token();
            cursor.skip_token();
        }
    }

    if !(1..=4).contains(&depth) {
        return Err(AnymapError::InvalidRange {
            field: "depth",
            value: depth,
            min: 1,
            max: 4,
        });
    }
    if !(1..=MAXVAL_LIMIT).contains(&maxval) {
        return Err(AnymapError::InvalidRange {
            field: "maxval",
            value: maxval,
            min: 1,
            max: MAXVAL_LIMIT,
        });
    }
    if width < 1 {
        return Err(AnymapError::InvalidDimension { field: "width" });
    }
    if height < 1 {
        return Err(AnymapError::InvalidDimension { field: "height" });
    }

    Ok(PnmHeader {
        format: PnmFormat::Pam,
        width,
        height,
        maxval,
        depth,
    })
}

pub(crate) fn decode_pixels(
    cursor: &mut ByteCursor,
    header: &PnmHeader,
    pixel_count: usize,
    stop: &dyn Stop,
) -> Result<Vec<u32>, AnymapError> {
    let mut pixels = Vec::with_capacity(pixel_count);

    match header.format {
        PnmFormat::PbmAscii => decode_bitmap_ascii(cursor, header, pixel_count, &mut pixels, stop)?,
        PnmFormat::PbmRaw => decode_bitmap_raw(cursor, header, pixel_count, &mut pixels, stop)?,
        PnmFormat::PgmAscii => decode_gray_ascii(cursor, header, pixel_count, &mut pixels, stop)?,
        PnmFormat::PpmAscii => decode_rgb_ascii(cursor, header, pixel_count, &mut pixels, stop)?,
        PnmFormat::PgmRaw => {
            decode_gray_raw(cursor, header, pixel_count, &mut pixels, false, stop)?;
        }
        PnmFormat::PpmRaw => {
            decode_rgb_raw(cursor, header, pixel_count, &mut pixels, false, stop)?;
        }
        PnmFormat::Pam => match header.depth {
            1 => decode_gray_raw(cursor, header, pixel_count, &mut pixels, false, stop)?,
            2 => decode_gray_raw(cursor, header, pixel_count, &mut pixels, true, stop)?,
            3 => decode_rgb_raw(cursor, header, pixel_count, &mut pixels, false, stop)?,
            4 => decode_rgb_raw(cursor, header, pixel_count, &mut pixels, true, stop)?,
            _ => unreachable!("depth validated to 1..=4"),
        },
    }

    Ok(pixels)
}

/// Read one binary sample: 1 byte, or 2 big-endian bytes when maxval needs
/// 16 bits. Returns the value scaled to 0-255.
fn read_raw_sample(cursor: &mut ByteCursor, maxval: u32) -> Result<u32, AnymapError> {
    let mut value = u32::from(cursor.read_u8_err()?);
    if maxval > 0xFF {
        value = (value << 8) | u32::from(cursor.read_u8_err()?);
    }
    if value > maxval {
        return Err(AnymapError::RangeExceeded { value, maxval });
    }
    Ok(value * 255 / maxval)
}

/// Read one ASCII decimal sample, scaled to 0-255.
fn read_ascii_sample(cursor: &mut ByteCursor, maxval: u32) -> Result<u32, AnymapError> {
    let value = cursor.read_unsigned_int()?;
    if value > maxval {
        return Err(AnymapError::RangeExceeded { value, maxval });
    }
    Ok(value * 255 / maxval)
}

/// P1: literal '0'/'1' characters. Comments are consumed; every other byte
/// between samples is skipped.
fn decode_bitmap_ascii(
    cursor: &mut ByteCursor,
    header: &PnmHeader,
    pixel_count: usize,
    pixels: &mut Vec<u32>,
    stop: &dyn Stop,
) -> Result<(), AnymapError> {
    let chunk = (header.width as usize).saturating_mul(16).max(1);

    while pixels.len() < pixel_count {
        if pixels.len() % chunk == 0 {
            stop.check()?;
        }
        match cursor.next_byte() {
            None => return Err(AnymapError::UnexpectedEof),
            Some(b'#') => cursor.skip_comment_line(),
            Some(b'0') => pixels.push(BIT_CLEAR),
            Some(b'1') => pixels.push(BIT_SET),
            Some(_) => {}
        }
    }

    Ok(())
}

/// P4: bits packed MSB-first, 8 pixels per byte, running continuously
/// across the whole image. Rows are NOT padded to byte boundaries; files
/// from tools that pad each row will decode skewed.
fn decode_bitmap_raw(
    cursor: &mut ByteCursor,
    header: &PnmHeader,
    pixel_count: usize,
    pixels: &mut Vec<u32>,
    stop: &dyn Stop,
) -> Result<(), AnymapError> {
    let chunk = (header.width as usize).saturating_mul(16).max(1);
    let mut byte = 0u8;

    for i in 0..pixel_count {
        if i % chunk == 0 {
            stop.check()?;
        }
        if i % 8 == 0 {
            byte = cursor.read_u8_err()?;
        }
        if (byte & (0x01 << (7 - (i % 8)))) != 0 {
            pixels.push(BIT_SET);
        } else {
            pixels.push(BIT_CLEAR);
        }
    }

    Ok(())
}

/// P2: one decimal token per pixel, replicated into R, G, B.
fn decode_gray_ascii(
    cursor: &mut ByteCursor,
    header: &PnmHeader,
    pixel_count: usize,
    pixels: &mut Vec<u32>,
    stop: &dyn Stop,
) -> Result<(), AnymapError> {
    let chunk = (header.width as usize).saturating_mul(16).max(1);

    for i in 0..pixel_count {
        if i % chunk == 0 {
            stop.check()?;
        }
        let gray = read_ascii_sample(cursor, header.maxval)?;
        pixels.push((gray << 24) | (gray << 16) | (gray << 8) | 0xFF);
    }

    Ok(())
}

/// P3: three decimal tokens per pixel.
fn decode_rgb_ascii(
    cursor: &mut ByteCursor,
    header: &PnmHeader,
    pixel_count: usize,
    pixels: &mut Vec<u32>,
    stop: &dyn Stop,
) -> Result<(), AnymapError> {
    let chunk = (header.width as usize).saturating_mul(16).max(1);

    for i in 0..pixel_count {
        if i % chunk == 0 {
            stop.check()?;
        }
        let r = read_ascii_sample(cursor, header.maxval)?;
        let g = read_ascii_sample(cursor, header.maxval)?;
        let b = read_ascii_sample(cursor, header.maxval)?;
        pixels.push((r << 24) | (g << 16) | (b << 8) | 0xFF);
    }

    Ok(())
}

/// P5, and PAM depth 1-2: binary grayscale, optionally with an alpha sample
/// after each gray sample.
fn decode_gray_raw(
    cursor: &mut ByteCursor,
    header: &PnmHeader,
    pixel_count: usize,
    pixels: &mut Vec<u32>,
    with_alpha: bool,
    stop: &dyn Stop,
) -> Result<(), AnymapError> {
    let chunk = (header.width as usize).saturating_mul(16).max(1);

    for i in 0..pixel_count {
        if i % chunk == 0 {
            stop.check()?;
        }
        let gray = read_raw_sample(cursor, header.maxval)?;
        let alpha = if with_alpha {
            read_raw_sample(cursor, header.maxval)?
        } else {
            0xFF
        };
        pixels.push((gray << 24) | (gray << 16) | (gray << 8) | alpha);
    }

    Ok(())
}

/// P6, and PAM depth 3-4: binary RGB, optionally with an alpha sample after
/// each RGB triple.
fn decode_rgb_raw(
    cursor: &mut ByteCursor,
    header: &PnmHeader,
    pixel_count: usize,
    pixels: &mut Vec<u32>,
    with_alpha: bool,
    stop: &dyn Stop,
) -> Result<(), AnymapError> {
    let chunk = (header.width as usize).saturating_mul(16).max(1);

    for i in 0..pixel_count {
        if i % chunk == 0 {
            stop.check()?;
        }
        let r = read_raw_sample(cursor, header.maxval)?;
        let g = read_raw_sample(cursor, header.maxval)?;
        let b = read_raw_sample(cursor, header.maxval)?;
        let alpha = if with_alpha {
            read_raw_sample(cursor, header.maxval)?
        } else {
            0xFF
        };
        pixels.push((r << 24) | (g << 16) | (b << 8) | alpha);
    }

    Ok(())
}
