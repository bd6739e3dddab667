//! Byte cursor and header tokenizer.
//!
//! PNM headers are whitespace-delimited ASCII tokens with `#` line comments
//! allowed anywhere whitespace is; the pixel payload that follows is raw
//! bytes read through the same cursor.

use crate::error::AnymapError;

pub(crate) struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub(crate) fn eof(&self) -> bool {
        self.pos >= self.data.len()
    }

    fn peek(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    /// Consume and return the next byte, or None at end of input.
    pub(crate) fn next_byte(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        Some(b)
    }

    /// Consume the remainder of a `#` comment line, including the newline.
    pub(crate) fn skip_comment_line(&mut self) {
        while let Some(b) = self.next_byte() {
            if b == b'\n' {
                break;
            }
        }
    }

    /// Advance past whitespace and `#` comment lines, stopping at the first
    /// byte of the next token (or at end of input).
    pub(crate) fn skip_to_token(&mut self) {
        while let Some(b) = self.peek() {
            if b == b'#' {
                self.pos += 1;
                self.skip_comment_line();
            } else if b.is_ascii_whitespace() {
                self.pos += 1;
            } else {
                return;
            }
        }
    }

    /// Consume one byte and report whether it ends a token: whitespace, end
    /// of input, or a `#` comment (the whole comment line is consumed too).
    pub(crate) fn is_token_terminator(&mut self) -> bool {
        match self.next_byte() {
            None => true,
            Some(b'#') => {
                self.skip_comment_line();
                true
            }
            Some(b) => b.is_ascii_whitespace(),
        }
    }

    /// Consume bytes until a token terminator.
    pub(crate) fn skip_token(&mut self) {
        while !self.is_token_terminator() {}
    }

    /// Try to consume exactly `word` followed by a terminator. On any
    /// mismatch the cursor is restored to where it started, so a failed
    /// match consumes nothing.
    pub(crate) fn match_literal(&mut self, word: &str) -> bool {
        let bookmark = self.pos;
        for &expected in word.as_bytes() {
            if self.next_byte() != Some(expected) {
                self.pos = bookmark;
                return false;
            }
        }
        if self.is_token_terminator() {
            true
        } else {
            self.pos = bookmark;
            false
        }
    }

    /// Skip to the next token and read an unsigned decimal integer.
    ///
    /// The terminating byte is consumed; a trailing comment counts as the
    /// terminator and is consumed whole.
    pub(crate) fn read_unsigned_int(&mut self) -> Result<u32, AnymapError> {
        self.skip_to_token();

        if self.eof() {
            return Err(AnymapError::UnexpectedEof);
        }

        let mut value: u32 = 0;
        while let Some(b) = self.next_byte() {
            if b.is_ascii_digit() {
                value = value
                    .checked_mul(10)
                    .and_then(|v| v.checked_add(u32::from(b - b'0')))
                    .ok_or(AnymapError::IntegerOverflow)?;
            } else if b == b'#' {
                self.skip_comment_line();
                break;
            } else if b.is_ascii_whitespace() {
                break;
            } else {
                return Err(AnymapError::MalformedInteger(b));
            }
        }
        Ok(value)
    }

    /// Read one raw payload byte.
    pub(crate) fn read_u8_err(&mut self) -> Result<u8, AnymapError> {
        self.next_byte().ok_or(AnymapError::UnexpectedEof)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skip_to_token_crosses_comments_and_whitespace() {
        let mut c = ByteCursor::new(b"  # first comment\n\t# second\n  42");
        c.skip_to_token();
        assert_eq!(c.next_byte(), Some(b'4'));
    }

    #[test]
    fn match_literal_consumes_on_match() {
        let mut c = ByteCursor::new(b"WIDTH 3");
        assert!(c.match_literal("WIDTH"));
        // the terminating space is consumed by the match
        assert_eq!(c.next_byte(), Some(b'3'));
    }

    #[test]
    fn match_literal_restores_position_on_mismatch() {
        let mut c = ByteCursor::new(b"WIDTHX 3");
        // "WIDTH" matches byte-for-byte but 'X' is not a terminator
        assert!(!c.match_literal("WIDTH"));
        assert!(c.match_literal("WIDTHX"));
    }

    #[test]
    fn comment_acts_as_token_terminator() {
        let mut c = ByteCursor::new(b"ENDHDR# trailing\nP");
        assert!(c.match_literal("ENDHDR"));
        // comment line was consumed as the terminator
        assert_eq!(c.next_byte(), Some(b'P'));
    }

    #[test]
    fn read_unsigned_int_consumes_trailing_comment() {
        let mut c = ByteCursor::new(b" 17# note\nrest");
        assert_eq!(c.read_unsigned_int().unwrap(), 17);
        assert_eq!(c.next_byte(), Some(b'r'));
    }

    #[test]
    fn read_unsigned_int_rejects_non_digit() {
        let mut c = ByteCursor::new(b"12a4");
        assert!(matches!(
            c.read_unsigned_int(),
            Err(AnymapError::MalformedInteger(b'a'))
        ));
    }

    #[test]
    fn read_unsigned_int_rejects_overflow() {
        let mut c = ByteCursor::new(b"99999999999");
        assert!(matches!(
            c.read_unsigned_int(),
            Err(AnymapError::IntegerOverflow)
        ));
    }

    #[test]
    fn read_unsigned_int_at_eof() {
        let mut c = ByteCursor::new(b"   ");
        assert!(matches!(
            c.read_unsigned_int(),
            Err(AnymapError::UnexpectedEof)
        ));
    }

    #[test]
    fn eof_terminates_integer() {
        let mut c = ByteCursor::new(b"123");
        assert_eq!(c.read_unsigned_int().unwrap(), 123);
        assert!(c.eof());
    }
}
