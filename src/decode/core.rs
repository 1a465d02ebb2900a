use thiserror::Error;

use crate::common::{DECODE_TABLE, PAD, is_whitespace};

/// Decode failure. After an error the decoder's buffered state is
/// unspecified; call [`Decoder::reset`] before reusing the instance.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// A byte outside the Base64 alphabet, `=`, and ASCII whitespace.
    #[error("invalid byte {byte:#04x} in input")]
    InvalidCharacter { byte: u8 },

    /// `=` in a non-final position of a 4-character quantum, or a
    /// non-padding character following `=` within the same quantum.
    #[error("padding in non-final position")]
    InvalidPadding,

    /// The stream ended with an incomplete quantum that was not closed by
    /// padding.
    #[error("truncated input: {pending} trailing characters do not form a complete group")]
    TruncatedInput { pending: usize },
}

/// Incremental Base64 decoder.
///
/// Accepts encoded text split at arbitrary chunk boundaries — including
/// mid-quantum — via [`update`](Decoder::update). Newlines and other ASCII
/// whitespace are skipped; alphabet and `=` characters accumulate in a carry
/// buffer and are decoded 4 at a time. [`finish`](Decoder::finish) verifies
/// that no partial quantum is left pending, and [`reset`](Decoder::reset)
/// discards all buffered state to start a fresh stream.
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    /// Encoded characters (including `=`) not yet forming a full quantum;
    /// at most 3 survive between calls.
    carry: [u8; 4],
    carry_len: usize,
}

impl Decoder {
    pub fn new() -> Self {
        Decoder {
            carry: [0; 4],
            carry_len: 0,
        }
    }

    /// Decode the next chunk, returning all bytes that can be produced now.
    ///
    /// Up to 3 trailing characters of an incomplete quantum are buffered
    /// until the next call.
    pub fn update(&mut self, input: &[u8]) -> Result<Vec<u8>, DecodeError> {
        let mut out = Vec::with_capacity((self.carry_len + input.len()) / 4 * 3 + 3);

        // Newlines dominate the whitespace in wrapped input: carve the chunk
        // into newline-free segments with SIMD memchr, then scan each one.
        let mut last = 0;
        for pos in memchr::memchr_iter(b'\n', input) {
            self.scan(&input[last..pos], &mut out)?;
            last = pos + 1;
        }
        self.scan(&input[last..], &mut out)?;
        Ok(out)
    }

    /// End-of-stream check: an incomplete buffered quantum means the input
    /// was cut short.
    pub fn finish(&self) -> Result<(), DecodeError> {
        if self.carry_len != 0 {
            return Err(DecodeError::TruncatedInput {
                pending: self.carry_len,
            });
        }
        Ok(())
    }

    /// Discard all buffered state, returning the decoder to its initial
    /// condition. Safe to call mid-quantum and after an error.
    pub fn reset(&mut self) {
        self.carry_len = 0;
    }

    /// Scan a newline-free segment, buffering characters and decoding each
    /// completed quantum.
    fn scan(&mut self, segment: &[u8], out: &mut Vec<u8>) -> Result<(), DecodeError> {
        for &byte in segment {
            if is_whitespace(byte) {
                continue;
            }
            if byte != PAD && DECODE_TABLE[byte as usize] < 0 {
                return Err(DecodeError::InvalidCharacter { byte });
            }
            self.carry[self.carry_len] = byte;
            self.carry_len += 1;
            if self.carry_len == 4 {
                self.flush_quantum(out)?;
            }
        }
        Ok(())
    }

    /// Decode the 4 buffered characters into 1–3 bytes, validating the
    /// padding arrangement: `=` may only occupy the last one or two
    /// positions.
    fn flush_quantum(&mut self, out: &mut Vec<u8>) -> Result<(), DecodeError> {
        let q = self.carry;
        self.carry_len = 0;

        let pads = if q[3] == PAD {
            if q[2] == PAD { 2 } else { 1 }
        } else {
            0
        };
        if q[..4 - pads].contains(&PAD) {
            return Err(DecodeError::InvalidPadding);
        }

        // Positions 0..4-pads hold alphabet characters, validated on entry.
        let v0 = DECODE_TABLE[q[0] as usize] as u8;
        let v1 = DECODE_TABLE[q[1] as usize] as u8;
        out.push(v0 << 2 | v1 >> 4);
        if pads < 2 {
            let v2 = DECODE_TABLE[q[2] as usize] as u8;
            out.push(v1 << 4 | v2 >> 2);
            if pads == 0 {
                let v3 = DECODE_TABLE[q[3] as usize] as u8;
                out.push(v2 << 6 | v3);
            }
        }
        Ok(())
    }
}

/// One-shot decode: equivalent to a fresh [`Decoder`] fed the whole input
/// in a single [`update`](Decoder::update) followed by
/// [`finish`](Decoder::finish).
pub fn decode_all(input: &[u8]) -> Result<Vec<u8>, DecodeError> {
    let mut decoder = Decoder::new();
    let out = decoder.update(input)?;
    decoder.finish()?;
    Ok(out)
}
