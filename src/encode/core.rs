use crate::common::{ALPHABET, MIME_LINE_WIDTH, PAD};

/// Incremental Base64 encoder.
///
/// Accepts arbitrary-length byte chunks via [`update`](Encoder::update),
/// holding back the 0–2 trailing bytes that do not yet form a complete
/// 3-byte group. Output is produced in 4-character quanta and wrapped with a
/// newline every `line_width` characters. [`finish`](Encoder::finish) flushes
/// the held bytes with `=` padding and consumes the encoder.
///
/// A line never ends in a dangling newline: the newline is emitted lazily,
/// just before the first character of the following line.
#[derive(Debug, Clone)]
pub struct Encoder {
    /// Bytes held over from the previous chunk; only the first 2 slots
    /// survive between calls, the third is filled transiently to complete
    /// a group.
    carry: [u8; 3],
    carry_len: usize,
    /// Characters emitted on the current output line.
    col: usize,
    /// Wrap width in characters; 0 disables wrapping.
    line_width: usize,
}

impl Encoder {
    /// Create an encoder that wraps output every 72 characters (MIME).
    pub fn new() -> Self {
        Self::with_line_width(MIME_LINE_WIDTH)
    }

    /// Create an encoder with a custom wrap width. Use 0 to disable line
    /// wrapping. Widths that are not a multiple of 4 wrap mid-quantum.
    pub fn with_line_width(line_width: usize) -> Self {
        Encoder {
            carry: [0; 3],
            carry_len: 0,
            col: 0,
            line_width,
        }
    }

    /// Encode the next chunk, returning all output that can be emitted now.
    ///
    /// Complete 3-byte groups become 4 output characters each; 0–2 leftover
    /// bytes are buffered until the next call or [`finish`](Encoder::finish).
    /// An empty chunk produces empty output and leaves the state untouched.
    pub fn update(&mut self, input: &[u8]) -> String {
        if input.is_empty() {
            return String::new();
        }

        let mut out = String::with_capacity(encoded_len(self.carry_len + input.len()));
        let mut rest = input;

        // Top up a partial group left over from the previous chunk.
        if self.carry_len > 0 {
            let take = (3 - self.carry_len).min(rest.len());
            self.carry[self.carry_len..self.carry_len + take].copy_from_slice(&rest[..take]);
            self.carry_len += take;
            rest = &rest[take..];
            if self.carry_len < 3 {
                return out;
            }
            let group = self.carry;
            self.carry_len = 0;
            self.push_group(&group, &mut out);
        }

        let mut groups = rest.chunks_exact(3);
        for group in &mut groups {
            self.push_group(group, &mut out);
        }

        let tail = groups.remainder();
        self.carry[..tail.len()].copy_from_slice(tail);
        self.carry_len = tail.len();
        out
    }

    /// Flush the stream, padding the final group with `=` as needed.
    ///
    /// Consumes the encoder: a finished stream cannot be extended.
    pub fn finish(mut self) -> String {
        let mut out = String::with_capacity(6);
        match self.carry_len {
            1 => {
                let b0 = self.carry[0];
                self.push_code(ALPHABET[(b0 >> 2) as usize], &mut out);
                self.push_code(ALPHABET[((b0 & 0x03) << 4) as usize], &mut out);
                self.push_code(PAD, &mut out);
                self.push_code(PAD, &mut out);
            }
            2 => {
                let (b0, b1) = (self.carry[0], self.carry[1]);
                self.push_code(ALPHABET[(b0 >> 2) as usize], &mut out);
                self.push_code(ALPHABET[((b0 & 0x03) << 4 | b1 >> 4) as usize], &mut out);
                self.push_code(ALPHABET[((b1 & 0x0f) << 2) as usize], &mut out);
                self.push_code(PAD, &mut out);
            }
            _ => {}
        }
        out
    }

    /// Emit the 4 characters for a complete 3-byte group, 6 bits per
    /// character, most-significant bits first.
    fn push_group(&mut self, group: &[u8], out: &mut String) {
        let (b0, b1, b2) = (group[0], group[1], group[2]);
        self.push_code(ALPHABET[(b0 >> 2) as usize], out);
        self.push_code(ALPHABET[((b0 & 0x03) << 4 | b1 >> 4) as usize], out);
        self.push_code(ALPHABET[((b1 & 0x0f) << 2 | b2 >> 6) as usize], out);
        self.push_code(ALPHABET[(b2 & 0x3f) as usize], out);
    }

    /// Emit one output character, breaking the line first if it is full.
    #[inline]
    fn push_code(&mut self, code: u8, out: &mut String) {
        if self.line_width != 0 && self.col == self.line_width {
            out.push('\n');
            self.col = 0;
        }
        out.push(code as char);
        self.col += 1;
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Maximum encoded length for an input of `input_len` bytes, including `=`
/// padding and MIME line wrapping.
///
/// This is a conservative upper bound, not the exact output length: the
/// newline term reserves two slots per full 72-character line while the
/// encoder emits at most one, and never a trailing one. Suitable for
/// pre-sizing output buffers.
pub fn encoded_len(input_len: usize) -> usize {
    let padded = input_len.div_ceil(3) * 4;
    padded + padded / MIME_LINE_WIDTH * 2
}

/// One-shot encode: equivalent to a fresh [`Encoder`] fed the whole input
/// in a single [`update`](Encoder::update) followed by
/// [`finish`](Encoder::finish).
pub fn encode_all(input: &[u8]) -> String {
    let mut encoder = Encoder::new();
    let mut out = encoder.update(input);
    out.push_str(&encoder.finish());
    out
}
