//! Streaming Base64 codec with MIME line wrapping.
//!
//! The crate is built around two small state machines: [`Encoder`] turns
//! arbitrary byte chunks into standard Base64 text, wrapping lines every 72
//! characters and padding with `=` when the stream is finished; [`Decoder`]
//! accepts Base64 text split at arbitrary chunk boundaries, skips whitespace,
//! and reproduces the original bytes. Both buffer the incomplete trailing
//! group between calls, so chunk boundaries never have to align with the
//! 3-byte / 4-character group size.
//!
//! One-shot wrappers [`encode_all`] and [`decode_all`] drive the incremental
//! machines to completion in a single call.
//!
//! ```
//! use fb64::{decode_all, encode_all};
//!
//! let encoded = encode_all(b"hello world");
//! assert_eq!(encoded, "aGVsbG8gd29ybGQ=");
//! assert_eq!(decode_all(encoded.as_bytes()).unwrap(), b"hello world");
//! ```

pub mod common;
pub mod decode;
pub mod encode;

pub use decode::{DecodeError, Decoder, decode_all};
pub use encode::{Encoder, encode_all, encoded_len};
