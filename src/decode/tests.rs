use proptest::prelude::*;

use super::core::*;
use crate::encode::encode_all;

#[test]
fn test_decode_empty() {
    assert_eq!(decode_all(b"").unwrap(), b"");
}

#[test]
fn test_decode_hello_world() {
    assert_eq!(decode_all(b"aGVsbG8gd29ybGQ=").unwrap(), b"hello world");
}

#[test]
fn test_decode_unpadded_quantum() {
    assert_eq!(decode_all(b"YWJj").unwrap(), b"abc");
}

#[test]
fn test_decode_padded_quanta() {
    assert_eq!(decode_all(b"YQ==").unwrap(), b"a");
    assert_eq!(decode_all(b"YWI=").unwrap(), b"ab");
}

#[test]
fn test_incremental_aligned_quanta() {
    let mut decoder = Decoder::new();
    let mut out = Vec::new();
    for part in [b"aGVs", b"bG8g", b"d29y", b"bGQ="] {
        out.extend(decoder.update(part).unwrap());
    }
    decoder.finish().unwrap();
    assert_eq!(out, b"hello world");
}

#[test]
fn test_incremental_unaligned_chunks() {
    let mut decoder = Decoder::new();
    let mut out = Vec::new();
    out.extend(decoder.update(b"aGV").unwrap());
    out.extend(decoder.update(b"sbG8gd2").unwrap());
    out.extend(decoder.update(b"9ybGQ=").unwrap());
    decoder.finish().unwrap();
    assert_eq!(out, b"hello world");
}

#[test]
fn test_whitespace_is_skipped() {
    assert_eq!(
        decode_all(b"aGVs\r\nbG8g\td29y bGQ=\n").unwrap(),
        b"hello world"
    );
}

#[test]
fn test_decodes_wrapped_encoder_output() {
    let input: Vec<u8> = (0..=255).collect();
    let encoded = encode_all(&input);
    assert!(encoded.contains('\n'));
    assert_eq!(decode_all(encoded.as_bytes()).unwrap(), input);
}

#[test]
fn test_invalid_character_is_reported() {
    assert_eq!(
        decode_all(b"aGV!"),
        Err(DecodeError::InvalidCharacter { byte: b'!' })
    );
}

#[test]
fn test_padding_before_final_position_is_rejected() {
    assert_eq!(decode_all(b"a==b"), Err(DecodeError::InvalidPadding));
    assert_eq!(decode_all(b"ab=c"), Err(DecodeError::InvalidPadding));
    assert_eq!(decode_all(b"===="), Err(DecodeError::InvalidPadding));
}

#[test]
fn test_truncated_input_is_reported() {
    assert_eq!(
        decode_all(b"aGVsbG8"),
        Err(DecodeError::TruncatedInput { pending: 3 })
    );
    assert_eq!(
        decode_all(b"aGVsb"),
        Err(DecodeError::TruncatedInput { pending: 1 })
    );
    // A lone character plus padding is still short of a full quantum.
    assert_eq!(
        decode_all(b"a="),
        Err(DecodeError::TruncatedInput { pending: 2 })
    );
}

#[test]
fn test_reset_discards_buffered_carry() {
    let mut decoder = Decoder::new();
    // Leaves 3 characters of an unfinished quantum buffered.
    decoder.update(b"aGVsbG8").unwrap();
    decoder.reset();
    assert_eq!(decoder.update(b"d29ybGQ=").unwrap(), b"world");
    decoder.finish().unwrap();
}

#[test]
fn test_reset_recovers_after_error() {
    let mut decoder = Decoder::new();
    assert!(decoder.update(b"ab!").is_err());
    decoder.reset();
    assert_eq!(decoder.update(b"aGVsbG8=").unwrap(), b"hello");
    decoder.finish().unwrap();
}

#[test]
fn test_separate_streams_after_reset() {
    let mut decoder = Decoder::new();
    decoder.update(b"aGVsbG8=").unwrap();
    decoder.reset();
    assert_eq!(decoder.update(b"d29ybGQ=").unwrap(), b"world");
}

proptest! {
    #[test]
    fn roundtrip(data in proptest::collection::vec(any::<u8>(), 0..2048)) {
        let encoded = encode_all(&data);
        prop_assert_eq!(decode_all(encoded.as_bytes()).unwrap(), data);
    }

    #[test]
    fn arbitrary_splits_match_one_shot(
        data in proptest::collection::vec(any::<u8>(), 0..384),
        chunk in 1usize..13,
    ) {
        let encoded = encode_all(&data);
        let mut decoder = Decoder::new();
        let mut out = Vec::new();
        for piece in encoded.as_bytes().chunks(chunk) {
            out.extend(decoder.update(piece).unwrap());
        }
        decoder.finish().unwrap();
        prop_assert_eq!(out, data);
    }
}
