use alloc::{string::String, vec};

use quickcheck::QuickCheck;

use super::arbitrary::{Ragged, test_count};
use crate::{
    DecodeOptions, Encoding, HostString, TextDecoder, decode, encode, encoded_length, utf8, utf16,
};

const UNICODE: [Encoding; 3] = [Encoding::Utf8, Encoding::Utf16, Encoding::Utf32];
const ALL: [Encoding; 4] = [
    Encoding::Utf8,
    Encoding::Utf16,
    Encoding::Utf32,
    Encoding::Latin1,
];

/// Encodes into an exactly sized buffer and decodes it back.
fn round_trip(encoding: Encoding, src: &HostString) -> Option<HostString> {
    let len = encoded_length(encoding, src);
    let mut buf = vec![0u8; len + encoding.unit_width()];
    let size = buf.len();
    let out = encode(encoding, src, &mut buf, 0, Some(size));
    if out.value != len {
        return None;
    }
    Some(decode(encoding, &buf, 0, &DecodeOptions::default()).value)
}

#[test]
fn ascii_round_trips_through_every_encoding() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(text: String) -> bool {
        let ascii: String = text.chars().filter(|c| c.is_ascii() && *c != '\0').collect();
        let src = HostString::from(ascii.as_str());
        ALL.iter()
            .all(|&e| round_trip(e, &src).is_some_and(|back| back == src))
    }

    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(String) -> bool);
}

#[test]
fn supplementary_text_round_trips_through_unicode_encodings() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(src: HostString) -> bool {
        UNICODE
            .iter()
            .all(|&e| round_trip(e, &src).is_some_and(|back| back == src))
    }

    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(HostString) -> bool);
}

#[test]
fn utf8_length_equals_bytes_written() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(src: Ragged) -> bool {
        let len = utf8::encoded_length(&src.0);
        let mut buf = vec![0xAAu8; len + 8];
        let written = utf8::encode(&src.0, &mut buf, 0, Some(len + 1)).value;
        written == len && buf[len] == 0 && buf[len + 1] == 0xAA
    }

    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(Ragged) -> bool);
}

#[test]
fn lone_surrogates_survive_manual_utf8_and_utf16() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(src: Ragged) -> bool {
        let opts = DecodeOptions {
            force_manual: true,
            ..Default::default()
        };
        let bytes = utf8::encode_to_vec(&src.0, true);
        let via_utf8 = utf8::decode(&bytes, 0, &opts);

        let mut wide = vec![0u8; utf16::encoded_length(&src.0) + 2];
        let _ = utf16::encode(&src.0, &mut wide, 0, None);
        let via_utf16 = utf16::decode(&wide, 0, &DecodeOptions::default());

        via_utf8.is_clean() && via_utf8.value == src.0 && via_utf16.value == src.0
    }

    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(Ragged) -> bool);
}

#[test]
fn manual_and_accelerated_paths_agree_on_well_formed_input() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(src: HostString, offset: u8) -> bool {
        let opts = DecodeOptions::default();
        let offset = usize::from(offset % 8) * 2;

        let mut narrow = vec![0u8; offset];
        narrow.extend(utf8::encode_to_vec(&src, true));
        let manual = utf8::decode_manual(&narrow, offset, &opts);
        let fast = utf8::decode_accelerated(&TextDecoder::utf8(), &narrow, offset, &opts);

        let mut wide = vec![0u8; offset + utf16::encoded_length(&src) + 2];
        let _ = utf16::encode(&src, &mut wide, offset, None);
        let manual16 = utf16::decode_manual(&wide, offset, &opts);
        let fast16 = utf16::decode_accelerated(&TextDecoder::utf16le(), &wide, offset, &opts);

        manual.is_clean() && manual == fast && manual.value == src && manual16 == fast16
    }

    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(HostString, u8) -> bool);
}

#[test]
fn arbitrary_valid_utf8_decodes_identically_on_both_paths() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(bytes: vec::Vec<u8>) -> bool {
        let opts = DecodeOptions::default();
        let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
        let manual = utf8::decode_manual(&bytes, 0, &opts);
        let fast = utf8::decode_accelerated(&TextDecoder::utf8(), &bytes, 0, &opts);
        if core::str::from_utf8(&bytes[..end]).is_ok() {
            manual == fast
        } else {
            // Malformed input only has to decode without panicking.
            true
        }
    }

    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(vec::Vec<u8>) -> bool);
}

#[quickcheck_macros::quickcheck]
fn utf16_length_is_twice_the_unit_count(src: Ragged) -> bool {
    encoded_length(Encoding::Utf16, &src.0) == 2 * src.0.len()
}
