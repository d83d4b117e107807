#![allow(missing_docs)]

use core::fmt::Write;

use textmarshal::{
    DecodeOptions, Encoding, HostString, decode, encode, encoded_length, scan_terminus,
};

fn hex(bytes: &[u8]) -> String {
    let mut out = String::new();
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        write!(out, "{b:02x}").unwrap();
    }
    out
}

fn clef() -> HostString {
    HostString::from("A\u{20AC}\u{1D11E}")
}

#[test]
fn utf8_layout_of_mixed_width_text() {
    let mut memory = [0xAAu8; 16];
    let out = encode(Encoding::Utf8, &clef(), &mut memory, 0, Some(16));
    assert!(out.is_clean());
    assert_eq!(out.value, 8);
    insta::assert_snapshot!(hex(&memory[..10]), @"41 e2 82 ac f0 9d 84 9e 00 aa");
}

#[test]
fn utf8_decode_of_mixed_width_text() {
    let memory = [0x41, 0xE2, 0x82, 0xAC, 0xF0, 0x9D, 0x84, 0x9E, 0x00];
    let out = decode(Encoding::Utf8, &memory, 0, &DecodeOptions::default());
    assert!(out.is_clean());
    assert_eq!(out.value, clef());
    assert_eq!(out.value.len(), 4);
    assert_eq!(out.value.code_points().count(), 3);
}

#[test]
fn utf16_six_byte_budget_keeps_two_units() {
    let mut memory = [0xAAu8; 12];
    let out = encode(Encoding::Utf16, &clef(), &mut memory, 0, Some(6));
    assert_eq!(out.value, 4);
    insta::assert_snapshot!(hex(&memory[..8]), @"41 00 ac 20 00 00 aa aa");
    let back = decode(Encoding::Utf16, &memory, 0, &DecodeOptions::default());
    assert_eq!(back.value, "A\u{20AC}");
}

#[test]
fn utf32_layout_of_mixed_width_text() {
    let mut memory = [0xAAu8; 20];
    let out = encode(Encoding::Utf32, &clef(), &mut memory, 0, None);
    assert_eq!(out.value, 12);
    assert_eq!(encoded_length(Encoding::Utf32, &clef()), 12);
    insta::assert_snapshot!(
        hex(&memory),
        @"41 00 00 00 ac 20 00 00 1e d1 01 00 00 00 00 00 aa aa aa aa"
    );
}

#[test]
fn terminus_of_short_run() {
    assert_eq!(scan_terminus(&[72, 105, 0, 33, 33], 0, 1, None, false), 2);
}

#[test]
fn lengths_per_encoding() {
    let s = clef();
    assert_eq!(encoded_length(Encoding::Utf8, &s), 8);
    assert_eq!(encoded_length(Encoding::Utf16, &s), 8);
    assert_eq!(encoded_length(Encoding::Utf32, &s), 12);
    assert_eq!(encoded_length(Encoding::Latin1, &s), 4);
}

#[test]
fn long_runs_decode_the_same_on_both_paths() {
    let text = "Grüße aus der Sandbox, 𝄞 und € inklusive. ".repeat(8);
    let src = HostString::from(text.as_str());
    let mut memory = vec![0u8; 1024];
    let written = encode(Encoding::Utf8, &src, &mut memory, 3, None).value;
    assert!(written > 16);

    let fast = decode(Encoding::Utf8, &memory, 3, &DecodeOptions::default());
    let manual = decode(
        Encoding::Utf8,
        &memory,
        3,
        &DecodeOptions {
            force_manual: true,
            ..Default::default()
        },
    );
    assert_eq!(fast, manual);
    assert_eq!(fast.value.to_string_lossy(), text);
}
