#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use textmarshal::{DecodeOptions, Encoding, HostString, decode, encode, encoded_length, utf8};

const GUARD: u8 = 0xA5;

#[derive(Debug, Arbitrary)]
enum Which {
    Utf8,
    Utf16,
    Utf32,
    Latin1,
}

impl From<Which> for Encoding {
    fn from(w: Which) -> Self {
        match w {
            Which::Utf8 => Encoding::Utf8,
            Which::Utf16 => Encoding::Utf16,
            Which::Utf32 => Encoding::Utf32,
            Which::Latin1 => Encoding::Latin1,
        }
    }
}

#[derive(Debug, Arbitrary)]
struct Input {
    which: Which,
    offset: u8,
    max: Option<u8>,
    ignore_nul: bool,
    force_manual: bool,
    /// Raw host units, lone surrogates included.
    text: Vec<u16>,
    memory: Vec<u8>,
}

fn run(input: Input) {
    let encoding = Encoding::from(input.which);
    let width = encoding.unit_width();
    let offset = usize::from(input.offset) / width * width;
    let max = input.max.map(usize::from);

    // Decoding never reads past the budget and never panics on garbage.
    let opts = DecodeOptions {
        max_bytes: max,
        ignore_nul: input.ignore_nul,
        force_manual: input.force_manual,
        ..Default::default()
    };
    let decoded = decode(encoding, &input.memory, offset, &opts);
    if let Some(max) = max {
        // A UTF-8 lead byte cut off by the budget still yields a full code
        // point, so one byte can produce a surrogate pair.
        let units_per_byte = if matches!(encoding, Encoding::Utf8) { 2 } else { 1 };
        assert!(decoded.value.len() <= units_per_byte * max);
    }
    if let Ok(text) = std::str::from_utf8(&input.memory) {
        // On well-formed input both loops agree.
        let manual = utf8::decode_manual(text.as_bytes(), offset, &opts);
        let fast = utf8::decode(text.as_bytes(), offset, &opts);
        if text.is_char_boundary(offset.min(text.len()))
            && max.is_none_or(|m| text.is_char_boundary((offset + m).min(text.len())))
        {
            assert_eq!(manual, fast);
        }
    }

    // Encoding never writes outside `offset..offset + max`.
    let src = HostString::from_units(input.text);
    let mut memory = vec![GUARD; 256];
    let written = encode(encoding, &src, &mut memory, offset, max).value;
    let budget = max.unwrap_or(usize::MAX).min(memory.len().saturating_sub(offset));
    if budget < width {
        assert!(memory.iter().all(|&b| b == GUARD));
        return;
    }
    assert!(written + width <= budget);
    assert!(written <= encoded_length(encoding, &src));
    assert!(memory[..offset].iter().all(|&b| b == GUARD));
    assert!(memory[offset + written + width..].iter().all(|&b| b == GUARD));
    assert!(memory[offset + written..offset + written + width].iter().all(|&b| b == 0));
}

fuzz_target!(|input: Input| run(input));
