//! Legacy single-byte strings: one byte per host code unit.
//!
//! This mode exists for callers that pass plain byte strings. It keeps the low
//! byte of each unit and does not transcode, so text outside `U+0000..=U+00FF`
//! does not survive a round trip.

use crate::{
    DecodeOptions, Diagnostic, HostString, Outcome, diagnostic::Reporter,
    memory::write_capacity, terminus::scan_terminus,
};

/// Decodes the byte run starting at `offset`, one code unit per byte.
pub fn decode(buf: &[u8], offset: usize, options: &DecodeOptions) -> Outcome<HostString> {
    let end = scan_terminus(buf, offset, 1, options.max_units(1), options.ignore_nul);
    let run = buf.get(offset..end).unwrap_or_default();
    Outcome::clean(run.iter().copied().map(u16::from).collect())
}

/// Writes the low byte of each unit of `src` at `offset`, then a zero byte.
///
/// Units above `0xFF` are masked and reported. `max_bytes_to_write` includes
/// the terminator. `None` keeps the legacy convention of writing as much as
/// the caller's buffer holds. Returns the number of bytes written, excluding
/// the terminator.
#[allow(clippy::cast_possible_truncation)]
pub fn encode(
    src: &[u16],
    buf: &mut [u8],
    offset: usize,
    max_bytes_to_write: Option<usize>,
) -> Outcome<usize> {
    let capacity = write_capacity(buf.len(), offset, max_bytes_to_write);
    if capacity == 0 {
        return Outcome::clean(0);
    }

    let mut reporter = Reporter::default();
    let count = src.len().min(capacity - 1);
    for (index, &unit) in src[..count].iter().enumerate() {
        if unit > 0xFF {
            reporter.report(Diagnostic::NonLatin1Unit { unit, index });
        }
        buf[offset + index] = unit as u8;
    }
    buf[offset + count] = 0;
    reporter.finish(count)
}

/// Number of bytes [`encode`] writes for `src`, excluding the terminator.
#[must_use]
pub fn encoded_length(src: &[u16]) -> usize {
    src.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_map_to_units() {
        let buf = b"gar\xE7on\0tail";
        let out = decode(buf, 0, &DecodeOptions::default());
        assert_eq!(out.value, "garçon");
        assert_eq!(out.value.len(), 6);
    }

    #[test]
    fn wide_units_are_masked_and_reported() {
        let src = HostString::from("a€b");
        let mut buf = [0xAAu8; 8];
        let out = encode(&src, &mut buf, 0, None);
        assert_eq!(out.value, 3);
        assert_eq!(&buf[..4], &[0x61, 0xAC, 0x62, 0x00]);
        assert_eq!(
            out.diagnostic,
            Some(Diagnostic::NonLatin1Unit {
                unit: 0x20AC,
                index: 1
            })
        );
    }

    #[test]
    fn truncates_to_the_budget() {
        let src = HostString::from("abcdef");
        let mut buf = [0xAAu8; 8];
        assert_eq!(encode(&src, &mut buf, 2, Some(3)).value, 2);
        assert_eq!(buf, [0xAA, 0xAA, 0x61, 0x62, 0x00, 0xAA, 0xAA, 0xAA]);
    }
}
