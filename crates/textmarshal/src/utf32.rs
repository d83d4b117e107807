//! UTF-32LE runs in guest memory.
//!
//! Each 4-byte unit holds a whole scalar value. Offsets must be 4-byte
//! aligned.

use crate::{
    DecodeOptions, Diagnostic, HostString, Outcome,
    code_point::{CodePoints, MAX_CODE_POINT, UTF32_WIDTH},
    diagnostic::Reporter,
    memory::{debug_check_alignment, read_u32, write_capacity, write_u32},
    terminus::scan_terminus,
};

/// Decodes the UTF-32LE run starting at `offset`.
///
/// Values above `0xFFFF` are appended as surrogate pairs. Values above
/// `U+10FFFF` become U+FFFD and are reported.
pub fn decode(buf: &[u8], offset: usize, options: &DecodeOptions) -> Outcome<HostString> {
    debug_check_alignment(offset, UTF32_WIDTH);
    let end = scan_terminus(
        buf,
        offset,
        UTF32_WIDTH,
        options.max_units(UTF32_WIDTH),
        options.ignore_nul,
    );
    let run = buf.get(offset..end).unwrap_or_default();

    let mut reporter = Reporter::new(options);
    let mut out = HostString::with_capacity(run.len() / UTF32_WIDTH);
    let mut at = 0;
    while at + UTF32_WIDTH <= run.len() {
        let value = read_u32(run, at);
        if value > MAX_CODE_POINT {
            reporter.report(Diagnostic::OutOfRangeCodePoint {
                code_point: value,
                offset: offset + at,
            });
            out.push_unit(0xFFFD);
        } else {
            out.push_code_point(value);
        }
        at += UTF32_WIDTH;
    }
    reporter.finish(out)
}

/// Encodes `src` as NUL-terminated UTF-32LE at `offset`.
///
/// Surrogate pairs in `src` become a single unit. `max_bytes_to_write`
/// includes the 4-byte terminator; `None` means "up to the end of `buf`".
/// Returns the number of bytes written, excluding the terminator.
pub fn encode(
    src: &[u16],
    buf: &mut [u8],
    offset: usize,
    max_bytes_to_write: Option<usize>,
) -> Outcome<usize> {
    debug_check_alignment(offset, UTF32_WIDTH);
    let capacity = write_capacity(buf.len(), offset, max_bytes_to_write);
    if capacity < UTF32_WIDTH {
        return Outcome::clean(0);
    }

    // Start of the terminator slot.
    let end = offset + capacity - UTF32_WIDTH;
    let mut out = offset;
    for cp in CodePoints::new(src) {
        if out + UTF32_WIDTH > end {
            log::trace!(target: "textmarshal", "UTF-32 encode stopped at {out}: budget exhausted");
            break;
        }
        write_u32(buf, out, cp);
        out += UTF32_WIDTH;
    }
    write_u32(buf, out, 0);
    Outcome::clean(out - offset)
}

/// Number of bytes [`encode`] writes for `src`, excluding the terminator.
///
/// A surrogate pair is one code point and counts once.
#[must_use]
pub fn encoded_length(src: &[u16]) -> usize {
    UTF32_WIDTH * CodePoints::new(src).count()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn pairs_become_one_unit() {
        let src = HostString::from("A𝄞");
        let mut buf = [0xAAu8; 16];
        assert_eq!(encoded_length(&src), 8);
        let out = encode(&src, &mut buf, 4, None);
        assert_eq!(out.value, 8);
        assert_eq!(
            &buf[4..16],
            &[0x41, 0, 0, 0, 0x1E, 0xD1, 0x01, 0x00, 0, 0, 0, 0]
        );
        assert_eq!(&buf[..4], &[0xAA; 4]);
    }

    #[rstest]
    #[case(0, 0, 0)]
    #[case(3, 0, 0)]
    #[case(4, 0, 4)]
    #[case(7, 0, 4)]
    #[case(8, 4, 8)]
    #[case(12, 8, 12)]
    #[case(64, 8, 12)]
    fn respects_the_budget(
        #[case] max: usize,
        #[case] expected_written: usize,
        #[case] expected_touched: usize,
    ) {
        let src = HostString::from("hi");
        let mut buf = [0xAAu8; 16];
        assert_eq!(encode(&src, &mut buf, 0, Some(max)).value, expected_written);
        assert!(buf[expected_touched..].iter().all(|&b| b == 0xAA));
    }

    #[test]
    fn decode_appends_pairs_and_stops_at_nul() {
        let buf = [0x41, 0, 0, 0, 0x1E, 0xD1, 0x01, 0, 0, 0, 0, 0, 0x42, 0, 0, 0];
        let out = decode(&buf, 0, &DecodeOptions::default());
        assert!(out.is_clean());
        assert_eq!(out.value, "A𝄞");

        let opts = DecodeOptions {
            ignore_nul: true,
            ..Default::default()
        };
        assert_eq!(decode(&buf, 0, &opts).value, "A𝄞\0B");
    }

    #[test]
    fn out_of_range_offsets_are_absolute() {
        let buf = [0xAA, 0xAA, 0xAA, 0xAA, 0x41, 0, 0, 0, 0xFF, 0xFF, 0xFF, 0xFF];
        let out = decode(&buf, 4, &DecodeOptions::default());
        assert_eq!(out.value, "A\u{FFFD}");
        assert_eq!(
            out.diagnostic,
            Some(Diagnostic::OutOfRangeCodePoint {
                code_point: 0xFFFF_FFFF,
                offset: 8
            })
        );
    }

    #[test]
    fn out_of_range_values_are_replaced() {
        let buf = [0x00, 0x00, 0x11, 0x00, 0x43, 0, 0, 0];
        let out = decode(&buf, 0, &DecodeOptions::default());
        assert_eq!(out.value, "\u{FFFD}C");
        assert_eq!(
            out.diagnostic,
            Some(Diagnostic::OutOfRangeCodePoint {
                code_point: 0x11_0000,
                offset: 0
            })
        );
    }
}
