//! UTF-8 runs in guest memory.
//!
//! Decoding is lenient: malformed lead bytes and sequences cut short by the end
//! of the run are decoded best-effort and reported through the returned
//! [`Outcome`]. Encoding walks the host string code point by code point and
//! stops before any sequence that would not fit, so a partial sequence is
//! never written.

use alloc::{vec, vec::Vec};

use crate::{
    DecodeOptions, Diagnostic, HostString, Outcome,
    accel::{DecodePath, DecoderSet, TextDecoder},
    code_point::{CodePoints, MAX_CODE_POINT, utf8_width},
    diagnostic::Reporter,
    memory::write_capacity,
    terminus::scan_terminus,
};

/// The bytes of the run starting at `offset`.
fn delimit<'b>(buf: &'b [u8], offset: usize, options: &DecodeOptions) -> &'b [u8] {
    let end = scan_terminus(buf, offset, 1, options.max_units(1), options.ignore_nul);
    buf.get(offset..end).unwrap_or_default()
}

/// Decodes the UTF-8 run starting at `offset`.
///
/// Runs longer than [`crate::SHORT_RUN_THRESHOLD`] bytes go through the shared
/// accelerated decoder when one is available, unless
/// [`DecodeOptions::force_manual`] is set.
pub fn decode(buf: &[u8], offset: usize, options: &DecodeOptions) -> Outcome<HostString> {
    let run = delimit(buf, offset, options);
    let decoders = DecoderSet::get();
    match (
        DecodePath::select(run.len(), decoders.is_some(), options.force_manual),
        decoders,
    ) {
        (DecodePath::Accelerated, Some(set)) => Outcome::clean(set.utf8.decode(run)),
        _ => decode_run(run, offset, options),
    }
}

/// Decodes the run at `offset` with the per-byte loop, whatever its length.
pub fn decode_manual(buf: &[u8], offset: usize, options: &DecodeOptions) -> Outcome<HostString> {
    decode_run(delimit(buf, offset, options), offset, options)
}

/// Decodes the run at `offset` with `decoder`, whatever its length.
///
/// Invalid sequences are replaced by the decoder and not reported.
pub fn decode_accelerated(
    decoder: &TextDecoder,
    buf: &[u8],
    offset: usize,
    options: &DecodeOptions,
) -> Outcome<HostString> {
    Outcome::clean(decoder.decode(delimit(buf, offset, options)))
}

/// Reads the next continuation byte's payload, or zero bits past the run.
#[inline]
fn continuation(run: &[u8], i: &mut usize, truncated: &mut bool) -> u32 {
    if let Some(&b) = run.get(*i) {
        *i += 1;
        u32::from(b & 0x3F)
    } else {
        *truncated = true;
        0
    }
}

fn decode_run(run: &[u8], base: usize, options: &DecodeOptions) -> Outcome<HostString> {
    let mut reporter = Reporter::new(options);
    let mut out = HostString::with_capacity(run.len());
    let mut i = 0;

    while i < run.len() {
        let start = i;
        let lead = run[i];
        i += 1;
        if lead & 0x80 == 0 {
            out.push_unit(u16::from(lead));
            continue;
        }

        let mut truncated = false;
        let b1 = continuation(run, &mut i, &mut truncated);
        let cp = if lead & 0xE0 == 0xC0 {
            (u32::from(lead & 0x1F) << 6) | b1
        } else {
            let b2 = continuation(run, &mut i, &mut truncated);
            if lead & 0xF0 == 0xE0 {
                (u32::from(lead & 0x0F) << 12) | (b1 << 6) | b2
            } else {
                if lead & 0xF8 != 0xF0 {
                    reporter.report(Diagnostic::InvalidLeadByte {
                        byte: lead,
                        offset: base + start,
                    });
                }
                let b3 = continuation(run, &mut i, &mut truncated);
                (u32::from(lead & 0x07) << 18) | (b1 << 12) | (b2 << 6) | b3
            }
        };

        if truncated {
            reporter.report(Diagnostic::TruncatedSequence {
                offset: base + start,
            });
        }
        if cp > MAX_CODE_POINT {
            reporter.report(Diagnostic::OutOfRangeCodePoint {
                code_point: cp,
                offset: base + start,
            });
            out.push_unit(0xFFFD);
        } else {
            out.push_code_point(cp);
        }
    }

    reporter.finish(out)
}

/// Writes the UTF-8 form of `cp`, which takes `width` bytes, at `at`.
#[inline]
#[allow(clippy::cast_possible_truncation)]
fn put(buf: &mut [u8], at: usize, cp: u32, width: usize) {
    match width {
        1 => buf[at] = cp as u8,
        2 => {
            buf[at] = 0xC0 | (cp >> 6) as u8;
            buf[at + 1] = 0x80 | (cp & 0x3F) as u8;
        }
        3 => {
            buf[at] = 0xE0 | (cp >> 12) as u8;
            buf[at + 1] = 0x80 | ((cp >> 6) & 0x3F) as u8;
            buf[at + 2] = 0x80 | (cp & 0x3F) as u8;
        }
        _ => {
            buf[at] = 0xF0 | (cp >> 18) as u8;
            buf[at + 1] = 0x80 | ((cp >> 12) & 0x3F) as u8;
            buf[at + 2] = 0x80 | ((cp >> 6) & 0x3F) as u8;
            buf[at + 3] = 0x80 | (cp & 0x3F) as u8;
        }
    }
}

/// Encodes `src` as NUL-terminated UTF-8 at `offset`.
///
/// `max_bytes_to_write` includes the terminator; `None` means "up to the end
/// of `buf`". Returns the number of bytes written, excluding the terminator.
pub fn encode(
    src: &[u16],
    buf: &mut [u8],
    offset: usize,
    max_bytes_to_write: Option<usize>,
) -> Outcome<usize> {
    encode_code_points(CodePoints::new(src), buf, offset, max_bytes_to_write)
}

/// Encodes an arbitrary sequence of code points as NUL-terminated UTF-8.
///
/// Values above `U+10FFFF` are reported and still written using the 4-byte
/// form.
pub fn encode_code_points<I>(
    code_points: I,
    buf: &mut [u8],
    offset: usize,
    max_bytes_to_write: Option<usize>,
) -> Outcome<usize>
where
    I: IntoIterator<Item = u32>,
{
    let capacity = write_capacity(buf.len(), offset, max_bytes_to_write);
    if capacity == 0 {
        return Outcome::clean(0);
    }

    let mut reporter = Reporter::default();
    // Last byte of the budget is kept for the terminator.
    let end = offset + capacity - 1;
    let mut out = offset;
    for (index, cp) in code_points.into_iter().enumerate() {
        let width = utf8_width(cp);
        if out + width > end {
            log::trace!(target: "textmarshal", "UTF-8 encode stopped at {out}: budget exhausted");
            break;
        }
        if cp > MAX_CODE_POINT {
            reporter.report(Diagnostic::OutOfRangeSource {
                code_point: cp,
                index,
            });
        }
        put(buf, out, cp, width);
        out += width;
    }
    buf[out] = 0;
    reporter.finish(out - offset)
}

/// Number of bytes [`encode`] writes for `src`, excluding the terminator.
#[must_use]
pub fn encoded_length(src: &[u16]) -> usize {
    CodePoints::new(src).map(utf8_width).sum()
}

/// Encodes `src` into a new vector, with a trailing NUL when `add_nul` is set.
///
/// Used to stage a string before copying it into guest memory.
#[must_use]
pub fn encode_to_vec(src: &[u16], add_nul: bool) -> Vec<u8> {
    let len = encoded_length(src);
    let mut out = vec![0u8; len + 1];
    let written = encode(src, &mut out, 0, None).value;
    debug_assert_eq!(written, len);
    if !add_nul {
        out.truncate(len);
    }
    out
}
