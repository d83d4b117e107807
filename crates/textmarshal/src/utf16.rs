//! UTF-16LE runs in guest memory.
//!
//! Host strings are already sequences of 16-bit units, so both directions copy
//! units verbatim and surrogate pairs pass through untouched. Offsets must be
//! 2-byte aligned.

use crate::{
    DecodeOptions, HostString, Outcome,
    accel::{DecodePath, DecoderSet, TextDecoder},
    code_point::CodePoints,
    memory::{debug_check_alignment, read_u16, write_capacity, write_u16},
    terminus::scan_terminus,
};

fn delimit<'b>(buf: &'b [u8], offset: usize, options: &DecodeOptions) -> &'b [u8] {
    debug_check_alignment(offset, 2);
    let end = scan_terminus(buf, offset, 2, options.max_units(2), options.ignore_nul);
    buf.get(offset..end).unwrap_or_default()
}

/// Decodes the UTF-16LE run starting at `offset`.
///
/// The byte budget is halved into a unit budget. Runs longer than
/// [`crate::SHORT_RUN_THRESHOLD`] units use the shared accelerated decoder
/// when available.
pub fn decode(buf: &[u8], offset: usize, options: &DecodeOptions) -> Outcome<HostString> {
    let run = delimit(buf, offset, options);
    let decoders = DecoderSet::get();
    let path = DecodePath::select(run.len() / 2, decoders.is_some(), options.force_manual);
    let value = match (path, decoders) {
        (DecodePath::Accelerated, Some(set)) => set.utf16.decode(run),
        _ => decode_run(run),
    };
    Outcome::clean(value)
}

/// Decodes the run at `offset` one unit at a time, whatever its length.
pub fn decode_manual(buf: &[u8], offset: usize, options: &DecodeOptions) -> Outcome<HostString> {
    Outcome::clean(decode_run(delimit(buf, offset, options)))
}

/// Decodes the run at `offset` with `decoder`, whatever its length.
pub fn decode_accelerated(
    decoder: &TextDecoder,
    buf: &[u8],
    offset: usize,
    options: &DecodeOptions,
) -> Outcome<HostString> {
    Outcome::clean(decoder.decode(delimit(buf, offset, options)))
}

fn decode_run(run: &[u8]) -> HostString {
    let mut out = HostString::with_capacity(run.len() / 2);
    let mut at = 0;
    while at + 2 <= run.len() {
        out.push_unit(read_u16(run, at));
        at += 2;
    }
    out
}

/// Encodes `src` as NUL-terminated UTF-16LE at `offset`.
///
/// `max_bytes_to_write` includes the 2-byte terminator; `None` means "up to
/// the end of `buf`". Returns the number of bytes written, excluding the
/// terminator.
///
/// At most `min(src.len(), (max - 2) / 2)` units are copied, with one
/// exception: when that cut would land between the two halves of a
/// surrogate pair, the high half is left out too, so the copy is one unit
/// shorter than the raw count. A partial pair is never written.
pub fn encode(
    src: &[u16],
    buf: &mut [u8],
    offset: usize,
    max_bytes_to_write: Option<usize>,
) -> Outcome<usize> {
    debug_check_alignment(offset, 2);
    let capacity = write_capacity(buf.len(), offset, max_bytes_to_write);
    if capacity < 2 {
        return Outcome::clean(0);
    }

    let room = (capacity - 2) / 2;
    let mut count = src.len().min(room);
    if count < src.len() {
        // Back off to the last whole code point that fits.
        let mut units = CodePoints::new(src);
        let mut fits = 0;
        while let Some((_, width)) = units.next_with_width() {
            if fits + width > count {
                break;
            }
            fits += width;
        }
        count = fits;
        log::trace!(target: "textmarshal", "UTF-16 encode truncated to {count} of {} units", src.len());
    }

    for (i, &unit) in src[..count].iter().enumerate() {
        write_u16(buf, offset + 2 * i, unit);
    }
    write_u16(buf, offset + 2 * count, 0);
    Outcome::clean(2 * count)
}

/// Number of bytes [`encode`] writes for `src`, excluding the terminator.
#[must_use]
pub fn encoded_length(src: &[u16]) -> usize {
    2 * src.len()
}
