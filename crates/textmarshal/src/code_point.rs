//! Scalar value classification and surrogate-aware code point iteration.
//!
//! Every encoder that walks a host string code point by code point goes
//! through [`CodePoints`]. It is the only place that combines a high surrogate
//! with the low surrogate that follows it, so the UTF-8 and UTF-32 paths (and
//! the length functions) cannot disagree about where a pair ends.

/// Largest Unicode scalar value.
pub const MAX_CODE_POINT: u32 = 0x10_FFFF;

/// Width in bytes of a UTF-32 unit.
pub const UTF32_WIDTH: usize = 4;

const HIGH_SURROGATE_START: u32 = 0xD800;
const LOW_SURROGATE_START: u32 = 0xDC00;
const SUPPLEMENTARY_START: u32 = 0x1_0000;

/// Returns `true` for units in `0xD800..=0xDBFF`.
#[inline]
#[must_use]
pub const fn is_high_surrogate(unit: u16) -> bool {
    matches!(unit, 0xD800..=0xDBFF)
}

/// Returns `true` for units in `0xDC00..=0xDFFF`.
#[inline]
#[must_use]
pub const fn is_low_surrogate(unit: u16) -> bool {
    matches!(unit, 0xDC00..=0xDFFF)
}

/// Splits a supplementary-plane code point into `(high, low)` surrogates.
///
/// Values above [`MAX_CODE_POINT`] are not rejected: the high half is
/// truncated to 16 bits, matching what a host `fromCharCode` would store.
#[inline]
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub const fn split_surrogates(cp: u32) -> (u16, u16) {
    let v = cp.wrapping_sub(SUPPLEMENTARY_START);
    (
        (HIGH_SURROGATE_START | (v >> 10)) as u16,
        (LOW_SURROGATE_START | (v & 0x3FF)) as u16,
    )
}

/// Combines a high and a low surrogate into the code point they encode.
#[inline]
#[must_use]
pub const fn combine_surrogates(high: u16, low: u16) -> u32 {
    SUPPLEMENTARY_START + (((high as u32) - HIGH_SURROGATE_START) << 10)
        + ((low as u32) - LOW_SURROGATE_START)
}

/// Number of bytes UTF-8 needs for `cp`.
///
/// Anything above `0xFFFF` takes the 4-byte form, including values past
/// [`MAX_CODE_POINT`].
#[inline]
#[must_use]
pub const fn utf8_width(cp: u32) -> usize {
    match cp {
        0..=0x7F => 1,
        0x80..=0x7FF => 2,
        0x800..=0xFFFF => 3,
        _ => 4,
    }
}

/// Number of 16-bit units UTF-16 needs for `cp`.
#[inline]
#[must_use]
pub const fn utf16_width(cp: u32) -> usize {
    if cp > 0xFFFF { 2 } else { 1 }
}

/// Iterator over the code points of a slice of 16-bit code units.
///
/// A high surrogate immediately followed by a low surrogate yields the
/// combined code point and consumes both units. Any other surrogate is
/// yielded as-is.
#[derive(Debug, Clone)]
pub struct CodePoints<'a> {
    units: &'a [u16],
    index: usize,
}

impl<'a> CodePoints<'a> {
    /// Starts iterating at the first unit of `units`.
    #[must_use]
    pub fn new(units: &'a [u16]) -> Self {
        Self { units, index: 0 }
    }

    /// Index of the next unit to be read.
    #[must_use]
    pub fn position(&self) -> usize {
        self.index
    }

    /// Returns the next code point together with the number of units it
    /// consumed (1 or 2).
    pub fn next_with_width(&mut self) -> Option<(u32, usize)> {
        let &unit = self.units.get(self.index)?;
        if is_high_surrogate(unit) {
            if let Some(&low) = self.units.get(self.index + 1) {
                if is_low_surrogate(low) {
                    self.index += 2;
                    return Some((combine_surrogates(unit, low), 2));
                }
            }
        }
        self.index += 1;
        Some((u32::from(unit), 1))
    }
}

impl Iterator for CodePoints<'_> {
    type Item = u32;

    #[inline]
    fn next(&mut self) -> Option<u32> {
        self.next_with_width().map(|(cp, _)| cp)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self.units.len() - self.index;
        (rest.div_ceil(2), Some(rest))
    }
}

impl core::iter::FusedIterator for CodePoints<'_> {}
