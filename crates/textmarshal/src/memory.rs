//! Little-endian unit access over a guest memory slice.
//!
//! Offsets are byte offsets from the start of the slice, which is expected to
//! be the start of the guest's linear memory so that alignment is meaningful.
//! Callers bounds-check before reading; these helpers only do the byte
//! shuffling.

/// Checks the alignment precondition of a UTF-16 or UTF-32 access.
///
/// Misalignment is a caller contract violation. Debug builds fail loudly;
/// release builds carry on with unaligned little-endian access.
#[inline]
#[track_caller]
pub(crate) fn debug_check_alignment(offset: usize, align: usize) {
    debug_assert!(
        offset % align == 0,
        "offset {offset} is not {align}-byte aligned"
    );
}

/// Number of bytes available for writing at `offset`.
///
/// `None` stands for the unbounded legacy convention and is clamped to the
/// slice like any other budget.
#[inline]
pub(crate) fn write_capacity(len: usize, offset: usize, max_bytes: Option<usize>) -> usize {
    let available = len.saturating_sub(offset);
    max_bytes.map_or(available, |max| max.min(available))
}

#[inline]
pub(crate) fn read_u16(buf: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([buf[at], buf[at + 1]])
}

#[inline]
pub(crate) fn read_u32(buf: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([buf[at], buf[at + 1], buf[at + 2], buf[at + 3]])
}

#[inline]
pub(crate) fn write_u16(buf: &mut [u8], at: usize, unit: u16) {
    buf[at..at + 2].copy_from_slice(&unit.to_le_bytes());
}

#[inline]
pub(crate) fn write_u32(buf: &mut [u8], at: usize, unit: u32) {
    buf[at..at + 4].copy_from_slice(&unit.to_le_bytes());
}
