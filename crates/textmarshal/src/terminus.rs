use bstr::ByteSlice;

/// Finds the exclusive end byte offset of the run starting at `offset`.
///
/// `width` is the unit width in bytes (1, 2 or 4) and `max_units` the unit
/// budget. With `ignore_nul` the run covers the whole budget; otherwise it
/// stops at the first all-zero unit or at the budget boundary, whichever comes
/// first. A missing budget means "up to the end of `buf`". Only whole units
/// inside `buf` are ever considered, so the result never exceeds `buf.len()`
/// unless `offset` itself does, in which case `offset` is returned.
///
/// ```rust
/// use textmarshal::scan_terminus;
///
/// assert_eq!(scan_terminus(&[72, 105, 0, 33, 33], 0, 1, None, false), 2);
/// assert_eq!(scan_terminus(&[72, 105, 0, 33, 33], 0, 1, Some(4), true), 4);
/// ```
#[must_use]
pub fn scan_terminus(
    buf: &[u8],
    offset: usize,
    width: usize,
    max_units: Option<usize>,
    ignore_nul: bool,
) -> usize {
    debug_assert!(matches!(width, 1 | 2 | 4), "unsupported unit width {width}");
    let width = width.max(1);

    let Some(region) = buf.get(offset..) else {
        return offset;
    };
    let available = region.len() / width;
    let units = max_units.map_or(available, |max| max.min(available));
    let region = &region[..units * width];

    if ignore_nul {
        return offset + region.len();
    }

    let run = if width == 1 {
        region.find_byte(0).unwrap_or(region.len())
    } else {
        region
            .chunks_exact(width)
            .position(|unit| unit.iter().all(|&b| b == 0))
            .map_or(region.len(), |i| i * width)
    };
    offset + run
}
