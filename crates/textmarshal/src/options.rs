/// Options controlling how a run is delimited and decoded.
///
/// ```rust
/// use textmarshal::{DecodeOptions, Encoding, decode};
///
/// let memory = b"hello\0world";
/// let opts = DecodeOptions {
///     max_bytes: Some(8),
///     ignore_nul: true,
///     ..Default::default()
/// };
/// let s = decode(Encoding::Latin1, memory, 0, &opts).value;
/// assert_eq!(s.to_string_lossy(), "hello\0wo");
/// ```
///
/// # Default
///
/// No byte budget, stop at the first zero unit, accelerated path allowed.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecodeOptions {
    /// Maximum number of bytes to read, starting at the offset.
    ///
    /// Converted to a unit budget by dividing by the unit width, so a
    /// trailing partial unit is never read. `None` reads up to the first zero
    /// unit, or to the end of the buffer when `ignore_nul` is set.
    ///
    /// # Default
    ///
    /// `None`
    pub max_bytes: Option<usize>,

    /// Whether zero units are decoded as ordinary characters instead of
    /// ending the run.
    ///
    /// With this set, the run length is decided by `max_bytes` alone.
    ///
    /// # Default
    ///
    /// `false`
    pub ignore_nul: bool,

    /// Whether to decode with the manual per-unit loop even when an
    /// accelerated decoder is available and the run is long.
    ///
    /// # Default
    ///
    /// `false`
    pub force_manual: bool,

    #[cfg(any(test, feature = "fuzzing"))]
    /// Panic on the first diagnostic instead of recording it.
    ///
    /// Enabled only in test and fuzzing builds to produce backtraces.
    pub panic_on_diagnostic: bool,
}

impl DecodeOptions {
    /// Unit budget for an encoding whose units are `width` bytes wide.
    pub(crate) fn max_units(&self, width: usize) -> Option<usize> {
        self.max_bytes.map(|bytes| bytes / width)
    }
}
