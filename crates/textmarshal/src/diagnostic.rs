use thiserror::Error;

/// A recoverable anomaly observed while decoding or encoding.
///
/// Diagnostics never abort a call: the codec keeps going with a best-effort
/// interpretation and reports the first anomaly alongside the result.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagnostic {
    /// A UTF-8 lead byte matched none of the `0xxxxxxx`, `110xxxxx`,
    /// `1110xxxx` or `11110xxx` patterns. It was read as a 4-byte lead.
    #[error("invalid UTF-8 lead byte 0x{byte:02X} at offset {offset}")]
    InvalidLeadByte {
        /// The offending byte.
        byte: u8,
        /// Absolute byte offset in guest memory.
        offset: usize,
    },
    /// A multi-byte UTF-8 sequence ran into the end of the delimited run.
    #[error("UTF-8 sequence starting at offset {offset} is cut short by the end of the run")]
    TruncatedSequence {
        /// Absolute byte offset of the lead byte.
        offset: usize,
    },
    /// A decoded scalar value above `U+10FFFF`. It was replaced by U+FFFD.
    #[error("code point 0x{code_point:X} at offset {offset} is outside the Unicode range")]
    OutOfRangeCodePoint {
        /// The offending value.
        code_point: u32,
        /// Absolute byte offset of the unit or lead byte in guest memory.
        offset: usize,
    },
    /// A source code point above `U+10FFFF` handed to an encoder. It was
    /// still written using the 4-byte form.
    #[error("source code point 0x{code_point:X} at index {index} is outside the Unicode range")]
    OutOfRangeSource {
        /// The offending value.
        code_point: u32,
        /// Index in the source code point sequence.
        index: usize,
    },
    /// A host code unit above `0xFF` written in Latin-1 mode. Only its low
    /// byte was stored.
    #[error("code unit 0x{unit:04X} at index {index} does not fit in one byte")]
    NonLatin1Unit {
        /// The offending unit.
        unit: u16,
        /// Index in the host string.
        index: usize,
    },
}

/// The best-effort result of a codec call plus what went wrong along the way.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct Outcome<T> {
    /// Decoded string or number of bytes written (terminator excluded).
    pub value: T,
    /// First anomaly observed, if any.
    pub diagnostic: Option<Diagnostic>,
    /// Total number of anomalies observed.
    pub diagnostic_count: usize,
}

impl<T> Outcome<T> {
    /// An outcome without anomalies.
    pub fn clean(value: T) -> Self {
        Self {
            value,
            diagnostic: None,
            diagnostic_count: 0,
        }
    }

    /// `true` when no anomaly was observed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.diagnostic.is_none()
    }

    /// Discards the diagnostics.
    pub fn into_value(self) -> T {
        self.value
    }

    /// Maps the value, keeping the diagnostics.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        Outcome {
            value: f(self.value),
            diagnostic: self.diagnostic,
            diagnostic_count: self.diagnostic_count,
        }
    }
}

/// Collects diagnostics for a single call and forwards them to `log`.
#[derive(Debug, Default)]
pub(crate) struct Reporter {
    first: Option<Diagnostic>,
    count: usize,
    #[cfg(any(test, feature = "fuzzing"))]
    panic_on_diagnostic: bool,
}

impl Reporter {
    #[cfg(any(test, feature = "fuzzing"))]
    pub(crate) fn new(options: &crate::DecodeOptions) -> Self {
        Self {
            panic_on_diagnostic: options.panic_on_diagnostic,
            ..Self::default()
        }
    }

    #[cfg(not(any(test, feature = "fuzzing")))]
    pub(crate) fn new(_options: &crate::DecodeOptions) -> Self {
        Self::default()
    }

    pub(crate) fn report(&mut self, diagnostic: Diagnostic) {
        #[cfg(any(test, feature = "fuzzing"))]
        assert!(!self.panic_on_diagnostic, "{diagnostic}");

        if self.first.is_none() {
            log::warn!(target: "textmarshal", "{diagnostic}");
            self.first = Some(diagnostic);
        } else {
            log::debug!(target: "textmarshal", "{diagnostic}");
        }
        self.count += 1;
    }

    pub(crate) fn finish<T>(self, value: T) -> Outcome<T> {
        Outcome {
            value,
            diagnostic: self.first,
            diagnostic_count: self.count,
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn reporter_keeps_first_and_counts_all() {
        let mut r = Reporter::default();
        r.report(Diagnostic::TruncatedSequence { offset: 3 });
        r.report(Diagnostic::InvalidLeadByte { byte: 0xFF, offset: 7 });
        let out = r.finish(());
        assert_eq!(out.diagnostic, Some(Diagnostic::TruncatedSequence { offset: 3 }));
        assert_eq!(out.diagnostic_count, 2);
        assert!(!out.is_clean());
    }

    #[test]
    fn messages_are_readable() {
        let d = Diagnostic::InvalidLeadByte { byte: 0x9F, offset: 12 };
        assert_eq!(d.to_string(), "invalid UTF-8 lead byte 0x9F at offset 12");
        let d = Diagnostic::NonLatin1Unit { unit: 0x20AC, index: 1 };
        assert_eq!(d.to_string(), "code unit 0x20AC at index 1 does not fit in one byte");
        let d = Diagnostic::OutOfRangeCodePoint { code_point: 0x11_0000, offset: 8 };
        assert_eq!(d.to_string(), "code point 0x110000 at offset 8 is outside the Unicode range");
        let d = Diagnostic::OutOfRangeSource { code_point: 0x11_0000, index: 2 };
        assert_eq!(
            d.to_string(),
            "source code point 0x110000 at index 2 is outside the Unicode range"
        );
    }

    #[test]
    #[should_panic(expected = "outside the Unicode range")]
    fn panic_switch_turns_diagnostics_into_panics() {
        let mut r = Reporter::new(&crate::DecodeOptions {
            panic_on_diagnostic: true,
            ..Default::default()
        });
        r.report(Diagnostic::OutOfRangeCodePoint {
            code_point: 0x11_0000,
            offset: 0,
        });
    }
}
