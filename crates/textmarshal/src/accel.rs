//! Accelerated bulk decoders and the rule for when to use them.
//!
//! Short runs decode faster through the per-unit loops in [`crate::utf8`] and
//! [`crate::utf16`] because setting up a bulk decode costs more than it saves.
//! Longer runs go through a [`TextDecoder`] taken from the process-wide
//! [`DecoderSet`], which is built on first use and only read afterwards.

use bstr::ByteSlice;

use crate::{Encoding, HostString};

/// Runs of at most this many units are always decoded manually.
pub const SHORT_RUN_THRESHOLD: usize = 16;

/// Which decode loop handles a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodePath {
    /// Per-unit decode loop.
    Manual,
    /// Bulk decode through a [`TextDecoder`].
    Accelerated,
}

impl DecodePath {
    /// Picks the path for a run of `run_units` units.
    ///
    /// ```rust
    /// use textmarshal::DecodePath;
    ///
    /// assert_eq!(DecodePath::select(16, true, false), DecodePath::Manual);
    /// assert_eq!(DecodePath::select(17, true, false), DecodePath::Accelerated);
    /// assert_eq!(DecodePath::select(17, false, false), DecodePath::Manual);
    /// assert_eq!(DecodePath::select(17, true, true), DecodePath::Manual);
    /// ```
    #[must_use]
    pub const fn select(run_units: usize, accelerator_available: bool, force_manual: bool) -> Self {
        if run_units > SHORT_RUN_THRESHOLD && accelerator_available && !force_manual {
            DecodePath::Accelerated
        } else {
            DecodePath::Manual
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Utf8,
    Utf16Le,
}

/// An immutable bulk decoder for one encoding.
///
/// Invalid input is replaced rather than reported, the way a platform
/// `TextDecoder` in non-fatal mode behaves. On well-formed input it produces
/// exactly what the manual loop produces.
#[derive(Debug, Clone)]
pub struct TextDecoder {
    kind: Kind,
    replacement: u16,
}

impl TextDecoder {
    /// A lenient UTF-8 decoder that substitutes U+FFFD.
    #[must_use]
    pub const fn utf8() -> Self {
        Self {
            kind: Kind::Utf8,
            replacement: 0xFFFD,
        }
    }

    /// A UTF-16LE decoder. Every unit is copied, so nothing is ever replaced.
    #[must_use]
    pub const fn utf16le() -> Self {
        Self {
            kind: Kind::Utf16Le,
            replacement: 0xFFFD,
        }
    }

    /// Uses `unit` instead of U+FFFD for invalid UTF-8 sequences.
    #[must_use]
    pub const fn with_replacement(mut self, unit: u16) -> Self {
        self.replacement = unit;
        self
    }

    /// The encoding this decoder reads.
    #[must_use]
    pub const fn encoding(&self) -> Encoding {
        match self.kind {
            Kind::Utf8 => Encoding::Utf8,
            Kind::Utf16Le => Encoding::Utf16,
        }
    }

    /// Decodes a whole delimited run.
    ///
    /// For UTF-16LE an odd trailing byte is ignored.
    #[must_use]
    pub fn decode(&self, run: &[u8]) -> HostString {
        match self.kind {
            Kind::Utf8 => {
                let mut out = HostString::with_capacity(run.len());
                let mut pair = [0u16; 2];
                for chunk in run.utf8_chunks() {
                    for ch in chunk.valid().chars() {
                        out.extend_from_units(ch.encode_utf16(&mut pair));
                    }
                    if !chunk.invalid().is_empty() {
                        out.push_unit(self.replacement);
                    }
                }
                out
            }
            Kind::Utf16Le => run
                .chunks_exact(2)
                .map(|unit| u16::from_le_bytes([unit[0], unit[1]]))
                .collect(),
        }
    }
}

/// The process-wide set of accelerated decoders.
#[derive(Debug)]
pub struct DecoderSet {
    /// Decoder for UTF-8 runs.
    pub utf8: TextDecoder,
    /// Decoder for UTF-16LE runs.
    pub utf16: TextDecoder,
}

#[cfg(feature = "accelerated")]
static DECODERS: once_cell::race::OnceBox<DecoderSet> = once_cell::race::OnceBox::new();

impl DecoderSet {
    #[cfg(feature = "accelerated")]
    fn build() -> Self {
        log::debug!(target: "textmarshal", "building accelerated decoders");
        Self {
            utf8: TextDecoder::utf8(),
            utf16: TextDecoder::utf16le(),
        }
    }

    /// Returns the shared decoder set, building it on first use.
    ///
    /// Concurrent first calls may each build a set, but only one is ever
    /// published and every caller observes that one. Returns `None` when the
    /// `accelerated` feature is disabled.
    #[must_use]
    pub fn get() -> Option<&'static DecoderSet> {
        #[cfg(feature = "accelerated")]
        {
            Some(DECODERS.get_or_init(|| alloc::boxed::Box::new(Self::build())))
        }
        #[cfg(not(feature = "accelerated"))]
        {
            None
        }
    }
}
