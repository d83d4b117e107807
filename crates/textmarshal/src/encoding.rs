use core::fmt;

use crate::{DecodeOptions, HostString, Outcome, latin1, utf8, utf16, utf32};

/// A guest-side text encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Encoding {
    /// UTF-8, 1-byte units, no alignment requirement.
    Utf8,
    /// UTF-16LE, 2-byte units, 2-byte aligned.
    Utf16,
    /// UTF-32LE, 4-byte units, 4-byte aligned.
    Utf32,
    /// One byte per host code unit, no alignment requirement.
    Latin1,
}

impl Encoding {
    /// Width of one code unit in bytes.
    #[must_use]
    pub const fn unit_width(self) -> usize {
        match self {
            Encoding::Utf8 | Encoding::Latin1 => 1,
            Encoding::Utf16 => 2,
            Encoding::Utf32 => 4,
        }
    }

    /// Required alignment of guest offsets in bytes.
    #[must_use]
    pub const fn alignment(self) -> usize {
        self.unit_width()
    }

    /// Conventional label.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Encoding::Utf8 => "utf-8",
            Encoding::Utf16 => "utf-16le",
            Encoding::Utf32 => "utf-32le",
            Encoding::Latin1 => "latin1",
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A codec between guest memory and host strings, for one encoding.
///
/// Implemented by the marker types [`Utf8`], [`Utf16`], [`Utf32`] and
/// [`Latin1`] so that generic callers can pick the encoding statically.
pub trait Codec {
    /// The encoding this codec handles.
    const ENCODING: Encoding;

    /// Decodes the run at `offset`.
    fn decode(buf: &[u8], offset: usize, options: &DecodeOptions) -> Outcome<HostString>;

    /// Encodes `src` at `offset` and NUL-terminates it if the budget allows.
    ///
    /// `max_bytes_to_write` includes the terminator. Returns the number of
    /// bytes written, excluding the terminator.
    fn encode(
        src: &[u16],
        buf: &mut [u8],
        offset: usize,
        max_bytes_to_write: Option<usize>,
    ) -> Outcome<usize>;

    /// Number of bytes `encode` needs for `src`, excluding the terminator.
    fn encoded_length(src: &[u16]) -> usize;
}

macro_rules! codec {
    ($(#[$doc:meta])* $name:ident, $variant:ident, $module:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
        pub struct $name;

        impl Codec for $name {
            const ENCODING: Encoding = Encoding::$variant;

            #[inline]
            fn decode(buf: &[u8], offset: usize, options: &DecodeOptions) -> Outcome<HostString> {
                $module::decode(buf, offset, options)
            }

            #[inline]
            fn encode(
                src: &[u16],
                buf: &mut [u8],
                offset: usize,
                max_bytes_to_write: Option<usize>,
            ) -> Outcome<usize> {
                $module::encode(src, buf, offset, max_bytes_to_write)
            }

            #[inline]
            fn encoded_length(src: &[u16]) -> usize {
                $module::encoded_length(src)
            }
        }
    };
}

codec!(
    /// UTF-8 codec.
    Utf8, Utf8, utf8
);
codec!(
    /// UTF-16LE codec.
    Utf16, Utf16, utf16
);
codec!(
    /// UTF-32LE codec.
    Utf32, Utf32, utf32
);
codec!(
    /// Legacy single-byte codec.
    Latin1, Latin1, latin1
);

/// Decodes the run at `offset` in `buf` as `encoding`.
pub fn decode(
    encoding: Encoding,
    buf: &[u8],
    offset: usize,
    options: &DecodeOptions,
) -> Outcome<HostString> {
    match encoding {
        Encoding::Utf8 => Utf8::decode(buf, offset, options),
        Encoding::Utf16 => Utf16::decode(buf, offset, options),
        Encoding::Utf32 => Utf32::decode(buf, offset, options),
        Encoding::Latin1 => Latin1::decode(buf, offset, options),
    }
}

/// Encodes `src` as `encoding` at `offset` in `buf`.
///
/// `max_bytes_to_write` includes the terminator's width. A budget smaller
/// than one unit writes nothing. `None` means "up to the end of `buf`"; it
/// exists for callers ported from unbounded APIs and should be avoided in new
/// code.
pub fn encode(
    encoding: Encoding,
    src: &[u16],
    buf: &mut [u8],
    offset: usize,
    max_bytes_to_write: Option<usize>,
) -> Outcome<usize> {
    match encoding {
        Encoding::Utf8 => Utf8::encode(src, buf, offset, max_bytes_to_write),
        Encoding::Utf16 => Utf16::encode(src, buf, offset, max_bytes_to_write),
        Encoding::Utf32 => Utf32::encode(src, buf, offset, max_bytes_to_write),
        Encoding::Latin1 => Latin1::encode(src, buf, offset, max_bytes_to_write),
    }
}

/// Number of bytes needed to encode `src` as `encoding`, terminator excluded.
#[must_use]
pub fn encoded_length(encoding: Encoding, src: &[u16]) -> usize {
    match encoding {
        Encoding::Utf8 => Utf8::encoded_length(src),
        Encoding::Utf16 => Utf16::encoded_length(src),
        Encoding::Utf32 => Utf32::encoded_length(src),
        Encoding::Latin1 => Latin1::encoded_length(src),
    }
}
