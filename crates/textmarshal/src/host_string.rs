use alloc::{string::String, vec::Vec};
use core::{char::DecodeUtf16Error, fmt, ops::Deref};

use crate::code_point::{CodePoints, split_surrogates};

/// A host-side string: an ordered sequence of 16-bit code units.
///
/// Like a JavaScript string, it may hold surrogate pairs and also lone
/// surrogates. Nothing here validates; conversion to a Rust [`String`] is
/// either lossy or fallible.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct HostString {
    units: Vec<u16>,
}

impl HostString {
    /// Creates an empty string.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty string with room for `units` code units.
    #[must_use]
    pub fn with_capacity(units: usize) -> Self {
        Self {
            units: Vec::with_capacity(units),
        }
    }

    /// Wraps existing code units without checking them.
    #[must_use]
    pub fn from_units(units: Vec<u16>) -> Self {
        Self { units }
    }

    /// Appends a single code unit.
    #[inline]
    pub fn push_unit(&mut self, unit: u16) {
        self.units.push(unit);
    }

    /// Appends a code point, splitting it into a surrogate pair when it lies
    /// above `0xFFFF`.
    ///
    /// The caller is responsible for keeping `cp` within `0..=0x10FFFF`.
    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    pub fn push_code_point(&mut self, cp: u32) {
        if cp > 0xFFFF {
            let (high, low) = split_surrogates(cp);
            self.units.extend_from_slice(&[high, low]);
        } else {
            self.units.push(cp as u16);
        }
    }

    /// Appends a run of code units verbatim.
    pub fn extend_from_units(&mut self, units: &[u16]) {
        self.units.extend_from_slice(units);
    }

    /// Iterates over code points, combining surrogate pairs.
    #[must_use]
    pub fn code_points(&self) -> CodePoints<'_> {
        CodePoints::new(&self.units)
    }

    /// The code units.
    #[must_use]
    pub fn as_units(&self) -> &[u16] {
        &self.units
    }

    /// Consumes the string, returning its code units.
    #[must_use]
    pub fn into_units(self) -> Vec<u16> {
        self.units
    }

    /// Converts to a Rust string, replacing lone surrogates with U+FFFD.
    #[must_use]
    pub fn to_string_lossy(&self) -> String {
        char::decode_utf16(self.units.iter().copied())
            .map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER))
            .collect()
    }

    /// Converts to a Rust string.
    ///
    /// # Errors
    ///
    /// Fails on the first lone surrogate.
    pub fn to_string_strict(&self) -> Result<String, DecodeUtf16Error> {
        char::decode_utf16(self.units.iter().copied()).collect()
    }
}

impl Deref for HostString {
    type Target = [u16];

    fn deref(&self) -> &[u16] {
        &self.units
    }
}

impl AsRef<[u16]> for HostString {
    fn as_ref(&self) -> &[u16] {
        &self.units
    }
}

impl From<&str> for HostString {
    fn from(s: &str) -> Self {
        Self {
            units: s.encode_utf16().collect(),
        }
    }
}

impl From<Vec<u16>> for HostString {
    fn from(units: Vec<u16>) -> Self {
        Self { units }
    }
}

impl FromIterator<u16> for HostString {
    fn from_iter<I: IntoIterator<Item = u16>>(iter: I) -> Self {
        Self {
            units: iter.into_iter().collect(),
        }
    }
}

impl PartialEq<str> for HostString {
    fn eq(&self, other: &str) -> bool {
        self.units.iter().copied().eq(other.encode_utf16())
    }
}

impl PartialEq<&str> for HostString {
    fn eq(&self, other: &&str) -> bool {
        *self == **other
    }
}

impl fmt::Debug for HostString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.to_string_lossy(), f)
    }
}

impl fmt::Display for HostString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}
