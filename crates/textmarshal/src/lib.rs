//! Bounded string marshalling between a flat guest memory buffer and host
//! strings.
//!
//! A guest (for example a WebAssembly module) stores text in its linear memory
//! as NUL-terminated or length-bounded runs of UTF-8, UTF-16LE, UTF-32LE or
//! Latin-1 units. The host represents text as a sequence of 16-bit code units
//! ([`HostString`]). This crate converts between the two without ever reading
//! or writing outside the region the caller declares.
//!
//! ```rust
//! use textmarshal::{DecodeOptions, Encoding, HostString, decode, encode};
//!
//! let mut memory = [0u8; 16];
//! let s = HostString::from("A€𝄞");
//!
//! let written = encode(Encoding::Utf8, &s, &mut memory, 0, Some(16)).value;
//! assert_eq!(written, 8);
//! assert_eq!(&memory[..9], b"A\xE2\x82\xAC\xF0\x9D\x84\x9E\0");
//!
//! let back = decode(Encoding::Utf8, &memory, 0, &DecodeOptions::default());
//! assert!(back.is_clean());
//! assert_eq!(back.value, s);
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod accel;
pub mod code_point;
mod diagnostic;
mod encoding;
mod host_string;
pub mod latin1;
mod memory;
mod options;
mod terminus;
pub mod utf16;
pub mod utf32;
pub mod utf8;

#[cfg(test)]
mod tests;

pub use accel::{DecodePath, DecoderSet, SHORT_RUN_THRESHOLD, TextDecoder};
pub use diagnostic::{Diagnostic, Outcome};
pub use encoding::{Codec, Encoding, Latin1, Utf8, Utf16, Utf32, decode, encode, encoded_length};
pub use host_string::HostString;
pub use options::DecodeOptions;
pub use terminus::scan_terminus;
