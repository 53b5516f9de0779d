#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for I/O operations.
///
/// Defines [`IoError`] variants for file access and format violations.
pub mod error;

/// BMP image encoding and decoding.
///
/// Byte-exact codecs for uncompressed 8-bit indexed and 24-bit true-color
/// BMP files, round-tripping headers and palettes verbatim.
pub mod bmp;

pub use crate::error::IoError;
