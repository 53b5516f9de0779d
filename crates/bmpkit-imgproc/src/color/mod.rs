//! Color transformations
//!
//! This module provides color space conversions for image processing.

/// Grayscale conversions
mod gray;
pub use gray::*;

/// YUV conversions
mod yuv;
pub use yuv::*;
