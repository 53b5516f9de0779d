//! Filter operations
//!
//! This module provides convolution filter operations for image processing.

/// Convolution kernel type
mod kernel;
pub use kernel::Kernel;

/// Fixed filter kernels
pub mod kernels;

/// Filter operations
mod ops;
pub use ops::*;
