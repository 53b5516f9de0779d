#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use bmpkit_image as image;

#[doc(inline)]
pub use bmpkit_imgproc as imgproc;

#[doc(inline)]
pub use bmpkit_io as io;

/// In-place operation dispatch over loaded BMP containers.
pub mod ops;
