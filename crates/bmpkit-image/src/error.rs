/// An error type for the image module.
#[derive(thiserror::Error, Debug)]
pub enum ImageError {
    /// Error when the data length does not match the image shape.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when two images are expected to have the same size.
    #[error("Image size mismatch ({0}x{1} vs {2}x{3})")]
    InvalidImageSize(usize, usize, usize, usize),

    /// Error when the pixel coordinates are out of bounds.
    #[error("Pixel ({0}, {1}) is out of bounds for a {2}x{3} image")]
    PixelIndexOutOfBounds(usize, usize, usize, usize),

    /// Error when the pixel data cannot be casted to the requested type.
    #[error("Failed to cast the image data")]
    CastError,

    /// Error when a convolution kernel has an even or zero side length.
    #[error("Kernel side length must be odd, got {0}")]
    InvalidKernelSize(usize),

    /// Error when the kernel weights do not fill the declared square.
    #[error("Kernel weight length ({0}) does not match the kernel size ({1})")]
    InvalidKernelLength(usize, usize),

    /// Error when the number of histogram bins is invalid.
    #[error("Invalid number of histogram bins ({0})")]
    InvalidHistogramBins(usize),
}
