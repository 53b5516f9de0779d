/// An error type for the io module.
#[derive(thiserror::Error, Debug)]
pub enum IoError {
    /// Error when the file does not exist.
    #[error("File does not exist: {0}")]
    FileDoesNotExist(std::path::PathBuf),

    /// Error to open, read or write the file.
    #[error("Failed to manipulate the file. {0}")]
    FileError(#[from] std::io::Error),

    /// Error when the file does not start with the BMP signature.
    #[error("Not a BMP file (signature 0x{0:04x})")]
    InvalidSignature(u16),

    /// Error when the declared bit depth does not match the codec invoked.
    #[error("Unsupported bit depth: expected {0}, found {1}")]
    UnsupportedBitDepth(u16, u16),

    /// Error when a file section ends before its declared length.
    #[error("Truncated BMP file: short read in the {0} section")]
    TruncatedSection(&'static str),

    /// Error when the header declares degenerate image dimensions.
    #[error("Invalid image dimensions {0}x{1}")]
    InvalidDimensions(i32, i32),

    /// Error to create the image from the decoded pixel data.
    #[error("Failed to create image. {0}")]
    ImageCreationError(#[from] bmpkit_image::ImageError),
}
