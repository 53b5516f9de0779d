use bmpkit_image::ImageError;

/// An odd-sized square convolution kernel with real weights.
///
/// The kernel center sits at `(size / 2, size / 2)`.
///
/// # Examples
///
/// ```
/// use bmpkit_imgproc::filter::Kernel;
///
/// let kernel = Kernel::new(3, vec![0.0, 1.0, 0.0, 1.0, -4.0, 1.0, 0.0, 1.0, 0.0]).unwrap();
/// assert_eq!(kernel.size(), 3);
/// assert_eq!(kernel.radius(), 1);
/// assert_eq!(kernel.weight(1, 1), -4.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel {
    size: usize,
    weights: Vec<f32>,
}

impl Kernel {
    /// Create a new kernel from a side length and row-major weights.
    ///
    /// # Errors
    ///
    /// Returns an error if the side length is zero or even, or if the
    /// weights do not fill the declared square.
    pub fn new(size: usize, weights: Vec<f32>) -> Result<Self, ImageError> {
        if size == 0 || size % 2 == 0 {
            return Err(ImageError::InvalidKernelSize(size));
        }
        if weights.len() != size * size {
            return Err(ImageError::InvalidKernelLength(weights.len(), size));
        }
        Ok(Self { size, weights })
    }

    // internal constructor for the fixed kernels, which are valid by construction
    pub(crate) fn from_weights(size: usize, weights: &[f32]) -> Self {
        debug_assert!(size % 2 == 1 && weights.len() == size * size);
        Self {
            size,
            weights: weights.to_vec(),
        }
    }

    /// Get the side length of the kernel.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Get the radius of the kernel, `(size - 1) / 2`.
    pub fn radius(&self) -> usize {
        self.size / 2
    }

    /// Get the weight at kernel row `i` and column `j`.
    pub fn weight(&self, i: usize, j: usize) -> f32 {
        self.weights[i * self.size + j]
    }
}
