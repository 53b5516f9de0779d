use bmpkit_image::{Image, ImageError};

use crate::parallel;

/// Convert an RGB image to grayscale using the unweighted channel mean:
///
/// gray = (R + G + B) / 3
///
/// The division truncates, matching integer arithmetic, and the result is
/// replicated to all three output channels. This is a simple average luma,
/// not a perceptually weighted one.
///
/// # Arguments
///
/// * `src` - The input RGB image.
/// * `dst` - The output RGB image holding the replicated gray value.
///
/// # Errors
///
/// Returns an error if the sizes of `src` and `dst` do not match.
///
/// # Example
///
/// ```
/// use bmpkit_image::{Image, ImageSize};
/// use bmpkit_imgproc::color::gray_from_rgb_mean;
///
/// let image = Image::<u8, 3>::new(
///     ImageSize { width: 1, height: 1 },
///     vec![10, 20, 40],
/// ).unwrap();
///
/// let mut gray = Image::<u8, 3>::from_size_val(image.size(), 0).unwrap();
///
/// gray_from_rgb_mean(&image, &mut gray).unwrap();
/// assert_eq!(gray.as_slice(), &[23, 23, 23]);
/// ```
pub fn gray_from_rgb_mean(src: &Image<u8, 3>, dst: &mut Image<u8, 3>) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        let r = src_pixel[0] as u16;
        let g = src_pixel[1] as u16;
        let b = src_pixel[2] as u16;
        let gray = ((r + g + b) / 3) as u8;
        dst_pixel[0] = gray;
        dst_pixel[1] = gray;
        dst_pixel[2] = gray;
    });

    Ok(())
}
