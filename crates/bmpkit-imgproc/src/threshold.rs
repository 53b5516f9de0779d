use bmpkit_image::{Image, ImageError};

use crate::parallel;

/// Apply a binary threshold to a grayscale image.
///
/// Computes `dst(x,y) = 255` where `src(x,y) >= threshold` and `0`
/// elsewhere. The threshold is an unbounded signed value with no range
/// enforcement: a threshold of `0` or below maps every pixel to 255, one
/// above 255 maps every pixel to 0. The operation is idempotent.
///
/// # Arguments
///
/// * `src` - The input grayscale image.
/// * `dst` - The output grayscale image, same size as the input.
/// * `threshold` - The threshold value.
///
/// # Errors
///
/// Returns an error if the sizes of `src` and `dst` do not match.
///
/// # Examples
///
/// ```
/// use bmpkit_image::{Image, ImageSize};
/// use bmpkit_imgproc::threshold::threshold_binary;
///
/// let data = vec![100u8, 200, 50, 150, 200, 250];
/// let image = Image::<_, 1>::new(ImageSize { width: 2, height: 3 }, data).unwrap();
///
/// let mut thresholded = Image::<_, 1>::from_size_val(image.size(), 0).unwrap();
///
/// threshold_binary(&image, &mut thresholded, 150).unwrap();
/// assert_eq!(thresholded.as_slice(), &[0, 255, 0, 255, 255, 255]);
/// ```
pub fn threshold_binary(
    src: &Image<u8, 1>,
    dst: &mut Image<u8, 1>,
    threshold: i32,
) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    parallel::par_iter_rows_val(src, dst, |&src_pixel, dst_pixel| {
        *dst_pixel = if src_pixel as i32 >= threshold { 255 } else { 0 };
    });

    Ok(())
}
