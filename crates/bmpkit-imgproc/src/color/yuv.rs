use bmpkit_image::{Image, ImageError};

use crate::parallel;

/// Convert an RGB image to a YUV image.
///
/// The input is assumed to have 3 channels in the order R, G, B in the
/// range [0, 255]. The forward transform is BT.601-style and is not
/// clamped:
///
/// * Y: luminance, in [0, 255] for in-range input.
/// * U: chrominance-blue, in roughly [-111.2, +111.2].
/// * V: chrominance-red, in roughly [-156.8, +156.8].
///
/// Precondition: the input and output images must have the same size.
///
/// # Example
///
/// ```
/// use bmpkit_image::{Image, ImageSize};
/// use bmpkit_imgproc::color::yuv_from_rgb;
///
/// let image = Image::<f32, 3>::new(
///     ImageSize {
///        width: 4,
///        height: 5,
///     },
///     vec![0f32; 4 * 5 * 3],
/// )
/// .unwrap();
///
/// let mut yuv = Image::from_size_val(image.size(), 0.0).unwrap();
///
/// yuv_from_rgb(&image, &mut yuv).unwrap();
///
/// assert_eq!(yuv.num_channels(), 3);
/// assert_eq!(yuv.size().width, 4);
/// assert_eq!(yuv.size().height, 5);
/// ```
pub fn yuv_from_rgb(src: &Image<f32, 3>, dst: &mut Image<f32, 3>) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        let r = src_pixel[0];
        let g = src_pixel[1];
        let b = src_pixel[2];

        dst_pixel[0] = 0.299 * r + 0.587 * g + 0.114 * b;
        dst_pixel[1] = -0.14713 * r - 0.28886 * g + 0.436 * b;
        dst_pixel[2] = 0.615 * r - 0.51499 * g - 0.10001 * b;
    });

    Ok(())
}

/// Convert a YUV image to an RGB image.
///
/// The input is assumed to have 3 channels in the order Y, U, V with Y in
/// the range [0, 255]. The inverse transform is not clamped; callers
/// converting back to 8-bit data are expected to round and clamp the
/// result to [0, 255] themselves.
///
/// Precondition: the input and output images must have the same size.
pub fn rgb_from_yuv(src: &Image<f32, 3>, dst: &mut Image<f32, 3>) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        let y = src_pixel[0];
        let u = src_pixel[1];
        let v = src_pixel[2];

        dst_pixel[0] = y + 1.13983 * v;
        dst_pixel[1] = y - 0.39465 * u - 0.58060 * v;
        dst_pixel[2] = y + 2.03211 * u;
    });

    Ok(())
}
