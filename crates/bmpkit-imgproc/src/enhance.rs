use bmpkit_image::{Image, ImageError};

use crate::parallel;

/// Invert an image.
///
/// Computes `dst(x,y,c) = 255 - src(x,y,c)` for every channel value.
/// Applying the operation twice restores the original image.
///
/// # Arguments
///
/// * `src` - The input image of an arbitrary number of channels.
/// * `dst` - The output image, same size as the input.
///
/// # Errors
///
/// Returns an error if the sizes of `src` and `dst` do not match.
///
/// # Examples
///
/// ```
/// use bmpkit_image::{Image, ImageSize};
/// use bmpkit_imgproc::enhance::negative;
///
/// let image = Image::<u8, 1>::new(
///     ImageSize { width: 2, height: 1 },
///     vec![0, 200],
/// ).unwrap();
///
/// let mut inverted = Image::<u8, 1>::from_size_val(image.size(), 0).unwrap();
///
/// negative(&image, &mut inverted).unwrap();
/// assert_eq!(inverted.as_slice(), &[255, 55]);
/// ```
pub fn negative<const C: usize>(
    src: &Image<u8, C>,
    dst: &mut Image<u8, C>,
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
        *dst_pixel = 255 - src_pixel;
    });

    Ok(())
}

/// Adjust the brightness of an image.
///
/// Computes `dst(x,y,c) = clamp(src(x,y,c) + delta, 0, 255)` for every
/// channel value. The delta is an unbounded signed offset; extreme values
/// saturate at the range limits.
///
/// # Arguments
///
/// * `src` - The input image of an arbitrary number of channels.
/// * `delta` - The signed brightness offset to add to each channel value.
/// * `dst` - The output image, same size as the input.
///
/// # Errors
///
/// Returns an error if the sizes of `src` and `dst` do not match.
pub fn adjust_brightness<const C: usize>(
    src: &Image<u8, C>,
    delta: i32,
    dst: &mut Image<u8, C>,
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
        *dst_pixel = (src_pixel as i32).saturating_add(delta).clamp(0, 255) as u8;
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use bmpkit_image::{Image, ImageError, ImageSize};

    fn gradient_rgb() -> Result<Image<u8, 3>, ImageError> {
        Image::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            vec![0, 10, 20, 30, 40, 50, 200, 210, 220, 230, 240, 255],
        )
    }

    #[test]
    fn negative_is_self_inverse() -> Result<(), ImageError> {
        let image = gradient_rgb()?;
        let mut once = Image::from_size_val(image.size(), 0)?;
        let mut twice = Image::from_size_val(image.size(), 0)?;

        super::negative(&image, &mut once)?;
        super::negative(&once, &mut twice)?;

        assert_eq!(once.as_slice()[0], 255);
        assert_eq!(twice, image);

        Ok(())
    }

    #[test]
    fn brightness_zero_is_identity() -> Result<(), ImageError> {
        let image = gradient_rgb()?;
        let mut dst = Image::from_size_val(image.size(), 0)?;

        super::adjust_brightness(&image, 0, &mut dst)?;
        assert_eq!(dst, image);

        Ok(())
    }

    #[test]
    fn brightness_saturates() -> Result<(), ImageError> {
        let image = gradient_rgb()?;
        let mut dst = Image::from_size_val(image.size(), 0)?;

        super::adjust_brightness(&image, i32::MAX, &mut dst)?;
        assert!(dst.as_slice().iter().all(|&v| v == 255));

        super::adjust_brightness(&image, i32::MIN, &mut dst)?;
        assert!(dst.as_slice().iter().all(|&v| v == 0));

        super::adjust_brightness(&image, 40, &mut dst)?;
        assert_eq!(dst.as_slice()[0], 40);
        assert_eq!(dst.as_slice()[11], 255);

        Ok(())
    }

    #[test]
    fn size_mismatch_is_rejected() -> Result<(), ImageError> {
        let image = gradient_rgb()?;
        let mut dst = Image::from_size_val(
            ImageSize {
                width: 3,
                height: 2,
            },
            0,
        )?;

        let res = super::negative(&image, &mut dst);
        assert!(matches!(res, Err(ImageError::InvalidImageSize(..))));

        Ok(())
    }
}
