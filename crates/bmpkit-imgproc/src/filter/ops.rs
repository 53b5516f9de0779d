use bmpkit_image::{Image, ImageDtype, ImageError};
use rayon::prelude::*;

use super::Kernel;

/// Apply a convolution kernel to a grayscale image.
///
/// Computes `dst(x,y) = clamp(round(sum(src(x+j, y+i) * k(i, j))), 0, 255)`
/// reading only the pre-filter source, so no partially updated neighbor can
/// influence another output pixel.
///
/// Boundary policy: only pixels at least a kernel radius away from every
/// edge are recomputed; the border band keeps its original value. Images
/// smaller than the kernel pass through unchanged.
///
/// # Arguments
///
/// * `src` - The input grayscale image.
/// * `dst` - The output grayscale image, same size as the input.
/// * `kernel` - The odd-sized square kernel to apply.
///
/// # Errors
///
/// Returns an error if the sizes of `src` and `dst` do not match.
pub fn filter_2d_gray(
    src: &Image<u8, 1>,
    dst: &mut Image<u8, 1>,
    kernel: &Kernel,
) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    let width = src.width();
    let height = src.height();
    let radius = kernel.radius();

    // the border band retains its original value
    dst.as_slice_mut().copy_from_slice(src.as_slice());

    if width < kernel.size() || height < kernel.size() {
        return Ok(());
    }

    let src_data = src.as_slice();
    let dst_data = dst.as_slice_mut();

    for y in radius..height - radius {
        for x in radius..width - radius {
            let mut sum = 0.0f32;
            for i in 0..kernel.size() {
                for j in 0..kernel.size() {
                    let yy = y + i - radius;
                    let xx = x + j - radius;
                    sum += src_data[yy * width + xx] as f32 * kernel.weight(i, j);
                }
            }
            dst_data[y * width + x] = u8::from_f32(sum);
        }
    }

    Ok(())
}

/// Apply a convolution kernel to an RGB image, each channel independently.
///
/// Computes `dst(x,y,c) = clamp(round(sum(src(x+j, y+i, c) * k(i, j))), 0, 255)`
/// reading only the pre-filter source.
///
/// Boundary policy: every pixel is recomputed, including edges.
/// Contributions from out-of-bounds neighbors are dropped entirely (the
/// kernel weight is omitted, not zero-padded), which shrinks the effective
/// normalization near the edges.
///
/// # Arguments
///
/// * `src` - The input RGB image.
/// * `dst` - The output RGB image, same size as the input.
/// * `kernel` - The odd-sized square kernel to apply.
///
/// # Errors
///
/// Returns an error if the sizes of `src` and `dst` do not match.
pub fn filter_2d_rgb(
    src: &Image<u8, 3>,
    dst: &mut Image<u8, 3>,
    kernel: &Kernel,
) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    let width = src.width();
    let height = src.height();
    let radius = kernel.radius() as isize;
    let src_data = src.as_slice();

    dst.as_slice_mut()
        .par_chunks_exact_mut(3 * width)
        .enumerate()
        .for_each(|(y, dst_row)| {
            for x in 0..width {
                let mut sum = [0.0f32; 3];
                for i in -radius..=radius {
                    for j in -radius..=radius {
                        let yy = y as isize + i;
                        let xx = x as isize + j;
                        if yy < 0 || yy >= height as isize || xx < 0 || xx >= width as isize {
                            continue;
                        }
                        let weight = kernel.weight((i + radius) as usize, (j + radius) as usize);
                        let src_idx = (yy as usize * width + xx as usize) * 3;
                        sum[0] += src_data[src_idx] as f32 * weight;
                        sum[1] += src_data[src_idx + 1] as f32 * weight;
                        sum[2] += src_data[src_idx + 2] as f32 * weight;
                    }
                }
                dst_row[x * 3] = u8::from_f32(sum[0]);
                dst_row[x * 3 + 1] = u8::from_f32(sum[1]);
                dst_row[x * 3 + 2] = u8::from_f32(sum[2]);
            }
        });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::kernels;
    use bmpkit_image::{ImageError, ImageSize};

    #[test]
    fn gray_border_band_is_untouched() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 5,
            height: 5,
        };
        let data: Vec<u8> = (0..25).map(|v| (v * 10) as u8).collect();
        let image = Image::<u8, 1>::new(size, data.clone())?;
        let mut dst = Image::from_size_val(size, 0)?;

        filter_2d_gray(&image, &mut dst, &kernels::outline_kernel())?;

        for y in 0..5 {
            for x in 0..5 {
                if x == 0 || x == 4 || y == 0 || y == 4 {
                    assert_eq!(dst.as_slice()[y * 5 + x], data[y * 5 + x]);
                }
            }
        }
        // interior pixels are recomputed
        assert_ne!(dst.as_slice()[2 * 5 + 2], data[2 * 5 + 2]);

        Ok(())
    }

    #[test]
    fn gray_image_smaller_than_kernel_passes_through() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 2,
            height: 2,
        };
        let image = Image::<u8, 1>::new(size, vec![10, 20, 30, 40])?;
        let mut dst = Image::from_size_val(size, 0)?;

        filter_2d_gray(&image, &mut dst, &kernels::box_blur_kernel())?;
        assert_eq!(dst, image);

        Ok(())
    }

    #[test]
    fn gray_box_blur_interior() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 3,
            height: 3,
        };
        let image = Image::<u8, 1>::new(size, vec![9, 9, 9, 9, 18, 9, 9, 9, 9])?;
        let mut dst = Image::from_size_val(size, 0)?;

        filter_2d_gray(&image, &mut dst, &kernels::box_blur_kernel())?;
        // (8 * 9 + 18) / 9 = 10
        assert_eq!(dst.as_slice()[4], 10);

        Ok(())
    }

    #[test]
    fn rgb_drop_weight_brightens_uniform_edges() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 5,
            height: 5,
        };
        let image = Image::<u8, 3>::from_size_val(size, 90)?;
        let mut dst = Image::from_size_val(size, 0)?;

        filter_2d_rgb(&image, &mut dst, &kernels::box_blur_kernel())?;

        // interior: full 9-tap neighborhood, value unchanged
        assert_eq!(dst.get([2, 2, 0]), Some(&90));
        // corner: only 4 taps survive, 90 * 4/9 = 40
        assert_eq!(dst.get([0, 0, 0]), Some(&40));
        // edge: 6 taps survive, 90 * 6/9 = 60
        assert_eq!(dst.get([0, 2, 1]), Some(&60));

        // edges are recomputed with shrunk normalization, not copied through
        // and not renormalized over the surviving taps
        assert_ne!(dst.get([0, 0, 0]), dst.get([2, 2, 0]));

        Ok(())
    }

    #[test]
    fn rgb_every_pixel_changes_under_emboss() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 4,
            height: 4,
        };
        let data: Vec<u8> = (0..4 * 4 * 3).map(|v| (v * 5 % 251) as u8).collect();
        let image = Image::<u8, 3>::new(size, data.clone())?;
        let mut dst = Image::from_size_val(size, 0)?;

        filter_2d_rgb(&image, &mut dst, &kernels::emboss_kernel())?;
        assert_ne!(dst.as_slice(), image.as_slice());

        Ok(())
    }

    #[test]
    fn size_mismatch_is_rejected() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::from_size_val(
            ImageSize {
                width: 4,
                height: 4,
            },
            0,
        )?;
        let mut dst = Image::from_size_val(
            ImageSize {
                width: 5,
                height: 4,
            },
            0,
        )?;

        let res = filter_2d_gray(&image, &mut dst, &kernels::box_blur_kernel());
        assert!(matches!(res, Err(ImageError::InvalidImageSize(..))));

        Ok(())
    }
}
