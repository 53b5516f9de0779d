use bmpkit_image::{Image, ImageDtype, ImageError};
use rayon::prelude::*;

use crate::color;
use crate::parallel;

/// Compute the pixel intensity histogram of an image.
///
/// NOTE: this is limited to 8-bit 1-channel images.
///
/// # Arguments
///
/// * `src` - The input image to compute the histogram.
/// * `hist` - The output histogram, accumulated into.
/// * `num_bins` - The number of bins to use for the histogram.
///
/// # Errors
///
/// Returns an error if the number of bins is invalid.
///
/// # Example
///
/// ```
/// use bmpkit_image::{Image, ImageSize};
/// use bmpkit_imgproc::histogram::compute_histogram;
///
/// let image = Image::<u8, 1>::new(
///   ImageSize {
///     width: 3,
///     height: 3,
///   },
///   vec![0, 2, 4, 128, 130, 132, 254, 255, 255],
/// ).unwrap();
///
/// let mut histogram = vec![0; 3];
///
/// compute_histogram(&image, &mut histogram, 3).unwrap();
/// assert_eq!(histogram, vec![3, 3, 3]);
/// ```
pub fn compute_histogram(
    src: &Image<u8, 1>,
    hist: &mut [usize],
    num_bins: usize,
) -> Result<(), ImageError> {
    if num_bins == 0 || num_bins > 256 || hist.len() != num_bins {
        return Err(ImageError::InvalidHistogramBins(num_bins));
    }

    let counts = src
        .as_slice()
        .par_chunks(4096)
        .fold(
            || vec![0usize; num_bins],
            |mut local, chunk| {
                for &px in chunk {
                    local[(px as usize * num_bins) >> 8] += 1;
                }
                local
            },
        )
        .reduce(
            || vec![0usize; num_bins],
            |mut a, b| {
                for (acc, val) in a.iter_mut().zip(b.iter()) {
                    *acc += val;
                }
                a
            },
        );

    for (acc, val) in hist.iter_mut().zip(counts.iter()) {
        *acc += val;
    }

    Ok(())
}

/// Build the histogram equalization lookup table from a 256-bin histogram.
///
/// Computes the prefix-sum CDF, finds `cdf_min` (the first nonzero
/// cumulative value) and maps each intensity v to
/// `round((cdf[v] - cdf_min) / (num_pixels - cdf_min) * 255)`.
///
/// A flat image puts every pixel in one bin, making `cdf_min == num_pixels`
/// and the denominator zero. The table then degenerates to the identity
/// mapping, so equalizing a flat image is a deterministic no-op.
pub fn equalize_lut(hist: &[usize; 256], num_pixels: usize) -> [u8; 256] {
    let mut cdf = [0usize; 256];
    let mut running = 0usize;
    for (bin, &count) in hist.iter().enumerate() {
        running += count;
        cdf[bin] = running;
    }

    let cdf_min = cdf.iter().copied().find(|&v| v != 0).unwrap_or(0);

    let mut lut = [0u8; 256];
    if cdf_min >= num_pixels {
        // flat image: identity mapping
        for (v, out) in lut.iter_mut().enumerate() {
            *out = v as u8;
        }
        return lut;
    }

    let denom = (num_pixels - cdf_min) as f32;
    for (v, out) in lut.iter_mut().enumerate() {
        // bins below cdf_min hold no pixels; saturate them to zero
        let num = cdf[v].saturating_sub(cdf_min) as f32;
        *out = (num / denom * 255.0).round() as u8;
    }
    lut
}

/// Equalize the histogram of a grayscale image.
///
/// Builds a 256-bin histogram over the raw byte values, derives the
/// equalization lookup table (see [`equalize_lut`]) and remaps every pixel
/// through it.
///
/// # Errors
///
/// Returns an error if the sizes of `src` and `dst` do not match.
pub fn equalize_histogram(src: &Image<u8, 1>, dst: &mut Image<u8, 1>) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    let mut hist = [0usize; 256];
    compute_histogram(src, &mut hist, 256)?;

    let lut = equalize_lut(&hist, src.width() * src.height());

    parallel::par_iter_rows_val(src, dst, |&src_pixel, dst_pixel| {
        *dst_pixel = lut[src_pixel as usize];
    });

    Ok(())
}

/// Equalize the histogram of an RGB image through its luma channel.
///
/// The image is converted to YUV (see [`color::yuv_from_rgb`]); the
/// histogram is built over the clamped, rounded luma values; the
/// equalization table replaces each pixel's Y while its original U and V
/// are retained, and the result is transformed back to RGB, rounded and
/// clamped to [0, 255]. The whole-image YUV grid is transient and dropped
/// on return.
///
/// # Errors
///
/// Returns an error if the sizes of `src` and `dst` do not match.
pub fn equalize_histogram_rgb(src: &Image<u8, 3>, dst: &mut Image<u8, 3>) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    let src_f32: Image<f32, 3> = src.cast()?;
    let mut yuv = Image::from_size_val(src.size(), 0.0f32)?;
    color::yuv_from_rgb(&src_f32, &mut yuv)?;

    let mut hist = [0usize; 256];
    for yuv_pixel in yuv.as_slice().chunks_exact(3) {
        hist[luma_bin(yuv_pixel[0])] += 1;
    }

    let lut = equalize_lut(&hist, src.width() * src.height());

    // swap in the equalized luma, keeping each pixel's original chroma
    for yuv_pixel in yuv.as_slice_mut().chunks_exact_mut(3) {
        yuv_pixel[0] = lut[luma_bin(yuv_pixel[0])] as f32;
    }

    let mut rgb_f32 = Image::from_size_val(src.size(), 0.0f32)?;
    color::rgb_from_yuv(&yuv, &mut rgb_f32)?;

    parallel::par_iter_rows_val(&rgb_f32, dst, |&src_pixel, dst_pixel| {
        *dst_pixel = u8::from_f32(src_pixel);
    });

    Ok(())
}

// luma values land in [0, 255] for in-range RGB input, but the forward
// transform itself is unclamped
fn luma_bin(y: f32) -> usize {
    y.round().clamp(0.0, 255.0) as usize
}
