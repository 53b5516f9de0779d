//! Operation dispatch for interactive callers.
//!
//! This is the surface an interactive front end talks to: it takes a loaded
//! BMP container and one operation, snapshots the pixel buffer and mutates
//! the container in place. Ownership of the image stays with the caller;
//! there is no process-wide "current image".

use bmpkit_image::ImageError;
use bmpkit_imgproc::filter::{kernels, Kernel};
use bmpkit_imgproc::{color, enhance, filter, histogram, threshold};
use bmpkit_io::bmp::{Gray8Bmp, Rgb8Bmp};

/// An operation applicable to an 8-bit grayscale image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GrayOp {
    /// Invert every pixel.
    Negative,
    /// Add a signed offset to every pixel, saturating at [0, 255].
    Brightness(i32),
    /// Binarize against an unbounded threshold.
    Threshold(i32),
    /// 3x3 box blur.
    BoxBlur,
    /// 3x3 Gaussian blur.
    GaussianBlur,
    /// 3x3 sharpen.
    Sharpen,
    /// 3x3 outline edge detection.
    Outline,
    /// 3x3 emboss.
    Emboss,
    /// Histogram equalization.
    Equalize,
}

/// An operation applicable to a 24-bit true-color image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RgbOp {
    /// Invert every channel of every pixel.
    Negative,
    /// Add a signed offset to every channel, saturating at [0, 255].
    Brightness(i32),
    /// Replace each pixel with its unweighted channel mean.
    Grayscale,
    /// 3x3 box blur.
    BoxBlur,
    /// 3x3 Gaussian blur.
    GaussianBlur,
    /// 3x3 sharpen.
    Sharpen,
    /// 3x3 outline edge detection.
    Outline,
    /// 3x3 emboss.
    Emboss,
    /// Histogram equalization through the luma channel.
    Equalize,
}

/// Apply an operation to an 8-bit grayscale image in place.
///
/// The pixel buffer is snapshotted before the operation runs, so
/// convolution never reads a partially updated neighbor.
///
/// # Errors
///
/// Operations cannot fail on a loaded container; the error type is carried
/// through from the processing layer for geometry violations that loaded
/// containers cannot exhibit.
pub fn apply_gray(bmp: &mut Gray8Bmp, op: GrayOp) -> Result<(), ImageError> {
    let src = bmp.image().clone();
    let dst = bmp.image_mut();
    match op {
        GrayOp::Negative => enhance::negative(&src, dst),
        GrayOp::Brightness(delta) => enhance::adjust_brightness(&src, delta, dst),
        GrayOp::Threshold(t) => threshold::threshold_binary(&src, dst, t),
        GrayOp::BoxBlur => filter::filter_2d_gray(&src, dst, &kernels::box_blur_kernel()),
        GrayOp::GaussianBlur => filter::filter_2d_gray(&src, dst, &kernels::gaussian_blur_kernel()),
        GrayOp::Sharpen => filter::filter_2d_gray(&src, dst, &kernels::sharpen_kernel()),
        GrayOp::Outline => filter::filter_2d_gray(&src, dst, &kernels::outline_kernel()),
        GrayOp::Emboss => filter::filter_2d_gray(&src, dst, &kernels::emboss_kernel()),
        GrayOp::Equalize => histogram::equalize_histogram(&src, dst),
    }
}

/// Apply an operation to a 24-bit true-color image in place.
///
/// See [`apply_gray`] for the snapshot and error semantics.
pub fn apply_rgb(bmp: &mut Rgb8Bmp, op: RgbOp) -> Result<(), ImageError> {
    let src = bmp.image().clone();
    let dst = bmp.image_mut();
    match op {
        RgbOp::Negative => enhance::negative(&src, dst),
        RgbOp::Brightness(delta) => enhance::adjust_brightness(&src, delta, dst),
        RgbOp::Grayscale => color::gray_from_rgb_mean(&src, dst),
        RgbOp::BoxBlur => filter::filter_2d_rgb(&src, dst, &kernels::box_blur_kernel()),
        RgbOp::GaussianBlur => filter::filter_2d_rgb(&src, dst, &kernels::gaussian_blur_kernel()),
        RgbOp::Sharpen => filter::filter_2d_rgb(&src, dst, &kernels::sharpen_kernel()),
        RgbOp::Outline => filter::filter_2d_rgb(&src, dst, &kernels::outline_kernel()),
        RgbOp::Emboss => filter::filter_2d_rgb(&src, dst, &kernels::emboss_kernel()),
        RgbOp::Equalize => histogram::equalize_histogram_rgb(&src, dst),
    }
}

/// Apply a caller-supplied kernel to an 8-bit grayscale image in place.
pub fn apply_gray_kernel(bmp: &mut Gray8Bmp, kernel: &Kernel) -> Result<(), ImageError> {
    let src = bmp.image().clone();
    filter::filter_2d_gray(&src, bmp.image_mut(), kernel)
}

/// Apply a caller-supplied kernel to a 24-bit true-color image in place.
pub fn apply_rgb_kernel(bmp: &mut Rgb8Bmp, kernel: &Kernel) -> Result<(), ImageError> {
    let src = bmp.image().clone();
    filter::filter_2d_rgb(&src, bmp.image_mut(), kernel)
}
