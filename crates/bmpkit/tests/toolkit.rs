use std::fs;
use std::path::Path;

use bmpkit::io::bmp::{
    padded_row_bytes, read_image_bmp_gray8, read_image_bmp_rgb8, write_image_bmp_gray8,
    write_image_bmp_rgb8, Gray8Bmp, Rgb8Bmp,
};
use bmpkit::io::IoError;
use bmpkit::ops::{apply_gray, apply_rgb, GrayOp, RgbOp};

/// Build a minimal 8-bit BMP file on disk and load it.
fn gray_fixture(dir: &Path, width: u32, height: u32, pixels: &[u8]) -> Result<Gray8Bmp, IoError> {
    assert_eq!(pixels.len(), (width * height) as usize);

    let data_offset = 54u32 + 1024;
    let mut header = [0u8; 54];
    header[0..2].copy_from_slice(b"BM");
    header[2..6].copy_from_slice(&(data_offset + pixels.len() as u32).to_le_bytes());
    header[10..14].copy_from_slice(&data_offset.to_le_bytes());
    header[14..18].copy_from_slice(&40u32.to_le_bytes());
    header[18..22].copy_from_slice(&width.to_le_bytes());
    header[22..26].copy_from_slice(&height.to_le_bytes());
    header[26..28].copy_from_slice(&1u16.to_le_bytes());
    header[28..30].copy_from_slice(&8u16.to_le_bytes());
    header[34..38].copy_from_slice(&(pixels.len() as u32).to_le_bytes());

    let mut file = header.to_vec();
    for i in 0..256u32 {
        file.extend_from_slice(&[i as u8, i as u8, i as u8, 0]);
    }
    file.extend_from_slice(pixels);

    let path = dir.join("gray_fixture.bmp");
    fs::write(&path, file)?;
    read_image_bmp_gray8(&path)
}

/// Build a minimal 24-bit BMP file on disk from top-down RGB rows and load it.
fn rgb_fixture(dir: &Path, width: usize, height: usize, rgb: &[u8]) -> Result<Rgb8Bmp, IoError> {
    assert_eq!(rgb.len(), width * height * 3);

    let padded = padded_row_bytes(width);
    let data_offset = 54u32;

    let mut file = Vec::new();
    file.extend_from_slice(b"BM");
    file.extend_from_slice(&(data_offset + (padded * height) as u32).to_le_bytes());
    file.extend_from_slice(&[0u8; 4]);
    file.extend_from_slice(&data_offset.to_le_bytes());
    file.extend_from_slice(&40u32.to_le_bytes());
    file.extend_from_slice(&(width as i32).to_le_bytes());
    file.extend_from_slice(&(height as i32).to_le_bytes());
    file.extend_from_slice(&1u16.to_le_bytes());
    file.extend_from_slice(&24u16.to_le_bytes());
    file.extend_from_slice(&0u32.to_le_bytes());
    file.extend_from_slice(&((padded * height) as u32).to_le_bytes());
    file.extend_from_slice(&[0u8; 16]);

    for disk_row in 0..height {
        let y = height - 1 - disk_row;
        let mut row = vec![0u8; padded];
        for x in 0..width {
            let src = (y * width + x) * 3;
            row[x * 3] = rgb[src + 2];
            row[x * 3 + 1] = rgb[src + 1];
            row[x * 3 + 2] = rgb[src];
        }
        file.extend_from_slice(&row);
    }

    let path = dir.join("rgb_fixture.bmp");
    fs::write(&path, file)?;
    read_image_bmp_rgb8(&path)
}

#[test]
fn round_trip_preserves_every_byte() -> Result<(), IoError> {
    let tmp_dir = tempfile::tempdir()?;

    let pixels: Vec<u8> = (0..48).map(|v| (v * 31 % 256) as u8).collect();
    let gray = gray_fixture(tmp_dir.path(), 8, 6, &pixels)?;
    let original = fs::read(tmp_dir.path().join("gray_fixture.bmp"))?;

    let copy_path = tmp_dir.path().join("gray_copy.bmp");
    write_image_bmp_gray8(&copy_path, &gray)?;
    assert_eq!(fs::read(&copy_path)?, original);

    let rgb: Vec<u8> = (0..5 * 4 * 3).map(|v| (v * 13 % 256) as u8).collect();
    let color = rgb_fixture(tmp_dir.path(), 5, 4, &rgb)?;
    let original = fs::read(tmp_dir.path().join("rgb_fixture.bmp"))?;

    let copy_path = tmp_dir.path().join("rgb_copy.bmp");
    write_image_bmp_rgb8(&copy_path, &color)?;
    assert_eq!(fs::read(&copy_path)?, original);

    Ok(())
}

#[test]
fn negative_is_self_inverse() -> Result<(), IoError> {
    let tmp_dir = tempfile::tempdir()?;

    let pixels: Vec<u8> = (0..16).map(|v| (v * 16) as u8).collect();
    let mut gray = gray_fixture(tmp_dir.path(), 4, 4, &pixels)?;

    apply_gray(&mut gray, GrayOp::Negative)?;
    assert_ne!(gray.image().as_slice(), pixels.as_slice());
    apply_gray(&mut gray, GrayOp::Negative)?;
    assert_eq!(gray.image().as_slice(), pixels.as_slice());

    Ok(())
}

#[test]
fn brightness_zero_is_identity_and_extremes_stay_in_range() -> Result<(), IoError> {
    let tmp_dir = tempfile::tempdir()?;

    let rgb: Vec<u8> = (0..4 * 4 * 3).map(|v| (v * 9 % 256) as u8).collect();
    let mut color = rgb_fixture(tmp_dir.path(), 4, 4, &rgb)?;

    apply_rgb(&mut color, RgbOp::Brightness(0))?;
    assert_eq!(color.image().as_slice(), rgb.as_slice());

    apply_rgb(&mut color, RgbOp::Brightness(1_000_000))?;
    assert!(color.image().as_slice().iter().all(|&v| v == 255));

    apply_rgb(&mut color, RgbOp::Brightness(-1_000_000))?;
    assert!(color.image().as_slice().iter().all(|&v| v == 0));

    Ok(())
}

#[test]
fn threshold_is_idempotent() -> Result<(), IoError> {
    let tmp_dir = tempfile::tempdir()?;

    let pixels: Vec<u8> = (0..16).map(|v| (v * 17) as u8).collect();
    let mut gray = gray_fixture(tmp_dir.path(), 4, 4, &pixels)?;

    apply_gray(&mut gray, GrayOp::Threshold(128))?;
    let once = gray.image().clone();
    apply_gray(&mut gray, GrayOp::Threshold(128))?;

    assert_eq!(gray.image(), &once);
    assert!(gray.image().as_slice().iter().all(|&v| v == 0 || v == 255));

    Ok(())
}

#[test]
fn gray_filters_never_touch_the_border_band() -> Result<(), IoError> {
    let tmp_dir = tempfile::tempdir()?;
    let pixels: Vec<u8> = (0..36).map(|v| (v * 23 % 256) as u8).collect();

    for op in [
        GrayOp::BoxBlur,
        GrayOp::GaussianBlur,
        GrayOp::Sharpen,
        GrayOp::Outline,
        GrayOp::Emboss,
    ] {
        let mut gray = gray_fixture(tmp_dir.path(), 6, 6, &pixels)?;
        apply_gray(&mut gray, op)?;

        for y in 0..6 {
            for x in 0..6 {
                if x == 0 || x == 5 || y == 0 || y == 5 {
                    assert_eq!(
                        gray.image().get([y, x, 0]),
                        Some(&pixels[y * 6 + x]),
                        "border pixel ({x}, {y}) changed under {op:?}"
                    );
                }
            }
        }
    }

    Ok(())
}

#[test]
fn rgb_filters_recompute_every_pixel() -> Result<(), IoError> {
    let tmp_dir = tempfile::tempdir()?;

    // uniform color: outline drives the interior to zero and saturates the
    // shrunk-normalization sums near the edges, so every pixel moves
    let mut color = rgb_fixture(tmp_dir.path(), 5, 5, &[90u8; 5 * 5 * 3])?;
    apply_rgb(&mut color, RgbOp::Outline)?;
    assert!(color.image().as_slice().iter().all(|&v| v != 90));

    Ok(())
}

#[test]
fn rgb_box_blur_uniform_image_changes_only_edges() -> Result<(), IoError> {
    let tmp_dir = tempfile::tempdir()?;

    let mut color = rgb_fixture(tmp_dir.path(), 5, 5, &[90u8; 5 * 5 * 3])?;
    apply_rgb(&mut color, RgbOp::BoxBlur)?;

    for y in 0..5 {
        for x in 0..5 {
            let edge = x == 0 || x == 4 || y == 0 || y == 4;
            for c in 0..3 {
                let v = *color.image().get([y, x, c]).unwrap();
                if edge {
                    // dropped out-of-bounds weights shrink the sum below 90
                    assert!(v < 90, "edge pixel ({x}, {y}) kept its value");
                } else {
                    assert_eq!(v, 90);
                }
            }
        }
    }

    Ok(())
}

#[test]
fn equalize_flat_gray_image_is_a_deterministic_no_op() -> Result<(), IoError> {
    let tmp_dir = tempfile::tempdir()?;

    let mut gray = gray_fixture(tmp_dir.path(), 8, 8, &[100u8; 64])?;
    apply_gray(&mut gray, GrayOp::Equalize)?;
    assert!(gray.image().as_slice().iter().all(|&v| v == 100));

    Ok(())
}

#[test]
fn grayscale_replicates_the_truncated_channel_mean() -> Result<(), IoError> {
    let tmp_dir = tempfile::tempdir()?;

    let rgb: Vec<u8> = (0..4 * 4 * 3).map(|v| (v * 11 % 256) as u8).collect();
    let mut color = rgb_fixture(tmp_dir.path(), 4, 4, &rgb)?;
    apply_rgb(&mut color, RgbOp::Grayscale)?;

    for (src_px, dst_px) in rgb
        .chunks_exact(3)
        .zip(color.image().as_slice().chunks_exact(3))
    {
        let mean = ((src_px[0] as u16 + src_px[1] as u16 + src_px[2] as u16) / 3) as u8;
        assert_eq!(dst_px, &[mean, mean, mean]);
    }

    Ok(())
}

#[test]
fn failed_load_leaves_previous_image_untouched() -> Result<(), IoError> {
    let tmp_dir = tempfile::tempdir()?;

    let pixels: Vec<u8> = (0..16).map(|v| (v * 3) as u8).collect();
    let gray = gray_fixture(tmp_dir.path(), 4, 4, &pixels)?;

    let res = read_image_bmp_gray8(tmp_dir.path().join("missing.bmp"));
    assert!(matches!(res, Err(IoError::FileDoesNotExist(_))));

    // the previously loaded image is still fully usable
    assert_eq!(gray.image().as_slice(), pixels.as_slice());
    assert_eq!(gray.info().width, 4);

    Ok(())
}
