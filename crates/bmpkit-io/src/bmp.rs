use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::Path;

use bmpkit_image::{Image, ImageError, ImageSize};

use crate::error::IoError;

/// The BMP signature, "BM" read as a little-endian u16.
pub const BMP_SIGNATURE: u16 = 0x4D42;

/// Length of the fixed 8-bit BMP header (file header + info header).
pub const GRAY_HEADER_LEN: usize = 54;

/// Length of the 256-entry, 4 bytes per entry, 8-bit color table.
pub const PALETTE_LEN: usize = 1024;

/// Length of the BMP file header.
pub const FILE_HEADER_LEN: usize = 14;

/// Length of the BITMAPINFOHEADER info block.
pub const INFO_HEADER_LEN: usize = 40;

/// Number of bytes each pixel row occupies on disk for a 24-bit image,
/// padded up to a 4-byte boundary.
pub fn padded_row_bytes(width: usize) -> usize {
    (width * 3).div_ceil(4) * 4
}

/// Width, height, bit depth and pixel data size of a loaded BMP image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BmpInfo {
    /// Width of the image in pixels.
    pub width: usize,
    /// Height of the image in pixels.
    pub height: usize,
    /// Declared color depth in bits per pixel.
    pub bit_depth: u16,
    /// Size of the raw pixel data section in bytes.
    pub data_size: u32,
}

impl std::fmt::Display for BmpInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "Image Info:\n  Width: {}\n  Height: {}\n  Color Depth: {}\n  Data Size: {}",
            self.width, self.height, self.bit_depth, self.data_size
        )
    }
}

/// An 8-bit indexed BMP image.
///
/// The 54-byte header and the 1024-byte color table are kept verbatim and
/// written back untouched on save; pixel bytes are grayscale intensities
/// (one byte per pixel, top row first in memory).
#[derive(Clone, Debug, PartialEq)]
pub struct Gray8Bmp {
    header: [u8; GRAY_HEADER_LEN],
    palette: Box<[u8; PALETTE_LEN]>,
    image: Image<u8, 1>,
    data_size: u32,
}

impl Gray8Bmp {
    /// Get the decoded pixel buffer.
    pub fn image(&self) -> &Image<u8, 1> {
        &self.image
    }

    /// Get the decoded pixel buffer mutably.
    ///
    /// The buffer length is fixed at load time; replacing the image with
    /// one of a different size would desynchronize it from the verbatim
    /// header, so only same-size mutation is meaningful.
    pub fn image_mut(&mut self) -> &mut Image<u8, 1> {
        &mut self.image
    }

    /// Get the raw 54-byte header as read from the file.
    pub fn header(&self) -> &[u8; GRAY_HEADER_LEN] {
        &self.header
    }

    /// Get the raw 1024-byte color table as read from the file.
    pub fn palette(&self) -> &[u8; PALETTE_LEN] {
        &self.palette
    }

    /// Get the width of the image in pixels.
    pub fn width(&self) -> usize {
        self.image.width()
    }

    /// Get the height of the image in pixels.
    pub fn height(&self) -> usize {
        self.image.height()
    }

    /// Get the pixel data size in bytes, as declared by the header.
    pub fn data_size(&self) -> u32 {
        self.data_size
    }

    /// Summarize the image properties.
    pub fn info(&self) -> BmpInfo {
        BmpInfo {
            width: self.width(),
            height: self.height(),
            bit_depth: 8,
            data_size: self.data_size,
        }
    }
}

/// The 14-byte BMP file header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BmpFileHeader {
    /// The file signature, expected to be [`BMP_SIGNATURE`].
    pub signature: u16,
    /// Total file size in bytes, as declared.
    pub file_size: u32,
    /// First reserved word, round-tripped verbatim.
    pub reserved1: u16,
    /// Second reserved word, round-tripped verbatim.
    pub reserved2: u16,
    /// Offset of the pixel data from the start of the file.
    pub data_offset: u32,
}

impl BmpFileHeader {
    fn from_bytes(raw: &[u8; FILE_HEADER_LEN]) -> Self {
        Self {
            signature: u16::from_le_bytes([raw[0], raw[1]]),
            file_size: u32::from_le_bytes([raw[2], raw[3], raw[4], raw[5]]),
            reserved1: u16::from_le_bytes([raw[6], raw[7]]),
            reserved2: u16::from_le_bytes([raw[8], raw[9]]),
            data_offset: u32::from_le_bytes([raw[10], raw[11], raw[12], raw[13]]),
        }
    }

    fn to_bytes(self) -> [u8; FILE_HEADER_LEN] {
        let mut raw = [0u8; FILE_HEADER_LEN];
        raw[0..2].copy_from_slice(&self.signature.to_le_bytes());
        raw[2..6].copy_from_slice(&self.file_size.to_le_bytes());
        raw[6..8].copy_from_slice(&self.reserved1.to_le_bytes());
        raw[8..10].copy_from_slice(&self.reserved2.to_le_bytes());
        raw[10..14].copy_from_slice(&self.data_offset.to_le_bytes());
        raw
    }
}

/// The 40-byte BITMAPINFOHEADER info block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BmpInfoHeader {
    /// Declared size of this header, normally 40.
    pub header_size: u32,
    /// Width of the image in pixels.
    pub width: i32,
    /// Height of the image in pixels; positive means bottom-up rows.
    pub height: i32,
    /// Number of color planes.
    pub planes: u16,
    /// Bits per pixel.
    pub bit_count: u16,
    /// Compression method; 0 for the uncompressed images handled here.
    pub compression: u32,
    /// Declared size of the pixel data section.
    pub image_size: u32,
    /// Horizontal resolution in pixels per meter.
    pub x_pixels_per_meter: i32,
    /// Vertical resolution in pixels per meter.
    pub y_pixels_per_meter: i32,
    /// Number of palette colors used.
    pub colors_used: u32,
    /// Number of important palette colors.
    pub colors_important: u32,
}

impl BmpInfoHeader {
    fn from_bytes(raw: &[u8; INFO_HEADER_LEN]) -> Self {
        let u32_at = |o: usize| u32::from_le_bytes([raw[o], raw[o + 1], raw[o + 2], raw[o + 3]]);
        let i32_at = |o: usize| u32_at(o) as i32;
        let u16_at = |o: usize| u16::from_le_bytes([raw[o], raw[o + 1]]);
        Self {
            header_size: u32_at(0),
            width: i32_at(4),
            height: i32_at(8),
            planes: u16_at(12),
            bit_count: u16_at(14),
            compression: u32_at(16),
            image_size: u32_at(20),
            x_pixels_per_meter: i32_at(24),
            y_pixels_per_meter: i32_at(28),
            colors_used: u32_at(32),
            colors_important: u32_at(36),
        }
    }

    fn to_bytes(self) -> [u8; INFO_HEADER_LEN] {
        let mut raw = [0u8; INFO_HEADER_LEN];
        raw[0..4].copy_from_slice(&self.header_size.to_le_bytes());
        raw[4..8].copy_from_slice(&self.width.to_le_bytes());
        raw[8..12].copy_from_slice(&self.height.to_le_bytes());
        raw[12..14].copy_from_slice(&self.planes.to_le_bytes());
        raw[14..16].copy_from_slice(&self.bit_count.to_le_bytes());
        raw[16..20].copy_from_slice(&self.compression.to_le_bytes());
        raw[20..24].copy_from_slice(&self.image_size.to_le_bytes());
        raw[24..28].copy_from_slice(&self.x_pixels_per_meter.to_le_bytes());
        raw[28..32].copy_from_slice(&self.y_pixels_per_meter.to_le_bytes());
        raw[32..36].copy_from_slice(&self.colors_used.to_le_bytes());
        raw[36..40].copy_from_slice(&self.colors_important.to_le_bytes());
        raw
    }
}

/// A 24-bit true-color BMP image.
///
/// The file header and info block are kept verbatim and written back
/// untouched on save. The pixel buffer stores R,G,B triples logically
/// top-to-bottom, while the on-disk encoding is bottom-up B,G,R with
/// 4-byte row padding.
#[derive(Clone, Debug, PartialEq)]
pub struct Rgb8Bmp {
    file_header: BmpFileHeader,
    info_header: BmpInfoHeader,
    image: Image<u8, 3>,
}

impl Rgb8Bmp {
    /// Get the decoded pixel buffer.
    pub fn image(&self) -> &Image<u8, 3> {
        &self.image
    }

    /// Get the decoded pixel buffer mutably.
    pub fn image_mut(&mut self) -> &mut Image<u8, 3> {
        &mut self.image
    }

    /// Get the decoded file header.
    pub fn file_header(&self) -> &BmpFileHeader {
        &self.file_header
    }

    /// Get the decoded info block.
    pub fn info_header(&self) -> &BmpInfoHeader {
        &self.info_header
    }

    /// Get the width of the image in pixels.
    pub fn width(&self) -> usize {
        self.image.width()
    }

    /// Get the height of the image in pixels.
    pub fn height(&self) -> usize {
        self.image.height()
    }

    /// Summarize the image properties.
    pub fn info(&self) -> BmpInfo {
        BmpInfo {
            width: self.width(),
            height: self.height(),
            bit_depth: self.info_header.bit_count,
            data_size: self.info_header.image_size,
        }
    }
}

fn read_section(
    reader: &mut impl Read,
    buf: &mut [u8],
    section: &'static str,
) -> Result<(), IoError> {
    reader.read_exact(buf).map_err(|e| match e.kind() {
        std::io::ErrorKind::UnexpectedEof => IoError::TruncatedSection(section),
        _ => IoError::FileError(e),
    })
}

/// Read an 8-bit indexed BMP image.
///
/// Reads the fixed 54-byte header, the 1024-byte color table and exactly
/// the header-declared number of pixel bytes. The declared data size is
/// authoritative and never recomputed from the dimensions; a mismatch with
/// `width * height` fails the load.
///
/// # Arguments
///
/// * `file_path` - The path to the BMP file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, the signature is wrong,
/// the bit depth is not 8, a section is truncated or the dimensions are
/// degenerate. No partially populated image is ever returned.
pub fn read_image_bmp_gray8(file_path: impl AsRef<Path>) -> Result<Gray8Bmp, IoError> {
    let file_path = file_path.as_ref();
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    let mut reader = BufReader::new(File::open(file_path)?);

    let mut header = [0u8; GRAY_HEADER_LEN];
    read_section(&mut reader, &mut header, "header")?;

    let signature = u16::from_le_bytes([header[0], header[1]]);
    if signature != BMP_SIGNATURE {
        return Err(IoError::InvalidSignature(signature));
    }

    let width = u32::from_le_bytes([header[18], header[19], header[20], header[21]]);
    let height = u32::from_le_bytes([header[22], header[23], header[24], header[25]]);
    let bit_depth = u16::from_le_bytes([header[28], header[29]]);
    let data_size = u32::from_le_bytes([header[34], header[35], header[36], header[37]]);

    log::debug!(
        "loading {}: width={width} height={height} depth={bit_depth} data_size={data_size}",
        file_path.display()
    );

    if bit_depth != 8 {
        return Err(IoError::UnsupportedBitDepth(8, bit_depth));
    }
    if width == 0 || height == 0 {
        return Err(IoError::InvalidDimensions(width as i32, height as i32));
    }

    // the declared data size must match the dimensions before any pixel
    // buffer is sized from it
    let num_pixels = width as u64 * height as u64;
    if data_size as u64 != num_pixels {
        return Err(IoError::ImageCreationError(ImageError::InvalidChannelShape(
            data_size as usize,
            num_pixels as usize,
        )));
    }

    let mut palette = Box::new([0u8; PALETTE_LEN]);
    read_section(&mut reader, &mut palette[..], "color table")?;

    let file_len = reader.get_ref().metadata()?.len();
    if (GRAY_HEADER_LEN + PALETTE_LEN) as u64 + data_size as u64 > file_len {
        return Err(IoError::TruncatedSection("pixel data"));
    }

    let mut data = vec![0u8; data_size as usize];
    read_section(&mut reader, &mut data, "pixel data")?;

    let image = Image::new(
        ImageSize {
            width: width as usize,
            height: height as usize,
        },
        data,
    )?;

    Ok(Gray8Bmp {
        header,
        palette,
        image,
        data_size,
    })
}

/// Write an 8-bit indexed BMP image.
///
/// Emits the verbatim header, the verbatim color table and the pixel bytes,
/// in that order. No consistency check is performed between the header
/// fields and the buffer length; the header is trusted as loaded. An
/// interrupted write leaves a truncated file behind.
pub fn write_image_bmp_gray8(file_path: impl AsRef<Path>, bmp: &Gray8Bmp) -> Result<(), IoError> {
    let mut writer = BufWriter::new(File::create(file_path.as_ref())?);

    writer.write_all(&bmp.header)?;
    writer.write_all(&bmp.palette[..])?;
    writer.write_all(bmp.image.as_slice())?;
    writer.flush()?;

    Ok(())
}

fn read_rgb8_headers(reader: &mut impl Read) -> Result<(BmpFileHeader, BmpInfoHeader), IoError> {
    let mut fh_raw = [0u8; FILE_HEADER_LEN];
    read_section(reader, &mut fh_raw, "file header")?;
    let file_header = BmpFileHeader::from_bytes(&fh_raw);

    if file_header.signature != BMP_SIGNATURE {
        return Err(IoError::InvalidSignature(file_header.signature));
    }

    let mut ih_raw = [0u8; INFO_HEADER_LEN];
    read_section(reader, &mut ih_raw, "info header")?;
    let info_header = BmpInfoHeader::from_bytes(&ih_raw);

    if info_header.bit_count != 24 {
        return Err(IoError::UnsupportedBitDepth(24, info_header.bit_count));
    }
    if info_header.width <= 0 || info_header.height <= 0 {
        return Err(IoError::InvalidDimensions(
            info_header.width,
            info_header.height,
        ));
    }

    Ok((file_header, info_header))
}

/// Read a 24-bit true-color BMP image.
///
/// Rows are stored bottom-first on disk, each padded to a 4-byte boundary;
/// logical row y (0 = top) lives at
/// `data_offset + (height - 1 - y) * padded_row_bytes`. On-disk triples are
/// B,G,R and are swapped to R,G,B in memory.
///
/// # Arguments
///
/// * `file_path` - The path to the BMP file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, the signature is wrong,
/// the bit depth is not 24, the pixel section is truncated or the
/// dimensions are degenerate. No partially populated image is ever
/// returned.
pub fn read_image_bmp_rgb8(file_path: impl AsRef<Path>) -> Result<Rgb8Bmp, IoError> {
    let file_path = file_path.as_ref();
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    let mut reader = BufReader::new(File::open(file_path)?);
    let (file_header, info_header) = read_rgb8_headers(&mut reader)?;

    let width = info_header.width as usize;
    let height = info_header.height as usize;
    let padded = padded_row_bytes(width);

    // bound the pixel allocation by what the file can actually hold; a
    // header declaring huge dimensions must fail here, not at alloc time
    let file_len = reader.get_ref().metadata()?.len();
    let pixel_end = file_header.data_offset as u64 + padded as u64 * height as u64;
    if pixel_end > file_len {
        return Err(IoError::TruncatedSection("pixel data"));
    }

    log::debug!(
        "loading {}: width={width} height={height} depth={} offset={}",
        file_path.display(),
        info_header.bit_count,
        file_header.data_offset
    );

    reader.seek(SeekFrom::Start(file_header.data_offset as u64))?;

    // disk order is bottom-up; fill logical rows top-down as we go
    let mut data = vec![0u8; width * height * 3];
    let mut row_buf = vec![0u8; padded];
    for disk_row in 0..height {
        let y = height - 1 - disk_row;
        read_section(&mut reader, &mut row_buf, "pixel data")?;
        for x in 0..width {
            let src = x * 3;
            let dst = (y * width + x) * 3;
            data[dst] = row_buf[src + 2];
            data[dst + 1] = row_buf[src + 1];
            data[dst + 2] = row_buf[src];
        }
    }

    let image = Image::new(
        ImageSize { width, height },
        data,
    )?;

    Ok(Rgb8Bmp {
        file_header,
        info_header,
        image,
    })
}

/// Write a 24-bit true-color BMP image.
///
/// Emits the verbatim file header and info block, then the pixel rows
/// bottom-to-top starting at the header-declared data offset, padded to a
/// 4-byte boundary with zero-filled pad bytes and channels swapped back to
/// B,G,R.
pub fn write_image_bmp_rgb8(file_path: impl AsRef<Path>, bmp: &Rgb8Bmp) -> Result<(), IoError> {
    let mut file = File::create(file_path.as_ref())?;

    file.write_all(&bmp.file_header.to_bytes())?;
    file.write_all(&bmp.info_header.to_bytes())?;
    file.seek(SeekFrom::Start(bmp.file_header.data_offset as u64))?;

    let width = bmp.width();
    let height = bmp.height();
    let padded = padded_row_bytes(width);
    let data = bmp.image.as_slice();

    let mut row_buf = vec![0u8; padded];
    for disk_row in 0..height {
        let y = height - 1 - disk_row;
        row_buf.fill(0);
        for x in 0..width {
            let src = (y * width + x) * 3;
            let dst = x * 3;
            row_buf[dst] = data[src + 2];
            row_buf[dst + 1] = data[src + 1];
            row_buf[dst + 2] = data[src];
        }
        file.write_all(&row_buf)?;
    }

    Ok(())
}

fn pixel_offset(file_header: &BmpFileHeader, info_header: &BmpInfoHeader, x: usize, y: usize) -> u64 {
    let width = info_header.width as usize;
    let height = info_header.height as usize;
    let padded = padded_row_bytes(width) as u64;
    file_header.data_offset as u64 + (height - 1 - y) as u64 * padded + (x * 3) as u64
}

fn check_pixel_bounds(info_header: &BmpInfoHeader, x: usize, y: usize) -> Result<(), IoError> {
    let width = info_header.width as usize;
    let height = info_header.height as usize;
    if x >= width || y >= height {
        return Err(ImageError::PixelIndexOutOfBounds(x, y, width, height).into());
    }
    Ok(())
}

/// Read a single pixel of a 24-bit BMP file without decoding the image.
///
/// Uses the same padded bottom-up offset arithmetic as the row codec.
/// Returns the pixel as R,G,B.
pub fn read_pixel_bmp_rgb8(file_path: impl AsRef<Path>, x: usize, y: usize) -> Result<[u8; 3], IoError> {
    let file_path = file_path.as_ref();
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    let mut file = File::open(file_path)?;
    let (file_header, info_header) = read_rgb8_headers(&mut file)?;
    check_pixel_bounds(&info_header, x, y)?;

    file.seek(SeekFrom::Start(pixel_offset(&file_header, &info_header, x, y)))?;
    let mut bgr = [0u8; 3];
    read_section(&mut file, &mut bgr, "pixel data")?;

    Ok([bgr[2], bgr[1], bgr[0]])
}

/// Overwrite a single pixel of a 24-bit BMP file in place.
///
/// The pixel is given as R,G,B and stored as B,G,R at the same padded
/// bottom-up offset the row codec uses.
pub fn write_pixel_bmp_rgb8(
    file_path: impl AsRef<Path>,
    x: usize,
    y: usize,
    rgb: [u8; 3],
) -> Result<(), IoError> {
    let file_path = file_path.as_ref();
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    let mut file = OpenOptions::new().read(true).write(true).open(file_path)?;
    let (file_header, info_header) = read_rgb8_headers(&mut file)?;
    check_pixel_bounds(&info_header, x, y)?;

    file.seek(SeekFrom::Start(pixel_offset(&file_header, &info_header, x, y)))?;
    file.write_all(&[rgb[2], rgb[1], rgb[0]])?;

    Ok(())
}
