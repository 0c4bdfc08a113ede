//! Device independent bitmaps.
//!
//! StarOffice stores bitmaps as a DIB: an optional `BM` file header, a core
//! (12 bytes) or info (40 bytes or more) header, a palette and the pixel rows.
//! The reader copies them into a standalone `.bmp` buffer so that the caller
//! can hand the picture over without understanding it.

use zerocopy::IntoBytes;
use zerocopy::little_endian::{I32, U16, U32};
use zerocopy_derive::{Immutable, IntoBytes, KnownLayout};

use crate::common::{Error, Result};
use crate::star::zone::StarZone;

const BMP_MAGIC: u16 = 0x4D42;
const CORE_HEADER_SIZE: u32 = 12;
const INFO_HEADER_SIZE: u32 = 40;
const BI_RGB: u32 = 0;
const BI_BITFIELDS: u32 = 3;

/// Mime type of [`Bitmap::data`].
pub const BMP_MIME: &str = "image/bmp";

#[derive(Debug, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
struct BmpFileHeader {
    magic: U16,
    size: U32,
    reserved: U32,
    off_bits: U32,
}

#[derive(Debug, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
struct BmpInfoHeader {
    size: U32,
    width: I32,
    height: I32,
    planes: U16,
    bit_count: U16,
    compression: U32,
    size_image: U32,
    x_pels_per_meter: I32,
    y_pels_per_meter: I32,
    clr_used: U32,
    clr_important: U32,
}

/// A decoded bitmap.
#[derive(Debug, Clone, PartialEq)]
pub struct Bitmap {
    pub width: i32,
    /// Negative for top-down rows
    pub height: i32,
    pub bit_count: u16,
    pub compression: u32,
    /// A complete `.bmp` file
    pub data: Vec<u8>,
    pub mime: &'static str,
}

#[derive(Debug)]
struct DibHeader {
    width: i32,
    height: i32,
    planes: u16,
    bit_count: u16,
    compression: u32,
    size_image: u32,
    clr_used: u32,
    x_ppm: i32,
    y_ppm: i32,
    /// Bytes per palette entry: 3 for core headers, 4 otherwise
    entry_size: usize,
}

/// Read a DIB at the current position, never past `last_pos`.
///
/// `file_header` tells whether a `BM` file header precedes the DIB. On failure
/// the cursor is restored and `None` is returned.
pub fn read_bitmap(zone: &mut StarZone, file_header: bool, last_pos: usize) -> Option<Bitmap> {
    let pos = zone.tell();
    let label = zone.label("StarBitmap");
    match read_dib(zone, file_header, last_pos) {
        Ok(bitmap) => {
            zone.note(
                pos,
                format!(
                    "{label}{}x{},bits={},compression={},",
                    bitmap.width, bitmap.height, bitmap.bit_count, bitmap.compression
                ),
            );
            Some(bitmap)
        },
        Err(err) => {
            zone.error(pos, format!("{label}{err},"));
            let _ = zone.input().seek(pos);
            None
        },
    }
}

fn read_dib(zone: &mut StarZone, file_header: bool, last_pos: usize) -> Result<Bitmap> {
    let input = zone.input();
    let start = input.tell();
    let mut off_bits = None;
    if file_header {
        let magic = input.read_u16()?;
        if magic != BMP_MAGIC {
            return Err(Error::BadMagic {
                expected: "BM".to_string(),
                found: format!("{magic:#06x}"),
            });
        }
        input.skip(8)?;
        off_bits = Some(input.read_u32()? as usize);
    }

    let header_pos = input.tell();
    let header_size = input.read_u32()?;
    if header_pos + header_size as usize > last_pos {
        return Err(Error::Corrupted(format!("bitmap header of {header_size} bytes is too long")));
    }
    let header = match header_size {
        CORE_HEADER_SIZE => DibHeader {
            width: i32::from(input.read_u16()?),
            height: i32::from(input.read_u16()?),
            planes: input.read_u16()?,
            bit_count: input.read_u16()?,
            compression: BI_RGB,
            size_image: 0,
            clr_used: 0,
            x_ppm: 0,
            y_ppm: 0,
            entry_size: 3,
        },
        n if n >= INFO_HEADER_SIZE => {
            let header = DibHeader {
                width: input.read_i32()?,
                height: input.read_i32()?,
                planes: input.read_u16()?,
                bit_count: input.read_u16()?,
                compression: input.read_u32()?,
                size_image: input.read_u32()?,
                x_ppm: input.read_i32()?,
                y_ppm: input.read_i32()?,
                clr_used: input.read_u32()?,
                entry_size: 4,
            };
            input.seek(header_pos + n as usize)?;
            header
        },
        n => return Err(Error::Corrupted(format!("unexpected bitmap header size {n}"))),
    };
    if header.width <= 0
        || header.height == 0
        || header.planes != 1
        || !matches!(header.bit_count, 1 | 4 | 8 | 16 | 24 | 32)
    {
        return Err(Error::Corrupted(format!(
            "bad bitmap geometry {}x{}x{}",
            header.width, header.height, header.bit_count
        )));
    }

    let colors = if header.bit_count <= 8 {
        match header.clr_used {
            0 => 1usize << header.bit_count,
            n => (n as usize).min(256),
        }
    } else {
        0
    };
    let masks = if header.compression == BI_BITFIELDS && header_size == INFO_HEADER_SIZE {
        12
    } else {
        0
    };
    let palette_len = colors * header.entry_size + masks;
    if input.tell() + palette_len > last_pos {
        return Err(Error::Corrupted("bitmap palette exceeds the zone".to_string()));
    }
    let palette = input.read_bytes(palette_len)?;

    if let Some(off) = off_bits {
        let target = start + off;
        if target > input.tell() && target <= last_pos {
            input.seek(target)?;
        }
    }
    let stride = (header.width as usize * usize::from(header.bit_count)).div_ceil(32) * 4;
    let pixel_len = match header.compression {
        BI_RGB | BI_BITFIELDS => stride * header.height.unsigned_abs() as usize,
        _ => header.size_image as usize,
    };
    if pixel_len == 0 || input.tell() + pixel_len > last_pos {
        return Err(Error::Corrupted(format!("bitmap pixels of {pixel_len} bytes exceed the zone")));
    }
    let pixels = input.read_bytes(pixel_len)?;

    // rebuild the palette with 4-byte entries
    let mut quads = Vec::with_capacity(colors * 4 + masks);
    if header.entry_size == 3 {
        for rgb in palette.chunks_exact(3) {
            quads.extend_from_slice(rgb);
            quads.push(0);
        }
    } else {
        quads.extend_from_slice(&palette);
    }

    let off = 14 + INFO_HEADER_SIZE as usize + quads.len();
    let file = BmpFileHeader {
        magic: U16::new(BMP_MAGIC),
        size: U32::new((off + pixels.len()) as u32),
        reserved: U32::new(0),
        off_bits: U32::new(off as u32),
    };
    let info = BmpInfoHeader {
        size: U32::new(INFO_HEADER_SIZE),
        width: I32::new(header.width),
        height: I32::new(header.height),
        planes: U16::new(1),
        bit_count: U16::new(header.bit_count),
        compression: U32::new(header.compression),
        size_image: U32::new(pixels.len() as u32),
        x_pels_per_meter: I32::new(header.x_ppm),
        y_pels_per_meter: I32::new(header.y_ppm),
        clr_used: U32::new(colors as u32),
        clr_important: U32::new(0),
    };
    let mut data = Vec::with_capacity(off + pixels.len());
    data.extend_from_slice(file.as_bytes());
    data.extend_from_slice(info.as_bytes());
    data.extend_from_slice(&quads);
    data.extend_from_slice(&pixels);

    Ok(Bitmap {
        width: header.width,
        height: header.height,
        bit_count: header.bit_count,
        compression: header.compression,
        data,
        mime: BMP_MIME,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::star::test_utils::ByteWriter;

    /// A 2x2 monochrome DIB with an info header.
    pub(crate) fn mono_dib(w: &mut ByteWriter) {
        w.u32(40).i32(2).i32(2).u16(1).u16(1);
        w.u32(0).u32(0).i32(0).i32(0).u32(0).u32(0);
        w.u32(0).u32(0x00FF_FFFF);
        w.u32(0x4000_0000).u32(0x8000_0000);
    }

    #[test]
    fn test_read_info_dib() {
        let mut w = ByteWriter::new();
        mono_dib(&mut w);
        let data = w.into_vec();
        let mut zone = StarZone::from_bytes(data.clone(), "test");
        let bitmap = read_bitmap(&mut zone, false, data.len()).unwrap();
        assert_eq!((bitmap.width, bitmap.height, bitmap.bit_count), (2, 2, 1));
        assert_eq!(bitmap.mime, BMP_MIME);
        assert_eq!(&bitmap.data[..2], b"BM");
        assert_eq!(bitmap.data.len(), 14 + 40 + 8 + 8);
        assert_eq!(u32::from_le_bytes(bitmap.data[10..14].try_into().unwrap()), 62);
        assert_eq!(zone.tell(), data.len());
    }

    #[test]
    fn test_core_header_palette_is_widened() {
        let mut w = ByteWriter::new();
        w.u16(0x4D42).u32(0).u32(0).u32(14 + 12 + 6);
        w.u32(12).u16(1).u16(1).u16(1).u16(1);
        w.bytes(&[0, 0, 0, 255, 255, 255]);
        w.u32(0x8000_0000);
        let data = w.into_vec();
        let mut zone = StarZone::from_bytes(data.clone(), "test");
        let bitmap = read_bitmap(&mut zone, true, data.len()).unwrap();
        assert_eq!(bitmap.data.len(), 14 + 40 + 8 + 4);
        assert_eq!(&bitmap.data[54..62], &[0, 0, 0, 0, 255, 255, 255, 0]);
    }

    #[test]
    fn test_truncated_pixels_fail_and_restore() {
        let mut w = ByteWriter::new();
        mono_dib(&mut w);
        let data = w.into_vec();
        let mut zone = StarZone::from_bytes(data.clone(), "test");
        assert!(read_bitmap(&mut zone, false, data.len() - 1).is_none());
        assert_eq!(zone.tell(), 0);
        assert!(zone.trace().has_errors());
    }

    #[test]
    fn test_bad_file_magic() {
        let mut zone = StarZone::from_bytes(vec![0x42, 0x41, 0, 0, 0, 0], "test");
        assert!(read_bitmap(&mut zone, true, 6).is_none());
        assert!(zone.trace().contains("Bad magic"));
    }
}
