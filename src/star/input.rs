//! Position-tracked cursor over a StarOffice byte stream.
//!
//! `StarInput` owns a cheaply clonable [`Bytes`] buffer. Every fixed-width read
//! honours the current byte order, which decoders may flip at runtime when a
//! magic number reveals the stream was written on a machine of the other
//! endianness.

use std::io::Read;

use bytes::Bytes;

use crate::common::binary::{self, ByteOrder};
use crate::common::encoding::strip_null_terminators;
use crate::common::{Error, RGBColor, Result};

/// Byte cursor with a runtime byte order.
#[derive(Debug, Clone)]
pub struct StarInput {
    data: Bytes,
    pos: usize,
    order: ByteOrder,
}

impl StarInput {
    /// Create a little-endian cursor at offset 0.
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            data: data.into(),
            pos: 0,
            order: ByteOrder::Little,
        }
    }

    /// Read a whole stream, such as an OLE stream, into a cursor.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Ok(Self::new(data))
    }

    #[inline]
    pub fn tell(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_end(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Bytes between the cursor and the end of the stream.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    #[inline]
    pub fn byte_order(&self) -> ByteOrder {
        self.order
    }

    pub fn set_byte_order(&mut self, order: ByteOrder) {
        self.order = order;
    }

    /// Swap between little- and big-endian reads.
    pub fn flip_byte_order(&mut self) {
        self.order = self.order.flipped();
    }

    /// Move to an absolute position; the end of the stream is a valid target.
    pub fn seek(&mut self, pos: usize) -> Result<()> {
        if pos > self.data.len() {
            return Err(Error::UnexpectedEof {
                offset: pos,
                needed: 0,
                available: self.data.len(),
            });
        }
        self.pos = pos;
        Ok(())
    }

    /// Move relative to the current position.
    pub fn seek_relative(&mut self, delta: i64) -> Result<()> {
        let target = i64::try_from(self.pos)
            .ok()
            .and_then(|p| p.checked_add(delta))
            .and_then(|p| usize::try_from(p).ok())
            .ok_or_else(|| Error::InvalidFormat(format!("bad relative seek {delta}")))?;
        self.seek(target)
    }

    /// Skip `len` bytes.
    pub fn skip(&mut self, len: usize) -> Result<()> {
        let target = self
            .pos
            .checked_add(len)
            .ok_or_else(|| Error::InvalidFormat("skip overflow".to_string()))?;
        self.seek(target)
    }

    pub fn peek_u8(&self) -> Result<u8> {
        Ok(binary::read_u8(&self.data, self.pos)?)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        let v = binary::read_u8(&self.data, self.pos)?;
        self.pos += 1;
        Ok(v)
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        self.read_u8().map(|v| v as i8)
    }

    pub fn read_bool(&mut self) -> Result<bool> {
        self.read_u8().map(|v| v != 0)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        let v = binary::read_u16(&self.data, self.pos, self.order)?;
        self.pos += 2;
        Ok(v)
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        let v = binary::read_i16(&self.data, self.pos, self.order)?;
        self.pos += 2;
        Ok(v)
    }

    pub fn read_u24(&mut self) -> Result<u32> {
        let v = binary::read_u24(&self.data, self.pos, self.order)?;
        self.pos += 3;
        Ok(v)
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        let v = binary::read_u32(&self.data, self.pos, self.order)?;
        self.pos += 4;
        Ok(v)
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        let v = binary::read_i32(&self.data, self.pos, self.order)?;
        self.pos += 4;
        Ok(v)
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        let v = binary::read_u64(&self.data, self.pos, self.order)?;
        self.pos += 8;
        Ok(v)
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        let v = binary::read_f64(&self.data, self.pos, self.order)?;
        self.pos += 8;
        Ok(v)
    }

    /// Read an unsigned integer stored on `width` bytes (1, 2 or 4).
    pub fn read_uint(&mut self, width: u8) -> Result<u32> {
        match width {
            1 => self.read_u8().map(u32::from),
            2 => self.read_u16().map(u32::from),
            4 => self.read_u32(),
            _ => Err(Error::InvalidFormat(format!("bad integer width {width}"))),
        }
    }

    /// Read a signed integer stored on `width` bytes (1, 2 or 4).
    pub fn read_int(&mut self, width: u8) -> Result<i32> {
        match width {
            1 => self.read_i8().map(i32::from),
            2 => self.read_i16().map(i32::from),
            4 => self.read_i32(),
            _ => Err(Error::InvalidFormat(format!("bad integer width {width}"))),
        }
    }

    /// Borrow the next `len` bytes without copying.
    pub fn read_bytes(&mut self, len: usize) -> Result<Bytes> {
        binary::slice_at(&self.data, self.pos, len)?;
        let out = self.data.slice(self.pos..self.pos + len);
        self.pos += len;
        Ok(out)
    }

    /// Read everything up to `end`, the end of a declared block.
    pub fn read_to(&mut self, end: usize) -> Result<Bytes> {
        if end < self.pos {
            return Err(Error::InvalidFormat(format!(
                "block end {end} lies before position {}",
                self.pos
            )));
        }
        self.read_bytes(end - self.pos)
    }

    /// Read an unsigned integer stored with a 1 to 5 byte prefix code.
    ///
    /// The number of leading zero bits of the first byte gives the number of
    /// extra bytes, which follow most significant first.
    pub fn read_compressed_u32(&mut self) -> Result<u32> {
        let first = self.read_u8()?;
        let (mut value, extra) = if first & 0x80 != 0 {
            (u32::from(first & 0x7F), 0)
        } else if first & 0x40 != 0 {
            (u32::from(first & 0x3F), 1)
        } else if first & 0x20 != 0 {
            (u32::from(first & 0x1F), 2)
        } else if first & 0x10 != 0 {
            (u32::from(first & 0x0F), 3)
        } else {
            (0, 4)
        };
        for _ in 0..extra {
            value = (value << 8) | u32::from(self.read_u8()?);
        }
        Ok(value)
    }

    /// Read a double stored with its bytes in reverse order.
    ///
    /// Returns the value and whether it is a NaN.
    pub fn read_double_reverted(&mut self) -> Result<(f64, bool)> {
        let v = binary::read_f64(&self.data, self.pos, self.order.flipped())?;
        self.pos += 8;
        Ok((v, v.is_nan()))
    }

    /// Read a StarOffice color.
    ///
    /// The first word is either a palette index or, with bit 15 set, a marker
    /// followed by three 16-bit channels of which only the high byte matters.
    pub fn read_color(&mut self) -> Result<RGBColor> {
        let pos = self.pos;
        let id = self.read_u16()?;
        if id & 0x8000 != 0 {
            let r = self.read_u16()?;
            let g = self.read_u16()?;
            let b = self.read_u16()?;
            return Ok(RGBColor::new((r >> 8) as u8, (g >> 8) as u8, (b >> 8) as u8));
        }
        RGBColor::from_palette(id)
            .ok_or_else(|| Error::Corrupted(format!("unknown color index {id} at {pos}")))
    }

    /// Read a fixed-width, NUL padded 8-bit field and return its content.
    pub fn read_fixed_name(&mut self, width: usize) -> Result<Bytes> {
        let raw = self.read_bytes(width)?;
        let len = strip_null_terminators(&raw).len();
        Ok(raw.slice(..len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("stream is locked"))
        }
    }

    #[test]
    fn test_from_reader() {
        let mut input = StarInput::from_reader(&[0x34, 0x12][..]).unwrap();
        assert_eq!(input.read_u16().unwrap(), 0x1234);
        assert!(matches!(StarInput::from_reader(FailingReader), Err(Error::Io(_))));
    }

    #[test]
    fn test_byte_order_flip() {
        let mut input = StarInput::new(vec![0x01, 0x02, 0x01, 0x02]);
        assert_eq!(input.read_u16().unwrap(), 0x0201);
        input.flip_byte_order();
        assert_eq!(input.read_u16().unwrap(), 0x0102);
        assert!(input.is_end());
    }

    #[test]
    fn test_short_read_keeps_position() {
        let mut input = StarInput::new(vec![0x01, 0x02, 0x03]);
        input.seek(1).unwrap();
        assert!(input.read_u32().is_err());
        assert_eq!(input.tell(), 1);
    }

    #[test]
    fn test_seek_bounds() {
        let mut input = StarInput::new(vec![0u8; 4]);
        assert!(input.seek(4).is_ok());
        assert!(input.seek(5).is_err());
        assert!(input.seek_relative(-5).is_err());
        assert!(input.seek_relative(-2).is_ok());
        assert_eq!(input.tell(), 2);
    }

    #[test]
    fn test_compressed_u32() {
        let mut input = StarInput::new(vec![
            0x85, // 5
            0x41, 0x02, // 0x102
            0x21, 0x02, 0x03, // 0x10203
            0x11, 0x02, 0x03, 0x04, // 0x1020304
            0x00, 0xDE, 0xAD, 0xBE, 0xEF, // 0xDEADBEEF
        ]);
        assert_eq!(input.read_compressed_u32().unwrap(), 5);
        assert_eq!(input.read_compressed_u32().unwrap(), 0x102);
        assert_eq!(input.read_compressed_u32().unwrap(), 0x10203);
        assert_eq!(input.read_compressed_u32().unwrap(), 0x1020304);
        assert_eq!(input.read_compressed_u32().unwrap(), 0xDEADBEEF);
    }

    #[test]
    fn test_double_reverted() {
        let mut input = StarInput::new(1.5f64.to_be_bytes().to_vec());
        let (value, nan) = input.read_double_reverted().unwrap();
        assert_eq!(value, 1.5);
        assert!(!nan);

        let mut input = StarInput::new(f64::NAN.to_be_bytes().to_vec());
        assert!(input.read_double_reverted().unwrap().1);
    }

    #[test]
    fn test_read_color() {
        let mut input = StarInput::new(vec![
            0x04, 0x00, // palette red
            0x00, 0x80, 0x00, 0x12, 0xFF, 0x34, 0x00, 0x56, // user color
            0x20, 0x00, // out of range index
        ]);
        assert_eq!(input.read_color().unwrap(), RGBColor::new(0x80, 0, 0));
        assert_eq!(input.read_color().unwrap(), RGBColor::new(0x12, 0x34, 0x56));
        assert!(input.read_color().is_err());
    }

    #[test]
    fn test_fixed_name_and_read_to() {
        let mut input = StarInput::new(b"Arial\0\0\0tail".to_vec());
        assert_eq!(&input.read_fixed_name(8).unwrap()[..], b"Arial");
        assert_eq!(&input.read_to(12).unwrap()[..], b"tail");
        assert!(input.read_to(4).is_err());
    }

    #[test]
    fn test_read_uint_widths() {
        let mut input = StarInput::new(vec![0xFF, 0xFE, 0xFF, 1, 0, 0, 0]);
        assert_eq!(input.read_int(1).unwrap(), -1);
        assert_eq!(input.read_int(2).unwrap(), -2);
        assert_eq!(input.read_uint(4).unwrap(), 1);
        assert!(input.read_uint(3).is_err());
    }
}
