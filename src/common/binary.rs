//! Binary data parsing utilities.
//!
//! StarOffice streams were written on both little- and big-endian machines, so
//! every fixed-width reader here takes the byte order at call time. The actual
//! conversion goes through `zerocopy` byte-order types.

use zerocopy::{BE, F64, FromBytes, I16, I32, LE, U16, U32, U64};

/// Byte order of a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ByteOrder {
    /// Least significant byte first (the usual StarOffice order)
    #[default]
    Little,
    /// Most significant byte first
    Big,
}

impl ByteOrder {
    /// The opposite byte order.
    #[inline]
    pub const fn flipped(self) -> Self {
        match self {
            ByteOrder::Little => ByteOrder::Big,
            ByteOrder::Big => ByteOrder::Little,
        }
    }
}

/// Binary parsing error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BinaryError {
    /// Not enough data to read the requested type
    InsufficientData {
        offset: usize,
        expected: usize,
        available: usize,
    },
    /// Failed to parse the data
    ParseError(String),
}

impl std::fmt::Display for BinaryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BinaryError::InsufficientData {
                offset,
                expected,
                available,
            } => {
                write!(
                    f,
                    "Insufficient data at {}: expected {}, got {}",
                    offset, expected, available
                )
            },
            BinaryError::ParseError(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for BinaryError {}

/// Result type for binary operations
pub type BinaryResult<T> = Result<T, BinaryError>;

/// Borrow `len` bytes starting at `offset`, or report how short the data is.
#[inline]
pub fn slice_at(data: &[u8], offset: usize, len: usize) -> BinaryResult<&[u8]> {
    match offset.checked_add(len) {
        Some(end) if end <= data.len() => Ok(&data[offset..end]),
        _ => Err(BinaryError::InsufficientData {
            offset,
            expected: len,
            available: data.len().saturating_sub(offset),
        }),
    }
}

/// Read one byte at the given offset.
#[inline]
pub fn read_u8(data: &[u8], offset: usize) -> BinaryResult<u8> {
    slice_at(data, offset, 1).map(|b| b[0])
}

macro_rules! ordered_reader {
    ($(#[$doc:meta])* $name:ident, $ty:ty, $wrapper:ident, $size:expr) => {
        $(#[$doc])*
        #[inline]
        pub fn $name(data: &[u8], offset: usize, order: ByteOrder) -> BinaryResult<$ty> {
            let bytes = slice_at(data, offset, $size)?;
            let value = match order {
                ByteOrder::Little => $wrapper::<LE>::read_from_bytes(bytes).ok().map(|v| v.get()),
                ByteOrder::Big => $wrapper::<BE>::read_from_bytes(bytes).ok().map(|v| v.get()),
            };
            value.ok_or_else(|| {
                BinaryError::ParseError(concat!("Failed to read ", stringify!($ty)).to_string())
            })
        }
    };
}

ordered_reader!(
    /// Read a u16 in the given byte order.
    ///
    /// # Examples
    ///
    /// ```
    /// use stoff::common::binary::{ByteOrder, read_u16};
    /// let data = [0x34, 0x12];
    /// assert_eq!(read_u16(&data, 0, ByteOrder::Little).unwrap(), 0x1234);
    /// assert_eq!(read_u16(&data, 0, ByteOrder::Big).unwrap(), 0x3412);
    /// ```
    read_u16, u16, U16, 2
);
ordered_reader!(
    /// Read an i16 in the given byte order.
    read_i16, i16, I16, 2
);
ordered_reader!(
    /// Read a u32 in the given byte order.
    read_u32, u32, U32, 4
);
ordered_reader!(
    /// Read an i32 in the given byte order.
    read_i32, i32, I32, 4
);
ordered_reader!(
    /// Read a u64 in the given byte order.
    read_u64, u64, U64, 8
);
ordered_reader!(
    /// Read an IEEE 754 double in the given byte order.
    read_f64, f64, F64, 8
);

/// Read a 24-bit unsigned integer, as used by record length fields.
#[inline]
pub fn read_u24(data: &[u8], offset: usize, order: ByteOrder) -> BinaryResult<u32> {
    let b = slice_at(data, offset, 3)?;
    Ok(match order {
        ByteOrder::Little => u32::from(b[0]) | u32::from(b[1]) << 8 | u32::from(b[2]) << 16,
        ByteOrder::Big => u32::from(b[2]) | u32::from(b[1]) << 8 | u32::from(b[0]) << 16,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_u16_both_orders() {
        let data = [0x34, 0x12, 0x78, 0x56];
        assert!(read_u16(&data, 0, ByteOrder::Little).is_ok_and(|v| v == 0x1234));
        assert!(read_u16(&data, 2, ByteOrder::Big).is_ok_and(|v| v == 0x7856));
        assert!(read_u16(&data, 3, ByteOrder::Little).is_err());
    }

    #[test]
    fn test_read_u32_le() {
        let data = [0x78, 0x56, 0x34, 0x12];
        assert!(read_u32(&data, 0, ByteOrder::Little).is_ok_and(|v| v == 0x12345678));
        assert!(read_u32(&data, 1, ByteOrder::Little).is_err());
    }

    #[test]
    fn test_read_u24() {
        let data = [0x01, 0x02, 0x03];
        assert_eq!(read_u24(&data, 0, ByteOrder::Little).unwrap(), 0x030201);
        assert_eq!(read_u24(&data, 0, ByteOrder::Big).unwrap(), 0x010203);
    }

    #[test]
    fn test_short_read_reports_offset() {
        let data = [0u8; 3];
        let err = read_i32(&data, 2, ByteOrder::Little).unwrap_err();
        assert_eq!(
            err,
            BinaryError::InsufficientData {
                offset: 2,
                expected: 4,
                available: 1
            }
        );
    }

    #[test]
    fn test_offset_overflow_is_error() {
        let data = [0u8; 4];
        assert!(slice_at(&data, usize::MAX, 2).is_err());
    }

    #[test]
    fn test_flipped() {
        assert_eq!(ByteOrder::Little.flipped(), ByteOrder::Big);
        assert_eq!(ByteOrder::Big.flipped().flipped(), ByteOrder::Big);
    }
}
