//! Byte builder shared by the unit tests.

use crate::common::ByteOrder;

/// Chainable writer producing StarOffice-style binary data.
#[derive(Debug, Default)]
pub struct ByteWriter {
    data: Vec<u8>,
    order: ByteOrder,
}

impl ByteWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn big_endian() -> Self {
        Self {
            data: Vec::new(),
            order: ByteOrder::Big,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    fn put(&mut self, le: &[u8]) -> &mut Self {
        match self.order {
            ByteOrder::Little => self.data.extend_from_slice(le),
            ByteOrder::Big => self.data.extend(le.iter().rev()),
        }
        self
    }

    pub fn u8(&mut self, v: u8) -> &mut Self {
        self.data.push(v);
        self
    }

    pub fn bool(&mut self, v: bool) -> &mut Self {
        self.u8(u8::from(v))
    }

    pub fn u16(&mut self, v: u16) -> &mut Self {
        self.put(&v.to_le_bytes())
    }

    pub fn i16(&mut self, v: i16) -> &mut Self {
        self.put(&v.to_le_bytes())
    }

    pub fn u24(&mut self, v: u32) -> &mut Self {
        self.put(&v.to_le_bytes()[..3])
    }

    pub fn u32(&mut self, v: u32) -> &mut Self {
        self.put(&v.to_le_bytes())
    }

    pub fn i32(&mut self, v: i32) -> &mut Self {
        self.put(&v.to_le_bytes())
    }

    pub fn f64(&mut self, v: f64) -> &mut Self {
        self.put(&v.to_le_bytes())
    }

    pub fn bytes(&mut self, v: &[u8]) -> &mut Self {
        self.data.extend_from_slice(v);
        self
    }

    pub fn zeros(&mut self, n: usize) -> &mut Self {
        self.data.resize(self.data.len() + n, 0);
        self
    }

    /// u16 length followed by the (ASCII) bytes.
    pub fn string(&mut self, s: &str) -> &mut Self {
        self.u16(s.len() as u16).bytes(s.as_bytes())
    }

    /// u16 count followed by UTF-16 code units.
    pub fn unicode(&mut self, s: &str) -> &mut Self {
        let units: Vec<u16> = s.encode_utf16().collect();
        self.u16(units.len() as u16);
        for unit in units {
            self.u16(unit);
        }
        self
    }

    /// A user color: marker word then three 16-bit channels.
    pub fn rgb(&mut self, r: u8, g: u8, b: u8) -> &mut Self {
        self.u16(0x8000)
            .u16(u16::from(r) << 8)
            .u16(u16::from(g) << 8)
            .u16(u16::from(b) << 8)
    }

    /// Overwrite a little-endian u32 at `at`.
    pub fn patch_u32(&mut self, at: usize, v: u32) -> &mut Self {
        self.data[at..at + 4].copy_from_slice(&v.to_le_bytes());
        self
    }

    /// Append an SW record: tag, 24-bit length including the header, body.
    pub fn sw_record(&mut self, tag: u8, body: &[u8]) -> &mut Self {
        self.u8(tag).u24(body.len() as u32 + 4).bytes(body)
    }

    /// Append a version-compat header around `body`.
    pub fn compat(&mut self, version: u16, body: &[u8]) -> &mut Self {
        self.u16(version).u32(body.len() as u32).bytes(body)
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.data.clone()
    }
}
