//! Bounded record framing over a [`StarInput`].
//!
//! A `StarZone` keeps a stack of open records. Each record knows its end
//! offset, computed from the header when it is opened and checked against the
//! enclosing record. Closing a record always leaves the cursor at that end,
//! whatever the caller consumed in between.

use encoding_rs::Encoding;
use smallvec::SmallVec;
use tracing::warn;

use super::input::StarInput;
use crate::common::debug::entry_label;
use crate::common::encoding::{decode_8bit, decode_utf16_units};
use crate::common::{DebugTrace, Error, Result};

/// Over-reads up to this many bytes are tolerated when a record closes.
pub const CLOSE_TOLERANCE: usize = 4;

/// Explicit knobs for a zone.
#[derive(Debug, Clone, Copy)]
pub struct ZoneOptions {
    /// Encoding of 8-bit strings
    pub encoding: &'static Encoding,
    /// Whether the debug trace records annotations
    pub trace: bool,
    /// Maximum nesting of recursive decoders (item sets, nested content)
    pub max_depth: usize,
}

impl Default for ZoneOptions {
    fn default() -> Self {
        Self {
            encoding: encoding_rs::WINDOWS_1252,
            trace: true,
            max_depth: 64,
        }
    }
}

/// The header layout of an open record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    /// u8 tag, 24-bit length counting the 4 header bytes
    Sw,
    /// u8 tag, 24-bit length of the content only
    Sfx,
    /// u16 version, u32 length of the content
    VersionCompat,
    /// u32 length of the content
    Plain,
}

#[derive(Debug, Clone, Copy)]
struct Record {
    kind: RecordKind,
    tag: u8,
    version: u16,
    end: usize,
}

/// Input cursor plus record stack, trace and string settings.
#[derive(Debug)]
pub struct StarZone {
    input: StarInput,
    name: String,
    records: SmallVec<[Record; 8]>,
    trace: DebugTrace,
    encoding: &'static Encoding,
    unicode: bool,
    pool_names: Vec<String>,
    depth: usize,
    max_depth: usize,
}

impl StarZone {
    pub fn new(input: StarInput, name: impl Into<String>, options: ZoneOptions) -> Self {
        Self {
            input,
            name: name.into(),
            records: SmallVec::new(),
            trace: DebugTrace::new(options.trace),
            encoding: options.encoding,
            unicode: false,
            pool_names: Vec::new(),
            depth: 0,
            max_depth: options.max_depth,
        }
    }

    /// Zone over `data` with default options.
    pub fn from_bytes(data: impl Into<bytes::Bytes>, name: impl Into<String>) -> Self {
        Self::new(StarInput::new(data), name, ZoneOptions::default())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn input(&mut self) -> &mut StarInput {
        &mut self.input
    }

    #[inline]
    pub fn input_ref(&self) -> &StarInput {
        &self.input
    }

    #[inline]
    pub fn tell(&self) -> usize {
        self.input.tell()
    }

    #[inline]
    pub fn trace(&self) -> &DebugTrace {
        &self.trace
    }

    #[inline]
    pub fn trace_mut(&mut self) -> &mut DebugTrace {
        &mut self.trace
    }

    pub fn into_trace(self) -> DebugTrace {
        self.trace
    }

    /// Annotate the current position.
    pub fn note(&mut self, position: usize, text: impl Into<String>) {
        self.trace.note(position, text);
    }

    /// Flag an error at `position`; also reported through `tracing`.
    pub fn error(&mut self, position: usize, text: impl Into<String>) {
        let text = text.into();
        warn!(zone = %self.name, position, "{}", text);
        self.trace.error(position, text);
    }

    /// `Entries(<kind>)[<record level>]:`
    pub fn label(&self, kind: &str) -> String {
        entry_label(kind, self.record_level())
    }

    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    pub fn set_encoding(&mut self, encoding: &'static Encoding) {
        self.encoding = encoding;
    }

    pub fn is_unicode(&self) -> bool {
        self.unicode
    }

    /// Read strings as UTF-16 code units instead of 8-bit characters.
    pub fn set_unicode(&mut self, unicode: bool) {
        self.unicode = unicode;
    }

    #[inline]
    pub fn record_level(&self) -> usize {
        self.records.len()
    }

    /// End of the innermost open record, or of the stream.
    #[inline]
    pub fn record_last_position(&self) -> usize {
        self.records
            .last()
            .map_or(self.input.size(), |record| record.end)
    }

    /// Version of the innermost record when it is a version-compat header.
    pub fn header_version(&self) -> u16 {
        match self.records.last() {
            Some(record) if record.kind == RecordKind::VersionCompat => record.version,
            _ => 0,
        }
    }

    /// Tag of the innermost record.
    pub fn record_tag(&self) -> Option<u8> {
        self.records.last().map(|record| record.tag)
    }

    fn push_record(
        &mut self,
        start: usize,
        kind: RecordKind,
        tag: u8,
        version: u16,
        end: usize,
    ) -> Result<()> {
        let parent_end = self.record_last_position();
        if end > parent_end || end < self.input.tell() {
            self.input.seek(start)?;
            return Err(Error::Corrupted(format!(
                "{kind:?} record at {start} ends at {end}, outside its parent (end {parent_end})"
            )));
        }
        self.trace.delimit(start, '[');
        self.records.push(Record {
            kind,
            tag,
            version,
            end,
        });
        Ok(())
    }

    /// Run `read` and rewind to `start` if it fails.
    fn with_rewind<T>(&mut self, read: impl FnOnce(&mut StarInput) -> Result<T>) -> Result<T> {
        let start = self.input.tell();
        let res = read(&mut self.input);
        if res.is_err() {
            self.input.seek(start)?;
        }
        res
    }

    /// Open a writer-style record and return its tag.
    pub fn open_sw_record(&mut self) -> Result<u8> {
        let start = self.input.tell();
        let (tag, len) = self.with_rewind(|input| Ok((input.read_u8()?, input.read_u24()?)))?;
        if len < 4 {
            self.input.seek(start)?;
            return Err(Error::Corrupted(format!("record at {start} is too short")));
        }
        self.push_record(start, RecordKind::Sw, tag, 0, start + len as usize)?;
        Ok(tag)
    }

    /// Open an Sfx record and return its tag.
    pub fn open_sfx_record(&mut self) -> Result<u8> {
        let start = self.input.tell();
        let (tag, len) = self.with_rewind(|input| Ok((input.read_u8()?, input.read_u24()?)))?;
        self.push_record(start, RecordKind::Sfx, tag, 0, start + 4 + len as usize)?;
        Ok(tag)
    }

    /// Open a version-compat header and return its version.
    pub fn open_version_compat_header(&mut self) -> Result<u16> {
        let start = self.input.tell();
        let (version, len) =
            self.with_rewind(|input| Ok((input.read_u16()?, input.read_u32()?)))?;
        let end = (start + 6)
            .checked_add(len as usize)
            .ok_or_else(|| Error::Corrupted("record length overflow".to_string()))?;
        self.push_record(start, RecordKind::VersionCompat, 0, version, end)?;
        Ok(version)
    }

    /// Open a record introduced only by its u32 length.
    pub fn open_record(&mut self) -> Result<()> {
        let start = self.input.tell();
        let len = self.with_rewind(|input| input.read_u32())?;
        let end = (start + 4)
            .checked_add(len as usize)
            .ok_or_else(|| Error::Corrupted("record length overflow".to_string()))?;
        self.push_record(start, RecordKind::Plain, 0, 0, end)
    }

    /// Close the innermost record and move the cursor to its end.
    ///
    /// Returns `false` when nothing was open, when the record is not of the
    /// expected kind, or when the caller read more than [`CLOSE_TOLERANCE`]
    /// bytes past the end. The cursor is realigned in every case.
    pub fn close_record(&mut self, kind: RecordKind, label: &str) -> bool {
        let Some(record) = self.records.pop() else {
            self.error(self.input.tell(), format!("{label}: no record to close,"));
            return false;
        };
        let mut ok = true;
        if record.kind != kind {
            self.error(
                self.input.tell(),
                format!("{label}: closing a {:?} record as {kind:?},", record.kind),
            );
            ok = false;
        }
        let pos = self.input.tell();
        if pos > record.end + CLOSE_TOLERANCE {
            self.error(pos, format!("{label}: read too much data,"));
            ok = false;
        } else if pos < record.end {
            self.trace.delimit(pos, '|');
            self.note(pos, format!("{label}:###extra"));
        }
        self.trace.delimit(record.end, ']');
        if let Err(err) = self.input.seek(record.end) {
            warn!(zone = %self.name, "{label}: can not realign: {err}");
            ok = false;
        }
        ok
    }

    pub fn close_sw_record(&mut self, label: &str) -> bool {
        self.close_record(RecordKind::Sw, label)
    }

    pub fn close_sfx_record(&mut self, label: &str) -> bool {
        self.close_record(RecordKind::Sfx, label)
    }

    pub fn close_version_compat_header(&mut self, label: &str) -> bool {
        self.close_record(RecordKind::VersionCompat, label)
    }

    /// Read a u16 length-prefixed string in the zone's encoding.
    pub fn read_string(&mut self) -> Result<String> {
        let encoding = self.encoding;
        if self.unicode {
            return self.read_unicode_string();
        }
        self.with_rewind(|input| {
            let len = input.read_u16()?;
            let raw = input.read_bytes(usize::from(len))?;
            Ok(decode_8bit(&raw, encoding))
        })
    }

    /// Read a u16 count followed by that many UTF-16 code units.
    pub fn read_unicode_string(&mut self) -> Result<String> {
        self.with_rewind(|input| {
            let len = usize::from(input.read_u16()?);
            if len * 2 > input.remaining() {
                return Err(Error::UnexpectedEof {
                    offset: input.tell(),
                    needed: len * 2,
                    available: input.remaining(),
                });
            }
            let mut units = Vec::with_capacity(len);
            for _ in 0..len {
                units.push(input.read_u16()?);
            }
            Ok(decode_utf16_units(&units))
        })
    }

    /// Decode raw 8-bit bytes with the zone's encoding.
    pub fn decode(&self, raw: &[u8]) -> String {
        decode_8bit(raw, self.encoding)
    }

    /// Install the string pool used to resolve pool name identifiers.
    pub fn set_pool_names(&mut self, names: Vec<String>) {
        self.pool_names = names;
    }

    pub fn add_pool_name(&mut self, name: impl Into<String>) {
        self.pool_names.push(name.into());
    }

    /// Resolve a pool name identifier.
    pub fn pool_name(&self, id: u16) -> Option<&str> {
        self.pool_names.get(usize::from(id)).map(String::as_str)
    }

    /// Enter a nested decoder; fails once the depth limit is reached.
    pub fn enter(&mut self) -> Result<()> {
        if self.depth >= self.max_depth {
            return Err(Error::Corrupted(format!(
                "nesting deeper than {} levels",
                self.max_depth
            )));
        }
        self.depth += 1;
        Ok(())
    }

    pub fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub fn depth(&self) -> usize {
        self.depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::star::test_utils::ByteWriter;
    use proptest::prelude::*;

    #[test]
    fn test_sw_record_length_includes_header() {
        let mut w = ByteWriter::new();
        w.u8(b'X').u24(8).u32(0xAABBCCDD).u8(0x11);
        let mut zone = StarZone::from_bytes(w.into_vec(), "test");
        assert_eq!(zone.open_sw_record().unwrap(), b'X');
        assert_eq!(zone.record_last_position(), 8);
        assert_eq!(zone.input().read_u16().unwrap(), 0xCCDD);
        assert!(zone.close_sw_record("Test"));
        assert_eq!(zone.tell(), 8);
        assert_eq!(zone.record_level(), 0);
    }

    #[test]
    fn test_sfx_and_compat_headers() {
        let mut w = ByteWriter::new();
        w.u8(0).u24(8); // sfx record, content 8 bytes
        w.u16(3).u32(2).u16(0x1234); // compat header version 3, 2 bytes
        let mut zone = StarZone::from_bytes(w.into_vec(), "test");
        assert_eq!(zone.open_sfx_record().unwrap(), 0);
        assert_eq!(zone.record_last_position(), 12);
        assert_eq!(zone.open_version_compat_header().unwrap(), 3);
        assert_eq!(zone.header_version(), 3);
        assert_eq!(zone.record_last_position(), 12);
        assert!(zone.close_version_compat_header("Compat"));
        assert!(zone.close_sfx_record("Sfx"));
        assert_eq!(zone.tell(), 12);
    }

    #[test]
    fn test_child_past_parent_is_rejected() {
        let mut w = ByteWriter::new();
        w.u8(b'A').u24(10); // parent ends at 10
        w.u8(b'B').u24(20); // child claims 20 bytes
        w.zeros(12);
        let mut zone = StarZone::from_bytes(w.into_vec(), "test");
        zone.open_sw_record().unwrap();
        assert!(zone.open_sw_record().is_err());
        assert_eq!(zone.tell(), 4);
        assert_eq!(zone.record_level(), 1);
    }

    #[test]
    fn test_close_realigns_after_over_read() {
        let mut w = ByteWriter::new();
        w.u8(b'A').u24(6).u16(1).zeros(16);
        let mut zone = StarZone::from_bytes(w.into_vec(), "test");
        zone.open_sw_record().unwrap();
        zone.input().seek(6 + 2).unwrap();
        assert!(zone.close_sw_record("Small"));
        assert_eq!(zone.tell(), 6);

        zone.input().seek(0).unwrap();
        zone.open_sw_record().unwrap();
        zone.input().seek(6 + 10).unwrap();
        assert!(!zone.close_sw_record("Big"));
        assert_eq!(zone.tell(), 6);
        assert!(zone.trace().contains("read too much"));
    }

    #[test]
    fn test_close_without_open() {
        let mut zone = StarZone::from_bytes(vec![0u8; 4], "test");
        assert!(!zone.close_sw_record("Nothing"));
        assert!(zone.trace().has_errors());
    }

    #[test]
    fn test_short_sw_length_is_error() {
        let mut w = ByteWriter::new();
        w.u8(b'A').u24(2);
        let mut zone = StarZone::from_bytes(w.into_vec(), "test");
        assert!(zone.open_sw_record().is_err());
        assert_eq!(zone.tell(), 0);
    }

    #[test]
    fn test_read_string_encodings() {
        let mut w = ByteWriter::new();
        w.u16(4).bytes(b"caf\xe9");
        w.u16(2).u16(0x41).u16(0x3B1);
        let mut zone = StarZone::from_bytes(w.into_vec(), "test");
        assert_eq!(zone.read_string().unwrap(), "café");
        zone.set_unicode(true);
        assert_eq!(zone.read_string().unwrap(), "Aα");
    }

    #[test]
    fn test_truncated_string_rewinds() {
        let mut w = ByteWriter::new();
        w.u16(10).bytes(b"abc");
        let mut zone = StarZone::from_bytes(w.into_vec(), "test");
        assert!(zone.read_string().is_err());
        assert_eq!(zone.tell(), 0);
    }

    #[test]
    fn test_depth_limit() {
        let options = ZoneOptions {
            max_depth: 2,
            ..ZoneOptions::default()
        };
        let mut zone = StarZone::new(StarInput::new(Vec::new()), "test", options);
        assert!(zone.enter().is_ok());
        assert!(zone.enter().is_ok());
        assert!(zone.enter().is_err());
        zone.leave();
        assert!(zone.enter().is_ok());
    }

    #[test]
    fn test_pool_names() {
        let mut zone = StarZone::from_bytes(Vec::new(), "test");
        zone.set_pool_names(vec!["Index".to_string(), "Contents".to_string()]);
        assert_eq!(zone.pool_name(1), Some("Contents"));
        assert_eq!(zone.pool_name(2), None);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_close_lands_on_declared_end(
            prefix in 0usize..16,
            len in 0usize..64,
            slack in 0usize..32,
            consumed in 0usize..64,
        ) {
            let mut w = ByteWriter::new();
            w.zeros(prefix);
            w.u8(0).u24(len as u32);
            w.zeros(len + slack);
            let mut zone = StarZone::from_bytes(w.into_vec(), "prop");
            zone.input().seek(prefix).unwrap();
            zone.open_sfx_record().unwrap();
            let start = zone.tell();
            let consumed = consumed.min(len);
            zone.input().skip(consumed).unwrap();
            prop_assert!(zone.close_sfx_record("Prop"));
            prop_assert_eq!(zone.tell(), start + len);
        }
    }
}
