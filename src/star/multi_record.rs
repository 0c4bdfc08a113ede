//! Aggregate "multi-record" zones.
//!
//! A multi-record is an Sfx record that holds a sequence of same-kind
//! sub-records. Entries are either stored back to back with a fixed size, or
//! addressed through a table of packed offsets placed after the content. Any
//! inconsistency degrades to fewer (or zero) entries; it never fails the
//! enclosing zone.

use std::fmt;

use super::zone::{CLOSE_TOLERANCE, StarZone};
use crate::common::Result;

/// Zone type byte marking a deliberately empty multi-record.
pub const EMPTY_ZONE: u8 = 0xFF;

/// Header type of fixed-size entries.
const FIXED_SIZE: u8 = 2;

/// Size of the multi-record header that offsets are relative to.
const HEADER_SIZE: usize = 14;

/// An open multi-record; it borrows nothing, so the zone stays usable.
#[derive(Debug, Default)]
pub struct MultiRecord {
    zone_type: u8,
    opened: bool,
    header_type: u8,
    header_version: u8,
    header_tag: u16,
    actual: u16,
    num_record: u16,
    content_size: u32,
    start: usize,
    end: usize,
    offsets: Vec<u32>,
    extra: String,
}

impl MultiRecord {
    /// Open the multi-record at the current position.
    ///
    /// Only a missing or oversized Sfx header is an error; the cursor is then
    /// back where it started. Every other problem yields an empty record
    /// whose [`extra`](Self::extra) text describes it.
    pub fn open(zone: &mut StarZone) -> Result<Self> {
        let zone_type = zone.open_sfx_record()?;
        let mut record = MultiRecord {
            zone_type,
            ..MultiRecord::default()
        };
        if zone_type == EMPTY_ZONE {
            record.extra = "###emptyZone,".to_string();
            return Ok(record);
        }
        if zone_type != 0 {
            zone.error(zone.tell(), format!("MultiRecord: unknown zone type {zone_type},"));
            record.extra = "###badZoneType,".to_string();
            return Ok(record);
        }

        record.opened = true;
        record.end = zone.record_last_position();
        if zone.tell() + 10 > record.end {
            zone.error(zone.tell(), "MultiRecord: the zone seems too short,");
            record.extra = "###zoneShort,".to_string();
            return Ok(record);
        }
        let input = zone.input();
        record.header_type = input.read_u8()?;
        record.header_version = input.read_u8()?;
        record.header_tag = input.read_u16()?;
        record.num_record = input.read_u16()?;
        record.content_size = input.read_u32()?;
        record.start = input.tell();

        if record.header_type == FIXED_SIZE {
            let needed = u64::from(record.num_record) * u64::from(record.content_size);
            if record.start as u64 + needed > record.end as u64 {
                record.extra = format!("##numRecord={},", record.num_record);
                record.num_record = if record.content_size != 0 && record.end > record.start {
                    let fits = (record.end - record.start) / record.content_size as usize;
                    u16::try_from(fits).unwrap_or(u16::MAX)
                } else {
                    0
                };
            }
            return Ok(record);
        }

        let table_base = if matches!(record.header_type, 3 | 7) {
            record.start
        } else {
            0
        };
        let table = table_base + record.content_size as usize;
        if table < record.start || table + 4 * usize::from(record.num_record) > record.end {
            zone.error(record.start, "MultiRecord: can not find the offset table,");
            record.extra = "###contentCount,".to_string();
            record.num_record = 0;
            return Ok(record);
        }
        record.end = table;
        let input = zone.input();
        input.seek(table)?;
        for _ in 0..record.num_record {
            record.offsets.push(input.read_u32()?);
        }
        input.seek(record.start)?;
        Ok(record)
    }

    /// Whether the header was read; empty and malformed zones are not.
    pub fn is_opened(&self) -> bool {
        self.opened
    }

    /// The header tag, when the zone was opened.
    pub fn header_tag(&self) -> Option<u16> {
        self.opened.then_some(self.header_tag)
    }

    pub fn header_type(&self) -> u8 {
        self.header_type
    }

    pub fn header_version(&self) -> u8 {
        self.header_version
    }

    pub fn zone_type(&self) -> u8 {
        self.zone_type
    }

    /// Number of entries that will be visited.
    pub fn len(&self) -> usize {
        usize::from(self.num_record)
    }

    pub fn is_empty(&self) -> bool {
        self.num_record == 0
    }

    /// Description of what went wrong while opening, if anything.
    pub fn extra(&self) -> &str {
        &self.extra
    }

    /// Start of the entry with index `actual`, or the content end.
    ///
    /// Fails with the offset when it points before the content.
    fn content_position(&self) -> std::result::Result<usize, usize> {
        if !self.opened || self.actual >= self.num_record {
            return Ok(self.end);
        }
        if self.header_type == FIXED_SIZE {
            return Ok(self.start + usize::from(self.actual) * self.content_size as usize);
        }
        let Some(&off) = self.offsets.get(usize::from(self.actual)) else {
            return Ok(self.end);
        };
        let off = (off >> 8) as usize;
        if off < HEADER_SIZE {
            return Err(off);
        }
        Ok(self.start + off - HEADER_SIZE)
    }

    /// Move to the next entry; `false` once every entry was visited.
    ///
    /// Entries whose offset points before the content are skipped.
    pub fn next_content(&mut self, zone: &mut StarZone, label: &str) -> bool {
        let new_pos = loop {
            match self.content_position() {
                Ok(pos) => break pos,
                Err(off) => {
                    zone.error(zone.tell(), format!("{label}:###offset={off},"));
                    self.actual += 1;
                },
            }
        };
        if new_pos >= self.end {
            return false;
        }
        self.actual += 1;
        let pos = zone.tell();
        if pos < new_pos && pos + CLOSE_TOLERANCE >= new_pos {
            zone.trace_mut().delimit(pos, '|');
        } else if pos != new_pos {
            zone.note(pos, format!("{label}:###extra"));
        }
        if zone.input().seek(new_pos).is_err() {
            return false;
        }
        if matches!(self.header_type, 7 | 8) {
            // content tag, unused
            return zone.input().skip(2).is_ok();
        }
        true
    }

    /// Close the zone, leaving the cursor at the end of the Sfx record.
    pub fn close(self, zone: &mut StarZone, label: &str) -> bool {
        let pos = zone.tell();
        if self.opened && pos < self.end && pos + CLOSE_TOLERANCE >= self.end {
            zone.trace_mut().delimit(pos, '|');
        }
        if self.opened && (pos <= self.end && pos + CLOSE_TOLERANCE >= self.end) {
            let last = zone.record_last_position();
            if zone.input().seek(last).is_err() {
                return false;
            }
        }
        zone.close_sfx_record(label)
    }
}

impl fmt::Display for MultiRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.opened {
            return f.write_str(&self.extra);
        }
        if self.header_type != 0 {
            write!(f, "type={},", self.header_type)?;
        }
        if self.header_version != 0 {
            write!(f, "version={},", self.header_version)?;
        }
        if self.header_tag != 0 {
            write!(f, "tag={},", self.header_tag)?;
        }
        if self.num_record != 0 {
            write!(f, "num[record]={},", self.num_record)?;
        }
        if self.content_size != 0 {
            write!(f, "content[size/pos]={},", self.content_size)?;
        }
        if !self.offsets.is_empty() {
            f.write_str("offset=[")?;
            for off in &self.offsets {
                if off & 0xFF != 0 {
                    write!(f, "{}:{},", off >> 8, off & 0xFF)?;
                } else {
                    write!(f, "{},", off >> 8)?;
                }
            }
            f.write_str("],")?;
        }
        f.write_str(&self.extra)
    }
}
