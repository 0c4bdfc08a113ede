//! StarMath 3.x documents.
//!
//! The stream starts with a u32 magic and a u32 version, then a list of
//! entries introduced by a one-byte tag and closed by a zero tag. The files
//! were written on both little- and big-endian machines, so the magic is
//! tried once in each byte order.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::common::{Error, Result};
use crate::star::zone::StarZone;

/// `SM30` and `0304`, as read in the file's byte order.
const MATH_MAGICS: [u32; 2] = [0x3033_4d53, 0x3430_3330];

/// A date and a time stored as `YYYYMMDD` and `HHMMSSCC` integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarDateTime {
    pub date: u32,
    pub time: u32,
}

impl StarDateTime {
    /// The decoded value, `None` when either part is out of range.
    pub fn to_datetime(self) -> Option<NaiveDateTime> {
        let date = NaiveDate::from_ymd_opt(
            i32::try_from(self.date / 10000).ok()?,
            self.date / 100 % 100,
            self.date % 100,
        )?;
        let time = NaiveTime::from_hms_milli_opt(
            self.time / 1_000_000,
            self.time / 10000 % 100,
            self.time / 100 % 100,
            self.time % 100 * 10,
        )?;
        Some(NaiveDateTime::new(date, time))
    }
}

/// Document information: four strings, two of them dated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MathInfo {
    pub strings: Vec<String>,
    pub dates: Vec<StarDateTime>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MathFont {
    pub name: String,
    pub family: u32,
    pub encoding: u32,
    pub weight: u32,
    pub italic: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MathFormat {
    pub base_height: u8,
    pub text_mode: bool,
    pub scale_normal_bracket: bool,
    pub left_space: u16,
    pub right_space: u16,
    pub sizes: Vec<u16>,
    pub top_space: u16,
    pub fonts: Vec<MathFont>,
    pub distances: Vec<u16>,
    pub version: u8,
    pub horizontal_align: u8,
    pub bottom_space: u16,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MathDocument {
    pub version: u32,
    /// The formula
    pub text: Option<String>,
    pub info: Option<MathInfo>,
    pub format: Option<MathFormat>,
    /// Symbol set names and their counts
    pub symbols: Vec<(String, u16)>,
    /// False when an entry could not be read
    pub complete: bool,
}

/// Read a math document from the start of `zone`.
///
/// Returns `None` when neither byte order gives a known magic. A damaged
/// entry ends the reading; what was read before is kept.
pub fn read_math_document(zone: &mut StarZone) -> Option<MathDocument> {
    let label = zone.label("SMMathDocument");
    let version = match read_magic(zone) {
        Ok(version) => version,
        Err(err) => {
            zone.error(0, format!("{label}{err},"));
            return None;
        },
    };
    zone.note(0, format!("{label}vers={version:x},"));

    let mut doc = MathDocument {
        version,
        complete: true,
        ..MathDocument::default()
    };
    while !zone.input_ref().is_end() {
        let pos = zone.tell();
        let tag = match zone.input().read_u8() {
            Ok(tag) => tag,
            Err(_) => break,
        };
        if tag == 0 {
            break;
        }
        let entry = format!("SMMathDocument[{}]:", char::from(tag));
        if let Err(err) = read_entry(zone, tag, &mut doc) {
            zone.error(pos, format!("{entry}{err},"));
            let end = zone.tell();
            zone.trace_mut().delimit(end, '|');
            doc.complete = false;
            break;
        }
        zone.note(pos, entry);
    }
    Some(doc)
}

fn read_magic(zone: &mut StarZone) -> Result<u32> {
    let input = zone.input();
    input.seek(0)?;
    let mut magic = input.read_u32()?;
    if !MATH_MAGICS.contains(&magic) {
        input.flip_byte_order();
        input.seek(0)?;
        magic = input.read_u32()?;
        if !MATH_MAGICS.contains(&magic) {
            input.flip_byte_order();
            input.seek(0)?;
            return Err(Error::BadMagic {
                expected: "SM30".to_string(),
                found: format!("{magic:#010x}"),
            });
        }
    }
    input.read_u32()
}

fn read_entry(zone: &mut StarZone, tag: u8, doc: &mut MathDocument) -> Result<()> {
    match tag {
        b'T' => doc.text = Some(zone.read_string()?),
        b'D' => {
            let mut info = MathInfo::default();
            for i in 0..4 {
                info.strings.push(zone.read_string()?);
                if i == 1 || i == 2 {
                    let input = zone.input();
                    info.dates.push(StarDateTime {
                        date: input.read_u32()?,
                        time: input.read_u32()?,
                    });
                }
            }
            doc.info = Some(info);
        },
        b'F' => doc.format = Some(read_format(zone)?),
        b'S' => {
            let name = zone.read_string()?;
            let count = zone.input().read_u16()?;
            doc.symbols.push((name, count));
        },
        _ => return Err(Error::InvalidFormat(format!("unexpected tag {tag:#x}"))),
    }
    Ok(())
}

fn read_format(zone: &mut StarZone) -> Result<MathFormat> {
    let input = zone.input();
    let flags = input.read_u16()?;
    let mut format = MathFormat {
        base_height: (flags & 0xFF) as u8,
        text_mode: flags & 0x100 != 0,
        scale_normal_bracket: flags & 0x200 != 0,
        left_space: input.read_u16()?,
        right_space: input.read_u16()?,
        ..MathFormat::default()
    };
    for _ in 0..5 {
        format.sizes.push(input.read_u16()?);
    }
    format.top_space = input.read_u16()?;
    for _ in 0..7 {
        if zone.input_ref().is_end() {
            return Err(Error::Corrupted("can not read a font".to_string()));
        }
        let name = zone.read_string()?;
        let input = zone.input();
        format.fonts.push(MathFont {
            name,
            family: input.read_u32()?,
            encoding: input.read_u32()?,
            weight: input.read_u32()?,
            italic: input.read_u32()?,
        });
    }
    let input = zone.input();
    if input.remaining() < 21 * 2 {
        return Err(Error::Corrupted("the format zone is too short".to_string()));
    }
    for _ in 0..19 {
        format.distances.push(input.read_u16()?);
    }
    let align = input.read_u16()?;
    format.version = (align >> 8) as u8;
    format.horizontal_align = (align & 0xFF) as u8;
    format.bottom_space = input.read_u16()?;
    Ok(format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::ByteOrder;
    use crate::star::input::StarInput;
    use crate::star::test_utils::ByteWriter;
    use crate::star::zone::ZoneOptions;
    use proptest::prelude::*;

    fn document(w: &mut ByteWriter, formula: &str, date: u32, time: u32) {
        w.u32(0x3033_4d53).u32(0x0300);
        w.u8(b'T').string(formula);
        w.u8(b'D').string("title").string("author").u32(date).u32(time);
        w.string("").u32(date).u32(time).string("comment");
        w.u8(b'S').string("Greek").u16(3);
        w.u8(0);
    }

    fn decode(data: Vec<u8>) -> (Option<MathDocument>, StarZone) {
        let mut zone = StarZone::new(StarInput::new(data), "math", ZoneOptions::default());
        (read_math_document(&mut zone), zone)
    }

    #[test]
    fn test_read_document() {
        let mut w = ByteWriter::new();
        document(&mut w, "a over b", 19_990_321, 13_450_000);
        let (doc, zone) = decode(w.into_vec());
        let doc = doc.unwrap();
        assert_eq!(doc.version, 0x0300);
        assert_eq!(doc.text.as_deref(), Some("a over b"));
        assert_eq!(doc.symbols, vec![("Greek".to_string(), 3)]);
        let info = doc.info.unwrap();
        assert_eq!(info.strings, vec!["title", "author", "", "comment"]);
        let when = info.dates[0].to_datetime().unwrap();
        assert_eq!(when.to_string(), "1999-03-21 13:45:00");
        assert!(doc.complete);
        assert!(!zone.trace().has_errors());
    }

    #[test]
    fn test_invalid_date_is_kept_raw() {
        let stamp = StarDateTime {
            date: 19_991_332,
            time: 0,
        };
        assert_eq!(stamp.to_datetime(), None);
        assert_eq!(stamp.date, 19_991_332);
    }

    #[test]
    fn test_unknown_magic_fails() {
        let (doc, zone) = decode(vec![1, 2, 3, 4, 0, 0, 0, 0]);
        assert!(doc.is_none());
        assert!(zone.trace().has_errors());
        assert_eq!(zone.input_ref().byte_order(), ByteOrder::Little);
    }

    #[test]
    fn test_unexpected_tag_stops() {
        let mut w = ByteWriter::new();
        w.u32(0x3430_3330).u32(1);
        w.u8(b'T').string("x").u8(b'?').u8(b'T').string("y");
        let (doc, zone) = decode(w.into_vec());
        let doc = doc.unwrap();
        assert_eq!(doc.text.as_deref(), Some("x"));
        assert!(!doc.complete);
        assert!(zone.trace().contains("unexpected tag 0x3f"));
    }

    #[test]
    fn test_format_entry() {
        let mut w = ByteWriter::new();
        w.u32(0x3033_4d53).u32(1).u8(b'F');
        w.u16(0x0112).u16(5).u16(0);
        for size in [12, 8, 6, 14, 10] {
            w.u16(size);
        }
        w.u16(0);
        for name in ["Times", "Times", "Helvetica", "Courier", "Times", "Times", "Symbol"] {
            w.string(name).u32(1).u32(0).u32(0).u32(0);
        }
        for d in 0..19 {
            w.u16(d);
        }
        w.u16(0x0201).u16(7);
        w.u8(0);
        let (doc, _) = decode(w.into_vec());
        let format = doc.unwrap().format.unwrap();
        assert_eq!(format.base_height, 0x12);
        assert!(format.text_mode);
        assert_eq!(format.fonts.len(), 7);
        assert_eq!(format.fonts[6].name, "Symbol");
        assert_eq!(format.distances[18], 18);
        assert_eq!((format.version, format.horizontal_align), (2, 1));
        assert_eq!(format.bottom_space, 7);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_byte_swapped_magic_is_detected(
            formula in "[a-z ]{0,20}",
            date in any::<u32>(),
            time in any::<u32>(),
        ) {
            let mut little = ByteWriter::new();
            document(&mut little, &formula, date, time);
            let mut big = ByteWriter::big_endian();
            document(&mut big, &formula, date, time);
            let (native, _) = decode(little.into_vec());
            let (swapped, zone) = decode(big.into_vec());
            prop_assert!(native.is_some());
            prop_assert_eq!(native, swapped);
            prop_assert_eq!(zone.input_ref().byte_order(), ByteOrder::Big);
        }
    }
}
