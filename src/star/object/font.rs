//! Font descriptions stored inside a version-compat record.

use crate::common::{Error, Result};
use crate::star::zone::StarZone;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StarFont {
    pub name: String,
    pub style: String,
    pub width: i32,
    pub height: i32,
    pub char_set: u16,
    pub family: u16,
    pub pitch: u16,
    pub weight: u16,
    pub underline: u16,
    pub strike_out: u16,
    pub italic: u16,
    pub language: u16,
    pub width_type: u16,
    pub orientation: i16,
    pub word_line: bool,
    pub outline: bool,
    pub shadow: bool,
    pub kerning: u8,
    /// Only stored from version 2 on
    pub relief: i8,
    pub cjk_language: u16,
    pub vertical: bool,
    pub emphasis_mark: u16,
}

/// Read a font record at the current position.
///
/// `None` when the record header can not be opened. A font whose fields are
/// truncated is returned as far as it could be read.
pub fn read_font(zone: &mut StarZone) -> Option<StarFont> {
    let pos = zone.tell();
    let label = zone.label("StarFont");
    if let Err(err) = zone.open_version_compat_header() {
        zone.error(pos, format!("{label}###header: {err},"));
        return None;
    }
    let mut font = StarFont::default();
    match read_fields(zone, &mut font) {
        Ok(()) => zone.note(
            pos,
            format!("{label}name={},size={}x{},", font.name, font.width, font.height),
        ),
        Err(err) => zone.error(pos, format!("{label}{err},")),
    }
    zone.close_version_compat_header("StarFont");
    Some(font)
}

fn read_fields(zone: &mut StarZone, font: &mut StarFont) -> Result<()> {
    let last_pos = zone.record_last_position();
    font.name = zone.read_string()?;
    font.style = zone.read_string()?;
    if zone.tell() > last_pos {
        return Err(Error::Corrupted("can not read the names".to_string()));
    }
    let version = zone.header_version();
    let input = zone.input();
    font.width = input.read_i32()?;
    font.height = input.read_i32()?;
    font.char_set = input.read_u16()?;
    font.family = input.read_u16()?;
    font.pitch = input.read_u16()?;
    font.weight = input.read_u16()?;
    font.underline = input.read_u16()?;
    font.strike_out = input.read_u16()?;
    font.italic = input.read_u16()?;
    font.language = input.read_u16()?;
    font.width_type = input.read_u16()?;
    font.orientation = input.read_i16()?;
    font.word_line = input.read_bool()?;
    font.outline = input.read_bool()?;
    font.shadow = input.read_bool()?;
    font.kerning = input.read_u8()?;
    if version >= 2 {
        font.relief = input.read_i8()?;
        font.cjk_language = input.read_u16()?;
        font.vertical = input.read_bool()?;
        font.emphasis_mark = input.read_u16()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::star::test_utils::ByteWriter;

    fn body(version_two: bool) -> Vec<u8> {
        let mut w = ByteWriter::new();
        w.string("Albany").string("Bold").i32(0).i32(240);
        w.u16(1).u16(5).u16(2).u16(8).u16(0).u16(0).u16(0).u16(1031).u16(0).i16(900);
        w.bool(false).bool(true).bool(false).u8(1);
        if version_two {
            w.u8(1).u16(1041).bool(true).u16(2);
        }
        w.into_vec()
    }

    #[test]
    fn test_read_font() {
        let mut w = ByteWriter::new();
        w.compat(2, &body(true)).u8(0x55);
        let mut zone = StarZone::from_bytes(w.into_vec(), "font");
        let font = read_font(&mut zone).unwrap();
        assert_eq!(font.name, "Albany");
        assert_eq!(font.style, "Bold");
        assert_eq!(font.height, 240);
        assert_eq!(font.weight, 8);
        assert_eq!(font.orientation, 900);
        assert!(font.outline);
        assert_eq!(font.cjk_language, 1041);
        assert!(font.vertical);
        assert_eq!(zone.input_ref().remaining(), 1);
        assert!(!zone.trace().has_errors());
    }

    #[test]
    fn test_old_font_has_no_asian_fields() {
        let mut w = ByteWriter::new();
        w.compat(1, &body(false));
        let mut zone = StarZone::from_bytes(w.into_vec(), "font");
        let font = read_font(&mut zone).unwrap();
        assert_eq!(font.cjk_language, 0);
        assert_eq!(font.language, 1031);
        assert!(zone.input_ref().is_end());
    }

    #[test]
    fn test_truncated_font_is_partial() {
        let mut w = ByteWriter::new();
        w.compat(1, &body(false)[..20]);
        let mut zone = StarZone::from_bytes(w.into_vec(), "font");
        let font = read_font(&mut zone).unwrap();
        assert_eq!(font.name, "Albany");
        assert!(zone.trace().has_errors());
        assert!(zone.input_ref().is_end());
    }

    #[test]
    fn test_missing_header() {
        let mut zone = StarZone::from_bytes(vec![1, 0, 0xFF, 0, 0, 0], "font");
        assert!(read_font(&mut zone).is_none());
        assert_eq!(zone.tell(), 0);
    }
}
