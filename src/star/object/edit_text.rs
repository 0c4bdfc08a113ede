//! Edit engine text objects.
//!
//! A text object is a list of paragraphs, each with its text, a paragraph
//! style, an item set and runs of character attributes. Two layouts exist:
//! the old one (which `0x22`) and the versioned one (which `0x31`) which may
//! carry its own item pool and a version-gated trailer.

use crate::common::encoding::star_encoding;
use crate::common::{Error, Result};
use crate::star::attribute::ids::EDIT_TEXT_LIMITS;
use crate::star::attribute::item_set::{ItemSetId, PoolId, PoolKind, StyleRef};
use crate::star::document::DocumentContext;
use crate::star::input::StarInput;
use crate::star::zone::StarZone;

/// Which value of the old layout.
pub const EDIT_TEXT_OLD: u16 = 0x22;
/// Which value of the versioned layout.
pub const EDIT_TEXT_VERSIONED: u16 = 0x31;

/// A character attribute applied to `start..end` of a paragraph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttributeRun {
    pub which: u16,
    pub start: u16,
    pub end: u16,
    pub surrogate: u16,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditParagraph {
    pub text: String,
    pub style: String,
    pub family: u16,
    pub item_set: Option<ItemSetId>,
    pub runs: Vec<AttributeRun>,
    /// Text and style names stored again as UTF-16 in the trailer
    pub unicode: Option<(String, String)>,
}

/// Values stored after the paragraphs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditTrailer {
    pub metric: Option<u16>,
    pub user_type: Option<u16>,
    pub object_settings: Option<u32>,
    pub vertical: Option<bool>,
    pub script_type: Option<u16>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditTextObject {
    pub which: u16,
    pub version: u16,
    pub own_pool: bool,
    pub pool: Option<PoolId>,
    pub char_set: u16,
    pub paragraphs: Vec<EditParagraph>,
    pub trailer: EditTrailer,
    /// False when the object was cut short; the cursor is then at its end
    pub complete: bool,
}

/// Read a text object which must end before `last_pos`.
///
/// Returns `None`, with the cursor restored, when the header is not a text
/// object header or declares more data than available. Damage inside the
/// object gives a partial result and the cursor is moved to the object end.
pub fn read_edit_text_object(
    zone: &mut StarZone,
    last_pos: usize,
    doc: &mut dyn DocumentContext,
) -> Option<EditTextObject> {
    let pos = zone.tell();
    let label = zone.label("EditTextObject");
    let header = (|| -> Result<(u16, usize)> {
        let input = zone.input();
        Ok((input.read_u16()?, input.read_u32()? as usize))
    })();
    let (which, size) = match header {
        Ok((which, size))
            if (which == EDIT_TEXT_OLD || which == EDIT_TEXT_VERSIONED)
                && pos + 6 + size <= last_pos =>
        {
            (which, size)
        },
        Ok((which, size)) => {
            zone.error(pos, format!("{label}###which={which:#x},structSz={size},"));
            let _ = zone.input().seek(pos);
            return None;
        },
        Err(err) => {
            zone.error(pos, format!("{label}{err},"));
            let _ = zone.input().seek(pos);
            return None;
        },
    };
    let end = pos + 6 + size;
    if let Err(err) = zone.enter() {
        zone.error(pos, format!("{label}{err},"));
        let _ = zone.input().seek(end);
        return None;
    }
    let mut object = EditTextObject {
        which,
        own_pool: true,
        ..EditTextObject::default()
    };
    let outcome = read_object(zone, end, doc, &mut object);
    zone.leave();
    match outcome {
        Ok(()) => {
            object.complete = true;
            zone.note(
                pos,
                format!(
                    "{label}nWhich={which:#x},vers={},nPara={},",
                    object.version,
                    object.paragraphs.len()
                ),
            );
        },
        Err(err) => {
            zone.error(pos, format!("{label}{err},"));
            let _ = zone.input().seek(end);
        },
    }
    Some(object)
}

fn read_object(
    zone: &mut StarZone,
    end: usize,
    doc: &mut dyn DocumentContext,
    object: &mut EditTextObject,
) -> Result<()> {
    let versioned = object.which == EDIT_TEXT_VERSIONED;
    if versioned {
        object.version = zone.input().read_u16()?;
        object.own_pool = zone.input().read_bool()?;
    }

    let pool = match doc.find_pool(PoolKind::EditEngine) {
        Some(pool) if !object.own_pool => pool,
        _ => doc.new_pool(PoolKind::EditEngine),
    };
    object.pool = Some(pool);
    if object.own_pool && !doc.read_pool(zone, pool) {
        return Err(Error::Corrupted("###pool".to_string()));
    }

    let count = if versioned {
        object.char_set = zone.input().read_u16()?;
        usize::from(zone.input().read_u16()?)
    } else {
        zone.input().read_u32()? as usize
    };
    // Paragraph strings use the object's own character set when it names one.
    let previous = zone.encoding();
    if let Some(encoding) = star_encoding(object.char_set) {
        zone.set_encoding(encoding);
    }
    let outcome = (|| -> Result<()> {
        for i in 0..count {
            let paragraph = read_paragraph(zone, end, doc, object.which, pool)
                .map_err(|err| Error::Corrupted(format!("paragraph {i}: {err}")))?;
            object.paragraphs.push(paragraph);
        }
        read_trailer(zone, end, object)
    })();
    zone.set_encoding(previous);
    outcome
}

fn read_paragraph(
    zone: &mut StarZone,
    end: usize,
    doc: &mut dyn DocumentContext,
    which: u16,
    pool: PoolId,
) -> Result<EditParagraph> {
    let pos = zone.tell();
    let text = zone.read_string()?;
    let style = zone.read_string()?;
    if zone.tell() > end {
        return Err(Error::Corrupted("###strings".to_string()));
    }
    let family = zone.input().read_u16()?;
    let item_set = doc
        .read_item_set(zone, EDIT_TEXT_LIMITS, end, Some(pool))
        .ok_or_else(|| Error::Corrupted("###item list".to_string()))?;
    if !style.is_empty() {
        if let Some(set) = doc.item_set_mut(item_set) {
            set.set_style(Some(StyleRef {
                name: style.clone(),
                family,
            }));
        }
    }
    zone.note(pos, format!("EditTextObject[para]:text={text},style={style},"));

    let count = if which == EDIT_TEXT_OLD {
        zone.input().read_u32()? as usize
    } else {
        usize::from(zone.input().read_u16()?)
    };
    if zone.tell() + count * 8 > end {
        return Err(Error::Corrupted("###attrib list".to_string()));
    }
    let input = zone.input();
    let mut runs = Vec::with_capacity(count);
    for _ in 0..count {
        // The two layouts do not store the surrogate at the same place.
        let run = if which == EDIT_TEXT_OLD {
            AttributeRun {
                which: input.read_u16()?,
                surrogate: input.read_u16()?,
                start: input.read_u16()?,
                end: input.read_u16()?,
            }
        } else {
            AttributeRun {
                which: input.read_u16()?,
                start: input.read_u16()?,
                end: input.read_u16()?,
                surrogate: input.read_u16()?,
            }
        };
        runs.push(run);
    }
    Ok(EditParagraph {
        text,
        style,
        family,
        item_set: Some(item_set),
        runs,
        unicode: None,
    })
}

fn read_trailer(zone: &mut StarZone, end: usize, object: &mut EditTextObject) -> Result<()> {
    let pos = zone.tell();
    let input = zone.input();
    if object.which == EDIT_TEXT_OLD && input.tell() + 2 <= end {
        let marker = input.read_u16()?;
        if marker == 0x9999 {
            object.char_set = input.read_u16()?;
        }
    }
    let mut trailer = EditTrailer::default();
    let unicode = read_trailer_fields(input, object.version, &mut trailer)?;
    if input.tell() > end {
        return Err(Error::Corrupted("the trailer is too long".to_string()));
    }
    object.trailer = trailer;
    if unicode {
        for paragraph in &mut object.paragraphs {
            let text = zone.read_unicode_string()?;
            let style = zone.read_unicode_string()?;
            if zone.tell() > end {
                return Err(Error::Corrupted("###strings".to_string()));
            }
            paragraph.unicode = Some((text, style));
        }
    }
    if zone.tell() < end {
        zone.note(pos, "EditTextObject:###extra");
        zone.input().seek(end)?;
    }
    Ok(())
}

/// Read the version-gated values. Returns whether unicode strings follow.
fn read_trailer_fields(
    input: &mut StarInput,
    version: u16,
    trailer: &mut EditTrailer,
) -> Result<bool> {
    if version >= 400 {
        trailer.metric = Some(input.read_u16()?);
    }
    if version >= 600 {
        trailer.user_type = Some(input.read_u16()?);
        trailer.object_settings = Some(input.read_u32()?);
    }
    if version >= 601 {
        trailer.vertical = Some(input.read_bool()?);
    }
    if version >= 602 {
        trailer.script_type = Some(input.read_u16()?);
        return Ok(input.read_bool()?);
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::star::attribute::ids::EE_CHAR_WEIGHT;
    use crate::star::attribute::registry::AttributeRegistry;
    use crate::star::attribute::types::AttributeValue;
    use crate::star::document::StarDocument;
    use crate::star::test_utils::ByteWriter;

    fn weight_set(w: &mut ByteWriter) {
        w.u16(1).u16(EE_CHAR_WEIGHT as u16).u16(0).u32(1).u8(7);
    }

    fn wrap(which: u16, body: &[u8]) -> Vec<u8> {
        let mut w = ByteWriter::new();
        w.u16(which).u32(body.len() as u32).bytes(body);
        w.into_vec()
    }

    #[test]
    fn test_old_layout() {
        let mut body = ByteWriter::new();
        body.u16(0); // own pool without styles
        body.u32(1);
        body.string("Hello").string("Standard").u16(2);
        weight_set(&mut body);
        body.u32(1).u16(EE_CHAR_WEIGHT as u16).u16(9).u16(0).u16(5);
        body.u16(0x9999).u16(76);
        let data = wrap(EDIT_TEXT_OLD, body.as_slice());

        let registry = AttributeRegistry::new();
        let mut doc = StarDocument::new(&registry);
        let mut zone = StarZone::from_bytes(data.clone(), "text");
        let object = read_edit_text_object(&mut zone, data.len(), &mut doc).unwrap();
        assert!(object.complete);
        assert_eq!(object.char_set, 76);
        assert_eq!(zone.tell(), data.len());

        let paragraph = &object.paragraphs[0];
        assert_eq!(paragraph.text, "Hello");
        let run = paragraph.runs[0];
        assert_eq!((run.surrogate, run.start, run.end), (9, 0, 5));

        let set = doc.item_set(paragraph.item_set.unwrap()).unwrap();
        assert_eq!(set.style().unwrap().name, "Standard");
        assert_eq!(set.get(EE_CHAR_WEIGHT).unwrap().value(), &AttributeValue::UInt(7));
    }

    #[test]
    fn test_versioned_layout_with_unicode_strings() {
        let mut body = ByteWriter::new();
        body.u16(602).bool(false);
        body.u16(0).u16(1);
        body.string("Gr").string("").u16(0).u16(0);
        body.u16(1).u16(4001).u16(0).u16(2).u16(3);
        body.u16(1).u16(2).u32(0x10).u8(1).u16(3).bool(true);
        body.unicode("Grüß").unicode("Body");
        let data = wrap(EDIT_TEXT_VERSIONED, body.as_slice());

        let registry = AttributeRegistry::new();
        let mut doc = StarDocument::new(&registry);
        let mut zone = StarZone::from_bytes(data.clone(), "text");
        let object = read_edit_text_object(&mut zone, data.len(), &mut doc).unwrap();
        assert!(object.complete);
        assert_eq!(object.version, 602);
        let run = object.paragraphs[0].runs[0];
        assert_eq!((run.start, run.end, run.surrogate), (0, 2, 3));
        assert_eq!(object.trailer.vertical, Some(true));
        assert_eq!(object.trailer.script_type, Some(3));
        assert_eq!(
            object.paragraphs[0].unicode,
            Some(("Grüß".to_string(), "Body".to_string()))
        );
        assert!(doc.item_set(object.paragraphs[0].item_set.unwrap()).unwrap().style().is_none());
    }

    #[test]
    fn test_character_set_applies_to_paragraphs() {
        let mut body = ByteWriter::new();
        body.u16(300).bool(false).u16(34).u16(1);
        body.u16(3).bytes(&[0xcf, 0xf0, 0xe8]).string("").u16(0).u16(0);
        body.u16(0);
        let data = wrap(EDIT_TEXT_VERSIONED, body.as_slice());
        let registry = AttributeRegistry::new();
        let mut doc = StarDocument::new(&registry);
        let mut zone = StarZone::from_bytes(data.clone(), "text");
        let object = read_edit_text_object(&mut zone, data.len(), &mut doc).unwrap();
        assert_eq!(object.char_set, 34);
        assert_eq!(object.paragraphs[0].text, "При");
        assert_eq!(zone.encoding(), encoding_rs::WINDOWS_1252);
    }

    #[test]
    fn test_shared_pool_is_reused() {
        let registry = AttributeRegistry::new();
        let mut doc = StarDocument::new(&registry);
        let existing = doc.new_pool(PoolKind::EditEngine);

        let mut body = ByteWriter::new();
        body.u16(300).bool(false).u16(0).u16(0);
        let data = wrap(EDIT_TEXT_VERSIONED, body.as_slice());
        let mut zone = StarZone::from_bytes(data.clone(), "text");
        let object = read_edit_text_object(&mut zone, data.len(), &mut doc).unwrap();
        assert_eq!(object.pool, Some(existing));
        assert!(object.paragraphs.is_empty());
    }

    #[test]
    fn test_unreadable_pool_skips_the_object() {
        let mut body = ByteWriter::new();
        body.u16(500).bool(true).u16(3).u8(0x40);
        let data = wrap(EDIT_TEXT_VERSIONED, body.as_slice());
        let registry = AttributeRegistry::new();
        let mut doc = StarDocument::new(&registry);
        let mut zone = StarZone::from_bytes(data.clone(), "text");
        let object = read_edit_text_object(&mut zone, data.len(), &mut doc).unwrap();
        assert!(!object.complete);
        assert!(object.own_pool);
        assert_eq!(zone.tell(), data.len());
        assert!(zone.trace().contains("###pool"));
    }

    #[test]
    fn test_bad_which_restores_the_cursor() {
        let data = wrap(0x23, &[0; 4]);
        let registry = AttributeRegistry::new();
        let mut doc = StarDocument::new(&registry);
        let mut zone = StarZone::from_bytes(data.clone(), "text");
        assert!(read_edit_text_object(&mut zone, data.len(), &mut doc).is_none());
        assert_eq!(zone.tell(), 0);
    }

    #[test]
    fn test_size_past_the_limit() {
        let data = wrap(EDIT_TEXT_OLD, &[0; 4]);
        let registry = AttributeRegistry::new();
        let mut doc = StarDocument::new(&registry);
        let mut zone = StarZone::from_bytes(data.clone(), "text");
        assert!(read_edit_text_object(&mut zone, data.len() - 1, &mut doc).is_none());
        assert!(zone.trace().has_errors());
    }

    #[test]
    fn test_trailer_past_the_end_is_dropped() {
        let mut body = ByteWriter::new();
        body.u16(602).bool(false).u16(0).u16(1);
        body.string("Gr").string("").u16(0).u16(0).u16(0);
        let object_len = 6 + body.len();
        let mut w = ByteWriter::new();
        w.bytes(&wrap(EDIT_TEXT_VERSIONED, body.as_slice()));
        w.u16(2).u16(1).u32(0x10).u8(1).u16(3).bool(false);
        let data = w.into_vec();

        let registry = AttributeRegistry::new();
        let mut doc = StarDocument::new(&registry);
        let mut zone = StarZone::from_bytes(data.clone(), "text");
        let object = read_edit_text_object(&mut zone, data.len(), &mut doc).unwrap();
        assert!(!object.complete);
        assert_eq!(object.paragraphs.len(), 1);
        assert_eq!(object.trailer, EditTrailer::default());
        assert_eq!(zone.tell(), object_len);
        assert!(zone.trace().contains("the trailer is too long"));
    }

    #[test]
    fn test_too_many_runs_is_partial() {
        let mut body = ByteWriter::new();
        body.u16(0).u32(1).string("a").string("").u16(0).u16(0);
        body.u32(50).zeros(8);
        let data = wrap(EDIT_TEXT_OLD, body.as_slice());
        let registry = AttributeRegistry::new();
        let mut doc = StarDocument::new(&registry);
        let mut zone = StarZone::from_bytes(data.clone(), "text");
        let object = read_edit_text_object(&mut zone, data.len(), &mut doc).unwrap();
        assert!(!object.complete);
        assert!(object.paragraphs.is_empty());
        assert_eq!(zone.tell(), data.len());
        assert!(zone.trace().contains("###attrib list"));
    }
}
