//! Layouts of the attributes that have no registered prototype.
//!
//! These are the writer, edit engine and drawing items whose payload is a
//! small structure rather than a single value. Each layout decodes into a
//! [`FieldList`] carried by a dummy-kind attribute: the identifier and the
//! decoded fields survive, but nothing is projected onto a style.

use tracing::debug;

use super::ids::*;
use super::types::{Attribute, FieldList};
use crate::common::{Error, PropertyValue, Result};
use crate::star::document::DocumentContext;
use crate::star::object::bitmap::read_bitmap;
use crate::star::zone::StarZone;

type Decoder = fn(&mut LegacyReader<'_, '_>) -> Result<()>;

/// `(first, last, name, decoder)`; identifiers are matched inclusively.
const DECODERS: &[(u32, u32, &str, Decoder)] = &[
    (CHR_CHARSETCOLOR, CHR_CHARSETCOLOR, "chrCharSetColor", char_set_color),
    (CHR_ROTATE, CHR_ROTATE, "chrRotate", char_rotate),
    (CHR_TWO_LINES, CHR_TWO_LINES, "chrTwoLines", char_two_lines),
    (CHR_SCALEW, CHR_SCALEW, "chrScaleW", scale_width),
    (EE_CHAR_SCALEW, EE_CHAR_SCALEW, "eeChrScaleW", scale_width),
    (TXT_INETFMT, TXT_INETFMT, "textINetFmt", text_inet_format),
    (TXT_REFMARK, TXT_REFMARK, "textRefMark", text_ref_mark),
    (TXT_TOXMARK, TXT_TOXMARK, "textToXMark", text_tox_mark),
    (TXT_CHARFMT, TXT_CHARFMT, "textCharFmt", text_char_format),
    (TXT_CJK_RUBY, TXT_CJK_RUBY, "textCJKRuby", text_cjk_ruby),
    (TXT_FIELD, TXT_FIELD, "textField", text_field),
    (TXT_FLYCNT, TXT_FLYCNT, "textFlyCnt", text_fly_content),
    (TXT_FTN, TXT_FTN, "textFootnote", text_footnote),
    (TXT_HARDBLANK, TXT_HARDBLANK, "textHardBlank", text_hard_blank),
    (PARA_LINESPACING, PARA_LINESPACING, "paraLineSpacing", para_line_spacing),
    (PARA_TABSTOP, PARA_TABSTOP, "paraTabStop", para_tab_stop),
    (PARA_HYPHENZONE, PARA_HYPHENZONE, "paraHyphenZone", para_hyphen_zone),
    (PARA_DROP, PARA_DROP, "paraDrop", para_drop),
    (PARA_NUMRULE, PARA_NUMRULE, "paraNumRule", para_num_rule),
    (FRM_FRM_SIZE, FRM_FRM_SIZE, "frmSize", frame_size),
    (FRM_PAGEDESC, FRM_PAGEDESC, "frmPageDesc", frame_page_desc),
    (FRM_BREAK, FRM_BREAK, "frmBreak", frame_break),
    (FRM_CNTNT, FRM_CNTNT, "frmContent", frame_content),
    (FRM_HEADER, FRM_HEADER, "frmHeader", frame_header_footer),
    (FRM_FOOTER, FRM_FOOTER, "frmFooter", frame_header_footer),
    (FRM_PROTECT, FRM_PROTECT, "frmProtect", frame_protect),
    (FRM_SURROUND, FRM_SURROUND, "frmSurround", frame_surround),
    (FRM_VERT_ORIENT, FRM_VERT_ORIENT, "frmVertOrient", frame_orient),
    (FRM_HORI_ORIENT, FRM_HORI_ORIENT, "frmHoriOrient", frame_orient),
    (FRM_ANCHOR, FRM_ANCHOR, "frmAnchor", frame_anchor),
    (FRM_BOX, FRM_BOX, "frmBox", frame_box),
    (FRM_FRMMACRO, FRM_FRMMACRO, "frmMacro", frame_macro),
    (FRM_COL, FRM_COL, "frmColumns", frame_columns),
    (FRM_URL, FRM_URL, "frmURL", frame_url),
    (FRM_CHAIN, FRM_CHAIN, "frmChain", frame_chain),
    (FRM_TEXTGRID, FRM_TEXTGRID, "frmTextGrid", frame_text_grid),
    (FRM_LINENUMBER, FRM_LINENUMBER, "frmLineNumber", frame_line_number),
    (FRM_FTN_AT_TXTEND, FRM_FTN_AT_TXTEND, "frmFtnAtTextEnd", frame_at_text_end),
    (FRM_END_AT_TXTEND, FRM_END_AT_TXTEND, "frmEndAtTextEnd", frame_at_text_end),
    (GRF_MIRRORGRF, GRF_MIRRORGRF, "grfMirror", graphic_mirror),
    (GRF_CROPGRF, GRF_CROPGRF, "grfCrop", graphic_crop),
    (BOX_FORMAT, BOX_FORMAT, "boxFormat", box_format),
    (BOX_FORMULA, BOX_FORMULA, "boxFormula", box_formula),
    (BOX_VALUE, BOX_VALUE, "boxValue", box_value),
    (EE_PARA_NUMBULLET, EE_PARA_NUMBULLET, "eeParaNumBullet", ee_num_bullet),
    (EE_PARA_BULLET, EE_PARA_BULLET, "eeParaBullet", ee_bullet),
    (EE_FEATURE_FIELD, EE_FEATURE_FIELD, "eeFeatureField", ee_feature_field),
    (SCH_SYMBOL_SIZE, SCH_SYMBOL_SIZE, "schSymbolSize", chart_symbol_size),
    (
        SDRATTR_AUTOSHAPE_ADJUSTMENT,
        SDRATTR_AUTOSHAPE_ADJUSTMENT,
        "sdrAutoShapeAdjust",
        sdr_autoshape_adjust,
    ),
    (SDRATTR_MEASURESCALE, SDRATTR_MEASURESCALE, "sdrMeasureScale", fraction),
    (
        SDRATTR_MEASUREFORMATSTRING,
        SDRATTR_MEASUREFORMATSTRING,
        "sdrMeasureFormatString",
        name_string,
    ),
    (SDRATTR_LAYERNAME, SDRATTR_LAYERNAME, "sdrLayerName", name_string),
    (SDRATTR_OBJECTNAME, SDRATTR_OBJECTNAME, "sdrObjectName", name_string),
    (SDRATTR_RESIZEXONE, SDRATTR_RESIZEXONE, "sdrResizeXOne", fraction),
    (SDRATTR_RESIZEYONE, SDRATTR_RESIZEYONE, "sdrResizeYOne", fraction),
    (SDRATTR_RESIZEXALL, SDRATTR_RESIZEXALL, "sdrResizeXAll", fraction),
    (SDRATTR_RESIZEYALL, SDRATTR_RESIZEYALL, "sdrResizeYAll", fraction),
    (SDRATTR_GRAFCROP, SDRATTR_GRAFCROP, "grafCrop", sdr_graf_crop),
    (
        SDRATTR_3DSCENE_LIGHTDIRECTION_1,
        SDRATTR_3DSCENE_LIGHTDIRECTION_8,
        "3dSceneLightDirection",
        light_direction,
    ),
];

fn decoder_for(which: u32) -> Option<(&'static str, Decoder)> {
    DECODERS
        .iter()
        .find(|(first, last, _, _)| (*first..=*last).contains(&which))
        .map(|&(_, _, name, decode)| (name, decode))
}

/// Whether `which` has a legacy layout.
pub fn has_layout(which: u32) -> bool {
    decoder_for(which).is_some()
}

/// Decode unregistered attribute `which` ending at `last_pos`.
///
/// Always yields an attribute: the decoded fields when a layout is known
/// (possibly partial when the data is damaged), a dummy otherwise.
pub(crate) fn read(
    zone: &mut StarZone,
    which: u32,
    version: u16,
    last_pos: usize,
    doc: &mut dyn DocumentContext,
) -> Attribute {
    let pos = zone.tell();
    let label = zone.label("StarAttribute");
    let Some((name, decode)) = decoder_for(which) else {
        debug!(which, "reading this attribute is not implemented");
        zone.note(pos, format!("{label}#unimplemented[wh={which:x}],"));
        return Attribute::dummy(which);
    };

    let mut reader = LegacyReader {
        zone,
        doc,
        which,
        version,
        last_pos,
        fields: FieldList::new(),
    };
    let status = decode(&mut reader);
    let LegacyReader { zone, fields, .. } = reader;
    if let Err(err) = status {
        zone.error(pos, format!("{label}{name}: {err},"));
    }
    if zone.tell() > last_pos {
        zone.error(pos, format!("{label}{name}:###too much,"));
        let end = zone.tell();
        zone.trace_mut().delimit(end, '|');
    }
    zone.note(pos, format!("{label}{name},{fields}"));
    Attribute::legacy(which, name, fields)
}

/// Cursor plus the fields collected so far.
struct LegacyReader<'z, 'd> {
    zone: &'z mut StarZone,
    doc: &'d mut dyn DocumentContext,
    which: u32,
    version: u16,
    last_pos: usize,
    fields: FieldList,
}

impl LegacyReader<'_, '_> {
    fn tell(&self) -> usize {
        self.zone.tell()
    }

    fn remaining(&self) -> usize {
        self.last_pos.saturating_sub(self.tell())
    }

    fn at_end(&self) -> bool {
        self.tell() >= self.last_pos
    }

    /// Fail when the cursor went past the bound.
    fn check_bound(&self, what: &str) -> Result<()> {
        if self.tell() > self.last_pos {
            return Err(Error::Corrupted(format!("can not read {what}")));
        }
        Ok(())
    }

    fn u8(&mut self, key: &str) -> Result<u8> {
        let v = self.zone.input().read_u8()?;
        self.fields.insert(key, v);
        Ok(v)
    }

    fn i8(&mut self, key: &str) -> Result<i8> {
        let v = self.zone.input().read_i8()?;
        self.fields.insert(key, v);
        Ok(v)
    }

    fn bool(&mut self, key: &str) -> Result<bool> {
        let v = self.zone.input().read_bool()?;
        self.fields.insert(key, v);
        Ok(v)
    }

    fn u16(&mut self, key: &str) -> Result<u16> {
        let v = self.zone.input().read_u16()?;
        self.fields.insert(key, v);
        Ok(v)
    }

    fn i16(&mut self, key: &str) -> Result<i16> {
        let v = self.zone.input().read_i16()?;
        self.fields.insert(key, v);
        Ok(v)
    }

    fn u32(&mut self, key: &str) -> Result<u32> {
        let v = self.zone.input().read_u32()?;
        self.fields.insert(key, v);
        Ok(v)
    }

    fn i32(&mut self, key: &str) -> Result<i32> {
        let v = self.zone.input().read_i32()?;
        self.fields.insert(key, v);
        Ok(v)
    }

    fn f64(&mut self, key: &str) -> Result<f64> {
        let v = self.zone.input().read_f64()?;
        self.fields.insert(key, v);
        Ok(v)
    }

    fn compressed(&mut self, key: &str) -> Result<u32> {
        let v = self.zone.input().read_compressed_u32()?;
        self.fields.insert(key, v);
        Ok(v)
    }

    fn color(&mut self, key: &str) -> Result<()> {
        let color = self.zone.input().read_color()?;
        self.fields.insert(key, color);
        Ok(())
    }

    /// A string; empty strings are valid and not stored.
    fn string(&mut self, key: &str) -> Result<String> {
        let text = self.zone.read_string()?;
        self.fields.insert_text(key, text.clone());
        Ok(text)
    }

    /// Run `read` against a fresh field list and return what it collected.
    fn collect(&mut self, read: impl FnOnce(&mut Self) -> Result<()>) -> (FieldList, Result<()>) {
        let outer = std::mem::take(&mut self.fields);
        let status = read(self);
        let inner = std::mem::replace(&mut self.fields, outer);
        (inner, status)
    }

    /// Read `count` entries with `each`, stored as a list under `key`.
    ///
    /// The entry that fails is kept and ends the list.
    fn list(
        &mut self,
        key: &str,
        count: usize,
        mut each: impl FnMut(&mut Self) -> Result<()>,
    ) -> Result<()> {
        let mut items = Vec::new();
        let mut status = Ok(());
        for _ in 0..count {
            let (item, res) = self.collect(&mut each);
            items.push(PropertyValue::Nested(item));
            if res.is_err() {
                status = res;
                break;
            }
        }
        self.fields.insert(key, PropertyValue::List(items));
        status
    }

    fn require(&self, ok: bool, what: &str) -> Result<()> {
        if ok {
            Ok(())
        } else {
            Err(Error::Corrupted(format!("can not read {what}")))
        }
    }
}

fn char_set_color(r: &mut LegacyReader) -> Result<()> {
    r.u8("charSet")?;
    r.color("color")
}

fn char_rotate(r: &mut LegacyReader) -> Result<()> {
    r.u16("rotation")?;
    r.u8("fitToLine")?;
    Ok(())
}

fn char_two_lines(r: &mut LegacyReader) -> Result<()> {
    r.u8("twoLines")?;
    r.u16("startChar")?;
    r.u16("endChar")?;
    Ok(())
}

fn scale_width(r: &mut LegacyReader) -> Result<()> {
    r.u16("scale")?;
    if r.tell() < r.last_pos {
        r.u16("value")?;
        r.u16("test")?;
    }
    Ok(())
}

fn text_inet_format(r: &mut LegacyReader) -> Result<()> {
    r.string("url")?;
    r.string("target")?;
    r.u16("id1")?;
    r.u16("id2")?;
    let count = r.u16("macroCount")?;
    r.list("macros", usize::from(count), |r| {
        r.u16("key")?;
        r.check_bound("a macro")?;
        r.string("lib")?;
        r.string("mac")?;
        Ok(())
    })?;
    if r.version >= 1 {
        if r.remaining() < 2 {
            return Err(Error::Corrupted("can not read name1".to_string()));
        }
        r.string("name1")?;
    }
    if r.version >= 2 {
        if r.remaining() < 2 {
            return Err(Error::Corrupted("can not read the second macro list".to_string()));
        }
        let count = r.zone.input().read_u16()?;
        r.list("macros2", usize::from(count), |r| {
            r.u16("key")?;
            r.check_bound("a macro name")?;
            r.string("lib")?;
            r.string("mac")?;
            r.u16("scriptType")?;
            Ok(())
        })?;
    }
    Ok(())
}

fn text_ref_mark(r: &mut LegacyReader) -> Result<()> {
    r.string("name")?;
    Ok(())
}

fn text_tox_mark(r: &mut LegacyReader) -> Result<()> {
    r.u8("type")?;
    r.u16("level")?;
    let mut string_id = 0xFFFF;
    if r.version < 1 {
        r.string("typeName")?;
    } else {
        string_id = r.u16("stringId")?;
    }
    r.string("altText")?;
    r.string("primKey")?;
    r.string("secKey")?;
    if r.version >= 2 {
        r.u8("type2")?;
        string_id = r.u16("stringId")?;
        r.u8("flags")?;
    }
    if r.version >= 1 && string_id != 0xFFFF {
        let Some(name) = r.zone.pool_name(string_id).map(str::to_string) else {
            return Err(Error::Corrupted(format!("no pool name {string_id}")));
        };
        r.fields.insert_text("typeName", name);
    }
    Ok(())
}

fn text_char_format(r: &mut LegacyReader) -> Result<()> {
    r.u16("formatId")?;
    Ok(())
}

fn text_cjk_ruby(r: &mut LegacyReader) -> Result<()> {
    r.u8("ruby")?;
    Ok(())
}

fn text_field(r: &mut LegacyReader) -> Result<()> {
    let ok = r.doc.read_field(r.zone);
    r.require(ok, "the field")
}

fn text_fly_content(r: &mut LegacyReader) -> Result<()> {
    let kind = if r.zone.input_ref().peek_u8()? == b'o' { b'o' } else { b'l' };
    let ok = r.doc.read_format_def(r.zone, kind);
    r.require(ok, "the format")
}

fn text_footnote(r: &mut LegacyReader) -> Result<()> {
    r.u16("number")?;
    r.string("numberText")?;
    let ok = r.doc.read_sw_content(r.zone);
    r.require(ok, "the content")?;
    if r.version >= 1 {
        r.u16("seqNo")?;
        r.u8("flags")?;
    }
    Ok(())
}

fn text_hard_blank(r: &mut LegacyReader) -> Result<()> {
    if r.version >= 1 {
        let c = r.zone.input().read_u8()?;
        r.fields.insert("char", char::from(c).to_string());
    }
    Ok(())
}

fn para_line_spacing(r: &mut LegacyReader) -> Result<()> {
    r.i8("propSpace")?;
    r.i16("interSpace")?;
    r.u16("height")?;
    r.u8("rule")?;
    r.u8("interRule")?;
    Ok(())
}

fn para_tab_stop(r: &mut LegacyReader) -> Result<()> {
    let stored = usize::from(r.u8("count")?);
    let count = stored.min(r.remaining() / 7);
    if count < stored {
        let pos = r.tell();
        let label = r.zone.label("StarAttribute");
        r.zone.error(pos, format!("{label}paraTabStop:###N={stored},"));
    }
    r.list("tabs", count, |r| {
        r.i32("pos")?;
        r.i8("adjust")?;
        r.i8("decimal")?;
        r.i8("fill")?;
        Ok(())
    })
}

fn para_hyphen_zone(r: &mut LegacyReader) -> Result<()> {
    r.i8("hyphen")?;
    r.i8("pageEnd")?;
    r.i8("minLead")?;
    r.i8("minTail")?;
    r.i8("maxHyphens")?;
    Ok(())
}

fn para_drop(r: &mut LegacyReader) -> Result<()> {
    r.u16("format")?;
    r.u16("lines")?;
    r.u16("chars")?;
    r.u16("distance")?;
    if r.version >= 1 {
        r.u8("whole")?;
    } else {
        r.u16("x")?;
        r.u16("y")?;
    }
    Ok(())
}

fn para_num_rule(r: &mut LegacyReader) -> Result<()> {
    r.string("name")?;
    if r.version > 0 {
        r.u16("poolId")?;
    }
    Ok(())
}

fn frame_size(r: &mut LegacyReader) -> Result<()> {
    r.u8("sizeType")?;
    r.u32("width")?;
    r.u32("height")?;
    if r.version > 1 {
        r.u8("widthPercent")?;
        r.u8("heightPercent")?;
    }
    Ok(())
}

fn frame_page_desc(r: &mut LegacyReader) -> Result<()> {
    if r.version < 1 {
        r.u8("auto")?;
    }
    if r.version < 2 {
        r.u16("offset")?;
    } else {
        r.compressed("offset")?;
    }
    r.u16("index")?;
    Ok(())
}

fn frame_break(r: &mut LegacyReader) -> Result<()> {
    r.u8("break")?;
    if r.version < 1 {
        r.zone.input().skip(1)?;
    }
    Ok(())
}

fn frame_content(r: &mut LegacyReader) -> Result<()> {
    while !r.at_end() {
        let pos = r.tell();
        if r.zone.input_ref().peek_u8()? != b'N' {
            return Err(Error::Corrupted("unexpected child".to_string()));
        }
        let ok = r.doc.read_sw_content(r.zone);
        r.require(ok && r.tell() > pos, "a child")?;
    }
    Ok(())
}

fn frame_header_footer(r: &mut LegacyReader) -> Result<()> {
    r.u8("active")?;
    if r.at_end() {
        return Ok(());
    }
    let ok = r.doc.read_format_def(r.zone, b'r');
    r.require(ok, "the format")
}

fn frame_protect(r: &mut LegacyReader) -> Result<()> {
    let bits = r.zone.input().read_u8()?;
    r.fields.insert("position", bits & 1 != 0);
    r.fields.insert("size", bits & 2 != 0);
    r.fields.insert("content", bits & 4 != 0);
    Ok(())
}

fn frame_surround(r: &mut LegacyReader) -> Result<()> {
    r.u8("surround")?;
    if r.version < 5 {
        r.u8("gold")?;
    }
    if r.version > 1 {
        r.u8("anchorOnly")?;
    }
    if r.version > 2 {
        r.u8("contour")?;
    }
    if r.version > 3 {
        r.u8("outside")?;
    }
    Ok(())
}

fn frame_orient(r: &mut LegacyReader) -> Result<()> {
    r.u32("pos")?;
    r.u8("orient")?;
    r.u8("relation")?;
    if r.which == FRM_HORI_ORIENT && r.version >= 1 {
        r.u8("toggle")?;
    }
    Ok(())
}

fn frame_anchor(r: &mut LegacyReader) -> Result<()> {
    r.u8("anchor")?;
    if r.version < 1 {
        r.u16("id")?;
    } else {
        r.compressed("id")?;
    }
    Ok(())
}

/// One border line: color, outer width, inner width, distance.
fn border_line(r: &mut LegacyReader) -> Result<()> {
    r.color("color")?;
    r.u16("outWidth")?;
    r.u16("inWidth")?;
    r.u16("distance")?;
    Ok(())
}

fn frame_box(r: &mut LegacyReader) -> Result<()> {
    const SIDES: [&str; 4] = ["top", "left", "right", "bottom"];
    r.u16("distance")?;
    let mut line = 0;
    while !r.at_end() {
        line = r.zone.input().read_i8()?;
        let Some(side) = usize::try_from(line).ok().and_then(|i| SIDES.get(i)) else {
            break;
        };
        let (fields, status) = r.collect(border_line);
        r.fields.insert(*side, fields);
        status?;
    }
    if r.version >= 1 && line & 0x10 != 0 {
        for side in SIDES {
            r.u16(&format!("{side}Distance"))?;
        }
    }
    Ok(())
}

fn frame_macro(r: &mut LegacyReader) -> Result<()> {
    let mut version = r.version;
    if version >= 1 {
        version = r.u16("version")?;
    }
    let count = r.zone.input().read_i16()?;
    r.list("macros", usize::try_from(count).unwrap_or(0), |r| {
        r.u16("key")?;
        r.string("lib")?;
        r.check_bound("a library name")?;
        r.string("mac")?;
        r.check_bound("a macro name")?;
        if version >= 1 {
            r.u16("type")?;
        }
        Ok(())
    })
}

fn frame_columns(r: &mut LegacyReader) -> Result<()> {
    r.u8("lineAdjust")?;
    r.u8("ortho")?;
    r.u8("lineHeight")?;
    r.i16("gutterWidth")?;
    let wish_width = r.u16("wishWidth")?;
    r.u8("penStyle")?;
    r.i16("penWidth")?;
    r.u16("penRed")?;
    r.u16("penGreen")?;
    r.u16("penBlue")?;
    for key in ["penRed", "penGreen", "penBlue"] {
        if let Some(v) = r.fields.get_int(key) {
            r.fields.insert(key, v >> 8);
        }
    }
    let count = usize::from(r.u16("count")?);
    if wish_width == 0 {
        return Ok(());
    }
    if r.tell() + 10 * count > r.last_pos {
        return Err(Error::Corrupted(format!("{count} columns do not fit")));
    }
    r.list("columns", count, |r| {
        r.u16("wishWidth")?;
        r.u16("left")?;
        r.u16("upper")?;
        r.u16("right")?;
        r.u16("lower")?;
        Ok(())
    })
}

fn frame_url(r: &mut LegacyReader) -> Result<()> {
    let ok = r.doc.read_sw_image_map(r.zone);
    r.require(ok, "the image map")?;
    if r.version >= 1 {
        r.string("name")?;
    }
    Ok(())
}

fn frame_chain(r: &mut LegacyReader) -> Result<()> {
    if r.version > 0 {
        r.u16("prevIndex")?;
        r.u16("nextIndex")?;
    }
    Ok(())
}

fn frame_text_grid(r: &mut LegacyReader) -> Result<()> {
    r.u8("grid")?;
    Ok(())
}

fn frame_line_number(r: &mut LegacyReader) -> Result<()> {
    r.u32("start")?;
    r.u8("countLines")?;
    Ok(())
}

fn frame_at_text_end(r: &mut LegacyReader) -> Result<()> {
    r.u8("atTextEnd")?;
    if r.version > 0 {
        r.u16("offset")?;
        r.u16("formatType")?;
        r.string("prefix")?;
        r.string("suffix")?;
    }
    Ok(())
}

fn graphic_mirror(r: &mut LegacyReader) -> Result<()> {
    r.u8("mirror")?;
    if r.version > 0 {
        r.u8("toggle")?;
    }
    Ok(())
}

fn graphic_crop(r: &mut LegacyReader) -> Result<()> {
    for key in ["top", "left", "right", "bottom"] {
        r.i32(key)?;
    }
    Ok(())
}

fn box_format(r: &mut LegacyReader) -> Result<()> {
    r.u8("format")?;
    r.u32("formatId")?;
    Ok(())
}

fn box_formula(r: &mut LegacyReader) -> Result<()> {
    r.string("formula")?;
    Ok(())
}

fn box_value(r: &mut LegacyReader) -> Result<()> {
    if r.version == 0 {
        r.string("value")?;
        return Ok(());
    }
    let (value, is_nan) = r.zone.input().read_double_reverted()?;
    if is_nan {
        r.fields.insert("nan", true);
    } else if value != 0.0 {
        r.fields.insert("value", value);
    }
    Ok(())
}

fn ee_num_bullet(r: &mut LegacyReader) -> Result<()> {
    let version = r.u16("version")?;
    r.u16("levelCount")?;
    r.u16("featureFlags")?;
    r.u16("continuous")?;
    r.u16("numberingType")?;
    let mut sets = Vec::new();
    let mut status = Ok(());
    for _ in 0..10 {
        let set = r.zone.input().read_u16()?;
        sets.push(PropertyValue::from(set));
        if set == 0 {
            continue;
        }
        let last_pos = r.last_pos;
        if !r.doc.read_number_format(r.zone, last_pos) || r.tell() > last_pos {
            status = Err(Error::Corrupted("can not read a number format".to_string()));
            break;
        }
    }
    r.fields.insert("sets", PropertyValue::List(sets));
    status?;
    if version >= 2 {
        r.u16("featureFlags2")?;
    }
    Ok(())
}

fn ee_bullet(r: &mut LegacyReader) -> Result<()> {
    let style = r.u16("style")?;
    if style == 128 {
        let last_pos = r.last_pos;
        let bitmap = read_bitmap(r.zone, true, last_pos);
        let bitmap = bitmap.ok_or_else(|| Error::Corrupted("can not read the bitmap".to_string()))?;
        r.fields.insert("bitmap", PropertyValue::Binary(bitmap.data));
    } else {
        r.color("color")?;
        for key in [
            "family",
            "encoding",
            "pitch",
            "align",
            "weight",
            "underline",
            "strikeOut",
            "italic",
        ] {
            r.u16(key)?;
        }
        r.string("fontName")?;
        r.bool("outline")?;
        r.bool("shadow")?;
        r.bool("transparent")?;
    }
    r.i32("width")?;
    r.u16("start")?;
    r.u8("justify")?;
    r.u8("symbol")?;
    r.u16("scale")?;
    r.string("prevText")?;
    r.string("nextText")?;
    Ok(())
}

fn ee_feature_field(r: &mut LegacyReader) -> Result<()> {
    let last_pos = r.last_pos;
    let ok = r.doc.read_persist_data(r.zone, last_pos);
    r.require(ok, "the persisted field")
}

fn chart_symbol_size(r: &mut LegacyReader) -> Result<()> {
    r.i32("width")?;
    r.i32("height")?;
    Ok(())
}

fn sdr_autoshape_adjust(r: &mut LegacyReader) -> Result<()> {
    if r.version > 0 {
        r.u32("count")?;
    }
    Ok(())
}

fn fraction(r: &mut LegacyReader) -> Result<()> {
    r.i32("mult")?;
    r.i32("div")?;
    Ok(())
}

fn name_string(r: &mut LegacyReader) -> Result<()> {
    r.string("name")?;
    Ok(())
}

fn sdr_graf_crop(r: &mut LegacyReader) -> Result<()> {
    if r.version == 0 {
        return Ok(());
    }
    graphic_crop(r)
}

fn light_direction(r: &mut LegacyReader) -> Result<()> {
    r.fields
        .insert("light", r.which - SDRATTR_3DSCENE_LIGHTDIRECTION_1 + 1);
    r.f64("x")?;
    r.f64("y")?;
    r.f64("z")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::RGBColor;
    use crate::star::attribute::registry::AttributeRegistry;
    use crate::star::attribute::types::AttributeValue;
    use crate::star::document::StarDocument;
    use crate::star::object::bitmap::tests::mono_dib;
    use crate::star::test_utils::ByteWriter;

    fn decode(which: u32, version: u16, data: Vec<u8>) -> (Attribute, StarZone) {
        let registry = AttributeRegistry::empty();
        let mut doc = StarDocument::new(&registry);
        let last = data.len();
        let mut zone = StarZone::from_bytes(data, "test");
        let attr = read(&mut zone, which, version, last, &mut doc);
        (attr, zone)
    }

    #[test]
    fn test_every_table_entry_has_a_name() {
        for (first, last, name, _) in DECODERS {
            assert!(first <= last, "{name}");
            assert!(!name.is_empty());
            assert!(has_layout(*first));
        }
        assert!(!has_layout(99999));
    }

    #[test]
    fn test_unknown_identifier_is_dummy() {
        let (attr, zone) = decode(99999, 0, vec![1, 2, 3]);
        assert!(attr.is_dummy());
        assert_eq!(attr.value(), &AttributeValue::Void);
        assert_eq!(zone.tell(), 0);
        assert!(zone.trace().contains("#unimplemented[wh=1869f]"));
    }

    #[test]
    fn test_line_spacing() {
        let mut w = ByteWriter::new();
        w.u8(100).i16(-20).u16(300).u8(1).u8(2);
        let (attr, zone) = decode(PARA_LINESPACING, 0, w.into_vec());
        assert!(attr.is_dummy());
        assert_eq!(attr.identifier(), PARA_LINESPACING);
        let fields = attr.fields().unwrap();
        assert_eq!(fields.get_int("propSpace"), Some(100));
        assert_eq!(fields.get_int("interSpace"), Some(-20));
        assert_eq!(fields.get_int("interRule"), Some(2));
        assert!(!zone.trace().has_errors());
    }

    #[test]
    fn test_tab_count_is_clamped() {
        let mut w = ByteWriter::new();
        w.u8(5);
        w.i32(1000).u8(0).u8(b',').u8(b' ');
        w.i32(2000).u8(1).u8(b',').u8(b' ');
        let (attr, zone) = decode(PARA_TABSTOP, 0, w.into_vec());
        let fields = attr.fields().unwrap();
        let Some(PropertyValue::List(tabs)) = fields.get("tabs") else {
            panic!("no tabs");
        };
        assert_eq!(tabs.len(), 2);
        assert_eq!(zone.tell(), 15);
        assert!(zone.trace().contains("###N=5"));
        assert!(!zone.trace().contains("too much"));
    }

    #[test]
    fn test_scale_width_optional_tail() {
        let mut w = ByteWriter::new();
        w.u16(80);
        let (attr, _) = decode(EE_CHAR_SCALEW, 0, w.into_vec());
        assert_eq!(attr.name(), "eeChrScaleW");
        assert_eq!(attr.fields().unwrap().len(), 1);

        let mut w = ByteWriter::new();
        w.u16(80).u16(1).u16(2);
        let (attr, _) = decode(CHR_SCALEW, 0, w.into_vec());
        assert_eq!(attr.fields().unwrap().get_int("test"), Some(2));
    }

    #[test]
    fn test_version_gated_fields() {
        let mut w = ByteWriter::new();
        w.u8(1).u32(5670).u32(1134).u8(50).u8(0);
        let (attr, _) = decode(FRM_FRM_SIZE, 2, w.to_vec());
        assert_eq!(attr.fields().unwrap().get_int("widthPercent"), Some(50));
        let (attr, zone) = decode(FRM_FRM_SIZE, 1, w.into_vec());
        assert!(!attr.fields().unwrap().contains("widthPercent"));
        assert_eq!(zone.tell(), 9);
    }

    #[test]
    fn test_truncation_keeps_partial_fields() {
        let mut w = ByteWriter::new();
        w.u8(1).u32(5670);
        let (attr, zone) = decode(FRM_FRM_SIZE, 0, w.into_vec());
        let fields = attr.fields().unwrap();
        assert_eq!(fields.get_int("width"), Some(5670));
        assert!(!fields.contains("height"));
        assert!(zone.trace().has_errors());
    }

    #[test]
    fn test_over_read_is_flagged() {
        let mut w = ByteWriter::new();
        w.i32(1).i32(2).i32(3).i32(4);
        let registry = AttributeRegistry::empty();
        let mut doc = StarDocument::new(&registry);
        let mut zone = StarZone::from_bytes(w.into_vec(), "test");
        let attr = read(&mut zone, GRF_CROPGRF, 0, 8, &mut doc);
        assert_eq!(attr.fields().unwrap().get_int("bottom"), Some(4));
        assert!(zone.trace().contains("###too much"));
    }

    #[test]
    fn test_inet_format_tail_stays_in_bounds() {
        let mut w = ByteWriter::new();
        w.string("http://a").string("_blank").u16(1).u16(2).u16(0);
        let last = w.len();
        w.string("outside");
        let registry = AttributeRegistry::empty();
        let mut doc = StarDocument::new(&registry);
        let mut zone = StarZone::from_bytes(w.into_vec(), "test");
        let attr = read(&mut zone, TXT_INETFMT, 1, last, &mut doc);
        let fields = attr.fields().unwrap();
        assert_eq!(fields.get_text("url"), Some("http://a"));
        assert!(!fields.contains("name1"));
        assert_eq!(zone.tell(), last);
        assert!(zone.trace().contains("can not read name1"));
        assert!(!zone.trace().contains("###too much"));
    }

    #[test]
    fn test_tox_mark_pool_name() {
        let mut w = ByteWriter::new();
        w.u8(1).u16(2).u16(0);
        w.string("alt").string("").string("");
        let data = w.into_vec();
        let registry = AttributeRegistry::empty();
        let mut doc = StarDocument::new(&registry);
        let mut zone = StarZone::from_bytes(data.clone(), "test");
        zone.add_pool_name("Index");
        let attr = read(&mut zone, TXT_TOXMARK, 1, data.len(), &mut doc);
        let fields = attr.fields().unwrap();
        assert_eq!(fields.get_text("typeName"), Some("Index"));
        assert_eq!(fields.get_text("altText"), Some("alt"));
        assert!(!fields.contains("primKey"));

        let (_, zone) = decode(TXT_TOXMARK, 1, data);
        assert!(zone.trace().contains("no pool name 0"));
    }

    #[test]
    fn test_frame_columns() {
        let mut w = ByteWriter::new();
        w.u8(0).u8(1).u8(100).i16(10).u16(1000).u8(0).i16(0);
        w.u16(0xFF00).u16(0).u16(0x8000).u16(2);
        w.u16(500).u16(0).u16(0).u16(5).u16(0);
        w.u16(500).u16(5).u16(0).u16(0).u16(0);
        let data = w.into_vec();
        let (attr, zone) = decode(FRM_COL, 0, data.clone());
        let fields = attr.fields().unwrap();
        assert_eq!(fields.get_int("penRed"), Some(0xFF));
        assert_eq!(fields.get_int("penBlue"), Some(0x80));
        let Some(PropertyValue::List(cols)) = fields.get("columns") else {
            panic!("no columns");
        };
        assert_eq!(cols.len(), 2);
        assert_eq!(zone.tell(), data.len());

        let (attr, zone) = decode(FRM_COL, 0, data[..data.len() - 1].to_vec());
        assert!(!attr.fields().unwrap().contains("columns"));
        assert!(zone.trace().contains("2 columns do not fit"));
    }

    #[test]
    fn test_frame_box_lines() {
        let mut w = ByteWriter::new();
        w.u16(56);
        w.u8(0).rgb(0xFF, 0, 0).u16(2).u16(0).u16(0);
        w.u8(3).u16(0).u16(5).u16(0).u16(0);
        w.u8(0x14);
        w.u16(1).u16(2).u16(3).u16(4);
        let data = w.into_vec();
        let (attr, zone) = decode(FRM_BOX, 1, data.clone());
        let fields = attr.fields().unwrap();
        let Some(PropertyValue::Nested(top)) = fields.get("top") else {
            panic!("no top line");
        };
        assert_eq!(top.get("color"), Some(&PropertyValue::Color(RGBColor::new(0xFF, 0, 0))));
        assert!(fields.contains("bottom"));
        assert!(!fields.contains("left"));
        assert_eq!(fields.get_int("bottomDistance"), Some(4));
        assert_eq!(zone.tell(), data.len());
    }

    #[test]
    fn test_frame_macro_list() {
        let mut w = ByteWriter::new();
        w.u16(1).i16(2);
        w.u16(7).string("Standard").string("Module1.Main").u16(1);
        w.u16(8).string("Standard");
        let (attr, zone) = decode(FRM_FRMMACRO, 1, w.into_vec());
        let fields = attr.fields().unwrap();
        let Some(PropertyValue::List(macros)) = fields.get("macros") else {
            panic!("no macros");
        };
        assert_eq!(macros.len(), 2);
        let PropertyValue::Nested(first) = &macros[0] else {
            panic!("bad macro");
        };
        assert_eq!(first.get_text("mac"), Some("Module1.Main"));
        assert!(zone.trace().has_errors());
    }

    #[test]
    fn test_document_entry_points_are_delegated() {
        let (attr, zone) = decode(TXT_FIELD, 0, vec![0; 4]);
        assert!(attr.is_dummy());
        assert!(zone.trace().contains("#unimplemented[field]"));
        assert!(zone.trace().contains("can not read the field"));

        let mut w = ByteWriter::new();
        w.u8(1);
        let (attr, zone) = decode(FRM_HEADER, 0, w.into_vec());
        assert_eq!(attr.fields().unwrap().get_int("active"), Some(1));
        assert!(!zone.trace().has_errors());
    }

    #[test]
    fn test_bullet_with_bitmap() {
        let mut w = ByteWriter::new();
        w.u16(128);
        let mut dib = ByteWriter::new();
        mono_dib(&mut dib);
        let dib = dib.into_vec();
        w.u16(0x4D42).u32(14 + dib.len() as u32).u32(0).u32(14 + 48);
        w.bytes(&dib);
        w.i32(300).u16(1).u8(0).u8(b'*').u16(100).string("").string(".");
        let data = w.into_vec();
        let (attr, zone) = decode(EE_PARA_BULLET, 0, data.clone());
        let fields = attr.fields().unwrap();
        assert!(matches!(
            fields.get("bitmap"),
            Some(PropertyValue::Binary(b)) if b.starts_with(b"BM")
        ));
        assert_eq!(fields.get_text("nextText"), Some("."));
        assert_eq!(zone.tell(), data.len());
        assert!(!zone.trace().has_errors());
    }

    #[test]
    fn test_light_direction() {
        let mut w = ByteWriter::new();
        w.f64(0.5).f64(-0.5).f64(1.0);
        let (attr, _) = decode(SDRATTR_3DSCENE_LIGHTDIRECTION_1 + 2, 0, w.into_vec());
        let fields = attr.fields().unwrap();
        assert_eq!(fields.get_int("light"), Some(3));
        assert_eq!(fields.get("y"), Some(&PropertyValue::Double(-0.5)));
    }
}
