//! StarView metafiles.
//!
//! An `SVGDI` stream is a short header followed by a counted list of
//! actions. Each action starts with an i16 type and an i32 size counting the
//! size field itself, so the reader can always realign on the next action
//! whatever it understood of the current one.

use tracing::debug;

use super::bitmap::{Bitmap, read_bitmap};
use crate::common::encoding::decode_utf16_units;
use crate::common::{Error, RGBColor, Result};
use crate::star::input::StarInput;
use crate::star::zone::StarZone;

const SVGDI_MAGIC: &[u8] = b"SVGDI";
const VCLMTF_MAGIC: &[u8] = b"VCLMTF";
/// The only header version ever written.
pub const SVGDI_VERSION: i16 = 200;
const MIN_HEADER_SIZE: u16 = 42;

const ACTION_UNICODE_NEXT: i16 = 1032;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    pub top_left: Point,
    pub bottom_right: Point,
}

/// Logical coordinate system of a metafile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MapMode {
    pub unit: i16,
    pub origin: Point,
    /// Numerator and denominator
    pub scale_x: (i32, i32),
    pub scale_y: (i32, i32),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FontAction {
    pub color: RGBColor,
    pub fill_color: RGBColor,
    pub name: String,
    pub size: Point,
    pub char_set: i16,
    pub family: i16,
    pub pitch: i16,
    pub align: i16,
    pub weight: i16,
    pub underline: i16,
    pub strike_out: i16,
    pub char_orientation: i16,
    pub line_orientation: i16,
    pub italic: bool,
    pub outline: bool,
    pub shadow: bool,
    pub transparent: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClipShape {
    None,
    Rect(Rect),
    Polygon(Vec<Point>),
    PolyPolygon(Vec<Vec<Point>>),
}

/// Header of a nested `VCLMTF` metafile; its actions are skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VclMetafile {
    pub compression: u32,
    pub map_mode: MapMode,
    pub size: u32,
    pub action_count: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MetaAction {
    Pixel { point: Point, color: RGBColor },
    Point(Point),
    Line(Point, Point),
    Rect { rect: Rect, round: Point },
    Ellipse(Rect),
    Arc { rect: Rect, start: Point, end: Point },
    Pie { rect: Rect, start: Point, end: Point },
    InvertRect(Rect),
    HighlightRect(Rect),
    PolyLine(Vec<Point>),
    Polygon(Vec<Point>),
    PolyPolygon(Vec<Vec<Point>>),
    Text {
        pos: Point,
        index: i32,
        len: i32,
        /// Set for stretched text
        width: Option<i32>,
        text: String,
        unicode: Option<String>,
    },
    TextArray {
        pos: Point,
        index: i32,
        len: i32,
        text: String,
        dx: Vec<i32>,
        unicode: Option<String>,
    },
    Icon,
    Bitmap {
        pos: Point,
        size: Option<Point>,
        /// Source position and size of a partial copy
        source: Option<(Point, Point)>,
        bitmap: Option<Bitmap>,
    },
    Pen { color: RGBColor, width: u32, style: u16 },
    Font(Box<FontAction>),
    Brush { fill: bool, color: RGBColor, style: i16 },
    MapMode(MapMode),
    ClipRegion { rect: Rect, intersect: bool, shape: ClipShape },
    RasterOp(u16),
    Push,
    Pop,
    MoveClip(Point),
    IntersectClip(Rect),
    Metafile(VclMetafile),
    FloatTransparent { metafile: VclMetafile, origin: Point, size: u32 },
    Gradient {
        rect: Rect,
        style: u16,
        colors: [RGBColor; 2],
        angle: i16,
        border: i16,
        offset: (i16, i16),
        intensity: (i16, i16),
    },
    TransparentComment { polygons: Vec<Vec<Point>>, transparence: u16, comments: u32 },
    HatchComment {
        polygons: Vec<Vec<Point>>,
        style: u16,
        color: RGBColor,
        distance: i32,
        comments: u32,
    },
    GradientComment { polygons: Vec<Vec<Point>> },
    RefPointComment { point: Point, set: bool, comments: u32 },
    TextLineColorComment { color: RGBColor, set: bool, comments: u32 },
    TextLineComment { pos: Point, width: i32, strike_out: u32, underline: u32, comments: u32 },
    CommentComment { text: String, value: u32, comments: u32 },
    /// The next text action carries a UTF-16 copy of its string
    UnicodeNext,
    Unknown(i16),
}

impl MetaAction {
    pub fn name(&self) -> &'static str {
        match self {
            MetaAction::Pixel { .. } => "pixel",
            MetaAction::Point(_) => "point",
            MetaAction::Line(..) => "line",
            MetaAction::Rect { .. } => "rect",
            MetaAction::Ellipse(_) => "ellipse",
            MetaAction::Arc { .. } => "arc",
            MetaAction::Pie { .. } => "pie",
            MetaAction::InvertRect(_) => "rect[invert]",
            MetaAction::HighlightRect(_) => "rect[highlight]",
            MetaAction::PolyLine(_) => "polyline",
            MetaAction::Polygon(_) => "polygon",
            MetaAction::PolyPolygon(_) => "polypoly",
            MetaAction::Text { width: None, .. } => "text",
            MetaAction::Text { .. } => "stretch",
            MetaAction::TextArray { .. } => "text[array]",
            MetaAction::Icon => "icon",
            MetaAction::Bitmap { .. } => "bitmap",
            MetaAction::Pen { .. } => "pen",
            MetaAction::Font(_) => "font",
            MetaAction::Brush { fill: false, .. } => "brush[back]",
            MetaAction::Brush { .. } => "brush[fill]",
            MetaAction::MapMode(_) => "map[mode]",
            MetaAction::ClipRegion { .. } => "clip[region]",
            MetaAction::RasterOp(_) => "raster",
            MetaAction::Push => "push",
            MetaAction::Pop => "pop",
            MetaAction::MoveClip(_) => "clip[move]",
            MetaAction::IntersectClip(_) => "clip[rect]",
            MetaAction::Metafile(_) => "mtf",
            MetaAction::FloatTransparent { .. } => "floatComment",
            MetaAction::Gradient { .. } => "gradient",
            MetaAction::TransparentComment { .. } => "transparent[comment]",
            MetaAction::HatchComment { .. } => "hatch[comment]",
            MetaAction::GradientComment { .. } => "gradient[comment]",
            MetaAction::RefPointComment { .. } => "refpoint[comment]",
            MetaAction::TextLineColorComment { .. } => "textline[color,comment]",
            MetaAction::TextLineComment { .. } => "textline[comment]",
            MetaAction::CommentComment { .. } => "comment[comment]",
            MetaAction::UnicodeNext => "unicode[next]",
            MetaAction::Unknown(_) => "unknown",
        }
    }
}

/// A decoded `SVGDI` metafile.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metafile {
    pub width: i32,
    pub height: i32,
    pub map_mode: MapMode,
    /// Number of actions announced by the header
    pub declared_actions: i32,
    pub actions: Vec<MetaAction>,
    /// False when the action list had to be abandoned
    pub complete: bool,
}

/// Read an `SVGDI` metafile at the current position.
///
/// Returns `None` when the magic, the version or the header size is wrong;
/// the cursor is then restored. Actions that can not be decoded are dropped
/// and the reader goes on with the next one.
pub fn read_svgdi(zone: &mut StarZone) -> Option<Metafile> {
    let pos = zone.tell();
    let last_pos = zone.record_last_position();
    let label = zone.label("ImageSVGDI");
    let mut metafile = match read_header(zone, pos, last_pos) {
        Ok(metafile) => metafile,
        Err(err) => {
            zone.error(pos, format!("{label}{err},"));
            let _ = zone.input().seek(pos);
            return None;
        },
    };
    zone.note(
        pos,
        format!(
            "{label}size={}x{},actions={},",
            metafile.width, metafile.height, metafile.declared_actions
        ),
    );

    metafile.complete = true;
    let mut unicode_action = None;
    for i in 0..metafile.declared_actions.max(0) {
        let start = zone.tell();
        let header = read_action_header(zone.input());
        let end = header.as_ref().ok().and_then(|&(_, size)| {
            let end = i64::try_from(start).ok()? + 2 + i64::from(size);
            usize::try_from(end).ok().filter(|&end| size >= 4 && end <= last_pos)
        });
        let (Ok((kind, _)), Some(end)) = (header, end) else {
            zone.error(start, format!("{label}[{i}]:###bad size,"));
            let _ = zone.input().seek(start);
            metafile.complete = false;
            break;
        };

        let with_unicode = unicode_action == Some(i);
        match read_action(zone, kind, end, with_unicode) {
            Ok(action) => {
                if action == MetaAction::UnicodeNext {
                    unicode_action = Some(i + 1);
                }
                zone.note(start, format!("{label}[{i}]:{},", action.name()));
                metafile.actions.push(action);
            },
            Err(err) => zone.error(start, format!("{label}[{i}]:type={kind}: {err},")),
        }
        let tell = zone.tell();
        if tell != end {
            zone.note(tell, format!("{label}[{i}]:###extra,"));
            zone.trace_mut().delimit(tell, '|');
        }
        if zone.input().seek(end).is_err() {
            metafile.complete = false;
            break;
        }
    }
    Some(metafile)
}

fn read_header(zone: &mut StarZone, pos: usize, last_pos: usize) -> Result<Metafile> {
    let input = zone.input();
    let magic = input.read_bytes(SVGDI_MAGIC.len())?;
    if magic.as_ref() != SVGDI_MAGIC {
        return Err(Error::BadMagic {
            expected: "SVGDI".to_string(),
            found: String::from_utf8_lossy(&magic).into_owned(),
        });
    }
    let size = input.read_u16()?;
    let version = input.read_i16()?;
    let width = input.read_i32()?;
    let height = input.read_i32()?;
    if version != SVGDI_VERSION {
        return Err(Error::UnsupportedVersion(i64::from(version)));
    }
    let end = pos + SVGDI_MAGIC.len() + usize::from(size);
    if size < MIN_HEADER_SIZE || end > last_pos {
        return Err(Error::Corrupted(format!("bad header size {size}")));
    }
    let map_mode = read_map_mode(input)?;
    let declared_actions = input.read_i32()?;
    let tell = input.tell();
    if tell != end {
        zone.trace_mut().delimit(tell, '|');
    }
    zone.input().seek(end)?;
    Ok(Metafile {
        width,
        height,
        map_mode,
        declared_actions,
        actions: Vec::new(),
        complete: false,
    })
}

fn read_action_header(input: &mut StarInput) -> Result<(i16, i32)> {
    Ok((input.read_i16()?, input.read_i32()?))
}

fn read_point(input: &mut StarInput) -> Result<Point> {
    Ok(Point {
        x: input.read_i32()?,
        y: input.read_i32()?,
    })
}

fn read_rect(input: &mut StarInput) -> Result<Rect> {
    Ok(Rect {
        top_left: read_point(input)?,
        bottom_right: read_point(input)?,
    })
}

/// Three 16-bit channels, only the high byte matters.
fn read_rgb(input: &mut StarInput) -> Result<RGBColor> {
    let r = input.read_u16()?;
    let g = input.read_u16()?;
    let b = input.read_u16()?;
    Ok(RGBColor::new((r >> 8) as u8, (g >> 8) as u8, (b >> 8) as u8))
}

fn read_map_mode(input: &mut StarInput) -> Result<MapMode> {
    Ok(MapMode {
        unit: input.read_i16()?,
        origin: read_point(input)?,
        scale_x: (input.read_i32()?, input.read_i32()?),
        scale_y: (input.read_i32()?, input.read_i32()?),
    })
}

fn read_points(input: &mut StarInput, end: usize) -> Result<Vec<Point>> {
    let count = input.read_i32()?;
    let fits = usize::try_from(count)
        .ok()
        .filter(|&n| input.tell() + 8 * n <= end);
    let Some(count) = fits else {
        return Err(Error::Corrupted(format!("bad number of points {count}")));
    };
    (0..count).map(|_| read_point(input)).collect()
}

fn read_polygons(input: &mut StarInput, end: usize) -> Result<Vec<Vec<Point>>> {
    let count = input.read_i32()?;
    let max = (end.saturating_sub(input.tell())) / 4;
    let count = usize::try_from(count).unwrap_or(0).min(max);
    (0..count).map(|_| read_points(input, end)).collect()
}

/// An 8-bit string of `len` bytes followed by a NUL.
fn read_text(zone: &mut StarZone, len: i32, extra: usize, end: usize) -> Result<String> {
    let fits = usize::try_from(len)
        .ok()
        .filter(|&n| zone.tell() + n + extra <= end);
    let Some(len) = fits else {
        return Err(Error::Corrupted(format!("bad string length {len}")));
    };
    let raw = zone.input().read_bytes(len)?;
    zone.input().skip(1)?;
    Ok(zone.decode(&raw))
}

/// The UTF-16 copy announced by a previous [`MetaAction::UnicodeNext`].
fn read_unicode_copy(zone: &mut StarZone, end: usize) -> Option<String> {
    let pos = zone.tell();
    let label = zone.label("ImageSVGDI");
    let read = |zone: &mut StarZone| -> Result<Option<String>> {
        let input = zone.input();
        let kind = input.read_u16()?;
        let len = input.read_u32()? as usize;
        if len < 4 || input.tell() + len - 4 > end {
            return Err(Error::Corrupted(format!("bad unicode length {len}")));
        }
        if kind != ACTION_UNICODE_NEXT as u16 {
            input.skip(len - 4)?;
            return Ok(None);
        }
        let units = (0..(len - 4) / 2)
            .map(|_| input.read_u16())
            .collect::<Result<Vec<_>>>()?;
        Ok(Some(decode_utf16_units(&units)))
    };
    match read(zone) {
        Ok(Some(text)) => Some(text),
        Ok(None) => {
            zone.error(pos, format!("{label}###unknown unicode data,"));
            None
        },
        Err(err) => {
            zone.error(pos, format!("{label}###unicode: {err},"));
            None
        },
    }
}

fn read_action(
    zone: &mut StarZone,
    kind: i16,
    end: usize,
    with_unicode: bool,
) -> Result<MetaAction> {
    let action = match kind {
        1 => {
            let input = zone.input();
            MetaAction::Pixel {
                point: read_point(input)?,
                color: read_rgb(input)?,
            }
        },
        2 => MetaAction::Point(read_point(zone.input())?),
        3 => {
            let input = zone.input();
            MetaAction::Line(read_point(input)?, read_point(input)?)
        },
        4 => {
            let input = zone.input();
            MetaAction::Rect {
                rect: read_rect(input)?,
                round: read_point(input)?,
            }
        },
        5 => MetaAction::Ellipse(read_rect(zone.input())?),
        6 | 7 => {
            let input = zone.input();
            let (rect, start, stop) = (read_rect(input)?, read_point(input)?, read_point(input)?);
            if kind == 6 {
                MetaAction::Arc { rect, start, end: stop }
            } else {
                MetaAction::Pie { rect, start, end: stop }
            }
        },
        8 => MetaAction::InvertRect(read_rect(zone.input())?),
        9 => MetaAction::HighlightRect(read_rect(zone.input())?),
        10 => MetaAction::PolyLine(read_points(zone.input(), end)?),
        11 => MetaAction::Polygon(read_points(zone.input(), end)?),
        12 => MetaAction::PolyPolygon(read_polygons(zone.input(), end)?),
        13 | 15 => {
            let input = zone.input();
            let pos = read_point(input)?;
            let index = input.read_i32()?;
            let len = input.read_i32()?;
            let text_len = input.read_i32()?;
            let width = if kind == 15 { Some(input.read_i32()?) } else { None };
            let text = read_text(zone, text_len, 0, end)?;
            let unicode = if with_unicode { read_unicode_copy(zone, end) } else { None };
            MetaAction::Text {
                pos,
                index,
                len,
                width,
                text,
                unicode,
            }
        },
        14 => {
            let input = zone.input();
            let pos = read_point(input)?;
            let index = input.read_i32()?;
            let len = input.read_i32()?;
            let text_len = input.read_i32()?;
            let dx_len = input.read_i32()?;
            let dx_len = usize::try_from(dx_len)
                .map_err(|_| Error::Corrupted(format!("bad array length {dx_len}")))?;
            let text = read_text(zone, text_len, 4 * dx_len, end)?;
            let input = zone.input();
            let dx = (0..dx_len).map(|_| input.read_i32()).collect::<Result<Vec<_>>>()?;
            let unicode = if with_unicode { read_unicode_copy(zone, end) } else { None };
            MetaAction::TextArray {
                pos,
                index,
                len,
                text,
                dx,
                unicode,
            }
        },
        16 => {
            debug!("reading icon actions is not implemented");
            MetaAction::Icon
        },
        17 | 18 | 32 => {
            let input = zone.input();
            let pos = read_point(input)?;
            let size = if kind != 17 { Some(read_point(input)?) } else { None };
            let source = if kind == 32 {
                Some((read_point(input)?, read_point(input)?))
            } else {
                None
            };
            let bitmap = read_bitmap(zone, false, end);
            MetaAction::Bitmap {
                pos,
                size,
                source,
                bitmap,
            }
        },
        19 => {
            let input = zone.input();
            MetaAction::Pen {
                color: read_rgb(input)?,
                width: input.read_u32()?,
                style: input.read_u16()?,
            }
        },
        20 => MetaAction::Font(Box::new(read_font_action(zone, end)?)),
        21 | 22 => {
            let input = zone.input();
            let color = read_rgb(input)?;
            input.skip(6)?;
            let style = input.read_i16()?;
            input.skip(2)?;
            MetaAction::Brush {
                fill: kind == 22,
                color,
                style,
            }
        },
        23 => MetaAction::MapMode(read_map_mode(zone.input())?),
        24 => {
            let input = zone.input();
            let clip_type = input.read_i16()?;
            let intersect = input.read_i16()? != 0;
            let rect = read_rect(input)?;
            let shape = match clip_type {
                0 => ClipShape::None,
                1 => ClipShape::Rect(read_rect(input)?),
                2 => ClipShape::Polygon(read_points(input, end)?),
                3 => ClipShape::PolyPolygon(read_polygons(input, end)?),
                n => return Err(Error::Corrupted(format!("unknown clip type {n}"))),
            };
            MetaAction::ClipRegion { rect, intersect, shape }
        },
        25 => MetaAction::RasterOp(zone.input().read_u16()?),
        26 => MetaAction::Push,
        27 => MetaAction::Pop,
        28 => MetaAction::MoveClip(read_point(zone.input())?),
        29 => MetaAction::IntersectClip(read_rect(zone.input())?),
        30 => MetaAction::Metafile(read_vcl_metafile(zone)?),
        1029 => {
            let metafile = read_vcl_metafile(zone)?;
            let input = zone.input();
            let origin = read_point(input)?;
            let size = input.read_u32()?;
            debug!("reading the gradient of a float transparent action is not implemented");
            MetaAction::FloatTransparent { metafile, origin, size }
        },
        33 => {
            let input = zone.input();
            MetaAction::Gradient {
                rect: read_rect(input)?,
                style: input.read_u16()?,
                colors: [read_rgb(input)?, read_rgb(input)?],
                angle: input.read_i16()?,
                border: input.read_i16()?,
                offset: (input.read_i16()?, input.read_i16()?),
                intensity: (input.read_i16()?, input.read_i16()?),
            }
        },
        1024 => {
            let input = zone.input();
            MetaAction::TransparentComment {
                polygons: read_polygons(input, end)?,
                transparence: input.read_u16()?,
                comments: input.read_u32()?,
            }
        },
        1025 => {
            let input = zone.input();
            MetaAction::HatchComment {
                polygons: read_polygons(input, end)?,
                style: input.read_u16()?,
                color: read_rgb(input)?,
                distance: input.read_i32()?,
                comments: input.read_u32()?,
            }
        },
        1030 => {
            let polygons = read_polygons(zone.input(), end)?;
            debug!("reading gradient comments is not implemented");
            MetaAction::GradientComment { polygons }
        },
        1026 => {
            let input = zone.input();
            MetaAction::RefPointComment {
                point: read_point(input)?,
                set: input.read_bool()?,
                comments: input.read_u32()?,
            }
        },
        1027 => {
            let input = zone.input();
            MetaAction::TextLineColorComment {
                color: read_rgb(input)?,
                set: input.read_bool()?,
                comments: input.read_u32()?,
            }
        },
        1028 => {
            let input = zone.input();
            MetaAction::TextLineComment {
                pos: read_point(input)?,
                width: input.read_i32()?,
                strike_out: input.read_u32()?,
                underline: input.read_u32()?,
                comments: input.read_u32()?,
            }
        },
        1031 => {
            let text = zone.read_string()?;
            let input = zone.input();
            let value = input.read_u32()?;
            let size = input.read_i32()?;
            let fits = usize::try_from(size)
                .ok()
                .filter(|&n| input.tell() + n + 4 <= end);
            let Some(size) = fits else {
                return Err(Error::Corrupted(format!("bad comment size {size}")));
            };
            if size > 0 {
                let pos = zone.tell();
                zone.trace_mut().delimit(pos, '|');
                zone.input().skip(size)?;
            }
            MetaAction::CommentComment {
                text,
                value,
                comments: zone.input().read_u32()?,
            }
        },
        ACTION_UNICODE_NEXT => MetaAction::UnicodeNext,
        _ => {
            debug!(kind, "unimplemented metafile action");
            let pos = zone.tell();
            let label = zone.label("ImageSVGDI");
            zone.note(pos, format!("{label}#unimplemented[type={kind}],"));
            MetaAction::Unknown(kind)
        },
    };
    Ok(action)
}

fn read_font_action(zone: &mut StarZone, end: usize) -> Result<FontAction> {
    let input = zone.input();
    let color = read_rgb(input)?;
    let fill_color = read_rgb(input)?;
    if input.tell() + 62 > end {
        return Err(Error::Corrupted("the font zone is too short".to_string()));
    }
    let raw = input.read_fixed_name(32)?;
    let name = zone.decode(&raw);
    let input = zone.input();
    Ok(FontAction {
        color,
        fill_color,
        name,
        size: read_point(input)?,
        char_set: input.read_i16()?,
        family: input.read_i16()?,
        pitch: input.read_i16()?,
        align: input.read_i16()?,
        weight: input.read_i16()?,
        underline: input.read_i16()?,
        strike_out: input.read_i16()?,
        char_orientation: input.read_i16()?,
        line_orientation: input.read_i16()?,
        italic: input.read_bool()?,
        outline: input.read_bool()?,
        shadow: input.read_bool()?,
        transparent: input.read_bool()?,
    })
}

/// Read a `VCLMTF` header; the actions it announces are skipped.
pub fn read_vcl_metafile(zone: &mut StarZone) -> Result<VclMetafile> {
    let magic = zone.input().read_bytes(VCLMTF_MAGIC.len())?;
    if magic.as_ref() != VCLMTF_MAGIC {
        return Err(Error::BadMagic {
            expected: "VCLMTF".to_string(),
            found: String::from_utf8_lossy(&magic).into_owned(),
        });
    }
    zone.open_version_compat_header()?;
    let read = |zone: &mut StarZone| -> Result<VclMetafile> {
        let input = zone.input();
        Ok(VclMetafile {
            compression: input.read_u32()?,
            map_mode: read_map_mode(input)?,
            size: input.read_u32()?,
            action_count: input.read_u32()?,
        })
    };
    let metafile = read(zone);
    let pos = zone.tell();
    if metafile.is_ok() && pos != zone.record_last_position() {
        debug!("reading the actions of a nested metafile is not implemented");
        let label = zone.label("ImageSVGDI");
        zone.note(pos, format!("{label}#unimplemented[listMeta],"));
    }
    zone.close_version_compat_header("ImageSVGDI");
    metafile
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::star::object::bitmap::tests::mono_dib;
    use crate::star::test_utils::ByteWriter;
    use proptest::prelude::*;

    fn header(w: &mut ByteWriter, actions: i32) {
        w.bytes(b"SVGDI").u16(42).i16(200).i32(100).i32(50);
        w.i16(1).i32(0).i32(0).i32(1).i32(2).i32(1).i32(2);
        w.i32(actions);
    }

    fn action(w: &mut ByteWriter, kind: i16, body: &[u8]) {
        w.i16(kind).i32(body.len() as i32 + 4).bytes(body);
    }

    fn body(build: impl FnOnce(&mut ByteWriter)) -> Vec<u8> {
        let mut w = ByteWriter::new();
        build(&mut w);
        w.into_vec()
    }

    fn decode(data: Vec<u8>) -> (Option<Metafile>, StarZone) {
        let mut zone = StarZone::from_bytes(data, "svgdi");
        (read_svgdi(&mut zone), zone)
    }

    #[test]
    fn test_empty_metafile() {
        let mut w = ByteWriter::new();
        header(&mut w, 0);
        let (metafile, zone) = decode(w.into_vec());
        let metafile = metafile.unwrap();
        assert!(metafile.actions.is_empty());
        assert!(metafile.complete);
        assert_eq!((metafile.width, metafile.height), (100, 50));
        assert_eq!(metafile.map_mode.scale_x, (1, 2));
        assert_eq!(zone.trace().entries().len(), 1);
        assert!(!zone.trace().has_errors());
        assert_eq!(zone.tell(), 47);
    }

    #[test]
    fn test_bad_version_is_rejected() {
        let mut w = ByteWriter::new();
        header(&mut w, 0);
        let mut data = w.into_vec();
        data[7] = 201;
        let (metafile, zone) = decode(data);
        assert!(metafile.is_none());
        assert_eq!(zone.tell(), 0);
        assert!(zone.trace().contains("Unsupported version: 201"));

        let (metafile, _) = decode(b"SVGDX and more".to_vec());
        assert!(metafile.is_none());
    }

    #[test]
    fn test_bad_action_size_stops() {
        let mut w = ByteWriter::new();
        header(&mut w, 2);
        action(&mut w, 2, &body(|w| {
            w.i32(1).i32(2);
        }));
        w.i16(2).i32(1000);
        let (metafile, zone) = decode(w.into_vec());
        let metafile = metafile.unwrap();
        assert_eq!(metafile.actions, vec![MetaAction::Point(Point { x: 1, y: 2 })]);
        assert!(!metafile.complete);
        assert_eq!(zone.tell(), 47 + 14);
        assert!(zone.trace().contains("###bad size"));
    }

    #[test]
    fn test_unicode_copy_follows_marker() {
        let mut w = ByteWriter::new();
        header(&mut w, 3);
        let text = body(|w| {
            w.i32(0).i32(0).i32(0).i32(2).i32(2);
            w.bytes(b"Hi\0");
            w.u16(1032).u32(8).u16(0x48).u16(0x20AC);
        });
        action(&mut w, 13, &text);
        action(&mut w, ACTION_UNICODE_NEXT, &[]);
        action(&mut w, 13, &text);
        let (metafile, zone) = decode(w.into_vec());
        let actions = metafile.unwrap().actions;
        assert_eq!(actions.len(), 3);
        let MetaAction::Text { text, unicode, .. } = &actions[0] else {
            panic!("not a text");
        };
        assert_eq!(text, "Hi");
        assert_eq!(unicode, &None);
        let MetaAction::Text { unicode, .. } = &actions[2] else {
            panic!("not a text");
        };
        assert_eq!(unicode.as_deref(), Some("H\u{20AC}"));
        // the first copy is left unread and skipped
        assert!(zone.trace().contains("[0]:###extra"));
    }

    #[test]
    fn test_bitmap_action_does_not_swallow_pen() {
        let mut w = ByteWriter::new();
        header(&mut w, 2);
        action(&mut w, 17, &body(|w| {
            w.i32(10).i32(20);
            mono_dib(w);
        }));
        action(&mut w, 19, &body(|w| {
            w.u16(0xFF00).u16(0).u16(0).u32(3).u16(1);
        }));
        let (metafile, zone) = decode(w.into_vec());
        let actions = metafile.unwrap().actions;
        let MetaAction::Bitmap { pos, size, bitmap, .. } = &actions[0] else {
            panic!("not a bitmap");
        };
        assert_eq!(*pos, Point { x: 10, y: 20 });
        assert_eq!(*size, None);
        assert_eq!(bitmap.as_ref().map(|b| b.width), Some(2));
        assert_eq!(
            actions[1],
            MetaAction::Pen {
                color: RGBColor::new(0xFF, 0, 0),
                width: 3,
                style: 1
            }
        );
        assert!(!zone.trace().has_errors());
    }

    #[test]
    fn test_nested_vcl_metafile() {
        let mut w = ByteWriter::new();
        header(&mut w, 1);
        let inner = body(|w| {
            w.u32(0);
            w.i16(0).i32(0).i32(0).i32(1).i32(1).i32(1).i32(1);
            w.u32(64).u32(2);
            w.zeros(6);
        });
        action(&mut w, 30, &body(|w| {
            w.bytes(b"VCLMTF").compat(1, &inner);
        }));
        let (metafile, zone) = decode(w.into_vec());
        let actions = metafile.unwrap().actions;
        let MetaAction::Metafile(mtf) = &actions[0] else {
            panic!("not a metafile");
        };
        assert_eq!((mtf.size, mtf.action_count), (64, 2));
        assert!(zone.trace().contains("#unimplemented[listMeta]"));
        assert_eq!(zone.record_level(), 0);
    }

    #[test]
    fn test_bad_polygon_is_dropped() {
        let mut w = ByteWriter::new();
        header(&mut w, 2);
        action(&mut w, 11, &body(|w| {
            w.i32(5).i32(0).i32(0);
        }));
        action(&mut w, 26, &[]);
        let (metafile, zone) = decode(w.into_vec());
        let metafile = metafile.unwrap();
        assert_eq!(metafile.actions, vec![MetaAction::Push]);
        assert!(metafile.complete);
        assert!(zone.trace().contains("bad number of points 5"));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_actions_realign(
            unknown in 34i16..1000,
            payload in proptest::collection::vec(any::<u8>(), 0..40),
            padding in 0usize..16,
            x in any::<i32>(),
            y in any::<i32>(),
        ) {
            let mut w = ByteWriter::new();
            header(&mut w, 3);
            let mut point = body(|w| { w.i32(x).i32(y); });
            point.extend(std::iter::repeat_n(0xAA, padding));
            action(&mut w, 2, &point);
            action(&mut w, unknown, &payload);
            let line_start = w.len();
            action(&mut w, 3, &body(|w| { w.i32(y).i32(x).i32(1).i32(2); }));
            let data = w.into_vec();
            let total = data.len();
            let (metafile, zone) = decode(data);
            let actions = metafile.unwrap().actions;
            prop_assert_eq!(zone.tell(), total);
            prop_assert_eq!(line_start + 2 + 4 + 16, total);
            prop_assert_eq!(actions.len(), 3);
            prop_assert_eq!(&actions[0], &MetaAction::Point(Point { x, y }));
            prop_assert_eq!(&actions[1], &MetaAction::Unknown(unknown));
            prop_assert_eq!(
                &actions[2],
                &MetaAction::Line(Point { x: y, y: x }, Point { x: 1, y: 2 })
            );
        }
    }
}
