//! Streams stored beside the document: embedded pictures and out-place
//! object descriptions.

use bytes::Bytes;

use super::bitmap::{Bitmap, read_bitmap};
use super::svgdi::{Metafile, read_svgdi};
use crate::common::{ByteOrder, Error, Result};
use crate::star::zone::StarZone;

/// Ids of the header stored with a map mode record, in both byte orders.
const MAP_MODE_IDS: [u32; 2] = [0x3546_5347, 0x4753_4635];

/// Format of an embedded picture, guessed from its first word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PictureKind {
    Bitmap,
    Svgdi,
    Wmf,
    Unknown,
}

impl PictureKind {
    fn from_header(header: u16) -> Self {
        match header {
            0x4142 | 0x4d42 => PictureKind::Bitmap,
            0x5653 => PictureKind::Svgdi,
            0xcdd7 => PictureKind::Wmf,
            _ => PictureKind::Unknown,
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            PictureKind::Bitmap => "image/bmp",
            PictureKind::Svgdi => "image/svg",
            PictureKind::Wmf => "image/wmf",
            PictureKind::Unknown => "image/pict",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            PictureKind::Bitmap => "bm",
            PictureKind::Svgdi => "svgdi",
            PictureKind::Wmf => "wmf",
            PictureKind::Unknown => "pict",
        }
    }
}

/// The header fields common to both picture layouts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PictureHeader {
    pub id: u32,
    pub length: i32,
    /// Only stored by the legacy layout
    pub size: Option<(i32, i32)>,
    pub map_mode: i32,
    pub offset: (i32, i32),
    pub scale_x: (i32, i32),
    pub scale_y: (i32, i32),
    pub simple: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddedPicture {
    pub header: PictureHeader,
    pub kind: PictureKind,
    /// The picture bytes, from the end of the header to the end of the stream
    pub data: Bytes,
    /// The decoded picture, for bitmaps
    pub bitmap: Option<Bitmap>,
    /// The decoded metafile, for SVGDI pictures
    pub metafile: Option<Metafile>,
}

/// Read an embedded picture stream from its start.
///
/// Returns `None` when the declared length does not match the stream size.
pub fn read_embedded_picture(zone: &mut StarZone) -> Option<EmbeddedPicture> {
    let label = zone.label("EmbeddedPicture");
    let header = match read_header(zone) {
        Ok(header) => header,
        Err(err) => {
            zone.error(0, format!("{label}{err},"));
            return None;
        },
    };
    let pict_pos = zone.tell();
    let size = zone.input_ref().size();
    if header.length < 10 || usize::try_from(header.length).ok() != size.checked_sub(pict_pos) {
        zone.error(0, format!("{label}###length={},", header.length));
        return None;
    }
    let Ok(data) = zone.input().read_to(size) else {
        zone.error(pict_pos, format!("{label}can not read the picture,"));
        return None;
    };
    let kind = PictureKind::from_header(u16::from_le_bytes([data[0], data[1]]));
    if kind == PictureKind::Unknown {
        zone.error(0, format!("{label}###unknown,"));
    } else {
        zone.note(0, format!("{label}{},", kind.extension()));
    }
    zone.trace_mut().delimit(pict_pos, '|');

    let mut picture = EmbeddedPicture {
        header,
        kind,
        data,
        bitmap: None,
        metafile: None,
    };
    // Both formats are little-endian whatever the header order was.
    zone.input().set_byte_order(ByteOrder::Little);
    match kind {
        PictureKind::Bitmap => {
            if zone.input().seek(pict_pos).is_ok() {
                picture.bitmap = read_bitmap(zone, true, size);
            }
        },
        PictureKind::Svgdi => {
            if zone.input().seek(pict_pos).is_ok() {
                picture.metafile = read_svgdi(zone);
            }
        },
        PictureKind::Wmf | PictureKind::Unknown => {},
    }
    let _ = zone.input().seek(size);
    Some(picture)
}

fn read_header(zone: &mut StarZone) -> Result<PictureHeader> {
    let input = zone.input();
    input.seek(0)?;
    let mut header = PictureHeader {
        id: input.read_u32()?,
        ..PictureHeader::default()
    };
    if MAP_MODE_IDS.contains(&header.id) {
        let _kind = input.read_i32()?;
        header.length = input.read_i32()?;
        header.map_mode = i32::from(input.read_u16()?);
        header.offset = (input.read_i32()?, input.read_i32()?);
        header.scale_x = (input.read_i32()?, input.read_i32()?);
        header.scale_y = (input.read_i32()?, input.read_i32()?);
        header.simple = input.read_bool()?;
        return Ok(header);
    }
    if header.id > 0x100 {
        input.flip_byte_order();
        input.seek(0)?;
        header.id = input.read_u32()?;
    }
    header.length = input.read_i32()?;
    header.size = Some((input.read_i32()?, input.read_i32()?));
    header.map_mode = input.read_i32()?;
    header.scale_x = (input.read_i32()?, input.read_i32()?);
    header.scale_y = (input.read_i32()?, input.read_i32()?);
    header.offset = (input.read_i32()?, input.read_i32()?);
    Ok(header)
}

/// Description of an object stored outside the document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutPlaceObject {
    pub length: u16,
    pub aspect: u32,
    pub set_extent: bool,
    pub extra_data: bool,
}

/// Read an out-place object stream from its start.
pub fn read_out_place_object(zone: &mut StarZone) -> Option<OutPlaceObject> {
    let label = zone.label("OutPlaceObject");
    let object = (|| -> Result<OutPlaceObject> {
        let input = zone.input();
        input.seek(0)?;
        if input.size() < 7 {
            return Err(Error::InvalidFormat(format!(
                "stream of {} bytes is too short",
                input.size()
            )));
        }
        Ok(OutPlaceObject {
            length: input.read_u16()?,
            aspect: input.read_u32()?,
            set_extent: input.read_bool()?,
            extra_data: !input.is_end(),
        })
    })();
    match object {
        Ok(object) => {
            if object.extra_data {
                let end = zone.tell();
                zone.error(0, format!("{label}length={},###extra", object.length));
                zone.trace_mut().delimit(end, '|');
            } else {
                zone.note(
                    0,
                    format!("{label}length={},dwAspect={},", object.length, object.aspect),
                );
            }
            Some(object)
        },
        Err(err) => {
            zone.error(0, format!("{label}{err},"));
            None
        },
    }
}
