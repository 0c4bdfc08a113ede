//! Printer job setups.
//!
//! The record starts with a u16 length (zero for an empty setup), the
//! system id and four NUL-padded names. Systems below
//! [`SYSTEM_STRING_LIST`] are followed by opaque driver data only; the two
//! portable systems carry a fixed block of paper values, the driver data
//! and, for [`SYSTEM_STRING_LIST`], a list of key/value strings.

use bytes::Bytes;

use crate::common::{Error, Result};
use crate::star::zone::StarZone;

/// System id of setups ending with key/value strings.
pub const SYSTEM_STRING_LIST: u16 = 0xFFFE;

const NAMES_SIZE: usize = 2 + 64 + 3 * 32;
const PAPER_SIZE: usize = 22;

/// Paper values of the portable layouts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaperSetup {
    pub size: u16,
    pub system: u16,
    pub orientation: u16,
    pub paper_bin: u16,
    pub paper_format: u16,
    pub paper_width: u32,
    pub paper_height: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobSetup {
    pub len: u16,
    pub system: u16,
    pub printer_name: String,
    pub device_name: String,
    pub port_name: String,
    pub driver_name: String,
    pub paper: Option<PaperSetup>,
    pub driver_data: Bytes,
    pub values: Vec<(String, String)>,
    /// False when the record was damaged; the fields read so far are kept
    pub complete: bool,
}

/// Read a job setup ending at the end of the current record.
///
/// A damaged setup is returned with `complete` unset and the cursor at the
/// end of the record. Returns `None` only when not even the length can be read.
pub fn read_job_setup(zone: &mut StarZone) -> Option<JobSetup> {
    let pos = zone.tell();
    let label = zone.label("JobSetUp");
    let last_pos = zone.record_last_position();
    let mut setup = JobSetup::default();
    let len = zone.input().read_u16();
    setup.len = match len {
        Ok(len) => len,
        Err(err) => {
            zone.error(pos, format!("{label}{err},"));
            return None;
        },
    };
    let summary = |setup: &JobSetup| {
        format!(
            "{label}nLen={},system={},printer={},",
            setup.len, setup.system, setup.printer_name
        )
    };
    match read_setup(zone, last_pos, &mut setup) {
        Ok(()) => {
            setup.complete = true;
            zone.note(pos, summary(&setup));
        },
        Err(err) => {
            zone.error(pos, format!("{}###{err},", summary(&setup)));
            let _ = zone.input().seek(last_pos);
        },
    }
    Some(setup)
}

fn read_setup(zone: &mut StarZone, last_pos: usize, setup: &mut JobSetup) -> Result<()> {
    if setup.len == 0 {
        return Ok(());
    }
    if zone.tell() + NAMES_SIZE > last_pos {
        return Err(Error::Corrupted("the names do not fit".to_string()));
    }
    setup.system = zone.input().read_u16()?;
    let mut names = Vec::with_capacity(4);
    for width in [64, 32, 32, 32] {
        let raw = zone.input().read_fixed_name(width)?;
        names.push(zone.decode(&raw));
    }
    let [printer, device, port, driver]: [String; 4] = names
        .try_into()
        .map_err(|_| Error::Corrupted("printer names".to_string()))?;
    setup.printer_name = printer;
    setup.device_name = device;
    setup.port_name = port;
    setup.driver_name = driver;

    if setup.system < SYSTEM_STRING_LIST {
        setup.driver_data = zone.input().read_to(last_pos)?;
        return Ok(());
    }
    if zone.tell() + PAPER_SIZE > last_pos {
        return Err(Error::Corrupted("the paper values do not fit".to_string()));
    }
    let input = zone.input();
    let size = input.read_u16()?;
    let system = input.read_u16()?;
    let driver_len = input.read_u32()? as usize;
    setup.paper = Some(PaperSetup {
        size,
        system,
        orientation: input.read_u16()?,
        paper_bin: input.read_u16()?,
        paper_format: input.read_u16()?,
        paper_width: input.read_u32()?,
        paper_height: input.read_u32()?,
    });
    if input.tell() + driver_len > last_pos {
        return Err(Error::Corrupted(format!("driver data of {driver_len} bytes is too long")));
    }
    setup.driver_data = input.read_bytes(driver_len)?;

    if setup.system == SYSTEM_STRING_LIST {
        while zone.tell() < last_pos {
            let key = zone.read_string()?;
            let value = zone.read_string()?;
            if zone.tell() > last_pos {
                return Err(Error::Corrupted("a value ends after the record".to_string()));
            }
            setup.values.push((key, value));
        }
    } else {
        zone.input().seek(last_pos)?;
    }
    Ok(())
}
