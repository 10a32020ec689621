//! MAME `-listxml` catalog parser.
//!
//! Reads the machine list emitted by `mame -listxml`:
//!
//! ```text
//! <mame build="0.261">
//!     <machine name="pacman" sourcefile="pacman/pacman.cpp" cloneof="puckman">
//!         <description>Pac-Man (Midway)</description>
//!         <year>1980</year>
//!         <manufacturer>Namco (Midway license)</manufacturer>
//!         <driver status="good" emulation="good" savestate="supported"/>
//!     </machine>
//! </mame>
//! ```
//!
//! Older builds used `<datafile>` / `<game>`; both spellings are accepted.

use std::io::BufRead;
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use mamekit_core::MachineRecord;

use crate::error::DatError;
use crate::xml::{attribute, tag_name};

const ROOT_TAGS: &[&[u8]] = &[b"mame", b"datafile"];
const ITEM_TAGS: &[&[u8]] = &[b"machine", b"game"];

/// Machine child elements whose text we keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Description,
    Year,
    Manufacturer,
}

impl Field {
    fn from_tag(tag: &[u8]) -> Option<Self> {
        match tag {
            b"description" => Some(Self::Description),
            b"year" => Some(Self::Year),
            b"manufacturer" => Some(Self::Manufacturer),
            _ => None,
        }
    }
}

/// A machine being assembled while its element is open.
struct PendingMachine {
    record: MachineRecord,
    has_description: bool,
}

impl PendingMachine {
    fn from_start(e: &BytesStart<'_>) -> Result<Self, DatError> {
        let record = MachineRecord {
            name: attribute(e, b"name")?.unwrap_or_default(),
            source_file: attribute(e, b"sourcefile")?,
            clone_of: attribute(e, b"cloneof")?,
            ..Default::default()
        };
        Ok(Self {
            record,
            has_description: false,
        })
    }

    fn open_child(&mut self, e: &BytesStart<'_>) -> Result<Option<Field>, DatError> {
        let tag = e.name();
        if tag.as_ref() == b"driver" {
            // Prefer the dedicated emulation attribute; fall back to overall status.
            let status = match attribute(e, b"emulation")? {
                Some(s) => Some(s),
                None => attribute(e, b"status")?,
            };
            if let Some(status) = status {
                self.record.emulation_status = status;
            }
        }
        let field = Field::from_tag(tag.as_ref());
        if field == Some(Field::Description) {
            self.has_description = true;
        }
        Ok(field)
    }

    fn push_text(&mut self, field: Field, text: &str) {
        let target = match field {
            Field::Description => &mut self.record.description,
            Field::Year => self.record.year.get_or_insert_with(String::new),
            Field::Manufacturer => self.record.manufacturer.get_or_insert_with(String::new),
        };
        target.push_str(text);
    }

    /// Name attribute and description element both present.
    fn is_complete(&self) -> bool {
        !self.record.name.is_empty() && self.has_description
    }
}

/// Parse a MAME catalog into machine records, in document order.
///
/// Fails when the document is not well-formed XML, when the root element is
/// not a MAME catalog root, or when no machine carries both a `name`
/// attribute and a `<description>`.
pub fn parse_catalog<R: BufRead>(reader: R) -> Result<Vec<MachineRecord>, DatError> {
    let mut xml = Reader::from_reader(reader);
    xml.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut depth = 0usize;
    let mut root_seen = false;
    let mut machines = Vec::new();
    let mut complete = 0usize;
    let mut current: Option<PendingMachine> = None;
    let mut field: Option<Field> = None;

    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Start(ref e) => {
                match depth {
                    0 => {
                        check_root(e)?;
                        root_seen = true;
                    }
                    1 if ITEM_TAGS.contains(&e.name().as_ref()) => {
                        current = Some(PendingMachine::from_start(e)?);
                    }
                    2 => {
                        if let Some(ref mut machine) = current {
                            field = machine.open_child(e)?;
                        }
                    }
                    _ => field = None,
                }
                depth += 1;
            }
            Event::Empty(ref e) => match depth {
                0 => {
                    check_root(e)?;
                    root_seen = true;
                }
                1 if ITEM_TAGS.contains(&e.name().as_ref()) => {
                    // Self-closing machine: a name at most, never complete
                    let machine = PendingMachine::from_start(e)?;
                    machines.push(machine.record);
                }
                2 => {
                    if let Some(ref mut machine) = current {
                        machine.open_child(e)?;
                    }
                }
                _ => {}
            },
            Event::Text(ref e) => {
                if let (Some(machine), Some(f)) = (current.as_mut(), field) {
                    machine.push_text(f, &e.unescape()?);
                }
            }
            Event::CData(ref e) => {
                if let (Some(machine), Some(f)) = (current.as_mut(), field) {
                    machine.push_text(f, &String::from_utf8_lossy(e));
                }
            }
            Event::End(_) => {
                depth = depth.saturating_sub(1);
                match depth {
                    2 => field = None,
                    1 => {
                        if let Some(machine) = current.take() {
                            if machine.is_complete() {
                                complete += 1;
                            }
                            machines.push(machine.record);
                        }
                    }
                    _ => {}
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if !root_seen {
        return Err(DatError::invalid_catalog("No root element found"));
    }
    if depth != 0 {
        return Err(DatError::invalid_catalog("Unexpected end of document"));
    }
    if complete == 0 {
        return Err(DatError::invalid_catalog(
            "No <machine> entries with a name and description",
        ));
    }

    Ok(machines)
}

/// Parse a MAME catalog from a file path.
pub fn parse_catalog_file(path: &Path) -> Result<Vec<MachineRecord>, DatError> {
    let file = std::fs::File::open(path)?;
    let reader = std::io::BufReader::new(file);
    parse_catalog(reader)
}

fn check_root(e: &BytesStart<'_>) -> Result<(), DatError> {
    if ROOT_TAGS.contains(&e.name().as_ref()) {
        Ok(())
    } else {
        Err(DatError::invalid_catalog(format!(
            "Unexpected root element <{}>",
            tag_name(e)
        )))
    }
}

#[cfg(test)]
#[path = "tests/catalog_tests.rs"]
mod tests;
