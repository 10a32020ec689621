//! Normalized record-set files.
//!
//! Two shapes carry the same `(name, description)` pairs:
//!
//! ```text
//! <Machines>                          <Softwares>
//!   <Machine>                           <Software>
//!     <MachineName>pacman</MachineName>   <SoftwareName>smb</SoftwareName>
//!     <Description>Pac-Man</Description>  <Description>SMB</Description>
//!   </Machine>                          </Software>
//! </Machines>                         </Softwares>
//! ```

use std::io::{BufRead, Write};
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::reader::Reader;

use mamekit_core::{Record, RecordSet};

use crate::error::DatError;
use crate::xml::{tag_name, write_tag};

const DESCRIPTION_TAG: &str = "Description";

/// Which of the two record-set layouts a file uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordShape {
    Machine,
    Software,
}

impl RecordShape {
    pub fn root_tag(self) -> &'static str {
        match self {
            RecordShape::Machine => "Machines",
            RecordShape::Software => "Softwares",
        }
    }

    pub fn item_tag(self) -> &'static str {
        match self {
            RecordShape::Machine => "Machine",
            RecordShape::Software => "Software",
        }
    }

    pub fn name_tag(self) -> &'static str {
        match self {
            RecordShape::Machine => "MachineName",
            RecordShape::Software => "SoftwareName",
        }
    }

    fn from_root(tag: &[u8]) -> Option<Self> {
        [RecordShape::Machine, RecordShape::Software]
            .into_iter()
            .find(|shape| shape.root_tag().as_bytes() == tag)
    }
}

/// Which child of an item is open.
#[derive(Clone, Copy)]
enum Slot {
    Name,
    Description,
}

#[derive(Default)]
struct PendingItem {
    name: Option<String>,
    description: Option<String>,
}

/// Read a record-set in either shape. Values are returned as written; callers
/// that need normalized values run them through [`Record::normalized`].
///
/// Fails with [`DatError::UnrecognizedShape`] when the root or item elements
/// match neither shape, or an item lacks its name element.
pub fn read_record_set<R: BufRead>(reader: R) -> Result<(RecordShape, RecordSet), DatError> {
    let mut xml = Reader::from_reader(reader);
    xml.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut depth = 0usize;
    let mut shape: Option<RecordShape> = None;
    let mut records = RecordSet::new();
    let mut item: Option<PendingItem> = None;
    let mut slot: Option<Slot> = None;

    loop {
        let event = xml.read_event_into(&mut buf)?;
        match event {
            Event::Start(ref e) | Event::Empty(ref e) => {
                let is_empty = matches!(event, Event::Empty(_));
                let tag = e.name();
                match (depth, shape) {
                    (0, _) => {
                        shape = Some(RecordShape::from_root(tag.as_ref()).ok_or_else(|| {
                            DatError::unrecognized_shape(format!(
                                "root element <{}> is neither <Machines> nor <Softwares>",
                                tag_name(e)
                            ))
                        })?);
                    }
                    (1, Some(shape)) => {
                        if tag.as_ref() != shape.item_tag().as_bytes() {
                            return Err(DatError::unrecognized_shape(format!(
                                "unexpected <{}> inside <{}>",
                                tag_name(e),
                                shape.root_tag()
                            )));
                        }
                        if is_empty {
                            return Err(missing_name(shape));
                        }
                        item = Some(PendingItem::default());
                    }
                    (2, Some(shape)) => {
                        slot = if tag.as_ref() == shape.name_tag().as_bytes() {
                            Some(Slot::Name)
                        } else if tag.as_ref() == DESCRIPTION_TAG.as_bytes() {
                            Some(Slot::Description)
                        } else {
                            None
                        };
                        if let (Some(pending), Some(s)) = (item.as_mut(), slot) {
                            // <Description/> and friends still count as present
                            target(pending, s).get_or_insert_with(String::new);
                        }
                        if is_empty {
                            slot = None;
                        }
                    }
                    _ => {}
                }
                if !is_empty {
                    depth += 1;
                }
            }
            Event::Text(ref e) => {
                if let (Some(pending), Some(s)) = (item.as_mut(), slot) {
                    target(pending, s)
                        .get_or_insert_with(String::new)
                        .push_str(&e.unescape()?);
                }
            }
            Event::CData(ref e) => {
                if let (Some(pending), Some(s)) = (item.as_mut(), slot) {
                    target(pending, s)
                        .get_or_insert_with(String::new)
                        .push_str(&String::from_utf8_lossy(e));
                }
            }
            Event::End(_) => {
                depth = depth.saturating_sub(1);
                match depth {
                    2 => slot = None,
                    1 => {
                        if let (Some(pending), Some(shape)) = (item.take(), shape) {
                            let name = pending.name.ok_or_else(|| missing_name(shape))?;
                            records.push(Record::new(name, pending.description.unwrap_or_default()));
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

    let Some(shape) = shape else {
        return Err(DatError::unrecognized_shape("document has no root element"));
    };
    if depth != 0 {
        return Err(DatError::unrecognized_shape("unexpected end of document"));
    }

    Ok((shape, records))
}

/// Read a record-set file in either shape.
pub fn read_record_set_file(path: &Path) -> Result<(RecordShape, RecordSet), DatError> {
    let file = std::fs::File::open(path)?;
    read_record_set(std::io::BufReader::new(file))
}

/// Serialize a record-set in the given shape.
pub fn write_record_set<W: Write>(
    mut writer: W,
    shape: RecordShape,
    records: &RecordSet,
) -> Result<(), DatError> {
    let xml = render(shape, records);
    writer.write_all(xml.as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Write a record-set file, replacing any existing file at `path`.
pub fn write_record_set_file(
    path: &Path,
    shape: RecordShape,
    records: &RecordSet,
) -> Result<(), DatError> {
    let file = std::fs::File::create(path)?;
    write_record_set(std::io::BufWriter::new(file), shape, records)
}

fn render(shape: RecordShape, records: &RecordSet) -> String {
    let mut xml = String::with_capacity(64 + records.len() * 96);
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push('<');
    xml.push_str(shape.root_tag());
    xml.push_str(">\n");

    for record in records {
        xml.push_str("  <");
        xml.push_str(shape.item_tag());
        xml.push_str(">\n");
        write_tag(&mut xml, "    ", shape.name_tag(), &record.name);
        write_tag(&mut xml, "    ", DESCRIPTION_TAG, &record.description);
        xml.push_str("  </");
        xml.push_str(shape.item_tag());
        xml.push_str(">\n");
    }

    xml.push_str("</");
    xml.push_str(shape.root_tag());
    xml.push_str(">\n");
    xml
}

fn target(item: &mut PendingItem, slot: Slot) -> &mut Option<String> {
    match slot {
        Slot::Name => &mut item.name,
        Slot::Description => &mut item.description,
    }
}

fn missing_name(shape: RecordShape) -> DatError {
    DatError::unrecognized_shape(format!(
        "<{}> without a <{}> element",
        shape.item_tag(),
        shape.name_tag()
    ))
}

#[cfg(test)]
#[path = "tests/record_set_tests.rs"]
mod tests;
