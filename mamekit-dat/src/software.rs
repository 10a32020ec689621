//! MAME software list parser (`hash/*.xml`).
//!
//! ```text
//! <softwarelist name="nes" description="Nintendo Entertainment System cartridges">
//!     <software name="smb" supported="yes">
//!         <description>Super Mario Bros.</description>
//!         <year>1985</year>
//!         <publisher>Nintendo</publisher>
//!     </software>
//! </softwarelist>
//! ```

use std::io::BufRead;
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::reader::Reader;

use mamekit_core::SoftwareRecord;

use crate::error::DatError;
use crate::xml::{attribute, tag_name};

/// Parse a software list. Entries without a `name` attribute are dropped;
/// a missing description becomes "No Description". An empty list is valid.
pub fn parse_software_list<R: BufRead>(reader: R) -> Result<Vec<SoftwareRecord>, DatError> {
    let mut xml = Reader::from_reader(reader);
    xml.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut depth = 0usize;
    let mut root_seen = false;
    let mut softwares = Vec::new();
    // (name, description) of the <software> element currently open
    let mut current: Option<(Option<String>, Option<String>)> = None;
    let mut in_description = false;

    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Start(ref e) => {
                match depth {
                    0 => {
                        check_root(e.name().as_ref(), || tag_name(e))?;
                        root_seen = true;
                    }
                    1 if e.name().as_ref() == b"software" => {
                        current = Some((attribute(e, b"name")?, None));
                    }
                    2 if current.is_some() && e.name().as_ref() == b"description" => {
                        in_description = true;
                    }
                    _ => in_description = false,
                }
                depth += 1;
            }
            Event::Empty(ref e) => match depth {
                0 => {
                    check_root(e.name().as_ref(), || tag_name(e))?;
                    root_seen = true;
                }
                1 if e.name().as_ref() == b"software" => {
                    if let Some(name) = attribute(e, b"name")? {
                        softwares.push(SoftwareRecord::new(name, None));
                    }
                }
                _ => {}
            },
            Event::Text(ref e) => {
                if in_description {
                    if let Some((_, ref mut description)) = current {
                        description
                            .get_or_insert_with(String::new)
                            .push_str(&e.unescape()?);
                    }
                }
            }
            Event::CData(ref e) => {
                if in_description {
                    if let Some((_, ref mut description)) = current {
                        description
                            .get_or_insert_with(String::new)
                            .push_str(&String::from_utf8_lossy(e));
                    }
                }
            }
            Event::End(_) => {
                depth = depth.saturating_sub(1);
                match depth {
                    2 => in_description = false,
                    1 => {
                        if let Some((Some(name), description)) = current.take() {
                            softwares.push(SoftwareRecord::new(name, description));
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

    Ok(softwares)
}

/// Parse a software list from a file path.
pub fn parse_software_list_file(path: &Path) -> Result<Vec<SoftwareRecord>, DatError> {
    let file = std::fs::File::open(path)?;
    let reader = std::io::BufReader::new(file);
    parse_software_list(reader)
}

fn check_root(tag: &[u8], name: impl FnOnce() -> String) -> Result<(), DatError> {
    if tag == b"softwarelist" {
        Ok(())
    } else {
        Err(DatError::invalid_catalog(format!(
            "Unexpected root element <{}>, expected <softwarelist>",
            name()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_LIST: &str = r#"<?xml version="1.0"?>
<!DOCTYPE softwarelist SYSTEM "softwarelist.dtd">
<softwarelist name="nes" description="Nintendo Entertainment System cartridges">
    <software name="smb">
        <description>Super Mario Bros. (World)</description>
        <year>1985</year>
        <publisher>Nintendo</publisher>
        <part name="cart" interface="nes_cart">
            <feature name="slot" value="nrom"/>
        </part>
    </software>
    <software name="zelda" cloneof="zeldaj">
        <year>1987</year>
    </software>
    <software>
        <description>Nameless</description>
    </software>
</softwarelist>"#;

    #[test]
    fn test_parse_software_list() {
        let softwares = parse_software_list(SAMPLE_LIST.as_bytes()).unwrap();
        assert_eq!(softwares.len(), 2);
        assert_eq!(softwares[0].name, "smb");
        assert_eq!(softwares[0].description, "Super Mario Bros. (World)");
        assert_eq!(softwares[1].name, "zelda");
        assert_eq!(softwares[1].description, "No Description");
    }

    #[test]
    fn test_empty_software_list_is_valid() {
        let softwares = parse_software_list(r#"<softwarelist name="x"/>"#.as_bytes()).unwrap();
        assert!(softwares.is_empty());
    }

    #[test]
    fn test_rejects_machine_catalog() {
        let xml = r#"<mame><machine name="a"><description>A</description></machine></mame>"#;
        assert!(matches!(
            parse_software_list(xml.as_bytes()),
            Err(DatError::InvalidCatalog(_))
        ));
    }

    #[test]
    fn test_rejects_malformed() {
        let xml = r#"<softwarelist><software name="a"><description>A</software>"#;
        assert!(parse_software_list(xml.as_bytes()).is_err());
    }
}
