use super::*;

const SAMPLE_CATALOG: &str = r#"<?xml version="1.0"?>
<!DOCTYPE mame [
<!ELEMENT mame (machine+)>
]>
<mame build="0.261 (mame0261)" debug="no" mameconfig="10">
    <machine name="puckman" sourcefile="pacman/pacman.cpp">
        <description>Puck Man (Japan set 1)</description>
        <year>1980</year>
        <manufacturer>Namco</manufacturer>
        <rom name="pm1_prg1.6e" size="2048" crc="f36e88ab"/>
        <driver status="good" emulation="good" savestate="supported"/>
    </machine>
    <machine name="pacman" sourcefile="pacman/pacman.cpp" cloneof="puckman" romof="puckman">
        <description>Pac-Man (Midway)</description>
        <year>1980</year>
        <manufacturer>Namco (Midway license)</manufacturer>
        <driver status="good" emulation="good" savestate="supported"/>
    </machine>
    <machine name="mystery" sourcefile="misc/mystery.cpp">
        <description>Mystery &amp; Intrigue</description>
        <year>198?</year>
        <manufacturer>&lt;unknown&gt;</manufacturer>
        <driver status="preliminary" emulation="preliminary"/>
    </machine>
</mame>"#;

#[test]
fn test_parse_catalog() {
    let machines = parse_catalog(SAMPLE_CATALOG.as_bytes()).unwrap();
    assert_eq!(machines.len(), 3);

    let puckman = &machines[0];
    assert_eq!(puckman.name, "puckman");
    assert_eq!(puckman.description, "Puck Man (Japan set 1)");
    assert_eq!(puckman.year.as_deref(), Some("1980"));
    assert_eq!(puckman.manufacturer.as_deref(), Some("Namco"));
    assert_eq!(puckman.source_file.as_deref(), Some("pacman/pacman.cpp"));
    assert_eq!(puckman.clone_of, None);
    assert_eq!(puckman.emulation_status, "good");

    let pacman = &machines[1];
    assert_eq!(pacman.clone_of.as_deref(), Some("puckman"));
    assert!(pacman.is_clone());

    let mystery = &machines[2];
    assert_eq!(mystery.description, "Mystery & Intrigue");
    assert_eq!(mystery.year.as_deref(), Some("198?"));
    assert_eq!(mystery.manufacturer.as_deref(), Some("<unknown>"));
    assert_eq!(mystery.emulation_status, "preliminary");
}

#[test]
fn test_parse_legacy_datafile_root() {
    let xml = r#"<datafile>
        <game name="galaga"><description>Galaga</description></game>
    </datafile>"#;
    let machines = parse_catalog(xml.as_bytes()).unwrap();
    assert_eq!(machines.len(), 1);
    assert_eq!(machines[0].name, "galaga");
    assert_eq!(machines[0].manufacturer, None);
    assert_eq!(machines[0].emulation_status, "");
}

#[test]
fn test_driver_status_fallback() {
    let xml = r#"<mame>
        <machine name="a"><description>A</description><driver status="imperfect"/></machine>
    </mame>"#;
    let machines = parse_catalog(xml.as_bytes()).unwrap();
    assert_eq!(machines[0].emulation_status, "imperfect");
}

#[test]
fn test_machines_without_name_are_kept_for_callers_to_drop() {
    let xml = r#"<mame>
        <machine name="a"><description>A</description></machine>
        <machine><description>Nameless</description></machine>
    </mame>"#;
    let machines = parse_catalog(xml.as_bytes()).unwrap();
    assert_eq!(machines.len(), 2);
    assert!(!machines[1].has_name());
}

#[test]
fn test_rejects_wrong_root() {
    let xml = r#"<softwarelist name="nes"><software name="smb"><description>SMB</description></software></softwarelist>"#;
    let err = parse_catalog(xml.as_bytes()).unwrap_err();
    assert!(matches!(err, DatError::InvalidCatalog(_)), "{err}");
}

#[test]
fn test_rejects_catalog_without_complete_machines() {
    let xml = r#"<mame><machine name="a"><year>1980</year></machine></mame>"#;
    assert!(matches!(
        parse_catalog(xml.as_bytes()),
        Err(DatError::InvalidCatalog(_))
    ));

    assert!(parse_catalog("<mame/>".as_bytes()).is_err());
}

#[test]
fn test_rejects_malformed_xml() {
    let xml = r#"<mame><machine name="a"><description>A</year></machine></mame>"#;
    assert!(parse_catalog(xml.as_bytes()).is_err());
}

#[test]
fn test_rejects_truncated_document() {
    let truncated = &SAMPLE_CATALOG[..SAMPLE_CATALOG.len() / 2];
    assert!(parse_catalog(truncated.as_bytes()).is_err());
}

#[test]
fn test_rejects_non_xml() {
    assert!(parse_catalog("this is not a catalog".as_bytes()).is_err());
    assert!(parse_catalog("".as_bytes()).is_err());
}

#[test]
fn test_parse_catalog_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mame.xml");
    std::fs::write(&path, SAMPLE_CATALOG).unwrap();
    assert_eq!(parse_catalog_file(&path).unwrap().len(), 3);

    let missing = dir.path().join("missing.xml");
    assert!(matches!(parse_catalog_file(&missing), Err(DatError::Io(_))));
}
