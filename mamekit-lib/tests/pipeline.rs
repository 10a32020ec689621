//! Catalog to partitions to merged XML and DAT, then a copy driven by the
//! merged list.

use std::io::Cursor;

use mamekit_lib::dat::{RecordShape, load_dat, merge_to_files, parse_catalog, read_record_set_file};
use mamekit_lib::*;

const CATALOG: &str = r#"<mame>
    <machine name="pacman" sourcefile="pacman/pacman.cpp">
        <description>Pac-Man</description>
        <year>1980</year>
        <manufacturer>Namco</manufacturer>
        <driver emulation="good"/>
    </machine>
    <machine name="galaga" sourcefile="galaga/galaga.cpp">
        <description>Galaga</description>
        <year>1981</year>
        <manufacturer>Namco</manufacturer>
        <driver emulation="good"/>
    </machine>
    <machine name="dkong" sourcefile="nintendo/dkong.cpp">
        <description>Donkey Kong</description>
        <year>1981</year>
        <manufacturer>Nintendo</manufacturer>
        <driver emulation="good"/>
    </machine>
</mame>"#;

#[tokio::test]
async fn catalog_to_dat_to_copy() {
    let dir = tempfile::tempdir().unwrap();
    let log = SessionLog::in_memory();
    let machines = parse_catalog(Cursor::new(CATALOG)).unwrap();

    let lists = dir.path().join("lists");
    let parts = partition(&machines, PartitionMode::Year);
    let summary = write_partitions(&parts, &lists, &SilentProgress, &log).unwrap();
    assert_eq!(summary.files.len(), 2);

    let xml_out = dir.path().join("merged.xml");
    let dat_out = dir.path().join("merged.dat");
    let merged = merge_to_files(&summary.files, &xml_out, &dat_out, &log).unwrap();
    assert_eq!(merged.records, 3);

    let (shape, from_xml) = read_record_set_file(&xml_out).unwrap();
    assert_eq!(shape, RecordShape::Machine);
    let names: Vec<_> = from_xml.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["pacman", "galaga", "dkong"]);
    assert_eq!(load_dat(&dat_out, &log), from_xml);

    let roms = dir.path().join("roms");
    std::fs::create_dir(&roms).unwrap();
    std::fs::write(roms.join("galaga.zip"), b"galaga").unwrap();
    let request = CopyRequest {
        record_sets: vec![xml_out],
        source_dir: roms,
        dest_dir: dir.path().join("cabinet"),
        kind: AssetKind::Rom,
    };
    let outcome = copy_assets(&request, &SilentProgress, &log, &NeverCancel)
        .await
        .unwrap();
    assert_eq!(outcome.summary().copied, 1);
    assert!(dir.path().join("cabinet").join("galaga.zip").is_file());
    assert!(!log.has_errors());
}
