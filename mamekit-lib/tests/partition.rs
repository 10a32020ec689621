use std::io::Cursor;

use mamekit_lib::dat::{parse_catalog, read_record_set_file};
use mamekit_lib::*;

const ACME_CATALOG: &str = r#"<?xml version="1.0"?>
<mame build="0.261">
    <machine name="a" sourcefile="acme/a.cpp">
        <description>A</description>
        <year>1982</year>
        <manufacturer>Acme</manufacturer>
        <driver status="good" emulation="good"/>
    </machine>
    <machine name="b" sourcefile="acme/b.cpp">
        <description>B</description>
        <year>1983</year>
        <manufacturer>Acme</manufacturer>
        <driver status="preliminary" emulation="preliminary"/>
    </machine>
    <machine name="c" sourcefile="bootleg/c.cpp">
        <description>C</description>
        <year>1983</year>
        <manufacturer>Bootleg Inc</manufacturer>
        <driver status="good" emulation="good"/>
    </machine>
</mame>"#;

#[test]
fn manufacturer_partition_keeps_only_good_acme() {
    let machines = parse_catalog(Cursor::new(ACME_CATALOG)).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let log = SessionLog::in_memory();

    let parts = partition(&machines, PartitionMode::Manufacturer);
    let summary = write_partitions(&parts, dir.path(), &SilentProgress, &log).unwrap();

    assert_eq!(summary.written, 1);
    assert_eq!(summary.skipped, 1);
    let files: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(files, vec!["Acme.xml"]);

    let (_, acme) = read_record_set_file(&dir.path().join("Acme.xml")).unwrap();
    assert_eq!(acme.into_records(), vec![Record::new("a", "A")]);
    assert!(!log.has_errors());
}

#[test]
fn year_and_source_partitions_ignore_member_filter() {
    let machines = parse_catalog(Cursor::new(ACME_CATALOG)).unwrap();

    let years = partition(&machines, PartitionMode::Year);
    let keys: Vec<_> = years.iter().map(|p| p.key.as_str()).collect();
    assert_eq!(keys, vec!["1982", "1983"]);
    assert_eq!(years[1].records.len(), 2);

    let sources = partition(&machines, PartitionMode::SourceFile);
    let stems: Vec<_> = sources.iter().map(|p| p.file_stem.as_str()).collect();
    assert_eq!(stems, vec!["a", "b", "c"]);
}
