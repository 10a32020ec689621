use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use mamekit_lib::*;

fn software_list(dir: &Path, file: &str, entries: &[(&str, Option<&str>)]) {
    let mut xml = String::from("<?xml version=\"1.0\"?>\n<softwarelist name=\"test\">\n");
    for (name, description) in entries {
        xml.push_str(&format!("  <software name=\"{name}\">\n"));
        if let Some(d) = description {
            xml.push_str(&format!("    <description>{d}</description>\n"));
        }
        xml.push_str("  </software>\n");
    }
    xml.push_str("</softwarelist>\n");
    std::fs::write(dir.join(file), xml).unwrap();
}

#[tokio::test]
async fn aggregates_all_lists_and_skips_bad_files() {
    let dir = tempfile::tempdir().unwrap();
    software_list(
        dir.path(),
        "nes.xml",
        &[("smb", Some("Super Mario Bros.")), ("zelda", None)],
    );
    software_list(
        dir.path(),
        "snes.xml",
        &[("smw", Some("Super  Mario World &amp;amp; Friends"))],
    );
    std::fs::write(dir.path().join("broken.xml"), "<softwarelist><software").unwrap();
    std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

    let reports = Mutex::new(Vec::new());
    let progress = |p: u8| reports.lock().unwrap().push(p);
    let log = SessionLog::in_memory();
    let records = aggregate_with_workers(dir.path(), 2, &progress, &log, &NeverCancel)
        .await
        .unwrap();

    assert_eq!(records.len(), 3);
    let mut names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
    names.sort();
    assert_eq!(names, vec!["smb", "smw", "zelda"]);

    // Order inside one list is kept whatever order the lists finished in
    let smb = records.iter().position(|r| r.name == "smb").unwrap();
    assert_eq!(records.records()[smb + 1], Record::new("zelda", "No Description"));

    let smw = records.iter().find(|r| r.name == "smw").unwrap();
    assert_eq!(smw.description, "Super Mario World & Friends");

    assert_eq!(log.error_count(), 1);
    let reports = reports.into_inner().unwrap();
    assert_eq!(reports, vec![33, 66, 100]);
}

#[tokio::test]
async fn empty_software_list_contributes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    software_list(dir.path(), "empty.xml", &[]);
    let records = aggregate(dir.path(), &SilentProgress, &SessionLog::in_memory(), &NeverCancel)
        .await
        .unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn missing_directory_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = aggregate(
        &dir.path().join("hash"),
        &SilentProgress,
        &SessionLog::in_memory(),
        &NeverCancel,
    )
    .await;
    assert!(matches!(result, Err(Error::DirectoryNotFound(_))));
}

#[tokio::test]
async fn directory_without_lists_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("readme.md"), "").unwrap();
    let result = aggregate(dir.path(), &SilentProgress, &SessionLog::in_memory(), &NeverCancel).await;
    assert!(matches!(result, Err(Error::NoInputFiles(_))));
}

#[tokio::test]
async fn cancellation_stops_aggregation() {
    let dir = tempfile::tempdir().unwrap();
    for i in 0..20 {
        software_list(dir.path(), &format!("list{i:02}.xml"), &[("a", Some("A"))]);
    }

    let cancel = AtomicBool::new(false);
    let reports = Mutex::new(Vec::new());
    let progress = |p: u8| {
        reports.lock().unwrap().push(p);
        cancel.store(true, Ordering::SeqCst);
    };
    let log = SessionLog::in_memory();
    let result = aggregate_with_workers(dir.path(), 1, &progress, &log, &cancel).await;
    assert!(matches!(result, Err(Error::Cancelled)));

    // Stopped right after the first of 20 files
    assert_eq!(reports.into_inner().unwrap(), vec![5]);
    assert!(
        log.entries()
            .iter()
            .any(|e| e.message.contains("after 1 of 20 files"))
    );
}

#[tokio::test]
async fn cancellation_before_start() {
    let dir = tempfile::tempdir().unwrap();
    software_list(dir.path(), "nes.xml", &[("smb", None)]);
    let cancel = AtomicBool::new(true);
    let result = aggregate(dir.path(), &SilentProgress, &SessionLog::in_memory(), &cancel).await;
    assert!(matches!(result, Err(Error::Cancelled)));
}
