use super::*;
use mamekit_core::{LogLevel, MemoryLog, NeverCancel, Record};
use std::sync::Mutex;
use std::sync::atomic::AtomicUsize;

fn stem_record(path: &Path) -> Vec<SoftwareRecord> {
    let stem = path.file_stem().unwrap().to_string_lossy().into_owned();
    vec![SoftwareRecord::new(stem, Some("Listed".into()))]
}

fn hangs_on_slow(path: &Path) -> Result<Vec<SoftwareRecord>, DatError> {
    if path.ends_with("slow.xml") {
        std::thread::sleep(Duration::from_millis(1500));
    }
    Ok(stem_record(path))
}

static PARSED: AtomicUsize = AtomicUsize::new(0);

fn counting(path: &Path) -> Result<Vec<SoftwareRecord>, DatError> {
    PARSED.fetch_add(1, Ordering::SeqCst);
    Ok(stem_record(path))
}

#[tokio::test]
async fn test_timed_out_file_is_logged_and_counted() {
    let files = vec![PathBuf::from("fast.xml"), PathBuf::from("slow.xml")];
    let reports = Mutex::new(Vec::new());
    let progress = |p: u8| reports.lock().unwrap().push(p);
    let log = MemoryLog::new();

    let records = aggregate_files(
        files,
        2,
        Duration::from_millis(100),
        hangs_on_slow,
        &progress,
        &log,
        &NeverCancel,
    )
    .await
    .unwrap();

    assert_eq!(records.records(), &[Record::new("fast", "Listed")]);
    let errors = log.messages(LogLevel::Error);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("slow.xml"), "{errors:?}");
    assert!(
        log.messages(LogLevel::Info)
            .iter()
            .any(|m| m.contains("from 1 files (1 skipped)"))
    );
    assert_eq!(reports.into_inner().unwrap().last(), Some(&100));
}

#[tokio::test]
async fn test_cancellation_parses_only_a_few_files() {
    let files: Vec<PathBuf> = (0..20).map(|i| PathBuf::from(format!("list{i:02}.xml"))).collect();
    let cancel = AtomicBool::new(false);
    let progress = |_: u8| cancel.store(true, Ordering::SeqCst);

    let result = aggregate_files(
        files,
        1,
        SAFETY_TIMEOUT,
        counting,
        &progress,
        &MemoryLog::new(),
        &cancel,
    )
    .await;

    assert!(matches!(result, Err(Error::Cancelled)));
    // One finished file, at most the queued ones behind it
    assert!(PARSED.load(Ordering::SeqCst) < 20);
}
