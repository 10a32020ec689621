use super::*;

#[test]
fn test_worker_count() {
    assert_eq!(worker_count(Some(3)), 3);
    assert!(worker_count(Some(0)) >= 1);
    assert!(worker_count(None) >= 1);
}

#[test]
fn test_list_xml_files() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("snes.xml"), "").unwrap();
    std::fs::write(dir.path().join("NES.XML"), "").unwrap();
    std::fs::write(dir.path().join("readme.txt"), "").unwrap();
    std::fs::create_dir(dir.path().join("nested.xml")).unwrap();

    let files = list_xml_files(dir.path()).unwrap();
    let names: Vec<_> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["NES.XML", "snes.xml"]);
}

#[test]
fn test_ensure_dir_creates_parents() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("a").join("b");
    ensure_dir(&nested).unwrap();
    assert!(nested.is_dir());
}
