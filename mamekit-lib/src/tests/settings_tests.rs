use super::*;

#[test]
fn test_missing_file_is_default() {
    let dir = tempfile::tempdir().unwrap();
    let settings = load_settings_from(&dir.path().join("settings.toml")).unwrap();
    assert_eq!(settings, Settings::default());
}

#[test]
fn test_set_and_unset_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mamekit").join("settings.toml");

    set_value(&path, "copy.source_dir", "/roms").unwrap();
    set_value(&path, "workers", "6").unwrap();
    let settings = load_settings_from(&path).unwrap();
    assert_eq!(settings.copy.source_dir, Some(PathBuf::from("/roms")));
    assert_eq!(settings.workers, Some(6));

    unset_value(&path, "copy.source_dir").unwrap();
    unset_value(&path, "log.file").unwrap();
    let settings = load_settings_from(&path).unwrap();
    assert_eq!(settings.copy.source_dir, None);
    assert_eq!(settings.workers, Some(6));
}

#[test]
fn test_set_rejects_unknown_key_and_bad_workers() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.toml");

    assert!(matches!(set_value(&path, "library.root", "x"), Err(Error::Settings(_))));
    assert!(matches!(set_value(&path, "workers", "0"), Err(Error::Settings(_))));
    assert!(matches!(set_value(&path, "workers", "many"), Err(Error::Settings(_))));
    assert!(!path.exists());
}

#[test]
fn test_set_preserves_unknown_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    std::fs::write(&path, "[gui]\ntheme = \"dark\"\n").unwrap();

    set_value(&path, "paths.output_dir", "/out").unwrap();
    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.contains("theme = \"dark\""));
    assert!(contents.contains("output_dir = \"/out\""));
}

#[test]
fn test_save_and_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    let mut settings = Settings::default();
    settings.log.file = Some(PathBuf::from("/tmp/mamekit.log"));
    settings.workers = Some(2);

    save_settings_to(&path, &settings).unwrap();
    assert_eq!(load_settings_from(&path).unwrap(), settings);
    assert!(load_settings_string(&path).unwrap().contains("workers = 2"));
}

#[test]
fn test_invalid_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    std::fs::write(&path, "workers = [").unwrap();
    assert!(matches!(load_settings_from(&path), Err(Error::Settings(_))));
}

#[test]
fn test_output_dir_resolution() {
    let mut settings = Settings::default();
    settings.paths.output_dir = Some(PathBuf::from("/saved"));
    assert_eq!(
        settings.output_dir(Some(PathBuf::from("/cli"))),
        PathBuf::from("/cli")
    );
    assert_eq!(settings.output_dir(None), PathBuf::from("/saved"));
}
