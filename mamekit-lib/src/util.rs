use std::path::{Path, PathBuf};

/// Number of pool workers: the configured value, or the machine's available
/// parallelism. Never less than one.
pub fn worker_count(configured: Option<usize>) -> usize {
    configured
        .filter(|&n| n > 0)
        .or_else(|| std::thread::available_parallelism().ok().map(|n| n.get()))
        .unwrap_or(1)
        .max(1)
}

/// Regular files in `dir` with an `.xml` extension (any case), sorted by name.
pub fn list_xml_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let is_xml = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("xml"));
        if is_xml && entry.file_type()?.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Create `dir` and its parents if missing.
pub(crate) fn ensure_dir(dir: &Path) -> Result<(), crate::Error> {
    std::fs::create_dir_all(dir).map_err(|source| crate::Error::CreateDirectory {
        path: dir.to_path_buf(),
        source,
    })
}

#[cfg(test)]
#[path = "tests/util_tests.rs"]
mod tests;
