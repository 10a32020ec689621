//! Text sanitizers for file names and XML values.
//!
//! Catalog text is used in two places that have different constraints: as a
//! file name on disk (partition outputs, asset names) and as element text in
//! record-set files. Both sanitizers are idempotent.

/// Characters that may not appear in a file name on any supported platform.
pub const INVALID_FILE_NAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Fallback returned by [`sanitize_file_name`] when nothing usable remains.
pub const DEFAULT_FILE_NAME: &str = "Untitled";

/// DOS device names that cannot be used as a file name on Windows.
const RESERVED_NAMES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Sanitize `text` for use as a file name, falling back to `"Untitled"`.
pub fn sanitize_file_name(text: &str) -> String {
    sanitize_for_file_name(text, DEFAULT_FILE_NAME)
}

/// Sanitize `text` for use as a file name.
///
/// Decodes `&amp;`, collapses whitespace runs to a single space and trims,
/// replaces invalid and control characters with `_`, and appends `_` to
/// reserved device names (case-insensitive). Returns `default` when the
/// result is empty.
pub fn sanitize_for_file_name(text: &str, default: &str) -> String {
    let collapsed = collapse_whitespace(&decode_ampersand(text));
    let mut result: String = collapsed
        .chars()
        .map(|c| if is_invalid_file_name_char(c) { '_' } else { c })
        .collect();

    if result.is_empty() {
        return default.to_string();
    }
    if is_reserved_name(&result) {
        result.push('_');
    }
    result
}

/// Normalize element text for a record-set file: decode `&amp;` and collapse
/// whitespace. Empty input is returned as-is.
pub fn sanitize_for_xml_value(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    collapse_whitespace(&decode_ampersand(text))
}

/// Remove (rather than replace) the characters in [`INVALID_FILE_NAME_CHARS`].
pub fn strip_invalid_chars(text: &str) -> String {
    text.chars()
        .filter(|c| !INVALID_FILE_NAME_CHARS.contains(c))
        .collect()
}

/// Last path component of a driver source file without its extension.
///
/// `"namco/pacman.cpp"` becomes `"pacman"`; both separators are accepted
/// because catalogs built on Windows use backslashes.
pub fn strip_source_suffix(source_file: &str) -> &str {
    let file_name = source_file
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(source_file);
    match file_name.rfind('.') {
        Some(idx) if idx > 0 => &file_name[..idx],
        _ => file_name,
    }
}

/// True when `name` matches a DOS device name, ignoring case.
pub fn is_reserved_name(name: &str) -> bool {
    RESERVED_NAMES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(name))
}

fn is_invalid_file_name_char(c: char) -> bool {
    INVALID_FILE_NAME_CHARS.contains(&c) || c.is_control()
}

/// Decode `&amp;` until none remain, so double-escaped input settles in one call.
fn decode_ampersand(text: &str) -> String {
    let mut decoded = text.to_string();
    while decoded.contains("&amp;") {
        decoded = decoded.replace("&amp;", "&");
    }
    decoded
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
#[path = "tests/sanitize_tests.rs"]
mod tests;
