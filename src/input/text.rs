use std::path::Path;

use crate::input::InputError;

/// Reads a UTF-8 text file with line endings unified, BOM stripped and
/// trailing whitespace trimmed.
pub fn read_text(path: &Path) -> Result<String, InputError> {
    let raw = std::fs::read_to_string(path).map_err(|source| InputError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(normalize_text(&raw))
}

pub fn normalize_text(raw: &str) -> String {
    let unified = raw.replace("\r\n", "\n").replace('\r', "\n");
    unified
        .trim_start_matches('\u{feff}')
        .trim_end()
        .to_string()
}
