use crate::error::LoadError;
use std::fs;
use std::path::Path;

/// Read a practice file into normalized lines: trailing whitespace stripped
/// per line, and a guaranteed minimum of one (possibly empty) line so the
/// text buffer invariant holds even for empty files.
pub fn load_lines(path: &Path) -> Result<Vec<String>, LoadError> {
    let metadata =
        fs::metadata(path).map_err(|_| LoadError::InvalidPath(path.to_path_buf()))?;
    if !metadata.is_file() {
        return Err(LoadError::InvalidPath(path.to_path_buf()));
    }

    let bytes = fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let content =
        String::from_utf8(bytes).map_err(|_| LoadError::NotText(path.to_path_buf()))?;

    let mut lines: Vec<String> = content
        .lines()
        .map(|line| line.trim_end().to_owned())
        .collect();
    if lines.is_empty() {
        lines.push(String::new());
    }

    Ok(lines)
}
