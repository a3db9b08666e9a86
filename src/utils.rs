use jiff::Timestamp;
use std::fs;
use std::path::Path;

use crate::error::{Result, ShopdeskError};
use crate::paths::shop_root;

/// Ensure the parent directory of a path exists, creating it if necessary.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|e| {
            ShopdeskError::Io(std::io::Error::new(
                e.kind(),
                format!(
                    "Failed to create directory at {}: {}",
                    format_relative_path(parent),
                    e
                ),
            ))
        })?;
    }
    Ok(())
}

/// Format a path for display by making it relative to the shopdesk root.
///
/// Used for user-facing output (error messages, CLI output) to avoid
/// exposing usernames and internal paths.
pub fn format_relative_path(path: &Path) -> String {
    path.strip_prefix(shop_root())
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| path.display().to_string())
}

/// Get current ISO date string (without milliseconds)
pub fn iso_date() -> String {
    let now = Timestamp::now();
    // Format as ISO 8601 without fractional seconds
    now.strftime("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Find all markdown files in a directory.
///
/// Returns filenames only. A missing directory is an empty result, not an
/// error; an unreadable one propagates.
pub fn find_markdown_files(dir_path: &Path) -> std::result::Result<Vec<String>, std::io::Error> {
    match fs::read_dir(dir_path) {
        Ok(entries) => Ok(entries
            .filter_map(|e| e.ok())
            .filter_map(|e| {
                let name = e.file_name().to_string_lossy().into_owned();
                if name.ends_with(".md") { Some(name) } else { None }
            })
            .collect()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(e),
    }
}

/// Extract a numeric record id from a file path's stem.
pub fn extract_id_from_path(file_path: &Path, entity_type: &str) -> Result<u32> {
    file_path
        .file_stem()
        .and_then(|s| s.to_string_lossy().parse::<u32>().ok())
        .ok_or_else(|| {
            ShopdeskError::InvalidFormat(format!(
                "Invalid {} file path: {}",
                entity_type,
                format_relative_path(file_path)
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_extract_id_from_path() {
        assert_eq!(
            extract_id_from_path(&PathBuf::from(".shopdesk/tickets/42.md"), "ticket").unwrap(),
            42
        );
        assert!(extract_id_from_path(&PathBuf::from(".shopdesk/tickets/abc.md"), "ticket").is_err());
    }

    #[test]
    fn test_iso_date_shape() {
        let date = iso_date();
        assert_eq!(date.len(), 20);
        assert!(date.ends_with('Z'));
        assert_eq!(&date[4..5], "-");
    }

    #[test]
    fn test_find_markdown_files_missing_dir() {
        let files = find_markdown_files(&PathBuf::from("/definitely/not/here")).unwrap();
        assert!(files.is_empty());
    }
}
