//! Temporary file management utilities.
//!
//! Rewritten audio is staged in a temporary file next to its destination and
//! only moved into place once complete. The tempfile crate removes the staging
//! file on drop, so a failed remap leaves nothing behind.

use crate::error::CoreResult;
use std::path::Path;
use tempfile::{Builder as TempFileBuilder, NamedTempFile};

/// Creates a temporary file with prefix and extension. Auto-deleted when dropped.
pub fn create_temp_file(dir: &Path, prefix: &str, extension: &str) -> CoreResult<NamedTempFile> {
    std::fs::create_dir_all(dir)?;
    let temp_file = TempFileBuilder::new()
        .prefix(&format!("{prefix}_"))
        .suffix(&format!(".{extension}"))
        .tempfile_in(dir)?;

    Ok(temp_file)
}

/// Directory a staging file for `destination` should be created in.
pub fn staging_dir(destination: &Path) -> &Path {
    match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_file_is_removed_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let temp = create_temp_file(dir.path(), "remap", "wav").unwrap();
        let path = temp.path().to_path_buf();
        assert!(path.exists());
        assert!(path.file_name().unwrap().to_string_lossy().starts_with("remap_"));
        assert_eq!(path.extension().unwrap(), "wav");

        drop(temp);
        assert!(!path.exists());
    }

    #[test]
    fn test_staging_dir() {
        assert_eq!(staging_dir(Path::new("out.wav")), Path::new("."));
        assert_eq!(staging_dir(Path::new("/tmp/out.wav")), Path::new("/tmp"));
    }
}
