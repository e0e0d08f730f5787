//! File boundary: images, meshes and indexed file names.
//!
//! Every write goes through [`write_atomic`], so an interrupted or failed
//! write never leaves a truncated output file behind.

pub mod image_io;
pub mod obj;
pub mod pattern;

pub use image_io::{read_gray, read_rgba, write_color_field, write_rgb, write_rgba};
pub use pattern::IndexPattern;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::IoError;

/// Writes `path` by filling a temporary file in the same directory and
/// renaming it into place once `fill` succeeds.
///
/// # Errors
///
/// Returns an error if the temporary file cannot be created, if `fill`
/// fails, or if the rename fails. On error `path` is left untouched.
pub fn write_atomic<F>(path: &Path, fill: F) -> Result<(), IoError>
where
    F: FnOnce(&mut BufWriter<&mut File>) -> Result<(), IoError>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| IoError::file(dir, e))?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        fill(&mut writer)?;
        writer.flush().map_err(|e| IoError::file(path, e))?;
    }
    tmp.persist(path).map_err(|e| IoError::file(path, e.error))?;
    Ok(())
}

/// Creates `dir` and its parents if missing.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_dir(dir: &Path) -> Result<(), IoError> {
    std::fs::create_dir_all(dir).map_err(|e| IoError::file(dir, e))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn atomic_write_replaces_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        write_atomic(&path, |w| w.write_all(b"first").map_err(|e| IoError::file("out.txt", e)))
            .unwrap();
        write_atomic(&path, |w| w.write_all(b"second").map_err(|e| IoError::file("out.txt", e)))
            .unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn failed_write_leaves_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        std::fs::write(&path, "keep").unwrap();
        let result = write_atomic(&path, |w| {
            w.write_all(b"partial").map_err(|e| IoError::file("out.txt", e))?;
            Err(IoError::InvalidPattern {
                pattern: String::new(),
                reason: "forced failure",
            })
        });
        assert!(result.is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "keep");
        // Only the original file remains; the temporary file was cleaned up.
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn ensure_dir_creates_nested_directories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());
        ensure_dir(&nested).unwrap();
    }
}
