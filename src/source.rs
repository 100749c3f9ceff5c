//! Source-directory scanning and image/label pairing.
//!
//! An aerial capture dump is one flat directory of images next to their
//! label files, so discovery is deliberately non-recursive. Subdirectories
//! (including a previous split output, if someone pointed both paths at the
//! same place) are never picked up.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::AeroprepError;

/// Image extensions recognized by default.
pub const DEFAULT_IMAGE_EXTENSIONS: [&str; 2] = ["jpg", "png"];

/// Extension used by label files.
pub const LABEL_EXTENSION: &str = "txt";

/// Owned copy of the default image extension list, for options structs.
pub fn default_image_extensions() -> Vec<String> {
    DEFAULT_IMAGE_EXTENSIONS
        .iter()
        .map(|ext| ext.to_string())
        .collect()
}

/// List files directly inside `dir` whose extension matches one of
/// `extensions`, case-insensitively. Sorted by path so discovery order is
/// stable across platforms.
pub fn list_files_with_extensions<S: AsRef<str>>(
    dir: &Path,
    extensions: &[S],
) -> Result<Vec<PathBuf>, AeroprepError> {
    let entries = fs::read_dir(dir).map_err(|source| AeroprepError::SourceDirRead {
        dir: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| AeroprepError::SourceDirRead {
            dir: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_file() && has_extension(&path, extensions) {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Expected label path for an image: same directory, same stem, `.txt`.
pub fn label_path_for_image(image_path: &Path) -> PathBuf {
    image_path.with_extension(LABEL_EXTENSION)
}

/// Best-effort text read: invalid byte sequences are replaced, not fatal.
pub fn read_to_string_lossy(path: &Path) -> io::Result<String> {
    let bytes = fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn has_extension<S: AsRef<str>>(path: &Path, allowed: &[S]) -> bool {
    let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
        return false;
    };

    allowed
        .iter()
        .any(|allowed_ext| ext.eq_ignore_ascii_case(allowed_ext.as_ref()))
}
