//! Folder scanning: list the supported images directly inside a directory.

use std::path::Path;

use tracing::{debug, warn};

use persocr_core::{ImageFile, OcrError};

use crate::extension::is_supported_image;

/// Collect the regular files in `dir` (non-recursive) with a supported image
/// extension, sorted by file name.
pub fn scan_folder(dir: &Path) -> Result<Vec<ImageFile>, OcrError> {
    if !dir.is_dir() {
        return Err(OcrError::NotADirectory(dir.to_path_buf()));
    }

    let entries = std::fs::read_dir(dir).map_err(|source| OcrError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut images = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "Skipping unreadable directory entry");
                continue;
            }
        };
        let path = entry.path();
        // `is_file` follows symlinks.
        if path.is_file() && is_supported_image(&path) {
            images.push(ImageFile::new(path));
        }
    }

    images.sort_by(|a, b| a.path().file_name().cmp(&b.path().file_name()));
    debug!(dir = %dir.display(), count = images.len(), "Scanned folder");
    Ok(images)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        std::fs::write(dir.join(name), b"x").unwrap();
    }

    fn names(images: &[ImageFile]) -> Vec<String> {
        images.iter().map(ImageFile::file_name).collect()
    }

    #[test]
    fn keeps_supported_extensions_in_any_case() {
        let dir = TempDir::new().unwrap();
        for name in ["b.JPG", "a.jpeg", "c.Png", "d.webp", "e.BMP", "notes.txt", "anim.gif", "README"] {
            touch(dir.path(), name);
        }

        let images = scan_folder(dir.path()).unwrap();
        assert_eq!(names(&images), vec!["a.jpeg", "b.JPG", "c.Png", "d.webp", "e.BMP"]);
    }

    #[test]
    fn ignores_subdirectories_and_their_contents() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "top.png");
        let nested = dir.path().join("folder.jpg");
        std::fs::create_dir(&nested).unwrap();
        touch(&nested, "inner.png");

        let images = scan_folder(dir.path()).unwrap();
        assert_eq!(names(&images), vec!["top.png"]);
    }

    #[test]
    fn skips_files_named_only_by_an_extension() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), ".jpg");
        touch(dir.path(), ".hidden.png");
        touch(dir.path(), "page.jpg");

        let images = scan_folder(dir.path()).unwrap();
        assert_eq!(names(&images), vec![".hidden.png", "page.jpg"]);
    }

    #[test]
    fn empty_folder_yields_nothing() {
        let dir = TempDir::new().unwrap();
        assert!(scan_folder(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn rejects_a_file_path() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "single.png");

        let err = scan_folder(&dir.path().join("single.png")).unwrap_err();
        assert!(matches!(err, OcrError::NotADirectory(_)));
    }

    #[test]
    fn rejects_a_missing_path() {
        let dir = TempDir::new().unwrap();
        let err = scan_folder(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, OcrError::NotADirectory(_)));
    }
}
