//! Extension allow-list for input images.

use std::path::Path;

use persocr_core::SUPPORTED_EXTENSIONS;

fn lowercase_extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

/// Whether the path carries one of the supported image extensions (any case).
pub fn is_supported_image(path: &Path) -> bool {
    let ext = lowercase_extension(path);
    SUPPORTED_EXTENSIONS.contains(&ext.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn supported_extensions_any_case() {
        for name in ["a.jpg", "b.JPG", "c.jpeg", "d.Png", "e.WEBP", "f.bmp"] {
            assert!(is_supported_image(&PathBuf::from(name)), "{name} should be supported");
        }
    }

    #[test]
    fn unsupported_extensions_rejected() {
        for name in ["a.gif", "b.tiff", "c.txt", "noext", "archive.jpg.zip"] {
            assert!(!is_supported_image(&PathBuf::from(name)), "{name} should be rejected");
        }
    }

    #[test]
    fn bare_extension_name_has_no_extension() {
        assert!(!is_supported_image(&PathBuf::from(".jpg")));
        assert!(!is_supported_image(&PathBuf::from("dir/.PNG")));
    }
}
