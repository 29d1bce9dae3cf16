//! Result writer: saves extracted text under `<folder>/ocr_results/` and
//! prints a short report for each image.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::debug;

use persocr_core::{ExtractionResult, ImageFile, OcrError, RESULTS_DIR_NAME};

use crate::terminal_output::{note_success, rule};

/// Number of lines shown in the console preview.
pub const PREVIEW_LINES: usize = 10;

pub struct ResultWriter {
    output_dir: PathBuf,
}

impl ResultWriter {
    pub fn new(folder: &Path) -> Self {
        Self {
            output_dir: folder.join(RESULTS_DIR_NAME),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn output_path(&self, image: &ImageFile) -> PathBuf {
        self.output_dir.join(image.output_file_name())
    }

    /// Write `text` to `<stem>.txt`, creating the results folder if needed.
    /// An existing file with the same name is replaced.
    pub fn save(&self, image: &ImageFile, text: &str) -> Result<PathBuf, OcrError> {
        std::fs::create_dir_all(&self.output_dir).map_err(|source| OcrError::Io {
            path: self.output_dir.clone(),
            source,
        })?;
        let path = self.output_path(image);
        std::fs::write(&path, text).map_err(|source| OcrError::Io {
            path: path.clone(),
            source,
        })?;
        debug!(file = %image.file_name(), output = %path.display(), "Saved extracted text");
        Ok(path)
    }

    /// Save and report a successful result, or report a failed one.
    ///
    /// Returns the written path, or `None` when the result carried no text.
    pub fn write(&self, result: &ExtractionResult) -> Result<Option<PathBuf>, OcrError> {
        let Some(text) = result.text() else {
            println!("\nFailed to process {}", result.image.file_name());
            return Ok(None);
        };
        let path = self.save(&result.image, text)?;
        println!();
        note_success("OCR Successful!");
        print!("{}", render_success(text, result.elapsed, &path));
        Ok(Some(path))
    }
}

/// Console report body for a saved result: timing, size, location, and a
/// preview of the first [`PREVIEW_LINES`] lines.
pub fn render_success(text: &str, elapsed: Duration, output_path: &Path) -> String {
    let lines = split_lines(text);
    let shown = lines.len().min(PREVIEW_LINES);

    let mut out = String::new();
    out.push_str(&format!("Processing time: {:.1} seconds\n", elapsed.as_secs_f64()));
    out.push_str(&format!("Character count: {}\n", text.chars().count()));
    out.push_str(&format!("Saved to: {}\n", output_path.display()));
    out.push_str(&format!("\nText Preview (first {PREVIEW_LINES} lines):\n"));
    out.push_str(&rule('-'));
    out.push('\n');
    for (i, line) in lines.iter().take(shown).enumerate() {
        out.push_str(&format!("{}: {}\n", i + 1, line));
    }
    out.push_str(&rule('-'));
    out.push('\n');
    out.push_str(&format!("Showing {} of {} lines\n", shown, lines.len()));
    out
}

/// Break `text` into lines at every Unicode line boundary, a bare `\r` and
/// U+2028 included. `\r\n` counts as one boundary and a trailing boundary
/// does not start an empty line.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if !is_line_boundary(c) {
            continue;
        }
        lines.push(&text[start..i]);
        start = i + c.len_utf8();
        if c == '\r' {
            if let Some(&(j, '\n')) = chars.peek() {
                chars.next();
                start = j + 1;
            }
        }
    }
    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}

fn is_line_boundary(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{0b}' | '\u{0c}' | '\u{1c}' | '\u{1d}' | '\u{1e}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use persocr_core::ExtractionRequestError;
    use tempfile::TempDir;

    #[test]
    fn preview_is_capped_at_ten_lines() {
        let text: String = (1..=12).map(|i| format!("خط {i}\n")).collect();
        let report = render_success(text.trim_end(), Duration::from_millis(2345), Path::new("/out/a.txt"));

        assert!(report.contains("Processing time: 2.3 seconds"));
        assert!(report.contains("Saved to: /out/a.txt"));
        assert!(report.contains("10: خط 10"));
        assert!(!report.contains("11: خط 11"));
        assert!(report.contains("Showing 10 of 12 lines"));
    }

    #[test]
    fn character_count_is_in_chars_not_bytes() {
        let report = render_success("سلام", Duration::ZERO, Path::new("x.txt"));
        assert!(report.contains("Character count: 4"));
        assert!(report.contains("Showing 1 of 1 lines"));
    }

    #[test]
    fn bare_carriage_returns_split_the_preview() {
        let report = render_success("الف\rب\rج", Duration::ZERO, Path::new("x.txt"));
        assert!(report.contains("1: الف\n"));
        assert!(report.contains("3: ج\n"));
        assert!(report.contains("Showing 3 of 3 lines"));
    }

    #[test]
    fn split_lines_handles_every_boundary() {
        assert_eq!(split_lines("a\r\nb\nc\r"), vec!["a", "b", "c"]);
        assert_eq!(split_lines("a\u{2028}b\u{2029}c\u{0c}d"), vec!["a", "b", "c", "d"]);
        assert_eq!(split_lines("a\n\nb"), vec!["a", "", "b"]);
        assert_eq!(split_lines("\n"), vec![""]);
        assert!(split_lines("").is_empty());
    }

    #[test]
    fn successful_result_is_written_as_stem_txt() {
        let dir = TempDir::new().unwrap();
        let writer = ResultWriter::new(dir.path());
        let result = ExtractionResult::new(
            ImageFile::new(dir.path().join("scan.01.PNG")),
            Duration::from_secs(1),
            Ok("متن استخراج شده".to_string()),
        );

        let path = writer.write(&result).unwrap().unwrap();
        assert_eq!(path, dir.path().join("ocr_results").join("scan.01.txt"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "متن استخراج شده");
    }

    #[test]
    fn failed_result_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let writer = ResultWriter::new(dir.path());
        let result = ExtractionResult::new(
            ImageFile::new(dir.path().join("bad.jpg")),
            Duration::from_secs(1),
            Err(ExtractionRequestError::MissingContent.into()),
        );

        assert!(writer.write(&result).unwrap().is_none());
        assert!(!writer.output_dir().exists());
    }

    #[test]
    fn later_save_overwrites_earlier_output() {
        let dir = TempDir::new().unwrap();
        let writer = ResultWriter::new(dir.path());
        let image = ImageFile::new(dir.path().join("page.jpg"));

        writer.save(&image, "اول").unwrap();
        let path = writer.save(&image, "دوم").unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "دوم");
    }
}
