//! Batch driver: scan the folder, then prepare, extract, and write each image
//! in turn. Per-image failures are reported and never stop the batch.

use std::path::Path;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use persocr_core::{
    ExtractionResult, ImageFile, ImagePrepareError, OcrError, PreparedPayload, TextExtractor,
};
use persocr_logging::{redact_sensitive_data, EventLogger, ImageEvent};
use persocr_media::{prepare_image, scan_folder};

use crate::terminal_output::{note_error, note_warn, rule};
use crate::writer::ResultWriter;

/// Counts for one run over a folder.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

/// Prepare one image and send it to the extractor, timing both steps.
pub async fn process_image(image: ImageFile, extractor: &dyn TextExtractor) -> ExtractionResult {
    let start = Instant::now();
    let outcome = match prepare_off_runtime(&image).await {
        Ok(payload) => extractor.extract(&payload).await.map_err(OcrError::from),
        Err(e) => Err(OcrError::from(e)),
    };
    ExtractionResult::new(image, start.elapsed(), outcome)
}

/// Decode, resize, and encode on the blocking pool.
async fn prepare_off_runtime(image: &ImageFile) -> Result<PreparedPayload, ImagePrepareError> {
    let path = image.path().to_path_buf();
    let task_path = path.clone();
    tokio::task::spawn_blocking(move || prepare_image(&task_path))
        .await
        .unwrap_or_else(|e| {
            Err(ImagePrepareError::Interrupted {
                path,
                message: e.to_string(),
            })
        })
}

/// Process every supported image in `folder`, one at a time, in name order.
pub async fn run_batch(
    folder: &Path,
    extractor: &dyn TextExtractor,
    writer: &ResultWriter,
) -> Result<BatchSummary, OcrError> {
    let images = scan_folder(folder)?;
    if images.is_empty() {
        note_warn("No supported images found in folder.");
        return Ok(BatchSummary::default());
    }

    let total = images.len();
    let folder_label = folder.display().to_string();
    let mut summary = BatchSummary {
        total,
        ..BatchSummary::default()
    };

    println!("Found {total} images to process...");
    info!(folder = %folder_label, images = total, extractor = extractor.name(), "Starting batch");

    for (i, image) in images.into_iter().enumerate() {
        let file = image.file_name();
        println!("\n{}", rule('='));
        println!("Processing {}/{}: {}", i + 1, total, file);
        println!("{}", rule('='));

        let result = process_image(image, extractor).await;
        let elapsed_ms = millis(result.elapsed);

        if let Some(err) = result.error() {
            report_failure(&file, err);
        }

        match writer.write(&result) {
            Ok(Some(path)) => {
                summary.succeeded += 1;
                let chars = result.text().map(|t| t.chars().count()).unwrap_or(0);
                EventLogger::log_event(
                    &folder_label,
                    ImageEvent::Succeeded {
                        file,
                        output_path: path.display().to_string(),
                        chars,
                        elapsed_ms,
                    },
                );
            }
            Ok(None) => {
                summary.failed += 1;
                let (stage, error) = match result.error() {
                    Some(err) if err.is_local() => ("prepare", err.to_string()),
                    Some(err) => ("extract", err.to_string()),
                    None => ("extract", "no text".to_string()),
                };
                EventLogger::log_event(
                    &folder_label,
                    ImageEvent::Failed {
                        file,
                        stage: stage.to_string(),
                        error,
                        elapsed_ms,
                    },
                );
            }
            Err(err) => {
                summary.failed += 1;
                note_error(&format!("Could not save result for {file}: {err}"));
                warn!(file = %file, error = %err, "Failed to write result");
                println!("\nFailed to process {file}");
                EventLogger::log_event(
                    &folder_label,
                    ImageEvent::Failed {
                        file,
                        stage: "write".to_string(),
                        error: err.to_string(),
                        elapsed_ms,
                    },
                );
            }
        }
    }

    info!(
        folder = %folder_label,
        succeeded = summary.succeeded,
        failed = summary.failed,
        "Batch finished"
    );
    Ok(summary)
}

fn report_failure(file: &str, err: &OcrError) {
    let message = redact_sensitive_data(&err.to_string());
    if err.is_local() {
        note_error(&format!("Error processing {file}: {message}"));
    } else {
        note_error(&format!("API error for {file}: {message}"));
    }
    warn!(file = %file, local = err.is_local(), error = %message, "Image failed");
}

fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}
