//! Image Event Logger
//!
//! One structured record per processed image, emitted through `tracing` so it
//! lands in the NDJSON log file next to everything else.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::redact::redact_sensitive_data;

/// `tracing` target of per-image records. The console layer leaves it to the
/// log file.
pub const IMAGE_EVENT_TARGET: &str = "image_events";

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ImageEvent {
    Succeeded {
        file: String,
        output_path: String,
        chars: usize,
        elapsed_ms: u64,
    },
    Failed {
        file: String,
        /// "prepare", "extract" or "write".
        stage: String,
        error: String,
        elapsed_ms: u64,
    },
}

#[derive(Debug, Serialize)]
pub struct ImageEventEntry {
    pub folder: String,
    pub timestamp: DateTime<Utc>,
    pub event: ImageEvent,
}

pub struct EventLogger;

impl EventLogger {
    /// Build the entry for `event`, scrubbing any credentials from error text.
    pub fn entry(folder: &str, mut event: ImageEvent) -> ImageEventEntry {
        if let ImageEvent::Failed { error, .. } = &mut event {
            *error = redact_sensitive_data(error);
        }
        ImageEventEntry {
            folder: folder.into(),
            timestamp: Utc::now(),
            event,
        }
    }

    /// Log a per-image outcome as a single JSON line.
    pub fn log_event(folder: &str, event: ImageEvent) {
        let entry = Self::entry(folder, event);
        match serde_json::to_string(&entry) {
            Ok(json) => info!(target: IMAGE_EVENT_TARGET, event = %json, "Image processed"),
            Err(e) => info!(target: IMAGE_EVENT_TARGET, error = %e, "Image processed (unserializable event)"),
        }
    }
}
