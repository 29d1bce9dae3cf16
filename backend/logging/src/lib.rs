//! Structured logging for persocr.
//!
//! Console output, optional rolling NDJSON files, per-image outcome events,
//! and scrubbing of credentials from anything that gets logged.

pub mod event_logger;
pub mod logger;
pub mod redact;

pub use event_logger::{EventLogger, IMAGE_EVENT_TARGET, ImageEvent, ImageEventEntry};
pub use logger::init_logger;
pub use redact::redact_sensitive_data;
