//! Structured Logger
//!
//! Wraps `tracing` with a console layer on stderr, an optional daily-rolling
//! NDJSON file, and environment-based level control.

use std::path::Path;

use anyhow::Context;
use tracing::Subscriber;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::event_logger::IMAGE_EVENT_TARGET;

/// Initialize the global structured logger.
///
/// `RUST_LOG` wins over `level`. Stdout is left to the batch report, so the
/// console layer writes to stderr. With `log_dir`, JSON lines also go to
/// `<log_dir>/persocr.log.YYYY-MM-DD`.
pub fn init_logger(log_dir: Option<&Path>, level: &str) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let file_layer = match log_dir {
        Some(dir) => {
            let appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix("persocr.log")
                .build(dir)
                .with_context(|| format!("cannot open log directory {}", dir.display()))?;
            Some(fmt::layer().json().with_writer(appender).with_ansi(false))
        }
        None => None,
    };

    // A second call in the same process keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer(std::io::stderr))
        .with(file_layer)
        .try_init();

    Ok(())
}

/// Compact human-readable layer. Per-image JSON records are skipped here and
/// only reach the file layer.
fn console_layer<S, W>(writer: W) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    fmt::layer()
        .with_writer(writer)
        .with_target(false)
        .compact()
        .with_filter(filter_fn(|meta| meta.target() != IMAGE_EVENT_TARGET))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    use crate::event_logger::{EventLogger, ImageEvent};

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn console_skips_image_event_records() {
        let buf = SharedBuf::default();
        let writer = buf.clone();
        let subscriber = tracing_subscriber::registry().with(console_layer(move || writer.clone()));

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("Starting batch");
            EventLogger::log_event(
                "/scans",
                ImageEvent::Succeeded {
                    file: "a.png".into(),
                    output_path: "/scans/ocr_results/a.txt".into(),
                    chars: 3,
                    elapsed_ms: 10,
                },
            );
        });

        let out = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
        assert!(out.contains("Starting batch"));
        assert!(!out.contains("Image processed"));
        assert!(!out.contains("ocr_results"));
    }

    #[test]
    fn creates_log_directory_and_tolerates_reinit() {
        let dir = tempfile::TempDir::new().unwrap();
        let log_dir = dir.path().join("logs");

        init_logger(Some(&log_dir), "debug").unwrap();
        assert!(log_dir.is_dir());

        init_logger(None, "info").unwrap();
    }
}
