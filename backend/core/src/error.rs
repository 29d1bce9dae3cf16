use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Failure to turn a local file into a [`crate::PreparedPayload`].
#[derive(Debug, Error)]
pub enum ImagePrepareError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {}: {message}", .path.display())]
    Decode { path: PathBuf, message: String },

    #[error("failed to encode JPEG payload: {0}")]
    Encode(String),

    #[error("image preparation for {} did not finish: {message}", .path.display())]
    Interrupted { path: PathBuf, message: String },
}

/// Failure while talking to the remote text-extraction service.
#[derive(Debug, Error)]
pub enum ExtractionRequestError {
    #[error("HTTP client setup failed: {0}")]
    Client(String),

    #[error("request failed: {0}")]
    Transport(String),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("response has no choices[0].message.content")]
    MissingContent,

    #[error("no text left after cleanup")]
    EmptyContent,
}

/// Top-level error type for a persocr run.
#[derive(Debug, Error)]
pub enum OcrError {
    #[error("'{}' is not a valid directory", .0.display())]
    NotADirectory(PathBuf),

    #[error(transparent)]
    ImagePrepare(#[from] ImagePrepareError),

    #[error(transparent)]
    Extraction(#[from] ExtractionRequestError),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("configuration error: {0}")]
    Config(String),
}

impl OcrError {
    /// True when the failure came from a local file rather than the remote service.
    pub fn is_local(&self) -> bool {
        !matches!(self, OcrError::Extraction(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distinguishes_local_and_remote_failures() {
        let local: OcrError = ImagePrepareError::Encode("boom".into()).into();
        let remote: OcrError = ExtractionRequestError::Timeout(Duration::from_secs(60)).into();
        assert!(local.is_local());
        assert!(!remote.is_local());
    }

    #[test]
    fn status_error_message_includes_code_and_body() {
        let err = ExtractionRequestError::Status {
            status: 500,
            body: "upstream down".into(),
        };
        assert_eq!(err.to_string(), "service returned 500: upstream down");
    }

    #[test]
    fn interrupted_preparation_is_local_and_names_the_file() {
        let err: OcrError = ImagePrepareError::Interrupted {
            path: PathBuf::from("/scans/a.png"),
            message: "task panicked".into(),
        }
        .into();
        assert!(err.is_local());
        assert_eq!(err.to_string(), "image preparation for /scans/a.png did not finish: task panicked");
    }

    #[test]
    fn not_a_directory_names_the_path() {
        let err = OcrError::NotADirectory(PathBuf::from("/no/such/dir"));
        assert_eq!(err.to_string(), "'/no/such/dir' is not a valid directory");
    }
}
