use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use persocr_core::{ExtractionRequestError, PreparedPayload, TextExtractor};

use crate::cleanup::clean_extracted_text;

/// An extractor that returns a canned reply and never touches the network.
pub struct MockExtractor {
    name: String,
    fixed_response: Option<String>,
    fail_on: HashSet<usize>,
    calls: AtomicUsize,
}

impl MockExtractor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fixed_response: None,
            fail_on: HashSet::new(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_response(mut self, response: impl Into<String>) -> Self {
        self.fixed_response = Some(response.into());
        self
    }

    /// Fail the call with this zero-based index with a simulated 500.
    pub fn failing_on_call(mut self, index: usize) -> Self {
        self.fail_on.insert(index);
        self
    }

    /// Number of `extract` calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextExtractor for MockExtractor {
    fn name(&self) -> &str {
        &self.name
    }

    async fn extract(&self, _payload: &PreparedPayload) -> Result<String, ExtractionRequestError> {
        let index = self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_on.contains(&index) {
            return Err(ExtractionRequestError::Status {
                status: 500,
                body: "mock failure".to_string(),
            });
        }
        let raw = self.fixed_response.as_deref().unwrap_or("متن نمونه");
        Ok(clean_extracted_text(raw))
    }
}
