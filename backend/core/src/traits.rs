use async_trait::async_trait;

use crate::error::ExtractionRequestError;
use crate::types::PreparedPayload;

/// A service that turns a prepared image into cleaned text.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Extractor name (e.g., "openrouter", "mock").
    fn name(&self) -> &str;

    /// Send one image and return the cleaned extracted text.
    async fn extract(&self, payload: &PreparedPayload) -> Result<String, ExtractionRequestError>;
}
