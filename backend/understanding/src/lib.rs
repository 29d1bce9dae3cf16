pub mod cleanup;
pub mod mock;
pub mod prompt;
pub mod vision;

pub use cleanup::{clean_extracted_text, remove_zero_width_joiners, strip_preamble};
pub use mock::MockExtractor;
pub use prompt::PERSIAN_OCR_PROMPT;
pub use vision::{ExtractionRequest, ExtractorConfig, RemoteExtractor};
