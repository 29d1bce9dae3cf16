pub mod error;
pub mod traits;
pub mod types;

pub use error::{ExtractionRequestError, ImagePrepareError, OcrError};
pub use traits::TextExtractor;
pub use types::{
    ExtractionResult, ImageFile, PreparedPayload, JPEG_QUALITY, MAX_IMAGE_SIDE,
    RESULTS_DIR_NAME, SUPPORTED_EXTENSIONS,
};
