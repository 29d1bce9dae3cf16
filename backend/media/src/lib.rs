pub mod extension;
pub mod image;
pub mod scan;

pub use self::image::{fit_within, prepare_image};
pub use extension::is_supported_image;
pub use scan::scan_folder;
