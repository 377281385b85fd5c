pub mod media_server;
pub mod mime_detect;
pub mod upload;

pub use media_server::media_router;
pub use mime_detect::{allowed_file, detect_mime_type, is_image, is_inline_safe, ALLOWED_EXTENSIONS};
pub use upload::{secure_filename, StoredUpload, UploadStore};
