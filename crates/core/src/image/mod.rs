mod error;
mod functions;
mod traits;
mod types;

pub use error::{ImageKeyError, ObjectStoreError};
pub use functions::{build_image_key, validate_file_name, IMAGE_KEY_PREFIX};
pub use traits::{ObjectStore, Result};
pub use types::{ImageUpload, StoredObject, UploadedImage};
