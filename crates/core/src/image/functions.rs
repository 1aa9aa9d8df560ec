use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::ImageKeyError;

/// Top-level folder every inventory image lives under.
pub const IMAGE_KEY_PREFIX: &str = "inventory";

/// Rejects file names that would break the key layout.
pub fn validate_file_name(file_name: &str) -> Result<(), ImageKeyError> {
    if file_name.trim().is_empty() {
        return Err(ImageKeyError::EmptyFileName);
    }
    if file_name.contains('/') {
        return Err(ImageKeyError::InvalidFileName(file_name.to_string()));
    }
    Ok(())
}

/// Builds `inventory/<outlet_id>/<millis>_<file_name>`.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use rentdesk_core::image::build_image_key;
/// use uuid::Uuid;
///
/// let outlet = Uuid::nil();
/// let now = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
/// let key = build_image_key(outlet, "tent.jpg", now).unwrap();
/// assert_eq!(
///     key,
///     "inventory/00000000-0000-0000-0000-000000000000/1700000000123_tent.jpg"
/// );
/// ```
pub fn build_image_key(
    outlet_id: Uuid,
    file_name: &str,
    now: DateTime<Utc>,
) -> Result<String, ImageKeyError> {
    validate_file_name(file_name)?;
    Ok(format!(
        "{IMAGE_KEY_PREFIX}/{outlet_id}/{}_{file_name}",
        now.timestamp_millis()
    ))
}
