use std::env;

/// Default lifetime of a signed image URL.
pub const DEFAULT_SIGNED_URL_TTL_SECONDS: u64 = 3600;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Object store bucket holding inventory images (default: "inventory-images")
    pub image_bucket: String,
    /// Signed URL lifetime in seconds (default: 3600)
    pub signed_url_ttl_seconds: u64,
    /// Where password reset links send the user (default: provider's site URL)
    pub password_reset_redirect: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `RENTDESK_IMAGE_BUCKET` - Image bucket name (default: "inventory-images")
    /// - `RENTDESK_SIGNED_URL_TTL_SECONDS` - Signed URL lifetime (default: 3600)
    /// - `RENTDESK_PASSWORD_RESET_REDIRECT` - Password reset redirect URL (optional)
    pub fn from_env() -> Self {
        Self {
            image_bucket: env::var("RENTDESK_IMAGE_BUCKET")
                .unwrap_or_else(|_| "inventory-images".to_string()),
            signed_url_ttl_seconds: env::var("RENTDESK_SIGNED_URL_TTL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|ttl| *ttl > 0)
                .unwrap_or(DEFAULT_SIGNED_URL_TTL_SECONDS),
            password_reset_redirect: env::var("RENTDESK_PASSWORD_RESET_REDIRECT")
                .ok()
                .filter(|v| !v.trim().is_empty()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            image_bucket: "inventory-images".to_string(),
            signed_url_ttl_seconds: DEFAULT_SIGNED_URL_TTL_SECONDS,
            password_reset_redirect: None,
        }
    }
}
