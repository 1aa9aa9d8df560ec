//! Image CLI commands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use uuid::Uuid;

/// Inventory image commands.
#[derive(Debug, Parser)]
pub struct ImagesCommand {
    #[command(subcommand)]
    pub action: ImagesAction,
}

/// Available image actions.
#[derive(Debug, Subcommand)]
pub enum ImagesAction {
    /// Upload an image for an outlet.
    Upload {
        /// Image file to upload.
        file: PathBuf,
        /// Outlet the image belongs to.
        #[arg(long)]
        outlet_id: Uuid,
        /// Content type (guessed from the file extension when omitted).
        #[arg(long)]
        content_type: Option<String>,
    },
    /// Print a signed URL for an image key.
    Sign {
        /// Image key.
        key: String,
        /// URL lifetime in seconds (defaults to RENTDESK_SIGNED_URL_TTL_SECONDS).
        #[arg(long)]
        expires_in: Option<u64>,
    },
    /// Delete an image.
    Delete {
        /// Image key.
        key: String,
    },
}

/// Content type for common image extensions.
pub fn guess_content_type(file: &std::path::Path) -> &'static str {
    let extension = file
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}
