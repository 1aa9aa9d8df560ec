//! Backend implementations bundled with the services.
//!
//! The remote implementation lives in the `rentdesk_client` crate. This
//! module only carries the in-memory backend, selected with a feature flag.
//!
//! # Feature Flags
//!
//! - `inmemory` (default): HashMap-backed implementation of every backend trait
//!
//! Build without it:
//! ```bash
//! cargo build -p rentdesk --no-default-features
//! ```

#[cfg(feature = "inmemory")]
pub mod inmemory;
