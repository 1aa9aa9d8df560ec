//! In-memory backend for testing.
//!
//! This module provides an in-memory implementation of every backend trait
//! (identity, profiles, outlets, customers, ledger and objects) that stores all
//! data in HashMaps wrapped in `Arc<RwLock<_>>`. This is useful for tests and
//! offline demos where no remote backend is available.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use rentdesk::{storage::inmemory::InMemoryBackend, Backend};
//!
//! let backend = Arc::new(InMemoryBackend::new());
//! let services = Backend::from_shared(backend.clone());
//! ```

mod backend;
mod demo;
mod identity;
mod objects;
mod repository;

pub use backend::InMemoryBackend;
pub use demo::{DEMO_ACCOUNTS, DEMO_PASSWORD};
