//! Rentdesk back-office services.
//!
//! Three facades over an injected [`Backend`]:
//!
//! - [`AuthService`]: login, session lookup, role-based outlet resolution and
//!   password management
//! - [`CustomerService`]: customer CRUD, filtered listing, ledger reads and
//!   atomic balance adjustment
//! - [`ImageService`]: inventory image upload, signed URLs and deletion
//!
//! Every service returns [`Result`], whose error is [`ServiceError`].

pub mod backend;
pub mod config;
pub mod error;
pub mod services;
pub mod storage;

pub use backend::Backend;
pub use config::Config;
pub use error::{Result, ServiceError};
pub use services::{AuthService, CustomerService, ImageService};
