//! Service facades.
//!
//! Each service borrows the collaborators it needs from a [`Backend`] and
//! keeps no state of its own. Failures are logged with `tracing::error!` and
//! returned to the caller unchanged; nothing is retried.
//!
//! [`Backend`]: crate::Backend

mod auth;
mod customers;
mod images;

pub use auth::AuthService;
pub use customers::CustomerService;
pub use images::ImageService;

use crate::error::{Result, ServiceError};

/// Converts a collaborator error into a [`ServiceError`] and logs it.
fn logged<T, E>(result: std::result::Result<T, E>, action: &'static str) -> Result<T>
where
    E: Into<ServiceError>,
{
    result.map_err(|err| {
        let err = err.into();
        tracing::error!(error = %err, action, "Operation failed");
        err
    })
}
