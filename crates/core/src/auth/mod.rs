mod error;
mod functions;
mod traits;
mod types;

pub use error::{CredentialError, IdentityError};
pub use functions::{
    is_session_expired, outlet_scope, resolve_outlets, select_default_outlet, validate_credentials,
    validate_new_password, MIN_PASSWORD_LENGTH,
};
pub use traits::{IdentityProvider, Result};
pub use types::{AuthContext, AuthUser, Outlet, OutletScope, Role, Session, UserProfile};
