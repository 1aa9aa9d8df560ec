//! Injected backend collaborators.
//!
//! Services never reach for a global client. They are built from a [`Backend`]
//! holding one trait object per backend concern, so tests can swap in the
//! in-memory implementation and production code the remote client.

use std::sync::Arc;

use rentdesk_core::auth::IdentityProvider;
use rentdesk_core::image::ObjectStore;
use rentdesk_core::storage::{
    CustomerRepository, LedgerRepository, OutletRepository, ProfileRepository,
};

/// Shared handles to every backend concern the services use.
#[derive(Clone)]
pub struct Backend {
    pub identity: Arc<dyn IdentityProvider>,
    pub profiles: Arc<dyn ProfileRepository>,
    pub outlets: Arc<dyn OutletRepository>,
    pub customers: Arc<dyn CustomerRepository>,
    pub ledger: Arc<dyn LedgerRepository>,
    pub objects: Arc<dyn ObjectStore>,
}

impl Backend {
    /// Builds a backend where a single value implements every concern.
    pub fn from_shared<B>(backend: Arc<B>) -> Self
    where
        B: IdentityProvider
            + ProfileRepository
            + OutletRepository
            + CustomerRepository
            + LedgerRepository
            + ObjectStore
            + 'static,
    {
        Self {
            identity: backend.clone(),
            profiles: backend.clone(),
            outlets: backend.clone(),
            customers: backend.clone(),
            ledger: backend.clone(),
            objects: backend,
        }
    }
}

impl std::fmt::Debug for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Backend").finish_non_exhaustive()
    }
}
