use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::Duration;
use rand::{distr::Alphanumeric, Rng};
use tokio::sync::RwLock;
use uuid::Uuid;

use rentdesk_core::auth::{AuthUser, Outlet, Session, UserProfile};
use rentdesk_core::customer::{Customer, Invoice, RentalOrder};

/// A registered identity with its password.
#[derive(Debug, Clone)]
pub(super) struct Account {
    pub user: AuthUser,
    pub password: String,
}

/// A stored object.
#[derive(Debug, Clone)]
pub(super) struct Blob {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// In-memory backend for tests and offline use.
///
/// Uses HashMaps wrapped in `Arc<RwLock<_>>` for thread-safe access.
/// Data is not persisted and will be lost when the backend is dropped.
/// Clones share the same tables.
#[derive(Debug, Clone)]
pub struct InMemoryBackend {
    pub(super) bucket: String,
    pub(super) session_ttl: Duration,
    /// Keyed by lowercased email.
    pub(super) accounts: Arc<RwLock<HashMap<String, Account>>>,
    pub(super) session: Arc<RwLock<Option<Session>>>,
    /// `(email, redirect_to)` per reset request.
    pub(super) password_resets: Arc<RwLock<Vec<(String, Option<String>)>>>,
    pub(super) profiles: Arc<RwLock<HashMap<Uuid, UserProfile>>>,
    pub(super) outlets: Arc<RwLock<HashMap<Uuid, Outlet>>>,
    /// `(user_id, outlet_id)` pairs.
    pub(super) assignments: Arc<RwLock<HashSet<(Uuid, Uuid)>>>,
    pub(super) customers: Arc<RwLock<HashMap<Uuid, Customer>>>,
    pub(super) orders: Arc<RwLock<Vec<RentalOrder>>>,
    pub(super) invoices: Arc<RwLock<Vec<Invoice>>>,
    pub(super) objects: Arc<RwLock<HashMap<String, Blob>>>,
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryBackend {
    /// Creates a new empty in-memory backend.
    pub fn new() -> Self {
        Self {
            bucket: "inventory-images".to_string(),
            session_ttl: Duration::hours(1),
            accounts: Arc::new(RwLock::new(HashMap::new())),
            session: Arc::new(RwLock::new(None)),
            password_resets: Arc::new(RwLock::new(Vec::new())),
            profiles: Arc::new(RwLock::new(HashMap::new())),
            outlets: Arc::new(RwLock::new(HashMap::new())),
            assignments: Arc::new(RwLock::new(HashSet::new())),
            customers: Arc::new(RwLock::new(HashMap::new())),
            orders: Arc::new(RwLock::new(Vec::new())),
            invoices: Arc::new(RwLock::new(Vec::new())),
            objects: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Sets the bucket name used in signed URLs.
    pub fn with_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = bucket.into();
        self
    }

    /// Registers an identity that can sign in with `email` and `password`.
    pub async fn register_user(&self, email: &str, password: &str) -> AuthUser {
        let user = AuthUser {
            id: Uuid::new_v4(),
            email: Some(email.to_string()),
        };
        self.accounts.write().await.insert(
            email.to_lowercase(),
            Account {
                user: user.clone(),
                password: password.to_string(),
            },
        );
        user
    }

    /// Stores a profile row.
    pub async fn insert_profile(&self, profile: UserProfile) {
        self.profiles.write().await.insert(profile.id, profile);
    }

    /// Stores an outlet row.
    pub async fn insert_outlet(&self, outlet: Outlet) {
        self.outlets.write().await.insert(outlet.id, outlet);
    }

    /// Assigns an outlet to a user.
    pub async fn assign_outlet(&self, user_id: Uuid, outlet_id: Uuid) {
        self.assignments.write().await.insert((user_id, outlet_id));
    }

    /// Stores a rental order.
    pub async fn insert_order(&self, order: RentalOrder) {
        self.orders.write().await.push(order);
    }

    /// Stores an invoice.
    pub async fn insert_invoice(&self, invoice: Invoice) {
        self.invoices.write().await.push(invoice);
    }

    /// Password reset requests as `(email, redirect_to)`, in request order.
    pub async fn password_reset_requests(&self) -> Vec<(String, Option<String>)> {
        self.password_resets.read().await.clone()
    }

    /// Bytes and content type stored under `key`, if any.
    pub async fn stored_object(&self, key: &str) -> Option<(Vec<u8>, String)> {
        self.objects
            .read()
            .await
            .get(key)
            .map(|b| (b.bytes.clone(), b.content_type.clone()))
    }
}

/// Random alphanumeric token used for access tokens and URL signatures.
pub(super) fn random_token() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}
