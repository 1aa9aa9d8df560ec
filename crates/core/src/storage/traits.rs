use async_trait::async_trait;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::auth::{Outlet, UserProfile};
use crate::customer::{
    BalanceOperation, Customer, CustomerFilters, CustomerPatch, Invoice, NewCustomer, RentalOrder,
};

use super::Result;

/// Repository for user profile rows.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Gets the profile of an authenticated user.
    async fn get_profile(&self, user_id: Uuid) -> Result<Option<UserProfile>>;
}

/// Repository for outlets and outlet assignments.
#[async_trait]
pub trait OutletRepository: Send + Sync {
    /// Gets every active outlet, ordered by name.
    async fn list_active_outlets(&self) -> Result<Vec<Outlet>>;

    /// Gets the outlets assigned to a user, active or not.
    async fn list_assigned_outlets(&self, user_id: Uuid) -> Result<Vec<Outlet>>;
}

/// Repository for customer rows.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Gets active customers matching the filters, newest first.
    async fn list_customers(&self, filters: &CustomerFilters) -> Result<Vec<Customer>>;

    /// Gets a customer by ID, including soft-deleted ones.
    async fn get_customer(&self, id: Uuid) -> Result<Option<Customer>>;

    /// Inserts a customer and returns the stored row.
    async fn insert_customer(&self, customer: &NewCustomer) -> Result<Customer>;

    /// Applies a partial update and returns the stored row.
    async fn update_customer(&self, id: Uuid, patch: &CustomerPatch) -> Result<Customer>;

    /// Adjusts the outstanding balance in a single atomic step.
    ///
    /// Subtraction is floored at zero and `updated_at` is stamped by the store.
    async fn adjust_balance(
        &self,
        id: Uuid,
        amount: Decimal,
        operation: BalanceOperation,
    ) -> Result<Customer>;
}

/// Read-only access to a customer's orders and invoices.
#[async_trait]
pub trait LedgerRepository: Send + Sync {
    /// Gets a customer's rental orders with their lines, newest first.
    async fn list_orders_for_customer(&self, customer_id: Uuid) -> Result<Vec<RentalOrder>>;

    /// Gets a customer's invoices, most recent invoice date first.
    async fn list_invoices_for_customer(&self, customer_id: Uuid) -> Result<Vec<Invoice>>;
}
