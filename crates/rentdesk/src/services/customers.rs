use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use rentdesk_core::auth::IdentityProvider;
use rentdesk_core::customer::{
    generate_customer_code, validate_balance_amount, validate_create_request, BalanceOperation,
    CreateCustomerRequest, Customer, CustomerError, CustomerFilters, CustomerPatch, Invoice,
    NewCustomer, RentalOrder, UpdateCustomerRequest,
};
use rentdesk_core::storage::{CustomerRepository, LedgerRepository};

use super::logged;
use crate::{Backend, Result, ServiceError};

/// Customer records, their ledger and their outstanding balance.
#[derive(Clone)]
pub struct CustomerService {
    customers: Arc<dyn CustomerRepository>,
    ledger: Arc<dyn LedgerRepository>,
    identity: Arc<dyn IdentityProvider>,
}

impl CustomerService {
    pub fn new(backend: &Backend) -> Self {
        Self {
            customers: backend.customers.clone(),
            ledger: backend.ledger.clone(),
            identity: backend.identity.clone(),
        }
    }

    /// Active customers matching `filters`, newest first.
    #[tracing::instrument(skip(self))]
    pub async fn list_customers(&self, filters: &CustomerFilters) -> Result<Vec<Customer>> {
        logged(
            self.customers.list_customers(filters).await,
            "list customers",
        )
    }

    /// A single customer, soft-deleted or not.
    #[tracing::instrument(skip(self))]
    pub async fn get_customer(&self, id: Uuid) -> Result<Customer> {
        logged(self.customers.get_customer(id).await, "fetch customer")?
            .ok_or_else(|| ServiceError::not_found("Customer", id))
            .inspect_err(|_| tracing::warn!(customer_id = %id, "Customer not found"))
    }

    /// Creates an active customer with a generated code and zero balance.
    ///
    /// `created_by` is the signed-in user, or empty when nobody is signed in.
    #[tracing::instrument(skip(self, request), fields(customer_type = %request.customer_type))]
    pub async fn create_customer(&self, request: CreateCustomerRequest) -> Result<Customer> {
        logged(validate_create_request(&request), "validate customer")?;

        let created_by = logged(self.identity.current_session().await, "fetch session")?
            .map(|session| session.user.id);

        let new_customer = NewCustomer {
            customer_code: generate_customer_code(Utc::now()),
            details: request,
            created_by,
        };

        let customer = logged(
            self.customers.insert_customer(&new_customer).await,
            "create customer",
        )?;
        tracing::info!(
            customer_id = %customer.id,
            customer_code = %customer.customer_code,
            "Customer created"
        );
        Ok(customer)
    }

    /// Applies a partial update and stamps `updated_at`.
    #[tracing::instrument(skip(self, changes))]
    pub async fn update_customer(
        &self,
        id: Uuid,
        changes: UpdateCustomerRequest,
    ) -> Result<Customer> {
        if changes
            .contact_person
            .as_deref()
            .is_some_and(|c| c.trim().is_empty())
        {
            return logged(Err(CustomerError::EmptyContactPerson), "validate customer");
        }
        if changes
            .customer_type
            .as_deref()
            .is_some_and(|t| t.trim().is_empty())
        {
            return logged(Err(CustomerError::EmptyCustomerType), "validate customer");
        }

        let patch = CustomerPatch {
            changes,
            updated_at: Utc::now(),
        };
        logged(
            self.customers.update_customer(id, &patch).await,
            "update customer",
        )
    }

    /// Soft delete: flips `is_active` off and keeps the row.
    #[tracing::instrument(skip(self))]
    pub async fn delete_customer(&self, id: Uuid) -> Result<Customer> {
        let customer = self
            .update_customer(id, UpdateCustomerRequest::deactivate())
            .await?;
        tracing::info!(customer_id = %id, "Customer deactivated");
        Ok(customer)
    }

    /// Rental orders with their lines, newest first.
    #[tracing::instrument(skip(self))]
    pub async fn customer_orders(&self, id: Uuid) -> Result<Vec<RentalOrder>> {
        logged(
            self.ledger.list_orders_for_customer(id).await,
            "list customer orders",
        )
    }

    /// Invoices, most recent invoice date first.
    #[tracing::instrument(skip(self))]
    pub async fn customer_invoices(&self, id: Uuid) -> Result<Vec<Invoice>> {
        logged(
            self.ledger.list_invoices_for_customer(id).await,
            "list customer invoices",
        )
    }

    /// Adds to or subtracts from the outstanding balance in one storage call.
    ///
    /// Subtraction never takes the balance below zero.
    #[tracing::instrument(skip(self))]
    pub async fn update_customer_balance(
        &self,
        id: Uuid,
        amount: Decimal,
        operation: BalanceOperation,
    ) -> Result<Customer> {
        logged(validate_balance_amount(amount), "validate amount")?;

        let customer = logged(
            self.customers.adjust_balance(id, amount, operation).await,
            "adjust balance",
        )?;
        tracing::info!(
            customer_id = %id,
            balance = %customer.outstanding_balance,
            "Customer balance adjusted"
        );
        Ok(customer)
    }
}

impl std::fmt::Debug for CustomerService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomerService").finish_non_exhaustive()
    }
}
