use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use rentdesk_core::auth::{Outlet, UserProfile};
use rentdesk_core::customer::{
    apply_balance_change, apply_customer_patch, filter_customers, materialize_customer,
    BalanceOperation, Customer, CustomerFilters, CustomerPatch, Invoice, NewCustomer, RentalOrder,
};
use rentdesk_core::storage::{
    CustomerRepository, LedgerRepository, OutletRepository, ProfileRepository, RepositoryError,
    Result,
};

use super::backend::InMemoryBackend;

fn customer_not_found(id: Uuid) -> RepositoryError {
    RepositoryError::NotFound {
        entity_type: "Customer",
        id: id.to_string(),
    }
}

#[async_trait]
impl ProfileRepository for InMemoryBackend {
    async fn get_profile(&self, user_id: Uuid) -> Result<Option<UserProfile>> {
        let profiles = self.profiles.read().await;
        Ok(profiles.get(&user_id).cloned())
    }
}

#[async_trait]
impl OutletRepository for InMemoryBackend {
    async fn list_active_outlets(&self) -> Result<Vec<Outlet>> {
        let outlets = self.outlets.read().await;
        let mut active: Vec<Outlet> = outlets.values().filter(|o| o.is_active).cloned().collect();
        active.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(active)
    }

    async fn list_assigned_outlets(&self, user_id: Uuid) -> Result<Vec<Outlet>> {
        let assignments = self.assignments.read().await;
        let outlets = self.outlets.read().await;

        Ok(assignments
            .iter()
            .filter(|(assigned_user, _)| *assigned_user == user_id)
            .filter_map(|(_, outlet_id)| outlets.get(outlet_id).cloned())
            .collect())
    }
}

#[async_trait]
impl CustomerRepository for InMemoryBackend {
    async fn list_customers(&self, filters: &CustomerFilters) -> Result<Vec<Customer>> {
        let customers = self.customers.read().await;
        Ok(filter_customers(customers.values(), filters)
            .into_iter()
            .cloned()
            .collect())
    }

    async fn get_customer(&self, id: Uuid) -> Result<Option<Customer>> {
        let customers = self.customers.read().await;
        Ok(customers.get(&id).cloned())
    }

    async fn insert_customer(&self, customer: &NewCustomer) -> Result<Customer> {
        let mut customers = self.customers.write().await;
        if customers
            .values()
            .any(|c| c.customer_code == customer.customer_code)
        {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "Customer",
                id: customer.customer_code.clone(),
            });
        }
        let stored = materialize_customer(customer.clone(), Uuid::new_v4(), Utc::now());
        customers.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn update_customer(&self, id: Uuid, patch: &CustomerPatch) -> Result<Customer> {
        let mut customers = self.customers.write().await;
        let customer = customers.get_mut(&id).ok_or_else(|| customer_not_found(id))?;
        apply_customer_patch(customer, patch);
        Ok(customer.clone())
    }

    async fn adjust_balance(
        &self,
        id: Uuid,
        amount: Decimal,
        operation: BalanceOperation,
    ) -> Result<Customer> {
        // The write guard spans the read and the write.
        let mut customers = self.customers.write().await;
        let customer = customers.get_mut(&id).ok_or_else(|| customer_not_found(id))?;
        customer.outstanding_balance =
            apply_balance_change(customer.outstanding_balance, amount, operation);
        customer.updated_at = Utc::now();
        Ok(customer.clone())
    }
}

#[async_trait]
impl LedgerRepository for InMemoryBackend {
    async fn list_orders_for_customer(&self, customer_id: Uuid) -> Result<Vec<RentalOrder>> {
        let orders = self.orders.read().await;
        let mut matched: Vec<RentalOrder> = orders
            .iter()
            .filter(|o| o.customer_id == customer_id)
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matched)
    }

    async fn list_invoices_for_customer(&self, customer_id: Uuid) -> Result<Vec<Invoice>> {
        let invoices = self.invoices.read().await;
        let mut matched: Vec<Invoice> = invoices
            .iter()
            .filter(|i| i.customer_id == customer_id)
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.invoice_date.cmp(&a.invoice_date));
        Ok(matched)
    }
}
