//! Row storage against the `/rest/v1` API.

use async_trait::async_trait;
use reqwest::Method;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use rentdesk_core::auth::{Outlet, UserProfile};
use rentdesk_core::customer::{
    BalanceOperation, Customer, CustomerFilters, CustomerPatch, Invoice, NewCustomer, RentalOrder,
};
use rentdesk_core::storage::{
    CustomerRepository, LedgerRepository, OutletRepository, ProfileRepository, RepositoryError,
    Result,
};

use super::query::{self, Params};
use super::RemoteClient;
use crate::error::ClientError;

/// Name of the database function performing atomic balance updates.
pub const ADJUST_BALANCE_FUNCTION: &str = "adjust_customer_balance";

/// Arguments of [`ADJUST_BALANCE_FUNCTION`].
#[derive(Debug, Serialize)]
pub struct AdjustBalanceArgs {
    pub p_customer_id: Uuid,
    pub p_amount: Decimal,
    pub p_operation: BalanceOperation,
}

/// Outlet assignment row with the outlet embedded.
#[derive(Debug, Deserialize)]
struct AssignmentRow {
    outlets: Option<Outlet>,
}

impl RemoteClient {
    fn table(&self, table: &str) -> url::Url {
        self.endpoint(["rest", "v1", table])
    }

    async fn select<T: serde::de::DeserializeOwned>(
        &self,
        table: &str,
        params: &Params,
    ) -> crate::Result<Vec<T>> {
        let response = self
            .request(Method::GET, self.table(table))
            .await?
            .query(params)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Send a write and return the affected rows.
    async fn write_returning<B: Serialize + ?Sized>(
        &self,
        method: Method,
        table: &str,
        params: &Params,
        body: &B,
    ) -> crate::Result<Vec<Customer>> {
        let response = self
            .request(method, self.table(table))
            .await?
            .query(params)
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await?;
        self.handle_response(response).await
    }
}

fn customer_not_found(id: Uuid) -> ClientError {
    ClientError::NotFound {
        resource: "Customer",
        id: id.to_string(),
    }
}

/// Map a failed balance RPC. The function raises `PT404` for unknown ids,
/// which PostgREST reports as 404.
fn balance_rpc_error(id: Uuid, err: ClientError) -> RepositoryError {
    match err {
        ClientError::ServerError { status: 404, .. } => customer_not_found(id).into(),
        other => other.into(),
    }
}

#[async_trait]
impl ProfileRepository for RemoteClient {
    async fn get_profile(&self, user_id: Uuid) -> Result<Option<UserProfile>> {
        let rows: Vec<UserProfile> = self.select("user_profiles", &query::by_id(user_id)).await?;
        Ok(rows.into_iter().next())
    }
}

#[async_trait]
impl OutletRepository for RemoteClient {
    async fn list_active_outlets(&self) -> Result<Vec<Outlet>> {
        Ok(self.select("outlets", &query::active_outlets()).await?)
    }

    async fn list_assigned_outlets(&self, user_id: Uuid) -> Result<Vec<Outlet>> {
        let rows: Vec<AssignmentRow> = self
            .select("user_outlet_assignments", &query::assigned_outlets(user_id))
            .await?;
        Ok(rows.into_iter().filter_map(|row| row.outlets).collect())
    }
}

#[async_trait]
impl CustomerRepository for RemoteClient {
    async fn list_customers(&self, filters: &CustomerFilters) -> Result<Vec<Customer>> {
        Ok(self
            .select("customers", &query::customer_list(filters))
            .await?)
    }

    async fn get_customer(&self, id: Uuid) -> Result<Option<Customer>> {
        let rows: Vec<Customer> = self.select("customers", &query::by_id(id)).await?;
        Ok(rows.into_iter().next())
    }

    async fn insert_customer(&self, customer: &NewCustomer) -> Result<Customer> {
        let rows = self
            .write_returning(Method::POST, "customers", &Params::new(), customer)
            .await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| ClientError::InvalidResponse("insert returned no rows".to_string()).into())
    }

    async fn update_customer(&self, id: Uuid, patch: &CustomerPatch) -> Result<Customer> {
        let params = vec![("id", query::eq(id))];
        let rows = self
            .write_returning(Method::PATCH, "customers", &params, patch)
            .await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| customer_not_found(id).into())
    }

    async fn adjust_balance(
        &self,
        id: Uuid,
        amount: Decimal,
        operation: BalanceOperation,
    ) -> Result<Customer> {
        let args = AdjustBalanceArgs {
            p_customer_id: id,
            p_amount: amount,
            p_operation: operation,
        };
        let response = self
            .request(
                Method::POST,
                self.endpoint(["rest", "v1", "rpc", ADJUST_BALANCE_FUNCTION]),
            )
            .await?
            .json(&args)
            .send()
            .await
            .map_err(ClientError::from)?;

        self.handle_response(response)
            .await
            .map_err(|err| balance_rpc_error(id, err))
    }
}

#[async_trait]
impl LedgerRepository for RemoteClient {
    async fn list_orders_for_customer(&self, customer_id: Uuid) -> Result<Vec<RentalOrder>> {
        Ok(self
            .select("rental_orders", &query::customer_orders(customer_id))
            .await?)
    }

    async fn list_invoices_for_customer(&self, customer_id: Uuid) -> Result<Vec<Invoice>> {
        Ok(self
            .select("invoices", &query::customer_invoices(customer_id))
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjust_balance_args_match_function_signature() {
        let args = AdjustBalanceArgs {
            p_customer_id: Uuid::nil(),
            p_amount: Decimal::new(1250, 2),
            p_operation: BalanceOperation::Subtract,
        };

        let json = serde_json::to_value(&args).unwrap();

        assert_eq!(json["p_customer_id"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(json["p_amount"], "12.50");
        assert_eq!(json["p_operation"], "subtract");
    }

    #[test]
    fn test_missing_customer_in_balance_rpc_is_not_found() {
        let id = Uuid::new_v4();
        let err = balance_rpc_error(
            id,
            ClientError::ServerError {
                status: 404,
                message: format!("customer {id} not found"),
            },
        );

        assert_eq!(
            err,
            RepositoryError::NotFound {
                entity_type: "Customer",
                id: id.to_string(),
            }
        );
    }

    #[test]
    fn test_other_balance_rpc_failures_stay_query_errors() {
        let err = balance_rpc_error(
            Uuid::nil(),
            ClientError::ServerError {
                status: 400,
                message: "amount cannot be negative".to_string(),
            },
        );

        assert!(matches!(err, RepositoryError::QueryFailed(_)));
    }

    #[test]
    fn test_balance_function_raises_http_not_found_state() {
        let sql = include_str!("../../sql/adjust_customer_balance.sql");

        assert!(sql.contains(ADJUST_BALANCE_FUNCTION));
        assert!(sql.contains("raise sqlstate 'PT404'"));
    }

    #[test]
    fn test_assignment_rows_skip_missing_outlets() {
        let rows: Vec<AssignmentRow> = serde_json::from_str(
            r#"[
                {"outlets": {"id": "6a1e4c2e-0a52-4c1b-9d55-3f2a8d8c9b10", "name": "Harbor", "is_active": true}},
                {"outlets": null}
            ]"#,
        )
        .unwrap();

        let outlets: Vec<Outlet> = rows.into_iter().filter_map(|r| r.outlets).collect();

        assert_eq!(outlets.len(), 1);
        assert_eq!(outlets[0].name, "Harbor");
    }

    #[test]
    fn test_table_url() {
        let client = RemoteClient::new("https://project.example.co", "anon", "b").unwrap();
        assert_eq!(
            client.table("customers").as_str(),
            "https://project.example.co/rest/v1/customers"
        );
    }

    #[test]
    fn test_customer_rows_decode_numeric_balance() {
        let customer: Customer = serde_json::from_str(
            r#"{
                "id": "6a1e4c2e-0a52-4c1b-9d55-3f2a8d8c9b10",
                "customer_code": "CUST-123456",
                "customer_type": "business",
                "company_name": "Acme",
                "contact_person": "Rosa",
                "phone": null,
                "email": null,
                "address": null,
                "city": null,
                "notes": null,
                "outstanding_balance": 120.5,
                "is_active": true,
                "created_by": null,
                "created_at": "2024-06-01T10:00:00+00:00",
                "updated_at": "2024-06-01T10:00:00+00:00"
            }"#,
        )
        .unwrap();

        assert_eq!(customer.outstanding_balance, Decimal::new(1205, 1));
    }
}
