use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A rental customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: Uuid,
    /// Human-facing code, `CUST-` followed by six digits.
    pub customer_code: String,
    pub customer_type: String,
    #[serde(default)]
    pub company_name: Option<String>,
    pub contact_person: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    /// Amount the customer owes. Never negative.
    pub outstanding_balance: Decimal,
    /// Soft-delete flag.
    pub is_active: bool,
    #[serde(default)]
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Direction of a balance adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BalanceOperation {
    Add,
    Subtract,
}

impl BalanceOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Subtract => "subtract",
        }
    }
}

impl std::fmt::Display for BalanceOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BalanceOperation {
    type Err = super::CustomerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "add" => Ok(Self::Add),
            "subtract" => Ok(Self::Subtract),
            other => Err(super::CustomerError::UnknownBalanceOperation(
                other.to_string(),
            )),
        }
    }
}

/// Inventory item embedded in a rental order line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub sku: Option<String>,
}

/// A single line of a rental order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalOrderItem {
    pub id: Uuid,
    pub inventory_item_id: Uuid,
    pub quantity: i32,
    #[serde(default)]
    pub daily_rate: Option<Decimal>,
    #[serde(default, rename = "inventory_items")]
    pub inventory_item: Option<InventoryItem>,
}

/// A rental order with its lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalOrder {
    pub id: Uuid,
    pub order_number: String,
    pub customer_id: Uuid,
    #[serde(default)]
    pub outlet_id: Option<Uuid>,
    pub status: String,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub total_amount: Decimal,
    pub created_at: DateTime<Utc>,
    #[serde(default, rename = "rental_order_items")]
    pub items: Vec<RentalOrderItem>,
}

/// An invoice issued to a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: Uuid,
    pub invoice_number: String,
    pub customer_id: Uuid,
    #[serde(default)]
    pub order_id: Option<Uuid>,
    pub invoice_date: NaiveDate,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub total_amount: Decimal,
    #[serde(default)]
    pub paid_amount: Decimal,
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balance_operation_parses_case_insensitively() {
        assert_eq!("ADD".parse::<BalanceOperation>(), Ok(BalanceOperation::Add));
        assert_eq!(
            " subtract ".parse::<BalanceOperation>(),
            Ok(BalanceOperation::Subtract)
        );
        assert!("multiply".parse::<BalanceOperation>().is_err());
    }

    #[test]
    fn customer_row_accepts_numeric_balance() {
        let json = r#"{
            "id": "0d8f8d3e-5b7a-4c61-9f1e-2a3b4c5d6e7f",
            "customer_code": "CUST-123456",
            "customer_type": "business",
            "company_name": "Acme Events",
            "contact_person": "Rosa Diaz",
            "outstanding_balance": 125.5,
            "is_active": true,
            "created_at": "2024-03-01T10:00:00Z",
            "updated_at": "2024-03-01T10:00:00Z"
        }"#;

        let customer: Customer = serde_json::from_str(json).unwrap();

        assert_eq!(customer.outstanding_balance, Decimal::new(1255, 1));
        assert!(customer.phone.is_none());
        assert!(customer.created_by.is_none());
    }

    #[test]
    fn order_embeds_items_and_inventory() {
        let json = r#"{
            "id": "11111111-1111-4111-8111-111111111111",
            "order_number": "RO-0001",
            "customer_id": "22222222-2222-4222-8222-222222222222",
            "status": "active",
            "total_amount": "300.00",
            "created_at": "2024-03-02T08:30:00Z",
            "rental_order_items": [{
                "id": "33333333-3333-4333-8333-333333333333",
                "inventory_item_id": "44444444-4444-4444-8444-444444444444",
                "quantity": 2,
                "inventory_items": {
                    "id": "44444444-4444-4444-8444-444444444444",
                    "name": "Folding chair"
                }
            }]
        }"#;

        let order: RentalOrder = serde_json::from_str(json).unwrap();

        assert_eq!(order.items.len(), 1);
        assert_eq!(
            order.items[0].inventory_item.as_ref().map(|i| i.name.as_str()),
            Some("Folding chair")
        );
    }
}
