//! Customer CLI commands.

use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use uuid::Uuid;

use rentdesk_core::customer::{BalanceOperation, CreateCustomerRequest, UpdateCustomerRequest};

/// Customer management commands.
#[derive(Debug, Parser)]
pub struct CustomersCommand {
    #[command(subcommand)]
    pub action: CustomersAction,
}

/// CLI balance operation (with clap ValueEnum).
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum BalanceOp {
    Add,
    Subtract,
}

impl From<BalanceOp> for BalanceOperation {
    fn from(op: BalanceOp) -> Self {
        match op {
            BalanceOp::Add => BalanceOperation::Add,
            BalanceOp::Subtract => BalanceOperation::Subtract,
        }
    }
}

/// Contact fields shared by create and update.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ContactArgs {
    /// Company name.
    #[arg(long)]
    pub company_name: Option<String>,
    /// Phone number.
    #[arg(long)]
    pub phone: Option<String>,
    /// Email address.
    #[arg(long)]
    pub email: Option<String>,
    /// Street address.
    #[arg(long)]
    pub address: Option<String>,
    /// City.
    #[arg(long)]
    pub city: Option<String>,
    /// Free-form notes.
    #[arg(long)]
    pub notes: Option<String>,
}

/// Available customer actions.
#[derive(Debug, Subcommand)]
pub enum CustomersAction {
    /// List active customers, newest first.
    List {
        /// Filter by customer type ("all" for every type).
        #[arg(long = "type")]
        customer_type: Option<String>,
        /// Case-insensitive search over company, contact, phone and email.
        #[arg(long)]
        search: Option<String>,
    },
    /// Get customer by ID.
    Get {
        /// Customer ID.
        id: Uuid,
    },
    /// Create a new customer.
    Create {
        /// Customer type, e.g. "individual" or "business".
        #[arg(long = "type")]
        customer_type: String,
        /// Contact person.
        #[arg(long)]
        contact_person: String,
        #[command(flatten)]
        contact: ContactArgs,
    },
    /// Update a customer.
    Update {
        /// Customer ID.
        id: Uuid,
        /// Customer type.
        #[arg(long = "type")]
        customer_type: Option<String>,
        /// Contact person.
        #[arg(long)]
        contact_person: Option<String>,
        #[command(flatten)]
        contact: ContactArgs,
    },
    /// Deactivate a customer. The record is kept.
    Delete {
        /// Customer ID.
        id: Uuid,
    },
    /// List a customer's rental orders.
    Orders {
        /// Customer ID.
        id: Uuid,
    },
    /// List a customer's invoices.
    Invoices {
        /// Customer ID.
        id: Uuid,
    },
    /// Add to or subtract from the outstanding balance.
    Balance {
        /// Customer ID.
        id: Uuid,
        /// Amount, e.g. 120.50.
        #[arg(long)]
        amount: Decimal,
        /// Direction of the adjustment.
        #[arg(long, value_enum)]
        operation: BalanceOp,
    },
}

/// Build a create request from CLI arguments.
pub fn create_request(
    customer_type: String,
    contact_person: String,
    contact: ContactArgs,
) -> CreateCustomerRequest {
    CreateCustomerRequest {
        company_name: contact.company_name,
        phone: contact.phone,
        email: contact.email,
        address: contact.address,
        city: contact.city,
        notes: contact.notes,
        ..CreateCustomerRequest::new(customer_type, contact_person)
    }
}

/// Build an update request from CLI arguments.
pub fn update_request(
    customer_type: Option<String>,
    contact_person: Option<String>,
    contact: ContactArgs,
) -> UpdateCustomerRequest {
    UpdateCustomerRequest {
        customer_type,
        contact_person,
        company_name: contact.company_name,
        phone: contact.phone,
        email: contact.email,
        address: contact.address,
        city: contact.city,
        notes: contact.notes,
        is_active: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_request_without_flags_is_empty() {
        let request = update_request(None, None, ContactArgs::default());
        assert!(request.is_empty());
    }

    #[test]
    fn test_create_request_copies_contact_fields() {
        let request = create_request(
            "business".to_string(),
            "Rosa".to_string(),
            ContactArgs {
                phone: Some("555-0100".to_string()),
                ..ContactArgs::default()
            },
        );
        assert_eq!(request.phone.as_deref(), Some("555-0100"));
        assert_eq!(request.company_name, None);
    }
}
