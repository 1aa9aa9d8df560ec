//! Pretty output formatting.

use rentdesk_core::auth::{AuthContext, Outlet, Session};
use rentdesk_core::customer::{Customer, Invoice, RentalOrder};

/// Format a resolved login context for display.
pub fn format_auth_context(context: &AuthContext) -> String {
    let profile = &context.profile;
    let name = profile
        .full_name
        .as_deref()
        .or(profile.email.as_deref())
        .unwrap_or("(unnamed)");
    let mut output = format!("{} [{}]\n  ID: {}", name, profile.role, profile.id);
    if context.outlets.is_empty() {
        output.push_str("\n  Outlets: none");
        return output;
    }
    output.push_str(&format!("\n  Outlets ({}):", context.outlets.len()));
    for outlet in &context.outlets {
        let marker = if context.selected_outlet == Some(outlet.id) {
            " (selected)"
        } else {
            ""
        };
        output.push_str(&format!("\n    {}{}", format_outlet(outlet), marker));
    }
    output
}

/// Format an outlet on one line.
pub fn format_outlet(outlet: &Outlet) -> String {
    match &outlet.code {
        Some(code) => format!("{} [{}] {}", outlet.name, code, outlet.id),
        None => format!("{} {}", outlet.name, outlet.id),
    }
}

/// Format a session for display.
pub fn format_session(session: Option<&Session>) -> String {
    match session {
        None => "Not signed in.".to_string(),
        Some(session) => format!(
            "Signed in as {}\n  User ID: {}\n  Expires: {}",
            session.user.email.as_deref().unwrap_or("(no email)"),
            session.user.id,
            session.expires_at.to_rfc3339()
        ),
    }
}

/// Format a customer for display.
pub fn format_customer(customer: &Customer) -> String {
    let title = customer
        .company_name
        .as_deref()
        .unwrap_or(&customer.contact_person);
    let mut output = format!(
        "{} [{}]\n  ID: {}\n  Code: {}\n  Contact: {}\n  Balance: {}",
        title,
        customer.customer_type,
        customer.id,
        customer.customer_code,
        customer.contact_person,
        customer.outstanding_balance
    );
    if let Some(phone) = &customer.phone {
        output.push_str(&format!("\n  Phone: {}", phone));
    }
    if let Some(email) = &customer.email {
        output.push_str(&format!("\n  Email: {}", email));
    }
    if let Some(city) = &customer.city {
        output.push_str(&format!("\n  City: {}", city));
    }
    if !customer.is_active {
        output.push_str("\n  Status: inactive");
    }
    output
}

/// Format customers for display.
pub fn format_customers(customers: &[Customer]) -> String {
    if customers.is_empty() {
        return "No customers found.".to_string();
    }
    let mut output = format!("CUSTOMERS ({})\n", customers.len());
    output.push_str(&"-".repeat(40));
    for customer in customers {
        output.push_str(&format!("\n{}", format_customer(customer)));
        output.push('\n');
    }
    output
}

/// Format a rental order with its lines.
pub fn format_order(order: &RentalOrder) -> String {
    let mut output = format!(
        "{} [{}]\n  ID: {}\n  Total: {}\n  Created: {}",
        order.order_number,
        order.status,
        order.id,
        order.total_amount,
        order.created_at.format("%Y-%m-%d %H:%M")
    );
    if let (Some(start), Some(end)) = (order.start_date, order.end_date) {
        output.push_str(&format!("\n  Period: {} to {}", start, end));
    }
    for item in &order.items {
        let name = item
            .inventory_item
            .as_ref()
            .map(|i| i.name.as_str())
            .unwrap_or("(unknown item)");
        output.push_str(&format!("\n    {} x {}", item.quantity, name));
    }
    output
}

/// Format orders for display.
pub fn format_orders(orders: &[RentalOrder]) -> String {
    if orders.is_empty() {
        return "No orders found.".to_string();
    }
    let mut output = format!("ORDERS ({})\n", orders.len());
    output.push_str(&"-".repeat(40));
    for order in orders {
        output.push_str(&format!("\n{}", format_order(order)));
        output.push('\n');
    }
    output
}

/// Format an invoice for display.
pub fn format_invoice(invoice: &Invoice) -> String {
    let mut output = format!(
        "{} [{}]\n  ID: {}\n  Date: {}\n  Total: {}\n  Paid: {}",
        invoice.invoice_number,
        invoice.status,
        invoice.id,
        invoice.invoice_date,
        invoice.total_amount,
        invoice.paid_amount
    );
    if let Some(due) = invoice.due_date {
        output.push_str(&format!("\n  Due: {}", due));
    }
    output
}

/// Format invoices for display.
pub fn format_invoices(invoices: &[Invoice]) -> String {
    if invoices.is_empty() {
        return "No invoices found.".to_string();
    }
    let mut output = format!("INVOICES ({})\n", invoices.len());
    output.push_str(&"-".repeat(40));
    for invoice in invoices {
        output.push_str(&format!("\n{}", format_invoice(invoice)));
        output.push('\n');
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rentdesk_core::auth::{Role, UserProfile};
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn customer() -> Customer {
        let now = Utc::now();
        Customer {
            id: Uuid::nil(),
            customer_code: "CUST-000042".to_string(),
            customer_type: "business".to_string(),
            company_name: Some("Acme".to_string()),
            contact_person: "Rosa".to_string(),
            phone: None,
            email: Some("rosa@acme.test".to_string()),
            address: None,
            city: None,
            notes: None,
            outstanding_balance: Decimal::new(1050, 2),
            is_active: false,
            created_by: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_format_customer() {
        let output = format_customer(&customer());

        assert!(output.starts_with("Acme [business]"));
        assert!(output.contains("Code: CUST-000042"));
        assert!(output.contains("Balance: 10.50"));
        assert!(output.contains("Email: rosa@acme.test"));
        assert!(output.contains("Status: inactive"));
        assert!(!output.contains("Phone:"));
    }

    #[test]
    fn test_format_customers_empty() {
        assert_eq!(format_customers(&[]), "No customers found.");
    }

    #[test]
    fn test_format_customers_header() {
        let output = format_customers(&[customer(), customer()]);
        assert!(output.starts_with("CUSTOMERS (2)\n"));
    }

    #[test]
    fn test_format_auth_context_marks_selection() {
        let outlet = Outlet::new("Harbor");
        let context = AuthContext {
            profile: UserProfile::new(Uuid::nil(), Role::Manager).with_full_name("Ana"),
            selected_outlet: Some(outlet.id),
            outlets: vec![outlet],
        };

        let output = format_auth_context(&context);

        assert!(output.starts_with("Ana [manager]"));
        assert!(output.contains("Harbor"));
        assert!(output.contains("(selected)"));
    }

    #[test]
    fn test_format_session_when_signed_out() {
        assert_eq!(format_session(None), "Not signed in.");
    }
}
