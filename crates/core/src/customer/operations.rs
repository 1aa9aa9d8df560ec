use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use super::error::CustomerError;
use super::requests::{CreateCustomerRequest, CustomerFilters, CustomerPatch, NewCustomer};
use super::types::{BalanceOperation, Customer};

/// Builds a customer code from the last six digits of the millisecond
/// timestamp, e.g. `CUST-042117`.
pub fn generate_customer_code(now: DateTime<Utc>) -> String {
    format!("CUST-{:06}", now.timestamp_millis().rem_euclid(1_000_000))
}

/// Case-insensitive substring match against company name, contact person,
/// phone and email. Any matching field is enough.
pub fn matches_search(customer: &Customer, term: &str) -> bool {
    let needle = term.to_lowercase();
    [
        customer.company_name.as_deref(),
        Some(customer.contact_person.as_str()),
        customer.phone.as_deref(),
        customer.email.as_deref(),
    ]
    .into_iter()
    .flatten()
    .any(|field| field.to_lowercase().contains(&needle))
}

/// Applies the type and search filters. Does not look at `is_active`.
pub fn matches_filters(customer: &Customer, filters: &CustomerFilters) -> bool {
    filters
        .type_filter()
        .is_none_or(|t| customer.customer_type == t)
        && filters
            .search_term()
            .is_none_or(|term| matches_search(customer, term))
}

/// Active customers matching the filters, newest first.
pub fn filter_customers<'a>(
    customers: impl IntoIterator<Item = &'a Customer>,
    filters: &CustomerFilters,
) -> Vec<&'a Customer> {
    let mut matched: Vec<&Customer> = customers
        .into_iter()
        .filter(|c| c.is_active && matches_filters(c, filters))
        .collect();
    matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    matched
}

/// New balance after an adjustment. Subtraction is floored at zero.
pub fn apply_balance_change(
    current: Decimal,
    amount: Decimal,
    operation: BalanceOperation,
) -> Decimal {
    match operation {
        BalanceOperation::Add => current + amount,
        BalanceOperation::Subtract => (current - amount).max(Decimal::ZERO),
    }
}

/// Rejects negative adjustment amounts.
pub fn validate_balance_amount(amount: Decimal) -> Result<(), CustomerError> {
    if amount < Decimal::ZERO {
        return Err(CustomerError::NegativeAmount);
    }
    Ok(())
}

/// Validates a customer before creation.
pub fn validate_create_request(request: &CreateCustomerRequest) -> Result<(), CustomerError> {
    if request.contact_person.trim().is_empty() {
        return Err(CustomerError::EmptyContactPerson);
    }
    if request.customer_type.trim().is_empty() {
        return Err(CustomerError::EmptyCustomerType);
    }
    Ok(())
}

/// Turns an insert into a stored row: active, zero balance, timestamps set.
pub fn materialize_customer(new: NewCustomer, id: Uuid, now: DateTime<Utc>) -> Customer {
    let details = new.details;
    Customer {
        id,
        customer_code: new.customer_code,
        customer_type: details.customer_type,
        company_name: details.company_name,
        contact_person: details.contact_person,
        phone: details.phone,
        email: details.email,
        address: details.address,
        city: details.city,
        notes: details.notes,
        outstanding_balance: Decimal::ZERO,
        is_active: true,
        created_by: new.created_by,
        created_at: now,
        updated_at: now,
    }
}

/// Copies every present field of the patch onto the customer.
pub fn apply_customer_patch(customer: &mut Customer, patch: &CustomerPatch) {
    let changes = &patch.changes;
    if let Some(customer_type) = &changes.customer_type {
        customer.customer_type = customer_type.clone();
    }
    if let Some(contact_person) = &changes.contact_person {
        customer.contact_person = contact_person.clone();
    }
    if let Some(company_name) = &changes.company_name {
        customer.company_name = Some(company_name.clone());
    }
    if let Some(phone) = &changes.phone {
        customer.phone = Some(phone.clone());
    }
    if let Some(email) = &changes.email {
        customer.email = Some(email.clone());
    }
    if let Some(address) = &changes.address {
        customer.address = Some(address.clone());
    }
    if let Some(city) = &changes.city {
        customer.city = Some(city.clone());
    }
    if let Some(notes) = &changes.notes {
        customer.notes = Some(notes.clone());
    }
    if let Some(is_active) = changes.is_active {
        customer.is_active = is_active;
    }
    customer.updated_at = patch.updated_at;
}
