//! PostgREST query parameter builders.
//!
//! Every function here is pure: it turns typed inputs into the
//! `(name, value)` pairs appended to a `/rest/v1/<table>` URL.

use rentdesk_core::customer::CustomerFilters;
use uuid::Uuid;

/// Query parameter pairs.
pub type Params = Vec<(&'static str, String)>;

/// Columns the free-text customer search looks at.
pub const CUSTOMER_SEARCH_COLUMNS: [&str; 4] = ["company_name", "contact_person", "phone", "email"];

/// Embedded select for orders with their lines and inventory items.
pub const ORDER_SELECT: &str = "*,rental_order_items(*,inventory_items(*))";

/// Embedded select for outlet assignments.
pub const ASSIGNMENT_SELECT: &str = "outlets(*)";

/// `eq.<value>` filter.
pub fn eq(value: impl std::fmt::Display) -> String {
    format!("eq.{value}")
}

/// Descending order on a column.
pub fn order_desc(column: &str) -> String {
    format!("{column}.desc")
}

/// Ascending order on a column.
pub fn order_asc(column: &str) -> String {
    format!("{column}.asc")
}

/// Quotes a value for use inside a logic tree such as `or=(...)`.
///
/// Values containing PostgREST reserved characters are wrapped in double
/// quotes with `"` and `\` backslash-escaped.
pub fn quote_value(value: &str) -> String {
    const RESERVED: [char; 7] = [',', '.', ':', '(', ')', '"', '\\'];
    if !value.contains(RESERVED) && !value.contains(char::is_whitespace) {
        return value.to_string();
    }
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}

/// `or=(...)` value matching `term` as a case-insensitive substring of any
/// customer search column.
pub fn customer_search(term: &str) -> String {
    let pattern = quote_value(&format!("*{term}*"));
    let clauses: Vec<String> = CUSTOMER_SEARCH_COLUMNS
        .iter()
        .map(|column| format!("{column}.ilike.{pattern}"))
        .collect();
    format!("({})", clauses.join(","))
}

/// Parameters for listing active customers, newest first.
pub fn customer_list(filters: &CustomerFilters) -> Params {
    let mut params: Params = vec![
        ("select", "*".to_string()),
        ("is_active", eq(true)),
        ("order", order_desc("created_at")),
    ];
    if let Some(customer_type) = filters.type_filter() {
        params.push(("customer_type", eq(customer_type)));
    }
    if let Some(term) = filters.search_term() {
        params.push(("or", customer_search(term)));
    }
    params
}

/// Parameters selecting a single row by primary key.
pub fn by_id(id: Uuid) -> Params {
    vec![("select", "*".to_string()), ("id", eq(id))]
}

/// Parameters for active outlets ordered by name.
pub fn active_outlets() -> Params {
    vec![
        ("select", "*".to_string()),
        ("is_active", eq(true)),
        ("order", order_asc("name")),
    ]
}

/// Parameters for a user's outlet assignments with the outlet embedded.
pub fn assigned_outlets(user_id: Uuid) -> Params {
    vec![
        ("select", ASSIGNMENT_SELECT.to_string()),
        ("user_id", eq(user_id)),
    ]
}

/// Parameters for a customer's orders, newest first.
pub fn customer_orders(customer_id: Uuid) -> Params {
    vec![
        ("select", ORDER_SELECT.to_string()),
        ("customer_id", eq(customer_id)),
        ("order", order_desc("created_at")),
    ]
}

/// Parameters for a customer's invoices, latest invoice date first.
pub fn customer_invoices(customer_id: Uuid) -> Params {
    vec![
        ("select", "*".to_string()),
        ("customer_id", eq(customer_id)),
        ("order", order_desc("invoice_date")),
    ]
}
