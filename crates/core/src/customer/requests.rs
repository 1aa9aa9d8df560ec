use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Sentinel customer type meaning "do not filter by type".
pub const ALL_CUSTOMER_TYPES: &str = "all";

/// Filters for listing customers.
///
/// Categories combine with AND; the search term matches any of the contact
/// fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl CustomerFilters {
    /// Filter by exact customer type.
    pub fn with_type(mut self, customer_type: impl Into<String>) -> Self {
        self.customer_type = Some(customer_type.into());
        self
    }

    /// Filter by free-text search.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// The type to filter on, or `None` when the filter is absent, blank or
    /// the `all` sentinel.
    pub fn type_filter(&self) -> Option<&str> {
        self.customer_type
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty() && *t != ALL_CUSTOMER_TYPES)
    }

    /// The trimmed search term, or `None` when blank.
    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

/// Caller input for creating a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCustomerRequest {
    pub customer_type: String,
    pub contact_person: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl CreateCustomerRequest {
    pub fn new(customer_type: impl Into<String>, contact_person: impl Into<String>) -> Self {
        Self {
            customer_type: customer_type.into(),
            contact_person: contact_person.into(),
            company_name: None,
            phone: None,
            email: None,
            address: None,
            city: None,
            notes: None,
        }
    }

    pub fn with_company_name(mut self, company_name: impl Into<String>) -> Self {
        self.company_name = Some(company_name.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// Row to insert: the caller's input plus generated fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCustomer {
    pub customer_code: String,
    #[serde(flatten)]
    pub details: CreateCustomerRequest,
    pub created_by: Option<Uuid>,
}

/// Partial update of a customer. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateCustomerRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_person: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl UpdateCustomerRequest {
    /// Update that only flips the soft-delete flag off.
    pub fn deactivate() -> Self {
        Self {
            is_active: Some(false),
            ..Self::default()
        }
    }

    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Patch sent to storage: the requested changes stamped with `updated_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerPatch {
    #[serde(flatten)]
    pub changes: UpdateCustomerRequest,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_type_is_not_a_filter() {
        let filters = CustomerFilters::default().with_type("all");
        assert_eq!(filters.type_filter(), None);
    }

    #[test]
    fn all_sentinel_is_case_sensitive() {
        let filters = CustomerFilters::default().with_type("ALL");
        assert_eq!(filters.type_filter(), Some("ALL"));
    }

    #[test]
    fn concrete_type_is_a_filter() {
        let filters = CustomerFilters::default().with_type("business");
        assert_eq!(filters.type_filter(), Some("business"));
    }

    #[test]
    fn blank_search_is_not_a_filter() {
        let filters = CustomerFilters::default().with_search("   ");
        assert_eq!(filters.search_term(), None);
    }

    #[test]
    fn patch_serializes_only_changed_fields() {
        let patch = CustomerPatch {
            changes: UpdateCustomerRequest {
                phone: Some("555-0199".to_string()),
                ..Default::default()
            },
            updated_at: "2024-05-01T12:00:00Z".parse().unwrap(),
        };

        let value = serde_json::to_value(&patch).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), 2);
        assert_eq!(object["phone"], "555-0199");
        assert!(object.contains_key("updated_at"));
    }

    #[test]
    fn deactivate_only_sets_is_active() {
        let changes = UpdateCustomerRequest::deactivate();
        assert_eq!(changes.is_active, Some(false));
        assert!(!changes.is_empty());
        assert!(UpdateCustomerRequest::default().is_empty());
    }
}
