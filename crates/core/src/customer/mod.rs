mod error;
mod operations;
mod requests;
mod types;

pub use error::CustomerError;
pub use operations::{
    apply_balance_change, apply_customer_patch, filter_customers, generate_customer_code,
    matches_filters, matches_search, materialize_customer, validate_balance_amount,
    validate_create_request,
};
pub use requests::{
    CreateCustomerRequest, CustomerFilters, CustomerPatch, NewCustomer, UpdateCustomerRequest,
    ALL_CUSTOMER_TYPES,
};
pub use types::{
    BalanceOperation, Customer, InventoryItem, Invoice, RentalOrder, RentalOrderItem,
};
