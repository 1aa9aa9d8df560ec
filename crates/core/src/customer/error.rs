use thiserror::Error;

/// Errors raised while validating customer input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CustomerError {
    #[error("Unknown balance operation: {0}")]
    UnknownBalanceOperation(String),
    #[error("Balance adjustment amount cannot be negative")]
    NegativeAmount,
    #[error("Contact person cannot be empty")]
    EmptyContactPerson,
    #[error("Customer type cannot be empty")]
    EmptyCustomerType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_error_display() {
        assert_eq!(
            CustomerError::UnknownBalanceOperation("divide".to_string()).to_string(),
            "Unknown balance operation: divide"
        );
        assert_eq!(
            CustomerError::NegativeAmount.to_string(),
            "Balance adjustment amount cannot be negative"
        );
    }
}
