//! # Validation Module
//!
//! Input validation for the values the UI hands to the storefront: search
//! text, the price slider and the sign-in email.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: UI                                                           │
//! │  ├── Form controls (slider bounds, text inputs)                        │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Storefront command (Rust)                                    │
//! │  ├── Type validation (clap / serde parsing)                            │
//! │  └── THIS MODULE: value rules                                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Cart reducer                                                 │
//! │  ├── Quantity policy (below one is ignored, never an error)            │
//! │  └── Quantity cap (above 999 is ignored even if a caller skips Layer 2)│
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use techstore_core::validation::{validate_email, validate_search_query};
//!
//! assert_eq!(validate_search_query("  phone ").unwrap(), "phone");
//! assert!(validate_email("shopper@example.com").is_ok());
//! ```

use crate::error::ValidationError;
use crate::{MAX_ITEM_QUANTITY, MAX_SEARCH_QUERY_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest address accepted by the sign-in form.
const MAX_EMAIL_LEN: usize = 254;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (matches every product)
/// - Maximum 100 characters after trimming
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_SEARCH_QUERY_LEN {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_SEARCH_QUERY_LEN,
        });
    }

    Ok(query.to_string())
}

/// Validates the address used to sign in.
///
/// ## Rules
/// - Must not be empty
/// - At most 254 characters
/// - Exactly one `@` with text on both sides, and a `.` in the domain
///
/// Returns the trimmed address.
///
/// ## Example
/// ```rust
/// use techstore_core::validation::validate_email;
///
/// assert!(validate_email("a@b.co").is_ok());
/// assert!(validate_email("nobody").is_err());
/// assert!(validate_email("@example.com").is_err());
/// ```
pub fn validate_email(email: &str) -> ValidationResult<String> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    if email.len() > MAX_EMAIL_LEN {
        return Err(ValidationError::TooLong {
            field: "email".to_string(),
            max: MAX_EMAIL_LEN,
        });
    }

    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: reason.to_string(),
    };

    let (local, domain) = email
        .split_once('@')
        .ok_or_else(|| invalid("missing '@'"))?;

    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(invalid("expected name@domain"));
    }

    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err(invalid("domain must contain a dot"));
    }

    if email.chars().any(char::is_whitespace) {
        return Err(invalid("must not contain spaces"));
    }

    Ok(email.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price-filter ceiling in whole dollars.
///
/// ## Rules
/// - Must be between 0 and `limit` inclusive (the slider's range)
pub fn validate_max_price(dollars: i64, limit: i64) -> ValidationResult<()> {
    if !(0..=limit).contains(&dollars) {
        return Err(ValidationError::OutOfRange {
            field: "max price".to_string(),
            min: 0,
            max: limit,
        });
    }

    Ok(())
}

/// Validates a requested line quantity.
///
/// ## Rules
/// - At most [`MAX_ITEM_QUANTITY`]
/// - Values below one pass: the cart treats them as a no-op, not an error
///
/// ```rust
/// use techstore_core::validation::validate_quantity;
///
/// assert!(validate_quantity(999).is_ok());
/// assert!(validate_quantity(0).is_ok());
/// assert!(validate_quantity(1000).is_err());
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty > MAX_ITEM_QUANTITY {
        return Err(quantity_out_of_range());
    }

    Ok(())
}

/// The error reported when a line would exceed [`MAX_ITEM_QUANTITY`].
pub fn quantity_out_of_range() -> ValidationError {
    ValidationError::OutOfRange {
        field: "quantity".to_string(),
        min: 1,
        max: MAX_ITEM_QUANTITY,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_search_query() {
        assert_eq!(validate_search_query("").unwrap(), "");
        assert_eq!(validate_search_query("  MacBook  ").unwrap(), "MacBook");
        assert!(validate_search_query(&"a".repeat(100)).is_ok());
        assert!(validate_search_query(&"a".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert_eq!(validate_email(" shopper@example.com ").unwrap(), "shopper@example.com");

        assert!(matches!(
            validate_email("   "),
            Err(ValidationError::Required { .. })
        ));
        assert!(validate_email("shopper").is_err());
        assert!(validate_email("shopper@").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("a@b@example.com").is_err());
        assert!(validate_email("shopper@localhost").is_err());
        assert!(validate_email("shop per@example.com").is_err());
        assert!(validate_email(&format!("{}@example.com", "a".repeat(250))).is_err());
    }

    #[test]
    fn test_validate_max_price() {
        assert!(validate_max_price(0, 2000).is_ok());
        assert!(validate_max_price(2000, 2000).is_ok());
        assert!(validate_max_price(-1, 2000).is_err());
        assert!(validate_max_price(2001, 2000).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(MAX_ITEM_QUANTITY).is_ok());
        assert!(validate_quantity(-1).is_ok());

        for qty in [MAX_ITEM_QUANTITY + 1, i64::MAX] {
            let err = validate_quantity(qty).unwrap_err();
            assert_eq!(err.to_string(), "quantity must be between 1 and 999");
        }
    }
}
