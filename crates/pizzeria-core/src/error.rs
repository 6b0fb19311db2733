//! # Error Types
//!
//! Domain-specific error types for pizzeria-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  pizzeria-core errors (this file)                                       │
//! │  ├── CoreError        - Refused finalization, unknown catalog ids       │
//! │  └── ValidationError  - Catalog data that breaks the menu rules         │
//! │                                                                         │
//! │  register errors (apps/register)                                        │
//! │  ├── ConfigError      - Unreadable or invalid register.toml             │
//! │  ├── TicketError      - Print/share surface failures                    │
//! │  └── ParseError       - Operator typed an unknown command               │
//! │                                                                         │
//! │  Session: every CoreError becomes a logged no-op, never a crash.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// No pizza with this id in the catalog.
    #[error("Pizza not found: {0}")]
    PizzaNotFound(u32),

    /// No topping with this id in the catalog.
    #[error("Topping not found: {0}")]
    ToppingNotFound(u32),

    /// The tender does not cover the total.
    ///
    /// ## When This Occurs
    /// - Charge pressed while the keypad shows less than the total
    /// - A finalize call made with an evaluation whose `can_charge` is false
    #[error("Insufficient tender: total {total}, received {received}")]
    InsufficientTender { total: Money, received: Money },

    /// The cart total moved after the payment was evaluated.
    ///
    /// ## When This Occurs
    /// ```text
    /// evaluate(total = $30.00) ──► can_charge = true
    ///      │
    ///      ▼
    /// cart.remove(...)          ──► cart total = $13.00
    ///      │
    ///      ▼
    /// finalize(...)             ──► StaleEvaluation { $30.00, $13.00 }
    /// ```
    #[error("Cart total changed since payment was evaluated: evaluated {evaluated}, current {current}")]
    StaleEvaluation { evaluated: Money, current: Money },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Catalog validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Duplicate value (e.g., two pizzas sharing an id).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },

    /// A size delta pushes a pizza below zero (e.g. $1.00 base, -$2.00 small).
    #[error("{pizza} ({size}) would cost {price}")]
    NegativeLinePrice {
        pizza: String,
        size: String,
        price: Money,
    },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientTender {
            total: Money::from_major(10),
            received: Money::from_cents(999),
        };
        assert_eq!(
            err.to_string(),
            "Insufficient tender: total $10.00, received $9.99"
        );
        assert_eq!(CoreError::PizzaNotFound(9).to_string(), "Pizza not found: 9");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "pizza.name".to_string(),
        };
        assert_eq!(err.to_string(), "pizza.name is required");

        let err = ValidationError::OutOfRange {
            field: "rating".to_string(),
            min: 0,
            max: 5,
        };
        assert_eq!(err.to_string(), "rating must be between 0 and 5");

        let err = ValidationError::NegativeLinePrice {
            pizza: "Slice".to_string(),
            size: "S".to_string(),
            price: Money::from_cents(-100),
        };
        assert_eq!(err.to_string(), "Slice (S) would cost -$1.00");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
