//! # Validation Module
//!
//! Checks a catalog before a session prices against it.
//!
//! ## Where Validation Runs
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  register.toml [catalog] ──► serde ──► validate_catalog() ──► Session   │
//! │                                             │                           │
//! │                                             └── Err ──► register exits  │
//! │                                                 with a config error     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The default menu always passes; validation matters for menus loaded from
//! configuration.
//!
//! ## Usage
//! ```rust
//! use pizzeria_core::catalog::Catalog;
//! use pizzeria_core::validation::validate_catalog;
//!
//! assert!(validate_catalog(&Catalog::default()).is_ok());
//! ```

use std::collections::HashSet;

use crate::catalog::{Catalog, Pizza, PizzaSize, SizeDeltas};
use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest name printed on a receipt line.
pub const MAX_NAME_LEN: usize = 100;

/// Highest star rating.
pub const MAX_RATING: u8 = 5;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a pizza or topping name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - At most [`MAX_NAME_LEN`] characters
pub fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a star rating (0-5).
pub fn validate_rating(field: &str, rating: u8) -> ValidationResult<()> {
    if rating > MAX_RATING {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: i64::from(MAX_RATING),
        });
    }
    Ok(())
}

/// Validates a catalog price.
///
/// ## Rules
/// - Must be non-negative
/// - Zero is allowed (free toppings)
pub fn validate_price(field: &str, price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustBeNonNegative {
            field: field.to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Catalog Validator
// =============================================================================

/// Validates a whole catalog.
///
/// ## Rules
/// - At least one pizza
/// - Every name valid, every price non-negative, every rating 0-5
/// - Pizza ids unique among pizzas, topping ids unique among toppings
/// - Base price plus every size delta stays non-negative
///
/// Deltas themselves may be negative (the small size usually is); only the
/// resulting untopped price is checked. Toppings are non-negative, so no
/// topped line can fall below it.
pub fn validate_catalog(catalog: &Catalog) -> ValidationResult<()> {
    if catalog.pizzas.is_empty() {
        return Err(ValidationError::Required {
            field: "pizzas".to_string(),
        });
    }

    let mut seen = HashSet::new();
    for pizza in &catalog.pizzas {
        if !seen.insert(pizza.id) {
            return Err(ValidationError::Duplicate {
                field: "pizza.id".to_string(),
                value: pizza.id.to_string(),
            });
        }
        validate_name("pizza.name", &pizza.name)?;
        validate_rating("pizza.rating", pizza.rating)?;
        validate_price("pizza.base_price", pizza.base_price)?;
        validate_sized_prices(pizza, &catalog.size_deltas)?;
    }

    let mut seen = HashSet::new();
    for topping in &catalog.toppings {
        if !seen.insert(topping.id) {
            return Err(ValidationError::Duplicate {
                field: "topping.id".to_string(),
                value: topping.id.to_string(),
            });
        }
        validate_name("topping.name", &topping.name)?;
        validate_price("topping.price", topping.price)?;
    }

    Ok(())
}

/// Every size of `pizza` must price at zero or more.
fn validate_sized_prices(pizza: &Pizza, deltas: &SizeDeltas) -> ValidationResult<()> {
    for size in PizzaSize::ALL {
        let price = pizza.base_price + deltas.delta(size);
        if price.is_negative() {
            return Err(ValidationError::NegativeLinePrice {
                pizza: pizza.name.clone(),
                size: size.to_string(),
                price,
            });
        }
    }
    Ok(())
}
