//! # Pricing
//!
//! Line prices and the customizer's topping selection.
//!
//! ```text
//! line_price = base_price + size_delta + Σ topping.price
//!
//! Ham Pizza (L) + Pepperoni   →   $12.00 + $3.00 + $2.00 = $17.00
//! ```

use serde::{Deserialize, Serialize};

use crate::catalog::{Pizza, PizzaSize, SizeDeltas, Topping};
use crate::money::Money;

/// Computes the price of one customized pizza.
///
/// Pure and infallible: the size is a closed enum and the toppings are
/// catalog members picked by the caller.
///
/// ## Example
/// ```rust
/// use pizzeria_core::catalog::{Catalog, PizzaSize};
/// use pizzeria_core::money::Money;
/// use pizzeria_core::pricing::line_price;
///
/// let catalog = Catalog::default();
/// let ham = catalog.pizza(2).unwrap();
/// let pepperoni = catalog.topping(2).unwrap().clone();
///
/// let price = line_price(ham, PizzaSize::L, &[pepperoni], &catalog.size_deltas);
/// assert_eq!(price, Money::from_major(17));
/// ```
pub fn line_price(
    pizza: &Pizza,
    size: PizzaSize,
    toppings: &[Topping],
    deltas: &SizeDeltas,
) -> Money {
    let toppings_price: Money = toppings.iter().map(|t| t.price).sum();
    pizza.base_price + deltas.delta(size) + toppings_price
}

// =============================================================================
// Topping Selection
// =============================================================================

/// Toppings picked in the customizer.
///
/// Keeps the order in which toppings were picked (that is the order printed
/// under the pizza) and never holds the same topping id twice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToppingSelection {
    toppings: Vec<Topping>,
}

impl ToppingSelection {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the topping if it is not selected, removes it if it is.
    ///
    /// Returns `true` when the topping is selected afterwards.
    pub fn toggle(&mut self, topping: &Topping) -> bool {
        if let Some(pos) = self.toppings.iter().position(|t| t.id == topping.id) {
            self.toppings.remove(pos);
            false
        } else {
            self.toppings.push(topping.clone());
            true
        }
    }

    /// Checks whether a topping id is selected.
    pub fn contains(&self, topping_id: u32) -> bool {
        self.toppings.iter().any(|t| t.id == topping_id)
    }

    /// Selected toppings in pick order.
    pub fn as_slice(&self) -> &[Topping] {
        &self.toppings
    }

    pub fn len(&self) -> usize {
        self.toppings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toppings.is_empty()
    }
}
