//! # Catalog
//!
//! Menu data the core prices against: pizzas, toppings and the size price
//! deltas. The core never mutates a catalog; it is handed one at startup.
//!
//! ## Catalog Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐        │
//! │  │     Pizza       │   │    Topping      │   │   SizeDeltas    │        │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │        │
//! │  │  id             │   │  id             │   │  S: -$2.00      │        │
//! │  │  name, rating   │   │  name           │   │  M:  $0.00      │        │
//! │  │  base_price     │   │  price          │   │  L: +$3.00      │        │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Prices are [`Money`] and serialize as integer cents, so a TOML menu writes
//! `base_price = 1500` for $15.00.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Pizza
// =============================================================================

/// A pizza on the menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Pizza {
    pub id: u32,
    pub name: String,
    /// Star rating shown on the menu card (0-5).
    pub rating: u8,
    /// Price of a medium pizza with no toppings.
    pub base_price: Money,
    #[serde(default)]
    pub image_url: String,
}

// =============================================================================
// Topping
// =============================================================================

/// An extra topping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Topping {
    pub id: u32,
    pub name: String,
    pub price: Money,
    #[serde(default)]
    pub image_url: String,
}

// =============================================================================
// Pizza Size
// =============================================================================

/// The three pizza sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum PizzaSize {
    S,
    /// Preselected when customization starts.
    #[default]
    M,
    L,
}

impl PizzaSize {
    /// All sizes in menu order.
    pub const ALL: [PizzaSize; 3] = [PizzaSize::S, PizzaSize::M, PizzaSize::L];
}

impl fmt::Display for PizzaSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PizzaSize::S => write!(f, "S"),
            PizzaSize::M => write!(f, "M"),
            PizzaSize::L => write!(f, "L"),
        }
    }
}

impl std::str::FromStr for PizzaSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "S" | "SMALL" => Ok(PizzaSize::S),
            "M" | "MEDIUM" => Ok(PizzaSize::M),
            "L" | "LARGE" => Ok(PizzaSize::L),
            other => Err(format!("Unknown size: '{}'. Valid options: S, M, L", other)),
        }
    }
}

// =============================================================================
// Size Deltas
// =============================================================================

/// Price adjustment per size, added to the pizza's base price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SizeDeltas {
    pub small: Money,
    pub medium: Money,
    pub large: Money,
}

impl SizeDeltas {
    /// Returns the delta for a size.
    #[inline]
    pub const fn delta(&self, size: PizzaSize) -> Money {
        match size {
            PizzaSize::S => self.small,
            PizzaSize::M => self.medium,
            PizzaSize::L => self.large,
        }
    }
}

impl Default for SizeDeltas {
    fn default() -> Self {
        SizeDeltas {
            small: Money::from_major(-2),
            medium: Money::zero(),
            large: Money::from_major(3),
        }
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// The full menu supplied to a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Catalog {
    pub pizzas: Vec<Pizza>,
    pub toppings: Vec<Topping>,
    #[serde(default)]
    pub size_deltas: SizeDeltas,
}

impl Catalog {
    /// Looks up a pizza by id.
    pub fn pizza(&self, id: u32) -> Option<&Pizza> {
        self.pizzas.iter().find(|p| p.id == id)
    }

    /// Looks up a topping by id.
    pub fn topping(&self, id: u32) -> Option<&Topping> {
        self.toppings.iter().find(|t| t.id == id)
    }

    /// Looks up a pizza, failing with [`CoreError::PizzaNotFound`].
    pub fn require_pizza(&self, id: u32) -> CoreResult<&Pizza> {
        self.pizza(id).ok_or(CoreError::PizzaNotFound(id))
    }

    /// Looks up a topping, failing with [`CoreError::ToppingNotFound`].
    pub fn require_topping(&self, id: u32) -> CoreResult<&Topping> {
        self.topping(id).ok_or(CoreError::ToppingNotFound(id))
    }
}

impl Default for Catalog {
    /// The house menu.
    fn default() -> Self {
        let pizza = |id, name: &str, rating, dollars, image: &str| Pizza {
            id,
            name: name.to_string(),
            rating,
            base_price: Money::from_major(dollars),
            image_url: format!(
                "https://images.unsplash.com/{}?ixlib=rb-4.0.3&q=85&fm=jpg&crop=entropy&cs=srgb&w=600",
                image
            ),
        };
        let topping = |id, name: &str, dollars, icon: &str| Topping {
            id,
            name: name.to_string(),
            price: Money::from_major(dollars),
            image_url: format!("https://img.icons8.com/plasticine/100/{}.png", icon),
        };

        Catalog {
            pizzas: vec![
                pizza(1, "New Orleans Pizza", 5, 15, "photo-1593560708920-61dd98c46a4e"),
                pizza(2, "Ham Pizza", 4, 12, "photo-1565299624946-b28f40a0ae38"),
                pizza(3, "Veggie Supreme", 4, 14, "photo-1574071318508-1cdbab80d002"),
                pizza(4, "Pepperoni Classic", 5, 13, "photo-1628840042765-356cda07504e"),
            ],
            toppings: vec![
                topping(1, "Mushrooms", 1, "mushroom"),
                topping(2, "Pepperoni", 2, "salami"),
                topping(3, "Olives", 1, "olives"),
                topping(4, "Onions", 1, "onion"),
                topping(5, "Bacon", 2, "bacon"),
                topping(6, "Peppers", 1, "paprika"),
            ],
            size_deltas: SizeDeltas::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_lookups() {
        let catalog = Catalog::default();
        assert_eq!(catalog.pizzas.len(), 4);
        assert_eq!(catalog.toppings.len(), 6);

        let ham = catalog.pizza(2).map(|p| p.name.as_str());
        assert_eq!(ham, Some("Ham Pizza"));
        assert_eq!(catalog.topping(5).map(|t| t.price), Some(Money::from_major(2)));
        assert!(catalog.pizza(99).is_none());
    }

    #[test]
    fn test_require_reports_missing_ids() {
        let catalog = Catalog::default();
        assert_eq!(catalog.require_pizza(7), Err(CoreError::PizzaNotFound(7)));
        assert_eq!(catalog.require_topping(0), Err(CoreError::ToppingNotFound(0)));
        assert!(catalog.require_pizza(1).is_ok());
    }

    #[test]
    fn test_size_deltas_default() {
        let deltas = SizeDeltas::default();
        assert_eq!(deltas.delta(PizzaSize::S), Money::from_major(-2));
        assert_eq!(deltas.delta(PizzaSize::M), Money::zero());
        assert_eq!(deltas.delta(PizzaSize::L), Money::from_major(3));
    }

    #[test]
    fn test_size_parse_and_default() {
        assert_eq!(PizzaSize::default(), PizzaSize::M);
        assert_eq!("l".parse::<PizzaSize>(), Ok(PizzaSize::L));
        assert_eq!("Small".parse::<PizzaSize>(), Ok(PizzaSize::S));
        assert!("XL".parse::<PizzaSize>().is_err());
    }

    #[test]
    fn test_catalog_json_uses_cents() {
        let catalog = Catalog::default();
        let json = serde_json::to_value(&catalog).unwrap();
        assert_eq!(json["pizzas"][0]["base_price"], 1500);
        assert_eq!(json["size_deltas"]["small"], -200);

        let back: Catalog = serde_json::from_value(json).unwrap();
        assert_eq!(back, catalog);
    }
}
