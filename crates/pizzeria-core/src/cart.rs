//! # Cart
//!
//! The in-progress sale: an ordered list of customized pizzas.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Operator Action          Cart Method           Cart Change             │
//! │  ───────────────          ───────────           ───────────             │
//! │                                                                         │
//! │  Add to Cart ────────────► add() ─────────────► items.push(line)        │
//! │                                                                         │
//! │  Trash icon ─────────────► remove(id) ────────► items.retain(...)       │
//! │                                                                         │
//! │  Charge succeeds ────────► clear() ───────────► items.clear()           │
//! │                            (only via transaction::finalize)             │
//! │                                                                         │
//! │  Cart badge / total ─────► len(), total() ────► (read only)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Unlike a grocery cart, identical pizzas are NOT merged into one line with a
//! quantity: each "Add to Cart" is its own line item with its own id. Merging
//! happens only on the receipt (see [`crate::receipt`]).

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::{Pizza, PizzaSize, SizeDeltas, Topping};
use crate::ids::{IdGenerator, LineItemId, SequentialIds};
use crate::money::Money;
use crate::pricing::line_price;

/// One customized pizza in the cart.
///
/// ## Price Freezing
/// `total_price` is computed when the item is added and never recomputed,
/// even if the catalog is later swapped for one with different prices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    pub id: LineItemId,
    pub pizza: Pizza,
    pub size: PizzaSize,
    /// Distinct toppings, in the order they were picked.
    pub toppings: Vec<Topping>,
    pub total_price: Money,
}

/// The shopping cart.
///
/// ## Invariants
/// - Insertion order is display order
/// - No two items share an id
/// - `total()` is always the sum of the items' `total_price`
#[derive(Debug)]
pub struct Cart {
    items: Vec<LineItem>,
    size_deltas: SizeDeltas,
    ids: Box<dyn IdGenerator>,
}

impl Cart {
    /// Creates an empty cart using sequential ids.
    pub fn new(size_deltas: SizeDeltas) -> Self {
        Cart::with_ids(size_deltas, Box::new(SequentialIds::new()))
    }

    /// Creates an empty cart with a custom id scheme.
    pub fn with_ids(size_deltas: SizeDeltas, ids: Box<dyn IdGenerator>) -> Self {
        Cart {
            items: Vec::new(),
            size_deltas,
            ids,
        }
    }

    /// Prices a pizza and appends it as a new line item.
    ///
    /// Always succeeds. A topping passed twice is kept once (first position).
    pub fn add(&mut self, pizza: &Pizza, size: PizzaSize, toppings: &[Topping]) -> LineItem {
        let mut distinct: Vec<Topping> = Vec::with_capacity(toppings.len());
        for topping in toppings {
            if !distinct.iter().any(|t| t.id == topping.id) {
                distinct.push(topping.clone());
            }
        }

        let item = LineItem {
            id: self.ids.next_id(),
            pizza: pizza.clone(),
            size,
            total_price: line_price(pizza, size, &distinct, &self.size_deltas),
            toppings: distinct,
        };
        self.items.push(item.clone());
        item
    }

    /// Removes the line item with this id.
    ///
    /// An unknown id is a no-op and returns `None`.
    pub fn remove(&mut self, id: &LineItemId) -> Option<LineItem> {
        let pos = self.items.iter().position(|i| &i.id == id)?;
        Some(self.items.remove(pos))
    }

    /// Sum of all line prices.
    pub fn total(&self) -> Money {
        self.items.iter().map(|i| i.total_price).sum()
    }

    /// Empties the cart.
    ///
    /// Crate-private: the only caller is the charge path in
    /// [`crate::transaction::finalize`], which clears the cart together with
    /// issuing a ticket number.
    pub(crate) fn clear(&mut self) {
        self.items.clear();
    }

    /// Line items in display order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn get(&self, id: &LineItemId) -> Option<&LineItem> {
        self.items.iter().find(|i| &i.id == id)
    }

    /// Number of line items (the cart badge).
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
