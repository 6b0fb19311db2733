//! # Receipt Aggregation
//!
//! Folds identical pizzas of a completed sale into one receipt line.
//!
//! ## Grouping
//! ```text
//! order:                                   groups:
//!   item-1  Pepperoni Classic M {1,3}  ──┐
//!   item-2  Ham Pizza L {2}             │   2x Pepperoni Classic (M) +Mushrooms, Olives
//!   item-3  Pepperoni Classic M {3,1}  ──┘   1x Ham Pizza (L) +Pepperoni
//!
//! key = (pizza id, size, sorted topping ids)
//! ```
//!
//! Groups come out in the order their key was first seen. The first line of a
//! group also fixes the group's displayed attributes and unit price; later
//! lines only bump the quantity. Two lines with the same key but different
//! frozen prices (possible only if the catalog changed mid-sale) are therefore
//! priced at the first line's price. That is the behavior receipts have always
//! had and it is kept as is.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use ts_rs::TS;

use crate::catalog::{Pizza, PizzaSize, Topping};
use crate::money::Money;
use crate::transaction::Transaction;

/// One printed receipt line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReceiptGroup {
    pub pizza: Pizza,
    pub size: PizzaSize,
    /// Toppings of the first line in the group, in pick order.
    pub toppings: Vec<Topping>,
    pub unit_price: Money,
    pub quantity: u32,
    /// `unit_price × quantity`
    pub subtotal: Money,
}

/// All receipt lines of a sale plus the header counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReceiptSummary {
    pub groups: Vec<ReceiptGroup>,
    /// Pizzas sold.
    pub total_quantity: usize,
    /// Distinct receipt lines.
    pub unique_groups: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct GroupKey {
    pizza_id: u32,
    size: PizzaSize,
    topping_ids: Vec<u32>,
}

/// Groups a transaction's lines for display and printing.
///
/// Pure: the transaction is not modified and calling this twice yields the
/// same summary.
pub fn group(transaction: &Transaction) -> ReceiptSummary {
    let mut index: HashMap<GroupKey, usize> = HashMap::new();
    let mut groups: Vec<ReceiptGroup> = Vec::new();

    for item in &transaction.order {
        let mut topping_ids: Vec<u32> = item.toppings.iter().map(|t| t.id).collect();
        topping_ids.sort_unstable();
        let key = GroupKey {
            pizza_id: item.pizza.id,
            size: item.size,
            topping_ids,
        };

        match index.get(&key).and_then(|&i| groups.get_mut(i)) {
            Some(existing) => {
                existing.quantity += 1;
                existing.subtotal = existing.unit_price.multiply_quantity(i64::from(existing.quantity));
            }
            None => {
                index.insert(key, groups.len());
                groups.push(ReceiptGroup {
                    pizza: item.pizza.clone(),
                    size: item.size,
                    toppings: item.toppings.clone(),
                    unit_price: item.total_price,
                    quantity: 1,
                    subtotal: item.total_price,
                });
            }
        }
    }

    ReceiptSummary {
        total_quantity: transaction.order.len(),
        unique_groups: groups.len(),
        groups,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::{Cart, LineItem};
    use crate::catalog::Catalog;
    use chrono::Utc;

    fn transaction(order: Vec<LineItem>) -> Transaction {
        let total = order.iter().map(|i| i.total_price).sum();
        Transaction {
            order,
            total,
            amount_received: total,
            change: Money::zero(),
            date: Utc::now(),
            ticket_number: 1,
        }
    }

    fn toppings(catalog: &Catalog, ids: &[u32]) -> Vec<Topping> {
        ids.iter().filter_map(|&id| catalog.topping(id).cloned()).collect()
    }

    #[test]
    fn test_identical_lines_fold_into_one_group() {
        let catalog = Catalog::default();
        let mut cart = Cart::new(catalog.size_deltas);
        let pizza = catalog.pizza(4).unwrap();
        cart.add(pizza, PizzaSize::M, &toppings(&catalog, &[1, 3]));
        cart.add(pizza, PizzaSize::M, &toppings(&catalog, &[1, 3]));
        cart.add(pizza, PizzaSize::M, &toppings(&catalog, &[1, 3, 5]));

        let summary = group(&transaction(cart.items().to_vec()));

        assert_eq!(summary.unique_groups, 2);
        assert_eq!(summary.total_quantity, 3);

        let first = &summary.groups[0];
        assert_eq!(first.quantity, 2);
        assert_eq!(first.unit_price, Money::from_major(15));
        assert_eq!(first.subtotal, Money::from_major(30));

        let second = &summary.groups[1];
        assert_eq!(second.quantity, 1);
        assert_eq!(second.subtotal, Money::from_major(17));
    }

    #[test]
    fn test_topping_pick_order_does_not_split_groups() {
        let catalog = Catalog::default();
        let mut cart = Cart::new(catalog.size_deltas);
        let pizza = catalog.pizza(4).unwrap();
        cart.add(pizza, PizzaSize::M, &toppings(&catalog, &[3, 1]));
        cart.add(pizza, PizzaSize::M, &toppings(&catalog, &[1, 3]));

        let summary = group(&transaction(cart.items().to_vec()));

        assert_eq!(summary.unique_groups, 1);
        // The first line's pick order is what gets printed.
        let names: Vec<&str> = summary.groups[0].toppings.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Olives", "Mushrooms"]);
    }

    #[test]
    fn test_size_splits_groups() {
        let catalog = Catalog::default();
        let mut cart = Cart::new(catalog.size_deltas);
        let pizza = catalog.pizza(1).unwrap();
        cart.add(pizza, PizzaSize::S, &[]);
        cart.add(pizza, PizzaSize::L, &[]);

        assert_eq!(group(&transaction(cart.items().to_vec())).unique_groups, 2);
    }

    #[test]
    fn test_groups_in_first_seen_order() {
        let catalog = Catalog::default();
        let mut cart = Cart::new(catalog.size_deltas);
        let a = catalog.pizza(2).unwrap();
        let b = catalog.pizza(3).unwrap();
        cart.add(a, PizzaSize::M, &[]);
        cart.add(b, PizzaSize::M, &[]);
        cart.add(a, PizzaSize::M, &[]);
        cart.add(b, PizzaSize::M, &[]);
        cart.add(a, PizzaSize::M, &[]);

        let summary = group(&transaction(cart.items().to_vec()));

        let order: Vec<(u32, u32)> = summary.groups.iter().map(|g| (g.pizza.id, g.quantity)).collect();
        assert_eq!(order, vec![(2, 3), (3, 2)]);
    }

    #[test]
    fn test_first_occurrence_price_governs_group() {
        let catalog = Catalog::default();
        let mut cart = Cart::new(catalog.size_deltas);
        let pizza = catalog.pizza(2).unwrap();
        cart.add(pizza, PizzaSize::M, &[]);

        let mut repriced = pizza.clone();
        repriced.base_price = Money::from_major(20);
        cart.add(&repriced, PizzaSize::M, &[]);

        let summary = group(&transaction(cart.items().to_vec()));

        assert_eq!(summary.unique_groups, 1);
        assert_eq!(summary.groups[0].unit_price, Money::from_major(12));
        assert_eq!(summary.groups[0].subtotal, Money::from_major(24));
    }

    #[test]
    fn test_grouping_is_idempotent() {
        let catalog = Catalog::default();
        let mut cart = Cart::new(catalog.size_deltas);
        for pizza in &catalog.pizzas {
            cart.add(pizza, PizzaSize::L, &toppings(&catalog, &[2]));
            cart.add(pizza, PizzaSize::L, &toppings(&catalog, &[2]));
        }
        let tx = transaction(cart.items().to_vec());
        let snapshot = tx.clone();

        assert_eq!(group(&tx), group(&tx));
        assert_eq!(tx, snapshot);
    }

    #[test]
    fn test_empty_order() {
        let summary = group(&transaction(Vec::new()));
        assert!(summary.groups.is_empty());
        assert_eq!(summary.total_quantity, 0);
        assert_eq!(summary.unique_groups, 0);
    }
}
