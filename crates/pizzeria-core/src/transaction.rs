//! # Transaction Finalizer
//!
//! Turns a paid cart into a completed sale record.
//!
//! ## Charge Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  evaluate(cart.total(), tender) ──► PaymentEvaluation                   │
//! │                                          │                              │
//! │                                          ▼                              │
//! │  finalize(cart, evaluation, counter, clock)                             │
//! │     1. can_charge?            no  ──► Err(InsufficientTender)           │
//! │     2. total unchanged?       no  ──► Err(StaleEvaluation)              │
//! │        (nothing mutated yet on either refusal)                          │
//! │     3. copy cart lines        ──► order                                 │
//! │     4. stamp date, ticket #   ──► counter + 1                           │
//! │     5. clear cart                                                       │
//! │                                          │                              │
//! │                                          ▼                              │
//! │  Transaction { order, total, amount_received, change, date, ticket # }  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use ts_rs::TS;

use crate::cart::{Cart, LineItem};
use crate::clock::Clock;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::payment::PaymentEvaluation;

// =============================================================================
// Ticket Counter
// =============================================================================

/// Process-wide ticket numbering: 1, 2, 3, ...
///
/// Lives as long as the session and is never persisted; a restarted register
/// starts again at 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketCounter {
    next: u64,
}

impl TicketCounter {
    pub fn new() -> Self {
        TicketCounter { next: 1 }
    }

    /// The number the next successful charge will receive.
    pub fn peek(&self) -> u64 {
        self.next
    }

    /// How many tickets have been issued.
    pub fn issued(&self) -> u64 {
        self.next - 1
    }

    fn issue(&mut self) -> u64 {
        let number = self.next;
        self.next += 1;
        number
    }
}

impl Default for TicketCounter {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Transaction
// =============================================================================

/// A completed sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Transaction {
    /// Cart lines at charge time, in cart order.
    pub order: Vec<LineItem>,
    pub total: Money,
    pub amount_received: Money,
    /// Never negative.
    pub change: Money,
    #[ts(as = "String")]
    pub date: DateTime<Utc>,
    pub ticket_number: u64,
}

impl Transaction {
    /// Number of pizzas sold.
    pub fn item_count(&self) -> usize {
        self.order.len()
    }
}

/// Completes a sale.
///
/// ## Errors
/// - [`CoreError::InsufficientTender`] when the evaluation cannot charge
/// - [`CoreError::StaleEvaluation`] when the cart total differs from the
///   total the evaluation was computed against
///
/// Only the total is compared, not the cart contents: swapping a line for
/// another at the same price keeps the evaluation valid, and the transaction
/// records the cart as it is at this call.
///
/// On either error the cart and counter are untouched. On success the cart is
/// empty and the counter has advanced by exactly one.
///
/// An empty cart is not refused here: with a zero total and a zero tender it
/// produces a zero transaction. The session refuses checkout of an empty cart
/// before a charge can be attempted.
pub fn finalize(
    cart: &mut Cart,
    evaluation: &PaymentEvaluation,
    counter: &mut TicketCounter,
    clock: &dyn Clock,
) -> CoreResult<Transaction> {
    if !evaluation.can_charge || evaluation.amount_received < evaluation.total {
        return Err(CoreError::InsufficientTender {
            total: evaluation.total,
            received: evaluation.amount_received,
        });
    }

    let current = cart.total();
    if current != evaluation.total {
        return Err(CoreError::StaleEvaluation {
            evaluated: evaluation.total,
            current,
        });
    }

    let transaction = Transaction {
        order: cart.items().to_vec(),
        total: current,
        amount_received: evaluation.amount_received,
        change: evaluation.amount_received - current,
        date: clock.now(),
        ticket_number: counter.issue(),
    };
    cart.clear();

    info!(
        ticket = transaction.ticket_number,
        total = %transaction.total,
        received = %transaction.amount_received,
        change = %transaction.change,
        items = transaction.item_count(),
        "Sale finalized"
    );

    Ok(transaction)
}
