//! # Payment
//!
//! Cash tender entry, change calculation and suggested bills.
//!
//! ## Tender Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Keypad: 2 ──► 0 ──► . ──► 5                                            │
//! │                 │                                                       │
//! │                 ▼                                                       │
//! │  TenderInput.text() = "20.5"                                            │
//! │                 │                                                       │
//! │                 ▼                                                       │
//! │  evaluate(total = $17.00, "20.5")                                       │
//! │     amount_received = $20.50                                            │
//! │     change          = $3.50                                             │
//! │     can_charge      = true   ──► Charge button enabled                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here fails: incomplete or empty input counts as $0.00 until the
//! operator fixes it.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

/// Fractional digits the keypad accepts after the decimal point.
pub const MAX_FRACTION_DIGITS: usize = 2;

/// Most tender suggestions shown at once.
pub const MAX_SUGGESTIONS: usize = 3;

// =============================================================================
// Tender Input
// =============================================================================

/// The keypad buffer on the payment screen.
///
/// Only ever holds ASCII digits and at most one `.`, with at most two digits
/// after it. The integer part is unbounded apart from the money range.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenderInput {
    text: String,
}

impl TenderInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a digit.
    ///
    /// Returns `false` when the key is ignored:
    /// - not an ASCII digit
    /// - two digits already follow the decimal point
    /// - the amount would no longer fit in [`Money`]
    ///
    /// A buffer holding a lone `0` is replaced by the next non-zero digit.
    pub fn push_digit(&mut self, digit: char) -> bool {
        if !digit.is_ascii_digit() {
            return false;
        }

        if self.text == "0" && digit != '0' {
            self.text = digit.to_string();
            return true;
        }

        if let Some((_, frac)) = self.text.split_once('.') {
            if frac.len() >= MAX_FRACTION_DIGITS {
                return false;
            }
        }

        let mut candidate = self.text.clone();
        candidate.push(digit);
        if Money::parse_decimal(&candidate).is_none() {
            return false;
        }

        self.text = candidate;
        true
    }

    /// Appends the decimal point.
    ///
    /// Ignored when one is already present. On an empty buffer it produces
    /// `0.`.
    pub fn push_decimal_point(&mut self) -> bool {
        if self.text.contains('.') {
            return false;
        }
        if self.text.is_empty() {
            self.text.push('0');
        }
        self.text.push('.');
        true
    }

    /// Deletes the last character. Returns `false` on an empty buffer.
    pub fn backspace(&mut self) -> bool {
        self.text.pop().is_some()
    }

    /// Overwrites the buffer with an amount (a picked suggestion).
    pub fn set_amount(&mut self, amount: Money) {
        self.text = amount.to_decimal_string();
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// The buffer as typed.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The buffer's value; empty or incomplete input is zero.
    pub fn amount(&self) -> Money {
        parse_tender(&self.text)
    }
}

/// Parses tender text, treating anything unparseable as zero.
pub fn parse_tender(text: &str) -> Money {
    Money::parse_decimal(text).unwrap_or_default()
}

// =============================================================================
// Evaluation
// =============================================================================

/// Result of checking a tender against a total.
///
/// `change` is only meaningful when `can_charge` is true; while the tender is
/// short it is negative and must not be shown as change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PaymentEvaluation {
    /// The total this evaluation was computed against.
    pub total: Money,
    pub amount_received: Money,
    pub change: Money,
    pub can_charge: bool,
}

impl PaymentEvaluation {
    /// Change to hand back, or `None` while the tender is short.
    pub fn change_due(&self) -> Option<Money> {
        self.can_charge.then_some(self.change)
    }
}

/// Evaluates tender text against a total.
///
/// Exact payment is allowed (`can_charge` is inclusive).
///
/// ## Example
/// ```rust
/// use pizzeria_core::money::Money;
/// use pizzeria_core::payment::evaluate;
///
/// let eval = evaluate(Money::from_major(10), "10");
/// assert!(eval.can_charge);
/// assert_eq!(eval.change, Money::zero());
///
/// assert!(!evaluate(Money::from_major(10), "9.99").can_charge);
/// ```
pub fn evaluate(total: Money, tendered_text: &str) -> PaymentEvaluation {
    let amount_received = parse_tender(tendered_text);
    PaymentEvaluation {
        total,
        amount_received,
        change: amount_received - total,
        can_charge: amount_received >= total,
    }
}

// =============================================================================
// Suggestions
// =============================================================================

/// Quick-pick tender amounts for a total, ascending, at most three.
///
/// ## Rules
/// ```text
/// exact   = total                          always offered
/// next_5  = total rounded up to $5         offered if > total and != next_10
/// next_10 = total rounded up to $10        offered if > total and > next_5
///
/// $12.00 → [$12.00, $15.00, $20.00]
/// $10.00 → [$10.00]
/// $16.00 → [$16.00]            (next_5 == next_10 == $20.00, both dropped)
/// ```
pub fn suggested_tenders(total: Money) -> Vec<Money> {
    let next_5 = total.next_multiple_of(500);
    let next_10 = total.next_multiple_of(1000);

    let mut suggestions = vec![total];
    if next_5 > total && next_5 != next_10 {
        suggestions.push(next_5);
    }
    if next_10 > total && next_10 > next_5 {
        suggestions.push(next_10);
    }

    suggestions.dedup();
    suggestions.truncate(MAX_SUGGESTIONS);
    suggestions
}
