//! # Ticket
//!
//! Plain-text tickets and the two places they go: the printer (stdout) and
//! the share folder.
//!
//! ## Layout (42 columns)
//! ```text
//! COMO EN CASA                            #1
//! Tolomosa S/N
//! Cashier: Mariano
//! ------------------------------------------
//! 2 items (Qty: 3)
//! ------------------------------------------
//! 2x Ham Pizza (L)                    $34.00
//!    $12.00
//!    + Pepperoni
//!
//! 1x New Orleans Pizza (S)            $13.00
//!    $15.00
//! ------------------------------------------
//! Subtotal:                           $47.00
//! Total:                              $47.00
//! Cash:                               $50.00
//! Change:                              $3.00
//! ------------------------------------------
//!           Thanks for your visit
//!         October 18, 2026 9:15 PM
//! ```
//!
//! The price under each pizza name is the menu base price; the right column is
//! the group subtotal.

use std::fmt::Display;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::TimeZone;
use pizzeria_core::receipt::{group, ReceiptGroup};
use pizzeria_core::Transaction;
use tracing::info;

use crate::config::StoreConfig;
use crate::error::TicketError;

const DATE_FORMAT: &str = "%B %d, %Y %-I:%M %p";
const INDENT: &str = "   ";

// =============================================================================
// Rendering
// =============================================================================

/// Renders tickets for one store on a fixed paper width.
#[derive(Debug, Clone)]
pub struct TicketRenderer {
    store: StoreConfig,
    width: usize,
}

impl TicketRenderer {
    pub fn new(store: StoreConfig, width: usize) -> Self {
        TicketRenderer { store, width }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Renders a ticket, showing the sale date in `tz`.
    pub fn render<Tz>(&self, transaction: &Transaction, tz: &Tz) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let summary = group(transaction);
        let rule = "-".repeat(self.width);
        let mut lines: Vec<String> = Vec::new();

        lines.push(self.columns(
            &self.store.name.to_uppercase(),
            &format!("#{}", transaction.ticket_number),
        ));
        lines.extend(self.store.address.iter().cloned());
        lines.push(format!("Cashier: {}", self.store.cashier));

        lines.push(rule.clone());
        lines.push(format!(
            "{} items (Qty: {})",
            summary.unique_groups, summary.total_quantity
        ));
        lines.push(rule.clone());

        for (i, receipt_group) in summary.groups.iter().enumerate() {
            if i > 0 {
                lines.push(String::new());
            }
            self.push_group(&mut lines, receipt_group);
        }

        lines.push(rule.clone());
        lines.push(self.columns("Subtotal:", &transaction.total.to_string()));
        lines.push(self.columns("Total:", &transaction.total.to_string()));
        lines.push(self.columns("Cash:", &transaction.amount_received.to_string()));
        lines.push(self.columns("Change:", &transaction.change.to_string()));
        lines.push(rule);

        let date = transaction.date.with_timezone(tz).format(DATE_FORMAT).to_string();
        lines.push(self.centered(&self.store.footer));
        lines.push(self.centered(&date));

        let mut text = lines.join("\n");
        text.push('\n');
        text
    }

    fn push_group(&self, lines: &mut Vec<String>, g: &ReceiptGroup) {
        let title = format!("{}x {} ({})", g.quantity, g.pizza.name, g.size);
        lines.push(self.columns(&title, &g.subtotal.to_string()));
        lines.push(format!("{}{}", INDENT, g.pizza.base_price));

        if !g.toppings.is_empty() {
            let names: Vec<&str> = g.toppings.iter().map(|t| t.name.as_str()).collect();
            let text = format!("+ {}", names.join(", "));
            for line in wrap(&text, self.width.saturating_sub(INDENT.len() + 2)) {
                lines.push(format!("{}{}", INDENT, line));
            }
        }
    }

    /// `left` flush left, `right` flush right; `left` is cut to fit.
    fn columns(&self, left: &str, right: &str) -> String {
        let right_len = right.chars().count();
        let room = self.width.saturating_sub(right_len + 1);
        let left: String = left.chars().take(room).collect();
        let gap = self.width.saturating_sub(left.chars().count() + right_len).max(1);
        format!("{}{}{}", left, " ".repeat(gap), right)
    }

    fn centered(&self, text: &str) -> String {
        let len = text.chars().count();
        if len >= self.width {
            return text.to_string();
        }
        format!("{}{}", " ".repeat((self.width - len) / 2), text)
    }
}

/// Greedy word wrap. Continuation lines are indented by two spaces so they
/// line up after the leading `+ `.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(8);
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let len = current.chars().count();
        if current.trim().is_empty() {
            current.push_str(word);
        } else if len + 1 + word.chars().count() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str("  ");
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

// =============================================================================
// Surfaces
// =============================================================================

/// Sends tickets to a line printer. The register uses stdout.
#[derive(Debug)]
pub struct PrintSurface<W: Write> {
    out: W,
}

impl<W: Write> PrintSurface<W> {
    pub fn new(out: W) -> Self {
        PrintSurface { out }
    }

    pub fn print(&mut self, ticket_number: u64, text: &str) -> Result<(), TicketError> {
        self.out
            .write_all(text.as_bytes())
            .and_then(|_| self.out.flush())
            .map_err(TicketError::Print)?;
        info!(ticket = ticket_number, "Ticket printed");
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Saves tickets as `ticket-<n>.txt` so they can be sent on.
#[derive(Debug, Clone)]
pub struct ShareSurface {
    dir: PathBuf,
}

impl ShareSurface {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        ShareSurface { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes the ticket and returns the file path. Sharing the same ticket
    /// twice overwrites the earlier file.
    pub fn share(&self, ticket_number: u64, text: &str) -> Result<PathBuf, TicketError> {
        std::fs::create_dir_all(&self.dir).map_err(|source| TicketError::CreateDir {
            path: self.dir.clone(),
            source,
        })?;

        let path = self.dir.join(format!("ticket-{}.txt", ticket_number));
        std::fs::write(&path, text).map_err(|source| TicketError::Write {
            path: path.clone(),
            source,
        })?;

        info!(ticket = ticket_number, ?path, "Ticket shared");
        Ok(path)
    }
}
