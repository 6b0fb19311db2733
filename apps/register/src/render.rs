//! # Screen Rendering
//!
//! Draws the current session view as console text. Read-only: it never
//! changes the session.

use std::fmt::{Display, Write};

use chrono::TimeZone;
use pizzeria_core::session::Customization;
use pizzeria_core::{PizzaSize, Session, Transaction, View};

use crate::ticket::TicketRenderer;

/// Renders the screen for the session's current view.
pub fn render<Tz>(session: &Session, tickets: &TicketRenderer, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let rule = "=".repeat(tickets.width());
    let mut out = String::new();

    let _ = writeln!(out, "{}", rule);
    match session.view() {
        View::Ordering => ordering(&mut out, session),
        View::Customizing(c) => customizing(&mut out, session, c),
        View::CartOpen => cart(&mut out, session),
        View::Payment(tender) => payment(&mut out, session, tender.text()),
        View::Success(tx) => success(&mut out, tx),
        View::Ticket { transaction, .. } => {
            out.push_str(&tickets.render(transaction, tz));
            out.push_str("\n[print]  [share]  [close]\n");
        }
    }
    let _ = write!(out, "{}", rule);
    out
}

fn ordering(out: &mut String, session: &Session) {
    let _ = writeln!(out, "MENU                          Cart ({})", session.cart_count());
    for pizza in &session.catalog().pizzas {
        let _ = writeln!(
            out,
            "  {:>2}  {:<22} {:<5} {:>8}",
            pizza.id,
            pizza.name,
            stars(pizza.rating),
            pizza.base_price.to_string()
        );
    }
    out.push_str("\nType a pizza number, 'cart' or 'help'.\n");
}

fn customizing(out: &mut String, session: &Session, c: &Customization) {
    let deltas = &session.catalog().size_deltas;
    let _ = writeln!(out, "{}  {}", c.pizza().name, stars(c.pizza().rating));

    out.push_str("Size:");
    for size in PizzaSize::ALL {
        let label = if size == c.size() { format!("[{}]", size) } else { format!(" {} ", size) };
        let delta = deltas.delta(size);
        if delta.is_zero() {
            let _ = write!(out, "  {}", label);
        } else if delta.is_negative() {
            let _ = write!(out, "  {} {}", label, delta);
        } else {
            let _ = write!(out, "  {} +{}", label, delta);
        }
    }
    out.push('\n');

    out.push_str("Toppings:\n");
    for topping in &session.catalog().toppings {
        let mark = if c.toppings().contains(topping.id) { "x" } else { " " };
        let _ = writeln!(out, "  [{}] {:>2}  {:<14} +{}", mark, topping.id, topping.name, topping.price);
    }

    if c.is_added() {
        out.push_str("\n  Added!\n");
    } else {
        let _ = writeln!(out, "\n  Add to Cart  {}", c.price(deltas));
    }
}

fn cart(out: &mut String, session: &Session) {
    let cart = session.cart();
    out.push_str("YOUR ORDER\n");

    if cart.is_empty() {
        out.push_str("\n  Your cart is empty.\n\n[close]\n");
        return;
    }

    for (i, item) in cart.items().iter().enumerate() {
        let _ = writeln!(
            out,
            "  {:>2}. {} ({}) {:>12}",
            i + 1,
            item.pizza.name,
            item.size,
            item.total_price.to_string()
        );
        if !item.toppings.is_empty() {
            let names: Vec<&str> = item.toppings.iter().map(|t| t.name.as_str()).collect();
            let _ = writeln!(out, "      + {}", names.join(", "));
        }
    }
    let _ = writeln!(out, "\n  Total: {}", cart.total());
    out.push_str("\n[remove <n>]  [checkout]  [close]\n");
}

fn payment(out: &mut String, session: &Session, tendered: &str) {
    out.push_str("CASH PAYMENT\n");
    let Some(eval) = session.payment_evaluation() else {
        return;
    };

    let _ = writeln!(out, "  Total:     {}", eval.total);
    let shown = if tendered.is_empty() { "0" } else { tendered };
    let _ = writeln!(out, "  Received:  ${}", shown);
    match eval.change_due() {
        Some(change) => {
            let _ = writeln!(out, "  Change:    {}", change);
        }
        None => out.push_str("  Change:    insufficient\n"),
    }

    out.push_str("\n  Suggested:");
    for (i, amount) in session.suggestions().iter().enumerate() {
        let _ = write!(out, "  ({}) {}", i + 1, amount);
    }
    out.push('\n');

    let charge = if eval.can_charge { "[charge]" } else { "(charge)" };
    let _ = writeln!(out, "\n[<amount>]  [del]  [pick <n>]  {}  [back]", charge);
}

fn success(out: &mut String, tx: &Transaction) {
    out.push_str("PAYMENT SUCCESSFUL\n");
    let _ = writeln!(out, "  Ticket #{}", tx.ticket_number);
    let _ = writeln!(out, "  Total:     {}", tx.total);
    let _ = writeln!(out, "  Received:  {}", tx.amount_received);
    let _ = writeln!(out, "  Change:    {}", tx.change);
    out.push_str("\n[ticket]  [new]\n");
}

fn stars(rating: u8) -> String {
    "*".repeat(usize::from(rating))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pizzeria_core::{Catalog, Event, SessionTimings};
    use std::time::Duration;

    use crate::config::StoreConfig;

    fn tickets() -> TicketRenderer {
        TicketRenderer::new(StoreConfig::default(), 42)
    }

    fn screen(session: &Session) -> String {
        render(session, &tickets(), &Utc)
    }

    fn at(session: &mut Session, events: Vec<Event>) {
        for event in events {
            session.dispatch(Duration::ZERO, event);
        }
    }

    #[test]
    fn test_ordering_lists_menu_and_badge() {
        let session = Session::new(Catalog::default(), SessionTimings::default());
        let text = screen(&session);
        assert!(text.contains("Cart (0)"));
        assert!(text.contains("Ham Pizza"));
        assert!(text.contains("$15.00"));
    }

    #[test]
    fn test_customizer_shows_selection_and_live_price() {
        let mut session = Session::new(Catalog::default(), SessionTimings::default());
        at(
            &mut session,
            vec![Event::SelectPizza(2), Event::ChooseSize(PizzaSize::L), Event::ToggleTopping(2)],
        );

        let text = screen(&session);
        assert!(text.contains("[L]"));
        assert!(text.contains("[x]  2  Pepperoni"));
        assert!(text.contains("Add to Cart  $17.00"));

        at(&mut session, vec![Event::AddToCart]);
        assert!(screen(&session).contains("Added!"));
    }

    #[test]
    fn test_cart_lines_are_numbered() {
        let mut session = Session::new(Catalog::default(), SessionTimings::default());
        at(&mut session, vec![Event::OpenCart]);
        assert!(screen(&session).contains("Your cart is empty."));

        at(
            &mut session,
            vec![
                Event::CloseCart,
                Event::SelectPizza(3),
                Event::AddToCart,
                Event::OpenCart,
            ],
        );
        let text = screen(&session);
        assert!(text.contains(" 1. Veggie Supreme (M)"));
        assert!(text.contains("Total: $14.00"));
    }

    #[test]
    fn test_payment_shows_change_state() {
        let mut session = Session::new(Catalog::default(), SessionTimings::default());
        at(
            &mut session,
            vec![
                Event::SelectPizza(2),
                Event::AddToCart,
                Event::OpenCart,
                Event::Checkout,
                Event::Digit('5'),
            ],
        );
        let text = screen(&session);
        assert!(text.contains("Change:    insufficient"));
        assert!(text.contains("(1) $12.00  (2) $15.00  (3) $20.00"));
        assert!(text.contains("(charge)"));

        at(&mut session, vec![Event::PickSuggestion(2)]);
        let text = screen(&session);
        assert!(text.contains("Received:  $20.00"));
        assert!(text.contains("Change:    $8.00"));
        assert!(text.contains("[charge]"));
    }

    #[test]
    fn test_success_and_ticket_preview() {
        let mut session = Session::new(Catalog::default(), SessionTimings::default());
        at(
            &mut session,
            vec![
                Event::SelectPizza(1),
                Event::AddToCart,
                Event::OpenCart,
                Event::Checkout,
                Event::PickSuggestion(0),
                Event::Charge,
            ],
        );
        let text = screen(&session);
        assert!(text.contains("PAYMENT SUCCESSFUL"));
        assert!(text.contains("Ticket #1"));

        at(&mut session, vec![Event::ShowTicket]);
        let text = screen(&session);
        assert!(text.contains("1 items (Qty: 1)"));
        assert!(text.contains("[print]  [share]  [close]"));
    }
}
