//! # Session (View Controller)
//!
//! One register, one operator, one sale at a time. The session owns the cart,
//! the ticket counter and the screen currently shown, and is the only thing
//! that moves between screens.
//!
//! ## Screens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   ┌──────────┐  select pizza   ┌─────────────┐                          │
//! │   │ Ordering │ ──────────────► │ Customizing │                          │
//! │   │          │ ◄────────────── │             │  back / auto-return      │
//! │   └──────────┘                 └─────────────┘                          │
//! │     │    ▲                          │                                   │
//! │ open│    │close        open cart    │                                   │
//! │     ▼    │ ◄────────────────────────┘                                   │
//! │   ┌──────────┐  checkout (cart not empty)   ┌─────────┐                 │
//! │   │ CartOpen │ ───────────────────────────► │ Payment │ ── back ──►     │
//! │   └──────────┘                              └─────────┘    Ordering     │
//! │                                                  │ charge (can_charge)  │
//! │                                                  ▼                      │
//! │   Ordering ◄── new sale ──┌─────────┐ show ticket ┌────────┐            │
//! │                           │ Success │ ──────────► │ Ticket │            │
//! │                           │         │ ◄────────── │        │            │
//! │                           └─────────┘    close    └────────┘            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Any other event on any screen is ignored (logged at debug level). Nothing
//! here returns an error to the operator.
//!
//! ## Time
//! Every entry point takes `now`, the time elapsed since the session
//! started. Deferred actions (auto-return, print) due by `now` run before the
//! event is handled.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::cart::Cart;
use crate::catalog::{Catalog, Pizza, PizzaSize, SizeDeltas};
use crate::clock::{Clock, SystemClock};
use crate::error::CoreResult;
use crate::ids::{IdGenerator, LineItemId, SequentialIds};
use crate::money::Money;
use crate::payment::{evaluate, suggested_tenders, PaymentEvaluation, TenderInput};
use crate::pricing::{line_price, ToppingSelection};
use crate::schedule::{DeferredAction, Scheduler, TaskHandle};
use crate::transaction::{finalize, TicketCounter, Transaction};
use crate::validation::validate_catalog;

// =============================================================================
// Timings
// =============================================================================

/// Presentation delays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTimings {
    /// How long "Added!" stays on screen before the customizer closes.
    pub auto_return_delay: Duration,
    /// Pause between pressing Print and the print job starting.
    pub print_delay: Duration,
}

impl Default for SessionTimings {
    fn default() -> Self {
        SessionTimings {
            auto_return_delay: Duration::from_millis(1500),
            print_delay: Duration::from_millis(100),
        }
    }
}

// =============================================================================
// Views
// =============================================================================

/// The customizer sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customization {
    pizza: Pizza,
    size: PizzaSize,
    toppings: ToppingSelection,
    added: bool,
    return_task: Option<TaskHandle>,
}

impl Customization {
    fn new(pizza: Pizza) -> Self {
        Customization {
            pizza,
            size: PizzaSize::default(),
            toppings: ToppingSelection::new(),
            added: false,
            return_task: None,
        }
    }

    pub fn pizza(&self) -> &Pizza {
        &self.pizza
    }

    pub fn size(&self) -> PizzaSize {
        self.size
    }

    pub fn toppings(&self) -> &ToppingSelection {
        &self.toppings
    }

    /// True once "Add to Cart" was pressed; the sheet is locked until it
    /// closes.
    pub fn is_added(&self) -> bool {
        self.added
    }

    /// Live price shown on the Add to Cart button.
    pub fn price(&self, deltas: &SizeDeltas) -> Money {
        line_price(&self.pizza, self.size, self.toppings.as_slice(), deltas)
    }
}

/// The screen currently shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Ordering,
    Customizing(Customization),
    CartOpen,
    Payment(TenderInput),
    Success(Transaction),
    Ticket {
        transaction: Transaction,
        print_task: Option<TaskHandle>,
    },
}

/// Screen without its data, for logging and quick matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewKind {
    Ordering,
    Customizing,
    CartOpen,
    Payment,
    Success,
    Ticket,
}

impl View {
    pub fn kind(&self) -> ViewKind {
        match self {
            View::Ordering => ViewKind::Ordering,
            View::Customizing(_) => ViewKind::Customizing,
            View::CartOpen => ViewKind::CartOpen,
            View::Payment(_) => ViewKind::Payment,
            View::Success(_) => ViewKind::Success,
            View::Ticket { .. } => ViewKind::Ticket,
        }
    }

    /// The completed sale shown on Success / Ticket.
    pub fn transaction(&self) -> Option<&Transaction> {
        match self {
            View::Success(transaction) | View::Ticket { transaction, .. } => Some(transaction),
            _ => None,
        }
    }
}

// =============================================================================
// Events & Effects
// =============================================================================

/// Operator input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    SelectPizza(u32),
    ChooseSize(PizzaSize),
    ToggleTopping(u32),
    AddToCart,
    /// Leave the customizer or the payment screen.
    Back,
    OpenCart,
    CloseCart,
    RemoveItem(LineItemId),
    Checkout,
    Digit(char),
    DecimalPoint,
    Backspace,
    /// Pick the n-th entry of [`Session::suggestions`].
    PickSuggestion(usize),
    Charge,
    NewSale,
    ShowTicket,
    CloseTicket,
    Print,
    Share,
}

/// Work for the surfaces outside the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send this ticket to the printer.
    Print(Transaction),
    /// Hand this ticket to the share surface.
    Share(Transaction),
}

// =============================================================================
// Session
// =============================================================================

/// A register session.
#[derive(Debug)]
pub struct Session {
    catalog: Catalog,
    cart: Cart,
    counter: TicketCounter,
    view: View,
    scheduler: Scheduler,
    timings: SessionTimings,
    clock: Box<dyn Clock>,
}

impl Session {
    /// Validates `catalog`, then creates a session with the system clock and
    /// sequential line ids.
    ///
    /// ## Errors
    /// [`CoreError::Validation`](crate::error::CoreError::Validation) when the catalog breaks the menu rules, for
    /// example a size that prices a pizza below zero.
    pub fn open(catalog: Catalog, timings: SessionTimings) -> CoreResult<Self> {
        validate_catalog(&catalog)?;
        Ok(Session::new(catalog, timings))
    }

    /// Creates a session with the system clock and sequential line ids.
    ///
    /// The catalog is trusted as given; use [`Session::open`] for menus that
    /// have not been through [`validate_catalog`].
    pub fn new(catalog: Catalog, timings: SessionTimings) -> Self {
        Session::with_parts(catalog, timings, Box::new(SystemClock), Box::new(SequentialIds::new()))
    }

    /// Creates a session with injected clock and id generator.
    ///
    /// Like [`Session::new`], this does not validate the catalog.
    pub fn with_parts(
        catalog: Catalog,
        timings: SessionTimings,
        clock: Box<dyn Clock>,
        ids: Box<dyn IdGenerator>,
    ) -> Self {
        Session {
            cart: Cart::with_ids(catalog.size_deltas, ids),
            catalog,
            counter: TicketCounter::new(),
            view: View::Ordering,
            scheduler: Scheduler::new(),
            timings,
            clock,
        }
    }

    // -------------------------------------------------------------------------
    // Read access for the rendering surface
    // -------------------------------------------------------------------------

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Number shown on the cart badge.
    pub fn cart_count(&self) -> usize {
        self.cart.len()
    }

    pub fn tickets_issued(&self) -> u64 {
        self.counter.issued()
    }

    pub fn timings(&self) -> SessionTimings {
        self.timings
    }

    /// Current tender evaluation, while on the payment screen.
    pub fn payment_evaluation(&self) -> Option<PaymentEvaluation> {
        match &self.view {
            View::Payment(tender) => Some(evaluate(self.cart.total(), tender.text())),
            _ => None,
        }
    }

    /// Quick-pick tender amounts, while on the payment screen.
    pub fn suggestions(&self) -> Vec<Money> {
        match &self.view {
            View::Payment(_) => suggested_tenders(self.cart.total()),
            _ => Vec::new(),
        }
    }

    /// When the next deferred action is due.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.scheduler.next_deadline()
    }

    // -------------------------------------------------------------------------
    // Input
    // -------------------------------------------------------------------------

    /// Runs deferred actions due by `now`.
    pub fn advance(&mut self, now: Duration) -> Vec<Effect> {
        let mut effects = Vec::new();

        for (handle, action) in self.scheduler.take_due(now) {
            let owned = match &self.view {
                View::Customizing(c) => c.return_task == Some(handle),
                View::Ticket { print_task, .. } => *print_task == Some(handle),
                _ => false,
            };
            if !owned {
                // Leaving a view cancels its tasks, so this should not happen.
                warn!(?action, view = ?self.view.kind(), "Stale deferred action dropped");
                continue;
            }

            match &mut self.view {
                View::Customizing(_) => {
                    debug!("Auto-return to ordering");
                    self.view = View::Ordering;
                }
                View::Ticket { transaction, print_task } => {
                    *print_task = None;
                    info!(ticket = transaction.ticket_number, "Printing ticket");
                    effects.push(Effect::Print(transaction.clone()));
                }
                _ => {}
            }
        }

        effects
    }

    /// Handles one operator event.
    pub fn dispatch(&mut self, now: Duration, event: Event) -> Vec<Effect> {
        let mut effects = self.advance(now);
        let from = self.view.kind();

        let handled = match event.clone() {
            Event::SelectPizza(id) => self.select_pizza(id),
            Event::ChooseSize(size) => self.with_open_customizer(|c| {
                c.size = size;
                true
            }),
            Event::ToggleTopping(id) => self.toggle_topping(id),
            Event::AddToCart => self.add_to_cart(now),
            Event::Back => self.back(),
            Event::OpenCart => self.open_cart(),
            Event::CloseCart => self.transition_from(ViewKind::CartOpen, View::Ordering),
            Event::RemoveItem(id) => {
                matches!(self.view, View::CartOpen) && self.cart.remove(&id).is_some()
            }
            Event::Checkout => self.checkout(),
            Event::Digit(digit) => self.with_tender(|t| t.push_digit(digit)),
            Event::DecimalPoint => self.with_tender(TenderInput::push_decimal_point),
            Event::Backspace => self.with_tender(TenderInput::backspace),
            Event::PickSuggestion(index) => match self.suggestions().get(index).copied() {
                Some(amount) => self.with_tender(|t| {
                    t.set_amount(amount);
                    true
                }),
                None => false,
            },
            Event::Charge => self.charge(),
            Event::NewSale => self.transition_from(ViewKind::Success, View::Ordering),
            Event::ShowTicket => self.show_ticket(),
            Event::CloseTicket => self.close_ticket(),
            Event::Print => self.print(now),
            Event::Share => match &self.view {
                View::Ticket { transaction, .. } => {
                    effects.push(Effect::Share(transaction.clone()));
                    true
                }
                _ => false,
            },
        };

        if handled {
            debug!(?event, ?from, to = ?self.view.kind(), "Event handled");
        } else {
            debug!(?event, view = ?from, "Event ignored");
        }

        effects
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    /// Replaces the view, cancelling whatever the old view had scheduled.
    fn set_view(&mut self, next: View) -> View {
        match &self.view {
            View::Customizing(Customization {
                return_task: Some(handle),
                ..
            })
            | View::Ticket {
                print_task: Some(handle),
                ..
            } => {
                self.scheduler.cancel(*handle);
            }
            _ => {}
        }
        std::mem::replace(&mut self.view, next)
    }

    fn transition_from(&mut self, from: ViewKind, to: View) -> bool {
        if self.view.kind() != from {
            return false;
        }
        self.set_view(to);
        true
    }

    fn select_pizza(&mut self, id: u32) -> bool {
        if !matches!(self.view, View::Ordering) {
            return false;
        }
        let pizza = match self.catalog.require_pizza(id) {
            Ok(pizza) => pizza.clone(),
            Err(err) => {
                debug!(%err, "Pizza selection ignored");
                return false;
            }
        };
        self.set_view(View::Customizing(Customization::new(pizza)));
        true
    }

    fn toggle_topping(&mut self, id: u32) -> bool {
        let topping = match self.catalog.require_topping(id) {
            Ok(topping) => topping.clone(),
            Err(err) => {
                debug!(%err, "Topping toggle ignored");
                return false;
            }
        };
        self.with_open_customizer(|c| {
            c.toppings.toggle(&topping);
            true
        })
    }

    /// Edits the customizer unless it is locked after an add.
    fn with_open_customizer(&mut self, edit: impl FnOnce(&mut Customization) -> bool) -> bool {
        match &mut self.view {
            View::Customizing(c) if !c.added => edit(c),
            _ => false,
        }
    }

    fn add_to_cart(&mut self, now: Duration) -> bool {
        let View::Customizing(c) = &mut self.view else {
            return false;
        };
        if c.added {
            return false;
        }

        let item = self.cart.add(&c.pizza, c.size, c.toppings.as_slice());
        c.added = true;
        c.return_task = Some(self.scheduler.schedule(
            now,
            self.timings.auto_return_delay,
            DeferredAction::ReturnToOrdering,
        ));

        info!(
            id = %item.id,
            pizza = %item.pizza.name,
            size = %item.size,
            toppings = item.toppings.len(),
            price = %item.total_price,
            "Added to cart"
        );
        true
    }

    fn back(&mut self) -> bool {
        match self.view.kind() {
            ViewKind::Customizing | ViewKind::Payment => {
                self.set_view(View::Ordering);
                true
            }
            _ => false,
        }
    }

    fn open_cart(&mut self) -> bool {
        match self.view.kind() {
            ViewKind::Ordering | ViewKind::Customizing => {
                self.set_view(View::CartOpen);
                true
            }
            _ => false,
        }
    }

    fn checkout(&mut self) -> bool {
        if !matches!(self.view, View::CartOpen) || self.cart.is_empty() {
            return false;
        }
        self.set_view(View::Payment(TenderInput::new()));
        true
    }

    fn with_tender(&mut self, edit: impl FnOnce(&mut TenderInput) -> bool) -> bool {
        match &mut self.view {
            View::Payment(tender) => edit(tender),
            _ => false,
        }
    }

    fn charge(&mut self) -> bool {
        let View::Payment(tender) = &self.view else {
            return false;
        };

        let evaluation = evaluate(self.cart.total(), tender.text());
        if !evaluation.can_charge {
            return false;
        }

        match finalize(&mut self.cart, &evaluation, &mut self.counter, self.clock.as_ref()) {
            Ok(transaction) => {
                self.set_view(View::Success(transaction));
                true
            }
            Err(err) => {
                warn!(%err, "Charge refused");
                false
            }
        }
    }

    fn show_ticket(&mut self) -> bool {
        if !matches!(self.view, View::Success(_)) {
            return false;
        }
        if let View::Success(transaction) = self.set_view(View::Ordering) {
            self.view = View::Ticket {
                transaction,
                print_task: None,
            };
        }
        true
    }

    fn close_ticket(&mut self) -> bool {
        if !matches!(self.view, View::Ticket { .. }) {
            return false;
        }
        if let View::Ticket { transaction, .. } = self.set_view(View::Ordering) {
            self.view = View::Success(transaction);
        }
        true
    }

    fn print(&mut self, now: Duration) -> bool {
        match &mut self.view {
            View::Ticket { print_task, .. } if print_task.is_none() => {
                *print_task = Some(self.scheduler.schedule(
                    now,
                    self.timings.print_delay,
                    DeferredAction::Print,
                ));
                true
            }
            _ => false,
        }
    }
}
