//! # pizzeria-core: Pure Business Logic for the Pizzeria Register
//!
//! Everything the register decides lives here: prices, the cart, tender
//! evaluation, ticket numbering, receipt grouping and which screen is shown.
//! Nothing in this crate touches a terminal, a file or a real timer.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Pizzeria Register Architecture                      │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 apps/register (terminal shell)                  │   │
//! │  │   stdin commands ──► Event      Effect ──► print / share file   │   │
//! │  │   tokio timer    ──► advance()  View   ──► screen text          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ pizzeria-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐  ┌──────────┐  ┌──────────┐  ┌──────────────┐   │   │
//! │  │   │ catalog  │  │ pricing  │  │   cart   │  │   payment    │   │   │
//! │  │   │  Pizza   │  │line_price│  │ LineItem │  │ TenderInput  │   │   │
//! │  │   │ Topping  │  │Selection │  │   Cart   │  │  evaluate    │   │   │
//! │  │   └──────────┘  └──────────┘  └──────────┘  └──────────────┘   │   │
//! │  │   ┌──────────┐  ┌──────────┐  ┌──────────┐  ┌──────────────┐   │   │
//! │  │   │transact. │  │ receipt  │  │ schedule │  │   session    │   │   │
//! │  │   │ finalize │  │  group   │  │Scheduler │  │ View, Event  │   │   │
//! │  │   └──────────┘  └──────────┘  └──────────┘  └──────────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • INJECTED CLOCK • VIRTUAL TIME                        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic
//! - [`catalog`] - Pizzas, toppings, sizes and the house menu
//! - [`validation`] - Catalog checks for externally supplied menus
//! - [`pricing`] - Line price and the customizer's topping selection
//! - [`cart`] - The in-progress sale
//! - [`payment`] - Keypad buffer, change and suggested bills
//! - [`transaction`] - Ticket counter and sale finalization
//! - [`receipt`] - Grouping identical lines for the ticket
//! - [`schedule`] - Deferred actions against virtual time
//! - [`session`] - The screen state machine
//! - [`ids`], [`clock`] - Injection points for line ids and wall-clock time
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use std::time::Duration;
//! use pizzeria_core::{Catalog, Event, Money, PizzaSize, Session, SessionTimings};
//!
//! let mut session = Session::new(Catalog::default(), SessionTimings::default());
//! let now = Duration::ZERO;
//!
//! session.dispatch(now, Event::SelectPizza(2));
//! session.dispatch(now, Event::ChooseSize(PizzaSize::L));
//! session.dispatch(now, Event::AddToCart);
//!
//! // Ham Pizza $12.00 + $3.00 for large
//! assert_eq!(session.cart().total(), Money::from_major(15));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod clock;
pub mod error;
pub mod ids;
pub mod money;
pub mod payment;
pub mod pricing;
pub mod receipt;
pub mod schedule;
pub mod session;
pub mod transaction;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, LineItem};
pub use catalog::{Catalog, Pizza, PizzaSize, SizeDeltas, Topping};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{CoreError, CoreResult, ValidationError};
pub use ids::{IdGenerator, LineItemId, SequentialIds, UuidIds};
pub use money::Money;
pub use payment::{evaluate, suggested_tenders, PaymentEvaluation, TenderInput};
pub use receipt::{group, ReceiptGroup, ReceiptSummary};
pub use session::{Effect, Event, Session, SessionTimings, View, ViewKind};
pub use transaction::{finalize, TicketCounter, Transaction};
