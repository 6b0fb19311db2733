//! # Pizzeria Register Library
//!
//! The terminal register: console in, screen and tickets out. All decisions
//! are made by `pizzeria-core`; this crate only moves text and time.
//!
//! ## Module Organization
//! ```text
//! pizzeria_register/
//! ├── lib.rs          ◄─── You are here (startup & console loop)
//! ├── config.rs       ◄─── register.toml + env overrides
//! ├── command.rs      ◄─── console line ──► Command
//! ├── render.rs       ◄─── session view ──► screen text
//! ├── ticket.rs       ◄─── ticket text, print & share surfaces
//! └── error.rs        ◄─── ConfigError, TicketError, ParseError, AppError
//! ```
//!
//! ## Console Loop
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          tokio::select!                                 │
//! │                                                                         │
//! │   stdin line ──► command::parse ──► Session::dispatch(elapsed, event)   │
//! │                                             │                           │
//! │   sleep_until(next deadline) ──► Session::advance(elapsed)              │
//! │                                             │                           │
//! │                                             ▼                           │
//! │                              effects ──► PrintSurface / ShareSurface    │
//! │                              view    ──► render ──► stdout              │
//! │                                                                         │
//! │   elapsed = time since the register started                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod command;
pub mod config;
pub mod error;
pub mod render;
pub mod ticket;

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use chrono::Local;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::Instant;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use pizzeria_core::{Effect, Event, Session};

use command::{Command, HELP};
use config::RegisterConfig;
use error::{AppError, AppResult};
use ticket::{PrintSurface, ShareSurface, TicketRenderer};

/// Whether the console loop keeps going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

// =============================================================================
// Register
// =============================================================================

/// One register: a session plus the surfaces it talks to.
pub struct Register<S: Write, P: Write> {
    session: Session,
    tickets: TicketRenderer,
    printer: PrintSurface<P>,
    share: ShareSurface,
    screen: S,
}

impl<S: Write, P: Write> Register<S, P> {
    pub fn new(
        config: &RegisterConfig,
        share_dir: PathBuf,
        screen: S,
        printer: P,
    ) -> AppResult<Self> {
        Ok(Register {
            session: Session::open(config.catalog(), config.timing.session_timings())?,
            tickets: TicketRenderer::new(config.store.clone(), config.receipt.width),
            printer: PrintSurface::new(printer),
            share: ShareSurface::new(share_dir),
            screen,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// When the session next needs [`Register::tick`], relative to start.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.session.next_deadline()
    }

    /// Handles one console line.
    pub fn handle_line(&mut self, line: &str, now: Duration) -> AppResult<Flow> {
        let command = match command::parse(line, self.session.view().kind()) {
            Ok(command) => command,
            Err(err) => {
                debug!(%err, line, "Unparsed console input");
                self.notice(&format!("? {}", err))?;
                return Ok(Flow::Continue);
            }
        };

        match command {
            Command::Quit => return Ok(Flow::Quit),
            Command::Help => {
                writeln!(self.screen, "{}", HELP)?;
                return Ok(Flow::Continue);
            }
            Command::Menu => {}
            Command::Event(event) => self.dispatch(now, event)?,
            Command::Keys(keys) => {
                for key in keys {
                    self.dispatch(now, key)?;
                }
            }
            Command::RemoveLine(n) => {
                let id = self.session.cart().items().get(n - 1).map(|item| item.id.clone());
                match id {
                    Some(id) => self.dispatch(now, Event::RemoveItem(id))?,
                    None => self.notice(&format!("? There is no cart line {}", n))?,
                }
            }
        }

        self.redraw()?;
        Ok(Flow::Continue)
    }

    /// Runs deferred actions that are due and redraws.
    pub fn tick(&mut self, now: Duration) -> AppResult<()> {
        let effects = self.session.advance(now);
        self.execute(effects)?;
        self.redraw()
    }

    pub fn redraw(&mut self) -> AppResult<()> {
        let text = render::render(&self.session, &self.tickets, &Local);
        writeln!(self.screen, "{}", text)?;
        self.screen.flush()?;
        Ok(())
    }

    fn dispatch(&mut self, now: Duration, event: Event) -> AppResult<()> {
        let effects = self.session.dispatch(now, event);
        self.execute(effects)
    }

    /// Runs print / share jobs. Surface failures are reported, never fatal.
    fn execute(&mut self, effects: Vec<Effect>) -> AppResult<()> {
        for effect in effects {
            match effect {
                Effect::Print(tx) => {
                    let text = self.tickets.render(&tx, &Local);
                    if let Err(err) = self.printer.print(tx.ticket_number, &text) {
                        warn!(%err, ticket = tx.ticket_number, "Print failed");
                        self.notice(&format!("! Printing failed: {}", err))?;
                    }
                }
                Effect::Share(tx) => {
                    let text = self.tickets.render(&tx, &Local);
                    match self.share.share(tx.ticket_number, &text) {
                        Ok(path) => self.notice(&format!("Ticket saved to {}", path.display()))?,
                        Err(err) => {
                            warn!(%err, ticket = tx.ticket_number, "Share failed");
                            self.notice(&format!("! Sharing failed: {}", err))?;
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn notice(&mut self, text: &str) -> AppResult<()> {
        writeln!(self.screen, "{}", text)?;
        Ok(())
    }

    #[cfg(test)]
    fn into_parts(self) -> (S, P) {
        (self.screen, self.printer.into_inner())
    }
}

// =============================================================================
// Console Loop
// =============================================================================

/// Runs the register on stdin / stdout until `quit` or end of input.
pub async fn run(config: RegisterConfig, share_dir: PathBuf) -> AppResult<()> {
    info!(
        store = %config.store.name,
        pizzas = config.catalog().pizzas.len(),
        share_dir = %share_dir.display(),
        "Register open"
    );

    let mut register = Register::new(&config, share_dir, std::io::stdout(), std::io::stdout())?;
    let start = Instant::now();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    register.redraw()?;
    loop {
        let deadline = register.next_deadline().map(|d| start + d);
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.map_err(AppError::Io)? else {
                    info!("Console closed");
                    break;
                };
                if register.handle_line(&line, start.elapsed())? == Flow::Quit {
                    break;
                }
            }
            _ = sleep_until(deadline) => {
                register.tick(start.elapsed())?;
            }
        }
    }

    info!(tickets = register.session().tickets_issued(), "Register closed");
    Ok(())
}

/// Sleeps until `deadline`, or forever when there is none.
async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

/// Initializes the tracing subscriber on stderr.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=pizzeria=trace` - Show trace for pizzeria crates only
/// - Default: INFO, DEBUG for pizzeria crates
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,pizzeria=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn register(share_dir: PathBuf) -> Register<Vec<u8>, Vec<u8>> {
        Register::new(&RegisterConfig::default(), share_dir, Vec::new(), Vec::new()).unwrap()
    }

    fn feed(register: &mut Register<Vec<u8>, Vec<u8>>, lines: &[&str]) {
        for line in lines {
            assert_eq!(register.handle_line(line, ms(0)).unwrap(), Flow::Continue);
        }
    }

    #[test]
    fn test_sale_through_console_lines() {
        let dir = tempfile::tempdir().unwrap();
        let mut reg = register(dir.path().to_path_buf());

        feed(&mut reg, &["2", "L", "2", "add", "cart", "checkout", "20", "charge"]);

        let tx = reg.session().view().transaction().cloned().unwrap();
        assert_eq!(tx.total.to_string(), "$17.00");
        assert_eq!(tx.change.to_string(), "$3.00");
        assert_eq!(reg.session().cart_count(), 0);
    }

    #[test]
    fn test_remove_line_by_position() {
        let dir = tempfile::tempdir().unwrap();
        let mut reg = register(dir.path().to_path_buf());

        feed(&mut reg, &["1", "add", "cart", "close", "3", "add", "cart", "remove 1"]);
        assert_eq!(reg.session().cart_count(), 1);
        assert_eq!(reg.session().cart().items()[0].pizza.id, 3);

        feed(&mut reg, &["remove 5"]);
        let (screen, _) = reg.into_parts();
        assert!(String::from_utf8(screen).unwrap().contains("? There is no cart line 5"));
    }

    #[test]
    fn test_menu_priced_below_zero_refused_at_open() {
        let mut catalog = pizzeria_core::Catalog::default();
        catalog.pizzas[0].base_price = pizzeria_core::Money::from_cents(100);
        let config = RegisterConfig {
            catalog: Some(catalog),
            ..RegisterConfig::default()
        };

        let dir = tempfile::tempdir().unwrap();
        let result = Register::new(&config, dir.path().to_path_buf(), Vec::new(), Vec::new());
        assert!(matches!(result, Err(AppError::Session(_))));
    }

    #[test]
    fn test_unknown_input_is_a_notice() {
        let dir = tempfile::tempdir().unwrap();
        let mut reg = register(dir.path().to_path_buf());

        feed(&mut reg, &["frobnicate"]);
        assert_eq!(reg.handle_line("quit", ms(0)).unwrap(), Flow::Quit);

        let (screen, _) = reg.into_parts();
        assert!(String::from_utf8(screen).unwrap().contains("? Unknown command: 'frobnicate'"));
    }

    #[test]
    fn test_auto_return_redraws_on_tick() {
        let dir = tempfile::tempdir().unwrap();
        let mut reg = register(dir.path().to_path_buf());

        feed(&mut reg, &["4", "add"]);
        assert_eq!(reg.next_deadline(), Some(ms(1500)));

        reg.tick(ms(1500)).unwrap();
        assert_eq!(reg.session().view(), &pizzeria_core::View::Ordering);
        assert_eq!(reg.next_deadline(), None);
    }

    #[test]
    fn test_print_and_share_effects() {
        let dir = tempfile::tempdir().unwrap();
        let mut reg = register(dir.path().join("tickets"));

        feed(&mut reg, &["1", "add", "cart", "checkout", "pick 1", "charge", "ticket", "share", "print"]);
        assert!(dir.path().join("tickets").join("ticket-1.txt").exists());

        reg.tick(ms(100)).unwrap();
        let (screen, printed) = reg.into_parts();
        let printed = String::from_utf8(printed).unwrap();
        assert!(printed.contains("#1"));
        assert!(printed.contains("1x New Orleans Pizza (M)"));
        assert!(String::from_utf8(screen).unwrap().contains("Ticket saved to"));
    }

    #[test]
    fn test_share_failure_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "x").unwrap();
        let mut reg = register(blocker);

        feed(&mut reg, &["2", "add", "cart", "checkout", "12", "charge", "ticket", "share"]);

        let (screen, _) = reg.into_parts();
        assert!(String::from_utf8(screen).unwrap().contains("! Sharing failed"));
    }

    #[tokio::test]
    async fn test_sleep_until_without_deadline_never_wakes() {
        let waited = tokio::time::timeout(ms(20), sleep_until(None)).await;
        assert!(waited.is_err());
    }

    #[tokio::test]
    async fn test_sleep_until_wakes_at_deadline() {
        let deadline = Instant::now() + ms(5);
        let waited = tokio::time::timeout(ms(1000), sleep_until(Some(deadline))).await;
        assert!(waited.is_ok());
        assert!(Instant::now() >= deadline);
    }
}
