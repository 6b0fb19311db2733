//! # Console Commands
//!
//! Turns one line typed at the register into a [`Command`].
//!
//! ## Context-Sensitive Shortcuts
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  screen        bare input        means                                  │
//! │  ───────────   ──────────        ─────                                  │
//! │  Ordering      2                 pizza 2                                │
//! │  Customizing   L                 size L                                 │
//! │  Customizing   5                 topping 5                              │
//! │  Payment       20.5              keys 2, 0, ., 5                        │
//! │  CartOpen      close             close the cart                         │
//! │  Ticket        close             back to the success screen             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything else is a named command and works on any screen; the session
//! decides whether it applies.

use pizzeria_core::{Event, PizzaSize, ViewKind};

use crate::error::ParseError;

/// What the operator asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// A single session event.
    Event(Event),
    /// Keypad presses, in order.
    Keys(Vec<Event>),
    /// Remove the n-th cart line (1-based, as listed on screen).
    RemoveLine(usize),
    Help,
    Menu,
    Quit,
}

/// Command list shown by `help`.
pub const HELP: &str = "\
Commands
  pizza <n>      open the customizer for pizza n (or just type n)
  size <S|M|L>   choose a size (or just type S, M or L)
  topping <n>    toggle topping n (or just type n while customizing)
  add            add the pizza to the cart
  back           leave the customizer or the payment screen
  cart           show the cart
  remove <n>     remove cart line n
  close          close the cart or the ticket
  checkout       go to payment
  <amount>       type on the keypad, e.g. 20 or 12.50
  del            keypad backspace
  pick <n>       use suggested amount n
  charge         complete the sale
  ticket         show the ticket
  print          print the ticket
  share          save the ticket to the share folder
  new            start a new sale
  menu           redraw the screen
  quit           leave the register";

/// Parses one console line in the context of the current screen.
///
/// An empty line redraws the screen.
pub fn parse(line: &str, view: ViewKind) -> Result<Command, ParseError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(Command::Menu);
    };
    let arg = words.next();

    if let Some(command) = shortcut(head, view) {
        return Ok(command);
    }

    let event = match head.to_ascii_lowercase().as_str() {
        "help" | "h" | "?" => return Ok(Command::Help),
        "menu" => return Ok(Command::Menu),
        "quit" | "q" | "exit" => return Ok(Command::Quit),
        "remove" | "rm" => return Ok(Command::RemoveLine(position("remove", arg)?)),

        "pizza" | "p" => Event::SelectPizza(number("pizza", arg)?),
        "size" => Event::ChooseSize(size(arg)?),
        "topping" | "t" => Event::ToggleTopping(number("topping", arg)?),
        "add" | "a" => Event::AddToCart,
        "back" | "b" => Event::Back,
        "cart" | "c" => Event::OpenCart,
        "close" | "x" => match view {
            ViewKind::CartOpen => Event::CloseCart,
            ViewKind::Ticket => Event::CloseTicket,
            _ => Event::Back,
        },
        "checkout" | "pay" => Event::Checkout,
        "del" | "bs" => Event::Backspace,
        "pick" => Event::PickSuggestion(position("pick", arg)? - 1),
        "charge" => Event::Charge,
        "new" => Event::NewSale,
        "ticket" => Event::ShowTicket,
        "print" => Event::Print,
        "share" => Event::Share,
        _ => return Err(ParseError::UnknownCommand(head.to_string())),
    };

    Ok(Command::Event(event))
}

/// Bare input that only means something on one screen.
fn shortcut(head: &str, view: ViewKind) -> Option<Command> {
    match view {
        ViewKind::Ordering => head
            .parse::<u32>()
            .ok()
            .map(|id| Command::Event(Event::SelectPizza(id))),
        ViewKind::Customizing => {
            if let Ok(id) = head.parse::<u32>() {
                return Some(Command::Event(Event::ToggleTopping(id)));
            }
            head.parse::<PizzaSize>()
                .ok()
                .map(|size| Command::Event(Event::ChooseSize(size)))
        }
        ViewKind::Payment if is_keypad_entry(head) => Some(Command::Keys(keys(head))),
        _ => None,
    }
}

fn is_keypad_entry(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_digit() || c == '.')
}

fn keys(token: &str) -> Vec<Event> {
    token
        .chars()
        .map(|c| if c == '.' { Event::DecimalPoint } else { Event::Digit(c) })
        .collect()
}

fn number(command: &'static str, arg: Option<&str>) -> Result<u32, ParseError> {
    let value = arg.ok_or(ParseError::MissingArgument {
        command,
        expected: "a number",
    })?;
    value.parse().map_err(|_| ParseError::InvalidArgument {
        command,
        value: value.to_string(),
    })
}

fn position(command: &'static str, arg: Option<&str>) -> Result<usize, ParseError> {
    let n = number(command, arg)?;
    match usize::try_from(n) {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(ParseError::InvalidArgument {
            command,
            value: n.to_string(),
        }),
    }
}

fn size(arg: Option<&str>) -> Result<PizzaSize, ParseError> {
    let value = arg.ok_or(ParseError::MissingArgument {
        command: "size",
        expected: "S, M or L",
    })?;
    value.parse().map_err(|_| ParseError::InvalidArgument {
        command: "size",
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(line: &str, view: ViewKind) -> Event {
        match parse(line, view) {
            Ok(Command::Event(event)) => event,
            other => panic!("expected an event for {:?}, got {:?}", line, other),
        }
    }

    #[test]
    fn test_named_commands() {
        assert_eq!(event("pizza 3", ViewKind::Ordering), Event::SelectPizza(3));
        assert_eq!(event("size l", ViewKind::Customizing), Event::ChooseSize(PizzaSize::L));
        assert_eq!(event("topping 5", ViewKind::Customizing), Event::ToggleTopping(5));
        assert_eq!(event("ADD", ViewKind::Customizing), Event::AddToCart);
        assert_eq!(event("checkout", ViewKind::CartOpen), Event::Checkout);
        assert_eq!(event("charge", ViewKind::Payment), Event::Charge);
        assert_eq!(event("share", ViewKind::Ticket), Event::Share);
    }

    #[test]
    fn test_bare_number_depends_on_screen() {
        assert_eq!(event("2", ViewKind::Ordering), Event::SelectPizza(2));
        assert_eq!(event("2", ViewKind::Customizing), Event::ToggleTopping(2));
        assert_eq!(
            parse("2", ViewKind::Payment),
            Ok(Command::Keys(vec![Event::Digit('2')]))
        );
        assert_eq!(
            parse("2", ViewKind::CartOpen),
            Err(ParseError::UnknownCommand("2".into()))
        );
    }

    #[test]
    fn test_bare_size_while_customizing() {
        assert_eq!(event("S", ViewKind::Customizing), Event::ChooseSize(PizzaSize::S));
        assert_eq!(event("large", ViewKind::Customizing), Event::ChooseSize(PizzaSize::L));
    }

    #[test]
    fn test_keypad_entry() {
        assert_eq!(
            parse("12.5", ViewKind::Payment),
            Ok(Command::Keys(vec![
                Event::Digit('1'),
                Event::Digit('2'),
                Event::DecimalPoint,
                Event::Digit('5'),
            ]))
        );
        assert_eq!(event("del", ViewKind::Payment), Event::Backspace);
    }

    #[test]
    fn test_close_depends_on_screen() {
        assert_eq!(event("close", ViewKind::CartOpen), Event::CloseCart);
        assert_eq!(event("close", ViewKind::Ticket), Event::CloseTicket);
        assert_eq!(event("close", ViewKind::Customizing), Event::Back);
    }

    #[test]
    fn test_one_based_positions() {
        assert_eq!(parse("remove 1", ViewKind::CartOpen), Ok(Command::RemoveLine(1)));
        assert_eq!(event("pick 2", ViewKind::Payment), Event::PickSuggestion(1));
        assert_eq!(
            parse("pick 0", ViewKind::Payment),
            Err(ParseError::InvalidArgument {
                command: "pick",
                value: "0".into()
            })
        );
    }

    #[test]
    fn test_argument_errors() {
        assert_eq!(
            parse("pizza", ViewKind::Ordering),
            Err(ParseError::MissingArgument {
                command: "pizza",
                expected: "a number"
            })
        );
        assert_eq!(
            parse("size XL", ViewKind::Customizing),
            Err(ParseError::InvalidArgument {
                command: "size",
                value: "XL".into()
            })
        );
    }

    #[test]
    fn test_shell_commands() {
        assert_eq!(parse("", ViewKind::Ordering), Ok(Command::Menu));
        assert_eq!(parse("   ", ViewKind::Payment), Ok(Command::Menu));
        assert_eq!(parse("help", ViewKind::Ticket), Ok(Command::Help));
        assert_eq!(parse("q", ViewKind::Success), Ok(Command::Quit));
        assert_eq!(
            parse("pizzza 1", ViewKind::Ordering),
            Err(ParseError::UnknownCommand("pizzza".into()))
        );
    }
}
