use std::str::FromStr;
use std::sync::{Mutex, PoisonError};

use rust_decimal::Decimal;
use storefront_core::{DisplaySurface, StatusKind, StatusMessage};
use storefront_shared::CartView;

pub const HELP: &str = "\
Commands:
  add <price> <name...>   add an item to the cart
  name <text...>          set the customer name
  order                   place the order
  show                    redraw the cart
  help                    show this text
  quit                    exit";

/// Terminal rendition of the widget's display regions.
#[derive(Debug, Default)]
pub struct ConsoleSurface {
    customer_name: Mutex<String>,
}

impl ConsoleSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_customer_name(&self, name: &str) {
        *self.customer_name.lock().unwrap_or_else(PoisonError::into_inner) = name.to_string();
    }
}

impl DisplaySurface for ConsoleSurface {
    fn show_cart(&self, view: &CartView) {
        println!("---- cart ----\n{}\n--------------", view);
    }

    fn show_status(&self, status: &StatusMessage) {
        match status.kind {
            StatusKind::Success => println!("{}", status.text),
            StatusKind::Error => eprintln!("{}", status.text),
        }
    }

    // Printed lines cannot be taken back
    fn clear_status(&self) {}

    fn set_submit_enabled(&self, enabled: bool, label: &str) {
        if !enabled {
            println!("{}", label);
        }
    }

    fn customer_name(&self) -> String {
        self.customer_name.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn clear_customer_name(&self) {
        self.customer_name.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

/// One line of console input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add { name: String, price: Decimal },
    Name(String),
    Order,
    Show,
    Help,
    Quit,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command: {0} (try `help`)")]
    Unknown(String),

    #[error("Usage: add <price> <name...>")]
    AddUsage,

    #[error("Not a price: {0}")]
    BadPrice(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        match verb {
            "add" => {
                let (price, name) = rest.split_once(char::is_whitespace).ok_or(CommandError::AddUsage)?;
                let price = price
                    .trim_start_matches('$')
                    .parse::<Decimal>()
                    .map_err(|_| CommandError::BadPrice(price.to_string()))?;
                Ok(Self::Add {
                    name: name.trim().to_string(),
                    price,
                })
            }
            // The name field accepts anything, blank included; validation
            // happens when the order is placed.
            "name" => Ok(Self::Name(rest.to_string())),
            "order" => Ok(Self::Order),
            "show" => Ok(Self::Show),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add() {
        assert_eq!(
            "add 9.99 Blue Widget".parse::<Command>(),
            Ok(Command::Add {
                name: "Blue Widget".to_string(),
                price: Decimal::new(999, 2)
            })
        );
        assert_eq!(
            "  add $5 Gadget ".parse::<Command>(),
            Ok(Command::Add {
                name: "Gadget".to_string(),
                price: Decimal::new(5, 0)
            })
        );
    }

    #[test]
    fn test_parse_add_errors() {
        assert_eq!("add".parse::<Command>(), Err(CommandError::AddUsage));
        assert_eq!("add 9.99".parse::<Command>(), Err(CommandError::AddUsage));
        assert_eq!(
            "add cheap Widget".parse::<Command>(),
            Err(CommandError::BadPrice("cheap".to_string()))
        );
    }

    #[test]
    fn test_parse_other_commands() {
        assert_eq!("name Ada Lovelace".parse::<Command>(), Ok(Command::Name("Ada Lovelace".into())));
        assert_eq!("name".parse::<Command>(), Ok(Command::Name(String::new())));
        assert_eq!("order".parse::<Command>(), Ok(Command::Order));
        assert_eq!("quit".parse::<Command>(), Ok(Command::Quit));
        assert_eq!(
            "checkout".parse::<Command>(),
            Err(CommandError::Unknown("checkout".into()))
        );
    }

    #[test]
    fn test_console_name_field() {
        let surface = ConsoleSurface::new();
        surface.set_customer_name("Ada");
        assert_eq!(surface.customer_name(), "Ada");

        surface.clear_customer_name();
        assert_eq!(surface.customer_name(), "");
    }
}
