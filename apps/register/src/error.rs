//! # Register Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Register                           │
//! │                                                                         │
//! │  startup                                                                │
//! │    register.toml unreadable / malformed ──► ConfigError ──► AppError    │
//! │    invalid width or menu                ──► ConfigError ──► AppError    │
//! │    menu refused by the session          ──► CoreError   ──► AppError    │
//! │                                            (process exits non-zero)     │
//! │                                                                         │
//! │  console loop                                                           │
//! │    unknown command       ──► ParseError   ──► "? ..." notice, continue  │
//! │    print / share failure ──► TicketError  ──► warn! + notice, continue  │
//! │    stdin closed / broken ──► AppError::Io ──► loop ends                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Once the session is open, core refusals (`CoreError`) never reach this
//! layer: the session logs them and leaves the screen as it was.

use std::path::PathBuf;

use pizzeria_core::{CoreError, ValidationError};
use thiserror::Error;

// =============================================================================
// Config Error
// =============================================================================

/// register.toml could not be turned into a usable configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed config file {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Receipt width {width} is outside {min}..={max}")]
    ReceiptWidth { width: usize, min: usize, max: usize },

    #[error("Invalid menu: {0}")]
    Catalog(#[from] ValidationError),
}

// =============================================================================
// Ticket Error
// =============================================================================

/// A print or share job failed. Never fatal.
#[derive(Debug, Error)]
pub enum TicketError {
    #[error("Could not create ticket folder {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not write ticket {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Printer output failed: {0}")]
    Print(#[source] std::io::Error),
}

// =============================================================================
// Parse Error
// =============================================================================

/// The operator typed something the register does not understand.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown command: '{0}'. Type 'help' for the command list")]
    UnknownCommand(String),

    #[error("'{command}' needs {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },

    #[error("'{value}' is not valid for '{command}'")]
    InvalidArgument { command: &'static str, value: String },
}

// =============================================================================
// App Error
// =============================================================================

/// Errors that stop the register.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Session could not start: {0}")]
    Session(#[from] CoreError),

    #[error("Console I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
