//! # Register Configuration
//!
//! Store header, receipt layout, presentation delays and the menu.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command line (highest priority)                                     │
//! │     --share-dir ./tickets                                               │
//! │                                                                         │
//! │  2. Environment Variables                                               │
//! │     PIZZERIA_STORE_NAME, PIZZERIA_CASHIER,                              │
//! │     PIZZERIA_SHARE_DIR, PIZZERIA_RECEIPT_WIDTH                          │
//! │                                                                         │
//! │  3. TOML Config File                                                    │
//! │     --config <path>, or                                                 │
//! │     ~/.config/pizzeria-register/register.toml (Linux)                   │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                    │
//! │     house menu, 42 columns, 1500 ms auto-return, 100 ms print delay     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # register.toml
//! [store]
//! name = "Como en Casa"
//! address = ["Tolomosa S/N", "Tel. 73327523"]
//! cashier = "Mariano"
//! footer = "Thanks for your visit"
//!
//! [receipt]
//! width = 42
//! share_dir = "/srv/register/tickets"
//!
//! [timing]
//! auto_return_ms = 1500
//! print_delay_ms = 100
//!
//! # Optional: replaces the house menu. Prices are in cents.
//! [catalog]
//! pizzas = [{ id = 1, name = "Margherita", rating = 5, base_price = 1100 }]
//! toppings = [{ id = 1, name = "Basil", price = 50 }]
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

use pizzeria_core::validation::validate_catalog;
use pizzeria_core::{Catalog, SessionTimings};

use crate::error::ConfigError;

/// Narrowest receipt the ticket layout supports.
pub const MIN_RECEIPT_WIDTH: usize = 32;
/// Widest receipt the ticket layout supports.
pub const MAX_RECEIPT_WIDTH: usize = 64;

const CONFIG_FILE_NAME: &str = "register.toml";

/// Platform directory name: `~/.config/pizzeria-register` on Linux.
const APP_DIR_NAME: &str = "pizzeria-register";

// =============================================================================
// Store
// =============================================================================

/// Header and footer printed on every ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_name")]
    pub name: String,

    /// Address / phone lines under the store name.
    #[serde(default)]
    pub address: Vec<String>,

    #[serde(default = "default_cashier")]
    pub cashier: String,

    #[serde(default = "default_footer")]
    pub footer: String,
}

fn default_store_name() -> String {
    "Como en Casa".to_string()
}

fn default_cashier() -> String {
    "Mariano".to_string()
}

fn default_footer() -> String {
    "Thanks for your visit".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            name: default_store_name(),
            address: vec!["Tolomosa S/N".to_string()],
            cashier: default_cashier(),
            footer: default_footer(),
        }
    }
}

// =============================================================================
// Receipt
// =============================================================================

/// Receipt layout and where shared tickets go.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptConfig {
    /// Columns per line (typically 32, 42 or 48).
    #[serde(default = "default_width")]
    pub width: usize,

    /// Folder for shared tickets. Defaults to the platform data folder.
    #[serde(default)]
    pub share_dir: Option<PathBuf>,
}

fn default_width() -> usize {
    42
}

impl Default for ReceiptConfig {
    fn default() -> Self {
        ReceiptConfig {
            width: default_width(),
            share_dir: None,
        }
    }
}

// =============================================================================
// Timing
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingConfig {
    /// How long "Added!" shows before the customizer closes.
    #[serde(default = "default_auto_return_ms")]
    pub auto_return_ms: u64,

    /// Delay between pressing print and the job running.
    #[serde(default = "default_print_delay_ms")]
    pub print_delay_ms: u64,
}

fn default_auto_return_ms() -> u64 {
    1500
}

fn default_print_delay_ms() -> u64 {
    100
}

impl Default for TimingConfig {
    fn default() -> Self {
        TimingConfig {
            auto_return_ms: default_auto_return_ms(),
            print_delay_ms: default_print_delay_ms(),
        }
    }
}

impl TimingConfig {
    pub fn session_timings(&self) -> SessionTimings {
        SessionTimings {
            auto_return_delay: Duration::from_millis(self.auto_return_ms),
            print_delay: Duration::from_millis(self.print_delay_ms),
        }
    }
}

// =============================================================================
// Main Register Configuration
// =============================================================================

/// Complete register configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterConfig {
    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub receipt: ReceiptConfig,

    #[serde(default)]
    pub timing: TimingConfig,

    /// Replaces the house menu when present.
    #[serde(default)]
    pub catalog: Option<Catalog>,
}

impl RegisterConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (register.toml)
    /// 3. Environment variables
    ///
    /// A missing file is fine; an unreadable or malformed one is an error.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = match config_path.or_else(Self::default_config_path) {
            Some(path) if path.exists() => Self::from_file(&path)?,
            Some(path) => {
                debug!(?path, "Config file not found, using defaults");
                Self::default()
            }
            None => Self::default(),
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Reads and parses one config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        info!(?path, "Loading register config from file");
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Malformed {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let width = self.receipt.width;
        if !(MIN_RECEIPT_WIDTH..=MAX_RECEIPT_WIDTH).contains(&width) {
            return Err(ConfigError::ReceiptWidth {
                width,
                min: MIN_RECEIPT_WIDTH,
                max: MAX_RECEIPT_WIDTH,
            });
        }

        if let Some(ref catalog) = self.catalog {
            validate_catalog(catalog)?;
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies `PIZZERIA_*` overrides from a variable lookup.
    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(name) = var("PIZZERIA_STORE_NAME") {
            debug!(store = %name, "Overriding store name from environment");
            self.store.name = name;
        }

        if let Some(cashier) = var("PIZZERIA_CASHIER") {
            self.store.cashier = cashier;
        }

        if let Some(dir) = var("PIZZERIA_SHARE_DIR") {
            debug!(dir = %dir, "Overriding share folder from environment");
            self.receipt.share_dir = Some(PathBuf::from(dir));
        }

        if let Some(width) = var("PIZZERIA_RECEIPT_WIDTH") {
            match width.parse::<usize>() {
                Ok(w) => self.receipt.width = w,
                Err(_) => warn!(width = %width, "Ignoring non-numeric receipt width"),
            }
        }
    }

    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "pizzeria", APP_DIR_NAME)
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// The menu this register sells from.
    pub fn catalog(&self) -> Catalog {
        self.catalog.clone().unwrap_or_default()
    }

    /// Where shared tickets are written.
    ///
    /// Falls back to `<platform data dir>/tickets`, then `./tickets`.
    pub fn share_dir(&self) -> PathBuf {
        if let Some(ref dir) = self.receipt.share_dir {
            return dir.clone();
        }
        directories::ProjectDirs::from("com", "pizzeria", APP_DIR_NAME)
            .map(|dirs| dirs.data_dir().join("tickets"))
            .unwrap_or_else(|| PathBuf::from("tickets"))
    }
}
