// ⚙️ Configuration - CLI flags layered over an optional TOML file

use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "tally-ledger", about = "Point-of-sale tally and income/expense ledger")]
pub struct CliArgs {
    /// Path to config file
    #[arg(short, long, default_value = "tally-ledger.toml")]
    pub config: PathBuf,

    /// Database file (overrides config file)
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Keep everything in memory; nothing is written to disk
    #[arg(long)]
    pub ephemeral: bool,

    /// Log level (overrides config file)
    #[arg(short, long)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Interactive terminal UI (default)
    Ui,
    /// Print tally and ledger totals
    Summary,
    /// Record one sale of a product
    Sell { item: String },
    /// Take back one sale of a product
    Unsell { item: String },
    /// Add an income entry
    Income {
        description: String,
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },
    /// Add an expense entry
    Expense {
        description: String,
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },
    /// Remove an income entry by id
    RemoveIncome { id: String },
    /// Remove an expense entry by id
    RemoveExpense { id: String },
}

#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub notifications: NotificationConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct StorageConfig {
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub json: bool,

    /// Log file; the terminal belongs to the UI
    #[serde(default = "default_log_file")]
    pub file: PathBuf,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct NotificationConfig {
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u64,
}

fn default_db_path() -> PathBuf {
    PathBuf::from("tally-ledger.db")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> PathBuf {
    PathBuf::from("tally-ledger.log")
}

fn default_duration_ms() -> u64 {
    2000
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            path: default_db_path(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_log_level(),
            json: false,
            file: default_log_file(),
        }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        NotificationConfig {
            duration_ms: default_duration_ms(),
        }
    }
}

impl Config {
    /// Read the config file named on the command line, then apply CLI overrides.
    ///
    /// A missing file means defaults; a malformed one means defaults plus a warning.
    pub fn load(cli: &CliArgs) -> Self {
        let mut config = match std::fs::read_to_string(&cli.config) {
            Ok(contents) => Self::parse(&contents).unwrap_or_else(|e| {
                eprintln!("Warning: Failed to parse config file: {}", e);
                Config::default()
            }),
            Err(_) => Config::default(),
        };

        // CLI overrides
        if let Some(ref path) = cli.db {
            config.storage.path = path.clone();
        }
        if let Some(ref level) = cli.log_level {
            config.logging.level = level.clone();
        }

        config
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    pub fn notification_duration(&self) -> Duration {
        Duration::from_millis(self.notifications.duration_ms)
    }
}
