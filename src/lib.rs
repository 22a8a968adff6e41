// Tally Ledger - Core Library
// Exposes the stores for the CLI, the terminal UI, and tests

pub mod config;
pub mod db;
pub mod entities;
pub mod ledger;
pub mod notify;
pub mod tally;

// Re-export commonly used types
pub use config::{CliArgs, Command, Config};
pub use db::{load_snapshot, save_snapshot, KeyValueStore, MemoryStore, SqliteStore};
pub use entities::{default_catalog, format_amount, CatalogItem, EntryKind, LedgerEntry};
pub use ledger::{validate_entry, LedgerError, LedgerStore, LEDGER_KEY};
pub use notify::{
    ConsoleNotifier, Notification, NotificationKind, NotificationQueue, Notifier,
    RecordingNotifier,
};
pub use tally::{TallyStore, TALLY_KEY};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
