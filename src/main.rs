// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

use tally_ledger::{
    format_amount, CliArgs, Command, Config, ConsoleNotifier, KeyValueStore, LedgerStore,
    MemoryStore, SqliteStore, TallyStore,
};

fn main() -> Result<()> {
    let cli = CliArgs::parse();
    let config = Config::load(&cli);

    init_logging(&config)?;
    tracing::info!(version = tally_ledger::VERSION, "starting tally-ledger");

    let command = cli.command.clone().unwrap_or(Command::Ui);

    if cli.ephemeral {
        run(command, MemoryStore::new(), &config)
    } else {
        let store = SqliteStore::open(&config.storage.path)?;
        tracing::info!(path = %config.storage.path.display(), "opened store");
        run(command, store, &config)
    }
}

fn init_logging(config: &Config) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .context("Invalid log level")?;

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.logging.file)
        .with_context(|| format!("Failed to open log file {}", config.logging.file.display()))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false);

    if config.logging.json {
        builder.json().init();
    } else {
        builder.init();
    }

    Ok(())
}

fn run<S: KeyValueStore + Clone>(command: Command, store: S, config: &Config) -> Result<()> {
    let mut tally = TallyStore::load(store.clone());
    let mut ledger = LedgerStore::load(store);
    let mut sink = ConsoleNotifier;

    match command {
        Command::Ui => return run_ui_mode(tally, ledger, config),
        Command::Summary => {}
        Command::Sell { item } => {
            if !tally.increment(&item, &mut sink) {
                println!("Unknown product: {}", item);
            }
        }
        Command::Unsell { item } => {
            if tally.item(&item).is_none() {
                println!("Unknown product: {}", item);
            } else if !tally.decrement(&item, &mut sink) {
                println!("{} has no sales to remove", item);
            }
        }
        Command::Income { description, amount } => {
            if let Ok(entry) = ledger.add_income(&description, &amount, &mut sink) {
                println!("  id: {}", entry.id);
            }
        }
        Command::Expense { description, amount } => {
            if let Ok(entry) = ledger.add_expense(&description, &amount, &mut sink) {
                println!("  id: {}", entry.id);
            }
        }
        Command::RemoveIncome { id } => {
            if ledger.remove_income(&id, &mut sink).is_none() {
                println!("No income entry with id {}", id);
            }
        }
        Command::RemoveExpense { id } => {
            if ledger.remove_expense(&id, &mut sink).is_none() {
                println!("No expense entry with id {}", id);
            }
        }
    }

    print_summary(&tally, &ledger);
    Ok(())
}

fn print_summary<S: KeyValueStore>(tally: &TallyStore<S>, ledger: &LedgerStore<S>) {
    println!("\n🛒 Sales Tally");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    for item in tally.items() {
        println!(
            "  {:<10} {:<20} {:>9} × {:>3} = {:>10}",
            item.id,
            item.name,
            format_amount(item.price),
            item.count,
            format_amount(item.subtotal())
        );
    }
    println!("  {}", tally.summary_line());

    println!("\n📒 Income & Expenses");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    for entry in ledger.income() {
        println!(
            "  + {}  {:<10} {:<24} {:>10}",
            entry.display_date(),
            entry.short_id(),
            entry.description,
            format_amount(entry.amount)
        );
    }
    for entry in ledger.expenses() {
        println!(
            "  - {}  {:<10} {:<24} {:>10}",
            entry.display_date(),
            entry.short_id(),
            entry.description,
            format_amount(entry.amount)
        );
    }
    println!("  Income:     {:>12}", format_amount(ledger.total_income()));
    println!("  Expenses:   {:>12}", format_amount(ledger.total_expenses()));
    println!("  Net profit: {:>12}", format_amount(ledger.net_balance()));
}

#[cfg(feature = "tui")]
fn run_ui_mode<S: KeyValueStore>(
    tally: TallyStore<S>,
    ledger: LedgerStore<S>,
    config: &Config,
) -> Result<()> {
    let notifications = tally_ledger::NotificationQueue::new(config.notification_duration());
    let mut app = ui::App::new(tally, ledger, notifications);
    ui::run_ui(&mut app)?;

    println!("\n✅ Closed. Totals:");
    print_summary(&app.tally, &app.ledger);

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode<S: KeyValueStore>(
    _tally: TallyStore<S>,
    _ledger: LedgerStore<S>,
    _config: &Config,
) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or use a subcommand, e.g.: tally-ledger summary");
    std::process::exit(1);
}
