// 📒 Ledger Store - manual income and expense entries
//
// Totals are never stored incrementally: total_income, total_expenses and
// net_balance are folds over the entry lists, so they cannot drift.

use crate::db::{load_snapshot, save_snapshot, KeyValueStore};
use crate::entities::{format_amount, EntryKind, LedgerEntry};
use crate::notify::{Notification, Notifier};
use serde::{Deserialize, Serialize};

/// Storage key for the ledger snapshot
pub const LEDGER_KEY: &str = "finances";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LedgerError {
    #[error("description is required")]
    MissingDescription,

    #[error("amount {0:?} is not a number")]
    InvalidAmount(String),
}

/// On-disk layout as read back. `totalIncome`/`totalExpenses` are written
/// for anyone reading the raw snapshot and ignored here.
#[derive(Debug, Default, Deserialize)]
struct LedgerSnapshot {
    #[serde(default)]
    income: Vec<LedgerEntry>,
    #[serde(default)]
    expenses: Vec<LedgerEntry>,
}

pub struct LedgerStore<S: KeyValueStore> {
    store: S,
    income: Vec<LedgerEntry>,
    expenses: Vec<LedgerEntry>,
}

impl<S: KeyValueStore> LedgerStore<S> {
    /// Load both lists from `store`; absent or unreadable data means empty lists
    pub fn load(store: S) -> Self {
        let snapshot = load_snapshot::<LedgerSnapshot, _>(&store, LEDGER_KEY).unwrap_or_default();

        LedgerStore {
            store,
            income: snapshot.income,
            expenses: snapshot.expenses,
        }
    }

    pub fn add_income(
        &mut self,
        description: &str,
        amount_text: &str,
        sink: &mut dyn Notifier,
    ) -> Result<LedgerEntry, LedgerError> {
        self.add(EntryKind::Income, description, amount_text, sink)
    }

    pub fn add_expense(
        &mut self,
        description: &str,
        amount_text: &str,
        sink: &mut dyn Notifier,
    ) -> Result<LedgerEntry, LedgerError> {
        self.add(EntryKind::Expense, description, amount_text, sink)
    }

    /// Validate, append, persist, notify.
    ///
    /// A rejected input emits an error notification and leaves both lists untouched.
    pub fn add(
        &mut self,
        kind: EntryKind,
        description: &str,
        amount_text: &str,
        sink: &mut dyn Notifier,
    ) -> Result<LedgerEntry, LedgerError> {
        let (description, amount) = match validate_entry(description, amount_text) {
            Ok(parsed) => parsed,
            Err(e) => {
                let message = match &e {
                    LedgerError::InvalidAmount(text) if !text.is_empty() => e.to_string(),
                    _ => "Please fill in all fields".to_string(),
                };
                sink.notify(Notification::error("Error", message));
                return Err(e);
            }
        };

        let entry = LedgerEntry::new(description, amount);
        self.list_mut(kind).push(entry.clone());
        if !self.persist(sink) {
            return Ok(entry);
        }

        let notification = match kind {
            EntryKind::Income => Notification::success(
                "Income added! 💰",
                format!("{} added to income", format_amount(entry.amount)),
            ),
            EntryKind::Expense => Notification::success(
                "Expense recorded 📝",
                format!("{} added to expenses", format_amount(entry.amount)),
            ),
        };
        sink.notify(notification);

        Ok(entry)
    }

    pub fn remove_income(&mut self, id: &str, sink: &mut dyn Notifier) -> Option<LedgerEntry> {
        self.remove(EntryKind::Income, id, sink)
    }

    pub fn remove_expense(&mut self, id: &str, sink: &mut dyn Notifier) -> Option<LedgerEntry> {
        self.remove(EntryKind::Expense, id, sink)
    }

    /// Remove by id. An unknown id changes nothing and emits nothing.
    pub fn remove(
        &mut self,
        kind: EntryKind,
        id: &str,
        sink: &mut dyn Notifier,
    ) -> Option<LedgerEntry> {
        let list = self.list_mut(kind);
        let Some(position) = list.iter().position(|entry| entry.id == id) else {
            tracing::debug!(id, kind = kind.as_str(), "remove ignored: unknown entry");
            return None;
        };

        let removed = list.remove(position);
        if !self.persist(sink) {
            return Some(removed);
        }

        let title = match kind {
            EntryKind::Income => "Income removed",
            EntryKind::Expense => "Expense removed",
        };
        sink.notify(Notification::success(title, "The entry has been removed"));

        Some(removed)
    }

    pub fn income(&self) -> &[LedgerEntry] {
        &self.income
    }

    pub fn expenses(&self) -> &[LedgerEntry] {
        &self.expenses
    }

    pub fn entries(&self, kind: EntryKind) -> &[LedgerEntry] {
        match kind {
            EntryKind::Income => &self.income,
            EntryKind::Expense => &self.expenses,
        }
    }

    pub fn total_income(&self) -> f64 {
        self.income.iter().map(|entry| entry.amount).sum()
    }

    pub fn total_expenses(&self) -> f64 {
        self.expenses.iter().map(|entry| entry.amount).sum()
    }

    pub fn net_balance(&self) -> f64 {
        self.total_income() - self.total_expenses()
    }

    fn list_mut(&mut self, kind: EntryKind) -> &mut Vec<LedgerEntry> {
        match kind {
            EntryKind::Income => &mut self.income,
            EntryKind::Expense => &mut self.expenses,
        }
    }

    /// Write the snapshot. On failure the error notification is the last
    /// word, so callers skip their success message.
    fn persist(&self, sink: &mut dyn Notifier) -> bool {
        let snapshot = LedgerSnapshotRef {
            income: &self.income,
            expenses: &self.expenses,
            total_income: self.total_income(),
            total_expenses: self.total_expenses(),
        };

        if let Err(e) = save_snapshot(&self.store, LEDGER_KEY, &snapshot) {
            tracing::error!(error = %e, "failed to save ledger");
            sink.notify(Notification::error("Save failed", format!("{:#}", e)));
            return false;
        }
        true
    }
}

/// Written layout, borrowing the lists
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LedgerSnapshotRef<'a> {
    income: &'a [LedgerEntry],
    expenses: &'a [LedgerEntry],
    total_income: f64,
    total_expenses: f64,
}

/// Trimmed description plus parsed amount, or the reason the input is rejected.
///
/// Zero and negative amounts pass; only missing or non-numeric input fails.
pub fn validate_entry(description: &str, amount_text: &str) -> Result<(String, f64), LedgerError> {
    let description = description.trim();
    if description.is_empty() {
        return Err(LedgerError::MissingDescription);
    }

    let amount_text = amount_text.trim();

    let amount: f64 = amount_text
        .parse()
        .map_err(|_| LedgerError::InvalidAmount(amount_text.to_string()))?;
    if !amount.is_finite() {
        return Err(LedgerError::InvalidAmount(amount_text.to_string()));
    }

    Ok((description.to_string(), amount))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{MemoryStore, ReadOnlyStore, SqliteStore};
    use crate::notify::{NotificationKind, NotificationQueue, RecordingNotifier};

    fn fresh() -> (LedgerStore<MemoryStore>, MemoryStore) {
        let backing = MemoryStore::new();
        (LedgerStore::load(backing.clone()), backing)
    }

    fn assert_totals_match<S: KeyValueStore>(ledger: &LedgerStore<S>) {
        let income: f64 = ledger.income().iter().map(|e| e.amount).sum();
        let expenses: f64 = ledger.expenses().iter().map(|e| e.amount).sum();
        assert_eq!(ledger.total_income(), income);
        assert_eq!(ledger.total_expenses(), expenses);
        assert_eq!(ledger.net_balance(), income - expenses);
    }

    #[test]
    fn test_load_empty_when_absent() {
        let (ledger, _) = fresh();

        assert!(ledger.income().is_empty());
        assert!(ledger.expenses().is_empty());
        assert_eq!(ledger.net_balance(), 0.0);
    }

    #[test]
    fn test_load_empty_when_corrupt() {
        let backing = MemoryStore::new();
        backing.set(LEDGER_KEY, "[1, 2").unwrap();

        let ledger = LedgerStore::load(backing);

        assert!(ledger.income().is_empty());
        assert!(ledger.expenses().is_empty());
    }

    #[test]
    fn test_sale_rent_scenario() {
        let (mut ledger, _) = fresh();
        let mut sink = RecordingNotifier::new();

        let sale = ledger.add_income("Sale", "100", &mut sink).unwrap();
        assert_eq!(ledger.income().len(), 1);
        assert_eq!(ledger.income()[0].amount, 100.0);
        assert_eq!(ledger.total_income(), 100.0);
        assert_eq!(ledger.net_balance(), 100.0);

        ledger.add_expense("Rent", "40", &mut sink).unwrap();
        assert_eq!(ledger.total_expenses(), 40.0);
        assert_eq!(ledger.net_balance(), 60.0);

        let removed = ledger.remove_income(&sale.id, &mut sink).unwrap();
        assert_eq!(removed, sale);
        assert!(ledger.income().is_empty());
        assert_eq!(ledger.total_income(), 0.0);
        assert_eq!(ledger.net_balance(), -40.0);

        assert_eq!(sink.received.len(), 3);
        assert!(sink.received.iter().all(|n| n.kind == NotificationKind::Success));
    }

    #[test]
    fn test_validation_gate() {
        let (mut ledger, backing) = fresh();
        let mut sink = RecordingNotifier::new();

        assert_eq!(
            ledger.add_income("", "10", &mut sink),
            Err(LedgerError::MissingDescription)
        );
        assert_eq!(
            ledger.add_income("coffee", "abc", &mut sink),
            Err(LedgerError::InvalidAmount("abc".to_string()))
        );
        assert_eq!(
            ledger.add_expense("   ", "10", &mut sink),
            Err(LedgerError::MissingDescription)
        );
        assert_eq!(
            ledger.add_expense("coffee", "", &mut sink),
            Err(LedgerError::InvalidAmount(String::new()))
        );

        assert!(ledger.income().is_empty());
        assert!(ledger.expenses().is_empty());
        assert_eq!(ledger.total_income(), 0.0);
        assert!(backing.get(LEDGER_KEY).unwrap().is_none(), "Rejected input must not write");

        assert_eq!(sink.received.len(), 4);
        assert!(sink.received.iter().all(|n| n.is_error()));
        assert_eq!(sink.received[0].message, "Please fill in all fields");
    }

    #[test]
    fn test_non_finite_amount_rejected() {
        assert!(matches!(
            validate_entry("x", "NaN"),
            Err(LedgerError::InvalidAmount(_))
        ));
        assert!(matches!(
            validate_entry("x", "inf"),
            Err(LedgerError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_zero_and_negative_amounts_allowed() {
        let (mut ledger, _) = fresh();
        let mut sink = RecordingNotifier::new();

        ledger.add_income("Refund", "-15.5", &mut sink).unwrap();
        ledger.add_income("Nothing", "0", &mut sink).unwrap();

        assert_eq!(ledger.income().len(), 2);
        assert_eq!(ledger.total_income(), -15.5);
    }

    #[test]
    fn test_description_trimmed() {
        let (mut ledger, _) = fresh();
        let mut sink = RecordingNotifier::new();

        let entry = ledger.add_expense("  Flour  ", " 12.25 ", &mut sink).unwrap();

        assert_eq!(entry.description, "Flour");
        assert_eq!(entry.amount, 12.25);
        assert_eq!(sink.last().unwrap().message, "$12.25 added to expenses");
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let (mut ledger, _) = fresh();
        let mut sink = RecordingNotifier::new();

        ledger.add_income("Sale", "50", &mut sink).unwrap();
        let before = sink.received.len();

        assert!(ledger.remove_income("does-not-exist", &mut sink).is_none());
        assert!(ledger.remove_expense("does-not-exist", &mut sink).is_none());

        assert_eq!(ledger.income().len(), 1);
        assert_eq!(ledger.total_income(), 50.0);
        assert_eq!(sink.received.len(), before, "No notification for unknown id");
    }

    #[test]
    fn test_remove_from_wrong_list_is_noop() {
        let (mut ledger, _) = fresh();
        let mut sink = RecordingNotifier::new();

        let sale = ledger.add_income("Sale", "50", &mut sink).unwrap();

        assert!(ledger.remove_expense(&sale.id, &mut sink).is_none());
        assert_eq!(ledger.income().len(), 1);
    }

    #[test]
    fn test_totals_match_fold_after_every_mutation() {
        let (mut ledger, _) = fresh();
        let mut sink = RecordingNotifier::new();
        let mut ids = Vec::new();

        for (i, amount) in ["10", "2.5", "7.25", "100"].iter().enumerate() {
            let entry = ledger.add_income(&format!("in {}", i), amount, &mut sink).unwrap();
            ids.push(entry.id);
            assert_totals_match(&ledger);

            ledger.add_expense(&format!("out {}", i), "1.5", &mut sink).unwrap();
            assert_totals_match(&ledger);
        }

        ledger.remove_income(&ids[1], &mut sink);
        assert_totals_match(&ledger);
        ledger.remove_income(&ids[1], &mut sink);
        assert_totals_match(&ledger);

        assert_eq!(ledger.total_income(), 117.25);
        assert_eq!(ledger.total_expenses(), 6.0);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let (mut ledger, _) = fresh();
        let mut sink = RecordingNotifier::new();

        ledger.add_expense("a", "1", &mut sink).unwrap();
        let b = ledger.add_expense("b", "2", &mut sink).unwrap();
        ledger.add_expense("c", "3", &mut sink).unwrap();
        ledger.remove_expense(&b.id, &mut sink);

        let names: Vec<&str> = ledger
            .expenses()
            .iter()
            .map(|e| e.description.as_str())
            .collect();
        assert_eq!(names, vec!["a", "c"]);
    }

    #[test]
    fn test_round_trip_through_sqlite() {
        let backing = SqliteStore::open_in_memory().unwrap();
        let mut sink = RecordingNotifier::new();

        let mut ledger = LedgerStore::load(backing.clone());
        ledger.add_income("Sale", "100", &mut sink).unwrap();
        ledger.add_income("Tip", "4.75", &mut sink).unwrap();
        ledger.add_expense("Rent", "40", &mut sink).unwrap();

        let reloaded = LedgerStore::load(backing);

        assert_eq!(reloaded.income(), ledger.income());
        assert_eq!(reloaded.expenses(), ledger.expenses());
        assert_eq!(reloaded.net_balance(), ledger.net_balance());
    }

    #[test]
    fn test_snapshot_layout() {
        let (mut ledger, backing) = fresh();
        let mut sink = RecordingNotifier::new();

        ledger.add_income("Sale", "100", &mut sink).unwrap();
        ledger.add_expense("Rent", "40", &mut sink).unwrap();

        let raw = backing.get(LEDGER_KEY).unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();

        assert_eq!(json["income"][0]["description"], "Sale");
        assert_eq!(json["expenses"][0]["amount"], 40.0);
        assert_eq!(json["totalIncome"], 100.0);
        assert_eq!(json["totalExpenses"], 40.0);
    }

    #[test]
    fn test_stored_totals_ignored_on_load() {
        let backing = MemoryStore::new();
        backing
            .set(
                LEDGER_KEY,
                r#"{
                    "income": [{"id": 1700000000000, "description": "Sale", "amount": 25, "date": "2024-01-01T10:00:00Z"}],
                    "expenses": [],
                    "totalIncome": 999,
                    "totalExpenses": 5
                }"#,
            )
            .unwrap();

        let ledger = LedgerStore::load(backing);

        assert_eq!(ledger.income()[0].id, "1700000000000");
        assert_eq!(ledger.total_income(), 25.0);
        assert_eq!(ledger.total_expenses(), 0.0);
    }

    #[test]
    fn test_empty_amount_asks_for_all_fields() {
        let (mut ledger, _) = fresh();
        let mut sink = RecordingNotifier::new();

        assert_eq!(
            ledger.add_income("Sale", "   ", &mut sink),
            Err(LedgerError::InvalidAmount(String::new()))
        );
        assert_eq!(sink.last().unwrap().message, "Please fill in all fields");

        let _ = ledger.add_income("Sale", "ten", &mut sink);
        assert_eq!(sink.last().unwrap().message, "amount \"ten\" is not a number");
    }

    #[test]
    fn test_failed_save_reports_error_only() {
        let mut ledger = LedgerStore::load(ReadOnlyStore);
        let mut sink = RecordingNotifier::new();

        let entry = ledger.add_income("Sale", "100", &mut sink).unwrap();

        assert_eq!(ledger.total_income(), 100.0, "In-memory entry still lands");
        assert_eq!(sink.received.len(), 1);
        assert!(sink.last().unwrap().is_error());

        assert!(ledger.remove_income(&entry.id, &mut sink).is_some());
        assert!(ledger.income().is_empty());
        assert_eq!(sink.received.len(), 2);
        assert!(sink.received.iter().all(|n| n.kind != NotificationKind::Success));
    }

    #[test]
    fn test_failed_save_leaves_error_on_screen() {
        let mut ledger = LedgerStore::load(ReadOnlyStore);
        let mut queue = NotificationQueue::default();

        ledger.add_expense("Rent", "40", &mut queue).unwrap();

        assert_eq!(queue.len(), 1);
        assert!(queue.current().unwrap().is_error());
    }

    #[test]
    fn test_load_snapshot_from_browser_app() {
        let backing = MemoryStore::new();
        backing
            .set(
                LEDGER_KEY,
                r#"{"income":[{"id":1718000000000,"description":"Venta","amount":100,"date":"10/6/2024"}],"expenses":[],"totalIncome":100,"totalExpenses":0}"#,
            )
            .unwrap();

        let mut ledger = LedgerStore::load(backing);

        assert_eq!(ledger.income().len(), 1);
        assert_eq!(ledger.total_income(), 100.0);
        assert_eq!(ledger.income()[0].display_date().len(), 10);

        let mut sink = RecordingNotifier::new();
        assert!(ledger.remove_income("1718000000000", &mut sink).is_some());
        assert_eq!(ledger.total_income(), 0.0);
    }
}
