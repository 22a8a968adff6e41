// 🧾 Ledger Entry - one manual income or expense line
//
// Identity is a UUID generated at creation. Older snapshots carried numeric
// wall-clock ids and a locale calendar date ("10/6/2024"); both still decode.

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Income,
    Expense,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Income => "Income",
            EntryKind::Expense => "Expense",
        }
    }

    pub fn other(&self) -> Self {
        match self {
            EntryKind::Income => EntryKind::Expense,
            EntryKind::Expense => EntryKind::Income,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    #[serde(deserialize_with = "deserialize_entry_id")]
    pub id: String,

    pub description: String,

    pub amount: f64,

    /// Creation time, never changes
    #[serde(rename = "date", deserialize_with = "deserialize_created_at")]
    pub created_at: DateTime<Utc>,
}

impl LedgerEntry {
    pub fn new(description: String, amount: f64) -> Self {
        LedgerEntry {
            id: uuid::Uuid::new_v4().to_string(),
            description,
            amount,
            created_at: Utc::now(),
        }
    }

    /// Local calendar date, e.g. "18/10/2026"
    pub fn display_date(&self) -> String {
        self.created_at
            .with_timezone(&Local)
            .format("%d/%m/%Y")
            .to_string()
    }

    /// First characters of the id, enough to tell entries apart on screen
    pub fn short_id(&self) -> &str {
        let end = self
            .id
            .char_indices()
            .nth(8)
            .map(|(i, _)| i)
            .unwrap_or(self.id.len());
        &self.id[..end]
    }
}

/// Format an amount the way every total and toast shows it
pub fn format_amount(amount: f64) -> String {
    if amount < 0.0 {
        format!("-${:.2}", amount.abs())
    } else {
        format!("${:.2}", amount)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntryId {
    Text(String),
    Number(u64),
}

fn deserialize_entry_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawEntryId::deserialize(deserializer)? {
        RawEntryId::Text(id) => id,
        RawEntryId::Number(id) => id.to_string(),
    })
}

/// Calendar-only layouts seen in older snapshots, day-first tried first
const LEGACY_DATE_FORMATS: [&str; 4] = ["%d/%m/%Y", "%m/%d/%Y", "%d.%m.%Y", "%Y-%m-%d"];

fn parse_created_at(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(text) {
        return Some(at.with_timezone(&Utc));
    }

    LEGACY_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}

fn deserialize_created_at<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    Ok(parse_created_at(&text).unwrap_or_else(|| {
        tracing::warn!(date = %text, "unrecognised entry date; using the epoch");
        DateTime::UNIX_EPOCH
    }))
}
