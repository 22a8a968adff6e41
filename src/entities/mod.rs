// Entity Models
//
// - CatalogItem: a product in the tally, keyed by a stable id
// - LedgerEntry: one income or expense line, keyed by a UUID

pub mod entry;
pub mod product;

pub use entry::{format_amount, EntryKind, LedgerEntry};
pub use product::{default_catalog, CatalogItem};
