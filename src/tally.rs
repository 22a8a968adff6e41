// 🧮 Tally Store - per-product sale counts
//
// Counts only move through increment/decrement; revenue and units sold are
// folds over the catalog, recomputed on every read.

use crate::db::{load_snapshot, save_snapshot, KeyValueStore};
use crate::entities::{default_catalog, format_amount, CatalogItem};
use crate::notify::{Notification, Notifier};
use std::collections::BTreeMap;

/// Storage key for the catalog snapshot
pub const TALLY_KEY: &str = "productCounts";

pub struct TallyStore<S: KeyValueStore> {
    store: S,
    items: BTreeMap<String, CatalogItem>,
}

impl<S: KeyValueStore> TallyStore<S> {
    /// Load the catalog from `store`, or start from the default catalog.
    ///
    /// Anything unusable (absent, undecodable, empty, bad prices) falls back
    /// to defaults. Nothing is written until the first mutation.
    pub fn load(store: S) -> Self {
        let items = load_snapshot::<BTreeMap<String, CatalogItem>, _>(&store, TALLY_KEY)
            .and_then(restore_ids)
            .unwrap_or_else(|| {
                tracing::info!("starting tally from the default catalog");
                default_catalog()
                    .into_iter()
                    .map(|item| (item.id.clone(), item))
                    .collect()
            });

        TallyStore { store, items }
    }

    /// Record one sale. Returns false for an unknown id.
    pub fn increment(&mut self, item_id: &str, sink: &mut dyn Notifier) -> bool {
        let Some(item) = self.items.get_mut(item_id) else {
            tracing::debug!(item_id, "increment ignored: unknown item");
            return false;
        };

        item.count += 1;
        let message = format!("{} added to the tally", item.name);

        if self.persist(sink) {
            sink.notify(Notification::success("Product sold! 🎉", message));
        }
        true
    }

    /// Take back one sale. Silent no-op at zero or for an unknown id.
    pub fn decrement(&mut self, item_id: &str, sink: &mut dyn Notifier) -> bool {
        let Some(item) = self.items.get_mut(item_id) else {
            tracing::debug!(item_id, "decrement ignored: unknown item");
            return false;
        };

        if item.count == 0 {
            tracing::debug!(item_id, "decrement ignored: count already zero");
            return false;
        }

        item.count -= 1;
        let message = format!("{} removed from the tally", item.name);

        if self.persist(sink) {
            sink.notify(Notification::success("Product removed", message));
        }
        true
    }

    /// Σ count × price
    pub fn total_revenue(&self) -> f64 {
        self.items.values().map(CatalogItem::subtotal).sum()
    }

    /// Σ count
    pub fn total_items_sold(&self) -> u64 {
        self.items.values().map(|item| item.count).sum()
    }

    /// Catalog in stable id order
    pub fn items(&self) -> impl Iterator<Item = &CatalogItem> {
        self.items.values()
    }

    pub fn item(&self, item_id: &str) -> Option<&CatalogItem> {
        self.items.get(item_id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn summary_line(&self) -> String {
        format!(
            "{} items sold, {} total",
            self.total_items_sold(),
            format_amount(self.total_revenue())
        )
    }

    /// False when the write failed; the error has already been reported.
    fn persist(&self, sink: &mut dyn Notifier) -> bool {
        match save_snapshot(&self.store, TALLY_KEY, &self.items) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(error = %e, "failed to save tally");
                sink.notify(Notification::error("Save failed", format!("{:#}", e)));
                false
            }
        }
    }
}

/// Put the map keys back into the records and reject catalogs we can't use
fn restore_ids(mut items: BTreeMap<String, CatalogItem>) -> Option<BTreeMap<String, CatalogItem>> {
    if items.is_empty() {
        tracing::warn!("persisted tally is empty; using the default catalog");
        return None;
    }

    for (id, item) in items.iter_mut() {
        if !item.has_valid_price() {
            tracing::warn!(item_id = %id, price = item.price, "persisted tally has an invalid price; using the default catalog");
            return None;
        }
        item.id = id.clone();
    }

    Some(items)
}
