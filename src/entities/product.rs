// 🛍️ Catalog Item - a sellable product with its running sale count
//
// The id is the key of the persisted map, so it is skipped when the record
// itself is serialized and restored by the tally store after loading.

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Stable key (`producto1`..), never changes
    #[serde(skip)]
    pub id: String,

    pub name: String,

    pub count: u64,

    /// Unit price
    pub price: f64,

    // ========================================================================
    // DISPLAY METADATA
    // ========================================================================
    #[serde(default, deserialize_with = "deserialize_display_tag")]
    pub icon: String,

    #[serde(default, deserialize_with = "deserialize_display_tag")]
    pub color: String,
}

impl CatalogItem {
    pub fn new(id: &str, name: &str, price: f64, icon: &str, color: &str) -> Self {
        CatalogItem {
            id: id.to_string(),
            name: name.to_string(),
            count: 0,
            price,
            icon: icon.to_string(),
            color: color.to_string(),
        }
    }

    /// count × price for this line
    pub fn subtotal(&self) -> f64 {
        self.count as f64 * self.price
    }

    /// Price must be a usable non-negative number
    pub fn has_valid_price(&self) -> bool {
        self.price.is_finite() && self.price >= 0.0
    }
}

/// Display tags are cosmetic. Older snapshots stored component objects
/// here, so anything that is not a string decodes as an empty tag.
fn deserialize_display_tag<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(tag) => tag,
        _ => String::new(),
    })
}

/// The four products the counter starts with, all at zero
pub fn default_catalog() -> Vec<CatalogItem> {
    vec![
        CatalogItem::new("producto1", "Café Premium", 5.50, "coffee", "amber"),
        CatalogItem::new("producto2", "Pastel Chocolate", 12.00, "cake", "pink"),
        CatalogItem::new("producto3", "Pizza Especial", 18.50, "pizza", "red"),
        CatalogItem::new("producto4", "Smoothie Natural", 8.00, "shopping-bag", "green"),
    ]
}
