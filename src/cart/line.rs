//! Cart Lines

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Identity of a cart line: one line per item, company and delivery date.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CartLineKey {
    /// Menu item id
    pub item_id: String,

    /// Company the meal is delivered to
    pub company_id: String,

    /// Delivery date (UTC midnight, ms)
    pub delivery_date: i64,
}

impl CartLineKey {
    /// Create a new key.
    pub fn new(item_id: impl Into<String>, company_id: impl Into<String>, delivery_date: i64) -> Self {
        Self {
            item_id: item_id.into(),
            company_id: company_id.into(),
            delivery_date,
        }
    }
}

/// One pending selection in a customer's cart.
///
/// Field names on the wire match what the web client has always stored, so existing cart
/// slots keep loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Menu item id
    #[serde(rename = "_id")]
    pub item_id: String,

    /// Item name
    #[serde(default)]
    pub name: String,

    /// Item image url
    #[serde(default)]
    pub image: Option<String>,

    /// Company shift the line is ordered for
    #[serde(default)]
    pub shift: String,

    /// Restaurant serving the item
    pub restaurant_id: String,

    /// Company the meal is delivered to
    pub company_id: String,

    /// Delivery date (UTC midnight, ms)
    pub delivery_date: i64,

    /// Price of one unit
    #[serde(rename = "price")]
    pub unit_price: Decimal,

    /// Price of all selected addons for the whole line
    #[serde(default)]
    pub addon_price: Decimal,

    /// Number of units, at least one
    pub quantity: u32,

    /// Selected optional addons
    #[serde(default)]
    pub optional_addons: BTreeSet<String>,

    /// Selected required addons
    #[serde(default)]
    pub required_addons: BTreeSet<String>,

    /// Ingredients removed by the customer
    #[serde(default, rename = "removableIngredients")]
    pub removed_ingredients: BTreeSet<String>,
}

impl CartLine {
    /// Uniqueness key of the line.
    pub fn key(&self) -> CartLineKey {
        CartLineKey::new(
            self.item_id.clone(),
            self.company_id.clone(),
            self.delivery_date,
        )
    }

    /// Whether the line has the given key.
    pub fn matches(&self, key: &CartLineKey) -> bool {
        self.item_id == key.item_id
            && self.company_id == key.company_id
            && self.delivery_date == key.delivery_date
    }

    /// Line total before cent normalization: addons plus unit price times quantity.
    pub fn total(&self) -> Decimal {
        self.addon_price + self.unit_price * Decimal::from(self.quantity)
    }

    /// Copies the customer-editable fields of `other` onto this line.
    pub(crate) fn merge_from(&mut self, other: CartLine) {
        self.quantity = other.quantity;
        self.addon_price = other.addon_price;
        self.optional_addons = other.optional_addons;
        self.required_addons = other.required_addons;
        self.removed_ingredients = other.removed_ingredients;
    }
}
