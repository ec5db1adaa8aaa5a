//! Catalog
//!
//! Menu items as restaurants publish them. Addons arrive as a single comma separated string
//! such as `"Cheese - 1.50, Bacon - 2"`; a missing price means the addon is free.

use std::{collections::BTreeSet, str::FromStr};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::{add_cents, normalize_cents};

/// Addon rule of a menu item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddonRule {
    /// Comma separated `name - price` entries.
    #[serde(default)]
    pub addons: String,

    /// How many addons the customer may (optional) or must (required) pick.
    #[serde(default)]
    pub addable: usize,
}

impl AddonRule {
    /// Parses the addon entries into `(name, price)` pairs, skipping blanks.
    pub fn entries(&self) -> Vec<(String, Decimal)> {
        self.addons
            .split(',')
            .filter_map(|entry| {
                let entry = entry.trim();

                if entry.is_empty() {
                    return None;
                }

                match entry.rsplit_once(" - ") {
                    Some((name, price)) => match Decimal::from_str(price.trim()) {
                        Ok(price) => Some((name.trim().to_string(), price)),
                        Err(_) => Some((entry.to_string(), Decimal::ZERO)),
                    },
                    None => Some((entry.to_string(), Decimal::ZERO)),
                }
            })
            .collect()
    }

    /// Unit price of the selected addons; unknown names cost nothing.
    pub fn price_of(&self, selected: &BTreeSet<String>) -> Decimal {
        self.entries()
            .into_iter()
            .filter(|(name, _)| selected.contains(name))
            .fold(Decimal::ZERO, |acc, (_, price)| add_cents(acc, price))
    }
}

/// A restaurant menu item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    /// Item id
    #[serde(rename = "_id")]
    pub id: String,

    /// Display name
    pub name: String,

    /// Unit price
    pub price: Decimal,

    /// Description shown under the name
    #[serde(default)]
    pub description: String,

    /// Comma separated dietary tags
    #[serde(default)]
    pub tags: String,

    /// Image url
    #[serde(default)]
    pub image: Option<String>,

    /// Optional addons
    #[serde(default)]
    pub optional_addons: AddonRule,

    /// Required addons
    #[serde(default)]
    pub required_addons: AddonRule,

    /// Comma separated ingredients the customer may remove
    #[serde(default)]
    pub removable_ingredients: Option<String>,
}

impl MenuItem {
    /// Minimum number of required addons a cart line must carry.
    pub fn required_addon_count(&self) -> usize {
        self.required_addons.addable
    }

    /// Addon total for a line of `quantity` units with the given selections.
    pub fn addon_price(
        &self,
        optional: &BTreeSet<String>,
        required: &BTreeSet<String>,
        quantity: u32,
    ) -> Decimal {
        let unit = add_cents(
            self.optional_addons.price_of(optional),
            self.required_addons.price_of(required),
        );

        normalize_cents(unit * Decimal::from(quantity))
    }

    /// Ingredients the customer may remove.
    pub fn removable(&self) -> Vec<String> {
        self.removable_ingredients
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|ingredient| !ingredient.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::dec;

    use super::*;

    fn burger() -> MenuItem {
        MenuItem {
            id: "burger".to_string(),
            name: "Burger".to_string(),
            price: dec!(12.50),
            description: String::new(),
            tags: "Halal".to_string(),
            image: None,
            optional_addons: AddonRule {
                addons: "Cheese - 1.50, Bacon - 2, Pickles".to_string(),
                addable: 2,
            },
            required_addons: AddonRule {
                addons: "Brioche - 0.75, Sourdough - 0.5".to_string(),
                addable: 1,
            },
            removable_ingredients: Some("Onion, Tomato ,".to_string()),
        }
    }

    fn set(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|value| (*value).to_string()).collect()
    }

    #[test]
    fn entries_parse_names_and_prices() {
        let entries = burger().optional_addons.entries();

        assert_eq!(
            entries,
            vec![
                ("Cheese".to_string(), dec!(1.50)),
                ("Bacon".to_string(), dec!(2)),
                ("Pickles".to_string(), Decimal::ZERO),
            ]
        );
    }

    #[test]
    fn addon_price_multiplies_by_quantity() {
        let item = burger();

        let price = item.addon_price(&set(&["Cheese", "Pickles"]), &set(&["Brioche"]), 2);

        assert_eq!(price, dec!(4.50));
    }

    #[test]
    fn unknown_addons_are_free() {
        let item = burger();

        assert_eq!(item.addon_price(&set(&["Truffle"]), &set(&[]), 3), dec!(0));
    }

    #[test]
    fn removable_ingredients_are_trimmed() {
        assert_eq!(burger().removable(), vec!["Onion", "Tomato"]);
    }

    #[test]
    fn deserializes_api_shape() -> testresult::TestResult {
        let item: MenuItem = serde_json::from_str(
            r#"{
                "_id": "i1",
                "name": "Salad",
                "price": 9.25,
                "requiredAddons": { "addons": "Ranch", "addable": 1 }
            }"#,
        )?;

        assert_eq!(item.price, dec!(9.25));
        assert_eq!(item.required_addon_count(), 1);
        assert_eq!(item.optional_addons, AddonRule::default());

        Ok(())
    }
}
