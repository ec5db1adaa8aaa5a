//! Menu Fixtures

use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::{
    catalog::{AddonRule, MenuItem},
    fixtures::{FixtureError, orders::parse_price},
};

/// Wrapper for menu items in YAML
#[derive(Debug, Deserialize)]
pub struct MenusFixture {
    /// Map of item key -> item
    pub items: FxHashMap<String, MenuItemFixture>,
}

/// Menu item fixture from YAML
#[derive(Debug, Deserialize)]
pub struct MenuItemFixture {
    /// Item name
    pub name: String,

    /// Unit price, e.g. `"12.50"`
    pub price: String,

    /// Comma separated tags
    #[serde(default)]
    pub tags: String,

    /// Description
    #[serde(default)]
    pub description: String,

    /// Optional addons
    #[serde(default)]
    pub optional_addons: AddonRule,

    /// Required addons
    #[serde(default)]
    pub required_addons: AddonRule,

    /// Comma separated removable ingredients
    #[serde(default)]
    pub removable: Option<String>,
}

impl MenuItemFixture {
    /// Convert into a [`MenuItem`] with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::InvalidPrice`] if the price does not parse.
    pub fn into_menu_item(self, id: String) -> Result<MenuItem, FixtureError> {
        Ok(MenuItem {
            id,
            name: self.name,
            price: parse_price(&self.price)?,
            description: self.description,
            tags: self.tags,
            image: None,
            optional_addons: self.optional_addons,
            required_addons: self.required_addons,
            removable_ingredients: self.removable,
        })
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::dec;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn menu_item_keeps_addon_rules() -> TestResult {
        let fixture: MenusFixture = serde_norway::from_str(
            r"
items:
  burger:
    name: Burger
    price: '10.00'
    required_addons: { addons: 'Brioche, Sourdough - 1', addable: 1 }
    removable: Onion, Pickles
",
        )?;

        let (key, item) = fixture.items.into_iter().next().ok_or("no items")?;
        let item = item.into_menu_item(key)?;

        assert_eq!(item.id, "burger");
        assert_eq!(item.price, dec!(10));
        assert_eq!(item.required_addon_count(), 1);
        assert_eq!(item.removable(), vec!["Onion", "Pickles"]);

        Ok(())
    }
}
