//! Order Export
//!
//! CSV sheets and delivery labels. Both list orders by restaurant, then by item, so kitchens
//! and drivers read them in the same order.

use std::{cmp::Ordering, io};

use serde::Serialize;
use thiserror::Error;
use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

use crate::{
    dates::{DateError, date_to_text},
    money::format_usd,
    orders::{Order, grouping::OrderGroup},
};

/// Errors raised while exporting orders.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization failed.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// Writing the output failed.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// A delivery date could not be rendered.
    #[error(transparent)]
    Date(#[from] DateError),
}

/// Compares two strings the way a user-facing sort would: ignoring accents and case first,
/// then placing unaccented before accented and lowercase before uppercase.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| lowercase(a).cmp(lowercase(b)))
        .then_with(|| b.cmp(a))
}

fn base_letters(text: &str) -> impl Iterator<Item = char> + '_ {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

fn lowercase(text: &str) -> impl Iterator<Item = char> + '_ {
    text.chars().flat_map(char::to_lowercase)
}

/// Stable sort by restaurant name, then item name.
pub fn sort_for_export<'a>(orders: impl IntoIterator<Item = &'a Order>) -> Vec<&'a Order> {
    let mut orders: Vec<&'a Order> = orders.into_iter().collect();

    orders.sort_by(|a, b| {
        locale_cmp(&a.restaurant.name, &b.restaurant.name)
            .then_with(|| locale_cmp(&a.item.name, &b.item.name))
    });

    orders
}

/// One CSV row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CsvRow {
    /// Customer first name
    #[serde(rename = "First name")]
    pub first_name: String,

    /// Customer last name
    #[serde(rename = "Last name")]
    pub last_name: String,

    /// Customer email
    #[serde(rename = "Email")]
    pub customer_email: String,

    /// Company name
    #[serde(rename = "Company")]
    pub company_name: String,

    /// Company shift
    #[serde(rename = "Shift")]
    pub shift: String,

    /// Delivery date, e.g. `Mon, 14 Oct`
    #[serde(rename = "Delivery date")]
    pub delivery_date: String,

    /// Restaurant name
    #[serde(rename = "Restaurant")]
    pub restaurant_name: String,

    /// Item name
    #[serde(rename = "Dish")]
    pub item_name: String,

    /// Item tags
    #[serde(rename = "Tags")]
    pub tags: String,

    /// Item description
    #[serde(rename = "Description")]
    pub description: String,

    /// Units ordered
    #[serde(rename = "Quantity")]
    pub quantity: u32,

    /// Line total, formatted
    #[serde(rename = "Price")]
    pub price: String,

    /// Optional addons
    #[serde(rename = "Optional addons")]
    pub optional_addons: String,

    /// Required addons
    #[serde(rename = "Required addons")]
    pub required_addons: String,

    /// Removed ingredients
    #[serde(rename = "Removed ingredients")]
    pub removed_ingredients: String,
}

impl TryFrom<&Order> for CsvRow {
    type Error = DateError;

    fn try_from(order: &Order) -> Result<Self, Self::Error> {
        Ok(Self {
            first_name: order.customer.first_name.clone(),
            last_name: order.customer.last_name.clone(),
            customer_email: order.customer.email.clone(),
            company_name: order.company.name.clone(),
            shift: order.company.shift.clone(),
            delivery_date: date_to_text(order.delivery_date_ms())?,
            restaurant_name: order.restaurant.name.clone(),
            item_name: order.item.name.clone(),
            tags: order.item.tags.clone(),
            description: order.item.description.clone(),
            quantity: order.item.quantity,
            price: format_usd(order.item.total),
            optional_addons: order.item.optional_addons.clone().unwrap_or_default(),
            required_addons: order.item.required_addons.clone().unwrap_or_default(),
            removed_ingredients: order.item.removed_ingredients.clone().unwrap_or_default(),
        })
    }
}

/// CSV rows of a group, in export order.
///
/// # Errors
///
/// Returns a [`DateError`] if a delivery date cannot be rendered.
pub fn csv_rows(group: &OrderGroup<'_>) -> Result<Vec<CsvRow>, DateError> {
    sort_for_export(group.orders.iter().copied())
        .into_iter()
        .map(CsvRow::try_from)
        .collect()
}

/// Writes a group as CSV, header first.
///
/// # Errors
///
/// Returns an [`ExportError`] if a row cannot be rendered or written.
pub fn write_csv<W: io::Write>(group: &OrderGroup<'_>, writer: W) -> Result<(), ExportError> {
    let mut csv = csv::Writer::from_writer(writer);

    for row in csv_rows(group)? {
        csv.serialize(row)?;
    }

    csv.flush()?;

    Ok(())
}

/// File name for a group's CSV, e.g. `Acme - day - Mon, 14 Oct.csv`.
///
/// # Errors
///
/// Returns a [`DateError`] if the delivery date cannot be rendered.
pub fn csv_file_name(group: &OrderGroup<'_>) -> Result<String, DateError> {
    Ok(format!(
        "{} - {} - {}.csv",
        group.company.name,
        group.company.shift,
        date_to_text(group.delivery_date)?
    ))
}

/// A delivery label stuck on each bag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Label {
    /// Customer full name
    pub customer_name: String,

    /// Company name
    pub company_name: String,

    /// Company shift
    pub shift: String,

    /// Restaurant name
    pub restaurant_name: String,

    /// Item name
    pub item_name: String,

    /// Selected addons
    pub addons: String,

    /// Removed ingredients
    pub removed: String,
}

/// One label per order, in export order.
pub fn labels<'a>(orders: impl IntoIterator<Item = &'a Order>) -> Vec<Label> {
    sort_for_export(orders)
        .into_iter()
        .map(|order| Label {
            customer_name: order.customer.full_name(),
            company_name: order.company.name.clone(),
            shift: order.company.shift.clone(),
            restaurant_name: order.restaurant.name.clone(),
            item_name: order.item.name.clone(),
            addons: order.item.addons(),
            removed: order.item.removed_ingredients.clone().unwrap_or_default(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::orders::{group_by_date_and_company, test_support::order};

    use super::*;

    #[test]
    fn locale_cmp_ignores_case_first() {
        assert_eq!(locale_cmp("apple", "Banana"), Ordering::Less);
        assert_eq!(locale_cmp("Zed", "ace"), Ordering::Greater);
        assert_eq!(locale_cmp("a", "A"), Ordering::Less);
        assert_eq!(locale_cmp("same", "same"), Ordering::Equal);
    }

    #[test]
    fn locale_cmp_ignores_accents_first() {
        assert_eq!(locale_cmp("Éclair", "Fries"), Ordering::Less);
        assert_eq!(locale_cmp("Crème brûlée", "Creme caramel"), Ordering::Less);
        assert_eq!(locale_cmp("Açaí bowl", "Apple pie"), Ordering::Less);
        assert_eq!(locale_cmp("resume", "résumé"), Ordering::Less);
        assert_eq!(locale_cmp("Résumé", "résumé"), Ordering::Greater);
    }

    #[test]
    fn sorts_by_restaurant_then_item() {
        let orders = [
            order("o1", "2024-10-14", "Acme", "Zed", "u1", "Apple", 1),
            order("o2", "2024-10-14", "Acme", "Ace", "u2", "Banana", 1),
        ];

        let sorted = sort_for_export(&orders);

        let ids: Vec<&str> = sorted.iter().map(|order| order.id.as_str()).collect();

        assert_eq!(ids, vec!["o2", "o1"]);
    }

    #[test]
    fn sort_is_stable_for_equal_keys() {
        let orders = [
            order("o1", "2024-10-14", "Acme", "Ace", "u1", "Wrap", 1),
            order("o2", "2024-10-14", "Acme", "Ace", "u2", "Wrap", 1),
            order("o3", "2024-10-14", "Acme", "Ace", "u3", "Bowl", 1),
        ];

        let ids: Vec<&str> = sort_for_export(&orders)
            .iter()
            .map(|order| order.id.as_str())
            .collect();

        assert_eq!(ids, vec!["o3", "o1", "o2"]);
    }

    #[test]
    fn csv_lists_rows_in_export_order() -> TestResult {
        let mut orders = vec![
            order("o1", "2024-10-14", "Acme", "Zed", "u1", "Burger", 2),
            order("o2", "2024-10-14", "Acme", "Ace", "u2", "Salad", 1),
        ];
        if let Some(first) = orders.first_mut() {
            first.item.optional_addons = Some("Cheese".to_string());
        }

        let groups = group_by_date_and_company(&orders);
        let group = groups.first().ok_or("missing group")?;

        let mut out = Vec::new();
        write_csv(group, &mut out)?;
        let csv = String::from_utf8(out)?;

        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines.first().is_some_and(|header| header.starts_with("First name,Last name,Email")));
        assert!(lines.get(1).is_some_and(|row| row.contains("Ace") && row.contains("Salad")));
        assert!(lines.get(2).is_some_and(|row| row.contains("$24.00") && row.contains("Cheese")));
        assert!(lines.get(2).is_some_and(|row| row.contains("\"Mon, 14 Oct\"")));

        assert_eq!(csv_file_name(group)?, "Acme - day - Mon, 14 Oct.csv");

        Ok(())
    }

    #[test]
    fn labels_follow_export_order() {
        let mut orders = vec![
            order("o1", "2024-10-14", "Acme", "Zed", "u1", "Burger", 1),
            order("o2", "2024-10-14", "Acme", "Ace", "u2", "Salad", 1),
        ];
        if let Some(first) = orders.first_mut() {
            first.item.removed_ingredients = Some("Onion".to_string());
        }

        let labels = labels(&orders);

        let summary: Vec<(&str, &str)> = labels
            .iter()
            .map(|label| (label.restaurant_name.as_str(), label.removed.as_str()))
            .collect();

        assert_eq!(summary, vec![("Ace", ""), ("Zed", "Onion")]);
        assert_eq!(labels.first().map(|label| label.customer_name.as_str()), Some("u2 Doe"));
    }
}
