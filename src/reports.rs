//! Reports
//!
//! Plain-text tables for the admin order overview and a vendor's daily sheet.

use std::ops::Range;

use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Style, Theme,
        object::{Columns, Rows},
    },
};

use crate::{
    dates::{DateError, date_to_text},
    orders::{OrderGroup, VendorOrderGroup, export::sort_for_export},
};

/// Admin overview: one row per delivery date and company.
///
/// # Errors
///
/// Returns a [`DateError`] if a delivery date cannot be rendered.
pub fn order_groups_table(groups: &[OrderGroup<'_>]) -> Result<String, DateError> {
    let mut builder = Builder::default();

    builder.push_record([
        "Delivery date",
        "Company",
        "Shift",
        "Restaurants",
        "Headcount",
        "Orders",
    ]);

    for group in groups {
        builder.push_record([
            date_to_text(group.delivery_date)?,
            group.company.name.clone(),
            group.company.shift.clone(),
            group.restaurants.join(", "),
            group.headcount().to_string(),
            group.orders.len().to_string(),
        ]);
    }

    Ok(render(builder, 4..6, None))
}

/// A vendor's sheet for one delivery date: one row per order plus a total.
pub fn vendor_table(group: &VendorOrderGroup<'_>) -> String {
    let mut builder = Builder::default();

    builder.push_record(["Name", "Quantity", "Removed", "Addons"]);

    let orders = sort_for_export(group.orders.iter().copied());

    for order in &orders {
        builder.push_record([
            order.item.name.clone(),
            order.item.quantity.to_string(),
            order.item.removed_ingredients.clone().unwrap_or_default(),
            order.item.addons(),
        ]);
    }

    builder.push_record([
        "Total".to_string(),
        group.quantity.to_string(),
        String::new(),
        String::new(),
    ]);

    render(builder, 1..2, Some(orders.len() + 1))
}

fn render(builder: Builder, numeric: Range<usize>, total_row: Option<usize>) -> String {
    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());
    let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(1, separator);

    if let Some(row) = total_row {
        theme.insert_horizontal_line(row, separator);
    }

    table.with(theme);
    table.modify(Columns::new(numeric), Alignment::right());
    table.modify(Rows::first(), Alignment::left());

    table.to_string()
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        orders::{group_by_date_and_company, group_by_date_within_restaurant, test_support::order},
        schedules::{Schedule, ScheduleStatus},
    };

    use super::*;

    #[test]
    fn overview_lists_each_group() -> TestResult {
        let orders = vec![
            order("o1", "2024-10-14", "Acme", "Zed", "u1", "Burger", 1),
            order("o2", "2024-10-14", "Acme", "Ace", "u2", "Salad", 2),
            order("o3", "2024-10-15", "Globex", "Zed", "u3", "Fries", 1),
        ];
        let groups = group_by_date_and_company(&orders);

        let table = order_groups_table(&groups)?;

        assert!(table.contains("Delivery date"));
        assert!(table.contains("Mon, 14 Oct"));
        assert!(table.contains("Zed, Ace"));
        assert!(table.contains("Globex"));
        assert_eq!(table.lines().count(), 6);

        Ok(())
    }

    #[test]
    fn vendor_sheet_ends_with_total() -> TestResult {
        let mut orders = vec![
            order("o1", "2024-10-14", "Acme", "Zed", "u1", "Burger", 2),
            order("o2", "2024-10-14", "Globex", "Zed", "u2", "Apple pie", 3),
        ];
        if let Some(first) = orders.first_mut() {
            first.item.removed_ingredients = Some("Onion".to_string());
        }
        let date = orders.first().map(|order| order.delivery.date).ok_or("no orders")?;

        let groups = group_by_date_within_restaurant(&orders, |_| {
            Some(Schedule {
                id: "s1".to_string(),
                date,
                status: ScheduleStatus::Active,
            })
        });
        let group = groups.first().ok_or("missing group")?;

        let table = vendor_table(group);
        let rows: Vec<&str> = table.lines().collect();

        let pie = rows.iter().position(|row| row.contains("Apple pie"));
        let burger = rows.iter().position(|row| row.contains("Burger"));

        assert!(pie < burger);
        assert!(table.contains("Onion"));
        assert!(rows.iter().rev().nth(1).is_some_and(|row| row.contains("Total") && row.contains('5')));

        Ok(())
    }
}
