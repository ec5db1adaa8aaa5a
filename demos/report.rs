//! Report Example
//!
//! This example loads a fixture set and prints the admin overview of its orders, followed by
//! each restaurant's daily vendor sheet.
//!
//! Use `-f` to load a fixture set by name
//! Use `-r` to only print the vendor sheets of one restaurant
//! Use `-o` to write one CSV per order group into a directory under `target`

use std::{
    fs::{File, create_dir_all},
    path::PathBuf,
};

use anyhow::Result;

use clap::Parser;
use rust_decimal::Decimal;
use rustc_hash::FxHashSet;
use spork::{
    config::{LogFormat, LoggingConfig},
    dates::date_to_text,
    fixtures::Fixture,
    money::format_usd,
    observability::init_logging,
    orders::{
        export::{csv_file_name, write_csv},
        group_by_date_and_company, group_by_date_within_restaurant,
        stats::customers_per_date,
    },
    reports::{order_groups_table, vendor_table},
    utils::ExampleReportArgs,
};
use tracing::info;

/// Report Example
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    let args = ExampleReportArgs::parse();

    init_logging(&LoggingConfig {
        log_level: "info".to_string(),
        log_format: LogFormat::Compact,
    })?;

    let fixture = Fixture::from_set(&args.fixture)?;
    let orders = fixture.orders();

    info!(fixture = %args.fixture, orders = orders.len(), "fixture loaded");

    let groups = group_by_date_and_company(orders);

    println!("{}", order_groups_table(&groups)?);

    for stat in customers_per_date(orders) {
        println!("{} customers on {}", stat.customers, date_to_text(stat.delivery_date)?);
    }

    let total = orders
        .iter()
        .fold(Decimal::ZERO, |sum, order| sum + order.item.total);

    println!("Total ordered: {}", format_usd(total));

    let mut restaurants: Vec<&str> = Vec::new();
    let mut seen = FxHashSet::default();

    for order in orders {
        if seen.insert(order.restaurant.id.as_str()) {
            restaurants.push(order.restaurant.id.as_str());
        }
    }

    for restaurant in restaurants {
        if args.restaurant.as_deref().is_some_and(|wanted| wanted != restaurant) {
            continue;
        }

        let restaurant_orders = fixture.restaurant_orders(restaurant);
        let vendor_groups =
            group_by_date_within_restaurant(&restaurant_orders, fixture.schedule_lookup(restaurant));

        for group in &vendor_groups {
            println!();
            println!("{restaurant} ({:?})", group.schedule.status);
            println!("{}", vendor_table(group));
        }
    }

    if let Some(out) = args.out.as_deref() {
        let output_dir = PathBuf::from("target").join(out);
        create_dir_all(&output_dir)?;

        for group in &groups {
            let path = output_dir.join(csv_file_name(group)?);

            write_csv(group, File::create(&path)?)?;

            println!("Wrote {}", path.display());
        }
    }

    Ok(())
}
