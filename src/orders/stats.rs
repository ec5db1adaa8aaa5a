//! Dashboard aggregates over orders.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;

use crate::orders::Order;

/// Quantity ordered from one restaurant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderStat {
    /// Restaurant name
    pub restaurant_name: String,

    /// Units ordered
    pub quantity: u32,
}

/// Quantity ordered of one item at one restaurant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemStat {
    /// Restaurant name
    pub restaurant_name: String,

    /// Item name
    pub item_name: String,

    /// Units ordered
    pub quantity: u32,
}

/// Distinct customers ordering for one delivery date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PeopleStat {
    /// Delivery date (ms)
    pub delivery_date: i64,

    /// Distinct customers
    pub customers: usize,
}

/// Quantity per restaurant, in order of first appearance.
pub fn restaurant_quantities(orders: &[Order]) -> Vec<OrderStat> {
    let mut index: FxHashMap<&str, usize> = FxHashMap::default();
    let mut stats: Vec<OrderStat> = Vec::new();

    for order in orders {
        let position = *index.entry(order.restaurant.name.as_str()).or_insert_with(|| {
            stats.push(OrderStat {
                restaurant_name: order.restaurant.name.clone(),
                quantity: 0,
            });
            stats.len() - 1
        });

        if let Some(stat) = stats.get_mut(position) {
            stat.quantity = stat.quantity.saturating_add(order.item.quantity);
        }
    }

    stats
}

/// Quantity per restaurant and item, in order of first appearance.
pub fn item_quantities(orders: &[Order]) -> Vec<ItemStat> {
    let mut index: FxHashMap<(&str, &str), usize> = FxHashMap::default();
    let mut stats: Vec<ItemStat> = Vec::new();

    for order in orders {
        let key = (order.restaurant.name.as_str(), order.item.name.as_str());

        let position = *index.entry(key).or_insert_with(|| {
            stats.push(ItemStat {
                restaurant_name: order.restaurant.name.clone(),
                item_name: order.item.name.clone(),
                quantity: 0,
            });
            stats.len() - 1
        });

        if let Some(stat) = stats.get_mut(position) {
            stat.quantity = stat.quantity.saturating_add(order.item.quantity);
        }
    }

    stats
}

/// Distinct customers per delivery date, ascending by date.
pub fn customers_per_date(orders: &[Order]) -> Vec<PeopleStat> {
    let mut customers: FxHashMap<i64, FxHashSet<&str>> = FxHashMap::default();

    for order in orders {
        customers
            .entry(order.delivery_date_ms())
            .or_default()
            .insert(order.customer.id.as_str());
    }

    let mut stats: Vec<PeopleStat> = customers
        .into_iter()
        .map(|(delivery_date, customers)| PeopleStat {
            delivery_date,
            customers: customers.len(),
        })
        .collect();

    stats.sort_by_key(|stat| stat.delivery_date);

    stats
}
