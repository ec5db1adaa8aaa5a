//! Order Grouping
//!
//! Projections over a flat list of orders. Groups borrow the orders they are built from and
//! are rebuilt whenever the list changes; nothing here mutates its input.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::debug;

use crate::{
    dates::text_to_slug,
    orders::{CompanyRef, Order, export::sort_for_export},
    schedules::Schedule,
};

/// Orders sharing a delivery date and company.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderGroup<'a> {
    /// Delivery date (ms)
    pub delivery_date: i64,

    /// Company the orders go to
    pub company: &'a CompanyRef,

    /// Orders in their original relative order
    pub orders: Vec<&'a Order>,

    /// Distinct customer ids, in order of first appearance
    pub customers: Vec<&'a str>,

    /// Distinct restaurant names, in order of first appearance
    pub restaurants: SmallVec<[&'a str; 4]>,

    /// Sum of item quantities
    pub total_quantity: u32,
}

impl<'a> OrderGroup<'a> {
    fn new(first: &'a Order) -> Self {
        Self {
            delivery_date: first.delivery_date_ms(),
            company: &first.company,
            orders: Vec::new(),
            customers: Vec::new(),
            restaurants: SmallVec::new(),
            total_quantity: 0,
        }
    }

    fn push(&mut self, order: &'a Order) {
        if !self.customers.contains(&order.customer.id.as_str()) {
            self.customers.push(&order.customer.id);
        }

        if !self.restaurants.contains(&order.restaurant.name.as_str()) {
            self.restaurants.push(&order.restaurant.name);
        }

        self.total_quantity = self.total_quantity.saturating_add(order.item.quantity);
        self.orders.push(order);
    }

    /// Number of distinct customers.
    pub fn headcount(&self) -> usize {
        self.customers.len()
    }
}

/// Groups orders by delivery date and company.
///
/// Groups come out in the order their key was first seen, and each group keeps its orders in
/// their original relative order.
pub fn group_by_date_and_company(orders: &[Order]) -> Vec<OrderGroup<'_>> {
    let mut index: FxHashMap<(i64, &str), usize> = FxHashMap::default();
    let mut groups: Vec<OrderGroup<'_>> = Vec::new();

    for order in orders {
        let key = (order.delivery_date_ms(), order.company.id.as_str());

        let position = *index.entry(key).or_insert_with(|| {
            groups.push(OrderGroup::new(order));
            groups.len() - 1
        });

        if let Some(group) = groups.get_mut(position) {
            group.push(order);
        }
    }

    groups
}

/// One restaurant's orders for a delivery date, joined to the matching schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct VendorOrderGroup<'a> {
    /// Delivery date (ms)
    pub delivery_date: i64,

    /// Orders in their original relative order
    pub orders: Vec<&'a Order>,

    /// Sum of item quantities
    pub quantity: u32,

    /// Schedule the restaurant has for this date
    pub schedule: Schedule,
}

/// Groups a restaurant's orders by delivery date.
///
/// `schedule_lookup` resolves the schedule for a date. Dates without a schedule are dropped:
/// such orders are stale and not shown to the vendor.
pub fn group_by_date_within_restaurant<F>(
    orders: &[Order],
    mut schedule_lookup: F,
) -> Vec<VendorOrderGroup<'_>>
where
    F: FnMut(i64) -> Option<Schedule>,
{
    let mut index: FxHashMap<i64, usize> = FxHashMap::default();
    let mut buckets: Vec<(i64, Vec<&Order>, u32)> = Vec::new();

    for order in orders {
        let date = order.delivery_date_ms();

        let position = *index.entry(date).or_insert_with(|| {
            buckets.push((date, Vec::new(), 0));
            buckets.len() - 1
        });

        if let Some((_, members, quantity)) = buckets.get_mut(position) {
            members.push(order);
            *quantity = quantity.saturating_add(order.item.quantity);
        }
    }

    buckets
        .into_iter()
        .filter_map(|(delivery_date, orders, quantity)| {
            let Some(schedule) = schedule_lookup(delivery_date) else {
                debug!(delivery_date, orders = orders.len(), "no schedule for orders, skipping");
                return None;
            };

            Some(VendorOrderGroup {
                delivery_date,
                orders,
                quantity,
                schedule,
            })
        })
        .collect()
}

/// A group's orders for a single restaurant.
#[derive(Debug, Clone, PartialEq)]
pub struct RestaurantOrders<'a> {
    /// Restaurant name
    pub restaurant_name: &'a str,

    /// Company the orders go to
    pub company: &'a CompanyRef,

    /// Delivery date (ms)
    pub delivery_date: i64,

    /// The restaurant's orders within the group
    pub orders: Vec<&'a Order>,
}

impl RestaurantOrders<'_> {
    /// Sum of item quantities.
    pub fn quantity(&self) -> u32 {
        self.orders
            .iter()
            .fold(0, |total, order| total.saturating_add(order.item.quantity))
    }
}

/// Splits a group into one entry per restaurant, in the group's restaurant order.
pub fn split_by_restaurant<'a>(group: &OrderGroup<'a>) -> Vec<RestaurantOrders<'a>> {
    group
        .restaurants
        .iter()
        .map(|&restaurant| RestaurantOrders {
            restaurant_name: restaurant,
            company: group.company,
            delivery_date: group.delivery_date,
            orders: group
                .orders
                .iter()
                .copied()
                .filter(|order| order.restaurant.name == restaurant)
                .collect(),
        })
        .collect()
}

/// Every order delivered on `delivery_date` across all groups, in export order.
pub fn orders_on_date<'a>(groups: &[OrderGroup<'a>], delivery_date: i64) -> Vec<&'a Order> {
    sort_for_export(
        groups
            .iter()
            .filter(|group| group.delivery_date == delivery_date)
            .flat_map(|group| group.orders.iter().copied()),
    )
}

/// Finds the group for a delivery date and company, given by id or by name slug.
pub fn find_group<'g, 'a>(
    groups: &'g [OrderGroup<'a>],
    delivery_date: i64,
    company: &str,
) -> Option<&'g OrderGroup<'a>> {
    groups.iter().find(|group| {
        group.delivery_date == delivery_date
            && (group.company.id == company || text_to_slug(&group.company.name) == company)
    })
}
