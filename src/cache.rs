//! Data Cache
//!
//! Server collections the client keeps around between screens. A collection is only ever
//! replaced as a whole; anything derived from it (groups, dates) is recomputed on demand.

use crate::{
    dates::OrderWindow,
    favorites::FavoriteItem,
    orders::{Order, OrderGroup, OrderStatus, group_by_date_and_company},
    schedules::{ScheduledRestaurant, UpcomingRestaurant, upcoming_dates},
};

/// A collection and whether it is still being fetched.
#[derive(Debug, Clone, PartialEq)]
pub struct Loadable<T> {
    /// A fetch is in progress
    pub is_loading: bool,

    /// Last fetched data
    pub data: T,
}

impl<T: Default> Default for Loadable<T> {
    fn default() -> Self {
        Self::loading()
    }
}

impl<T: Default> Loadable<T> {
    /// Nothing fetched yet.
    pub fn loading() -> Self {
        Self {
            is_loading: true,
            data: T::default(),
        }
    }
}

impl<T> Loadable<T> {
    /// Fetched data.
    pub fn loaded(data: T) -> Self {
        Self {
            is_loading: false,
            data,
        }
    }

    /// Replace the data, marking the collection loaded.
    pub fn replace(&mut self, data: T) {
        *self = Self::loaded(data);
    }
}

/// Collections shared by the screens of one session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataCache {
    /// Orders not yet delivered
    pub upcoming_orders: Loadable<Vec<Order>>,

    /// Delivered orders
    pub delivered_orders: Loadable<Vec<Order>>,

    /// Scheduled restaurants, as listed to admins
    pub scheduled_restaurants: Loadable<Vec<ScheduledRestaurant>>,

    /// Restaurants customers can order from
    pub upcoming_restaurants: Loadable<Vec<UpcomingRestaurant>>,

    /// Customer favorites
    pub favorites: Loadable<Vec<FavoriteItem>>,
}

impl DataCache {
    /// Empty cache with every collection loading.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends freshly placed orders to the upcoming orders.
    pub fn merge_upcoming(&mut self, placed: Vec<Order>) {
        let merged = self
            .upcoming_orders
            .data
            .iter()
            .cloned()
            .chain(placed)
            .collect();

        self.upcoming_orders.replace(merged);
    }

    /// Moves orders to the delivered collection, marking them delivered.
    ///
    /// Returns the number of orders moved.
    pub fn mark_delivered(&mut self, order_ids: &[&str]) -> usize {
        let (delivered, upcoming): (Vec<Order>, Vec<Order>) = self
            .upcoming_orders
            .data
            .iter()
            .cloned()
            .partition(|order| order_ids.contains(&order.id.as_str()));

        let moved = delivered.len();

        let delivered = self
            .delivered_orders
            .data
            .iter()
            .cloned()
            .chain(delivered.into_iter().map(|order| Order {
                status: OrderStatus::Delivered,
                ..order
            }))
            .collect();

        self.upcoming_orders.replace(upcoming);
        self.delivered_orders.replace(delivered);

        moved
    }

    /// Finds an order by id among upcoming, then delivered orders.
    pub fn find_order(&self, id: &str) -> Option<&Order> {
        self.upcoming_orders
            .data
            .iter()
            .chain(&self.delivered_orders.data)
            .find(|order| order.id == id)
    }

    /// Upcoming orders grouped by delivery date and company.
    pub fn upcoming_groups(&self) -> Vec<OrderGroup<'_>> {
        group_by_date_and_company(&self.upcoming_orders.data)
    }

    /// Delivered orders grouped by delivery date and company.
    pub fn delivered_groups(&self) -> Vec<OrderGroup<'_>> {
        group_by_date_and_company(&self.delivered_orders.data)
    }

    /// Dates customers can currently order for.
    pub fn upcoming_dates(&self, window: &OrderWindow) -> Vec<i64> {
        upcoming_dates(&self.upcoming_restaurants.data, window)
    }
}

#[cfg(test)]
mod tests {
    use crate::orders::test_support::order;

    use super::*;

    #[test]
    fn collections_start_loading() {
        let cache = DataCache::new();

        assert!(cache.upcoming_orders.is_loading);
        assert!(cache.favorites.data.is_empty());
    }

    #[test]
    fn merge_appends_and_marks_loaded() {
        let mut cache = DataCache::new();
        cache
            .upcoming_orders
            .replace(vec![order("o1", "2024-10-14", "Acme", "Zed", "u1", "Burger", 1)]);

        cache.merge_upcoming(vec![order("o2", "2024-10-15", "Acme", "Zed", "u1", "Burger", 1)]);

        let ids: Vec<&str> = cache
            .upcoming_orders
            .data
            .iter()
            .map(|order| order.id.as_str())
            .collect();

        assert_eq!(ids, vec!["o1", "o2"]);
        assert!(!cache.upcoming_orders.is_loading);
        assert_eq!(cache.upcoming_groups().len(), 2);
    }

    #[test]
    fn delivered_orders_move_between_collections() {
        let mut cache = DataCache::new();
        cache.upcoming_orders.replace(vec![
            order("o1", "2024-10-14", "Acme", "Zed", "u1", "Burger", 1),
            order("o2", "2024-10-14", "Acme", "Ace", "u2", "Salad", 1),
        ]);

        let moved = cache.mark_delivered(&["o2", "missing"]);

        assert_eq!(moved, 1);
        assert_eq!(cache.upcoming_orders.data.len(), 1);
        assert_eq!(
            cache.find_order("o2").map(|order| order.status),
            Some(OrderStatus::Delivered)
        );
        assert_eq!(cache.delivered_groups().len(), 1);
    }

    #[test]
    fn unknown_order_is_none() {
        assert!(DataCache::new().find_order("nope").is_none());
    }
}
