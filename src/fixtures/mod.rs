//! Fixtures
//!
//! YAML fixture sets for demos and tests. A set named `week` is made of
//! `orders/week.yml`, `menus/week.yml` and `schedules/week.yml` under the base path.

use std::{fs, path::PathBuf};

use rustc_hash::FxHashMap;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::{
    catalog::MenuItem,
    dates::DateError,
    fixtures::{menus::MenusFixture, orders::OrdersFixture, schedules::SchedulesFixture},
    orders::Order,
    schedules::{Schedule, schedule_on},
};

pub mod menus;
pub mod orders;
pub mod schedules;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Invalid date
    #[error(transparent)]
    Date(#[from] DateError),

    /// Company not found
    #[error("Company not found: {0}")]
    CompanyNotFound(String),

    /// Restaurant not found
    #[error("Restaurant not found: {0}")]
    RestaurantNotFound(String),

    /// Customer not found
    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    /// Menu item not found
    #[error("Menu item not found: {0}")]
    MenuItemNotFound(String),
}

/// Fixture
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Orders in file order
    orders: Vec<Order>,

    /// Menu items by key
    menu: FxHashMap<String, MenuItem>,

    /// Schedules by restaurant key, in file order
    schedules: FxHashMap<String, Vec<Schedule>>,
}

impl Fixture {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            orders: Vec::new(),
            menu: FxHashMap::default(),
            schedules: FxHashMap::default(),
        }
    }

    fn read<T: DeserializeOwned>(&self, category: &str, name: &str) -> Result<T, FixtureError> {
        let file_path = self.base_path.join(category).join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;

        Ok(serde_norway::from_str(&contents)?)
    }

    /// Load orders from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if an order references an
    /// unknown company, restaurant or customer.
    pub fn load_orders(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let fixture: OrdersFixture = self.read("orders", name)?;

        self.orders.extend(fixture.into_orders()?);

        Ok(self)
    }

    /// Load menu items from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if a price is invalid.
    pub fn load_menus(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let fixture: MenusFixture = self.read("menus", name)?;

        for (key, item) in fixture.items {
            let item = item.into_menu_item(key.clone())?;

            self.menu.insert(key, item);
        }

        Ok(self)
    }

    /// Load schedules from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if a date is invalid.
    pub fn load_schedules(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let fixture: SchedulesFixture = self.read("schedules", name)?;

        for schedule in &fixture.schedules {
            self.schedules
                .entry(schedule.restaurant.clone())
                .or_default()
                .push(schedule.to_schedule()?);
        }

        Ok(self)
    }

    /// Load a complete fixture set (orders, menus and schedules with the same name)
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture
            .load_orders(name)?
            .load_menus(name)?
            .load_schedules(name)?;

        Ok(fixture)
    }

    /// All orders
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Orders placed with one restaurant, by restaurant key
    pub fn restaurant_orders(&self, restaurant: &str) -> Vec<Order> {
        self.orders
            .iter()
            .filter(|order| order.restaurant.id == restaurant)
            .cloned()
            .collect()
    }

    /// Get a menu item by its key
    ///
    /// # Errors
    ///
    /// Returns an error if the item is not found.
    pub fn menu_item(&self, key: &str) -> Result<&MenuItem, FixtureError> {
        self.menu
            .get(key)
            .ok_or_else(|| FixtureError::MenuItemNotFound(key.to_string()))
    }

    /// Schedules of a restaurant, by restaurant key
    pub fn schedules(&self, restaurant: &str) -> &[Schedule] {
        self.schedules
            .get(restaurant)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Schedule lookup for [`group_by_date_within_restaurant`](crate::orders::group_by_date_within_restaurant).
    pub fn schedule_lookup(&self, restaurant: &str) -> impl Fn(i64) -> Option<Schedule> + '_ {
        let schedules = self.schedules(restaurant);

        move |delivery_date| schedule_on(schedules, delivery_date).cloned()
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}
