//! Orders
//!
//! Orders are created by the server and only ever read here.

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::dates::{DateError, utc_midnight_ms};

pub mod export;
pub mod grouping;
pub mod stats;

pub use grouping::{
    OrderGroup, RestaurantOrders, VendorOrderGroup, find_group, group_by_date_and_company,
    group_by_date_within_restaurant, orders_on_date, split_by_restaurant,
};

/// Order lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Placed, not yet delivered
    Processing,

    /// Delivered to the company
    Delivered,
}

/// Customer who placed an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCustomer {
    /// Customer id
    #[serde(rename = "_id")]
    pub id: String,

    /// First name
    pub first_name: String,

    /// Last name
    pub last_name: String,

    /// Email address
    pub email: String,
}

impl OrderCustomer {
    /// `First Last`
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Restaurant an order was placed with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestaurantRef {
    /// Restaurant id
    #[serde(rename = "_id")]
    pub id: String,

    /// Restaurant name
    pub name: String,
}

/// Company and shift an order is delivered to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyRef {
    /// Company id
    #[serde(rename = "_id")]
    pub id: String,

    /// Company name
    pub name: String,

    /// Shift (e.g. `day`, `night`)
    #[serde(default)]
    pub shift: String,
}

/// Where and when an order is delivered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delivery {
    /// Delivery date
    pub date: Timestamp,

    /// Delivery address
    #[serde(default)]
    pub address: String,
}

/// Payment recorded for an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    /// Payment intent id at the provider
    pub intent: String,

    /// Amount charged
    pub amount: Decimal,
}

/// The ordered item, as captured when the order was placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// Menu item id
    #[serde(rename = "_id")]
    pub id: String,

    /// Item name
    pub name: String,

    /// Comma separated tags
    #[serde(default)]
    pub tags: String,

    /// Image url
    #[serde(default)]
    pub image: Option<String>,

    /// Description
    #[serde(default)]
    pub description: String,

    /// Units ordered
    pub quantity: u32,

    /// Line total
    pub total: Decimal,

    /// Selected optional addons
    #[serde(default)]
    pub optional_addons: Option<String>,

    /// Selected required addons
    #[serde(default)]
    pub required_addons: Option<String>,

    /// Removed ingredients
    #[serde(default)]
    pub removed_ingredients: Option<String>,
}

impl OrderItem {
    /// Price of a single unit.
    pub fn unit_price(&self) -> Decimal {
        if self.quantity == 0 {
            return self.total;
        }

        self.total / Decimal::from(self.quantity)
    }

    /// Optional and required addons joined for display.
    pub fn addons(&self) -> String {
        [&self.optional_addons, &self.required_addons]
            .into_iter()
            .flatten()
            .map(|addons| addons.trim())
            .filter(|addons| !addons.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Order id
    #[serde(rename = "_id")]
    pub id: String,

    /// Customer
    pub customer: OrderCustomer,

    /// Restaurant
    pub restaurant: RestaurantRef,

    /// Company
    pub company: CompanyRef,

    /// Delivery details
    pub delivery: Delivery,

    /// Status
    pub status: OrderStatus,

    /// Payment, if the order was paid online
    #[serde(default)]
    pub payment: Option<Payment>,

    /// Creation time
    pub created_at: Timestamp,

    /// Whether the customer reviewed the item
    #[serde(default)]
    pub has_reviewed: bool,

    /// Ordered item
    pub item: OrderItem,
}

impl Order {
    /// Delivery date as epoch milliseconds.
    pub fn delivery_date_ms(&self) -> i64 {
        self.delivery.date.as_millisecond()
    }

    /// Delivery date truncated to its UTC midnight.
    ///
    /// # Errors
    ///
    /// Returns an error when the date is outside the supported range.
    pub fn delivery_day_ms(&self) -> Result<i64, DateError> {
        utc_midnight_ms(self.delivery_date_ms())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use jiff::Timestamp;
    use rust_decimal::Decimal;

    use super::*;

    /// Builds an order with just the fields grouping cares about.
    pub(crate) fn order(
        id: &str,
        date: &str,
        company: &str,
        restaurant: &str,
        customer: &str,
        item: &str,
        quantity: u32,
    ) -> Order {
        let delivery_date: Timestamp = format!("{date}T00:00:00Z")
            .parse()
            .unwrap_or(Timestamp::UNIX_EPOCH);

        Order {
            id: id.to_string(),
            customer: OrderCustomer {
                id: customer.to_string(),
                first_name: customer.to_string(),
                last_name: "Doe".to_string(),
                email: format!("{customer}@example.com"),
            },
            restaurant: RestaurantRef {
                id: format!("r-{restaurant}"),
                name: restaurant.to_string(),
            },
            company: CompanyRef {
                id: format!("c-{company}"),
                name: company.to_string(),
                shift: "day".to_string(),
            },
            delivery: Delivery {
                date: delivery_date,
                address: "1 Main St".to_string(),
            },
            status: OrderStatus::Processing,
            payment: None,
            created_at: Timestamp::UNIX_EPOCH,
            has_reviewed: false,
            item: OrderItem {
                id: format!("i-{item}"),
                name: item.to_string(),
                tags: String::new(),
                image: None,
                description: String::new(),
                quantity,
                total: Decimal::from(quantity) * Decimal::from(12),
                optional_addons: None,
                required_addons: None,
                removed_ingredients: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::dec;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn deserializes_api_order() -> TestResult {
        let order: Order = serde_json::from_str(
            r#"{
                "_id": "o1",
                "customer": { "_id": "u1", "firstName": "Ada", "lastName": "Lovelace", "email": "ada@example.com" },
                "restaurant": { "_id": "r1", "name": "Zed's" },
                "company": { "_id": "c1", "name": "Acme", "shift": "day" },
                "delivery": { "date": "2024-10-14T00:00:00.000Z", "address": "1 Main St" },
                "status": "PROCESSING",
                "createdAt": "2024-10-09T17:22:05.120Z",
                "hasReviewed": false,
                "item": {
                    "_id": "i1",
                    "name": "Burger",
                    "tags": "Halal",
                    "description": "Beef",
                    "quantity": 2,
                    "total": 25.5,
                    "optionalAddons": "Cheese"
                }
            }"#,
        )?;

        assert_eq!(order.status, OrderStatus::Processing);
        assert_eq!(order.delivery_date_ms(), 1_728_864_000_000);
        assert_eq!(order.item.unit_price(), dec!(12.75));
        assert_eq!(order.customer.full_name(), "Ada Lovelace");
        assert!(order.payment.is_none());

        Ok(())
    }

    #[test]
    fn addons_join_optional_and_required() {
        let mut order = test_support::order("o1", "2024-10-14", "Acme", "Zed", "u1", "Burger", 1);
        order.item.optional_addons = Some("Cheese".to_string());
        order.item.required_addons = Some(" Brioche ".to_string());

        assert_eq!(order.item.addons(), "Cheese, Brioche");

        order.item.optional_addons = Some(String::new());
        assert_eq!(order.item.addons(), "Brioche");
    }

    #[test]
    fn delivery_day_truncates_to_midnight() -> TestResult {
        let mut order = test_support::order("o1", "2024-10-14", "Acme", "Zed", "u1", "Burger", 1);
        order.delivery.date = "2024-10-14T19:00:00Z".parse()?;

        assert_eq!(order.delivery_day_ms()?, 1_728_864_000_000);

        Ok(())
    }
}
