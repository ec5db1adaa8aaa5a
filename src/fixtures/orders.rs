//! Order Fixtures

use std::str::FromStr;

use jiff::Timestamp;
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::{
    dates::{date_to_ms, ms_to_date},
    fixtures::FixtureError,
    money::normalize_cents,
    orders::{CompanyRef, Delivery, Order, OrderCustomer, OrderItem, OrderStatus, RestaurantRef},
};

/// Wrapper for orders in YAML
#[derive(Debug, Deserialize)]
pub struct OrdersFixture {
    /// Map of company key -> company
    #[serde(default)]
    pub companies: FxHashMap<String, CompanyFixture>,

    /// Map of restaurant key -> restaurant name
    #[serde(default)]
    pub restaurants: FxHashMap<String, String>,

    /// Map of customer key -> customer
    #[serde(default)]
    pub customers: FxHashMap<String, CustomerFixture>,

    /// Orders, in file order
    #[serde(default)]
    pub orders: Vec<OrderFixture>,
}

/// Company fixture from YAML
#[derive(Debug, Deserialize)]
pub struct CompanyFixture {
    /// Company name
    pub name: String,

    /// Shift
    #[serde(default)]
    pub shift: String,
}

/// Customer fixture from YAML
#[derive(Debug, Deserialize)]
pub struct CustomerFixture {
    /// First name
    pub first_name: String,

    /// Last name
    pub last_name: String,

    /// Email address
    pub email: String,
}

/// Order fixture from YAML
#[derive(Debug, Deserialize)]
pub struct OrderFixture {
    /// Order id
    pub id: String,

    /// Delivery date, e.g. `2024-10-14`
    pub date: String,

    /// Company key
    pub company: String,

    /// Restaurant key
    pub restaurant: String,

    /// Customer key
    pub customer: String,

    /// Item name
    pub item: String,

    /// Units ordered
    #[serde(default = "one")]
    pub quantity: u32,

    /// Unit price, e.g. `"12.50"`
    pub price: String,

    /// Order status
    #[serde(default = "processing")]
    pub status: OrderStatus,

    /// Optional addons
    #[serde(default)]
    pub optional_addons: Option<String>,

    /// Required addons
    #[serde(default)]
    pub required_addons: Option<String>,

    /// Removed ingredients
    #[serde(default)]
    pub removed: Option<String>,
}

fn one() -> u32 {
    1
}

fn processing() -> OrderStatus {
    OrderStatus::Processing
}

impl OrdersFixture {
    /// Resolve every order's company, restaurant and customer keys.
    ///
    /// # Errors
    ///
    /// Returns an error if a key is unknown or a date or price does not parse.
    pub fn into_orders(self) -> Result<Vec<Order>, FixtureError> {
        let Self {
            companies,
            restaurants,
            customers,
            orders,
        } = self;

        orders
            .into_iter()
            .map(|order| order.resolve(&companies, &restaurants, &customers))
            .collect()
    }
}

impl OrderFixture {
    fn resolve(
        self,
        companies: &FxHashMap<String, CompanyFixture>,
        restaurants: &FxHashMap<String, String>,
        customers: &FxHashMap<String, CustomerFixture>,
    ) -> Result<Order, FixtureError> {
        let company = companies
            .get(&self.company)
            .ok_or_else(|| FixtureError::CompanyNotFound(self.company.clone()))?;

        let restaurant_name = restaurants
            .get(&self.restaurant)
            .ok_or_else(|| FixtureError::RestaurantNotFound(self.restaurant.clone()))?;

        let customer = customers
            .get(&self.customer)
            .ok_or_else(|| FixtureError::CustomerNotFound(self.customer.clone()))?;

        let unit_price = parse_price(&self.price)?;
        let delivery_date = parse_date(&self.date)?;

        Ok(Order {
            id: self.id.clone(),
            customer: OrderCustomer {
                id: self.customer.clone(),
                first_name: customer.first_name.clone(),
                last_name: customer.last_name.clone(),
                email: customer.email.clone(),
            },
            restaurant: RestaurantRef {
                id: self.restaurant.clone(),
                name: restaurant_name.clone(),
            },
            company: CompanyRef {
                id: self.company.clone(),
                name: company.name.clone(),
                shift: company.shift.clone(),
            },
            delivery: Delivery {
                date: delivery_date,
                address: String::new(),
            },
            status: self.status,
            payment: None,
            created_at: delivery_date,
            has_reviewed: false,
            item: OrderItem {
                id: format!("{}-{}", self.restaurant, self.item.to_lowercase().replace(' ', "-")),
                name: self.item,
                tags: String::new(),
                image: None,
                description: String::new(),
                quantity: self.quantity,
                total: normalize_cents(unit_price * Decimal::from(self.quantity)),
                optional_addons: self.optional_addons,
                required_addons: self.required_addons,
                removed_ingredients: self.removed,
            },
        })
    }
}

/// Parse a price string such as `"12.50"`.
///
/// # Errors
///
/// Returns [`FixtureError::InvalidPrice`] if the string is not a decimal number.
pub fn parse_price(price: &str) -> Result<Decimal, FixtureError> {
    Decimal::from_str(price.trim()).map_err(|_err| FixtureError::InvalidPrice(price.to_string()))
}

/// Parse a fixture date (`2024-10-14`) into its UTC midnight.
///
/// # Errors
///
/// Returns a [`FixtureError::Date`] if the date does not parse.
pub fn parse_date(date: &str) -> Result<Timestamp, FixtureError> {
    Ok(ms_to_date(date_to_ms(date)?)?)
}

#[cfg(test)]
mod tests {
    use rust_decimal::dec;
    use testresult::TestResult;

    use super::*;

    const YAML: &str = r"
companies:
  acme: { name: Acme, shift: day }
restaurants:
  zed: Zed's Burgers
customers:
  ada: { first_name: Ada, last_name: Lovelace, email: ada@example.com }
orders:
  - { id: o1, date: 2024-10-14, company: acme, restaurant: zed, customer: ada, item: Cheese Burger, quantity: 2, price: '6.25' }
";

    #[test]
    fn resolves_keys_into_orders() -> TestResult {
        let fixture: OrdersFixture = serde_norway::from_str(YAML)?;

        let orders = fixture.into_orders()?;
        let order = orders.first().ok_or("missing order")?;

        assert_eq!(order.company.name, "Acme");
        assert_eq!(order.restaurant.name, "Zed's Burgers");
        assert_eq!(order.customer.full_name(), "Ada Lovelace");
        assert_eq!(order.item.total, dec!(12.50));
        assert_eq!(order.item.id, "zed-cheese-burger");
        assert_eq!(order.delivery_date_ms(), 1_728_864_000_000);
        assert_eq!(order.status, OrderStatus::Processing);

        Ok(())
    }

    #[test]
    fn unknown_company_is_an_error() -> TestResult {
        let fixture: OrdersFixture = serde_norway::from_str(&YAML.replace("company: acme", "company: globex"))?;

        assert!(matches!(
            fixture.into_orders(),
            Err(FixtureError::CompanyNotFound(key)) if key == "globex"
        ));

        Ok(())
    }

    #[test]
    fn prices_must_be_decimal() {
        assert!(matches!(parse_price("twelve"), Err(FixtureError::InvalidPrice(_))));
        assert!(parse_price(" 4.5 ").is_ok_and(|price| price == dec!(4.5)));
    }
}
