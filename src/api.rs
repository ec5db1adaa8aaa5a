//! API
//!
//! The REST API the client talks to. Everything behind it (orders, schedules, payments) is
//! owned by the server; this module only shapes requests and decodes responses.

use std::collections::BTreeSet;

use async_trait::async_trait;
use mockall::automock;
use reqwest::{Client, Response, StatusCode};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    cart::CartLine,
    money::cents_to_dollars,
    orders::Order,
    schedules::{ScheduleAction, ScheduledRestaurant},
};

/// Errors raised by API calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never got a response.
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("{message}")]
    Status {
        /// HTTP status code
        status: u16,

        /// Message from the error body, or the raw body
        message: String,
    },

    /// The response body did not have the expected shape.
    #[error("unexpected response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// One order to create, built from a cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLinePayload {
    /// Menu item id
    pub item_id: String,

    /// Units
    pub quantity: u32,

    /// Company the meal is delivered to
    pub company_id: String,

    /// Restaurant serving the item
    pub restaurant_id: String,

    /// Delivery date (UTC midnight, ms)
    pub delivery_date: i64,

    /// Selected optional addons
    pub optional_addons: BTreeSet<String>,

    /// Selected required addons
    pub required_addons: BTreeSet<String>,

    /// Removed ingredients
    pub removed_ingredients: BTreeSet<String>,
}

impl From<&CartLine> for OrderLinePayload {
    fn from(line: &CartLine) -> Self {
        Self {
            item_id: line.item_id.clone(),
            quantity: line.quantity,
            company_id: line.company_id.clone(),
            restaurant_id: line.restaurant_id.clone(),
            delivery_date: line.delivery_date,
            optional_addons: line.optional_addons.clone(),
            required_addons: line.required_addons.clone(),
            removed_ingredients: line.removed_ingredients.clone(),
        }
    }
}

/// Body of the batch order request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrdersRequest {
    /// Discount code to apply
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_code_id: Option<String>,

    /// One entry per cart line
    pub orders_payload: Vec<OrderLinePayload>,
}

impl CreateOrdersRequest {
    /// Build a request covering every line of a cart.
    pub fn from_lines<'a>(
        lines: impl IntoIterator<Item = &'a CartLine>,
        discount_code_id: Option<String>,
    ) -> Self {
        Self {
            discount_code_id,
            orders_payload: lines.into_iter().map(OrderLinePayload::from).collect(),
        }
    }
}

/// What the server did with a batch order request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CheckoutOutcome {
    /// Payment is needed first; the customer continues at this url.
    Redirect(String),

    /// Orders were created without payment.
    Confirmed(Vec<Order>),
}

#[derive(Debug, Serialize)]
struct ChangeScheduleStatus {
    action: ScheduleAction,
}

/// Paid amount of a payment session, in cents.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
struct SessionAmount(Decimal);

impl SessionAmount {
    fn dollars(self) -> Decimal {
        cents_to_dollars(self.0)
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// REST client backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpApi {
    base_url: String,
    http: Client,
}

impl HttpApi {
    /// Client for the API at `base_url`, e.g. `http://localhost:5100/api`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Client reusing an existing `reqwest` client.
    #[must_use]
    pub fn with_client(base_url: impl Into<String>, http: Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        }
    }

    /// Base url requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(status_error(status, body));
    }

    Ok(serde_json::from_str(&body)?)
}

async fn expect_success(response: Response) -> Result<(), ApiError> {
    let status = response.status();

    if status.is_success() {
        return Ok(());
    }

    let body = response.text().await.unwrap_or_default();

    Err(status_error(status, body))
}

fn status_error(status: StatusCode, body: String) -> ApiError {
    let message = serde_json::from_str::<ErrorBody>(&body)
        .map(|error| error.message)
        .unwrap_or(body);

    warn!(status = status.as_u16(), %message, "api request failed");

    ApiError::Status {
        status: status.as_u16(),
        message,
    }
}

#[async_trait]
impl Api for HttpApi {
    async fn create_orders(&self, request: &CreateOrdersRequest) -> Result<CheckoutOutcome, ApiError> {
        debug!(lines = request.orders_payload.len(), "creating orders");

        let response = self
            .http
            .post(self.url("/orders/create-orders"))
            .json(request)
            .send()
            .await?;

        decode(response).await
    }

    async fn delivered_orders(&self, customer_id: &str) -> Result<Vec<Order>, ApiError> {
        let response = self
            .http
            .get(self.url(&format!("/orders/{customer_id}/all-delivered-orders")))
            .send()
            .await?;

        decode(response).await
    }

    async fn change_schedule_status(
        &self,
        restaurant_id: &str,
        schedule_id: &str,
        action: ScheduleAction,
    ) -> Result<Vec<ScheduledRestaurant>, ApiError> {
        let response = self
            .http
            .patch(self.url(&format!(
                "/restaurants/{restaurant_id}/{schedule_id}/change-schedule-status"
            )))
            .json(&ChangeScheduleStatus { action })
            .send()
            .await?;

        decode(response).await
    }

    async fn remove_favorite(&self, item_id: &str) -> Result<(), ApiError> {
        let response = self
            .http
            .delete(self.url(&format!("/favorites/{item_id}/remove")))
            .send()
            .await?;

        expect_success(response).await
    }

    async fn checkout_session(&self, session_id: &str) -> Result<Decimal, ApiError> {
        let response = self
            .http
            .get(self.url(&format!("/stripe/session/{session_id}")))
            .send()
            .await?;

        let amount: SessionAmount = decode(response).await?;

        Ok(amount.dollars())
    }
}

/// Server calls the client makes.
#[automock]
#[async_trait]
pub trait Api: Send + Sync {
    /// Place one order per payload line. The server either confirms the orders or asks for
    /// payment first.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails or the server rejects the orders.
    async fn create_orders(&self, request: &CreateOrdersRequest) -> Result<CheckoutOutcome, ApiError>;

    /// All delivered orders of a customer.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails.
    async fn delivered_orders(&self, customer_id: &str) -> Result<Vec<Order>, ApiError>;

    /// Activate or deactivate a restaurant's schedule, returning the updated schedules.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails.
    async fn change_schedule_status(
        &self,
        restaurant_id: &str,
        schedule_id: &str,
        action: ScheduleAction,
    ) -> Result<Vec<ScheduledRestaurant>, ApiError>;

    /// Remove an item from the customer's favorites.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails.
    async fn remove_favorite(&self, item_id: &str) -> Result<(), ApiError>;

    /// Amount paid in a finished payment session, in dollars.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the session is unknown or the request fails.
    async fn checkout_session(&self, session_id: &str) -> Result<Decimal, ApiError>;
}
