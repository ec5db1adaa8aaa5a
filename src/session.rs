//! Customer Session
//!
//! Everything a logged in customer works with, owned in one place. A session is built on
//! login and consumed on logout; screens borrow what they need from it.

use std::{fmt, sync::Arc};

use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::{
    alerts::Alerts,
    api::{Api, ApiError},
    cache::DataCache,
    cart::CartStore,
    checkout::{Checkout, CheckoutError, LoadingFlag, Navigator, Submitted},
    discounts::DiscountStore,
    favorites::without_item,
    schedules::{ScheduleAction, ScheduleStatus, reported_status, restaurants_with_status},
    storage::Storage,
};

/// Alert shown after a schedule status change.
pub const STATUS_UPDATED: &str = "Status updated";

/// A logged in customer's state.
pub struct CustomerSession<S: Storage> {
    customer_id: String,
    cart: CartStore<S>,
    discounts: DiscountStore<S>,
    cache: DataCache,
    alerts: Alerts,
    loading: LoadingFlag,
    api: Arc<dyn Api>,
}

impl<S: Storage + fmt::Debug> fmt::Debug for CustomerSession<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomerSession")
            .field("customer_id", &self.customer_id)
            .field("cart", &self.cart)
            .field("discounts", &self.discounts)
            .field("cache", &self.cache)
            .field("alerts", &self.alerts)
            .field("loading", &self.loading)
            .finish_non_exhaustive()
    }
}

impl<S: Storage + Clone> CustomerSession<S> {
    /// Start a session, restoring the customer's cart and discount selection from `storage`.
    pub fn login(customer_id: impl Into<String>, storage: S, api: Arc<dyn Api>) -> Self {
        let customer_id = customer_id.into();

        let cart = CartStore::load(storage.clone(), customer_id.clone());
        let discounts = DiscountStore::load(storage, customer_id.clone());

        info!(customer = %customer_id, cart_lines = cart.len(), "session started");

        Self {
            customer_id,
            cart,
            discounts,
            cache: DataCache::new(),
            alerts: Alerts::new(),
            loading: LoadingFlag::new(),
            api,
        }
    }
}

impl<S: Storage> CustomerSession<S> {
    /// Customer id.
    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    /// Cart.
    pub fn cart(&self) -> &CartStore<S> {
        &self.cart
    }

    /// Cart, for changes.
    pub fn cart_mut(&mut self) -> &mut CartStore<S> {
        &mut self.cart
    }

    /// Discount selection.
    pub fn discounts(&self) -> &DiscountStore<S> {
        &self.discounts
    }

    /// Discount selection, for changes.
    pub fn discounts_mut(&mut self) -> &mut DiscountStore<S> {
        &mut self.discounts
    }

    /// Data cache.
    pub fn cache(&self) -> &DataCache {
        &self.cache
    }

    /// Data cache, for changes.
    pub fn cache_mut(&mut self) -> &mut DataCache {
        &mut self.cache
    }

    /// Alerts.
    pub fn alerts(&self) -> &Alerts {
        &self.alerts
    }

    /// Alerts, for dismissing.
    pub fn alerts_mut(&mut self) -> &mut Alerts {
        &mut self.alerts
    }

    /// Checkout loading flag, for the UI to observe.
    pub fn loading(&self) -> &LoadingFlag {
        &self.loading
    }

    /// Borrow the parts of the session a checkout works on.
    pub fn checkout(&mut self) -> Checkout<'_, S> {
        Checkout {
            api: self.api.as_ref(),
            loading: &self.loading,
            cart: &mut self.cart,
            discounts: &mut self.discounts,
            cache: &mut self.cache,
            alerts: &mut self.alerts,
        }
    }

    /// Submit the cart. See [`Checkout::submit`].
    ///
    /// # Errors
    ///
    /// Returns a [`CheckoutError`] when nothing was placed or local state was not cleared.
    pub async fn submit_cart<N: Navigator>(
        &mut self,
        navigator: &mut N,
    ) -> Result<Submitted, CheckoutError> {
        self.checkout().submit(navigator).await
    }

    /// Finish a paid checkout. See [`Checkout::complete_payment`].
    ///
    /// # Errors
    ///
    /// Returns a [`CheckoutError`] when the payment session cannot be read or local state was
    /// not cleared.
    pub async fn complete_payment(&mut self, session_id: &str) -> Result<Decimal, CheckoutError> {
        self.checkout().complete_payment(session_id).await
    }

    /// Fetch the customer's delivered orders into the cache.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] when the request fails; an error alert is pushed and the cache
    /// keeps its previous contents.
    pub async fn load_delivered_orders(&mut self) -> Result<usize, ApiError> {
        let orders = self
            .api
            .delivered_orders(&self.customer_id)
            .await
            .inspect_err(|err| self.alerts.push_error(err.to_string()))?;

        let count = orders.len();
        self.cache.delivered_orders.replace(orders);

        Ok(count)
    }

    /// Remove a favorite and drop it from the cache.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] when the request fails; an error alert is pushed and the cache
    /// keeps its previous contents.
    pub async fn remove_favorite(&mut self, item_id: &str) -> Result<(), ApiError> {
        self.api
            .remove_favorite(item_id)
            .await
            .inspect_err(|err| self.alerts.push_error(err.to_string()))?;

        let remaining = without_item(&self.cache.favorites.data, item_id);
        self.cache.favorites.replace(remaining);

        Ok(())
    }

    /// Flip a schedule between active and inactive.
    ///
    /// Returns the status the server reported, or `None` when its response did not mention
    /// the schedule; the cache is then left as it was.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] when the request fails; an error alert is pushed and the cache
    /// keeps its previous contents.
    pub async fn toggle_schedule(
        &mut self,
        restaurant_id: &str,
        schedule_id: &str,
        current: ScheduleStatus,
    ) -> Result<Option<ScheduleStatus>, ApiError> {
        let action = ScheduleAction::toggle(current);

        let reported = self
            .api
            .change_schedule_status(restaurant_id, schedule_id, action)
            .await
            .inspect_err(|err| self.alerts.push_error(err.to_string()))?;

        let Some(status) = reported_status(&reported, schedule_id) else {
            warn!(schedule_id, "status change response did not include the schedule");
            return Ok(None);
        };

        let updated =
            restaurants_with_status(&self.cache.scheduled_restaurants.data, schedule_id, status);

        self.cache.scheduled_restaurants.replace(updated);
        self.alerts.push_success(STATUS_UPDATED);

        Ok(Some(status))
    }

    /// End the session. The cart and discount slots stay in storage for the next login.
    pub fn logout(self) {
        info!(customer = %self.customer_id, "session ended");
    }
}
