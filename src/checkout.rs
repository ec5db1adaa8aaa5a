//! Checkout
//!
//! Turns the cart into one batch order request. The server either confirms the orders right
//! away or hands back a payment page; in the second case the cart stays as it is until the
//! payment comes back through [`Checkout::complete_payment`].

use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::{
    alerts::Alerts,
    api::{Api, ApiError, CheckoutOutcome, CreateOrdersRequest},
    cache::DataCache,
    cart::{CartError, CartStore},
    discounts::DiscountStore,
    storage::{Storage, StorageError},
};

/// Route customers land on after placing orders.
pub const DASHBOARD_ROUTE: &str = "/dashboard";

/// Alert shown once orders are placed.
pub const ORDERS_PLACED: &str = "Orders placed";

/// Errors related to checkout.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// There is nothing to order.
    #[error("cart is empty")]
    EmptyCart,

    /// A checkout is already being submitted.
    #[error("checkout already in progress")]
    InFlight,

    /// The API call failed; the cart is unchanged.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Orders were placed but the cart could not be cleared.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Orders were placed but the discount selection could not be cleared.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Where the UI goes next.
pub trait Navigator {
    /// Open an external page, such as a payment form.
    fn open_external(&mut self, url: &str);

    /// Move to an in-app route.
    fn push(&mut self, route: &str);
}

/// Shared flag telling the UI a checkout is being submitted.
#[derive(Debug, Clone, Default)]
pub struct LoadingFlag(Arc<AtomicBool>);

impl LoadingFlag {
    /// A flag that is not set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a checkout is in flight.
    pub fn is_loading(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Sets the flag, or returns `None` if it is already set. The flag is cleared when the
    /// guard drops.
    pub fn try_begin(&self) -> Option<LoadingGuard> {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| LoadingGuard(Arc::clone(&self.0)))
    }
}

/// Clears a [`LoadingFlag`] on drop.
#[derive(Debug)]
pub struct LoadingGuard(Arc<AtomicBool>);

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Result of a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submitted {
    /// The customer was sent to the payment page at this url.
    Redirected(String),

    /// This many orders were placed.
    Placed(usize),
}

/// The session state a checkout reads and updates.
pub struct Checkout<'s, S: Storage> {
    /// API client
    pub api: &'s dyn Api,

    /// Loading flag shared with the UI
    pub loading: &'s LoadingFlag,

    /// Customer cart
    pub cart: &'s mut CartStore<S>,

    /// Customer discount selection
    pub discounts: &'s mut DiscountStore<S>,

    /// Session data cache
    pub cache: &'s mut DataCache,

    /// Session alerts
    pub alerts: &'s mut Alerts,
}

impl<S: Storage + fmt::Debug> fmt::Debug for Checkout<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Checkout")
            .field("loading", &self.loading)
            .field("cart", &self.cart)
            .field("discounts", &self.discounts)
            .finish_non_exhaustive()
    }
}

impl<S: Storage> Checkout<'_, S> {
    /// Submit the whole cart as one batch.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::EmptyCart`]: nothing was sent.
    /// - [`CheckoutError::InFlight`]: another submission holds the loading flag.
    /// - [`CheckoutError::Api`]: the request failed; an error alert was pushed and the cart is
    ///   unchanged.
    /// - [`CheckoutError::Cart`] / [`CheckoutError::Storage`]: orders were placed but local
    ///   state could not be cleared.
    pub async fn submit<N: Navigator>(self, navigator: &mut N) -> Result<Submitted, CheckoutError> {
        if self.cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let Some(_guard) = self.loading.try_begin() else {
            return Err(CheckoutError::InFlight);
        };

        let request = CreateOrdersRequest::from_lines(
            self.cart.iter(),
            self.discounts.selected_id().map(str::to_string),
        );

        let customer = self.cart.customer().to_string();

        info!(
            %customer,
            lines = request.orders_payload.len(),
            discount = request.discount_code_id.as_deref(),
            "submitting checkout"
        );

        let outcome = match self.api.create_orders(&request).await {
            Ok(outcome) => outcome,
            Err(err) => {
                error!(%customer, error = %err, "checkout failed");
                self.alerts.push_error(err.to_string());

                return Err(err.into());
            }
        };

        match outcome {
            CheckoutOutcome::Redirect(url) => {
                info!(%customer, "checkout needs payment, redirecting");
                navigator.open_external(&url);

                Ok(Submitted::Redirected(url))
            }
            CheckoutOutcome::Confirmed(orders) => {
                let placed = orders.len();

                self.cache.merge_upcoming(orders);

                if let Err(err) = clear_local_state(self.cart, self.discounts) {
                    warn!(%customer, error = %err, "orders placed but local state not cleared");
                    self.alerts.push_error(err.to_string());

                    return Err(err);
                }

                info!(%customer, placed, "orders placed");
                self.alerts.push_success(ORDERS_PLACED);
                navigator.push(DASHBOARD_ROUTE);

                Ok(Submitted::Placed(placed))
            }
        }
    }

    /// Look up a finished payment session and clear the cart and discount on success.
    ///
    /// Returns the amount paid in dollars.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::Api`]: the session could not be read; an error alert was pushed.
    /// - [`CheckoutError::Cart`] / [`CheckoutError::Storage`]: local state could not be
    ///   cleared.
    pub async fn complete_payment(self, session_id: &str) -> Result<Decimal, CheckoutError> {
        let paid = match self.api.checkout_session(session_id).await {
            Ok(paid) => paid,
            Err(err) => {
                error!(session_id, error = %err, "payment session lookup failed");
                self.alerts.push_error(err.to_string());

                return Err(err.into());
            }
        };

        clear_local_state(self.cart, self.discounts)?;

        info!(customer = self.cart.customer(), %paid, "payment completed");

        Ok(paid)
    }
}

fn clear_local_state<S: Storage>(
    cart: &mut CartStore<S>,
    discounts: &mut DiscountStore<S>,
) -> Result<(), CheckoutError> {
    cart.clear()?;
    discounts.clear()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_rejects_second_begin_until_guard_drops() {
        let flag = LoadingFlag::new();
        let shared = flag.clone();

        let guard = flag.try_begin();

        assert!(guard.is_some());
        assert!(shared.is_loading());
        assert!(shared.try_begin().is_none());

        drop(guard);

        assert!(!flag.is_loading());
        assert!(shared.try_begin().is_some());
    }
}
