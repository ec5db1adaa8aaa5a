//! Cart
//!
//! The customer's pending selections, kept in memory and mirrored into a durable slot after
//! every change.

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    catalog::MenuItem,
    money::add_cents,
    storage::{Storage, StorageError, cart_key},
};

pub mod line;
pub mod totals;

pub use line::{CartLine, CartLineKey};
pub use totals::DateTotal;

/// Errors related to cart changes.
#[derive(Debug, Error)]
pub enum CartError {
    /// The line carries fewer required addons than the item asks for.
    #[error("Please add {required} required addons")]
    MissingRequiredAddons {
        /// Number of required addons the item asks for
        required: usize,

        /// Number of required addons selected
        selected: usize,
    },

    /// A line must hold at least one unit.
    #[error("quantity must be at least 1")]
    InvalidQuantity,

    /// The cart could not be persisted; the in-memory cart was left unchanged.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Cart
#[derive(Debug)]
pub struct CartStore<S: Storage> {
    customer: String,
    lines: Vec<CartLine>,
    storage: S,
}

impl<S: Storage> CartStore<S> {
    /// Restore a customer's cart from storage.
    ///
    /// A missing or unreadable slot yields an empty cart.
    pub fn load(storage: S, customer: impl Into<String>) -> Self {
        let customer = customer.into();

        let lines = match storage.get(&cart_key(&customer)) {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|error| {
                warn!(%customer, %error, "discarding malformed cart slot");
                Vec::new()
            }),
            None => Vec::new(),
        };

        debug!(%customer, lines = lines.len(), "cart loaded");

        Self {
            customer,
            lines,
            storage,
        }
    }

    /// Add a line, or update the line with the same key.
    ///
    /// # Errors
    ///
    /// - [`CartError::MissingRequiredAddons`]: the item needs more required addons.
    /// - [`CartError::InvalidQuantity`]: the line has no units.
    /// - [`CartError::Storage`]: persisting failed; the cart is unchanged.
    pub fn add(&mut self, line: CartLine, item: &MenuItem) -> Result<(), CartError> {
        let required = item.required_addon_count();
        let selected = line.required_addons.len();

        if selected < required {
            return Err(CartError::MissingRequiredAddons { required, selected });
        }

        if line.quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }

        let key = line.key();
        let mut updated = self.lines.clone();

        match updated.iter_mut().find(|existing| existing.matches(&key)) {
            Some(existing) => existing.merge_from(line),
            None => updated.push(line),
        }

        self.commit(updated)?;

        debug!(customer = %self.customer, ?key, "cart line saved");

        Ok(())
    }

    /// Remove the line with the given key. Removing an absent key changes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Storage`] if persisting fails; the cart is unchanged.
    pub fn remove(&mut self, key: &CartLineKey) -> Result<(), CartError> {
        let updated: Vec<CartLine> = self
            .lines
            .iter()
            .filter(|line| !line.matches(key))
            .cloned()
            .collect();

        self.commit(updated)?;

        debug!(customer = %self.customer, ?key, "cart line removed");

        Ok(())
    }

    /// Empty the cart and drop its slot.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Storage`] if the slot cannot be removed; the cart is unchanged.
    pub fn clear(&mut self) -> Result<(), CartError> {
        self.storage.remove(&cart_key(&self.customer))?;
        self.lines.clear();

        debug!(customer = %self.customer, "cart cleared");

        Ok(())
    }

    /// Sum of quantities over all lines.
    pub fn total_quantity(&self) -> u32 {
        self.lines
            .iter()
            .fold(0, |total, line| total.saturating_add(line.quantity))
    }

    /// Sum of line totals, normalized to cents after every addition.
    pub fn total_price(&self) -> Decimal {
        self.lines
            .iter()
            .fold(Decimal::ZERO, |acc, line| add_cents(acc, line.total()))
    }

    /// Quantity held for a key, zero when the cart has no such line.
    pub fn quantity_of(&self, key: &CartLineKey) -> u32 {
        self.get(key).map_or(0, |line| line.quantity)
    }

    /// Line with the given key.
    pub fn get(&self, key: &CartLineKey) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.matches(key))
    }

    /// Iterate over lines in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.iter()
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Customer owning the cart.
    pub fn customer(&self) -> &str {
        &self.customer
    }

    /// Backing storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Spending per delivery date, in order of first appearance.
    pub fn date_totals(&self) -> Vec<DateTotal> {
        totals::date_totals(&self.lines)
    }

    fn commit(&mut self, updated: Vec<CartLine>) -> Result<(), CartError> {
        let raw = serde_json::to_string(&updated).map_err(StorageError::from)?;

        self.storage.set(&cart_key(&self.customer), &raw)?;
        self.lines = updated;

        Ok(())
    }
}
