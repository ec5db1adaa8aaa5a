//! Discounts
//!
//! Discount codes are validated and priced by the server. The client only remembers which
//! code the customer picked and forwards its id at checkout.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::storage::{Storage, StorageError, discount_key};

/// How often a discount code may be redeemed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Redeemability {
    /// Any number of times
    Unlimited,

    /// Once per customer, stored as `"1"`
    #[serde(rename = "1", alias = "once")]
    Once,
}

/// A discount code as listed by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountCode {
    /// Code id
    #[serde(rename = "_id")]
    pub id: String,

    /// Code customers type in
    pub code: String,

    /// Face value
    pub value: Decimal,

    /// Redemption policy
    pub redeemability: Redeemability,

    /// Number of redemptions so far
    #[serde(default)]
    pub total_redeem: u32,
}

impl DiscountCode {
    /// Whether the code can still be redeemed.
    pub fn is_redeemable(&self) -> bool {
        match self.redeemability {
            Redeemability::Unlimited => true,
            Redeemability::Once => self.total_redeem == 0,
        }
    }
}

/// The discount a customer selected for the next checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountSelection {
    /// Discount code id
    #[serde(rename = "_id")]
    pub id: String,

    /// Code as typed
    pub code: String,

    /// Face value, for display only
    pub value: Decimal,
}

impl From<&DiscountCode> for DiscountSelection {
    fn from(code: &DiscountCode) -> Self {
        Self {
            id: code.id.clone(),
            code: code.code.clone(),
            value: code.value,
        }
    }
}

/// Durable slot holding a customer's discount selection.
#[derive(Debug)]
pub struct DiscountStore<S: Storage> {
    customer: String,
    selection: Option<DiscountSelection>,
    storage: S,
}

impl<S: Storage> DiscountStore<S> {
    /// Restore a customer's selection. A missing or malformed slot means no selection.
    pub fn load(storage: S, customer: impl Into<String>) -> Self {
        let customer = customer.into();

        let selection = storage
            .get(&discount_key(&customer))
            .and_then(|raw| match serde_json::from_str(&raw) {
                Ok(selection) => Some(selection),
                Err(error) => {
                    warn!(%customer, %error, "discarding malformed discount slot");
                    None
                }
            });

        Self {
            customer,
            selection,
            storage,
        }
    }

    /// Current selection.
    pub fn selection(&self) -> Option<&DiscountSelection> {
        self.selection.as_ref()
    }

    /// Id of the selected code, as sent with checkout.
    pub fn selected_id(&self) -> Option<&str> {
        self.selection.as_ref().map(|selection| selection.id.as_str())
    }

    /// Select a discount and persist it.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the slot cannot be written; the selection is unchanged.
    pub fn select(&mut self, selection: DiscountSelection) -> Result<(), StorageError> {
        let raw = serde_json::to_string(&selection)?;

        self.storage.set(&discount_key(&self.customer), &raw)?;
        self.selection = Some(selection);

        Ok(())
    }

    /// Drop the selection and its slot.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the slot cannot be removed.
    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.storage.remove(&discount_key(&self.customer))?;
        self.selection = None;

        Ok(())
    }

    /// Backing storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }
}
