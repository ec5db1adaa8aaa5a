//! Favorites

use serde::{Deserialize, Serialize};

use crate::orders::RestaurantRef;

/// The item a favorite points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteItemRef {
    /// Menu item id
    #[serde(rename = "_id")]
    pub id: String,

    /// Item name
    pub name: String,

    /// Image url
    #[serde(default)]
    pub image: Option<String>,
}

/// An item a customer marked as favorite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteItem {
    /// Favorite id
    #[serde(rename = "_id")]
    pub id: String,

    /// Favorited item
    pub item: FavoriteItemRef,

    /// Customer id
    pub customer: String,

    /// Restaurant serving the item
    pub restaurant: RestaurantRef,
}

/// Favorites left after removing the one for `item_id`.
pub fn without_item(favorites: &[FavoriteItem], item_id: &str) -> Vec<FavoriteItem> {
    favorites
        .iter()
        .filter(|favorite| favorite.item.id != item_id)
        .cloned()
        .collect()
}
