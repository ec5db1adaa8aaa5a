//! Spork prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    alerts::{Alert, AlertKind, Alerts},
    api::{Api, ApiError, CheckoutOutcome, CreateOrdersRequest, HttpApi, OrderLinePayload},
    cache::{DataCache, Loadable},
    cart::{CartError, CartLine, CartLineKey, CartStore, DateTotal},
    catalog::{AddonRule, MenuItem},
    checkout::{Checkout, CheckoutError, LoadingFlag, Navigator, Submitted},
    config::{ClientConfig, LogFormat},
    dates::{DateError, OrderWindow, date_to_ms, date_to_text, ms_to_date},
    discounts::{DiscountCode, DiscountSelection, DiscountStore},
    favorites::FavoriteItem,
    fixtures::{Fixture, FixtureError},
    money::{add_cents, format_usd, normalize_cents},
    observability::init_logging,
    orders::{
        Order, OrderGroup, OrderStatus, VendorOrderGroup,
        export::{ExportError, write_csv},
        group_by_date_and_company, group_by_date_within_restaurant,
    },
    reports::{order_groups_table, vendor_table},
    schedules::{Schedule, ScheduleAction, ScheduleStatus, ScheduledRestaurant},
    session::CustomerSession,
    storage::{FileStorage, MemoryStorage, Storage, StorageError},
};
