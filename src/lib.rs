//! Spork
//!
//! Spork is the ordering core of a catered lunch platform: the customer cart, checkout
//! submission and the order grouping behind admin and vendor reports.

pub mod alerts;
pub mod api;
pub mod cache;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod dates;
pub mod discounts;
pub mod favorites;
pub mod fixtures;
pub mod money;
pub mod observability;
pub mod orders;
pub mod prelude;
pub mod reports;
pub mod schedules;
pub mod session;
pub mod storage;
pub mod utils;
