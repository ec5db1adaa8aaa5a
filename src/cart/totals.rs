//! Per-date cart totals

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{cart::CartLine, money::add_cents};

/// Amount a customer has in the cart for one delivery date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateTotal {
    /// Delivery date (UTC midnight, ms)
    pub date: i64,

    /// Cart total for the date
    pub total: Decimal,
}

impl DateTotal {
    /// Amount of a daily budget still available after this total, never negative.
    pub fn remaining(&self, budget: Decimal) -> Decimal {
        (budget - self.total).max(Decimal::ZERO)
    }
}

/// Groups line totals by delivery date in order of first appearance.
pub fn date_totals(lines: &[CartLine]) -> Vec<DateTotal> {
    let mut totals: Vec<DateTotal> = Vec::new();

    for line in lines {
        match totals.iter_mut().find(|total| total.date == line.delivery_date) {
            Some(total) => total.total = add_cents(total.total, line.total()),
            None => totals.push(DateTotal {
                date: line.delivery_date,
                total: add_cents(Decimal::ZERO, line.total()),
            }),
        }
    }

    totals
}
