//! Money

use rust_decimal::{Decimal, RoundingStrategy};
use rusty_money::{Money, iso};

/// Rounds an amount to whole cents, half away from zero.
pub fn normalize_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Adds `amount` to a running total and normalizes the result to cents.
pub fn add_cents(total: Decimal, amount: Decimal) -> Decimal {
    normalize_cents(total + amount)
}

/// Converts an amount in cents, as payment sessions report it, to dollars.
pub fn cents_to_dollars(cents: Decimal) -> Decimal {
    normalize_cents(cents / Decimal::ONE_HUNDRED)
}

/// Formats an amount as US dollars, e.g. `$1,234.50`.
pub fn format_usd(amount: Decimal) -> String {
    Money::from_decimal(normalize_cents(amount), iso::USD).to_string()
}

#[cfg(test)]
mod tests {
    use rust_decimal::dec;

    use super::*;

    #[test]
    fn normalize_rounds_half_away_from_zero() {
        assert_eq!(normalize_cents(dec!(1.005)), dec!(1.01));
        assert_eq!(normalize_cents(dec!(1.004)), dec!(1.00));
        assert_eq!(normalize_cents(dec!(-1.005)), dec!(-1.01));
    }

    #[test]
    fn add_cents_rounds_running_total() {
        let total = add_cents(dec!(0.333), dec!(0.333));

        assert_eq!(total, dec!(0.67));
    }

    #[test]
    fn cents_become_dollars() {
        assert_eq!(cents_to_dollars(dec!(2300)), dec!(23.00));
        assert_eq!(cents_to_dollars(dec!(1999)), dec!(19.99));
        assert_eq!(format_usd(cents_to_dollars(dec!(123450))), "$1,234.50");
    }

    #[test]
    fn format_usd_uses_symbol_and_separators() {
        assert_eq!(format_usd(dec!(1234.5)), "$1,234.50");
        assert_eq!(format_usd(Decimal::ZERO), "$0.00");
    }
}
