//! Display formatting contract shared by every presentation collaborator.

use rust_decimal::{Decimal, RoundingStrategy};

/// Formats a magnitude: whole numbers without a fractional part, anything
/// else rounded half away from zero to two places.
pub fn format_amount(amount: Decimal) -> String {
    let abs = amount.abs();
    if abs.fract().is_zero() {
        abs.trunc().normalize().to_string()
    } else {
        let rounded = abs.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        format!("{:.2}", rounded)
    }
}

/// Formats a signed amount as `[-]<symbol> <amount>`, e.g. `₹ 500` or `-$ 12.50`.
pub fn format_money(amount: Decimal, symbol: &str) -> String {
    let sign = if amount.is_sign_negative() && !amount.is_zero() {
        "-"
    } else {
        ""
    };
    if symbol.is_empty() {
        format!("{}{}", sign, format_amount(amount))
    } else {
        format!("{}{} {}", sign, symbol, format_amount(amount))
    }
}

/// One fractional digit followed by `%`.
pub fn format_percent(percent: Decimal) -> String {
    let rounded = percent.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.1}%", rounded)
}
