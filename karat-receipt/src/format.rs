//! Display formatting for money and weight
//!
//! The only place rounding happens. Accumulation elsewhere keeps full
//! `Decimal` precision.

use rust_decimal::prelude::*;

/// Money prints in whole rupees
const MONEY_DP: u32 = 0;
/// Weight prints in milligrams
const WEIGHT_DP: u32 = 3;

const CURRENCY_PREFIX: &str = "Rs.";
const CREDIT_SUFFIX: &str = " (CR)";

/// Round to the nearest rupee, halves away from zero
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounded CGST and SGST figures for a total GST amount
///
/// The first half is rounded on its own and the second takes the remainder,
/// so the printed halves always add up to the rounded total.
pub fn split_gst(total_gst: Decimal) -> (Decimal, Decimal) {
    let first = round_money(total_gst / Decimal::TWO);
    (first, round_money(total_gst) - first)
}

/// Indian digit grouping: last three digits, then pairs (12,34,567)
pub fn group_indian(value: u64) -> String {
    group_digits(&value.to_string())
}

fn group_digits(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

/// Rounded rupees without sign, grouped
fn grouped_magnitude(value: Decimal) -> String {
    let digits = round_money(value).abs().normalize().to_string();
    group_digits(&digits)
}

/// Grouped whole-rupee figure without currency, e.g. `31,100` or `-500`
pub fn format_number(value: Decimal) -> String {
    let rounded = round_money(value);
    let grouped = grouped_magnitude(value);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Currency amount, e.g. `Rs.31,100`
pub fn format_amount(value: Decimal) -> String {
    let rounded = round_money(value);
    let grouped = grouped_magnitude(value);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{}{}", CURRENCY_PREFIX, grouped)
    } else {
        format!("{}{}", CURRENCY_PREFIX, grouped)
    }
}

/// Net payable: a negative balance is a credit owed to the customer
///
/// `-14000` prints as `Rs.14,000 (CR)`.
pub fn format_net_payable(value: Decimal) -> String {
    let rounded = round_money(value);
    let grouped = grouped_magnitude(value);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("{}{}{}", CURRENCY_PREFIX, grouped, CREDIT_SUFFIX)
    } else {
        format!("{}{}", CURRENCY_PREFIX, grouped)
    }
}

/// Rounded integer without grouping, for machine-readable attributes
pub fn format_integer(value: Decimal) -> String {
    let rounded = round_money(value);
    if rounded.is_zero() {
        "0".to_string()
    } else {
        rounded.normalize().to_string()
    }
}

/// Weight with three decimals, e.g. `5.000`
pub fn format_weight(value: Decimal) -> String {
    let mut rounded =
        value.round_dp_with_strategy(WEIGHT_DP, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(WEIGHT_DP);
    rounded.to_string()
}

/// Shortest exact form of an input figure, e.g. `2`, `1.5`, `0.25`
pub fn format_plain(value: Decimal) -> String {
    value.normalize().to_string()
}
