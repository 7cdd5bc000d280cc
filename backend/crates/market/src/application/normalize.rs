//! Form Field Normalization
//!
//! Numeric fields arrive from Mini App forms and may be missing, zero, or
//! not numbers at all. Each field has a fallback, a floor and a ceiling.

/// Ceiling for prices, quantities, stock and store limits
///
/// Keeps `price * qty` of one line well inside `i64`.
pub const MAX_AMOUNT: i64 = 1_000_000_000;

/// Largest integer an `f64` holds exactly
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Treat missing, zero and non-finite input as absent
fn given(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v != 0.0)
}

/// Whole-ruble price, at least 1
pub fn price_rub(value: Option<f64>) -> i64 {
    (given(value).unwrap_or(1.0).round() as i64).clamp(1, MAX_AMOUNT)
}

/// Minimum order quantity, at least 1
pub fn min_qty(value: Option<f64>) -> i64 {
    (given(value).unwrap_or(1.0).floor() as i64).clamp(1, MAX_AMOUNT)
}

/// Stock on hand, never negative
pub fn stock(value: Option<f64>) -> i64 {
    (given(value).unwrap_or(0.0).floor() as i64).clamp(0, MAX_AMOUNT)
}

/// Minimum order for stores created by an admin
pub fn admin_store_min_order_rub(value: Option<f64>) -> i64 {
    (given(value).unwrap_or(1.0).round() as i64).clamp(1, MAX_AMOUNT)
}

/// Delivery days for stores created by an admin
pub fn admin_store_delivery_days(value: Option<f64>) -> i64 {
    (given(value).unwrap_or(2.0).floor() as i64).clamp(1, MAX_AMOUNT)
}

/// Minimum order for self-registered stores; an explicit zero is kept
pub fn registered_store_min_order_rub(value: Option<f64>, default: i64) -> i64 {
    value
        .filter(|v| v.is_finite())
        .map_or(default, |v| v.round() as i64)
        .clamp(0, MAX_AMOUNT)
}

/// Delivery days for self-registered stores
pub fn registered_store_delivery_days(value: Option<f64>) -> i64 {
    (value.filter(|v| v.is_finite()).unwrap_or(2.0).floor() as i64).clamp(1, MAX_AMOUNT)
}

/// Cart quantity; `None` when it is not a positive whole amount
///
/// Not capped: anything above [`MAX_AMOUNT`] already exceeds every stock.
pub fn cart_qty(value: Option<f64>) -> Option<i64> {
    let qty = value.filter(|v| v.is_finite())?.floor() as i64;
    (qty > 0).then_some(qty)
}

/// Exact integer value; `None` for fractions and values past 2^53
pub fn whole_number(value: f64) -> Option<i64> {
    (value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_EXACT_INTEGER)
        .then_some(value as i64)
}

/// Trimmed tags without blanks
pub fn tags(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|tag| tag.trim())
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Trimmed text, `None` when blank
pub fn text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
