//! Money calculation utilities using rust_decimal for precision
//!
//! Monetary values travel as `f64` on the wire; all arithmetic happens on
//! `Decimal` and results are rounded to 2 decimal places, half away from
//! zero.

use rust_decimal::prelude::*;

use shared::models::{CartItem, OrderItem};

use crate::error::{ClientError, ClientResult};

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Maximum allowed unit price
const MAX_PRICE: f64 = 1_000_000.0;
/// Maximum allowed quantity per line
const MAX_QUANTITY: i64 = 999_999;

/// Convert f64 to Decimal for calculation.
///
/// Inputs are validated finite at the boundary; if NaN/Infinity somehow
/// reaches here it is logged and treated as zero rather than corrupting a
/// total.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(value = ?value, "Non-finite f64 in monetary calculation, defaulting to zero");
        Decimal::ZERO
    })
}

/// Convert Decimal back to f64, rounded to 2 decimal places.
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or(0.0)
}

/// Validate a unit price: finite, strictly positive, within bounds.
pub fn validate_price(value: f64, field: &str) -> ClientResult<()> {
    if !value.is_finite() {
        return Err(ClientError::Validation(format!(
            "{field} must be a finite number, got {value}"
        )));
    }
    if value <= 0.0 {
        return Err(ClientError::Validation(format!(
            "{field} must be positive, got {value}"
        )));
    }
    if value > MAX_PRICE {
        return Err(ClientError::Validation(format!(
            "{field} exceeds maximum allowed ({MAX_PRICE}), got {value}"
        )));
    }
    Ok(())
}

/// Validate a quantity: at least 1, within bounds.
pub fn validate_quantity(value: i64, field: &str) -> ClientResult<()> {
    if value < 1 {
        return Err(ClientError::Validation(format!(
            "{field} must be at least 1, got {value}"
        )));
    }
    if value > MAX_QUANTITY {
        return Err(ClientError::Validation(format!(
            "{field} exceeds maximum allowed ({MAX_QUANTITY}), got {value}"
        )));
    }
    Ok(())
}

/// Line total: price * quantity.
pub fn line_total(price: f64, quantity: i64) -> Decimal {
    (to_decimal(price) * Decimal::from(quantity))
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Cart total: sum of price * quantity over items.
pub fn cart_total(items: &[CartItem]) -> f64 {
    let total: Decimal = items
        .iter()
        .map(|i| line_total(i.price, i.quantity))
        .sum();
    to_f64(total)
}

/// Order total: sum of unit_price * quantity over items.
pub fn order_total(items: &[OrderItem]) -> f64 {
    let total: Decimal = items
        .iter()
        .map(|i| line_total(i.unit_price, i.quantity))
        .sum();
    to_f64(total)
}

/// Compare two monetary values for equality (within 0.01 tolerance).
pub fn money_eq(a: f64, b: f64) -> bool {
    let diff = (to_decimal(a) - to_decimal(b)).abs();
    diff < MONEY_TOLERANCE
}
