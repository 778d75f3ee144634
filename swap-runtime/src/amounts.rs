//! Conversions between human-entered decimal strings and integer token units.

use std::str::FromStr;

use alloy::primitives::U256;
use alloy::primitives::utils::{format_units, parse_units};
use rust_decimal::Decimal;

use crate::error::RoutingError;

const BPS_DENOMINATOR: u32 = 10_000;

/// Parse a decimal amount such as `"1.5"` into the token's smallest unit.
pub fn parse_amount(amount: &str, decimals: u8) -> Result<U256, RoutingError> {
    let trimmed = amount.trim();
    if trimmed.starts_with('-') {
        return Err(RoutingError::InvalidAmount {
            amount: amount.to_string(),
            reason: "negative amount".into(),
        });
    }
    let parsed = parse_units(trimmed, decimals).map_err(|e| RoutingError::InvalidAmount {
        amount: amount.to_string(),
        reason: e.to_string(),
    })?;
    Ok(parsed.get_absolute())
}

/// Render an integer amount in whole-token units, without trailing zeros.
pub fn format_amount(amount: U256, decimals: u8) -> Result<String, RoutingError> {
    let formatted = format_units(amount, decimals).map_err(|e| RoutingError::InvalidAmount {
        amount: amount.to_string(),
        reason: e.to_string(),
    })?;
    if !formatted.contains('.') {
        return Ok(formatted);
    }
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    Ok(trimmed.to_string())
}

/// Output tokens received per input token ("1 A = X B").
pub fn exchange_rate(amount_in: &str, amount_out: &str) -> Result<Decimal, RoutingError> {
    let parse = |s: &str| {
        Decimal::from_str(s).map_err(|e| RoutingError::InvalidAmount {
            amount: s.to_string(),
            reason: e.to_string(),
        })
    };
    let amount_in = parse(amount_in)?;
    let amount_out = parse(amount_out)?;
    amount_out
        .checked_div(amount_in)
        .ok_or_else(|| RoutingError::InvalidAmount {
            amount: amount_in.to_string(),
            reason: "rate undefined for this input amount".into(),
        })
}

/// Minimum acceptable output after `slippage_bps` tolerance, rounded down.
pub fn min_output_with_slippage(expected: U256, slippage_bps: u32) -> Result<U256, RoutingError> {
    if slippage_bps > BPS_DENOMINATOR {
        return Err(RoutingError::InvalidRequest(format!(
            "slippage {slippage_bps} bps exceeds {BPS_DENOMINATOR}"
        )));
    }
    let kept = U256::from(BPS_DENOMINATOR - slippage_bps);
    let scaled = expected
        .checked_mul(kept)
        .ok_or_else(|| RoutingError::InvalidAmount {
            amount: expected.to_string(),
            reason: "quoted output too large to apply slippage".into(),
        })?;
    Ok(scaled / U256::from(BPS_DENOMINATOR))
}
