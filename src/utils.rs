use crate::error::CliError;
use crate::types::AccountAddress;
use tracing::warn;

/// Both APT and TWBTC use 8 decimals (octas / satoshis).
pub const COIN_DECIMALS: u8 = 8;

pub fn parse_address(s: &str) -> Result<AccountAddress, CliError> {
    s.parse()
}

pub fn parse_u64(s: &str) -> Result<u64, CliError> {
    s.trim()
        .parse()
        .map_err(|e| CliError::InvalidAmount(format!("'{}': {}", s, e)))
}

/// Converts a decimal amount in whole coins to its smallest unit.
/// Digits beyond `decimals` are truncated.
pub fn parse_scaled_amount(s: &str, decimals: u8) -> Result<u64, CliError> {
    let trimmed = s.trim();
    let invalid = |reason: &str| CliError::InvalidAmount(format!("'{}': {}", s, reason));

    let (whole, fraction) = match trimmed.split_once('.') {
        Some((w, f)) => (w, f),
        None => (trimmed, ""),
    };
    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid("no digits"));
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !fraction.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid("expected a non-negative decimal number"));
    }

    let decimals = decimals as usize;
    if fraction.len() > decimals {
        warn!("Amount {} has more than {} decimal places, truncating", s, decimals);
    }
    let kept: String = fraction.chars().take(decimals).collect();
    let padded = format!("{:0<width$}", kept, width = decimals);

    let unit = 10u64.pow(decimals as u32);
    let whole: u64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| invalid("too large"))?
    };
    let fraction: u64 = if padded.is_empty() { 0 } else { padded.parse().map_err(|_| invalid("too large"))? };

    whole
        .checked_mul(unit)
        .and_then(|v| v.checked_add(fraction))
        .ok_or_else(|| invalid("too large"))
}

pub fn format_amount(amount: u64, decimals: u8) -> String {
    let divisor = 10u64.pow(decimals as u32);
    let whole = amount / divisor;
    let fraction = amount % divisor;
    format!("{}.{:0width$}", whole, fraction, width = decimals as usize)
}
