//! Lending Calculator
//!
//! Pure math for interest settlement and pool ratios.
//! No I/O - just calculations.

use lendpool_core::constants::{SECONDS_PER_YEAR, WAD};
use lendpool_core::{Amount, LedgerError, Rate, Timestamp};
use primitive_types::U256;

/// Simple interest accrued on `balance` between `last_update` and `now`.
///
/// interest = balance * rate * elapsed / (WAD * SECONDS_PER_YEAR), rounded down.
/// The product is formed in 256 bits so any `u128` balance is safe.
pub fn accrued_interest(
    balance: Amount,
    last_update: Timestamp,
    now: Timestamp,
    rate: Rate,
) -> Result<Amount, LedgerError> {
    if last_update == 0 || balance == 0 {
        return Ok(0);
    }

    let elapsed = now.saturating_sub(last_update);
    if elapsed == 0 || rate.as_wad() == 0 {
        return Ok(0);
    }

    let numerator = U256::from(balance)
        .checked_mul(U256::from(rate.as_wad()))
        .and_then(|v| v.checked_mul(U256::from(elapsed)))
        .ok_or(LedgerError::MathOverflow)?;
    let denominator = U256::from(WAD) * U256::from(SECONDS_PER_YEAR);

    u128::try_from(numerator / denominator).map_err(|_| LedgerError::MathOverflow)
}

/// Fold accrued interest into `balance` and advance its timestamp to `now`.
/// Returns (new_balance, new_last_update).
///
/// Settling twice at the same `now` is a no-op the second time. The timestamp
/// never moves backwards, so a clock step back cannot re-open an interval
/// that was already charged.
pub fn settle(
    balance: Amount,
    last_update: Timestamp,
    now: Timestamp,
    rate: Rate,
) -> Result<(Amount, Timestamp), LedgerError> {
    let interest = accrued_interest(balance, last_update, now, rate)?;
    let new_balance = balance
        .checked_add(interest)
        .ok_or(LedgerError::MathOverflow)?;
    Ok((new_balance, now.max(last_update)))
}

/// Deposited minus borrowed, floored at zero
pub fn available_liquidity(total_deposited: Amount, total_borrowed: Amount) -> Amount {
    total_deposited.saturating_sub(total_borrowed)
}

/// Calculate utilization ratio as percentage
pub fn calculate_utilization(total_borrowed: Amount, total_deposited: Amount) -> f64 {
    if total_deposited == 0 {
        return 0.0;
    }
    (total_borrowed as f64 / total_deposited as f64) * 100.0
}
