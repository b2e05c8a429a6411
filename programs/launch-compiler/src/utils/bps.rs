use anchor_lang::prelude::*;
use ruint::aliases::U256;

use crate::constants::BPS_DENOMINATOR;
use crate::errors::LaunchError;

/// Validate a sibling group of allocation units that must exhaust a resource.
/// Every entry must be within [1, 10000] and the group must sum to 10000.
pub fn validate_sum(units: &[u16]) -> Result<()> {
    let mut total: u32 = 0;
    for unit in units {
        require!(
            *unit >= 1 && *unit <= BPS_DENOMINATOR,
            LaunchError::BpsOutOfRange
        );
        total = total
            .checked_add(*unit as u32)
            .ok_or(LaunchError::MathOverflow)?;
    }

    require!(
        total == BPS_DENOMINATOR as u32,
        LaunchError::BpsSumMismatch
    );

    Ok(())
}

/// Convert a percentage (0..=100, at most two decimals) to basis points
pub fn percentage_to_units(pct: f64) -> Result<u16> {
    require!(
        pct.is_finite() && (0.0..=100.0).contains(&pct),
        LaunchError::InvalidPercentage
    );

    let scaled = pct * 100.0;
    let units = scaled.round();
    require!(
        (scaled - units).abs() < 1e-6,
        LaunchError::InvalidPercentage
    );

    Ok(units as u16)
}

/// Exact share of `whole` expressed in basis points.
/// Fails when `part` is not a whole number of basis points of `whole`.
pub fn units_of_total(part: u64, whole: u64) -> Result<u16> {
    if whole == 0 {
        return err!(LaunchError::DivisionByZero);
    }
    require!(part <= whole, LaunchError::BpsOutOfRange);

    let scaled = (part as u128)
        .checked_mul(BPS_DENOMINATOR as u128)
        .ok_or(LaunchError::MathOverflow)?;
    require!(
        scaled % whole as u128 == 0,
        LaunchError::NotBpsAligned
    );

    u16::try_from(scaled / whole as u128).map_err(|_| error!(LaunchError::TypeCastFailed))
}

/// Amount corresponding to `units` of `total`, rounded down
pub fn apply_units(total: U256, units: u16) -> Result<U256> {
    total
        .checked_mul(U256::from(units))
        .ok_or(LaunchError::MathOverflow)?
        .checked_div(U256::from(BPS_DENOMINATOR))
        .ok_or_else(|| error!(LaunchError::DivisionByZero))
}
