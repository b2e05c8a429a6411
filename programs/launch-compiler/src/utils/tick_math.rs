use anchor_lang::prelude::*;

use crate::constants::{MAX_TICK, MIN_TICK, TICK_BASE, UNIT_PRICE};
use crate::errors::LaunchError;
use crate::state::TickRange;

// Supported domain: any positive finite market cap whose tick lands inside
// [MIN_TICK, MAX_TICK]. With an 18-decimal pair that is roughly 1e-27 to 1e49
// paired-token units of market cap; f64 covers it without overflow.

fn decimal_adjustment(paired_decimals: u8) -> f64 {
    10f64.powi(18 - paired_decimals as i32)
}

/// Raw (unsnapped) price of one token in the paired asset's base units
pub fn price_from_market_cap(market_cap: f64, paired_decimals: u8) -> Result<f64> {
    require!(
        market_cap.is_finite() && market_cap > 0.0,
        LaunchError::NonPositiveMarketCap
    );
    Ok(market_cap * UNIT_PRICE * decimal_adjustment(paired_decimals))
}

/// Tick for a target market cap, snapped down to the tick grid
pub fn tick_from_market_cap(market_cap: f64, paired_decimals: u8, tick_spacing: i32) -> Result<i32> {
    require!(tick_spacing > 0, LaunchError::InvalidTickSpacing);
    let price = price_from_market_cap(market_cap, paired_decimals)?;

    let raw_tick = price.ln() / TICK_BASE.ln();
    require!(raw_tick.is_finite(), LaunchError::MarketCapOutOfDomain);

    let spacing = tick_spacing as f64;
    let snapped = (raw_tick / spacing).floor() * spacing;
    require!(
        snapped >= MIN_TICK as f64 && snapped <= MAX_TICK as f64,
        LaunchError::MarketCapOutOfDomain
    );

    Ok(snapped as i32)
}

/// Price at a tick: 1.0001^tick
pub fn price_from_tick(tick: i32) -> Result<f64> {
    require!(
        (MIN_TICK..=MAX_TICK).contains(&tick),
        LaunchError::TickOutOfBounds
    );
    Ok(TICK_BASE.powi(tick))
}

/// Market cap implied by a tick. Inverse of `tick_from_market_cap` up to snapping.
pub fn market_cap_from_tick(tick: i32, paired_decimals: u8) -> Result<f64> {
    let price = price_from_tick(tick)?;
    Ok(price / (UNIT_PRICE * decimal_adjustment(paired_decimals)))
}

/// Convert a market-cap band into an aligned tick range
pub fn market_cap_range_to_ticks(
    low_market_cap: f64,
    high_market_cap: f64,
    paired_decimals: u8,
    tick_spacing: i32,
) -> Result<TickRange> {
    let lower = tick_from_market_cap(low_market_cap, paired_decimals, tick_spacing)?;
    let upper = tick_from_market_cap(high_market_cap, paired_decimals, tick_spacing)?;
    TickRange::new(lower, upper, tick_spacing)
}
