use anchor_lang::prelude::*;

use crate::constants::{DEFAULT_UPPER_TICK, MAX_LIQUIDITY_POSITIONS, MAX_TICK, MIN_TICK};
use crate::errors::LaunchError;
use crate::utils::bps::validate_sum;
use crate::utils::tick_math::market_cap_range_to_ticks;

/// Aligned tick interval with lower < upper
#[derive(Debug, Clone, Copy, PartialEq, Eq, AnchorSerialize, AnchorDeserialize)]
pub struct TickRange {
    pub lower: i32,
    pub upper: i32,
}

impl TickRange {
    pub fn new(lower: i32, upper: i32, tick_spacing: i32) -> Result<Self> {
        require!(tick_spacing > 0, LaunchError::InvalidTickSpacing);
        require!(
            lower % tick_spacing == 0 && upper % tick_spacing == 0,
            LaunchError::TickNotAligned
        );
        require!(
            lower >= MIN_TICK && upper <= MAX_TICK,
            LaunchError::TickOutOfBounds
        );
        require!(lower < upper, LaunchError::InvalidTickRange);

        Ok(Self { lower, upper })
    }
}

/// Where a position sits, either as raw ticks or as a market-cap band
#[derive(Debug, Clone, PartialEq, AnchorSerialize, AnchorDeserialize)]
pub enum PositionBounds {
    Ticks { lower: i32, upper: i32 },
    MarketCap { low: f64, high: f64 },
}

#[derive(Debug, Clone, PartialEq, AnchorSerialize, AnchorDeserialize)]
pub struct PositionSpec {
    pub bounds: PositionBounds,
    pub bps: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, AnchorSerialize, AnchorDeserialize)]
pub struct LiquidityPosition {
    pub range: TickRange,
    pub bps: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, AnchorSerialize, AnchorDeserialize)]
pub enum PoolPreset {
    /// One position over the whole launch range
    Standard,
    /// Five overlapping positions concentrating liquidity mid-curve
    Project,
}

impl PoolPreset {
    fn positions(&self) -> &'static [(i32, i32, u16)] {
        match self {
            PoolPreset::Standard => &[(-230_400, -120_000, 10_000)],
            PoolPreset::Project => &[
                (-230_400, -214_000, 1_000),
                (-214_000, -155_000, 5_000),
                (-202_000, -155_000, 1_500),
                (-155_000, -120_000, 2_000),
                (-141_000, -120_000, 500),
            ],
        }
    }
}

/// Validated set of liquidity positions whose shares sum to 10000 bps
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiquidityLayout {
    positions: Vec<LiquidityPosition>,
}

impl LiquidityLayout {
    pub fn new(positions: Vec<LiquidityPosition>, starting_tick: i32, tick_spacing: i32) -> Result<Self> {
        require!(
            !positions.is_empty() && positions.len() <= MAX_LIQUIDITY_POSITIONS,
            LaunchError::InvalidPositionCount
        );

        for position in &positions {
            // re-check in case the range was built by hand
            TickRange::new(position.range.lower, position.range.upper, tick_spacing)?;
            require!(
                position.range.lower >= starting_tick,
                LaunchError::PositionBelowStartingTick
            );
        }

        let units: Vec<u16> = positions.iter().map(|p| p.bps).collect();
        validate_sum(&units)?;

        Ok(Self { positions })
    }

    /// Single position from the starting tick to the default upper tick
    pub fn single(starting_tick: i32, tick_spacing: i32) -> Result<Self> {
        let range = TickRange::new(starting_tick, DEFAULT_UPPER_TICK, tick_spacing)?;
        Self::new(
            vec![LiquidityPosition { range, bps: 10_000 }],
            starting_tick,
            tick_spacing,
        )
    }

    pub fn preset(preset: PoolPreset, starting_tick: i32, tick_spacing: i32) -> Result<Self> {
        let positions = preset
            .positions()
            .iter()
            .map(|(lower, upper, bps)| {
                Ok(LiquidityPosition {
                    range: TickRange::new(*lower, *upper, tick_spacing)?,
                    bps: *bps,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(positions, starting_tick, tick_spacing)
    }

    pub fn from_specs(
        specs: &[PositionSpec],
        paired_decimals: u8,
        starting_tick: i32,
        tick_spacing: i32,
    ) -> Result<Self> {
        let positions = specs
            .iter()
            .map(|spec| {
                let range = match spec.bounds {
                    PositionBounds::Ticks { lower, upper } => {
                        TickRange::new(lower, upper, tick_spacing)?
                    }
                    PositionBounds::MarketCap { low, high } => {
                        market_cap_range_to_ticks(low, high, paired_decimals, tick_spacing)?
                    }
                };
                Ok(LiquidityPosition {
                    range,
                    bps: spec.bps,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(positions, starting_tick, tick_spacing)
    }

    pub fn positions(&self) -> &[LiquidityPosition] {
        &self.positions
    }
}
