use anchor_lang::prelude::*;
use ruint::aliases::U256;

use crate::errors::LaunchError;

/// Absolute lockup and vesting boundaries of a distribution
#[derive(Debug, Clone, Copy, PartialEq, Eq, AnchorSerialize, AnchorDeserialize)]
pub struct VestingSchedule {
    /// Nothing is claimable before this timestamp
    pub lockup_end: i64,
    /// Everything is claimable from this timestamp
    pub vesting_end: i64,
}

impl VestingSchedule {
    /// Schedule for a distribution that starts at `start_time`
    pub fn new(start_time: i64, lockup_duration: u64, vesting_duration: u64) -> Result<Self> {
        let lockup = i64::try_from(lockup_duration).map_err(|_| LaunchError::TypeCastFailed)?;
        let vesting = i64::try_from(vesting_duration).map_err(|_| LaunchError::TypeCastFailed)?;

        let lockup_end = start_time
            .checked_add(lockup)
            .ok_or(LaunchError::MathOverflow)?;
        let vesting_end = lockup_end
            .checked_add(vesting)
            .ok_or(LaunchError::MathOverflow)?;

        Ok(Self {
            lockup_end,
            vesting_end,
        })
    }

    pub fn is_locked(&self, now: i64) -> bool {
        now < self.lockup_end
    }

    /// Cumulative amount unlocked at `now`, independent of what was claimed
    pub fn unlocked_amount(&self, total: U256, now: i64) -> Result<U256> {
        require!(
            self.vesting_end >= self.lockup_end,
            LaunchError::InvalidVestingWindow
        );

        // Still in lock period
        if now < self.lockup_end {
            return Ok(U256::ZERO);
        }

        // Vesting finished, or no vesting at all
        if now >= self.vesting_end {
            return Ok(total);
        }

        // Multiply first then divide to keep precision
        let elapsed = U256::from(now.abs_diff(self.lockup_end));
        let window = U256::from(self.vesting_end.abs_diff(self.lockup_end));
        let unlocked = total
            .checked_mul(elapsed)
            .ok_or(LaunchError::MathOverflow)?
            .checked_div(window)
            .ok_or(LaunchError::DivisionByZero)?;

        Ok(unlocked.min(total))
    }

    pub fn claimable(&self, total: U256, claimed_so_far: U256, now: i64) -> Result<U256> {
        claimable_now(total, claimed_so_far, self.lockup_end, self.vesting_end, now)
    }
}

/// Amount claimable at `now` given what has already been claimed.
/// A claimed amount above the unlocked amount clamps to zero with a warning.
pub fn claimable_now(
    total: U256,
    claimed_so_far: U256,
    lockup_end: i64,
    vesting_end: i64,
    now: i64,
) -> Result<U256> {
    let schedule = VestingSchedule {
        lockup_end,
        vesting_end,
    };
    let unlocked = schedule.unlocked_amount(total, now)?;

    if claimed_so_far > unlocked {
        msg!(
            "Warning: claimed {} exceeds unlocked {} at {}; reporting zero",
            claimed_so_far,
            unlocked,
            now
        );
        return Ok(U256::ZERO);
    }

    Ok(unlocked - claimed_so_far)
}
