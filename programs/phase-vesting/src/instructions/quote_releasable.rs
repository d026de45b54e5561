use anchor_lang::prelude::*;

use crate::constants::VESTING_POOL_SEED;
use crate::error::VestingError;
use crate::state::VestingPool;
use crate::utils::{account_loader, vesting_math};

/// Read-only releasable amount for a schedule, at `at_ts` or at the current clock.
pub fn quote_releasable(
    ctx: Context<QuoteReleasable>,
    schedule_id: [u8; 32],
    at_ts: Option<i64>,
) -> Result<u64> {
    let pool_key = ctx.accounts.vesting_pool.key();
    let schedule =
        account_loader::load_schedule(&ctx.accounts.schedule.to_account_info(), &schedule_id)?;
    require_keys_eq!(schedule.pool, pool_key, VestingError::ScheduleNotFound);

    let phase = account_loader::load_phase(&ctx.accounts.phase.to_account_info())?;
    require!(
        phase.pool == pool_key && phase.phase_id == schedule.phase_id,
        VestingError::PhaseNotFound
    );

    let now = match at_ts {
        Some(ts) => ts,
        None => Clock::get()?.unix_timestamp,
    };
    let vested = vesting_math::vested_amount(
        &phase,
        schedule.total_amount,
        schedule.cliff_percent_tenths,
        now,
    )?;
    let releasable = vesting_math::releasable(&phase, &schedule, now)?;

    emit!(VestingQuote {
        recipient: schedule.recipient,
        schedule_id,
        phase_id: phase.phase_id,
        at_ts: now,
        vested_amount: vested,
        released_amount: schedule.released,
        releasable,
    });

    Ok(releasable)
}

#[derive(Accounts)]
pub struct QuoteReleasable<'info> {
    #[account(
        seeds = [VESTING_POOL_SEED, vesting_pool.mint.as_ref()],
        bump = vesting_pool.bump
    )]
    pub vesting_pool: Account<'info, VestingPool>,

    /// CHECK: Owner, discriminator and schedule id are verified in-handler.
    pub schedule: UncheckedAccount<'info>,

    /// CHECK: Owner, discriminator, pool and phase id are verified in-handler.
    pub phase: UncheckedAccount<'info>,
}

#[event]
pub struct VestingQuote {
    pub recipient: Pubkey,
    pub schedule_id: [u8; 32],
    pub phase_id: u64,
    pub at_ts: i64,
    pub vested_amount: u64,
    pub released_amount: u64,
    pub releasable: u64,
}
