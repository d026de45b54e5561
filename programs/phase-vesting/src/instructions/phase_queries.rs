use anchor_lang::prelude::*;

use crate::constants::{PHASE_SEED, VESTING_POOL_SEED};
use crate::error::VestingError;
use crate::state::{Phase, VestingPool};
use crate::utils::account_loader;

pub fn phase_exists(ctx: Context<PhaseLookup>) -> Result<bool> {
    account_loader::phase_exists(&ctx.accounts.phase.to_account_info())
}

pub fn get_phase(ctx: Context<PhaseLookup>, phase_id: u64) -> Result<Phase> {
    let phase = account_loader::load_phase(&ctx.accounts.phase.to_account_info())?;
    require!(phase.phase_id == phase_id, VestingError::PhaseNotFound);
    Ok(phase)
}

#[derive(Accounts)]
#[instruction(phase_id: u64)]
pub struct PhaseLookup<'info> {
    #[account(
        seeds = [VESTING_POOL_SEED, vesting_pool.mint.as_ref()],
        bump = vesting_pool.bump
    )]
    pub vesting_pool: Account<'info, VestingPool>,

    #[account(
        seeds = [PHASE_SEED, vesting_pool.key().as_ref(), &phase_id.to_le_bytes()],
        bump
    )]
    /// CHECK: Existence is the question being asked; read via `utils::account_loader`.
    pub phase: UncheckedAccount<'info>,
}
