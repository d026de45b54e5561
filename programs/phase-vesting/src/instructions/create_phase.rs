use anchor_lang::prelude::*;

use crate::constants::{PHASE_SEED, VESTING_POOL_SEED};
use crate::error::VestingError;
use crate::state::{Phase, PhaseCreation, PhaseParams, VestingPool};

/// Register a phase. Re-using an existing `phase_id` is a logged skip, not an
/// overwrite; use `phase_exists` to tell the two apart up front.
pub fn create_phase(ctx: Context<CreatePhase>, params: PhaseParams) -> Result<()> {
    let pool_key = ctx.accounts.vesting_pool.key();
    let pool = &mut ctx.accounts.vesting_pool;
    require_keys_eq!(ctx.accounts.admin.key(), pool.admin, VestingError::UnauthorizedAdmin);

    let phase = &mut ctx.accounts.phase;
    match phase.create(pool_key, params.clone(), ctx.bumps.phase)? {
        PhaseCreation::AlreadyExists => {
            msg!("Phase {} ({}) exists; creation skipped", params.phase_id, phase.name);
            emit!(PhaseCreationSkipped {
                pool: pool_key,
                phase_id: params.phase_id,
            });
        }
        PhaseCreation::Created => {
            pool.phase_count = pool
                .phase_count
                .checked_add(1)
                .ok_or(VestingError::ArithmeticOverflow)?;
            emit!(PhaseCreated {
                pool: pool_key,
                phase_id: phase.phase_id,
                start: phase.start,
                cliff_duration: phase.cliff_duration,
                cliff_percent_tenths: phase.cliff_percent_tenths,
                vest_duration: phase.vest_duration,
                slice_seconds: phase.slice_seconds,
                name: phase.name.clone(),
            });
        }
    }

    Ok(())
}

#[derive(Accounts)]
#[instruction(phase_id: u64)]
pub struct CreatePhase<'info> {
    #[account(
        mut,
        seeds = [VESTING_POOL_SEED, vesting_pool.mint.as_ref()],
        bump = vesting_pool.bump
    )]
    pub vesting_pool: Account<'info, VestingPool>,

    #[account(
        init_if_needed,
        payer = admin,
        space = 8 + Phase::SIZE,
        seeds = [PHASE_SEED, vesting_pool.key().as_ref(), &phase_id.to_le_bytes()],
        bump
    )]
    pub phase: Account<'info, Phase>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[event]
pub struct PhaseCreated {
    pub pool: Pubkey,
    pub phase_id: u64,
    pub start: i64,
    pub cliff_duration: i64,
    pub cliff_percent_tenths: u16,
    pub vest_duration: i64,
    pub slice_seconds: i64,
    pub name: String,
}

#[event]
pub struct PhaseCreationSkipped {
    pub pool: Pubkey,
    pub phase_id: u64,
}
