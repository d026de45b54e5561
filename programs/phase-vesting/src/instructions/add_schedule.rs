use anchor_lang::prelude::*;

use crate::constants::{PHASE_SEED, RECIPIENT_SCHEDULES_SEED, SCHEDULE_SEED, VESTING_POOL_SEED};
use crate::error::VestingError;
use crate::executor::{self, NewSchedule};
use crate::state::{RecipientSchedules, Schedule, VestingPool};
use crate::utils::account_loader::load_phase;

pub fn add_schedule(
    ctx: Context<AddSchedule>,
    recipient: Pubkey,
    total_amount: u64,
    cliff_percent_tenths: u16,
) -> Result<[u8; 32]> {
    let pool_key = ctx.accounts.vesting_pool.key();
    require_keys_eq!(
        ctx.accounts.admin.key(),
        ctx.accounts.vesting_pool.admin,
        VestingError::UnauthorizedAdmin
    );

    let phase = load_phase(&ctx.accounts.phase.to_account_info())?;

    let index = &mut ctx.accounts.recipient_schedules;
    index.bind(pool_key, recipient, ctx.bumps.recipient_schedules);

    let pool = &mut ctx.accounts.vesting_pool;
    let schedule = &mut ctx.accounts.schedule;
    let schedule_id = executor::register_schedule(
        &phase,
        schedule,
        index,
        &mut pool.totals,
        NewSchedule {
            pool: pool_key,
            recipient,
            total_amount,
            cliff_percent_tenths,
            bump: ctx.bumps.schedule,
        },
    )?;
    pool.schedule_count = pool
        .schedule_count
        .checked_add(1)
        .ok_or(VestingError::ArithmeticOverflow)?;

    let cliff_override = cliff_percent_tenths != phase.cliff_percent_tenths;
    if cliff_override {
        msg!(
            "Schedule cliff {} differs from phase {} default {}",
            cliff_percent_tenths,
            phase.phase_id,
            phase.cliff_percent_tenths
        );
    }

    emit!(ScheduleAdded {
        pool: pool_key,
        recipient,
        phase_id: phase.phase_id,
        schedule_id,
        sequence_index: schedule.sequence_index,
        total_amount,
        cliff_percent_tenths,
        cliff_override,
        committed: pool.totals.committed,
    });

    Ok(schedule_id)
}

#[derive(Accounts)]
#[instruction(recipient: Pubkey, total_amount: u64, cliff_percent_tenths: u16, phase_id: u64)]
pub struct AddSchedule<'info> {
    #[account(
        mut,
        seeds = [VESTING_POOL_SEED, vesting_pool.mint.as_ref()],
        bump = vesting_pool.bump
    )]
    pub vesting_pool: Account<'info, VestingPool>,

    #[account(
        seeds = [PHASE_SEED, vesting_pool.key().as_ref(), &phase_id.to_le_bytes()],
        bump
    )]
    /// CHECK: May be absent; loaded in-handler so a missing phase reports `PhaseNotFound`.
    pub phase: UncheckedAccount<'info>,

    #[account(
        init_if_needed,
        payer = admin,
        space = 8 + Schedule::SIZE,
        seeds = [
            SCHEDULE_SEED,
            vesting_pool.key().as_ref(),
            recipient.as_ref(),
            &phase_id.to_le_bytes()
        ],
        bump
    )]
    pub schedule: Box<Account<'info, Schedule>>,

    #[account(
        init_if_needed,
        payer = admin,
        space = 8 + RecipientSchedules::SIZE,
        seeds = [RECIPIENT_SCHEDULES_SEED, vesting_pool.key().as_ref(), recipient.as_ref()],
        bump
    )]
    pub recipient_schedules: Box<Account<'info, RecipientSchedules>>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[event]
pub struct ScheduleAdded {
    pub pool: Pubkey,
    pub recipient: Pubkey,
    pub phase_id: u64,
    pub schedule_id: [u8; 32],
    pub sequence_index: u32,
    pub total_amount: u64,
    pub cliff_percent_tenths: u16,
    /// True when the schedule's cliff percent differs from the phase default.
    pub cliff_override: bool,
    pub committed: u64,
}
