use anchor_lang::prelude::*;

use crate::constants::{
    MAX_LIST_PAGE, RECIPIENT_SCHEDULES_SEED, SCHEDULE_SEED, VESTING_POOL_SEED,
};
use crate::error::VestingError;
use crate::state::{RecipientSchedules, Schedule, ScheduleView, VestingPool};
use crate::utils::account_loader;

pub fn schedule_exists(ctx: Context<ScheduleSlotLookup>) -> Result<bool> {
    account_loader::schedule_exists(&ctx.accounts.schedule.to_account_info())
}

pub fn get_schedule(ctx: Context<ScheduleLookup>, schedule_id: [u8; 32]) -> Result<Schedule> {
    let schedule =
        account_loader::load_schedule(&ctx.accounts.schedule.to_account_info(), &schedule_id)?;
    require_keys_eq!(
        schedule.pool,
        ctx.accounts.vesting_pool.key(),
        VestingError::ScheduleNotFound
    );
    Ok(schedule)
}

/// One page of `recipient`'s schedules in creation order, starting at `start`.
///
/// Remaining accounts must be the schedule accounts of that page, in order;
/// a shorter list truncates the page. Re-issue with a later `start` to continue.
pub fn list_schedules(ctx: Context<ListSchedules>, start: u32) -> Result<Vec<ScheduleView>> {
    let index = match account_loader::try_load::<RecipientSchedules>(
        &ctx.accounts.recipient_schedules.to_account_info(),
    )? {
        Some(index) if index.initialized => index,
        _ => return Ok(Vec::new()),
    };

    let page = index.page(start);
    let mut views = Vec::with_capacity(page.len().min(MAX_LIST_PAGE));
    for (entry, info) in page.iter().zip(ctx.remaining_accounts.iter()) {
        let schedule = account_loader::load_schedule(info, &entry.schedule_id)?;
        views.push(schedule.view());
    }
    Ok(views)
}

#[derive(Accounts)]
#[instruction(recipient: Pubkey, phase_id: u64)]
pub struct ScheduleSlotLookup<'info> {
    #[account(
        seeds = [VESTING_POOL_SEED, vesting_pool.mint.as_ref()],
        bump = vesting_pool.bump
    )]
    pub vesting_pool: Account<'info, VestingPool>,

    #[account(
        seeds = [
            SCHEDULE_SEED,
            vesting_pool.key().as_ref(),
            recipient.as_ref(),
            &phase_id.to_le_bytes()
        ],
        bump
    )]
    /// CHECK: Existence is the question being asked; read via `utils::account_loader`.
    pub schedule: UncheckedAccount<'info>,
}

#[derive(Accounts)]
pub struct ScheduleLookup<'info> {
    #[account(
        seeds = [VESTING_POOL_SEED, vesting_pool.mint.as_ref()],
        bump = vesting_pool.bump
    )]
    pub vesting_pool: Account<'info, VestingPool>,

    /// CHECK: Owner, discriminator and schedule id are verified in-handler.
    pub schedule: UncheckedAccount<'info>,
}

#[derive(Accounts)]
#[instruction(recipient: Pubkey)]
pub struct ListSchedules<'info> {
    #[account(
        seeds = [VESTING_POOL_SEED, vesting_pool.mint.as_ref()],
        bump = vesting_pool.bump
    )]
    pub vesting_pool: Account<'info, VestingPool>,

    #[account(
        seeds = [RECIPIENT_SCHEDULES_SEED, vesting_pool.key().as_ref(), recipient.as_ref()],
        bump
    )]
    /// CHECK: Absent for recipients without schedules; read via `utils::account_loader`.
    pub recipient_schedules: UncheckedAccount<'info>,
}
