use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::{VAULT_SEED, VESTING_POOL_SEED};
use crate::error::VestingError;
use crate::executor;
use crate::state::VestingPool;
use crate::utils::account_loader::{load_phase, load_schedule, store_schedule};

pub fn release(ctx: Context<ReleaseVested>, schedule_id: [u8; 32], amount: u64) -> Result<()> {
    // Capture AccountInfos/keys before taking mutable borrows.
    let pool_ai = ctx.accounts.vesting_pool.to_account_info();
    let pool_key = ctx.accounts.vesting_pool.key();
    let mint = ctx.accounts.vesting_pool.mint;
    let pool_bump = ctx.accounts.vesting_pool.bump;
    let schedule_ai = ctx.accounts.schedule.to_account_info();

    let mut schedule = load_schedule(&schedule_ai, &schedule_id)?;
    require_keys_eq!(schedule.pool, pool_key, VestingError::ScheduleNotFound);

    let phase = load_phase(&ctx.accounts.phase.to_account_info())?;
    require!(
        phase.pool == pool_key && phase.phase_id == schedule.phase_id,
        VestingError::PhaseNotFound
    );

    let authority = ctx.accounts.authority.key();
    require!(
        authority == schedule.recipient || authority == ctx.accounts.vesting_pool.admin,
        VestingError::UnauthorizedReleaser
    );
    require_keys_eq!(
        ctx.accounts.recipient_token_account.owner,
        schedule.recipient,
        VestingError::InvalidTokenAccount
    );

    let now = Clock::get()?.unix_timestamp;

    let pool = &mut ctx.accounts.vesting_pool;
    let receipt =
        executor::execute_release(&phase, &mut schedule, &mut pool.totals, amount, now)?;
    store_schedule(&schedule_ai, &schedule)?;

    let signer_seeds: &[&[&[u8]]] = &[&[VESTING_POOL_SEED, mint.as_ref(), &[pool_bump]]];
    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.vault.to_account_info(),
                to: ctx.accounts.recipient_token_account.to_account_info(),
                authority: pool_ai,
            },
            signer_seeds,
        ),
        receipt.amount,
    )?;

    emit!(TokensReleased {
        pool: pool_key,
        recipient: schedule.recipient,
        schedule_id,
        phase_id: phase.phase_id,
        amount: receipt.amount,
        vested: receipt.vested,
        released_total: receipt.released,
        total_amount: schedule.total_amount,
        pool_balance: ctx.accounts.vesting_pool.totals.pool_balance,
        timestamp: now,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct ReleaseVested<'info> {
    #[account(
        mut,
        seeds = [VESTING_POOL_SEED, vesting_pool.mint.as_ref()],
        bump = vesting_pool.bump
    )]
    pub vesting_pool: Account<'info, VestingPool>,

    #[account(mut)]
    /// CHECK: Loaded in-handler so a missing schedule reports `ScheduleNotFound`;
    /// owner, discriminator, schedule id and pool are all verified there.
    pub schedule: UncheckedAccount<'info>,

    /// CHECK: Loaded in-handler so a missing phase reports `PhaseNotFound`;
    /// pool and phase id are matched against the schedule.
    pub phase: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [VAULT_SEED, vesting_pool.key().as_ref()],
        bump = vesting_pool.vault_bump,
        constraint = vault.mint == vesting_pool.mint @ VestingError::InvalidTokenMint,
    )]
    pub vault: Account<'info, TokenAccount>,

    /// Must be owned by the schedule's recipient (checked in-handler).
    #[account(
        mut,
        constraint = recipient_token_account.mint == vesting_pool.mint
            @ VestingError::InvalidTokenMint,
    )]
    pub recipient_token_account: Account<'info, TokenAccount>,

    /// Recipient or pool admin.
    pub authority: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

#[event]
pub struct TokensReleased {
    pub pool: Pubkey,
    pub recipient: Pubkey,
    pub schedule_id: [u8; 32],
    pub phase_id: u64,
    pub amount: u64,
    pub vested: u64,
    pub released_total: u64,
    pub total_amount: u64,
    pub pool_balance: u64,
    pub timestamp: i64,
}
