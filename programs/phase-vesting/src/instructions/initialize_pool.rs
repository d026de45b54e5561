use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{VAULT_SEED, VESTING_POOL_SEED};
use crate::state::{LedgerTotals, VestingPool};

pub fn initialize_pool(ctx: Context<InitializePool>) -> Result<()> {
    let pool = &mut ctx.accounts.vesting_pool;
    pool.mint = ctx.accounts.mint.key();
    pool.admin = ctx.accounts.admin.key();
    pool.vault = ctx.accounts.vault.key();
    pool.totals = LedgerTotals::default();
    pool.phase_count = 0;
    pool.schedule_count = 0;
    pool.bump = ctx.bumps.vesting_pool;
    pool.vault_bump = ctx.bumps.vault;

    emit!(PoolInitialized {
        pool: pool.key(),
        mint: pool.mint,
        admin: pool.admin,
        vault: pool.vault,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct InitializePool<'info> {
    #[account(
        init,
        payer = admin,
        space = 8 + VestingPool::SIZE,
        seeds = [VESTING_POOL_SEED, mint.key().as_ref()],
        bump
    )]
    pub vesting_pool: Account<'info, VestingPool>,

    #[account(
        init,
        payer = admin,
        token::mint = mint,
        token::authority = vesting_pool,
        seeds = [VAULT_SEED, vesting_pool.key().as_ref()],
        bump
    )]
    pub vault: Account<'info, TokenAccount>,

    pub mint: Account<'info, Mint>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

#[event]
pub struct PoolInitialized {
    pub pool: Pubkey,
    pub mint: Pubkey,
    pub admin: Pubkey,
    pub vault: Pubkey,
}
