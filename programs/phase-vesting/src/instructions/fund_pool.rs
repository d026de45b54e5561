use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::{VAULT_SEED, VESTING_POOL_SEED};
use crate::error::VestingError;
use crate::state::VestingPool;

pub fn fund_pool(ctx: Context<FundPool>, amount: u64) -> Result<()> {
    require!(amount > 0, VestingError::InvalidAmount);

    let pool = &ctx.accounts.vesting_pool;
    require_keys_eq!(ctx.accounts.admin.key(), pool.admin, VestingError::UnauthorizedAdmin);
    require_keys_eq!(
        ctx.accounts.admin_token_account.mint,
        pool.mint,
        VestingError::InvalidTokenMint
    );
    require_keys_eq!(
        ctx.accounts.admin_token_account.owner,
        ctx.accounts.admin.key(),
        VestingError::InvalidTokenAccount
    );

    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.admin_token_account.to_account_info(),
                to: ctx.accounts.vault.to_account_info(),
                authority: ctx.accounts.admin.to_account_info(),
            },
        ),
        amount,
    )?;

    let pool = &mut ctx.accounts.vesting_pool;
    pool.totals.fund_pool(amount)?;

    ctx.accounts.vault.reload()?;
    emit!(PoolFunded {
        pool: ctx.accounts.vesting_pool.key(),
        amount,
        pool_balance: ctx.accounts.vesting_pool.totals.pool_balance,
        vault_balance: ctx.accounts.vault.amount,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct FundPool<'info> {
    #[account(
        mut,
        seeds = [VESTING_POOL_SEED, vesting_pool.mint.as_ref()],
        bump = vesting_pool.bump
    )]
    pub vesting_pool: Account<'info, VestingPool>,

    #[account(
        mut,
        seeds = [VAULT_SEED, vesting_pool.key().as_ref()],
        bump = vesting_pool.vault_bump,
        constraint = vault.mint == vesting_pool.mint @ VestingError::InvalidTokenMint,
    )]
    pub vault: Account<'info, TokenAccount>,

    #[account(mut)]
    pub admin_token_account: Account<'info, TokenAccount>,

    pub admin: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

#[event]
pub struct PoolFunded {
    pub pool: Pubkey,
    pub amount: u64,
    pub pool_balance: u64,
    pub vault_balance: u64,
}
