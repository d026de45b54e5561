use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::{VAULT_SEED, VESTING_POOL_SEED};
use crate::error::VestingError;
use crate::state::VestingPool;

/// Return vault units no schedule can ever claim. Units still owed to
/// recipients (`committed - released_total`) are never withdrawable.
pub fn withdraw_surplus(ctx: Context<WithdrawSurplus>, amount: u64) -> Result<()> {
    let pool_ai = ctx.accounts.vesting_pool.to_account_info();
    let pool_key = ctx.accounts.vesting_pool.key();

    let pool = &mut ctx.accounts.vesting_pool;
    require_keys_eq!(ctx.accounts.admin.key(), pool.admin, VestingError::UnauthorizedAdmin);
    require_keys_eq!(
        ctx.accounts.admin_destination.mint,
        pool.mint,
        VestingError::InvalidTokenMint
    );
    require_keys_eq!(
        ctx.accounts.admin_destination.owner,
        ctx.accounts.admin.key(),
        VestingError::InvalidTokenAccount
    );

    pool.totals.withdraw_surplus(amount)?;

    let mint = pool.mint;
    let signer_seeds: &[&[&[u8]]] = &[&[VESTING_POOL_SEED, mint.as_ref(), &[pool.bump]]];
    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.vault.to_account_info(),
                to: ctx.accounts.admin_destination.to_account_info(),
                authority: pool_ai,
            },
            signer_seeds,
        ),
        amount,
    )?;

    emit!(SurplusWithdrawn {
        pool: pool_key,
        admin: pool.admin,
        amount,
        pool_balance: pool.totals.pool_balance,
        outstanding: pool.totals.outstanding(),
    });

    Ok(())
}

#[derive(Accounts)]
pub struct WithdrawSurplus<'info> {
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
    pub admin_destination: Account<'info, TokenAccount>,

    pub admin: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

#[event]
pub struct SurplusWithdrawn {
    pub pool: Pubkey,
    pub admin: Pubkey,
    pub amount: u64,
    pub pool_balance: u64,
    pub outstanding: u64,
}
