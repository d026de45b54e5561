use anchor_lang::prelude::*;

use crate::constants::VESTING_POOL_SEED;
use crate::state::{LedgerTotals, VestingPool};

pub fn get_totals(ctx: Context<GetTotals>) -> Result<LedgerTotals> {
    Ok(ctx.accounts.vesting_pool.totals)
}

#[derive(Accounts)]
pub struct GetTotals<'info> {
    #[account(
        seeds = [VESTING_POOL_SEED, vesting_pool.mint.as_ref()],
        bump = vesting_pool.bump
    )]
    pub vesting_pool: Account<'info, VestingPool>,
}
