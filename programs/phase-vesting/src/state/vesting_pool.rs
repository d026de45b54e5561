use anchor_lang::prelude::*;

use crate::error::{VestingError, VestingResult};

/// Pool-wide accounting, embedded in [`VestingPool`].
///
/// Conservation: `released_total + pool_balance + total_withdrawn == total_funded`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LedgerTotals {
    /// Sum of `total_amount` over every schedule in the pool.
    pub committed: u64,
    /// Sum of `released` over every schedule in the pool.
    pub released_total: u64,
    /// Units held by the vault and available to pay out.
    pub pool_balance: u64,
    /// Lifetime units deposited through `fund_pool`.
    pub total_funded: u64,
    /// Lifetime units taken back through `withdraw_surplus`.
    pub total_withdrawn: u64,
}

impl LedgerTotals {
    pub const SIZE: usize = 8 * 5;

    pub fn fund_pool(&mut self, amount: u64) -> VestingResult<()> {
        if amount == 0 {
            return Err(VestingError::InvalidAmount);
        }
        let pool_balance = self
            .pool_balance
            .checked_add(amount)
            .ok_or(VestingError::ArithmeticOverflow)?;
        let total_funded = self
            .total_funded
            .checked_add(amount)
            .ok_or(VestingError::ArithmeticOverflow)?;
        self.pool_balance = pool_balance;
        self.total_funded = total_funded;
        Ok(())
    }

    /// Commit a new schedule's total to the pool.
    pub fn reserve(&mut self, amount: u64) -> VestingResult<()> {
        self.committed = self
            .committed
            .checked_add(amount)
            .ok_or(VestingError::ArithmeticOverflow)?;
        Ok(())
    }

    /// Pay `amount` out of the pool. Either both counters move or neither does.
    pub fn release(&mut self, amount: u64) -> VestingResult<()> {
        let (released_total, pool_balance) = self.preview_release(amount)?;
        self.released_total = released_total;
        self.pool_balance = pool_balance;
        Ok(())
    }

    /// Counters as they would be after `release(amount)`, without writing them.
    pub fn preview_release(&self, amount: u64) -> VestingResult<(u64, u64)> {
        let pool_balance = self
            .pool_balance
            .checked_sub(amount)
            .ok_or(VestingError::InsufficientPoolBalance)?;
        let released_total = self
            .released_total
            .checked_add(amount)
            .ok_or(VestingError::ArithmeticOverflow)?;
        if released_total > self.committed {
            return Err(VestingError::InsufficientReleasable);
        }
        Ok((released_total, pool_balance))
    }

    /// Units still owed to recipients.
    pub fn outstanding(&self) -> u64 {
        self.committed.saturating_sub(self.released_total)
    }

    /// Vault units beyond what recipients are still owed.
    pub fn surplus(&self) -> u64 {
        self.pool_balance.saturating_sub(self.outstanding())
    }

    pub fn withdraw_surplus(&mut self, amount: u64) -> VestingResult<()> {
        if amount == 0 {
            return Err(VestingError::InvalidAmount);
        }
        if amount > self.surplus() {
            return Err(VestingError::SurplusExceeded);
        }
        let total_withdrawn = self
            .total_withdrawn
            .checked_add(amount)
            .ok_or(VestingError::ArithmeticOverflow)?;
        self.pool_balance -= amount;
        self.total_withdrawn = total_withdrawn;
        Ok(())
    }

    pub fn is_conserved(&self) -> bool {
        let accounted = (self.released_total as u128)
            + (self.pool_balance as u128)
            + (self.total_withdrawn as u128);
        accounted == self.total_funded as u128 && self.released_total <= self.committed
    }
}

/// One vesting pool per mint. Owns the vault and the ledger.
#[account]
#[derive(Debug, Default)]
pub struct VestingPool {
    /// Token mint.
    pub mint: Pubkey,
    /// Admin authority for phases, schedules, funding and surplus withdrawal.
    pub admin: Pubkey,
    /// Vault token account PDA (authority = this pool).
    pub vault: Pubkey,
    pub totals: LedgerTotals,
    pub phase_count: u32,
    pub schedule_count: u64,
    pub bump: u8,
    pub vault_bump: u8,
}

impl VestingPool {
    pub const SIZE: usize =
        32 + // mint
        32 + // admin
        32 + // vault
        LedgerTotals::SIZE +
        4 +  // phase_count
        8 +  // schedule_count
        1 +  // bump
        1;   // vault_bump
}

#[cfg(test)]
mod tests {
    use super::*;

    fn funded(amount: u64) -> LedgerTotals {
        let mut t = LedgerTotals::default();
        t.fund_pool(amount).unwrap();
        t
    }

    #[test]
    fn fund_then_release_moves_both_counters() {
        let mut t = funded(1_000);
        t.reserve(600).unwrap();
        t.release(250).unwrap();
        assert_eq!(t.pool_balance, 750);
        assert_eq!(t.released_total, 250);
        assert_eq!(t.outstanding(), 350);
        assert!(t.is_conserved());
    }

    #[test]
    fn release_beyond_balance_leaves_totals_untouched() {
        let mut t = funded(100);
        t.reserve(500).unwrap();
        let before = t;
        let err = t.release(101).unwrap_err();
        assert!(matches!(err, VestingError::InsufficientPoolBalance));
        assert_eq!(t, before);
    }

    #[test]
    fn release_cannot_outrun_commitments() {
        let mut t = funded(1_000);
        t.reserve(10).unwrap();
        assert!(matches!(
            t.release(11),
            Err(VestingError::InsufficientReleasable)
        ));
        assert_eq!(t.released_total, 0);
        assert_eq!(t.pool_balance, 1_000);
    }

    #[test]
    fn zero_funding_is_rejected() {
        let mut t = LedgerTotals::default();
        assert!(matches!(t.fund_pool(0), Err(VestingError::InvalidAmount)));
    }

    #[test]
    fn surplus_excludes_owed_units() {
        let mut t = funded(1_000);
        t.reserve(700).unwrap();
        t.release(200).unwrap();
        // owed 500, balance 800
        assert_eq!(t.surplus(), 300);
        assert!(matches!(
            t.withdraw_surplus(301),
            Err(VestingError::SurplusExceeded)
        ));
        t.withdraw_surplus(300).unwrap();
        assert_eq!(t.pool_balance, 500);
        assert_eq!(t.surplus(), 0);
        assert!(t.is_conserved());
    }

    #[test]
    fn underfunded_pool_has_no_surplus() {
        let mut t = funded(100);
        t.reserve(1_000).unwrap();
        assert_eq!(t.surplus(), 0);
    }
}
