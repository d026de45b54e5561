//! State transitions that touch more than one account.
//!
//! Each function validates everything first, computes every new value with
//! checked arithmetic, and only then writes. A returned error means nothing
//! was modified.

use anchor_lang::prelude::*;

use crate::constants::PERCENT_TENTHS_DENOMINATOR;
use crate::error::{VestingError, VestingResult};
use crate::state::{
    derive_schedule_id, LedgerTotals, Phase, RecipientSchedules, Schedule, ScheduleRef,
};
use crate::utils::vesting_math;

/// Result of a successful release.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReleaseReceipt {
    pub amount: u64,
    pub vested: u64,
    pub released: u64,
    pub remaining_releasable: u64,
}

/// Pay `requested` units of `schedule` at `now`.
pub fn execute_release(
    phase: &Phase,
    schedule: &mut Schedule,
    totals: &mut LedgerTotals,
    requested: u64,
    now: i64,
) -> VestingResult<ReleaseReceipt> {
    if !schedule.initialized {
        return Err(VestingError::ScheduleNotFound);
    }
    if !phase.initialized {
        return Err(VestingError::PhaseNotFound);
    }
    let max_releasable = vesting_math::releasable(phase, schedule, now)?;
    if max_releasable == 0 || requested > max_releasable {
        return Err(VestingError::InsufficientReleasable);
    }
    if requested == 0 {
        return Err(VestingError::InvalidAmount);
    }
    if requested > totals.pool_balance {
        return Err(VestingError::InsufficientPoolBalance);
    }

    let released = schedule.preview_release(requested)?;
    let (released_total, pool_balance) = totals.preview_release(requested)?;

    schedule.released = released;
    totals.released_total = released_total;
    totals.pool_balance = pool_balance;

    Ok(ReleaseReceipt {
        amount: requested,
        vested: released
            .checked_add(max_releasable - requested)
            .ok_or(VestingError::ArithmeticOverflow)?,
        released,
        remaining_releasable: max_releasable - requested,
    })
}

/// Inputs for a new schedule.
#[derive(Clone, Copy, Debug)]
pub struct NewSchedule {
    pub pool: Pubkey,
    pub recipient: Pubkey,
    pub total_amount: u64,
    pub cliff_percent_tenths: u16,
    pub bump: u8,
}

/// Attach a schedule to `phase`, append it to the recipient's list and commit
/// its total to the ledger. `slot` is the `(pool, recipient, phase_id)` account.
pub fn register_schedule(
    phase: &Phase,
    slot: &mut Schedule,
    index: &mut RecipientSchedules,
    totals: &mut LedgerTotals,
    new: NewSchedule,
) -> VestingResult<[u8; 32]> {
    if new.recipient == Pubkey::default() {
        return Err(VestingError::InvalidPubkey);
    }
    if new.total_amount == 0 {
        return Err(VestingError::InvalidAllocation);
    }
    if new.cliff_percent_tenths > PERCENT_TENTHS_DENOMINATOR {
        return Err(VestingError::InvalidCliffPercent);
    }
    if !phase.initialized {
        return Err(VestingError::PhaseNotFound);
    }
    if slot.initialized {
        return Err(VestingError::DuplicateSchedule);
    }

    let sequence_index = index.next_sequence_index()?;
    let committed = totals
        .committed
        .checked_add(new.total_amount)
        .ok_or(VestingError::ArithmeticOverflow)?;
    let schedule_id =
        derive_schedule_id(&new.pool, &new.recipient, phase.phase_id, sequence_index);

    index.push(ScheduleRef {
        schedule_id,
        phase_id: phase.phase_id,
    })?;
    *slot = Schedule {
        pool: new.pool,
        recipient: new.recipient,
        phase_id: phase.phase_id,
        schedule_id,
        sequence_index,
        total_amount: new.total_amount,
        cliff_percent_tenths: new.cliff_percent_tenths,
        released: 0,
        initialized: true,
        bump: new.bump,
    };
    totals.committed = committed;

    Ok(schedule_id)
}
