//! Cliff + slice vesting arithmetic. Pure and clock-free: `now` is always an argument.
//!
//! - nothing vests before `start + cliff_duration`
//! - at the cliff, `floor(total * cliff_percent_tenths / 1000)` vests
//! - the remainder unlocks in `vest_duration / slice_seconds` equal slices of
//!   `floor(remainder / slices)`; the last slice also carries the division residue
//! - the vested amount is non-decreasing in `now` and ends at exactly `total`

use crate::constants::PERCENT_TENTHS_DENOMINATOR;
use crate::error::{VestingError, VestingResult};
use crate::state::{Phase, Schedule};

/// Units of a `total_amount` allocation vested at `now` under `phase`.
pub fn vested_amount(
    phase: &Phase,
    total_amount: u64,
    cliff_percent_tenths: u16,
    now: i64,
) -> VestingResult<u64> {
    if cliff_percent_tenths > PERCENT_TENTHS_DENOMINATOR {
        return Err(VestingError::InvalidCliffPercent);
    }
    let cliff_end = phase.cliff_end()?;
    if now < cliff_end {
        return Ok(0);
    }

    let total = total_amount as u128;
    let cliff_amount = total
        .checked_mul(cliff_percent_tenths as u128)
        .ok_or(VestingError::ArithmeticOverflow)?
        / PERCENT_TENTHS_DENOMINATOR as u128;
    let remainder = total
        .checked_sub(cliff_amount)
        .ok_or(VestingError::ArithmeticOverflow)?;

    let num_slices = phase.num_slices()? as u128;
    let post_cliff = if num_slices == 0 {
        remainder
    } else {
        // now >= cliff_end; i128 keeps a negative cliff_end from overflowing.
        let elapsed = (now as i128 - cliff_end as i128) as u128;
        let slices_elapsed = (elapsed / phase.slice_seconds as u128).min(num_slices);
        if slices_elapsed == num_slices {
            remainder
        } else {
            let per_slice = remainder / num_slices;
            slices_elapsed
                .checked_mul(per_slice)
                .ok_or(VestingError::ArithmeticOverflow)?
                .min(remainder)
        }
    };

    let vested = cliff_amount
        .checked_add(post_cliff)
        .ok_or(VestingError::ArithmeticOverflow)?
        .min(total);
    u64::try_from(vested).map_err(|_| VestingError::ArithmeticOverflow)
}

/// Units of `schedule` that may be paid at `now`. Zero when a stale `now`
/// puts vesting below what was already released.
pub fn releasable(phase: &Phase, schedule: &Schedule, now: i64) -> VestingResult<u64> {
    if schedule.phase_id != phase.phase_id {
        return Err(VestingError::PhaseNotFound);
    }
    let vested = vested_amount(
        phase,
        schedule.total_amount,
        schedule.cliff_percent_tenths,
        now,
    )?;
    Ok(vested.saturating_sub(schedule.released))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::phase::tests::{params, phase_from};

    /// start=0, cliff=600 (20%), 8 slices of 600s.
    fn ido_phase() -> Phase {
        phase_from(params(1))
    }

    fn schedule(phase: &Phase, total_amount: u64, cliff_percent_tenths: u16) -> Schedule {
        Schedule {
            phase_id: phase.phase_id,
            total_amount,
            cliff_percent_tenths,
            initialized: true,
            ..Schedule::default()
        }
    }

    #[test]
    fn worked_example() {
        let phase = ido_phase();
        let s = schedule(&phase, 1_000, 200);
        assert_eq!(releasable(&phase, &s, 599).unwrap(), 0);
        assert_eq!(releasable(&phase, &s, 600).unwrap(), 200);
        assert_eq!(releasable(&phase, &s, 1_199).unwrap(), 200);
        assert_eq!(releasable(&phase, &s, 1_200).unwrap(), 300);
        assert_eq!(releasable(&phase, &s, 5_399).unwrap(), 900);
        assert_eq!(releasable(&phase, &s, 5_400).unwrap(), 1_000);
        assert_eq!(releasable(&phase, &s, i64::MAX).unwrap(), 1_000);
    }

    #[test]
    fn cliff_boundary_is_inclusive() {
        let phase = ido_phase();
        let s = schedule(&phase, 1_000, 500);
        assert_eq!(releasable(&phase, &s, 599).unwrap(), 0);
        assert_eq!(releasable(&phase, &s, 600).unwrap(), 500);
    }

    #[test]
    fn full_payout_absorbs_rounding_residue() {
        for slices in 1..=13i64 {
            let mut p = params(1);
            p.slice_seconds = 7;
            p.vest_duration = 7 * slices;
            let phase = phase_from(p);
            for total in [1u64, 2, 999, 1_001, 10_007, u64::MAX / 3] {
                for pct in [0u16, 1, 333, 999, 1_000] {
                    let s = schedule(&phase, total, pct);
                    let end = phase.vesting_end().unwrap();
                    assert_eq!(releasable(&phase, &s, end).unwrap(), total);
                    if slices > 1 {
                        assert!(releasable(&phase, &s, end - 7).unwrap() <= total);
                    }
                }
            }
        }
    }

    #[test]
    fn vesting_is_monotonic_in_time() {
        let mut p = params(1);
        p.start = 1_000;
        p.cliff_duration = 50;
        p.slice_seconds = 30;
        p.vest_duration = 30 * 7;
        let phase = phase_from(p);
        for pct in [0u16, 75, 1_000] {
            let s = schedule(&phase, 10_003, pct);
            let mut last = 0;
            for now in 900..1_400 {
                let v = releasable(&phase, &s, now).unwrap();
                assert!(v >= last, "decreased at {now}");
                last = v;
            }
            assert_eq!(last, 10_003);
        }
    }

    #[test]
    fn zero_cliff_percent_defers_to_slices() {
        let phase = ido_phase();
        let s = schedule(&phase, 800, 0);
        assert_eq!(releasable(&phase, &s, 600).unwrap(), 0);
        assert_eq!(releasable(&phase, &s, 1_200).unwrap(), 100);
    }

    #[test]
    fn full_cliff_percent_pays_everything_at_cliff() {
        let phase = ido_phase();
        let s = schedule(&phase, 777, 1_000);
        assert_eq!(releasable(&phase, &s, 600).unwrap(), 777);
    }

    #[test]
    fn single_slice_is_one_step() {
        let mut p = params(1);
        p.slice_seconds = 4_800;
        let phase = phase_from(p);
        let s = schedule(&phase, 1_000, 200);
        assert_eq!(releasable(&phase, &s, 5_399).unwrap(), 200);
        assert_eq!(releasable(&phase, &s, 5_400).unwrap(), 1_000);
    }

    #[test]
    fn zero_vest_duration_unlocks_remainder_at_cliff() {
        let mut p = params(1);
        p.vest_duration = 0;
        let phase = phase_from(p);
        let s = schedule(&phase, 1_000, 200);
        assert_eq!(releasable(&phase, &s, 599).unwrap(), 0);
        assert_eq!(releasable(&phase, &s, 600).unwrap(), 1_000);
    }

    #[test]
    fn released_units_are_subtracted_and_stale_clock_clamps() {
        let phase = ido_phase();
        let mut s = schedule(&phase, 1_000, 200);
        s.released = 300;
        assert_eq!(releasable(&phase, &s, 1_800).unwrap(), 100);
        assert_eq!(releasable(&phase, &s, 600).unwrap(), 0);
        assert_eq!(releasable(&phase, &s, 0).unwrap(), 0);
    }

    #[test]
    fn large_totals_do_not_overflow() {
        let phase = ido_phase();
        let s = schedule(&phase, u64::MAX, 999);
        let at_cliff = releasable(&phase, &s, 600).unwrap();
        assert_eq!(at_cliff as u128, (u64::MAX as u128 * 999) / 1_000);
        assert_eq!(releasable(&phase, &s, 5_400).unwrap(), u64::MAX);
    }

    #[test]
    fn pre_epoch_phase_still_pays_in_full() {
        let mut p = params(1);
        p.start = -1_000;
        let phase = phase_from(p);
        let s = schedule(&phase, 1_000, 200);
        assert_eq!(releasable(&phase, &s, -401).unwrap(), 0);
        assert_eq!(releasable(&phase, &s, -400).unwrap(), 200);
        assert_eq!(releasable(&phase, &s, 4_400).unwrap(), 1_000);
        assert_eq!(releasable(&phase, &s, i64::MAX).unwrap(), 1_000);

        let mut p = params(1);
        p.start = i64::MIN;
        let phase = phase_from(p);
        let s = schedule(&phase, 1_000, 200);
        assert_eq!(releasable(&phase, &s, i64::MAX).unwrap(), 1_000);
    }

    #[test]
    fn schedule_from_another_phase_is_rejected() {
        let phase = ido_phase();
        let mut s = schedule(&phase, 10, 0);
        s.phase_id = 2;
        assert!(matches!(
            releasable(&phase, &s, 10_000),
            Err(VestingError::PhaseNotFound)
        ));
    }
}
