use anchor_lang::prelude::*;
use bytemuck::{Pod, Zeroable};

use crate::constants::SCHEDULE_ID_DOMAIN;
use crate::error::{VestingError, VestingResult};

/// Fixed-layout preimage hashed into a schedule id.
#[derive(Clone, Copy, Pod, Zeroable)]
#[repr(C)]
struct ScheduleIdPreimage {
    domain: [u8; 16],
    pool: [u8; 32],
    recipient: [u8; 32],
    phase_id: [u8; 8],
    sequence_index: [u8; 4],
}

/// Deterministic schedule id for the `sequence_index`-th schedule of `recipient`.
/// Recomputable off-chain from the same inputs.
pub fn derive_schedule_id(
    pool: &Pubkey,
    recipient: &Pubkey,
    phase_id: u64,
    sequence_index: u32,
) -> [u8; 32] {
    let preimage = ScheduleIdPreimage {
        domain: SCHEDULE_ID_DOMAIN,
        pool: pool.to_bytes(),
        recipient: recipient.to_bytes(),
        phase_id: phase_id.to_le_bytes(),
        sequence_index: sequence_index.to_le_bytes(),
    };
    *blake3::hash(bytemuck::bytes_of(&preimage)).as_bytes()
}

/// Derived release progress. Never stored.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScheduleStatus {
    /// Nothing paid yet.
    Unfunded,
    PartiallyReleased,
    FullyReleased,
}

/// One recipient's allocation within one phase.
///
/// The PDA is seeded by `(pool, recipient, phase_id)`, which makes the
/// address itself the one-schedule-per-phase uniqueness index.
#[account]
#[derive(Debug, Default)]
pub struct Schedule {
    pub pool: Pubkey,
    pub recipient: Pubkey,
    pub phase_id: u64,
    pub schedule_id: [u8; 32],
    /// Position in the recipient's creation-ordered list.
    pub sequence_index: u32,
    pub total_amount: u64,
    /// Share unlocked at the cliff; may differ from the phase default.
    pub cliff_percent_tenths: u16,
    /// Cumulative units paid. Never decreases, never exceeds `total_amount`.
    pub released: u64,
    pub initialized: bool,
    pub bump: u8,
}

impl Schedule {
    pub const SIZE: usize =
        32 + // pool
        32 + // recipient
        8 +  // phase_id
        32 + // schedule_id
        4 +  // sequence_index
        8 +  // total_amount
        2 +  // cliff_percent_tenths
        8 +  // released
        1 +  // initialized
        1;   // bump

    /// Released amount after paying `amount`, without writing it.
    pub fn preview_release(&self, amount: u64) -> VestingResult<u64> {
        let released = self
            .released
            .checked_add(amount)
            .ok_or(VestingError::ArithmeticOverflow)?;
        if released > self.total_amount {
            return Err(VestingError::InsufficientReleasable);
        }
        Ok(released)
    }

    pub fn record_release(&mut self, amount: u64) -> VestingResult<()> {
        self.released = self.preview_release(amount)?;
        Ok(())
    }

    pub fn status(&self) -> ScheduleStatus {
        if self.released == 0 {
            ScheduleStatus::Unfunded
        } else if self.released >= self.total_amount {
            ScheduleStatus::FullyReleased
        } else {
            ScheduleStatus::PartiallyReleased
        }
    }

    pub fn view(&self) -> ScheduleView {
        ScheduleView {
            schedule_id: self.schedule_id,
            phase_id: self.phase_id,
            sequence_index: self.sequence_index,
            total_amount: self.total_amount,
            cliff_percent_tenths: self.cliff_percent_tenths,
            released: self.released,
            status: self.status(),
        }
    }
}

/// Compact read model returned by `list_schedules`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScheduleView {
    pub schedule_id: [u8; 32],
    pub phase_id: u64,
    pub sequence_index: u32,
    pub total_amount: u64,
    pub cliff_percent_tenths: u16,
    pub released: u64,
    pub status: ScheduleStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(b: u8) -> Pubkey {
        Pubkey::new_from_array([b; 32])
    }

    #[test]
    fn schedule_id_is_stable_and_input_sensitive() {
        let a = derive_schedule_id(&key(1), &key(2), 3, 0);
        assert_eq!(a, derive_schedule_id(&key(1), &key(2), 3, 0));
        assert_ne!(a, derive_schedule_id(&key(9), &key(2), 3, 0));
        assert_ne!(a, derive_schedule_id(&key(1), &key(9), 3, 0));
        assert_ne!(a, derive_schedule_id(&key(1), &key(2), 4, 0));
        assert_ne!(a, derive_schedule_id(&key(1), &key(2), 3, 1));
    }

    #[test]
    fn preimage_has_no_padding() {
        assert_eq!(core::mem::size_of::<ScheduleIdPreimage>(), 16 + 32 + 32 + 8 + 4);
    }

    #[test]
    fn record_release_walks_status_forward() {
        let mut s = Schedule {
            total_amount: 100,
            initialized: true,
            ..Schedule::default()
        };
        assert_eq!(s.status(), ScheduleStatus::Unfunded);
        s.record_release(40).unwrap();
        assert_eq!(s.status(), ScheduleStatus::PartiallyReleased);
        s.record_release(60).unwrap();
        assert_eq!(s.status(), ScheduleStatus::FullyReleased);
        assert!(s.record_release(1).is_err());
        assert_eq!(s.released, 100);
    }
}
