use anchor_lang::prelude::*;

use crate::constants::{MAX_LIST_PAGE, MAX_SCHEDULES_PER_RECIPIENT};
use crate::error::{VestingError, VestingResult};

/// Pointer to one of a recipient's schedules.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScheduleRef {
    pub schedule_id: [u8; 32],
    pub phase_id: u64,
}

impl ScheduleRef {
    pub const SIZE: usize = 32 + 8;
}

/// Append-only, creation-ordered list of one recipient's schedules in a pool.
#[account]
#[derive(Debug, Default)]
pub struct RecipientSchedules {
    pub pool: Pubkey,
    pub recipient: Pubkey,
    pub schedules: Vec<ScheduleRef>,
    pub initialized: bool,
    pub bump: u8,
}

impl RecipientSchedules {
    pub const SIZE: usize =
        32 + // pool
        32 + // recipient
        4 + MAX_SCHEDULES_PER_RECIPIENT * ScheduleRef::SIZE + // schedules
        1 +  // initialized
        1;   // bump

    /// Bind a freshly allocated index to its owner. No-op once bound.
    pub fn bind(&mut self, pool: Pubkey, recipient: Pubkey, bump: u8) {
        if !self.initialized {
            self.pool = pool;
            self.recipient = recipient;
            self.bump = bump;
            self.initialized = true;
        }
    }

    /// Index the next schedule will take.
    pub fn next_sequence_index(&self) -> VestingResult<u32> {
        if self.schedules.len() >= MAX_SCHEDULES_PER_RECIPIENT {
            return Err(VestingError::RecipientScheduleListFull);
        }
        u32::try_from(self.schedules.len()).map_err(|_| VestingError::ArithmeticOverflow)
    }

    pub fn push(&mut self, entry: ScheduleRef) -> VestingResult<()> {
        self.next_sequence_index()?;
        self.schedules.push(entry);
        Ok(())
    }

    pub fn position(&self, schedule_id: &[u8; 32]) -> Option<usize> {
        self.schedules
            .iter()
            .position(|s| &s.schedule_id == schedule_id)
    }

    /// Up to `MAX_LIST_PAGE` entries starting at `start`; empty past the end.
    pub fn page(&self, start: u32) -> &[ScheduleRef] {
        let start = (start as usize).min(self.schedules.len());
        let end = start.saturating_add(MAX_LIST_PAGE).min(self.schedules.len());
        &self.schedules[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(i: u8) -> ScheduleRef {
        ScheduleRef {
            schedule_id: [i; 32],
            phase_id: i as u64,
        }
    }

    #[test]
    fn keeps_creation_order_and_caps_length() {
        let mut list = RecipientSchedules::default();
        for i in 0..MAX_SCHEDULES_PER_RECIPIENT as u8 {
            assert_eq!(list.next_sequence_index().unwrap(), i as u32);
            list.push(entry(i)).unwrap();
        }
        assert!(matches!(
            list.push(entry(99)),
            Err(VestingError::RecipientScheduleListFull)
        ));
        assert_eq!(list.position(&[3; 32]), Some(3));
        assert_eq!(list.position(&[99; 32]), None);
    }

    #[test]
    fn pages_are_restartable() {
        let mut list = RecipientSchedules::default();
        for i in 0..10 {
            list.push(entry(i)).unwrap();
        }
        let first = list.page(0);
        assert_eq!(first.len(), MAX_LIST_PAGE);
        assert_eq!(first[0], entry(0));
        let rest = list.page(MAX_LIST_PAGE as u32);
        assert_eq!(rest.len(), 10 - MAX_LIST_PAGE);
        assert_eq!(rest[0], entry(MAX_LIST_PAGE as u8));
        assert!(list.page(10).is_empty());
        assert!(list.page(u32::MAX).is_empty());
    }

    #[test]
    fn bind_only_once() {
        let mut list = RecipientSchedules::default();
        let a = Pubkey::new_from_array([1; 32]);
        let b = Pubkey::new_from_array([2; 32]);
        list.bind(a, b, 7);
        list.bind(b, a, 9);
        assert!(list.initialized);
        assert_eq!(list.recipient, b);
        assert_eq!(list.bump, 7);
    }

    #[test]
    fn bind_marks_default_keys_as_bound() {
        let mut list = RecipientSchedules::default();
        list.bind(Pubkey::default(), Pubkey::default(), 3);
        assert!(list.initialized);
        list.bind(Pubkey::new_from_array([5; 32]), Pubkey::new_from_array([6; 32]), 4);
        assert_eq!(list.recipient, Pubkey::default());
        assert_eq!(list.bump, 3);
    }
}
