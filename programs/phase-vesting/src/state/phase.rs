use anchor_lang::prelude::*;

use crate::constants::{MAX_PHASE_NAME_LEN, PERCENT_TENTHS_DENOMINATOR};
use crate::error::{VestingError, VestingResult};

/// Caller-supplied phase definition, validated before it is stored.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct PhaseParams {
    pub phase_id: u64,
    pub start: i64,
    pub vest_duration: i64,
    pub cliff_duration: i64,
    pub cliff_percent_tenths: u16,
    pub slice_seconds: i64,
    pub name: String,
}

impl PhaseParams {
    pub fn validate(&self) -> VestingResult<()> {
        if self.slice_seconds <= 0 || self.vest_duration < 0 || self.cliff_duration < 0 {
            return Err(VestingError::InvalidPhase);
        }
        if self.vest_duration % self.slice_seconds != 0 {
            return Err(VestingError::InvalidPhase);
        }
        if self.cliff_percent_tenths > PERCENT_TENTHS_DENOMINATOR {
            return Err(VestingError::InvalidPhase);
        }
        if self.name.len() > MAX_PHASE_NAME_LEN {
            return Err(VestingError::InvalidPhase);
        }
        // Cliff end and vesting end must be representable.
        self.start
            .checked_add(self.cliff_duration)
            .and_then(|cliff_end| cliff_end.checked_add(self.vest_duration))
            .ok_or(VestingError::InvalidPhase)?;
        Ok(())
    }
}

/// Outcome of `Phase::create`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PhaseCreation {
    Created,
    /// The id was already taken; nothing was written.
    AlreadyExists,
}

/// A named vesting program. Immutable once `initialized` is set.
#[account]
#[derive(Debug, Default)]
pub struct Phase {
    /// Owning pool.
    pub pool: Pubkey,
    pub phase_id: u64,
    /// Unix seconds at which the phase starts accruing.
    pub start: i64,
    /// Seconds after `start` before anything unlocks.
    pub cliff_duration: i64,
    /// Default share unlocked at the cliff, in tenths of a percent.
    pub cliff_percent_tenths: u16,
    /// Seconds over which the post-cliff remainder unlocks.
    pub vest_duration: i64,
    /// Unlock granularity; `vest_duration` is a multiple of it.
    pub slice_seconds: i64,
    /// Display label only.
    pub name: String,
    pub initialized: bool,
    pub bump: u8,
}

impl Phase {
    pub const SIZE: usize =
        32 + // pool
        8 +  // phase_id
        8 +  // start
        8 +  // cliff_duration
        2 +  // cliff_percent_tenths
        8 +  // vest_duration
        8 +  // slice_seconds
        4 + MAX_PHASE_NAME_LEN + // name
        1 +  // initialized
        1;   // bump

    /// Store `params` unless this slot already holds a phase.
    ///
    /// Parameters are validated first, so a malformed request is reported
    /// even when the id is taken.
    pub fn create(
        &mut self,
        pool: Pubkey,
        params: PhaseParams,
        bump: u8,
    ) -> VestingResult<PhaseCreation> {
        params.validate()?;
        if self.initialized {
            return Ok(PhaseCreation::AlreadyExists);
        }
        *self = Phase {
            pool,
            phase_id: params.phase_id,
            start: params.start,
            cliff_duration: params.cliff_duration,
            cliff_percent_tenths: params.cliff_percent_tenths,
            vest_duration: params.vest_duration,
            slice_seconds: params.slice_seconds,
            name: params.name,
            initialized: true,
            bump,
        };
        Ok(PhaseCreation::Created)
    }

    /// Absolute time at which the cliff share unlocks.
    pub fn cliff_end(&self) -> VestingResult<i64> {
        self.start
            .checked_add(self.cliff_duration)
            .ok_or(VestingError::ArithmeticOverflow)
    }

    /// Absolute time at which every schedule in the phase is fully vested.
    pub fn vesting_end(&self) -> VestingResult<i64> {
        self.cliff_end()?
            .checked_add(self.vest_duration)
            .ok_or(VestingError::ArithmeticOverflow)
    }

    /// Number of post-cliff slices (0 when `vest_duration == 0`).
    pub fn num_slices(&self) -> VestingResult<u64> {
        if self.slice_seconds <= 0 || self.vest_duration < 0 {
            return Err(VestingError::InvalidPhase);
        }
        Ok((self.vest_duration / self.slice_seconds) as u64)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn params(phase_id: u64) -> PhaseParams {
        PhaseParams {
            phase_id,
            start: 0,
            vest_duration: 4_800,
            cliff_duration: 600,
            cliff_percent_tenths: 200,
            slice_seconds: 600,
            name: "IDO".to_string(),
        }
    }

    pub(crate) fn phase_from(params: PhaseParams) -> Phase {
        let mut phase = Phase::default();
        phase.create(Pubkey::default(), params, 255).unwrap();
        phase
    }

    #[test]
    fn create_stores_every_field() {
        let phase = phase_from(params(7));
        assert!(phase.initialized);
        assert_eq!(phase.phase_id, 7);
        assert_eq!(phase.cliff_end().unwrap(), 600);
        assert_eq!(phase.vesting_end().unwrap(), 5_400);
        assert_eq!(phase.num_slices().unwrap(), 8);
        assert_eq!(phase.name, "IDO");
    }

    #[test]
    fn second_create_is_a_skip_not_an_overwrite() {
        let mut phase = phase_from(params(1));
        let mut other = params(1);
        other.start = 99;
        other.name = "SEED".to_string();
        assert_eq!(
            phase.create(Pubkey::default(), other, 1).unwrap(),
            PhaseCreation::AlreadyExists
        );
        assert_eq!(phase.start, 0);
        assert_eq!(phase.name, "IDO");
        assert_eq!(phase.bump, 255);
    }

    #[test]
    fn rejects_zero_slice() {
        let mut p = params(1);
        p.slice_seconds = 0;
        assert!(matches!(p.validate(), Err(VestingError::InvalidPhase)));
    }

    #[test]
    fn rejects_duration_not_multiple_of_slice() {
        let mut p = params(1);
        p.vest_duration = 4_801;
        assert!(matches!(p.validate(), Err(VestingError::InvalidPhase)));
    }

    #[test]
    fn rejects_cliff_percent_over_full() {
        let mut p = params(1);
        p.cliff_percent_tenths = 1_001;
        assert!(matches!(p.validate(), Err(VestingError::InvalidPhase)));
        p.cliff_percent_tenths = 1_000;
        assert!(p.validate().is_ok());
    }

    #[test]
    fn rejects_long_name_and_overflowing_times() {
        let mut p = params(1);
        p.name = "x".repeat(MAX_PHASE_NAME_LEN + 1);
        assert!(p.validate().is_err());

        let mut p = params(1);
        p.start = i64::MAX - 10;
        assert!(matches!(p.validate(), Err(VestingError::InvalidPhase)));
    }

    #[test]
    fn invalid_params_are_reported_even_for_taken_id() {
        let mut phase = phase_from(params(3));
        let mut bad = params(3);
        bad.slice_seconds = -5;
        assert!(phase.create(Pubkey::default(), bad, 1).is_err());
    }

    #[test]
    fn zero_duration_has_no_slices() {
        let mut p = params(2);
        p.vest_duration = 0;
        assert_eq!(phase_from(p).num_slices().unwrap(), 0);
    }
}
