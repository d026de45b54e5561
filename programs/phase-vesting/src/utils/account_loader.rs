//! Loading program accounts that may legitimately be absent.
//!
//! Anchor's `Account<T>` rejects a missing account with a generic
//! "not initialized" error. Lookups that must answer "does it exist?" or
//! fail with a domain error take an `UncheckedAccount` and come through here.

use anchor_lang::prelude::*;
use anchor_lang::Owner;

use crate::error::VestingError;
use crate::state::{Phase, Schedule};

/// `Some(T)` when `info` is a live account of type `T` owned by this program.
pub fn try_load<T: AccountDeserialize + Owner>(info: &AccountInfo) -> Result<Option<T>> {
    if info.owner != &T::owner() || info.data_is_empty() {
        return Ok(None);
    }
    let data = info.try_borrow_data()?;
    let mut bytes: &[u8] = &data;
    Ok(Some(T::try_deserialize(&mut bytes)?))
}

pub fn load_phase(info: &AccountInfo) -> Result<Phase> {
    match try_load::<Phase>(info)? {
        Some(phase) if phase.initialized => Ok(phase),
        _ => err!(VestingError::PhaseNotFound),
    }
}

pub fn phase_exists(info: &AccountInfo) -> Result<bool> {
    Ok(try_load::<Phase>(info)?.map_or(false, |p| p.initialized))
}

/// Load a schedule and check it carries `schedule_id`.
pub fn load_schedule(info: &AccountInfo, schedule_id: &[u8; 32]) -> Result<Schedule> {
    match try_load::<Schedule>(info)? {
        Some(s) if s.initialized && &s.schedule_id == schedule_id => Ok(s),
        _ => err!(VestingError::ScheduleNotFound),
    }
}

pub fn schedule_exists(info: &AccountInfo) -> Result<bool> {
    Ok(try_load::<Schedule>(info)?.map_or(false, |s| s.initialized))
}

/// Write `schedule` back into an account previously read with `load_schedule`.
pub fn store_schedule(info: &AccountInfo, schedule: &Schedule) -> Result<()> {
    require_keys_eq!(*info.owner, crate::ID, VestingError::ScheduleNotFound);
    let mut data = info.try_borrow_mut_data()?;
    let mut writer: &mut [u8] = &mut data;
    schedule.try_serialize(&mut writer)
}
