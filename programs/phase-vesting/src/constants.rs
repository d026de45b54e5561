//! Program-wide constants.

/// Denominator for `cliff_percent_tenths` (1000 == 100%).
pub const PERCENT_TENTHS_DENOMINATOR: u16 = 1_000;

/// Max UTF-8 byte length of a phase display name.
pub const MAX_PHASE_NAME_LEN: usize = 32;

/// Max schedules one recipient may hold inside a single pool.
pub const MAX_SCHEDULES_PER_RECIPIENT: usize = 16;

/// Max schedules returned by one `list_schedules` call (return data is capped at 1 KiB).
pub const MAX_LIST_PAGE: usize = 8;

/// Domain tag mixed into every schedule id preimage.
pub const SCHEDULE_ID_DOMAIN: [u8; 16] = *b"phase-vesting/v1";

pub const VESTING_POOL_SEED: &[u8] = b"vesting_pool";
pub const VAULT_SEED: &[u8] = b"vault";
pub const PHASE_SEED: &[u8] = b"phase";
pub const SCHEDULE_SEED: &[u8] = b"schedule";
pub const RECIPIENT_SCHEDULES_SEED: &[u8] = b"recipient_schedules";
