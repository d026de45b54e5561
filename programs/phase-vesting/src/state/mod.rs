pub mod phase;
pub mod recipient_schedules;
pub mod schedule;
pub mod vesting_pool;

pub use phase::*;
pub use recipient_schedules::*;
pub use schedule::*;
pub use vesting_pool::*;
