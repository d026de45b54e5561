pub mod add_schedule;
pub mod create_phase;
pub mod fund_pool;
pub mod get_totals;
pub mod initialize_pool;
pub mod phase_queries;
pub mod quote_releasable;
pub mod release;
pub mod schedule_queries;
pub mod withdraw_surplus;

pub use add_schedule::*;
pub use create_phase::*;
pub use fund_pool::*;
pub use get_totals::*;
pub use initialize_pool::*;
pub use phase_queries::*;
pub use quote_releasable::*;
pub use release::*;
pub use schedule_queries::*;
pub use withdraw_surplus::*;
