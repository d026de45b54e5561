pub mod account_loader;
pub mod vesting_math;
