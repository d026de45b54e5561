use anchor_lang::prelude::*;

pub mod constants;
pub mod error;
pub mod executor;
pub mod instructions;
pub mod state;
pub mod utils;

pub use instructions::*;
pub use state::{LedgerTotals, Phase, Schedule, ScheduleView};

declare_id!("EevBSp7wTPKeHzMEMtcPH95JPJ4KuXNQNfSvn5PaxRoq");

#[program]
pub mod phase_vesting {
    use super::*;

    pub fn initialize_pool(ctx: Context<InitializePool>) -> Result<()> {
        instructions::initialize_pool::initialize_pool(ctx)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn create_phase(
        ctx: Context<CreatePhase>,
        phase_id: u64,
        start: i64,
        vest_duration: i64,
        cliff_duration: i64,
        cliff_percent_tenths: u16,
        slice_seconds: i64,
        name: String,
    ) -> Result<()> {
        instructions::create_phase::create_phase(
            ctx,
            state::PhaseParams {
                phase_id,
                start,
                vest_duration,
                cliff_duration,
                cliff_percent_tenths,
                slice_seconds,
                name,
            },
        )
    }

    pub fn phase_exists(ctx: Context<PhaseLookup>, _phase_id: u64) -> Result<bool> {
        instructions::phase_queries::phase_exists(ctx)
    }

    pub fn get_phase(ctx: Context<PhaseLookup>, phase_id: u64) -> Result<Phase> {
        instructions::phase_queries::get_phase(ctx, phase_id)
    }

    pub fn add_schedule(
        ctx: Context<AddSchedule>,
        recipient: Pubkey,
        total_amount: u64,
        cliff_percent_tenths: u16,
        _phase_id: u64,
    ) -> Result<[u8; 32]> {
        instructions::add_schedule::add_schedule(ctx, recipient, total_amount, cliff_percent_tenths)
    }

    pub fn schedule_exists(
        ctx: Context<ScheduleSlotLookup>,
        _recipient: Pubkey,
        _phase_id: u64,
    ) -> Result<bool> {
        instructions::schedule_queries::schedule_exists(ctx)
    }

    pub fn get_schedule(ctx: Context<ScheduleLookup>, schedule_id: [u8; 32]) -> Result<Schedule> {
        instructions::schedule_queries::get_schedule(ctx, schedule_id)
    }

    pub fn list_schedules(
        ctx: Context<ListSchedules>,
        _recipient: Pubkey,
        start: u32,
    ) -> Result<Vec<ScheduleView>> {
        instructions::schedule_queries::list_schedules(ctx, start)
    }

    pub fn fund_pool(ctx: Context<FundPool>, amount: u64) -> Result<()> {
        instructions::fund_pool::fund_pool(ctx, amount)
    }

    pub fn quote_releasable(
        ctx: Context<QuoteReleasable>,
        schedule_id: [u8; 32],
        at_ts: Option<i64>,
    ) -> Result<u64> {
        instructions::quote_releasable::quote_releasable(ctx, schedule_id, at_ts)
    }

    pub fn release(ctx: Context<ReleaseVested>, schedule_id: [u8; 32], amount: u64) -> Result<()> {
        instructions::release::release(ctx, schedule_id, amount)
    }

    pub fn withdraw_surplus(ctx: Context<WithdrawSurplus>, amount: u64) -> Result<()> {
        instructions::withdraw_surplus::withdraw_surplus(ctx, amount)
    }

    pub fn get_totals(ctx: Context<GetTotals>) -> Result<LedgerTotals> {
        instructions::get_totals::get_totals(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn program_id_matches_deploy_keypair() {
        assert_eq!(ID.to_string(), "EevBSp7wTPKeHzMEMtcPH95JPJ4KuXNQNfSvn5PaxRoq");
        assert_eq!(id(), ID);
    }
}
