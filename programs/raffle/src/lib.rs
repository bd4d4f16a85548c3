#![allow(unexpected_cfgs)]

use anchor_lang::prelude::*;
use instructions::*;
use state::RaffleConfig;

/// Seeds and limits shared by instructions and state.
pub mod constants;

/// Custom error codes returned when an instruction is rejected.
pub mod error;

/// Notifications emitted for keepers, the oracle and monitors.
pub mod events;

/// Instruction handlers and their account validation.
pub mod instructions;

/// Transfer of a settled pool to its winner.
pub mod payout;

/// The raffle account and the components it owns: entry ledger, round
/// clock, randomness gateway and the draw state machine.
pub mod state;

declare_id!("DnrdHTtup8Pvwf9knsxwAEhYuXL64jDCzqw1MJwC3rSh");

#[program]
pub mod raffle {
    use super::*;

    pub fn initialize(ctx: Context<InitializeRaffle>, config: RaffleConfig) -> Result<()> {
        process_initialize(ctx, config)
    }

    pub fn enter_raffle(ctx: Context<EnterRaffle>, amount: u64) -> Result<()> {
        process_enter_raffle(ctx, amount)
    }

    pub fn check_upkeep(ctx: Context<ViewRaffle>) -> Result<bool> {
        process_check_upkeep(ctx)
    }

    pub fn perform_upkeep(ctx: Context<PerformUpkeep>) -> Result<()> {
        process_perform_upkeep(ctx)
    }

    pub fn fulfill_randomness(
        ctx: Context<FulfillRandomness>,
        request_id: u64,
        random_value: [u8; 32],
    ) -> Result<()> {
        process_fulfill_randomness(ctx, request_id, random_value)
    }

    pub fn get_player(ctx: Context<ViewRaffle>, index: u64) -> Result<Pubkey> {
        process_get_player(ctx, index)
    }

    pub fn retry_payout(ctx: Context<RetryPayout>) -> Result<()> {
        process_retry_payout(ctx)
    }

    pub fn cancel_draw(ctx: Context<CancelDraw>) -> Result<()> {
        process_cancel_draw(ctx)
    }
}
