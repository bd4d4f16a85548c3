use anchor_lang::prelude::*;

use crate::constants::RAFFLE_SEED;
use crate::state::Raffle;

/// Read-only access to the raffle, for simulation by keepers and monitors.
#[derive(Accounts)]
pub struct ViewRaffle<'info> {
    #[account(
        seeds = [RAFFLE_SEED],
        bump = raffle.bump,
    )]
    pub raffle: Account<'info, Raffle>,
}

/// Whether `perform_upkeep` would succeed right now.
pub fn process_check_upkeep(ctx: Context<ViewRaffle>) -> Result<bool> {
    let clock = Clock::get()?;
    let conditions = ctx.accounts.raffle.upkeep_conditions(clock.unix_timestamp);

    msg!("Upkeep conditions: {:?}", conditions);

    Ok(conditions.is_met())
}

pub fn process_get_player(ctx: Context<ViewRaffle>, index: u64) -> Result<Pubkey> {
    ctx.accounts.raffle.ledger.participant_at(index)
}
