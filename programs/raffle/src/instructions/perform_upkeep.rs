use anchor_lang::prelude::*;

use crate::constants::RAFFLE_SEED;
use crate::events::DrawRequested;
use crate::state::Raffle;

/// Accounts required to start a draw. Any signer may crank it.
#[derive(Accounts)]
pub struct PerformUpkeep<'info> {
    pub caller: Signer<'info>,

    #[account(
        mut,
        seeds = [RAFFLE_SEED],
        bump = raffle.bump,
    )]
    pub raffle: Account<'info, Raffle>,
}

/// Closes entries and asks the oracle for randomness.
///
/// Readiness is checked again here; a `check_upkeep` result from an earlier
/// slot proves nothing.
pub fn process_perform_upkeep(ctx: Context<PerformUpkeep>) -> Result<()> {
    let clock = Clock::get()?;
    let raffle = &mut ctx.accounts.raffle;

    let conditions = raffle.upkeep_conditions(clock.unix_timestamp);
    if !conditions.is_met() {
        msg!("Upkeep not needed: {:?}", conditions);
    }
    let request = raffle.begin_draw(clock.unix_timestamp)?;

    msg!(
        "Requested randomness {} for round {}",
        request.request_id,
        request.round
    );

    let gateway = &raffle.gateway;
    emit!(DrawRequested {
        round: request.round,
        request_id: request.request_id,
        key_hash: gateway.key_hash,
        subscription_id: gateway.subscription_id,
        request_confirmations: gateway.request_confirmations,
        callback_compute_limit: gateway.callback_compute_limit,
    });

    Ok(())
}
