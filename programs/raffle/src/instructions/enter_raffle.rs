use anchor_lang::prelude::*;
use anchor_lang::system_program;

use crate::constants::RAFFLE_SEED;
use crate::events::RaffleEntered;
use crate::state::Raffle;

/// Accounts required to enter the raffle.
#[derive(Accounts)]
pub struct EnterRaffle<'info> {
    /// The player paying the entry fee.
    #[account(mut)]
    pub player: Signer<'info>,

    /// Raffle state; also receives the fee.
    #[account(
        mut,
        seeds = [RAFFLE_SEED],
        bump = raffle.bump,
    )]
    pub raffle: Account<'info, Raffle>,

    pub system_program: Program<'info, System>,
}

/// Records one entry for the signer and moves `amount` lamports into the pool.
///
/// `amount` may exceed the entrance fee; the whole amount joins the pool.
pub fn process_enter_raffle(ctx: Context<EnterRaffle>, amount: u64) -> Result<()> {
    let player = ctx.accounts.player.key();
    ctx.accounts.raffle.enter(player, amount)?;

    system_program::transfer(
        CpiContext::new(
            ctx.accounts.system_program.to_account_info(),
            system_program::Transfer {
                from: ctx.accounts.player.to_account_info(),
                to: ctx.accounts.raffle.to_account_info(),
            },
        ),
        amount,
    )?;

    let raffle = &ctx.accounts.raffle;
    emit!(RaffleEntered {
        round: raffle.round,
        player,
        amount,
        pool_after: raffle.ledger.pool_total(),
        players_after: raffle.ledger.count(),
    });

    Ok(())
}
