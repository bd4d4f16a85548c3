use anchor_lang::prelude::*;

use crate::constants::RAFFLE_SEED;
use crate::events::DrawCancelled;
use crate::payout::LamportPayout;
use crate::state::{Raffle, RaffleConfig};

use super::fulfill_randomness::announce;

/// Accounts required to create the raffle.
/// The payer becomes its authority.
#[derive(Accounts)]
pub struct InitializeRaffle<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    #[account(
        init,
        payer = payer,
        space = 8 + Raffle::INIT_SPACE,
        seeds = [RAFFLE_SEED],
        bump
    )]
    pub raffle: Box<Account<'info, Raffle>>,

    pub system_program: Program<'info, System>,
}

/// Accounts for re-attempting a rejected payout.
#[derive(Accounts)]
pub struct RetryPayout<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [RAFFLE_SEED],
        bump = raffle.bump,
    )]
    pub raffle: Account<'info, Raffle>,

    /// CHECK: Compared against the recorded winner before any lamports move.
    #[account(mut)]
    pub winner: UncheckedAccount<'info>,
}

/// Accounts for abandoning an unanswered randomness request.
#[derive(Accounts)]
pub struct CancelDraw<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [RAFFLE_SEED],
        bump = raffle.bump,
    )]
    pub raffle: Account<'info, Raffle>,
}

/// Creates the raffle with its fixed fee, interval and oracle settings and
/// opens the first round.
///
/// # Arguments
/// * `ctx` - Context holding the InitializeRaffle accounts
/// * `config` - Immutable raffle configuration
pub fn process_initialize(ctx: Context<InitializeRaffle>, config: RaffleConfig) -> Result<()> {
    let clock = Clock::get()?;
    let authority = ctx.accounts.payer.key();

    ctx.accounts
        .raffle
        .initialize(ctx.bumps.raffle, authority, config, clock.unix_timestamp)?;

    msg!(
        "Raffle opened: fee {} lamports, interval {}s, oracle {}",
        ctx.accounts.raffle.entrance_fee,
        ctx.accounts.raffle.clock.interval,
        ctx.accounts.raffle.gateway.oracle
    );

    Ok(())
}

/// Pays the winner recorded by a failed fulfillment and opens the next round.
pub fn process_retry_payout(ctx: Context<RetryPayout>) -> Result<()> {
    let clock = Clock::get()?;
    let rent = Rent::get()?;
    let authority = ctx.accounts.authority.key();

    let vault = ctx.accounts.raffle.to_account_info();
    let winner = ctx.accounts.winner.to_account_info();
    let mut payout = LamportPayout::new(&vault, &winner, rent);

    let outcome = ctx
        .accounts
        .raffle
        .retry_payout(authority, &mut payout, clock.unix_timestamp)?;
    announce(outcome);

    Ok(())
}

/// Drops the outstanding request so a fresh draw can be requested.
/// A late answer to the dropped request is rejected as unknown.
pub fn process_cancel_draw(ctx: Context<CancelDraw>) -> Result<()> {
    let authority = ctx.accounts.authority.key();
    let raffle = &mut ctx.accounts.raffle;

    let request = raffle.cancel_draw(authority)?;

    msg!("Cancelled randomness request {}", request.request_id);
    emit!(DrawCancelled {
        round: raffle.round,
        request_id: request.request_id,
    });

    Ok(())
}
