use anchor_lang::prelude::*;

use crate::constants::RAFFLE_SEED;
use crate::events::{PayoutFailed, WinnerPicked};
use crate::payout::LamportPayout;
use crate::state::{DrawOutcome, Raffle};

/// Accounts for the oracle's randomness callback.
#[derive(Accounts)]
pub struct FulfillRandomness<'info> {
    /// Must be the oracle registered at initialization.
    pub oracle: Signer<'info>,

    #[account(
        mut,
        seeds = [RAFFLE_SEED],
        bump = raffle.bump,
    )]
    pub raffle: Account<'info, Raffle>,

    /// The player at `random_value % players`.
    /// CHECK: Compared against the selected player before any lamports move.
    #[account(mut)]
    pub winner: UncheckedAccount<'info>,
}

/// Consumes `request_id`, picks the winner and pays out the pool.
///
/// A rejected transfer still commits: the request stays consumed and the
/// round waits in `Calculating` for `retry_payout`.
pub fn process_fulfill_randomness(
    ctx: Context<FulfillRandomness>,
    request_id: u64,
    random_value: [u8; 32],
) -> Result<()> {
    let clock = Clock::get()?;
    let rent = Rent::get()?;
    let oracle = ctx.accounts.oracle.key();

    let vault = ctx.accounts.raffle.to_account_info();
    let winner = ctx.accounts.winner.to_account_info();
    let mut payout = LamportPayout::new(&vault, &winner, rent);

    let outcome = ctx.accounts.raffle.deliver(
        oracle,
        request_id,
        &random_value,
        &mut payout,
        clock.unix_timestamp,
    )?;
    announce(outcome);

    Ok(())
}

pub(crate) fn announce(outcome: DrawOutcome) {
    match outcome {
        DrawOutcome::Paid {
            round,
            winner,
            amount,
        } => {
            msg!("Round {} won by {}: {} lamports", round, winner, amount);
            emit!(WinnerPicked {
                round,
                winner,
                amount,
            });
        }
        DrawOutcome::PayoutFailed {
            round,
            request_id,
            winner,
            amount,
        } => {
            msg!(
                "Payout of {} lamports to {} failed; round {} awaits retry",
                amount,
                winner,
                round
            );
            emit!(PayoutFailed {
                round,
                request_id,
                winner,
                amount,
            });
        }
    }
}
