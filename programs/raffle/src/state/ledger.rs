use anchor_lang::prelude::*;

use crate::constants::MAX_PLAYERS;
use crate::error::ErrorCode;

/// Ordered entries of the current round and the pool they paid into.
///
/// A player who enters twice holds two slots. The pool is the exact sum of
/// accepted fees since the last reset and is only ever paid out whole.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Default, Debug, PartialEq, Eq, InitSpace)]
pub struct EntryLedger {
    /// Players in entry order; the winner is picked by index into this list.
    #[max_len(256)]
    pub players: Vec<Pubkey>,

    /// Lamports paid in since the last payout.
    pub pool: u64,
}

impl EntryLedger {
    /// Appends `player` and adds `fee` to the pool. Validation of the fee and
    /// round state belongs to the caller; this only guards capacity and overflow.
    pub(crate) fn record(&mut self, player: Pubkey, fee: u64) -> Result<()> {
        require!(
            self.players.len() < MAX_PLAYERS as usize,
            ErrorCode::RaffleFull
        );
        let pool = self.pool.checked_add(fee).ok_or(ErrorCode::Overflow)?;

        self.players.push(player);
        self.pool = pool;
        Ok(())
    }

    pub fn participant_at(&self, index: u64) -> Result<Pubkey> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.players.get(i))
            .copied()
            .ok_or_else(|| error!(ErrorCode::IndexOutOfRange))
    }

    pub fn count(&self) -> u64 {
        self.players.len() as u64
    }

    pub fn pool_total(&self) -> u64 {
        self.pool
    }

    /// Only called once the pool has been paid out.
    pub(crate) fn reset(&mut self) {
        self.players.clear();
        self.pool = 0;
    }
}
