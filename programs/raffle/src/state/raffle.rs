use anchor_lang::prelude::*;

use super::{DrawRequest, EntryLedger, RandomnessGateway, RoundClock};
use crate::constants::{
    FIRST_REQUEST_ID, MAX_CALLBACK_COMPUTE_LIMIT, MAX_REQUEST_CONFIRMATIONS,
    MIN_CALLBACK_COMPUTE_LIMIT, MIN_REQUEST_CONFIRMATIONS,
};
use crate::error::ErrorCode;
use crate::payout::{PayoutExecutor, PayoutStatus};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Default, Debug, PartialEq, Eq, InitSpace)]
pub enum RaffleState {
    /// Entries accepted; a draw may begin once upkeep conditions hold.
    #[default]
    Open,
    /// Entries rejected while a draw is in flight or its payout is pending.
    Calculating,
}

/// Fixed at initialization and never changed afterwards.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct RaffleConfig {
    /// Lamports required per entry.
    pub entrance_fee: u64,
    /// Seconds a round stays open before a draw may begin.
    pub interval: i64,
    /// Signer allowed to deliver randomness.
    pub oracle: Pubkey,
    pub key_hash: [u8; 32],
    pub subscription_id: u64,
    pub request_confirmations: u16,
    pub callback_compute_limit: u32,
}

impl RaffleConfig {
    pub fn validate(&self) -> Result<()> {
        require!(self.entrance_fee > 0, ErrorCode::InvalidConfig);
        require!(self.interval > 0, ErrorCode::InvalidConfig);
        require!(
            (MIN_REQUEST_CONFIRMATIONS..=MAX_REQUEST_CONFIRMATIONS)
                .contains(&self.request_confirmations),
            ErrorCode::InvalidConfig
        );
        require!(
            (MIN_CALLBACK_COMPUTE_LIMIT..=MAX_CALLBACK_COMPUTE_LIMIT)
                .contains(&self.callback_compute_limit),
            ErrorCode::InvalidConfig
        );
        Ok(())
    }
}

/// Winner recorded when the transfer was rejected; cleared only by a paid retry.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub struct PendingPayout {
    /// The consumed request whose value picked the winner.
    pub request_id: u64,
    pub winner: Pubkey,
    /// Whole pool owed to `winner`.
    pub amount: u64,
}

/// The four conditions that must all hold before a draw may begin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UpkeepConditions {
    pub interval_reached: bool,
    pub has_players: bool,
    pub has_balance: bool,
    /// Open and no outstanding draw request.
    pub idle: bool,
}

impl UpkeepConditions {
    pub fn is_met(&self) -> bool {
        self.interval_reached && self.has_players && self.has_balance && self.idle
    }
}

/// Result of a delivered random value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawOutcome {
    Paid {
        round: u64,
        winner: Pubkey,
        amount: u64,
    },
    PayoutFailed {
        round: u64,
        request_id: u64,
        winner: Pubkey,
        amount: u64,
    },
}

/// The current round: the single owner of ledger, clock, gateway and state.
///
/// Also the custody account: the pool sits in this account's lamports on top
/// of its rent-exempt reserve.
#[account]
#[derive(Default, InitSpace)]
pub struct Raffle {
    /// Bump of the raffle PDA.
    pub bump: u8,

    /// Operator allowed to retry a rejected payout or cancel an unanswered draw.
    pub authority: Pubkey,

    /// Minimum lamports accepted per entry.
    pub entrance_fee: u64,

    /// Whether entries are accepted or a draw is in progress.
    pub state: RaffleState,

    /// Number of rounds paid out so far; also identifies the current round.
    pub round: u64,

    /// Start of the current round and the interval before it may be drawn.
    pub clock: RoundClock,

    /// Entries and pool of the current round.
    pub ledger: EntryLedger,

    /// Oracle settings and the outstanding randomness request, if any.
    pub gateway: RandomnessGateway,

    /// Set while a determined winner is still unpaid.
    pub pending_payout: Option<PendingPayout>,

    /// Winner of the last paid-out round.
    /// `Pubkey::default()` until the first round completes.
    pub recent_winner: Pubkey,
}

impl Raffle {
    pub fn initialize(
        &mut self,
        bump: u8,
        authority: Pubkey,
        config: RaffleConfig,
        now: i64,
    ) -> Result<()> {
        config.validate()?;

        self.bump = bump;
        self.authority = authority;
        self.entrance_fee = config.entrance_fee;
        self.state = RaffleState::Open;
        self.round = 0;
        self.clock = RoundClock::new(config.interval, now);
        self.ledger = EntryLedger::default();
        self.gateway = RandomnessGateway {
            oracle: config.oracle,
            key_hash: config.key_hash,
            subscription_id: config.subscription_id,
            request_confirmations: config.request_confirmations,
            callback_compute_limit: config.callback_compute_limit,
            next_request_id: FIRST_REQUEST_ID,
            pending: None,
        };
        self.pending_payout = None;
        self.recent_winner = Pubkey::default();
        Ok(())
    }

    pub fn enter(&mut self, player: Pubkey, fee_paid: u64) -> Result<()> {
        require!(self.state == RaffleState::Open, ErrorCode::RoundNotOpen);
        require!(fee_paid >= self.entrance_fee, ErrorCode::InsufficientFee);

        self.ledger.record(player, fee_paid)
    }

    pub fn upkeep_conditions(&self, now: i64) -> UpkeepConditions {
        UpkeepConditions {
            interval_reached: self.clock.interval_reached(now),
            has_players: self.ledger.count() > 0,
            has_balance: self.ledger.pool_total() > 0,
            idle: self.state == RaffleState::Open && !self.gateway.has_outstanding(),
        }
    }

    pub fn check_ready(&self, now: i64) -> bool {
        self.upkeep_conditions(now).is_met()
    }

    /// Re-validates readiness, moves to `Calculating` and issues a request.
    pub fn begin_draw(&mut self, now: i64) -> Result<DrawRequest> {
        require!(self.check_ready(now), ErrorCode::UpkeepNotNeeded);

        let request = self.gateway.request(self.round)?;
        self.state = RaffleState::Calculating;
        Ok(request)
    }

    /// Oracle callback: authenticates `caller`, consumes the request and
    /// settles the round with `random_value`.
    pub fn deliver<P: PayoutExecutor>(
        &mut self,
        caller: Pubkey,
        request_id: u64,
        random_value: &[u8; 32],
        payout: &mut P,
        now: i64,
    ) -> Result<DrawOutcome> {
        let request = self.gateway.resolve(caller, request_id)?;
        let outcome = self.fulfill(request, random_value, payout, now);
        if outcome.is_err() {
            // fulfill fails before mutating anything; put the request back too.
            self.gateway.pending = Some(request);
        }
        outcome
    }

    fn fulfill<P: PayoutExecutor>(
        &mut self,
        request: DrawRequest,
        random_value: &[u8; 32],
        payout: &mut P,
        now: i64,
    ) -> Result<DrawOutcome> {
        require!(
            self.state == RaffleState::Calculating && request.round == self.round,
            ErrorCode::UnknownRequest
        );

        let index = winner_index(random_value, self.ledger.count())?;
        let winner = self.ledger.participant_at(index)?;
        let amount = self.ledger.pool_total();

        match payout.pay(&winner, amount)? {
            PayoutStatus::Completed => Ok(self.complete_round(winner, amount, now)),
            PayoutStatus::Rejected => {
                self.pending_payout = Some(PendingPayout {
                    request_id: request.request_id,
                    winner,
                    amount,
                });
                Ok(DrawOutcome::PayoutFailed {
                    round: self.round,
                    request_id: request.request_id,
                    winner,
                    amount,
                })
            }
        }
    }

    /// Operator retry of a rejected payout. Fails with `TransferFailed` and
    /// leaves everything as it was if the transfer is rejected again.
    pub fn retry_payout<P: PayoutExecutor>(
        &mut self,
        caller: Pubkey,
        payout: &mut P,
        now: i64,
    ) -> Result<DrawOutcome> {
        require_keys_eq!(caller, self.authority, ErrorCode::NotAuthorized);
        let pending = self.pending_payout.ok_or(ErrorCode::NoPayoutPending)?;

        match payout.pay(&pending.winner, pending.amount)? {
            PayoutStatus::Completed => Ok(self.complete_round(pending.winner, pending.amount, now)),
            PayoutStatus::Rejected => err!(ErrorCode::TransferFailed),
        }
    }

    /// Operator abandonment of an outstanding request the oracle never served.
    /// Entries and clock are kept so a fresh draw can be requested right away.
    pub fn cancel_draw(&mut self, caller: Pubkey) -> Result<DrawRequest> {
        require_keys_eq!(caller, self.authority, ErrorCode::NotAuthorized);
        require!(self.pending_payout.is_none(), ErrorCode::PayoutPending);

        let request = self.gateway.discard()?;
        self.state = RaffleState::Open;
        Ok(request)
    }

    // Ledger, clock and state move together so no reader ever sees a paid-out
    // pool while still calculating.
    fn complete_round(&mut self, winner: Pubkey, amount: u64, now: i64) -> DrawOutcome {
        let round = self.round;

        self.ledger.reset();
        self.clock.restart(now);
        self.pending_payout = None;
        self.recent_winner = winner;
        self.round = round.wrapping_add(1);
        self.state = RaffleState::Open;

        DrawOutcome::Paid {
            round,
            winner,
            amount,
        }
    }
}

/// `random_value mod count`, reading `random_value` as a big-endian integer.
///
/// Modulo reduction carries a bias of at most `count / 2^256`, which is
/// accepted for any realistic number of players.
pub fn winner_index(random_value: &[u8; 32], count: u64) -> Result<u64> {
    require!(count > 0, ErrorCode::IndexOutOfRange);

    let modulus = u128::from(count);
    let index = random_value
        .iter()
        .fold(0u128, |acc, byte| ((acc << 8) | u128::from(*byte)) % modulus);
    Ok(index as u64)
}
