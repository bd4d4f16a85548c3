use anchor_lang::prelude::*;

#[event]
pub struct RaffleEntered {
    pub round: u64,
    pub player: Pubkey,
    pub amount: u64,
    pub pool_after: u64,
    pub players_after: u64,
}

/// Picked up by the off-chain oracle; carries everything it needs to serve the request.
#[event]
pub struct DrawRequested {
    pub round: u64,
    pub request_id: u64,
    pub key_hash: [u8; 32],
    pub subscription_id: u64,
    pub request_confirmations: u16,
    pub callback_compute_limit: u32,
}

#[event]
pub struct WinnerPicked {
    pub round: u64,
    pub winner: Pubkey,
    pub amount: u64,
}

#[event]
pub struct PayoutFailed {
    pub round: u64,
    pub request_id: u64,
    pub winner: Pubkey,
    pub amount: u64,
}

#[event]
pub struct DrawCancelled {
    pub round: u64,
    pub request_id: u64,
}
