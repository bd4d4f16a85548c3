use anchor_lang::prelude::*;

/// Seed of the singleton raffle account, which also custodies the pool.
#[constant]
pub const RAFFLE_SEED: &[u8] = b"raffle";

/// Upper bound on entries per round; account space is allocated for it up front.
/// `EntryLedger` spells this out as `#[max_len(256)]` so its space is a plain
/// literal; `space_covers_max_players` keeps the two equal.
#[constant]
pub const MAX_PLAYERS: u32 = 256;

pub const MIN_REQUEST_CONFIRMATIONS: u16 = 1;
pub const MAX_REQUEST_CONFIRMATIONS: u16 = 255;

pub const MIN_CALLBACK_COMPUTE_LIMIT: u32 = 10_000;
pub const MAX_CALLBACK_COMPUTE_LIMIT: u32 = 1_400_000;

/// Request ids start here so that `0` never names a live request.
pub const FIRST_REQUEST_ID: u64 = 1;
