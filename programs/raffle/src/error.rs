use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    #[msg("Entry fee is below the entrance fee")]
    InsufficientFee,
    #[msg("Raffle is not open")]
    RoundNotOpen,
    #[msg("Upkeep not needed")]
    UpkeepNotNeeded,
    #[msg("Unknown randomness request")]
    UnknownRequest,
    #[msg("Player index out of range")]
    IndexOutOfRange,
    #[msg("Transfer to winner failed")]
    TransferFailed,
    #[msg("Raffle is full")]
    RaffleFull,
    #[msg("Caller is not the registered oracle")]
    UnauthorizedOracle,
    #[msg("Not authorized")]
    NotAuthorized,
    #[msg("Winner account does not match the selected player")]
    WinnerAccountMismatch,
    #[msg("A payout is pending for this round")]
    PayoutPending,
    #[msg("No payout is pending")]
    NoPayoutPending,
    #[msg("No outstanding randomness request")]
    NoOutstandingRequest,
    #[msg("Invalid raffle configuration")]
    InvalidConfig,
    #[msg("Arithmetic overflow")]
    Overflow,
}
