use anchor_lang::prelude::*;
use solana_program::{account_info::AccountInfo, rent::Rent};

use crate::error::ErrorCode;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PayoutStatus {
    Completed,
    /// The transfer could not happen; no lamports moved.
    Rejected,
}

/// Moves a settled pool to its winner.
///
/// `Err` is reserved for malformed input, which aborts the whole instruction.
/// A transfer the runtime would refuse is reported as `Rejected` so the caller
/// can record it and keep the round recoverable.
pub trait PayoutExecutor {
    fn pay(&mut self, recipient: &Pubkey, amount: u64) -> Result<PayoutStatus>;
}

/// Pays out of the raffle account's own lamports, keeping its rent reserve.
pub struct LamportPayout<'a, 'info> {
    vault: &'a AccountInfo<'info>,
    recipient: &'a AccountInfo<'info>,
    rent: Rent,
}

impl<'a, 'info> LamportPayout<'a, 'info> {
    pub fn new(
        vault: &'a AccountInfo<'info>,
        recipient: &'a AccountInfo<'info>,
        rent: Rent,
    ) -> Self {
        Self {
            vault,
            recipient,
            rent,
        }
    }
}

impl PayoutExecutor for LamportPayout<'_, '_> {
    fn pay(&mut self, recipient: &Pubkey, amount: u64) -> Result<PayoutStatus> {
        require_keys_eq!(
            *self.recipient.key,
            *recipient,
            ErrorCode::WinnerAccountMismatch
        );

        if self.recipient.executable {
            msg!("Winner account {} is executable", recipient);
            return Ok(PayoutStatus::Rejected);
        }

        let reserve = self.rent.minimum_balance(self.vault.data_len());
        let available = self.vault.lamports().saturating_sub(reserve);
        if available < amount {
            msg!(
                "Vault has {} spare lamports, payout needs {}",
                available,
                amount
            );
            return Ok(PayoutStatus::Rejected);
        }

        let Some(credited) = self.recipient.lamports().checked_add(amount) else {
            msg!("Winner balance would overflow");
            return Ok(PayoutStatus::Rejected);
        };

        // The runtime refuses to leave an account funded but below rent exemption.
        let recipient_floor = self.rent.minimum_balance(self.recipient.data_len());
        if credited > 0 && credited < recipient_floor {
            msg!(
                "Winner would hold {} lamports, below the {} rent-exempt minimum",
                credited,
                recipient_floor
            );
            return Ok(PayoutStatus::Rejected);
        }

        **self.vault.try_borrow_mut_lamports()? -= amount;
        **self.recipient.try_borrow_mut_lamports()? = credited;

        Ok(PayoutStatus::Completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATA_LEN: usize = 64;

    struct Fixture {
        vault_key: Pubkey,
        winner_key: Pubkey,
        owner: Pubkey,
        vault_lamports: u64,
        winner_lamports: u64,
        vault_data: Vec<u8>,
        winner_data: Vec<u8>,
        winner_executable: bool,
    }

    impl Fixture {
        fn new(spare: u64, winner_lamports: u64) -> Self {
            Self {
                vault_key: Pubkey::new_unique(),
                winner_key: Pubkey::new_unique(),
                owner: crate::ID,
                vault_lamports: Rent::default().minimum_balance(DATA_LEN) + spare,
                winner_lamports,
                vault_data: vec![0; DATA_LEN],
                winner_data: vec![],
                winner_executable: false,
            }
        }

        /// Runs one payout and returns it with the resulting balances.
        fn pay_to(
            &mut self,
            recipient: Pubkey,
            amount: u64,
        ) -> (Result<PayoutStatus>, u64, u64) {
            let vault = AccountInfo::new(
                &self.vault_key,
                false,
                true,
                &mut self.vault_lamports,
                &mut self.vault_data,
                &self.owner,
                false,
                0,
            );
            let winner = AccountInfo::new(
                &self.winner_key,
                false,
                true,
                &mut self.winner_lamports,
                &mut self.winner_data,
                &self.owner,
                self.winner_executable,
                0,
            );
            let status =
                LamportPayout::new(&vault, &winner, Rent::default()).pay(&recipient, amount);
            (status, vault.lamports(), winner.lamports())
        }
    }

    #[test]
    fn moves_pool_and_keeps_reserve() {
        let funded = Rent::default().minimum_balance(0);
        let mut accounts = Fixture::new(400, funded);
        let reserve = Rent::default().minimum_balance(DATA_LEN);
        let winner = accounts.winner_key;

        let (status, vault, paid) = accounts.pay_to(winner, 400);

        assert_eq!(status.unwrap(), PayoutStatus::Completed);
        assert_eq!(vault, reserve);
        assert_eq!(paid, funded + 400);
    }

    #[test]
    fn pays_an_empty_account_once_it_reaches_rent_exemption() {
        let pool = Rent::default().minimum_balance(0);
        let mut accounts = Fixture::new(pool, 0);
        let winner = accounts.winner_key;

        let (status, _, paid) = accounts.pay_to(winner, pool);

        assert_eq!(status.unwrap(), PayoutStatus::Completed);
        assert_eq!(paid, pool);
    }

    #[test]
    fn drained_winner_below_rent_exemption_is_rejected() {
        let mut accounts = Fixture::new(100, 0);
        let before = accounts.vault_lamports;
        let winner = accounts.winner_key;

        let (status, vault, paid) = accounts.pay_to(winner, 100);

        assert_eq!(status.unwrap(), PayoutStatus::Rejected);
        assert_eq!(vault, before);
        assert_eq!(paid, 0);
    }

    #[test]
    fn refuses_to_dip_into_reserve() {
        let mut accounts = Fixture::new(399, 0);
        let before = accounts.vault_lamports;
        let winner = accounts.winner_key;

        let (status, vault, paid) = accounts.pay_to(winner, 400);

        assert_eq!(status.unwrap(), PayoutStatus::Rejected);
        assert_eq!(vault, before);
        assert_eq!(paid, 0);
    }

    #[test]
    fn executable_recipient_is_rejected() {
        let mut accounts = Fixture::new(400, 0);
        accounts.winner_executable = true;
        let before = accounts.vault_lamports;
        let winner = accounts.winner_key;

        let (status, vault, paid) = accounts.pay_to(winner, 400);

        assert_eq!(status.unwrap(), PayoutStatus::Rejected);
        assert_eq!(vault, before);
        assert_eq!(paid, 0);
    }

    #[test]
    fn overflowing_recipient_is_rejected() {
        let mut accounts = Fixture::new(400, u64::MAX);
        let before = accounts.vault_lamports;
        let winner = accounts.winner_key;

        let (status, vault, paid) = accounts.pay_to(winner, 400);

        assert_eq!(status.unwrap(), PayoutStatus::Rejected);
        assert_eq!(vault, before);
        assert_eq!(paid, u64::MAX);
    }

    #[test]
    fn wrong_account_is_an_error() {
        let mut accounts = Fixture::new(400, 0);
        let before = accounts.vault_lamports;

        let (status, vault, paid) = accounts.pay_to(Pubkey::new_unique(), 400);

        assert_eq!(status.unwrap_err(), ErrorCode::WinnerAccountMismatch.into());
        assert_eq!(vault, before);
        assert_eq!(paid, 0);
    }
}
