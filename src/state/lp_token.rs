//! Per-owner pool-share ledger and allowance accounts.
//!
//! Not an SPL Token mint: permit-by-signature needs the program to move
//! funds without the owner co-signing, which SPL Token's `Approve` cannot
//! do. Balances and allowances instead live in small program-owned PDAs.

use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::pubkey::Pubkey;

use crate::constants::INFINITE_ALLOWANCE;
use crate::error::AmmError;

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct LpTokenAccount {
    pub is_initialized: bool,
    /// The pair this ledger's balance is denominated in. Ledgers for
    /// different pairs are otherwise indistinguishable program-owned
    /// accounts of the same shape, so every handler that credits or debits
    /// one must check this against the pair it is operating on before
    /// trusting the balance.
    pub pair: Pubkey,
    pub balance: u64,
    /// Incremented once per successful `permit`, preventing signature replay.
    pub permit_nonce: u64,
    pub bump: u8,
}

impl LpTokenAccount {
    pub const LEN: usize = 1 + 32 + 8 + 8 + 1;

    pub fn new(pair: Pubkey, bump: u8) -> Self {
        LpTokenAccount {
            is_initialized: true,
            pair,
            balance: 0,
            permit_nonce: 0,
            bump,
        }
    }

    pub fn credit(&mut self, amount: u64) -> Result<(), AmmError> {
        self.balance = self.balance.checked_add(amount).ok_or(AmmError::Overflow)?;
        Ok(())
    }

    pub fn debit(&mut self, amount: u64) -> Result<(), AmmError> {
        self.balance = self
            .balance
            .checked_sub(amount)
            .ok_or(AmmError::InsufficientLiquidityBurned)?;
        Ok(())
    }
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Allowance {
    pub is_initialized: bool,
    pub amount: u64,
    pub bump: u8,
}

impl Allowance {
    pub const LEN: usize = 1 + 8 + 1;

    pub fn new(bump: u8) -> Self {
        Allowance {
            is_initialized: true,
            amount: 0,
            bump,
        }
    }

    pub fn is_infinite(&self) -> bool {
        self.amount == INFINITE_ALLOWANCE
    }

    /// Decrements the allowance by `amount` unless it is the infinite
    /// sentinel, which a spend never consumes.
    pub fn spend(&mut self, amount: u64) -> Result<(), AmmError> {
        if self.is_infinite() {
            return Ok(());
        }
        self.amount = self
            .amount
            .checked_sub(amount)
            .ok_or(AmmError::InsufficientLiquidityBurned)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credit_and_debit_move_balance() {
        let mut account = LpTokenAccount::new(Pubkey::new_unique(), 0);
        account.credit(100).unwrap();
        assert_eq!(account.balance, 100);
        account.debit(40).unwrap();
        assert_eq!(account.balance, 60);
    }

    #[test]
    fn debit_more_than_balance_fails() {
        let mut account = LpTokenAccount::new(Pubkey::new_unique(), 0);
        account.credit(10).unwrap();
        assert!(account.debit(11).is_err());
    }

    #[test]
    fn infinite_allowance_is_never_decremented() {
        let mut allowance = Allowance::new(0);
        allowance.amount = INFINITE_ALLOWANCE;
        allowance.spend(1_000_000).unwrap();
        assert_eq!(allowance.amount, INFINITE_ALLOWANCE);
    }

    #[test]
    fn finite_allowance_decrements_and_rejects_overspend() {
        let mut allowance = Allowance::new(0);
        allowance.amount = 50;
        allowance.spend(20).unwrap();
        assert_eq!(allowance.amount, 30);
        assert!(allowance.spend(31).is_err());
    }
}
