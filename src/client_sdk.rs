/*
MIT License

Copyright (c) 2024 Davinci

Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/

//! # Constant-Product AMM - Client SDK
//!
//! Hides PDA derivation and instruction construction behind a small
//! `PairClient` so integrators don't hand-roll `Instruction`s or reimplement
//! the seed layout from `constants`/`utils::pda`.
//!
//! ## Example
//!
//! ```rust,no_run
//! use constant_product_amm::client_sdk::PairClient;
//! use solana_program::pubkey::Pubkey;
//!
//! let program_id = Pubkey::new_unique();
//! let client = PairClient::new(program_id);
//! let mint_a = Pubkey::new_unique();
//! let mint_b = Pubkey::new_unique();
//! let addrs = client.derive_pair_addresses(&mint_a, &mint_b);
//! ```

use borsh::BorshSerialize;
use solana_program::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    system_program, sysvar,
};

use crate::constants::LP_TOKEN_DECIMALS;
use crate::types::instructions::AmmInstruction;
use crate::utils::pda::{
    allowance_address, factory_address, lp_account_address, pair_address, sort_mints,
    vault0_address, vault1_address,
};

/// Converts a raw pool-share balance to the human-readable amount a wallet
/// UI would show, the same `uiAmount` convention SPL Token uses for
/// `LP_TOKEN_DECIMALS`.
pub fn lp_ui_amount(raw_balance: u64) -> f64 {
    raw_balance as f64 / 10f64.powi(LP_TOKEN_DECIMALS as i32)
}

/// All program-derived addresses for one unordered mint pair, with their
/// canonical `(token0, token1)` ordering already resolved.
#[derive(Debug, Clone)]
pub struct PairAddresses {
    pub token0: Pubkey,
    pub token1: Pubkey,
    pub pair: Pubkey,
    pub pair_bump: u8,
    pub vault0: Pubkey,
    pub vault0_bump: u8,
    pub vault1: Pubkey,
    pub vault1_bump: u8,
}

/// Thin client over the AMM program: derives addresses and builds
/// `Instruction`s, leaving signing and transaction submission to the caller.
#[derive(Debug, Clone, Copy)]
pub struct PairClient {
    pub program_id: Pubkey,
}

impl PairClient {
    pub fn new(program_id: Pubkey) -> Self {
        Self { program_id }
    }

    pub fn factory_address(&self) -> (Pubkey, u8) {
        factory_address(&self.program_id)
    }

    /// Derives a pair's PDA and its two vault PDAs from an unordered mint
    /// pair, sorting the mints the same way `create_pair` does on-chain so
    /// the client never has to guess which mint ended up `token0`.
    pub fn derive_pair_addresses(&self, mint_a: &Pubkey, mint_b: &Pubkey) -> PairAddresses {
        let (token0, token1) = sort_mints(mint_a, mint_b);
        let (pair, pair_bump) = pair_address(&token0, &token1, &self.program_id);
        let (vault0, vault0_bump) = vault0_address(&pair, &self.program_id);
        let (vault1, vault1_bump) = vault1_address(&pair, &self.program_id);
        PairAddresses {
            token0,
            token1,
            pair,
            pair_bump,
            vault0,
            vault0_bump,
            vault1,
            vault1_bump,
        }
    }

    pub fn lp_account_address(&self, pair: &Pubkey, owner: &Pubkey) -> (Pubkey, u8) {
        lp_account_address(pair, owner, &self.program_id)
    }

    pub fn allowance_address(&self, pair: &Pubkey, owner: &Pubkey, spender: &Pubkey) -> (Pubkey, u8) {
        allowance_address(pair, owner, spender, &self.program_id)
    }

    fn instruction(&self, accounts: Vec<AccountMeta>, data: &AmmInstruction) -> Instruction {
        Instruction {
            program_id: self.program_id,
            accounts,
            data: data.try_to_vec().expect("AmmInstruction always serializes"),
        }
    }

    pub fn initialize_factory_instruction(&self, payer: &Pubkey, fee_to_setter: Pubkey) -> Instruction {
        let (factory, _) = self.factory_address();
        self.instruction(
            vec![
                AccountMeta::new(*payer, true),
                AccountMeta::new(factory, false),
                AccountMeta::new_readonly(system_program::id(), false),
            ],
            &AmmInstruction::InitializeFactory { fee_to_setter },
        )
    }

    pub fn create_pair_instruction(
        &self,
        payer: &Pubkey,
        mint_a: &Pubkey,
        mint_b: &Pubkey,
        chain_id: [u8; 32],
    ) -> Instruction {
        let (factory, _) = self.factory_address();
        let addrs = self.derive_pair_addresses(mint_a, mint_b);
        self.instruction(
            vec![
                AccountMeta::new(*payer, true),
                AccountMeta::new(factory, false),
                AccountMeta::new_readonly(*mint_a, false),
                AccountMeta::new_readonly(*mint_b, false),
                AccountMeta::new(addrs.pair, false),
                AccountMeta::new(addrs.vault0, false),
                AccountMeta::new(addrs.vault1, false),
                AccountMeta::new_readonly(spl_token::id(), false),
                AccountMeta::new_readonly(system_program::id(), false),
                AccountMeta::new_readonly(sysvar::rent::id(), false),
            ],
            &AmmInstruction::CreatePair { chain_id },
        )
    }

    pub fn set_fee_to_instruction(&self, fee_to_setter: &Pubkey, fee_to: Pubkey) -> Instruction {
        let (factory, _) = self.factory_address();
        self.instruction(
            vec![
                AccountMeta::new_readonly(*fee_to_setter, true),
                AccountMeta::new(factory, false),
            ],
            &AmmInstruction::SetFeeTo { fee_to },
        )
    }

    #[allow(clippy::too_many_arguments)]
    pub fn mint_instruction(
        &self,
        sender: &Pubkey,
        pair: &Pubkey,
        vault0: &Pubkey,
        vault1: &Pubkey,
        to_ledger: &Pubkey,
        fee_to_ledger: Option<&Pubkey>,
    ) -> Instruction {
        let (factory, _) = self.factory_address();
        let mut accounts = vec![
            AccountMeta::new_readonly(*sender, false),
            AccountMeta::new(*pair, false),
            AccountMeta::new_readonly(factory, false),
            AccountMeta::new(*vault0, false),
            AccountMeta::new(*vault1, false),
            AccountMeta::new(*to_ledger, false),
        ];
        if let Some(fee_ledger) = fee_to_ledger {
            accounts.push(AccountMeta::new(*fee_ledger, false));
        }
        self.instruction(accounts, &AmmInstruction::Mint)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn swap_instruction(
        &self,
        sender: &Pubkey,
        pair: &Pubkey,
        vault0: &Pubkey,
        vault1: &Pubkey,
        to_token0: &Pubkey,
        to_token1: &Pubkey,
        amount0_out: u64,
        amount1_out: u64,
        callback_data: Vec<u8>,
    ) -> Instruction {
        self.instruction(
            vec![
                AccountMeta::new_readonly(*sender, false),
                AccountMeta::new(*pair, false),
                AccountMeta::new(*vault0, false),
                AccountMeta::new(*vault1, false),
                AccountMeta::new(*to_token0, false),
                AccountMeta::new(*to_token1, false),
                AccountMeta::new_readonly(spl_token::id(), false),
            ],
            &AmmInstruction::Swap {
                amount0_out,
                amount1_out,
                callback_data,
            },
        )
    }

    #[allow(clippy::too_many_arguments)]
    pub fn burn_instruction(
        &self,
        sender: &Pubkey,
        pair: &Pubkey,
        vault0: &Pubkey,
        vault1: &Pubkey,
        pair_ledger: &Pubkey,
        fee_to_ledger: Option<&Pubkey>,
        to_token0: &Pubkey,
        to_token1: &Pubkey,
    ) -> Instruction {
        let (factory, _) = self.factory_address();
        let mut accounts = vec![
            AccountMeta::new_readonly(*sender, false),
            AccountMeta::new(*pair, false),
            AccountMeta::new_readonly(factory, false),
            AccountMeta::new(*vault0, false),
            AccountMeta::new(*vault1, false),
            AccountMeta::new(*pair_ledger, false),
            AccountMeta::new(*to_token0, false),
            AccountMeta::new(*to_token1, false),
            AccountMeta::new_readonly(spl_token::id(), false),
        ];
        if let Some(fee_ledger) = fee_to_ledger {
            accounts.push(AccountMeta::new(*fee_ledger, false));
        }
        self.instruction(accounts, &AmmInstruction::Burn)
    }

    pub fn skim_instruction(
        &self,
        pair: &Pubkey,
        vault0: &Pubkey,
        vault1: &Pubkey,
        to_token0: &Pubkey,
        to_token1: &Pubkey,
    ) -> Instruction {
        self.instruction(
            vec![
                AccountMeta::new(*pair, false),
                AccountMeta::new(*vault0, false),
                AccountMeta::new(*vault1, false),
                AccountMeta::new(*to_token0, false),
                AccountMeta::new(*to_token1, false),
                AccountMeta::new_readonly(spl_token::id(), false),
            ],
            &AmmInstruction::Skim,
        )
    }

    pub fn set_fee_to_setter_instruction(&self, fee_to_setter: &Pubkey, new_fee_to_setter: Pubkey) -> Instruction {
        let (factory, _) = self.factory_address();
        self.instruction(
            vec![
                AccountMeta::new_readonly(*fee_to_setter, true),
                AccountMeta::new(factory, false),
            ],
            &AmmInstruction::SetFeeToSetter { new_fee_to_setter },
        )
    }

    pub fn approve_instruction(
        &self,
        owner: &Pubkey,
        pair: &Pubkey,
        allowance: &Pubkey,
        spender: Pubkey,
        amount: u64,
    ) -> Instruction {
        self.instruction(
            vec![
                AccountMeta::new(*owner, true),
                AccountMeta::new_readonly(*pair, false),
                AccountMeta::new(*allowance, false),
                AccountMeta::new_readonly(system_program::id(), false),
            ],
            &AmmInstruction::Approve { spender, amount },
        )
    }

    pub fn transfer_from_instruction(
        &self,
        spender: &Pubkey,
        pair: &Pubkey,
        allowance: &Pubkey,
        owner_ledger: &Pubkey,
        recipient_ledger: &Pubkey,
        owner: Pubkey,
        amount: u64,
    ) -> Instruction {
        self.instruction(
            vec![
                AccountMeta::new_readonly(*spender, true),
                AccountMeta::new_readonly(*pair, false),
                AccountMeta::new(*allowance, false),
                AccountMeta::new(*owner_ledger, false),
                AccountMeta::new(*recipient_ledger, false),
            ],
            &AmmInstruction::TransferFrom { owner, amount },
        )
    }

    pub fn sync_instruction(&self, pair: &Pubkey, vault0: &Pubkey, vault1: &Pubkey) -> Instruction {
        self.instruction(
            vec![
                AccountMeta::new(*pair, false),
                AccountMeta::new_readonly(*vault0, false),
                AccountMeta::new_readonly(*vault1, false),
            ],
            &AmmInstruction::Sync,
        )
    }

    pub fn get_reserves_instruction(&self, pair: &Pubkey) -> Instruction {
        self.instruction(vec![AccountMeta::new_readonly(*pair, false)], &AmmInstruction::GetReserves)
    }

    pub fn initialize_lp_account_instruction(&self, payer: &Pubkey, pair: &Pubkey, owner: Pubkey) -> Instruction {
        let (ledger, _) = self.lp_account_address(pair, &owner);
        self.instruction(
            vec![
                AccountMeta::new(*payer, true),
                AccountMeta::new_readonly(*pair, false),
                AccountMeta::new(ledger, false),
                AccountMeta::new_readonly(system_program::id(), false),
            ],
            &AmmInstruction::InitializeLpAccount { owner },
        )
    }

    pub fn transfer_instruction(
        &self,
        owner: &Pubkey,
        pair: &Pubkey,
        owner_ledger: &Pubkey,
        recipient_ledger: &Pubkey,
        amount: u64,
    ) -> Instruction {
        self.instruction(
            vec![
                AccountMeta::new_readonly(*owner, true),
                AccountMeta::new_readonly(*pair, false),
                AccountMeta::new(*owner_ledger, false),
                AccountMeta::new(*recipient_ledger, false),
            ],
            &AmmInstruction::Transfer { amount },
        )
    }

    pub fn permit_instruction(
        &self,
        relayer: &Pubkey,
        pair: &Pubkey,
        owner: Pubkey,
        spender: Pubkey,
        value: u64,
        deadline: i64,
    ) -> Instruction {
        let (owner_ledger, _) = self.lp_account_address(pair, &owner);
        let (allowance, _) = self.allowance_address(pair, &owner, &spender);
        self.instruction(
            vec![
                AccountMeta::new(*relayer, true),
                AccountMeta::new_readonly(*pair, false),
                AccountMeta::new(owner_ledger, false),
                AccountMeta::new(allowance, false),
                AccountMeta::new_readonly(sysvar::instructions::id(), false),
                AccountMeta::new_readonly(system_program::id(), false),
            ],
            &AmmInstruction::Permit {
                owner,
                spender,
                value,
                deadline,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_pair_addresses_sorts_mints_either_way() {
        let program_id = Pubkey::new_unique();
        let client = PairClient::new(program_id);
        let a = Pubkey::new_unique();
        let b = Pubkey::new_unique();
        let forward = client.derive_pair_addresses(&a, &b);
        let backward = client.derive_pair_addresses(&b, &a);
        assert_eq!(forward.pair, backward.pair);
        assert_eq!(forward.token0, backward.token0);
        assert_eq!(forward.token1, backward.token1);
    }

    #[test]
    fn create_pair_instruction_targets_program() {
        let program_id = Pubkey::new_unique();
        let client = PairClient::new(program_id);
        let payer = Pubkey::new_unique();
        let a = Pubkey::new_unique();
        let b = Pubkey::new_unique();
        let ix = client.create_pair_instruction(&payer, &a, &b, [0u8; 32]);
        assert_eq!(ix.program_id, program_id);
        assert_eq!(ix.accounts.len(), 10);
    }

    #[test]
    fn burn_instruction_omits_fee_ledger_slot_when_not_given() {
        let client = PairClient::new(Pubkey::new_unique());
        let (pair, vault0, vault1, ledger, to0, to1) = (
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            Pubkey::new_unique(),
        );
        let sender = Pubkey::new_unique();
        let without_fee = client.burn_instruction(&sender, &pair, &vault0, &vault1, &ledger, None, &to0, &to1);
        assert_eq!(without_fee.accounts.len(), 9);

        let fee_ledger = Pubkey::new_unique();
        let with_fee = client.burn_instruction(&sender, &pair, &vault0, &vault1, &ledger, Some(&fee_ledger), &to0, &to1);
        assert_eq!(with_fee.accounts.len(), 10);
    }

    #[test]
    fn permit_instruction_derives_owner_ledger_and_allowance_pdas() {
        let program_id = Pubkey::new_unique();
        let client = PairClient::new(program_id);
        let relayer = Pubkey::new_unique();
        let pair = Pubkey::new_unique();
        let owner = Pubkey::new_unique();
        let spender = Pubkey::new_unique();
        let ix = client.permit_instruction(&relayer, &pair, owner, spender, 100, 1_000);
        let (expected_ledger, _) = client.lp_account_address(&pair, &owner);
        let (expected_allowance, _) = client.allowance_address(&pair, &owner, &spender);
        assert_eq!(ix.accounts[2].pubkey, expected_ledger);
        assert_eq!(ix.accounts[3].pubkey, expected_allowance);
    }
}
