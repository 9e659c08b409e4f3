#![allow(deprecated)]
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

// This is the main library for the constant-product AMM program. It wires
// together the factory (pair creation, fee governance), the pair engine
// (reserves, mint/burn, swap, oracle accumulators), and the pool-share
// ledger (transfer/approve/permit), and exposes the program entrypoint that
// dispatches `AmmInstruction`s to their processors.

use borsh::BorshDeserialize;
use solana_program::{account_info::AccountInfo, declare_id, entrypoint::ProgramResult, pubkey::Pubkey};

declare_id!("quXSYkeZ8ByTCtYY1J1uxQmE36UZ3LmNGgE3CYMFixD");

// Declare the entrypoint to the Solana runtime
#[cfg(not(feature = "no-entrypoint"))]
use solana_program::entrypoint;
#[cfg(not(feature = "no-entrypoint"))]
entrypoint!(process_instruction);

// Module declarations
pub mod client_sdk;
pub mod constants;
pub mod error;
pub mod processors;
pub mod state;
pub mod types;
pub mod utils;

// Re-export all modules for public API
pub use constants::*;
pub use error::*;
pub use processors::*;
pub use state::*;
pub use types::*;
pub use utils::*;

/// Main entry point for the constant-product AMM Solana program.
///
/// Deserializes an `AmmInstruction` and dispatches it to the processor that
/// implements it. Every handler either runs to completion or returns an
/// error; Solana's all-or-nothing transaction commit is what gives the "a
/// failure rolls back every state mutation the instruction performed"
/// behavior the spec requires, with no explicit rollback code needed here.
///
/// # Arguments
/// * `program_id` - this program's id, used to validate every PDA a handler touches
/// * `accounts` - the accounts supplied for the instruction, in the order each handler documents
/// * `instruction_data` - the Borsh-encoded `AmmInstruction`
pub fn process_instruction(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    instruction_data: &[u8],
) -> ProgramResult {
    let instruction = AmmInstruction::try_from_slice(instruction_data)?;

    match instruction {
        // Factory: governance and pair creation.
        AmmInstruction::InitializeFactory { fee_to_setter } => {
            process_initialize_factory(program_id, accounts, fee_to_setter)
        }
        AmmInstruction::CreatePair { chain_id } => process_create_pair(program_id, accounts, chain_id),
        AmmInstruction::SetFeeTo { fee_to } => process_set_fee_to(program_id, accounts, fee_to),
        AmmInstruction::SetFeeToSetter { new_fee_to_setter } => {
            process_set_fee_to_setter(program_id, accounts, new_fee_to_setter)
        }

        // Pair engine: liquidity mint/burn.
        AmmInstruction::Mint => process_mint(program_id, accounts),
        AmmInstruction::Burn => process_burn(program_id, accounts),

        // Pair engine: swap and the two housekeeping instructions.
        AmmInstruction::Swap {
            amount0_out,
            amount1_out,
            callback_data,
        } => process_swap(program_id, accounts, amount0_out, amount1_out, callback_data),
        AmmInstruction::Skim => process_skim(program_id, accounts),
        AmmInstruction::Sync => process_sync(program_id, accounts),
        AmmInstruction::GetReserves => process_get_reserves(program_id, accounts),

        // Pool-share ledger.
        AmmInstruction::InitializeLpAccount { owner } => {
            process_initialize_lp_account(program_id, accounts, owner)
        }
        AmmInstruction::Transfer { amount } => process_transfer(program_id, accounts, amount),
        AmmInstruction::Approve { spender, amount } => process_approve(program_id, accounts, spender, amount),
        AmmInstruction::TransferFrom { owner, amount } => {
            process_transfer_from(program_id, accounts, owner, amount)
        }
        AmmInstruction::Permit {
            owner,
            spender,
            value,
            deadline,
        } => process_permit(program_id, accounts, owner, spender, value, deadline),
    }
}
