//! `swap`, `skim`, and `sync`: the price-discovery path and the two
//! housekeeping instructions that keep reserves honest against the vaults'
//! actual balances.

use borsh::BorshSerialize;
use solana_program::{
    account_info::{next_account_info, AccountInfo},
    clock::Clock,
    entrypoint::ProgramResult,
    instruction::{AccountMeta, Instruction},
    msg,
    program::invoke,
    pubkey::Pubkey,
    sysvar::Sysvar,
};

use crate::constants::{FEE_DENOMINATOR, FEE_NUMERATOR, PAIR_SEED};
use crate::error::AmmError;
use crate::state::pair_state::PairState;
use crate::types::events::{emit_swap, emit_sync, SwapEvent, SyncEvent};
use crate::utils::fixed_point::U256;
use crate::utils::reentrancy::PairGuard;
use crate::utils::serialization::{load_state, save_state};
use crate::utils::token_validation::{safe_transfer, token_account_owner, validate_vault, vault_balance};
use crate::utils::validation::validate_owner;

/// Payload handed to an optional flash-swap callback receiver, mirroring the
/// `(sender, amount0Out, amount1Out, data)` tuple the callback interface
/// takes.
#[derive(BorshSerialize)]
struct SwapCallbackPayload {
    sender: Pubkey,
    amount0_out: u64,
    amount1_out: u64,
    data: Vec<u8>,
}

pub fn process_swap(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    amount0_out: u64,
    amount1_out: u64,
    callback_data: Vec<u8>,
) -> ProgramResult {
    let iter = &mut accounts.iter();
    let sender = next_account_info(iter)?;
    let pair_account = next_account_info(iter)?;
    let vault0_account = next_account_info(iter)?;
    let vault1_account = next_account_info(iter)?;
    let to_token0 = next_account_info(iter)?;
    let to_token1 = next_account_info(iter)?;
    let token_program = next_account_info(iter)?;
    let remaining: Vec<&AccountInfo> = iter.collect();

    validate_owner(pair_account, program_id)?;
    let mut pair: PairState = load_state(pair_account)?;
    validate_vault(vault0_account, &pair.token0, pair_account.key)?;
    validate_vault(vault1_account, &pair.token1, pair_account.key)?;

    if amount0_out == 0 && amount1_out == 0 {
        return Err(AmmError::InsufficientOutputAmount.into());
    }

    let amount0_in;
    let amount1_in;
    {
        let mut pair = PairGuard::enter(pair_account, &mut pair)?;

        let (reserve0, reserve1, _) = pair.get_reserves();
        if u128::from(amount0_out) >= reserve0 || u128::from(amount1_out) >= reserve1 {
            return Err(AmmError::InsufficientLiquidity.into());
        }

        // The swap's payout must not be redirected back into the pair's own
        // vaults: that would let a caller launder reserve funds as "output"
        // without the balance delta the K-check relies on ever appearing.
        if to_token0.key == vault0_account.key
            || to_token0.key == vault1_account.key
            || to_token1.key == vault0_account.key
            || to_token1.key == vault1_account.key
        {
            return Err(AmmError::InvalidTo.into());
        }

        let authority_seeds: &[&[u8]] = &[PAIR_SEED, pair.token0.as_ref(), pair.token1.as_ref(), &[pair.bump]];
        safe_transfer(token_program, vault0_account, to_token0, pair_account, amount0_out, authority_seeds)?;
        safe_transfer(token_program, vault1_account, to_token1, pair_account, amount1_out, authority_seeds)?;

        if !callback_data.is_empty() {
            let callback_program = remaining
                .first()
                .ok_or(AmmError::InvalidTo)?;
            // The callback receiver must be the executable program that holds
            // (is the SPL-Token `owner`/authority of) the `to` token account
            // the payout above just credited, matching the documented
            // `to`-designated-receiver contract; otherwise any unrelated
            // program could be named here to intercept the payload.
            let to0_owner = token_account_owner(to_token0)?;
            let to1_owner = token_account_owner(to_token1)?;
            if !callback_program.executable
                || (*callback_program.key != to0_owner && *callback_program.key != to1_owner)
            {
                return Err(AmmError::InvalidTo.into());
            }
            let callback_accounts: Vec<&AccountInfo> = remaining[1..].to_vec();

            let mut metas = Vec::with_capacity(callback_accounts.len());
            let mut infos = Vec::with_capacity(callback_accounts.len() + 1);
            infos.push((*callback_program).clone());
            for info in &callback_accounts {
                metas.push(if info.is_writable {
                    AccountMeta::new(*info.key, info.is_signer)
                } else {
                    AccountMeta::new_readonly(*info.key, info.is_signer)
                });
                infos.push((*info).clone());
            }

            let payload = SwapCallbackPayload {
                sender: *sender.key,
                amount0_out,
                amount1_out,
                data: callback_data,
            };
            let mut data = Vec::new();
            payload.serialize(&mut data).map_err(|_| AmmError::InvalidTo)?;

            let ix = Instruction {
                program_id: *callback_program.key,
                accounts: metas,
                data,
            };
            invoke(&ix, &infos)?;
        }

        let bal0 = vault_balance(vault0_account)? as u128;
        let bal1 = vault_balance(vault1_account)? as u128;

        let expected0 = reserve0.checked_sub(u128::from(amount0_out)).ok_or(AmmError::Overflow)?;
        let expected1 = reserve1.checked_sub(u128::from(amount1_out)).ok_or(AmmError::Overflow)?;
        amount0_in = if bal0 > expected0 { bal0 - expected0 } else { 0 };
        amount1_in = if bal1 > expected1 { bal1 - expected1 } else { 0 };
        if amount0_in == 0 && amount1_in == 0 {
            return Err(AmmError::InsufficientInputAmount.into());
        }

        let bal0_adjusted = U256::from(bal0) * U256::from(FEE_DENOMINATOR)
            - U256::from(amount0_in) * U256::from(FEE_NUMERATOR);
        let bal1_adjusted = U256::from(bal1) * U256::from(FEE_DENOMINATOR)
            - U256::from(amount1_in) * U256::from(FEE_NUMERATOR);
        let lhs = bal0_adjusted * bal1_adjusted;
        let rhs = U256::from(reserve0) * U256::from(reserve1) * U256::from(FEE_DENOMINATOR * FEE_DENOMINATOR);
        if lhs < rhs {
            return Err(AmmError::K.into());
        }

        let now32 = Clock::get()?.unix_timestamp as u32;
        pair.update(bal0, bal1, now32)?;
    }

    save_state(pair_account, &pair)?;

    emit_swap(SwapEvent {
        sender: *sender.key,
        amount0_in: u64::try_from(amount0_in).map_err(|_| AmmError::Overflow)?,
        amount1_in: u64::try_from(amount1_in).map_err(|_| AmmError::Overflow)?,
        amount0_out,
        amount1_out,
        to: *to_token0.key,
    });
    msg!(
        "swap: in=({}, {}) out=({}, {})",
        amount0_in,
        amount1_in,
        amount0_out,
        amount1_out
    );
    Ok(())
}

pub fn process_skim(program_id: &Pubkey, accounts: &[AccountInfo]) -> ProgramResult {
    let iter = &mut accounts.iter();
    let pair_account = next_account_info(iter)?;
    let vault0_account = next_account_info(iter)?;
    let vault1_account = next_account_info(iter)?;
    let to_token0 = next_account_info(iter)?;
    let to_token1 = next_account_info(iter)?;
    let token_program = next_account_info(iter)?;

    validate_owner(pair_account, program_id)?;
    let mut pair: PairState = load_state(pair_account)?;
    validate_vault(vault0_account, &pair.token0, pair_account.key)?;
    validate_vault(vault1_account, &pair.token1, pair_account.key)?;

    {
        let pair = PairGuard::enter(pair_account, &mut pair)?;

        let bal0 = vault_balance(vault0_account)? as u128;
        let bal1 = vault_balance(vault1_account)? as u128;
        let (reserve0, reserve1, _) = pair.get_reserves();

        let excess0 = bal0.saturating_sub(reserve0);
        let excess1 = bal1.saturating_sub(reserve1);
        let excess0_u64 = u64::try_from(excess0).map_err(|_| AmmError::Overflow)?;
        let excess1_u64 = u64::try_from(excess1).map_err(|_| AmmError::Overflow)?;

        let authority_seeds: &[&[u8]] = &[PAIR_SEED, pair.token0.as_ref(), pair.token1.as_ref(), &[pair.bump]];
        safe_transfer(token_program, vault0_account, to_token0, pair_account, excess0_u64, authority_seeds)?;
        safe_transfer(token_program, vault1_account, to_token1, pair_account, excess1_u64, authority_seeds)?;
    }

    save_state(pair_account, &pair)?;
    msg!("skim: {} -> {}", pair_account.key, to_token0.key);
    Ok(())
}

pub fn process_sync(program_id: &Pubkey, accounts: &[AccountInfo]) -> ProgramResult {
    let iter = &mut accounts.iter();
    let pair_account = next_account_info(iter)?;
    let vault0_account = next_account_info(iter)?;
    let vault1_account = next_account_info(iter)?;

    validate_owner(pair_account, program_id)?;
    let mut pair: PairState = load_state(pair_account)?;
    validate_vault(vault0_account, &pair.token0, pair_account.key)?;
    validate_vault(vault1_account, &pair.token1, pair_account.key)?;

    {
        let mut pair = PairGuard::enter(pair_account, &mut pair)?;
        let bal0 = vault_balance(vault0_account)? as u128;
        let bal1 = vault_balance(vault1_account)? as u128;
        let now32 = Clock::get()?.unix_timestamp as u32;
        pair.update(bal0, bal1, now32)?;
    }

    save_state(pair_account, &pair)?;
    emit_sync(SyncEvent {
        reserve0: pair.reserve0,
        reserve1: pair.reserve1,
    });
    Ok(())
}

/// Read-only: logs `(reserve0, reserve1, block_timestamp_last)` for a pair.
/// Solana instructions have no return channel other than logs/return data,
/// so this mirrors the teacher's `get_pool_info`-style view processor.
///
/// Accounts:
/// 0. `[]` pair PDA
pub fn process_get_reserves(program_id: &Pubkey, accounts: &[AccountInfo]) -> ProgramResult {
    let iter = &mut accounts.iter();
    let pair_account = next_account_info(iter)?;

    validate_owner(pair_account, program_id)?;
    let pair: PairState = load_state(pair_account)?;
    let (r0, r1, t) = pair.get_reserves();
    msg!("reserves: r0={} r1={} t={}", r0, r1, t);
    Ok(())
}
