//! `mint` and `burn`: pool-share issuance and redemption against the pair's
//! observed vault balances.

use solana_program::{
    account_info::{next_account_info, AccountInfo},
    clock::Clock,
    entrypoint::ProgramResult,
    msg,
    pubkey::Pubkey,
    sysvar::Sysvar,
};

use crate::constants::{MINIMUM_LIQUIDITY, PAIR_SEED};
use crate::error::AmmError;
use crate::state::factory_state::FactoryState;
use crate::state::lp_token::LpTokenAccount;
use crate::state::pair_state::PairState;
use crate::types::events::{emit_burn, emit_mint, BurnEvent, MintEvent};
use crate::utils::fixed_point::U256;
use crate::utils::math::{checked_sub_u128, mul_div_u128, sqrt_u256};
use crate::utils::pda::lp_account_address;
use crate::utils::reentrancy::PairGuard;
use crate::utils::serialization::{load_state, save_state};
use crate::utils::token_validation::{safe_transfer, validate_vault, vault_balance};
use crate::utils::validation::{validate_owner, validate_pda};

pub fn process_mint(program_id: &Pubkey, accounts: &[AccountInfo]) -> ProgramResult {
    let iter = &mut accounts.iter();
    let sender = next_account_info(iter)?;
    let pair_account = next_account_info(iter)?;
    let factory_account = next_account_info(iter)?;
    let vault0_account = next_account_info(iter)?;
    let vault1_account = next_account_info(iter)?;
    let to_ledger = next_account_info(iter)?;
    let fee_to_ledger = iter.next();

    validate_owner(pair_account, program_id)?;
    validate_owner(to_ledger, program_id)?;
    let mut pair: PairState = load_state(pair_account)?;
    validate_vault(vault0_account, &pair.token0, pair_account.key)?;
    validate_vault(vault1_account, &pair.token1, pair_account.key)?;
    let factory: FactoryState = load_state(factory_account)?;

    let amount0;
    let amount1;
    let liquidity_u64;
    let fee_on;
    {
        let mut pair = PairGuard::enter(pair_account, &mut pair)?;

        let (prev_r0, prev_r1, _) = pair.get_reserves();
        let bal0 = vault_balance(vault0_account)? as u128;
        let bal1 = vault_balance(vault1_account)? as u128;

        amount0 = checked_sub_u128(bal0, prev_r0)?;
        amount1 = checked_sub_u128(bal1, prev_r1)?;

        fee_on = factory.fee_on();
        let total_supply_before = pair.lp_mint.total_supply;
        let fee_liquidity = pair.mint_fee(fee_on, total_supply_before);
        if fee_liquidity > 0 {
            let fee_to_ledger = fee_to_ledger.ok_or(AmmError::Forbidden)?;
            let (expected_fee_ledger, _) = lp_account_address(pair_account.key, &factory.fee_to, program_id);
            validate_pda(fee_to_ledger, &expected_fee_ledger)?;
            let mut fee_ledger: LpTokenAccount = load_state(fee_to_ledger)?;
            fee_ledger.credit(fee_liquidity)?;
            save_state(fee_to_ledger, &fee_ledger)?;
            pair.lp_mint.total_supply = pair
                .lp_mint
                .total_supply
                .checked_add(fee_liquidity)
                .ok_or(AmmError::Overflow)?;
        }

        let total_supply = pair.lp_mint.total_supply;
        let liquidity = if total_supply == 0 {
            let product = U256::from(amount0) * U256::from(amount1);
            let root = sqrt_u256(product).as_u128();
            let minted = checked_sub_u128(root, u128::from(MINIMUM_LIQUIDITY))?;
            pair.lp_mint.total_supply = MINIMUM_LIQUIDITY;
            minted
        } else {
            let share0 = mul_div_u128(amount0, u128::from(total_supply), prev_r0)?;
            let share1 = mul_div_u128(amount1, u128::from(total_supply), prev_r1)?;
            share0.min(share1)
        };

        if liquidity == 0 {
            return Err(AmmError::InsufficientLiquidityMinted.into());
        }
        liquidity_u64 = u64::try_from(liquidity).map_err(|_| AmmError::Overflow)?;

        let mut to_account: LpTokenAccount = load_state(to_ledger)?;
        to_account.credit(liquidity_u64)?;
        save_state(to_ledger, &to_account)?;

        pair.lp_mint.total_supply = pair
            .lp_mint
            .total_supply
            .checked_add(liquidity_u64)
            .ok_or(AmmError::Overflow)?;

        let now32 = Clock::get()?.unix_timestamp as u32;
        pair.update(bal0, bal1, now32)?;
        if fee_on {
            pair.set_k_last(U256::from(pair.reserve0) * U256::from(pair.reserve1));
        }
    }

    save_state(pair_account, &pair)?;

    emit_mint(MintEvent {
        sender: *sender.key,
        amount0: amount0 as u64,
        amount1: amount1 as u64,
    });
    msg!("mint: {} token0, {} token1, {} shares", amount0, amount1, liquidity_u64);
    Ok(())
}

pub fn process_burn(program_id: &Pubkey, accounts: &[AccountInfo]) -> ProgramResult {
    let iter = &mut accounts.iter();
    let sender = next_account_info(iter)?;
    let pair_account = next_account_info(iter)?;
    let factory_account = next_account_info(iter)?;
    let vault0_account = next_account_info(iter)?;
    let vault1_account = next_account_info(iter)?;
    let pair_ledger = next_account_info(iter)?;
    let to_token0 = next_account_info(iter)?;
    let to_token1 = next_account_info(iter)?;
    let token_program = next_account_info(iter)?;
    let fee_to_ledger = iter.next();

    validate_owner(pair_account, program_id)?;
    let mut pair: PairState = load_state(pair_account)?;
    validate_vault(vault0_account, &pair.token0, pair_account.key)?;
    validate_vault(vault1_account, &pair.token1, pair_account.key)?;
    let factory: FactoryState = load_state(factory_account)?;

    // `burn` redeems whatever shares were transferred to the pair's own
    // ledger account ahead of this call, mirroring the spec's "the pair
    // redeems shares already sent to its own balance" model. Without this
    // check a caller could point `pair_ledger` at any other holder's ledger
    // and redeem their shares for tokens paid out to an address of its
    // choosing.
    let (expected_pair_ledger, _) = lp_account_address(pair_account.key, pair_account.key, program_id);
    validate_pda(pair_ledger, &expected_pair_ledger)?;

    let liquidity;
    let amount0_u64;
    let amount1_u64;
    let fee_on;
    {
        let mut pair = PairGuard::enter(pair_account, &mut pair)?;

        let bal0 = vault_balance(vault0_account)? as u128;
        let bal1 = vault_balance(vault1_account)? as u128;

        fee_on = factory.fee_on();
        let total_supply_before = pair.lp_mint.total_supply;
        let fee_liquidity = pair.mint_fee(fee_on, total_supply_before);
        if fee_liquidity > 0 {
            let fee_to_ledger = fee_to_ledger.ok_or(AmmError::Forbidden)?;
            let (expected_fee_ledger, _) = lp_account_address(pair_account.key, &factory.fee_to, program_id);
            validate_pda(fee_to_ledger, &expected_fee_ledger)?;
            let mut fee_ledger: LpTokenAccount = load_state(fee_to_ledger)?;
            fee_ledger.credit(fee_liquidity)?;
            save_state(fee_to_ledger, &fee_ledger)?;
            pair.lp_mint.total_supply = pair
                .lp_mint
                .total_supply
                .checked_add(fee_liquidity)
                .ok_or(AmmError::Overflow)?;
        }

        let mut pair_ledger_state: LpTokenAccount = load_state(pair_ledger)?;
        liquidity = pair_ledger_state.balance;
        let total_supply = pair.lp_mint.total_supply;

        let amount0 = mul_div_u128(u128::from(liquidity), bal0, u128::from(total_supply))?;
        let amount1 = mul_div_u128(u128::from(liquidity), bal1, u128::from(total_supply))?;
        if amount0 == 0 || amount1 == 0 {
            return Err(AmmError::InsufficientLiquidityBurned.into());
        }

        pair_ledger_state.debit(liquidity)?;
        save_state(pair_ledger, &pair_ledger_state)?;
        pair.lp_mint.total_supply = pair
            .lp_mint
            .total_supply
            .checked_sub(liquidity)
            .ok_or(AmmError::Overflow)?;

        amount0_u64 = u64::try_from(amount0).map_err(|_| AmmError::Overflow)?;
        amount1_u64 = u64::try_from(amount1).map_err(|_| AmmError::Overflow)?;

        let authority_seeds: &[&[u8]] = &[PAIR_SEED, pair.token0.as_ref(), pair.token1.as_ref(), &[pair.bump]];
        safe_transfer(token_program, vault0_account, to_token0, pair_account, amount0_u64, authority_seeds)?;
        safe_transfer(token_program, vault1_account, to_token1, pair_account, amount1_u64, authority_seeds)?;

        let new_bal0 = vault_balance(vault0_account)? as u128;
        let new_bal1 = vault_balance(vault1_account)? as u128;
        let now32 = Clock::get()?.unix_timestamp as u32;
        pair.update(new_bal0, new_bal1, now32)?;
        if fee_on {
            pair.set_k_last(U256::from(pair.reserve0) * U256::from(pair.reserve1));
        }
    }

    save_state(pair_account, &pair)?;

    emit_burn(BurnEvent {
        sender: *sender.key,
        amount0: amount0_u64,
        amount1: amount1_u64,
        to: *to_token0.key,
    });
    msg!("burn: {} shares -> {} token0, {} token1", liquidity, amount0_u64, amount1_u64);
    Ok(())
}
