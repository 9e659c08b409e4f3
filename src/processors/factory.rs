//! Factory processors: singleton initialization, pair creation, and fee
//! governance.

use solana_program::{
    account_info::{next_account_info, AccountInfo},
    entrypoint::ProgramResult,
    msg,
    program::invoke_signed,
    pubkey::Pubkey,
    sysvar::{rent::Rent, Sysvar},
};
use spl_token::instruction as token_instruction;

use crate::constants::{FACTORY_SEED, PAIR_SEED, VAULT0_SEED, VAULT1_SEED};
use crate::error::AmmError;
use crate::state::factory_state::FactoryState;
use crate::state::pair_state::PairState;
use crate::types::events::{emit_pair_created, PairCreatedEvent};
use crate::utils::pda::{factory_address, pair_address, sort_mints, vault0_address, vault1_address};
use crate::utils::rent::create_pda_account;
use crate::utils::serialization::{load_state, save_state};
use crate::utils::validation::{validate_owner, validate_pda, validate_signer, validate_writable};

pub fn process_initialize_factory(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    fee_to_setter: Pubkey,
) -> ProgramResult {
    let iter = &mut accounts.iter();
    let payer = next_account_info(iter)?;
    let factory_account = next_account_info(iter)?;
    let system_program = next_account_info(iter)?;

    validate_signer(payer)?;

    let (expected_factory, bump) = factory_address(program_id);
    validate_pda(factory_account, &expected_factory)?;

    if factory_account.owner == program_id && !factory_account.data_is_empty() {
        return Err(AmmError::PairExists.into());
    }

    let rent = Rent::get()?;
    create_pda_account(
        payer,
        factory_account,
        system_program,
        program_id,
        &rent,
        FactoryState::LEN,
        &[FACTORY_SEED, &[bump]],
    )?;

    let factory = FactoryState::new(fee_to_setter, bump);
    save_state(factory_account, &factory)?;
    msg!("factory initialized, fee_to_setter={}", fee_to_setter);
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub fn process_create_pair(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    chain_id: [u8; 32],
) -> ProgramResult {
    let iter = &mut accounts.iter();
    let payer = next_account_info(iter)?;
    let factory_account = next_account_info(iter)?;
    let mint_a = next_account_info(iter)?;
    let mint_b = next_account_info(iter)?;
    let pair_account = next_account_info(iter)?;
    let vault0_account = next_account_info(iter)?;
    let vault1_account = next_account_info(iter)?;
    let token_program = next_account_info(iter)?;
    let system_program = next_account_info(iter)?;
    let rent_sysvar = next_account_info(iter)?;

    validate_signer(payer)?;
    validate_owner(factory_account, program_id)?;

    let mut factory: FactoryState = load_state(factory_account)?;

    if mint_a.key == mint_b.key {
        return Err(AmmError::IdenticalAddresses.into());
    }
    let (token0, token1) = sort_mints(mint_a.key, mint_b.key);
    if token0 == Pubkey::default() {
        return Err(AmmError::ZeroAddress.into());
    }

    let (expected_pair, pair_bump) = pair_address(&token0, &token1, program_id);
    validate_pda(pair_account, &expected_pair)?;
    if pair_account.owner == program_id && !pair_account.data_is_empty() {
        return Err(AmmError::PairExists.into());
    }

    let (expected_vault0, vault0_bump) = vault0_address(pair_account.key, program_id);
    let (expected_vault1, vault1_bump) = vault1_address(pair_account.key, program_id);
    validate_pda(vault0_account, &expected_vault0)?;
    validate_pda(vault1_account, &expected_vault1)?;

    let rent = Rent::get()?;

    create_pda_account(
        payer,
        pair_account,
        system_program,
        program_id,
        &rent,
        PairState::LEN,
        &[PAIR_SEED, token0.as_ref(), token1.as_ref(), &[pair_bump]],
    )?;

    create_pda_account(
        payer,
        vault0_account,
        system_program,
        token_program.key,
        &rent,
        spl_token::state::Account::LEN,
        &[VAULT0_SEED, pair_account.key.as_ref(), &[vault0_bump]],
    )?;
    // token0 is whichever of mint_a/mint_b sorted first; resolve its AccountInfo.
    let token0_info = if mint_a.key == &token0 { mint_a } else { mint_b };
    let token1_info = if mint_a.key == &token1 { mint_a } else { mint_b };

    invoke_signed(
        &token_instruction::initialize_account(
            token_program.key,
            vault0_account.key,
            token0_info.key,
            pair_account.key,
        )?,
        &[
            vault0_account.clone(),
            token0_info.clone(),
            pair_account.clone(),
            rent_sysvar.clone(),
            token_program.clone(),
        ],
        &[&[VAULT0_SEED, pair_account.key.as_ref(), &[vault0_bump]]],
    )?;

    create_pda_account(
        payer,
        vault1_account,
        system_program,
        token_program.key,
        &rent,
        spl_token::state::Account::LEN,
        &[VAULT1_SEED, pair_account.key.as_ref(), &[vault1_bump]],
    )?;
    invoke_signed(
        &token_instruction::initialize_account(
            token_program.key,
            vault1_account.key,
            token1_info.key,
            pair_account.key,
        )?,
        &[
            vault1_account.clone(),
            token1_info.clone(),
            pair_account.clone(),
            rent_sysvar.clone(),
            token_program.clone(),
        ],
        &[&[VAULT1_SEED, pair_account.key.as_ref(), &[vault1_bump]]],
    )?;

    let pair = PairState::new(
        *factory_account.key,
        token0,
        token1,
        *vault0_account.key,
        *vault1_account.key,
        chain_id,
        pair_bump,
        vault0_bump,
        vault1_bump,
    );
    save_state(pair_account, &pair)?;

    factory.pair_count = factory.pair_count.checked_add(1).ok_or(AmmError::Overflow)?;
    save_state(factory_account, &factory)?;

    emit_pair_created(PairCreatedEvent {
        token0,
        token1,
        pair: *pair_account.key,
        index_plus_one: factory.pair_count,
    });
    msg!("pair created: {} <-> {} at {}", token0, token1, pair_account.key);
    Ok(())
}

pub fn process_set_fee_to(program_id: &Pubkey, accounts: &[AccountInfo], fee_to: Pubkey) -> ProgramResult {
    let iter = &mut accounts.iter();
    let setter = next_account_info(iter)?;
    let factory_account = next_account_info(iter)?;

    validate_signer(setter)?;
    validate_owner(factory_account, program_id)?;
    validate_writable(factory_account)?;
    let mut factory: FactoryState = load_state(factory_account)?;
    if factory.fee_to_setter != *setter.key {
        return Err(AmmError::Forbidden.into());
    }
    factory.fee_to = fee_to;
    save_state(factory_account, &factory)?;
    Ok(())
}

pub fn process_set_fee_to_setter(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    new_fee_to_setter: Pubkey,
) -> ProgramResult {
    let iter = &mut accounts.iter();
    let setter = next_account_info(iter)?;
    let factory_account = next_account_info(iter)?;

    validate_signer(setter)?;
    validate_owner(factory_account, program_id)?;
    validate_writable(factory_account)?;
    let mut factory: FactoryState = load_state(factory_account)?;
    if factory.fee_to_setter != *setter.key {
        return Err(AmmError::Forbidden.into());
    }
    factory.fee_to_setter = new_fee_to_setter;
    save_state(factory_account, &factory)?;
    Ok(())
}
