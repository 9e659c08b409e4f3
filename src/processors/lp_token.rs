//! Pool-share ledger processors: account creation, direct transfers, and the
//! approve/transferFrom allowance path.

use solana_program::{
    account_info::{next_account_info, AccountInfo},
    entrypoint::ProgramResult,
    msg,
    pubkey::Pubkey,
    sysvar::{rent::Rent, Sysvar},
};

use solana_program::clock::Clock;

use crate::constants::{ALLOWANCE_SEED, LP_ACCOUNT_SEED};
use crate::error::AmmError;
use crate::state::lp_token::{Allowance, LpTokenAccount};
use crate::state::pair_state::PairState;
use crate::types::events::{emit_approval, emit_transfer, ApprovalEvent, TransferEvent};
use crate::utils::ed25519::{permit_digest, verify_permit_signature};
use crate::utils::pda::{allowance_address, lp_account_address};
use crate::utils::rent::{check_rent_exempt, create_pda_account};
use crate::utils::serialization::{load_state, save_state};
use crate::utils::validation::{validate_owner, validate_pda, validate_signer};

pub fn process_initialize_lp_account(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    owner: Pubkey,
) -> ProgramResult {
    let iter = &mut accounts.iter();
    let payer = next_account_info(iter)?;
    let pair_account = next_account_info(iter)?;
    let ledger_account = next_account_info(iter)?;
    let system_program = next_account_info(iter)?;

    validate_signer(payer)?;
    validate_owner(pair_account, program_id)?;

    let (expected, bump) = lp_account_address(pair_account.key, &owner, program_id);
    validate_pda(ledger_account, &expected)?;
    if ledger_account.owner == program_id && !ledger_account.data_is_empty() {
        return Err(AmmError::PairExists.into());
    }

    let rent = Rent::get()?;
    create_pda_account(
        payer,
        ledger_account,
        system_program,
        program_id,
        &rent,
        LpTokenAccount::LEN,
        &[LP_ACCOUNT_SEED, pair_account.key.as_ref(), owner.as_ref(), &[bump]],
    )?;

    let ledger = LpTokenAccount::new(*pair_account.key, bump);
    save_state(ledger_account, &ledger)?;
    msg!("lp account initialized for {}", owner);
    Ok(())
}

pub fn process_transfer(program_id: &Pubkey, accounts: &[AccountInfo], amount: u64) -> ProgramResult {
    let iter = &mut accounts.iter();
    let owner = next_account_info(iter)?;
    let pair_account = next_account_info(iter)?;
    let owner_ledger = next_account_info(iter)?;
    let recipient_ledger = next_account_info(iter)?;

    validate_signer(owner)?;
    validate_owner(pair_account, program_id)?;
    validate_owner(owner_ledger, program_id)?;
    validate_owner(recipient_ledger, program_id)?;

    let (expected_owner_ledger, _) = lp_account_address(pair_account.key, owner.key, program_id);
    validate_pda(owner_ledger, &expected_owner_ledger)?;

    let mut owner_state: LpTokenAccount = load_state(owner_ledger)?;
    if owner_state.pair != *pair_account.key {
        return Err(AmmError::InvalidAccountAddress.into());
    }
    owner_state.debit(amount)?;
    save_state(owner_ledger, &owner_state)?;

    // `recipient_ledger`'s owner is not named as an instruction argument (any
    // holder may receive a transfer), so it cannot be bound by PDA
    // derivation the way `owner_ledger` is above; checking the embedded
    // `pair` field is what stops a caller from naming another pair's ledger
    // here and crediting a balance that pair's `total_supply` never issued.
    let mut recipient_state: LpTokenAccount = load_state(recipient_ledger)?;
    if recipient_state.pair != *pair_account.key {
        return Err(AmmError::InvalidAccountAddress.into());
    }
    recipient_state.credit(amount)?;
    save_state(recipient_ledger, &recipient_state)?;

    emit_transfer(TransferEvent {
        from: *owner.key,
        to: *recipient_ledger.key,
        value: amount,
    });
    Ok(())
}

pub fn process_approve(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    spender: Pubkey,
    amount: u64,
) -> ProgramResult {
    let iter = &mut accounts.iter();
    let owner = next_account_info(iter)?;
    let pair_account = next_account_info(iter)?;
    let allowance_account = next_account_info(iter)?;
    let system_program = next_account_info(iter)?;

    validate_signer(owner)?;
    validate_owner(pair_account, program_id)?;

    let (expected, bump) = allowance_address(pair_account.key, owner.key, &spender, program_id);
    validate_pda(allowance_account, &expected)?;

    let mut allowance = if allowance_account.owner == program_id && !allowance_account.data_is_empty() {
        check_rent_exempt(allowance_account, &Rent::get()?)?;
        load_state::<Allowance>(allowance_account)?
    } else {
        let rent = Rent::get()?;
        create_pda_account(
            owner,
            allowance_account,
            system_program,
            program_id,
            &rent,
            Allowance::LEN,
            &[
                ALLOWANCE_SEED,
                pair_account.key.as_ref(),
                owner.key.as_ref(),
                spender.as_ref(),
                &[bump],
            ],
        )?;
        Allowance::new(bump)
    };

    allowance.amount = amount;
    save_state(allowance_account, &allowance)?;

    emit_approval(ApprovalEvent {
        owner: *owner.key,
        spender,
        value: amount,
    });
    Ok(())
}

pub fn process_transfer_from(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    owner: Pubkey,
    amount: u64,
) -> ProgramResult {
    let iter = &mut accounts.iter();
    let spender = next_account_info(iter)?;
    let pair_account = next_account_info(iter)?;
    let allowance_account = next_account_info(iter)?;
    let owner_ledger = next_account_info(iter)?;
    let recipient_ledger = next_account_info(iter)?;

    validate_signer(spender)?;
    validate_owner(pair_account, program_id)?;
    validate_owner(allowance_account, program_id)?;
    validate_owner(owner_ledger, program_id)?;
    validate_owner(recipient_ledger, program_id)?;

    let (expected, _) = allowance_address(pair_account.key, &owner, spender.key, program_id);
    validate_pda(allowance_account, &expected)?;

    let (expected_owner_ledger, _) = lp_account_address(pair_account.key, &owner, program_id);
    validate_pda(owner_ledger, &expected_owner_ledger)?;

    let mut allowance: Allowance = load_state(allowance_account)?;
    allowance.spend(amount)?;
    save_state(allowance_account, &allowance)?;

    let mut owner_state: LpTokenAccount = load_state(owner_ledger)?;
    if owner_state.pair != *pair_account.key {
        return Err(AmmError::InvalidAccountAddress.into());
    }
    owner_state.debit(amount)?;
    save_state(owner_ledger, &owner_state)?;

    let mut recipient_state: LpTokenAccount = load_state(recipient_ledger)?;
    if recipient_state.pair != *pair_account.key {
        return Err(AmmError::InvalidAccountAddress.into());
    }
    recipient_state.credit(amount)?;
    save_state(recipient_ledger, &recipient_state)?;

    emit_transfer(TransferEvent {
        from: owner,
        to: *recipient_ledger.key,
        value: amount,
    });
    Ok(())
}

/// Approval-by-signature: grants `spender` an allowance over `owner`'s pool
/// shares, authorized by a preceding `Ed25519SigVerify` instruction in the
/// same transaction rather than `owner` co-signing this one.
///
/// Accounts:
/// 0. `[signer, writable]` relayer (pays for the allowance PDA on first use)
/// 1. `[]` pair PDA
/// 2. `[writable]` owner's LP ledger PDA (carries the replay-protecting nonce)
/// 3. `[writable]` allowance PDA for `(pair, owner, spender)`
/// 4. `[]` instructions sysvar
/// 5. `[]` system program
pub fn process_permit(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    owner: Pubkey,
    spender: Pubkey,
    value: u64,
    deadline: i64,
) -> ProgramResult {
    let iter = &mut accounts.iter();
    let relayer = next_account_info(iter)?;
    let pair_account = next_account_info(iter)?;
    let owner_ledger = next_account_info(iter)?;
    let allowance_account = next_account_info(iter)?;
    let instructions_sysvar = next_account_info(iter)?;
    let system_program = next_account_info(iter)?;

    validate_signer(relayer)?;
    validate_owner(pair_account, program_id)?;
    validate_owner(owner_ledger, program_id)?;

    let now = Clock::get()?.unix_timestamp;
    if deadline < now {
        return Err(AmmError::Expired.into());
    }

    let pair: PairState = load_state(pair_account)?;

    let (expected_ledger, _) = lp_account_address(pair_account.key, &owner, program_id);
    validate_pda(owner_ledger, &expected_ledger)?;
    let mut owner_ledger_state: LpTokenAccount = load_state(owner_ledger)?;
    if owner_ledger_state.pair != *pair_account.key {
        return Err(AmmError::InvalidAccountAddress.into());
    }

    let digest = permit_digest(
        &pair.chain_id,
        pair_account.key,
        &owner,
        &spender,
        value,
        owner_ledger_state.permit_nonce,
        deadline,
    );
    verify_permit_signature(instructions_sysvar, &owner, &digest)?;

    let (expected_allowance, bump) = allowance_address(pair_account.key, &owner, &spender, program_id);
    validate_pda(allowance_account, &expected_allowance)?;

    let mut allowance = if allowance_account.owner == program_id && !allowance_account.data_is_empty() {
        check_rent_exempt(allowance_account, &Rent::get()?)?;
        load_state::<Allowance>(allowance_account)?
    } else {
        let rent = Rent::get()?;
        create_pda_account(
            relayer,
            allowance_account,
            system_program,
            program_id,
            &rent,
            Allowance::LEN,
            &[
                ALLOWANCE_SEED,
                pair_account.key.as_ref(),
                owner.as_ref(),
                spender.as_ref(),
                &[bump],
            ],
        )?;
        Allowance::new(bump)
    };

    allowance.amount = value;
    save_state(allowance_account, &allowance)?;

    owner_ledger_state.permit_nonce = owner_ledger_state
        .permit_nonce
        .checked_add(1)
        .ok_or(AmmError::Overflow)?;
    save_state(owner_ledger, &owner_ledger_state)?;

    emit_approval(ApprovalEvent {
        owner,
        spender,
        value,
    });
    msg!("permit: {} approved {} for {}", owner, value, spender);
    Ok(())
}
