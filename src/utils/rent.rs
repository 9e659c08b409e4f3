//! Rent-exemption and account-creation helpers for program-owned accounts.

use solana_program::{
    account_info::AccountInfo, entrypoint::ProgramResult, program::invoke_signed,
    program_error::ProgramError, pubkey::Pubkey, system_instruction, sysvar::rent::Rent,
};

/// Returns `Ok(())` iff `account`'s lamport balance covers rent exemption for
/// its current data length.
pub fn check_rent_exempt(account: &AccountInfo, rent: &Rent) -> Result<(), ProgramError> {
    let minimum_balance = rent.minimum_balance(account.data_len());
    if account.lamports() < minimum_balance {
        return Err(ProgramError::AccountNotRentExempt);
    }
    Ok(())
}

/// Funds and allocates a PDA account sized for `space`, owned by `owner`,
/// signing with `seeds` via `invoke_signed`. Used for every first-touch PDA
/// in the factory and pair lifecycle (the factory singleton, a pair, its two
/// vaults, an LP ledger slot, an allowance slot).
#[allow(clippy::too_many_arguments)]
pub fn create_pda_account<'a>(
    payer: &AccountInfo<'a>,
    new_account: &AccountInfo<'a>,
    system_program: &AccountInfo<'a>,
    owner: &Pubkey,
    rent: &Rent,
    space: usize,
    seeds: &[&[u8]],
) -> ProgramResult {
    let lamports = rent.minimum_balance(space);
    invoke_signed(
        &system_instruction::create_account(payer.key, new_account.key, lamports, space as u64, owner),
        &[payer.clone(), new_account.clone(), system_program.clone()],
        &[seeds],
    )
}
