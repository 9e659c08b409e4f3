//! SPL Token account validation and the safe-transfer CPI helper.

use solana_program::{
    account_info::AccountInfo, entrypoint::ProgramResult, program::invoke_signed, pubkey::Pubkey,
};
use spl_token::state::Account as SplTokenAccount;

use crate::error::AmmError;

/// Unpacks `account` as an SPL Token account and checks it belongs to `mint`
/// and is owned by `expected_owner` (the pair's vault authority PDA).
pub fn validate_vault(
    account: &AccountInfo,
    mint: &Pubkey,
    expected_owner: &Pubkey,
) -> Result<SplTokenAccount, AmmError> {
    if account.owner != &spl_token::id() {
        return Err(AmmError::InvalidAccountOwner);
    }
    let unpacked = SplTokenAccount::unpack(&account.data.borrow()).map_err(|_| AmmError::InvalidAccountOwner)?;
    if &unpacked.mint != mint {
        return Err(AmmError::InvalidAccountAddress);
    }
    if &unpacked.owner != expected_owner {
        return Err(AmmError::InvalidAccountAddress);
    }
    Ok(unpacked)
}

/// Reads the current token balance of a vault without unpacking the full
/// account, for the balance-delta reads `mint`/`burn`/`swap` perform.
pub fn vault_balance(account: &AccountInfo) -> Result<u64, AmmError> {
    let unpacked = SplTokenAccount::unpack(&account.data.borrow()).map_err(|_| AmmError::InvalidAccountOwner)?;
    Ok(unpacked.amount)
}

/// Reads an SPL Token account's `owner` (authority) field, for binding a
/// flash-swap callback receiver to the token account it was paid into.
pub fn token_account_owner(account: &AccountInfo) -> Result<Pubkey, AmmError> {
    let unpacked = SplTokenAccount::unpack(&account.data.borrow()).map_err(|_| AmmError::InvalidAccountOwner)?;
    Ok(unpacked.owner)
}

/// Transfers `amount` of a vault's token to `destination`, signing with the
/// pair PDA's seeds. Any CPI error is mapped to `TransferFailed`: SPL Token's
/// `Transfer` instruction already returns a hard error rather than a boolean,
/// so the spec's "empty-data-is-success" clause collapses to "the CPI itself
/// succeeded."
#[allow(clippy::too_many_arguments)]
pub fn safe_transfer<'a>(
    token_program: &AccountInfo<'a>,
    source_vault: &AccountInfo<'a>,
    destination: &AccountInfo<'a>,
    authority: &AccountInfo<'a>,
    amount: u64,
    authority_seeds: &[&[u8]],
) -> ProgramResult {
    if amount == 0 {
        return Ok(());
    }
    let ix = spl_token::instruction::transfer(
        token_program.key,
        source_vault.key,
        destination.key,
        authority.key,
        &[],
        amount,
    )
    .map_err(|_| AmmError::TransferFailed)?;

    invoke_signed(
        &ix,
        &[source_vault.clone(), destination.clone(), authority.clone(), token_program.clone()],
        &[authority_seeds],
    )
    .map_err(|_| AmmError::TransferFailed.into())
}
